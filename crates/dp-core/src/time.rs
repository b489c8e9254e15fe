//! Simulation time model.
//!
//! # Design
//!
//! Every timestamp in the simulation is a [`Millis`] offset from one shared
//! [`Epoch`], captured by the orchestrator before any thread is spawned:
//!
//!   elapsed = now - epoch.origin          (monotonic, truncated to ms)
//!
//! Storing offsets instead of wall-clock instants keeps the per-philosopher
//! meal record a plain integer and makes the monitor's starvation test a
//! single subtraction.  `Instant` is used underneath, so system clock jumps
//! never produce a false death.
//!
//! # Bounded waits
//!
//! [`wait`] and [`wait_unless`] never issue one long sleep.  They poll the
//! elapsed time in steps of `granularity` (sub-millisecond by default) so the
//! wait ends within one step of its deadline and, for [`wait_unless`], within
//! one step of the interrupt becoming true.

use std::fmt;
use std::thread;
use std::time::{Duration, Instant};

// ── Millis ────────────────────────────────────────────────────────────────────

/// A duration or an epoch offset in whole milliseconds.
#[derive(Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Debug, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Millis(pub u64);

impl Millis {
    pub const ZERO: Millis = Millis(0);

    /// Milliseconds elapsed from `earlier` to `self`, clamped at zero.
    #[inline]
    pub fn since(self, earlier: Millis) -> Millis {
        Millis(self.0.saturating_sub(earlier.0))
    }

    #[inline]
    pub fn as_duration(self) -> Duration {
        Duration::from_millis(self.0)
    }

    #[inline]
    pub fn is_zero(self) -> bool {
        self.0 == 0
    }
}

impl std::ops::Add for Millis {
    type Output = Millis;
    #[inline]
    fn add(self, rhs: Millis) -> Millis {
        Millis(self.0 + rhs.0)
    }
}

impl std::ops::Sub for Millis {
    type Output = Millis;
    #[inline]
    fn sub(self, rhs: Millis) -> Millis {
        self.since(rhs)
    }
}

impl fmt::Display for Millis {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}ms", self.0)
    }
}

// ── Epoch ─────────────────────────────────────────────────────────────────────

/// The shared simulation start.
///
/// `Epoch` is `Copy`: each thread receives its own copy when it is spawned,
/// so the start instant is fully published before the thread runs and is
/// never read through shared memory afterwards.
#[derive(Copy, Clone, Debug)]
pub struct Epoch {
    origin: Instant,
}

impl Epoch {
    /// Capture "now" as the simulation start.
    pub fn start() -> Self {
        Self { origin: Instant::now() }
    }

    /// Milliseconds since the epoch.
    #[inline]
    pub fn elapsed(&self) -> Millis {
        Millis(self.origin.elapsed().as_millis() as u64)
    }
}

// ── Bounded waits ─────────────────────────────────────────────────────────────

/// Block for at least `duration`, polling every `granularity`.
pub fn wait(duration: Millis, granularity: Duration) {
    wait_unless(duration, granularity, || false);
}

/// Block for at least `duration` unless `interrupt` returns `true` first.
///
/// `interrupt` is checked once per poll.  Returns `true` if the full
/// duration elapsed and `false` if the wait was cut short.
pub fn wait_unless<F>(duration: Millis, granularity: Duration, mut interrupt: F) -> bool
where
    F: FnMut() -> bool,
{
    let deadline = duration.as_duration();
    let start = Instant::now();
    loop {
        let elapsed = start.elapsed();
        if elapsed >= deadline {
            return true;
        }
        if interrupt() {
            return false;
        }
        thread::sleep(granularity.min(deadline - elapsed));
    }
}
