//! Simulation configuration and the strict numeric parsers that feed it.
//!
//! A `SimConfig` is immutable once a simulation is built.  Construction is
//! split in two steps so front ends can fill the fields however they like:
//!
//! 1. Parse raw strings with [`parse_positive`] / [`parse_meals`].
//! 2. Assemble the struct and call [`SimConfig::validate`] (the simulation
//!    builder calls it again before any shared state exists).

use std::time::Duration;

use crate::{DpError, DpResult, Millis};

/// Largest accepted numeric argument: the range of a signed 32-bit integer.
const MAX_ARG: u64 = i32::MAX as u64;

// ── WaitPolicy ────────────────────────────────────────────────────────────────

/// Whether timed waits (eat, sleep, the lone philosopher's death wait) end
/// early once the simulation has stopped.
#[derive(Copy, Clone, PartialEq, Eq, Debug, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum WaitPolicy {
    /// Waits always run to completion; the stop flag is only checked between
    /// actions.  Threads may linger up to one eat or sleep after a death.
    #[default]
    Uninterruptible,
    /// Waits also poll the stop flag and return as soon as it is set.  Costs
    /// one extra lock acquisition per poll per philosopher.
    Interruptible,
}

// ── SimConfig ─────────────────────────────────────────────────────────────────

/// Top-level simulation configuration.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SimConfig {
    /// Number of philosophers (and forks).  At least 1.
    pub philosophers: u32,

    /// A philosopher that has not started a meal for this long dies.
    pub time_to_die: Millis,

    /// How long a meal lasts; both forks are held throughout.
    pub time_to_eat: Millis,

    /// How long a philosopher sleeps after eating, holding no fork.
    pub time_to_sleep: Millis,

    /// Stop once every philosopher has eaten this many meals.  `None` runs
    /// until somebody starves.
    pub meals_required: Option<u32>,

    /// Delay before even-numbered philosophers reach for their first fork.
    /// A contention heuristic for the simultaneous start, not a correctness
    /// requirement; zero disables it.
    pub start_stagger: Millis,

    /// How often the monitor scans for starvation and completion.  Bounds the
    /// error of a reported death timestamp.
    pub monitor_interval: Duration,

    /// Polling step of every timed wait.
    pub wait_granularity: Duration,

    pub wait_policy: WaitPolicy,
}

impl SimConfig {
    pub const DEFAULT_START_STAGGER:    Millis   = Millis(1);
    pub const DEFAULT_MONITOR_INTERVAL: Duration = Duration::from_millis(1);
    pub const DEFAULT_WAIT_GRANULARITY: Duration = Duration::from_micros(500);

    /// Configuration with the given timings and default tunables.
    pub fn new(philosophers: u32, time_to_die: u64, time_to_eat: u64, time_to_sleep: u64) -> Self {
        Self {
            philosophers,
            time_to_die:      Millis(time_to_die),
            time_to_eat:      Millis(time_to_eat),
            time_to_sleep:    Millis(time_to_sleep),
            meals_required:   None,
            start_stagger:    Self::DEFAULT_START_STAGGER,
            monitor_interval: Self::DEFAULT_MONITOR_INTERVAL,
            wait_granularity: Self::DEFAULT_WAIT_GRANULARITY,
            wait_policy:      WaitPolicy::default(),
        }
    }

    /// Set the number of meals after which the run completes.
    pub fn with_meals_required(mut self, meals: u32) -> Self {
        self.meals_required = Some(meals);
        self
    }

    /// Check every invariant the simulation relies on.
    pub fn validate(&self) -> DpResult<()> {
        if self.philosophers == 0 {
            return Err(DpError::Config("at least one philosopher is required".into()));
        }
        for (name, value) in [
            ("time_to_die", self.time_to_die),
            ("time_to_eat", self.time_to_eat),
            ("time_to_sleep", self.time_to_sleep),
        ] {
            if value.is_zero() {
                return Err(DpError::Config(format!("{name} must be positive")));
            }
        }
        if self.monitor_interval.is_zero() {
            return Err(DpError::Config("monitor_interval must be positive".into()));
        }
        if self.wait_granularity.is_zero() {
            return Err(DpError::Config("wait_granularity must be positive".into()));
        }
        Ok(())
    }

    /// `true` once `meals` satisfies the required meal count.  Always `false`
    /// for unbounded runs.
    #[inline]
    pub fn is_satisfied(&self, meals: u32) -> bool {
        self.meals_required.is_some_and(|required| meals >= required)
    }

    /// How long a philosopher stays thinking before reaching for forks again.
    ///
    /// Zero at an even table.  At an odd table (N ≥ 3) one philosopher is
    /// always left out of each round, and with an instant think the same
    /// neighbour can win the shared fork round after round.  Thinking for
    /// `2 * time_to_eat - time_to_sleep` puts every philosopher back at the
    /// table only after both neighbours have had their turn.
    pub fn think_time(&self) -> Millis {
        if self.philosophers < 3 || self.philosophers % 2 == 0 {
            return Millis::ZERO;
        }
        (self.time_to_eat + self.time_to_eat).since(self.time_to_sleep)
    }
}

// ── Argument parsing ──────────────────────────────────────────────────────────

/// Parse a strictly positive count or duration.
///
/// Accepts ASCII digits only: no sign, no whitespace, no empty string.  The
/// value must fit in a signed 32-bit integer.
pub fn parse_positive(value: &str) -> DpResult<u32> {
    let n = parse_digits(value)?;
    if n == 0 {
        return Err(parse_error(value, "must be greater than zero"));
    }
    Ok(n)
}

/// Parse the optional meal count.  Same rules as [`parse_positive`] except
/// that zero is accepted.
pub fn parse_meals(value: &str) -> DpResult<u32> {
    parse_digits(value)
}

fn parse_digits(value: &str) -> DpResult<u32> {
    if value.is_empty() {
        return Err(parse_error(value, "empty value"));
    }
    let mut n: u64 = 0;
    for b in value.bytes() {
        if !b.is_ascii_digit() {
            return Err(parse_error(value, "only digits are allowed"));
        }
        n = n * 10 + u64::from(b - b'0');
        if n > MAX_ARG {
            return Err(parse_error(value, "exceeds 2147483647"));
        }
    }
    Ok(n as u32)
}

fn parse_error(value: &str, reason: &'static str) -> DpError {
    DpError::Parse { what: "number", value: value.to_owned(), reason }
}
