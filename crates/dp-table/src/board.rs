//! The board: the one place where "is the simulation over?" is decided.
//!
//! # One lock for the stop flag and the sink
//!
//! A philosopher must never log an action after a death has been announced.
//! Checking the flag and then printing under a different lock leaves a
//! window where the monitor announces the death in between.  Here the check
//! and the write happen in one critical section, and the death announcement
//! sets the flag and writes its line in another, so the `died` line is
//! always the last line of the log.
//!
//! Meals and deaths also touch a seat.  The seat lock is taken inside the
//! board lock, never the other way round.

use std::fmt;
use std::sync::{Mutex, MutexGuard, PoisonError};

use dp_core::{Action, Epoch, Event, Millis, PhilosopherId};

use crate::{EventSink, Seat};

// ── Outcome ───────────────────────────────────────────────────────────────────

/// Why the simulation stopped.  Set exactly once per run.
#[derive(Copy, Clone, PartialEq, Eq, Debug)]
pub enum Outcome {
    /// `philosopher` went `time_to_die` without starting a meal.
    Starved { philosopher: PhilosopherId, at: Millis },
    /// Every philosopher ate the required number of meals.
    Satisfied,
    /// The orchestrator stopped the run (startup failure or a panicked thread).
    Aborted,
}

impl fmt::Display for Outcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Outcome::Starved { philosopher, at } => {
                write!(f, "philosopher {} died at {}", philosopher.0, at)
            }
            Outcome::Satisfied => f.write_str("every philosopher ate enough"),
            Outcome::Aborted   => f.write_str("aborted"),
        }
    }
}

// ── Board ─────────────────────────────────────────────────────────────────────

struct BoardState<S> {
    /// `None` while running.  Only ever goes from `None` to `Some`.
    outcome: Option<Outcome>,
    sink:    S,
}

/// Stop flag plus event sink, guarded together.
pub struct Board<S> {
    state: Mutex<BoardState<S>>,
}

impl<S: EventSink> Board<S> {
    pub fn new(sink: S) -> Self {
        Self {
            state: Mutex::new(BoardState { outcome: None, sink }),
        }
    }

    fn lock(&self) -> MutexGuard<'_, BoardState<S>> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }

    pub fn is_stopped(&self) -> bool {
        self.lock().outcome.is_some()
    }

    pub fn outcome(&self) -> Option<Outcome> {
        self.lock().outcome
    }

    /// Log `action` for `philosopher` unless the simulation has stopped.
    ///
    /// The timestamp is taken inside the lock, so timestamps never go
    /// backwards in the log.  Returns whether the event was written.
    pub fn post(&self, philosopher: PhilosopherId, action: Action, epoch: &Epoch) -> bool {
        let mut state = self.lock();
        if state.outcome.is_some() {
            return false;
        }
        let event = Event::new(epoch.elapsed(), philosopher, action);
        state.sink.record(&event);
        true
    }

    /// Log "is eating" for `seat` and record the meal at the same timestamp.
    ///
    /// Both happen under the board lock, so the monitor never sees a meal
    /// without its log line, nor a log line without its meal.  Returns the
    /// new meal count, or `None` if the run has stopped (nothing is logged
    /// or recorded).
    pub fn post_meal(&self, seat: &Seat, epoch: &Epoch) -> Option<u32> {
        let mut state = self.lock();
        if state.outcome.is_some() {
            return None;
        }
        let at = epoch.elapsed();
        state.sink.record(&Event::new(at, seat.id(), Action::Eating));
        Some(seat.record_meal(at))
    }

    /// Stop the run because `seat` starved and log its death.
    ///
    /// Starvation is checked again under the board lock: a meal posted
    /// since the caller's own check wins and nothing happens.  Returns the
    /// logged death time, or `None` if the philosopher is not starving or
    /// the run had already stopped.
    pub fn declare_death(&self, seat: &Seat, time_to_die: Millis, epoch: &Epoch) -> Option<Millis> {
        let mut state = self.lock();
        if state.outcome.is_some() || seat.starving_for(epoch) < time_to_die {
            return None;
        }
        let at = epoch.elapsed();
        let philosopher = seat.id();
        state.outcome = Some(Outcome::Starved { philosopher, at });
        state.sink.record(&Event::new(at, philosopher, Action::Died));
        Some(at)
    }

    /// Stop the run because every philosopher is satisfied.  Logs nothing.
    pub fn declare_complete(&self) -> bool {
        self.stop_with(Outcome::Satisfied)
    }

    /// Stop the run without a cause of its own.
    pub fn abort(&self) -> bool {
        self.stop_with(Outcome::Aborted)
    }

    fn stop_with(&self, outcome: Outcome) -> bool {
        let mut state = self.lock();
        if state.outcome.is_some() {
            return false;
        }
        state.outcome = Some(outcome);
        true
    }

    /// Clear the stop flag for another run.
    pub fn reset(&mut self) {
        self.state_mut().outcome = None;
    }

    /// Flush the sink.
    pub fn finish(&mut self) {
        self.state_mut().sink.finish();
    }

    pub fn sink_mut(&mut self) -> &mut S {
        &mut self.state_mut().sink
    }

    pub fn into_sink(self) -> S {
        self.state
            .into_inner()
            .unwrap_or_else(PoisonError::into_inner)
            .sink
    }

    fn state_mut(&mut self) -> &mut BoardState<S> {
        self.state.get_mut().unwrap_or_else(PoisonError::into_inner)
    }
}
