//! Per-philosopher meal bookkeeping.

use std::sync::{Mutex, MutexGuard, PoisonError};

use dp_core::{Epoch, Millis, PhilosopherId};

/// The two fields the monitor must always read together.
#[derive(Copy, Clone, PartialEq, Eq, Debug, Default)]
pub struct MealState {
    /// Epoch offset at which the latest meal started.
    pub last_meal:   Millis,
    pub meals_eaten: u32,
}

/// A philosopher's place at the table.
///
/// Written only by the philosopher it belongs to and read by the monitor;
/// other philosophers never touch it.  Both fields live behind one lock so a
/// reader can never observe a new `last_meal` with a stale `meals_eaten`.
pub struct Seat {
    id:    PhilosopherId,
    state: Mutex<MealState>,
}

impl Seat {
    pub fn new(id: PhilosopherId) -> Self {
        Self { id, state: Mutex::new(MealState::default()) }
    }

    pub fn id(&self) -> PhilosopherId {
        self.id
    }

    fn lock(&self) -> MutexGuard<'_, MealState> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Start the starvation clock at `at` without touching the meal count.
    pub fn seat_down(&self, at: Millis) {
        self.lock().last_meal = at;
    }

    /// Record a meal starting at `at`; returns the new meal count.
    pub fn record_meal(&self, at: Millis) -> u32 {
        let mut state = self.lock();
        state.last_meal = at;
        state.meals_eaten += 1;
        state.meals_eaten
    }

    /// Consistent copy of both fields.
    pub fn snapshot(&self) -> MealState {
        *self.lock()
    }

    pub fn meals_eaten(&self) -> u32 {
        self.lock().meals_eaten
    }

    /// Time since the latest meal started.
    ///
    /// "Now" is sampled while the lock is held, so a meal recorded
    /// concurrently is either fully seen or not at all.
    pub fn starving_for(&self, epoch: &Epoch) -> Millis {
        let state = self.lock();
        epoch.elapsed().since(state.last_meal)
    }

    /// Back to zero meals, last meal at the epoch.
    pub fn reset(&mut self) {
        *self.state.get_mut().unwrap_or_else(PoisonError::into_inner) = MealState::default();
    }
}
