//! The philosopher routine: one thread per seat.
//!
//! ```text
//! seat down (last meal = epoch)
//!   │
//!   ├─ lone philosopher: take the only fork, wait time_to_die, leave
//!   │
//!   └─ even id: wait start_stagger
//!      loop until stopped:
//!        take first fork  → "has taken a fork"
//!        take second fork → "has taken a fork"
//!        "is eating" + record meal, wait time_to_eat, release both
//!        satisfied? → leave
//!        "is sleeping", wait time_to_sleep
//!        "is thinking", wait think_time (zero at an even table)
//! ```

use dp_core::{Action, Epoch, ForkId, Millis, SimConfig, WaitPolicy, time};
use dp_table::{EventSink, Grip, Seat, Table};
use tracing::debug;

/// Everything one philosopher thread borrows for the run.
pub(crate) struct Diner<'a, S> {
    seat:   &'a Seat,
    table:  &'a Table<S>,
    config: &'a SimConfig,
    epoch:  Epoch,
}

impl<'a, S: EventSink> Diner<'a, S> {
    pub(crate) fn new(seat: &'a Seat, table: &'a Table<S>, config: &'a SimConfig, epoch: Epoch) -> Self {
        Self { seat, table, config, epoch }
    }

    /// Thread body.  Returns the number of meals eaten.
    pub(crate) fn dine(self) -> u32 {
        // The starvation clock starts at the shared epoch, not whenever this
        // thread happened to be scheduled.
        self.seat.seat_down(Millis::ZERO);

        match self.table.grip(self.seat.id()) {
            Grip::Lone(fork) => self.dine_alone(fork),
            Grip::Pair { first, second } => {
                if self.seat.id().is_even() && !self.config.start_stagger.is_zero() {
                    self.wait(self.config.start_stagger);
                }
                self.dine_together(first, second);
            }
        }

        let meals = self.seat.meals_eaten();
        debug!(philosopher = self.seat.id().0, meals, "left the table");
        meals
    }

    /// One fork and nobody to share with: hold it until starvation.
    fn dine_alone(&self, fork: ForkId) {
        let _held = self.table.forks().take(fork);
        self.post(Action::TookFork);
        self.wait(self.config.time_to_die);
    }

    fn dine_together(&self, first: ForkId, second: ForkId) {
        while !self.table.is_stopped() {
            let meals = self.eat(first, second);
            if self.config.is_satisfied(meals) {
                break;
            }
            self.sleep();
            self.think();
        }
    }

    /// Take both forks, eat, and put both back.  Returns the meal count.
    fn eat(&self, first: ForkId, second: ForkId) -> u32 {
        let forks = self.table.forks();

        let first = forks.take(first);
        self.post(Action::TookFork);
        let second = forks.take(second);
        self.post(Action::TookFork);

        // Logged and recorded in one step.  After a stop nothing is
        // recorded; the count is only used to decide whether to leave.
        let meals = self
            .table
            .board()
            .post_meal(self.seat, &self.epoch)
            .unwrap_or_else(|| self.seat.meals_eaten());
        self.wait(self.config.time_to_eat);

        drop(second);
        drop(first);
        meals
    }

    fn sleep(&self) {
        self.post(Action::Sleeping);
        self.wait(self.config.time_to_sleep);
    }

    fn think(&self) {
        self.post(Action::Thinking);
        let think_time = self.config.think_time();
        if !think_time.is_zero() {
            self.wait(think_time);
        }
    }

    fn post(&self, action: Action) {
        self.table.board().post(self.seat.id(), action, &self.epoch);
    }

    fn wait(&self, duration: Millis) {
        let granularity = self.config.wait_granularity;
        match self.config.wait_policy {
            WaitPolicy::Uninterruptible => time::wait(duration, granularity),
            WaitPolicy::Interruptible => {
                time::wait_unless(duration, granularity, || self.table.is_stopped());
            }
        }
    }
}
