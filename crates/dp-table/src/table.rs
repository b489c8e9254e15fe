//! `Table<S>` — owner of every piece of shared simulation state.

use dp_core::PhilosopherId;

use crate::{Board, EventSink, Forks, Grip, Seat, grip};

/// Forks, seats, and the board for one dinner.
///
/// The orchestrator owns the table for the whole run; philosopher and
/// monitor threads only ever borrow it.
pub struct Table<S> {
    forks: Forks,
    seats: Vec<Seat>,
    board: Board<S>,
}

impl<S: EventSink> Table<S> {
    /// Lay a table for `philosophers` diners reporting to `sink`.
    pub fn new(philosophers: u32, sink: S) -> Self {
        let seats = (0..philosophers as usize)
            .map(|i| Seat::new(PhilosopherId::from_seat_index(i)))
            .collect();
        Self {
            forks: Forks::new(philosophers),
            seats,
            board: Board::new(sink),
        }
    }

    /// Number of philosophers (and forks).
    pub fn len(&self) -> usize {
        self.seats.len()
    }

    pub fn is_empty(&self) -> bool {
        self.seats.is_empty()
    }

    pub fn forks(&self) -> &Forks {
        &self.forks
    }

    pub fn seats(&self) -> &[Seat] {
        &self.seats
    }

    pub fn seat(&self, philosopher: PhilosopherId) -> &Seat {
        &self.seats[philosopher.seat_index()]
    }

    pub fn board(&self) -> &Board<S> {
        &self.board
    }

    pub fn board_mut(&mut self) -> &mut Board<S> {
        &mut self.board
    }

    /// Acquisition order for `philosopher` at this table.
    pub fn grip(&self, philosopher: PhilosopherId) -> Grip {
        grip(philosopher, self.seats.len() as u32)
    }

    pub fn is_stopped(&self) -> bool {
        self.board.is_stopped()
    }

    /// Meal counts, indexed by seat.
    pub fn meals(&self) -> Vec<u32> {
        self.seats.iter().map(Seat::meals_eaten).collect()
    }

    /// Prepare for a fresh run: zero every seat and clear the stop flag.
    pub fn reset(&mut self) {
        for seat in &mut self.seats {
            seat.reset();
        }
        self.board.reset();
    }

    pub fn into_sink(self) -> S {
        self.board.into_sink()
    }
}
