//! `dp-table` — the shared state every simulation thread works against.
//!
//! # Crate layout
//!
//! | Module      | Contents                                                        |
//! |-------------|-----------------------------------------------------------------|
//! | [`fork`]    | `Forks` arena, `ForkGuard`, `Grip` and the acquisition order    |
//! | [`seat`]    | `Seat` — one philosopher's meal record behind its own lock      |
//! | [`board`]   | `Board<S>` — stop flag and event sink under one lock, `Outcome` |
//! | [`sink`]    | `EventSink` trait, `NullSink`, `VecSink`                        |
//! | [`table`]   | `Table<S>` — owns all of the above                              |
//!
//! # Locking model
//!
//! Every piece of shared mutable state has exactly one lock and no lock
//! guards more than one concern:
//!
//! ```text
//! fork i          Mutex<()>           held by the philosopher eating with it
//! seat i          Mutex<MealState>    written by philosopher i, read by monitor
//! board           Mutex<BoardState>   stop flag + sink; every reader/writer
//! ```
//!
//! The board lock is the only one shared by all threads.  Locks are only
//! ever nested in one direction:
//!
//! ```text
//! fork  →  board  →  seat
//! ```
//!
//! A philosopher holding forks posts to the board, and the board records a
//! meal or confirms a death on a seat.  No lock is taken against that
//! order, so the only cycle that could exist is between forks, and
//! [`fork::grip`] rules that out.

pub mod board;
pub mod fork;
pub mod seat;
pub mod sink;
pub mod table;


pub use board::{Board, Outcome};
pub use fork::{ForkGuard, Forks, Grip, grip, left_fork, right_fork};
pub use seat::{MealState, Seat};
pub use sink::{EventSink, NullSink, VecSink};
pub use table::Table;
