//! `dp-sim` — runs the dinner.
//!
//! # Threads
//!
//! ```text
//! Sim::run
//!   ├─ epoch = Epoch::start()              shared start, captured once
//!   ├─ spawn philosopher-1 … philosopher-N  one OS thread each
//!   │     take forks → eat → release → sleep → think → …
//!   ├─ spawn monitor                        polls every seat each interval
//!   │     starving?  → board.declare_death  (logs `died`)
//!   │     all fed?   → board.declare_complete
//!   └─ join monitor, then every philosopher
//! ```
//!
//! Philosophers only ever *read* the stop flag; the monitor (or the
//! orchestrator, on a startup failure) is the only writer.  A philosopher
//! notices the stop at its next action boundary, or at its next poll when
//! [`WaitPolicy::Interruptible`][dp_core::WaitPolicy] is configured.
//!
//! # Quick-start
//!
//! ```rust,ignore
//! use dp_core::SimConfig;
//! use dp_sim::SimBuilder;
//! use dp_table::VecSink;
//!
//! let config = SimConfig::new(5, 800, 200, 200).with_meals_required(7);
//! let mut sim = SimBuilder::new(config, VecSink::new()).build()?;
//! let outcome = sim.run()?;
//! ```

pub mod builder;
pub mod error;
pub mod monitor;
pub mod philosopher;
pub mod sim;


pub use builder::SimBuilder;
pub use dp_table::Outcome;
pub use error::{SimError, SimResult};
pub use sim::Sim;
