//! `dp-core` — foundational types for the `rust_dp` dining philosophers
//! simulation.
//!
//! This crate is a dependency of every other `dp-*` crate.  It has no `dp-*`
//! dependencies and a single required external one (`thiserror`, plus
//! optional `serde`).
//!
//! # What lives here
//!
//! | Module          | Contents                                              |
//! |-----------------|-------------------------------------------------------|
//! | [`ids`]         | `PhilosopherId`, `ForkId`                             |
//! | [`time`]        | `Millis`, `Epoch`, bounded `wait` primitives          |
//! | [`config`]      | `SimConfig`, `WaitPolicy`, strict argument parsers    |
//! | [`event`]       | `Action`, `Event` (one log line)                      |
//! | [`error`]       | `DpError`, `DpResult`                                 |
//!
//! # Feature flags
//!
//! | Flag    | Effect                                                     |
//! |---------|------------------------------------------------------------|
//! | `serde` | Adds `Serialize`/`Deserialize` to all public data types.   |

pub mod config;
pub mod error;
pub mod event;
pub mod ids;
pub mod time;

#[cfg(test)]
mod tests;

// ── Re-exports ────────────────────────────────────────────────────────────────

pub use config::{SimConfig, WaitPolicy, parse_meals, parse_positive};
pub use error::{DpError, DpResult};
pub use event::{Action, Event};
pub use ids::{ForkId, PhilosopherId};
pub use time::{Epoch, Millis};
