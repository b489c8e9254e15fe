//! Observable state transitions — one `Event` per line of the event log.
//!
//! The line format is fixed:
//!
//! ```text
//! <elapsed_ms> <philosopher_id> <action>
//! 200 3 has taken a fork
//! ```
//!
//! `Display` writes it and `FromStr` reads it back, so a log captured from
//! the binary can be fed straight into the auditor in `dp-output`.

use std::fmt;
use std::str::FromStr;

use crate::{DpError, Millis, PhilosopherId};

// ── Action ────────────────────────────────────────────────────────────────────

/// What a philosopher just did.
#[derive(Copy, Clone, PartialEq, Eq, Hash, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Action {
    TookFork,
    Eating,
    Sleeping,
    Thinking,
    Died,
}

impl Action {
    pub const ALL: [Action; 5] = [
        Action::TookFork,
        Action::Eating,
        Action::Sleeping,
        Action::Thinking,
        Action::Died,
    ];

    /// The exact text printed in the event log.
    pub fn as_str(self) -> &'static str {
        match self {
            Action::TookFork => "has taken a fork",
            Action::Eating   => "is eating",
            Action::Sleeping => "is sleeping",
            Action::Thinking => "is thinking",
            Action::Died     => "died",
        }
    }
}

impl fmt::Display for Action {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Action {
    type Err = DpError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Action::ALL
            .into_iter()
            .find(|a| a.as_str() == s)
            .ok_or_else(|| DpError::Parse {
                what:   "action",
                value:  s.to_owned(),
                reason: "unknown action",
            })
    }
}

// ── Event ─────────────────────────────────────────────────────────────────────

/// One timestamped transition.
#[derive(Copy, Clone, PartialEq, Eq, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Event {
    /// Offset from the simulation epoch.
    pub at:          Millis,
    pub philosopher: PhilosopherId,
    pub action:      Action,
}

impl Event {
    pub fn new(at: Millis, philosopher: PhilosopherId, action: Action) -> Self {
        Self { at, philosopher, action }
    }
}

impl fmt::Display for Event {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {} {}", self.at.0, self.philosopher.0, self.action)
    }
}

impl FromStr for Event {
    type Err = DpError;

    fn from_str(line: &str) -> Result<Self, Self::Err> {
        let malformed = |reason| DpError::Parse {
            what:   "event line",
            value:  line.to_owned(),
            reason,
        };

        let mut parts = line.trim_end().splitn(3, ' ');
        let at = parts
            .next()
            .and_then(|s| s.parse::<u64>().ok())
            .ok_or_else(|| malformed("bad timestamp"))?;
        let philosopher = parts
            .next()
            .and_then(|s| s.parse::<u32>().ok())
            .filter(|&id| id > 0)
            .ok_or_else(|| malformed("bad philosopher id"))?;
        let action = parts
            .next()
            .ok_or_else(|| malformed("missing action"))?
            .parse::<Action>()?;

        Ok(Event::new(Millis(at), PhilosopherId(philosopher), action))
    }
}
