//! Post-run audit of an event log.
//!
//! The log is the only evidence an outside observer has, so every check here
//! works from event lines alone:
//!
//! | Check              | Rule                                                        |
//! |--------------------|-------------------------------------------------------------|
//! | ordering           | timestamps never decrease                                   |
//! | single death       | at most one `died` line                                     |
//! | silence after death| `died` is the last line                                     |
//! | fork count         | every `is eating` follows exactly two fork takes            |
//! | mutual exclusion   | two philosophers sharing a fork eat ≥ `time_to_eat` apart   |
//! | no false death     | `died` ≥ `time_to_die` after that philosopher's last meal   |
//!
//! Fork releases are not logged.  Mutual exclusion is still checkable: a
//! holder keeps its forks for its full eat wait, which starts after its
//! `is eating` line, and the next holder can only log `is eating` after the
//! release.  So consecutive meals on one fork are at least `time_to_eat`
//! apart in whole milliseconds, and anything closer means the fork was
//! shared.

use dp_core::{Action, Event, ForkId, Millis, PhilosopherId, SimConfig};
use dp_table::{Grip, grip};
use thiserror::Error;

/// The first rule a log breaks.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum Violation {
    #[error("event `{event}` is earlier than the line before it ({previous})")]
    OutOfOrder { event: Event, previous: Millis },

    #[error("event `{event}` names a philosopher outside 1..={philosophers}")]
    UnknownPhilosopher { event: Event, philosophers: u32 },

    #[error("second death `{event}` after philosopher {first} died")]
    MultipleDeaths { event: Event, first: u32 },

    #[error("event `{event}` logged after the death at {death}")]
    EventAfterDeath { event: Event, death: Millis },

    #[error("philosopher {philosopher} ate at {at} holding {held} fork(s)")]
    ForkCount { philosopher: u32, at: Millis, held: u32 },

    #[error("philosopher {philosopher} took a fork at {at} while already holding {held}")]
    TooManyForks { philosopher: u32, at: Millis, held: u32 },

    #[error(
        "fork {fork} shared: philosopher {first} ate at {first_at}, \
         philosopher {second} ate at {second_at}"
    )]
    SharedFork {
        fork:      u32,
        first:     u32,
        first_at:  Millis,
        second:    u32,
        second_at: Millis,
    },

    #[error("philosopher {philosopher} declared dead at {at}, last meal at {last_meal}")]
    PrematureDeath { philosopher: u32, at: Millis, last_meal: Millis },
}

/// Summary of a log that passed every check.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct AuditReport {
    /// Meals per philosopher; index 0 is philosopher 1.
    pub meals:  Vec<u32>,
    /// Who died and when, if anybody did.
    pub death:  Option<(PhilosopherId, Millis)>,
    /// Number of lines audited.
    pub events: usize,
}

impl AuditReport {
    /// `true` if every philosopher logged at least `meals` meals.
    pub fn everyone_ate(&self, meals: u32) -> bool {
        self.meals.iter().all(|&m| m >= meals)
    }
}

/// Per-philosopher bookkeeping while replaying the log.
#[derive(Clone, Copy, Default)]
struct Replay {
    held:      u32,
    last_meal: Millis,
    meals:     u32,
}

/// Replay `events` against the rules above.
pub fn audit(events: &[Event], config: &SimConfig) -> Result<AuditReport, Violation> {
    let n = config.philosophers;
    let mut diners = vec![Replay::default(); n as usize];
    // Most recent meal on each fork: (eater, when).
    let mut last_use: Vec<Option<(PhilosopherId, Millis)>> = vec![None; n as usize];
    let mut death: Option<(PhilosopherId, Millis)> = None;
    let mut previous = Millis::ZERO;
    let max_held = if n == 1 { 1 } else { 2 };

    for &event in events {
        if event.at < previous {
            return Err(Violation::OutOfOrder { event, previous });
        }
        previous = event.at;

        let id = event.philosopher;
        if id.0 == 0 || id.0 > n {
            return Err(Violation::UnknownPhilosopher { event, philosophers: n });
        }
        if let Some((first, at)) = death {
            return Err(if event.action == Action::Died {
                Violation::MultipleDeaths { event, first: first.0 }
            } else {
                Violation::EventAfterDeath { event, death: at }
            });
        }

        let diner = &mut diners[id.seat_index()];
        match event.action {
            Action::TookFork => {
                if diner.held >= max_held {
                    return Err(Violation::TooManyForks {
                        philosopher: id.0,
                        at:          event.at,
                        held:        diner.held,
                    });
                }
                diner.held += 1;
            }
            Action::Eating => {
                if diner.held != 2 {
                    return Err(Violation::ForkCount {
                        philosopher: id.0,
                        at:          event.at,
                        held:        diner.held,
                    });
                }
                // Forks go back before the next take, which the log cannot show.
                diner.held = 0;
                diner.meals += 1;
                diner.last_meal = event.at;
                check_forks(&mut last_use, id, event.at, config)?;
            }
            Action::Died => {
                if event.at.since(diner.last_meal) < config.time_to_die {
                    return Err(Violation::PrematureDeath {
                        philosopher: id.0,
                        at:          event.at,
                        last_meal:   diner.last_meal,
                    });
                }
                death = Some((id, event.at));
            }
            Action::Sleeping | Action::Thinking => {}
        }
    }

    Ok(AuditReport {
        meals:  diners.iter().map(|d| d.meals).collect(),
        death,
        events: events.len(),
    })
}

/// Record a meal on both of `eater`'s forks, failing if either changed hands
/// faster than a meal can last.
fn check_forks(
    last_use: &mut [Option<(PhilosopherId, Millis)>],
    eater:    PhilosopherId,
    at:       Millis,
    config:   &SimConfig,
) -> Result<(), Violation> {
    let forks: [ForkId; 2] = match grip(eater, config.philosophers) {
        Grip::Pair { first, second } => [first, second],
        // Unreachable for a lone philosopher: it can never hold two forks.
        Grip::Lone(fork) => [fork, fork],
    };
    for fork in forks {
        if let Some((other, other_at)) = last_use[fork.index()] {
            if other != eater && at.since(other_at) < config.time_to_eat {
                return Err(Violation::SharedFork {
                    fork:      fork.0,
                    first:     other.0,
                    first_at:  other_at,
                    second:    eater.0,
                    second_at: at,
                });
            }
        }
        last_use[fork.index()] = Some((eater, at));
    }
    Ok(())
}
