//! The monitor routine: the single authority on when the dinner ends.
//!
//! Each pass scans every seat for starvation first and only then checks
//! whether everybody has eaten enough, so a philosopher that starves in the
//! same pass as the last meal completes is still reported as dead.  The
//! first starving seat found wins; the scan stops there.

use std::thread;

use dp_core::{Epoch, SimConfig};
use dp_table::{EventSink, Outcome, Table};
use tracing::debug;

/// Thread body.  Returns why the simulation stopped.
pub(crate) fn watch<S: EventSink>(table: &Table<S>, config: &SimConfig, epoch: Epoch) -> Outcome {
    let mut passes: u64 = 0;
    loop {
        // Stopped from outside (startup failure, panicked thread).
        if let Some(outcome) = table.board().outcome() {
            return outcome;
        }
        if let Some(outcome) = check_starvation(table, config, &epoch) {
            debug!(passes, "monitor saw starvation");
            return outcome;
        }
        if check_satisfied(table, config) {
            debug!(passes, "monitor saw every philosopher satisfied");
            return table.board().outcome().unwrap_or(Outcome::Satisfied);
        }
        passes += 1;
        thread::sleep(config.monitor_interval);
    }
}

/// Declare the first philosopher found past `time_to_die`.
///
/// A seat that ate between this scan and the board's own check is skipped
/// and the scan moves on.
fn check_starvation<S: EventSink>(
    table:  &Table<S>,
    config: &SimConfig,
    epoch:  &Epoch,
) -> Option<Outcome> {
    for seat in table.seats() {
        if seat.starving_for(epoch) < config.time_to_die {
            continue;
        }
        table.board().declare_death(seat, config.time_to_die, epoch);
        // If something else stopped the run first, that cause stands.
        if let Some(outcome) = table.board().outcome() {
            return Some(outcome);
        }
    }
    None
}

/// `true` if a meal limit is set and every seat has reached it; stops the
/// run when it is.
fn check_satisfied<S: EventSink>(table: &Table<S>, config: &SimConfig) -> bool {
    if config.meals_required.is_none() {
        return false;
    }
    let all_fed = table
        .seats()
        .iter()
        .all(|seat| config.is_satisfied(seat.meals_eaten()));
    if all_fed {
        table.board().declare_complete();
    }
    all_fed
}
