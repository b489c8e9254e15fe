//! The `Sim` struct and its run loop.

use std::io;
use std::thread::{self, Scope, ScopedJoinHandle};

use dp_core::{Epoch, SimConfig};
use dp_table::{EventSink, Outcome, Table};
use tracing::{debug, info, warn};

use crate::monitor;
use crate::philosopher::Diner;
use crate::{SimError, SimResult};

/// The simulation runner.
///
/// Owns the configuration and the [`Table`] (forks, seats, board) for its
/// whole lifetime.  [`run`](Self::run) lends the table to one scoped thread
/// per philosopher plus the monitor and joins all of them before returning,
/// so no thread can outlive the state it borrows.
///
/// Create via [`SimBuilder`][crate::SimBuilder].
pub struct Sim<S: EventSink> {
    pub(crate) config: SimConfig,
    pub(crate) table:  Table<S>,
}

impl<S: EventSink> Sim<S> {
    // ── Public API ────────────────────────────────────────────────────────

    /// Run one dinner to completion.
    ///
    /// Returns once the monitor has decided the outcome and every philosopher
    /// has left the table.  The sink is flushed before returning.
    ///
    /// # Errors
    ///
    /// - [`SimError::Spawn`] if a thread could not be created.  The run is
    ///   aborted and every thread spawned so far is joined first.
    /// - [`SimError::Panicked`] if any thread panicked.
    pub fn run(&mut self) -> SimResult<Outcome> {
        self.table.reset();
        info!(
            philosophers   = self.config.philosophers,
            time_to_die    = self.config.time_to_die.0,
            time_to_eat    = self.config.time_to_eat.0,
            time_to_sleep  = self.config.time_to_sleep.0,
            meals_required = ?self.config.meals_required,
            "dinner starts"
        );

        let table = &self.table;
        let config = &self.config;
        // Captured before the first spawn; every thread gets its own copy.
        let epoch = Epoch::start();

        let result = thread::scope(|scope| run_threads(scope, table, config, epoch));

        self.table.board_mut().finish();
        match &result {
            Ok(outcome) => info!(%outcome, "dinner over"),
            Err(e)      => warn!(error = %e, "dinner failed"),
        }
        result
    }

    pub fn config(&self) -> &SimConfig {
        &self.config
    }

    pub fn table(&self) -> &Table<S> {
        &self.table
    }

    /// Meals eaten per philosopher (index 0 is philosopher 1) in the most
    /// recent run.
    pub fn meals(&self) -> Vec<u32> {
        self.table.meals()
    }

    pub fn sink_mut(&mut self) -> &mut S {
        self.table.board_mut().sink_mut()
    }

    pub fn into_sink(self) -> S {
        self.table.into_sink()
    }
}

// ── Thread lifecycle ──────────────────────────────────────────────────────────

fn run_threads<'scope, 'env, S: EventSink>(
    scope:  &'scope Scope<'scope, 'env>,
    table:  &'env Table<S>,
    config: &'env SimConfig,
    epoch:  Epoch,
) -> SimResult<Outcome> {
    let mut diners: Vec<(String, ScopedJoinHandle<'scope, u32>)> = Vec::with_capacity(table.len());

    for seat in table.seats() {
        let name = format!("philosopher-{}", seat.id().0);
        let spawned = thread::Builder::new()
            .name(name.clone())
            .spawn_scoped(scope, move || Diner::new(seat, table, config, epoch).dine());
        match spawned {
            Ok(handle) => diners.push((name, handle)),
            Err(source) => return Err(abandon_startup(table, diners, name, source)),
        }
    }
    debug!(count = diners.len(), "philosophers seated");

    let monitor = thread::Builder::new()
        .name("monitor".into())
        .spawn_scoped(scope, move || monitor::watch(table, config, epoch));
    let monitor = match monitor {
        Ok(handle) => handle,
        Err(source) => return Err(abandon_startup(table, diners, "monitor".into(), source)),
    };

    let outcome = monitor.join();
    if outcome.is_err() {
        // Nobody else will ever set the flag; release the philosophers.
        table.board().abort();
    }
    let meals = join_all(diners)?;
    debug!(?meals, "philosophers joined");

    outcome.map_err(|_| SimError::Panicked { thread: "monitor".into() })
}

/// Stop the run after `thread` failed to spawn and join everything spawned
/// so far.  The spawn failure is the error reported; a panic found while
/// joining is only logged.
pub(crate) fn abandon_startup<S: EventSink>(
    table:  &Table<S>,
    diners: Vec<(String, ScopedJoinHandle<'_, u32>)>,
    thread: String,
    source: io::Error,
) -> SimError {
    table.board().abort();
    if let Err(e) = join_all(diners) {
        warn!(error = %e, "thread panicked while unwinding a failed start");
    }
    SimError::Spawn { thread, source }
}

/// Join every handle, even after a failure, and report the first panic.
fn join_all(handles: Vec<(String, ScopedJoinHandle<'_, u32>)>) -> SimResult<Vec<u32>> {
    let mut meals = Vec::with_capacity(handles.len());
    let mut panicked = None;
    for (name, handle) in handles {
        match handle.join() {
            Ok(n) => meals.push(n),
            Err(_) => {
                warn!(thread = %name, "thread panicked");
                if panicked.is_none() {
                    panicked = Some(name);
                }
            }
        }
    }
    match panicked {
        Some(thread) => Err(SimError::Panicked { thread }),
        None => Ok(meals),
    }
}
