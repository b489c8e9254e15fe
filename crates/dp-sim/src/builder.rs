//! Builder for constructing a [`Sim`].

use dp_core::SimConfig;
use dp_table::{EventSink, Table};

use crate::{Sim, SimResult};

/// Builder for [`Sim<S>`].
///
/// Validation happens in [`build`](Self::build), before any fork, seat or
/// thread exists, so a bad configuration never leaves partial state behind.
///
/// # Example
///
/// ```rust,ignore
/// let mut sim = SimBuilder::new(SimConfig::new(4, 410, 200, 200), NullSink)
///     .meals_required(10)
///     .build()?;
/// ```
pub struct SimBuilder<S: EventSink> {
    config: SimConfig,
    sink:   S,
}

impl<S: EventSink> SimBuilder<S> {
    pub fn new(config: SimConfig, sink: S) -> Self {
        Self { config, sink }
    }

    /// Override the required meal count.
    pub fn meals_required(mut self, meals: u32) -> Self {
        self.config.meals_required = Some(meals);
        self
    }

    /// Validate the configuration and lay the table.
    pub fn build(self) -> SimResult<Sim<S>> {
        self.config.validate()?;
        let table = Table::new(self.config.philosophers, self.sink);
        Ok(Sim { config: self.config, table })
    }
}
