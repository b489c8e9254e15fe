//! `dp-output` — what happens to events after the board accepts them.
//!
//! | Module     | Contents                                                    |
//! |------------|-------------------------------------------------------------|
//! | [`log`]    | `LogWriter` (plain `<ms> <id> <action>` lines), `read_log`  |
//! | [`csv`]    | `CsvWriter` (`elapsed_ms,philosopher,event`)                |
//! | [`audit`]  | `audit` — checks a finished log for protocol violations     |
//! | [`error`]  | `OutputError`, `OutputResult`                               |
//!
//! Writers implement `dp_table::EventSink`.  Sink methods cannot return
//! errors, so each writer keeps its first error; check it after the run
//! with `take_error`.
//!
//! # Usage
//!
//! ```rust,ignore
//! use dp_output::{CsvWriter, LogWriter};
//!
//! let sink = (LogWriter::stdout(), Some(CsvWriter::new(Path::new("run.csv"))?));
//! let mut sim = SimBuilder::new(config, sink).build()?;
//! sim.run()?;
//! let (mut log, csv) = sim.into_sink();
//! if let Some(e) = log.take_error() {
//!     eprintln!("output error: {e}");
//! }
//! ```

pub mod audit;
pub mod csv;
pub mod error;
pub mod log;

#[cfg(test)]
mod tests;

pub use audit::{AuditReport, Violation, audit};
pub use csv::CsvWriter;
pub use error::{OutputError, OutputResult};
pub use log::{LogWriter, read_log};
