//! Error types for dp-output.

use dp_core::DpError;
use thiserror::Error;

/// Errors that can occur when writing or reading an event log.
#[derive(Debug, Error)]
pub enum OutputError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("CSV write error: {0}")]
    Csv(#[from] csv::Error),

    #[error("line {line}: {source}")]
    Parse {
        line:   usize,
        source: DpError,
    },
}

/// Alias for `Result<T, OutputError>`.
pub type OutputResult<T> = Result<T, OutputError>;
