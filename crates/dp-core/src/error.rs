//! Core error type.
//!
//! Sub-crates define their own error enums and wrap `DpError` as one variant
//! via `#[from]`, so configuration failures keep their original message all
//! the way up to the binary.

use thiserror::Error;

/// The top-level error type for `dp-core` and a common base for sub-crates.
#[derive(Debug, Error)]
pub enum DpError {
    #[error("configuration error: {0}")]
    Config(String),

    #[error("invalid {what} `{value}`: {reason}")]
    Parse {
        what:   &'static str,
        value:  String,
        reason: &'static str,
    },
}

/// Shorthand result type for all `dp-*` crates.
pub type DpResult<T> = Result<T, DpError>;
