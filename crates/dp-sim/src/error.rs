use dp_core::DpError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum SimError {
    #[error(transparent)]
    Config(#[from] DpError),

    #[error("failed to spawn thread `{thread}`: {source}")]
    Spawn {
        thread: String,
        source: std::io::Error,
    },

    #[error("thread `{thread}` panicked")]
    Panicked { thread: String },
}

pub type SimResult<T> = Result<T, SimError>;
