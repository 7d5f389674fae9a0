//! Shared error types for the services crate.

use thiserror::Error;

use drill_core::model::{ConfigError, ProblemError, SessionSummaryError};

/// Errors emitted by the random helpers and `ProblemGenerator`.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum GeneratorError {
    #[error("no operation is enabled")]
    NoOperationEnabled,
    #[error("invalid range: min {min} is greater than max {max}")]
    InvalidRange { min: u32, max: u32 },
    #[error("no candidates left in range [{min}, {max}]")]
    RangeExhausted { min: u32, max: u32 },
    #[error(transparent)]
    Problem(#[from] ProblemError),
}

/// Errors emitted by practice sessions.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum SessionError {
    #[error("session already completed")]
    Completed,
    #[error("session is still in progress")]
    InProgress,
    #[error("no option at position {0}")]
    InvalidChoice(usize),
    #[error(transparent)]
    Config(#[from] ConfigError),
    #[error(transparent)]
    Generator(#[from] GeneratorError),
    #[error(transparent)]
    Summary(#[from] SessionSummaryError),
}
