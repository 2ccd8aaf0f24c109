//! Error types for the timer engine and its host

use thiserror::Error;

/// Errors raised by [`TimerEngine`](crate::state::TimerEngine) operations.
///
/// A failed operation never mutates engine state.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum EngineError {
    /// Duration input was non-positive, out of range or not an integer
    #[error("invalid argument: {0}")]
    InvalidArgument(String),

    /// The engine needs at least one topic to rotate through
    #[error("topic list must not be empty")]
    EmptyTopics,
}

/// Errors surfaced by [`AppState`](crate::state::AppState).
#[derive(Error, Debug)]
pub enum AppError {
    #[error(transparent)]
    Engine(#[from] EngineError),

    /// The engine mutex was poisoned by a panicking holder
    #[error("failed to lock timer engine: {0}")]
    StateLock(String),
}

impl AppError {
    /// True when the caller supplied bad input and may retry with a correction.
    pub fn is_invalid_argument(&self) -> bool {
        matches!(self, AppError::Engine(EngineError::InvalidArgument(_)))
    }
}
