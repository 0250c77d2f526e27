//! Error types for the pomoclock scheduler.
//!
//! Every error is a local precondition violation reported synchronously to
//! the caller. Checks happen before any side effect, so a failed call leaves
//! the session untouched.

use thiserror::Error;

/// Core error type for pomoclock.
#[derive(Error, Debug)]
pub enum SchedulerError {
    /// The operation is not allowed in the session's current state.
    #[error("Invalid state: {0}")]
    InvalidState(String),

    /// `finish_task` was called with no tasks queued.
    #[error("No more tasks left")]
    EmptyQueue,

    /// A configuration value is out of range.
    #[error("Invalid configuration value for '{key}': {message}")]
    InvalidConfig { key: &'static str, message: String },

    /// Configuration sources could not be read or deserialized.
    #[error("Failed to load configuration: {0}")]
    Config(#[from] config::ConfigError),
}

/// Result type alias for SchedulerError
pub type Result<T, E = SchedulerError> = std::result::Result<T, E>;
