//! Error types for the scoring engine.
//!
//! Only input-shape problems and invalid configuration surface as errors.
//! Per-field anomalies (bad dates, unknown or cyclic dependencies) are
//! absorbed into the scored output instead.

use thiserror::Error;

/// Errors raised by the scoring engine.
#[derive(Error, Debug)]
pub enum ScoringError {
    /// The top-level input was not a sequence of task records.
    #[error("tasks must be a list, got {found}")]
    NotASequence {
        /// JSON type name of the value that was supplied instead.
        found: &'static str,
    },

    /// An element of the input sequence could not be read as a task record.
    #[error("task at index {index} is malformed: {source}")]
    InvalidTask {
        index: usize,
        #[source]
        source: serde_json::Error,
    },

    /// Engine configuration is inconsistent.
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),

    /// A task record failed field-level validation.
    #[error("task {id}: {message}")]
    Validation { id: String, message: String },
}

/// Result type alias for scoring errors.
pub type ScoringResult<T> = Result<T, ScoringError>;

impl ScoringError {
    /// Create a configuration error.
    pub fn config(msg: impl Into<String>) -> Self {
        Self::InvalidConfig(msg.into())
    }

    /// Create a validation error for the task identified by `id`.
    pub fn validation(id: impl Into<String>, msg: impl Into<String>) -> Self {
        Self::Validation {
            id: id.into(),
            message: msg.into(),
        }
    }
}
