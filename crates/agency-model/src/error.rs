//! Error types for record ingestion
//!
//! Records are validated when they enter the system (dataset load or
//! creation through a store). Anything that makes it past ingestion is
//! guaranteed to carry a closed enum value and well-formed dates.

/// Record validation error
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ModelError {
    /// Status label outside the closed set for the record kind
    #[error("unknown {kind} status: {label:?}")]
    UnknownStatus {
        /// Record kind ("task", "project", ...)
        kind: &'static str,
        /// Offending label
        label: String,
    },

    /// Priority label outside Low/Medium/High/Critical
    #[error("unknown priority: {0:?}")]
    UnknownPriority(String),

    /// Unrecognized enumerated value that is neither status nor priority
    #[error("unknown {kind}: {label:?}")]
    UnknownValue {
        /// Value kind ("message type", "event type", ...)
        kind: &'static str,
        /// Offending label
        label: String,
    },

    /// Strict date parsing failed
    #[error("invalid date {input:?}: expected {expected}")]
    InvalidDate {
        /// Raw input
        input: String,
        /// Accepted format description
        expected: &'static str,
    },

    /// Required field is empty
    #[error("missing required field: {0}")]
    MissingField(&'static str),

    /// Progress outside 0..=100
    #[error("progress {0} is out of range (0-100)")]
    ProgressOutOfRange(u16),
}

impl ModelError {
    /// Shorthand for an unknown status label
    #[inline]
    pub fn unknown_status(kind: &'static str, label: impl Into<String>) -> Self {
        Self::UnknownStatus {
            kind,
            label: label.into(),
        }
    }

    /// Shorthand for an unknown enumerated value
    #[inline]
    pub fn unknown_value(kind: &'static str, label: impl Into<String>) -> Self {
        Self::UnknownValue {
            kind,
            label: label.into(),
        }
    }
}

/// Result alias for model operations
pub type ModelResult<T> = Result<T, ModelError>;
