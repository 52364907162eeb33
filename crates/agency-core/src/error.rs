//! Error types for data access, dataset loading and configuration
//!
//! [`AgencyError`] is the roll-up returned by the dashboard service; each
//! layer keeps its own enum and converts with `#[from]`.

use agency_model::ModelError;
use agency_view::FilterError;
use std::path::PathBuf;

/// Main error type
#[derive(Debug, thiserror::Error)]
pub enum AgencyError {
    /// Record failed ingestion checks
    #[error("validation failed: {0}")]
    Model(#[from] ModelError),

    /// Filter state could not be built
    #[error("filter error: {0}")]
    Filter(#[from] FilterError),

    /// Store operation failed
    #[error("store error: {0}")]
    Store(#[from] StoreError),

    /// Dataset could not be loaded
    #[error("dataset error: {0}")]
    Dataset(#[from] DatasetError),

    /// Configuration is unusable
    #[error("configuration error: {0}")]
    Config(#[from] ConfigError),
}

impl AgencyError {
    /// Check if a record lookup missed
    #[inline]
    #[must_use]
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::Store(StoreError::NotFound { .. }))
    }

    /// Check if the input was rejected
    #[inline]
    #[must_use]
    pub fn is_validation(&self) -> bool {
        matches!(
            self,
            Self::Model(_) | Self::Filter(_) | Self::Store(StoreError::Validation(_) | StoreError::Duplicate { .. })
        )
    }
}

/// Store errors
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum StoreError {
    /// No record with this id
    #[error("{kind} not found: {id}")]
    NotFound { kind: &'static str, id: String },

    /// A record with this id already exists
    #[error("{kind} already exists: {id}")]
    Duplicate { kind: &'static str, id: String },

    /// Input failed ingestion checks
    #[error("invalid input: {0}")]
    Validation(#[from] ModelError),
}

impl StoreError {
    /// Shorthand for a missing record
    #[inline]
    pub fn not_found(kind: &'static str, id: impl ToString) -> Self {
        Self::NotFound {
            kind,
            id: id.to_string(),
        }
    }

    /// Shorthand for a clashing id
    #[inline]
    pub fn duplicate(kind: &'static str, id: impl ToString) -> Self {
        Self::Duplicate {
            kind,
            id: id.to_string(),
        }
    }
}

/// Dataset loading errors
#[derive(Debug, thiserror::Error)]
pub enum DatasetError {
    /// File could not be read
    #[error("cannot read {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// JSON is malformed or a record failed enum/date parsing
    #[error("malformed dataset: {0}")]
    Parse(#[from] serde_json::Error),

    /// A record parsed but failed validation
    #[error("invalid {kind} {id}: {source}")]
    Invalid {
        kind: &'static str,
        id: String,
        #[source]
        source: ModelError,
    },

    /// Two records of one kind share an id
    #[error("duplicate {kind} id: {id}")]
    DuplicateId { kind: &'static str, id: String },

    /// Messages filed under a conversation that is not declared
    #[error("messages reference unknown conversation: {0}")]
    UnknownConversation(String),
}

/// Configuration errors
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// File exists but could not be read
    #[error("cannot read {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// TOML is malformed
    #[error("malformed config: {0}")]
    Parse(#[from] toml::de::Error),

    /// Offset outside ±24 hours
    #[error("utc offset {0} minutes is out of range")]
    InvalidOffset(i32),

    /// Environment override does not parse
    #[error("invalid value {value:?} for {var}")]
    InvalidEnv { var: &'static str, value: String },

    /// No dataset configured
    #[error("no dataset configured (set `dataset` or AGENCY_DATASET)")]
    MissingDataset,
}

/// Result alias for store operations
pub type StoreResult<T> = Result<T, StoreError>;

/// Result alias for service operations
pub type AgencyResult<T> = Result<T, AgencyError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn predicates() {
        let missing = AgencyError::from(StoreError::not_found("task", "t9"));
        assert!(missing.is_not_found());
        assert!(!missing.is_validation());

        let invalid = AgencyError::from(StoreError::Validation(ModelError::MissingField("task.title")));
        assert!(invalid.is_validation());

        let dup = AgencyError::from(StoreError::duplicate("task", "t1"));
        assert!(dup.is_validation());
    }

    #[test]
    fn display() {
        assert_eq!(StoreError::not_found("task", "t9").to_string(), "task not found: t9");
        assert_eq!(ConfigError::InvalidOffset(2000).to_string(), "utc offset 2000 minutes is out of range");
    }
}
