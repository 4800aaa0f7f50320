//! Error types for workout construction and the catalog services.

use thiserror::Error;

/// Failures reported by a storage collaborator.
///
/// These are never produced by the builders; they travel unchanged through
/// the services inside [`WorkoutError::Storage`].
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum StoreError {
    #[error("unique constraint violated: {0}")]
    UniqueViolation(String),

    #[error("store unavailable: {0}")]
    Unavailable(String),
}

/// Workout construction errors.
#[derive(Debug, Error)]
pub enum WorkoutError {
    /// A required field was absent from an otherwise well-formed submission.
    #[error("Validation error: {0}")]
    Validation(String),

    /// A structurally valid submission broke a domain rule.
    #[error("Invariant violation: {0}")]
    InvariantViolation(String),

    /// A referenced exercise definition or workout type does not exist.
    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Storage error: {0}")]
    Storage(#[from] StoreError),

    #[error("Configuration error: {0}")]
    Config(String),
}

impl WorkoutError {
    pub fn missing(field: &str) -> Self {
        WorkoutError::Validation(format!("{field} must not be null"))
    }

    /// Whether the caller, not the system, is responsible for the failure.
    pub fn is_client_error(&self) -> bool {
        matches!(
            self,
            WorkoutError::Validation(_)
                | WorkoutError::InvariantViolation(_)
                | WorkoutError::NotFound(_)
        )
    }
}

/// Result type alias for workout operations.
pub type WorkoutResult<T> = Result<T, WorkoutError>;

/// Unwrap a nullable submission field or report it by name.
pub(crate) fn require<T>(value: Option<T>, field: &str) -> WorkoutResult<T> {
    value.ok_or_else(|| WorkoutError::missing(field))
}
