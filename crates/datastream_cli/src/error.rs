//! Custom error types for the command-line tool.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum CliError {
    #[error("Workout error: {0}")]
    Workout(#[from] datastream_workouts::WorkoutError),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Usage: {0}")]
    Usage(String),
}

/// Result type alias for CLI operations.
pub type CliResult<T> = Result<T, CliError>;
