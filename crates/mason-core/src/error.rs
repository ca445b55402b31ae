//! Error types for the scheduler library.

use std::path::PathBuf;

use thiserror::Error;

/// Comprehensive error type for all scheduler operations.
///
/// None of these are fatal to a running driver: the scheduler degrades
/// sensor and actuator failures to "absent" and only logs persistence
/// failures. They surface as hard errors only through the configuration
/// surface and at startup.
#[derive(Error, Debug)]
pub enum MasonError {
    /// Database connection or query errors
    #[error("Database error: {message}")]
    Database {
        message: String,
        #[source]
        source: rusqlite::Error,
    },
    /// No goal at the given 1-based position of the build sequence
    #[error("No goal at position {position}")]
    GoalNotFound { position: usize },
    /// File system operation errors
    #[error("File system error at path '{path}': {source}")]
    FileSystem {
        path: PathBuf,
        source: std::io::Error,
    },
    /// XDG directory specification errors
    #[error("XDG directory error: {0}")]
    XdgDirectory(String),
    /// Invalid input validation errors
    #[error("Invalid input for field '{field}': {reason}")]
    InvalidInput { field: String, reason: String },
    /// Serialization/deserialization errors
    #[error("Serialization error: {source}")]
    Serialization {
        #[from]
        source: serde_json::Error,
    },
    /// Configuration errors
    #[error("Configuration error: {message}")]
    Configuration { message: String },
    /// The world could not be read for an entity or control
    #[error("Observation gap for '{entity}': {detail}")]
    ObservationGap { entity: String, detail: String },
    /// The world refused an action outright
    #[error("Action rejected for '{entity}': {reason}")]
    ActionRejected { entity: String, reason: String },
}

/// Builder for creating database errors with optional context.
pub struct DatabaseErrorBuilder {
    message: String,
}

impl DatabaseErrorBuilder {
    /// Create a new database error builder with a message.
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }

    /// Build the error with the given source.
    pub fn with_source(self, source: rusqlite::Error) -> MasonError {
        MasonError::Database {
            message: self.message,
            source,
        }
    }
}

/// Builder for creating input validation errors.
pub struct InvalidInputBuilder {
    field: String,
}

impl InvalidInputBuilder {
    /// Create a new invalid input error builder for a field.
    pub fn new(field: impl Into<String>) -> Self {
        Self {
            field: field.into(),
        }
    }

    /// Build the error with the given reason.
    pub fn with_reason(self, reason: impl Into<String>) -> MasonError {
        MasonError::InvalidInput {
            field: self.field,
            reason: reason.into(),
        }
    }
}

impl MasonError {
    /// Creates a builder for database errors.
    pub fn database(message: impl Into<String>) -> DatabaseErrorBuilder {
        DatabaseErrorBuilder::new(message)
    }

    /// Creates a builder for input validation errors.
    pub fn invalid_input(field: impl Into<String>) -> InvalidInputBuilder {
        InvalidInputBuilder::new(field)
    }

    /// Creates an observation gap for an entity.
    pub fn observation_gap(entity: impl Into<String>, detail: impl Into<String>) -> Self {
        Self::ObservationGap {
            entity: entity.into(),
            detail: detail.into(),
        }
    }

    /// Creates a file system error for a path.
    pub fn file_system(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::FileSystem {
            path: path.into(),
            source,
        }
    }

    /// Wraps a blocking task join failure.
    pub fn join(source: tokio::task::JoinError) -> Self {
        Self::Configuration {
            message: format!("Task join error: {source}"),
        }
    }
}

/// Specialized extension trait for database-related Results.
pub trait DatabaseResultExt<T> {
    /// Map database errors with a message.
    fn db_context(self, message: &str) -> Result<T>;
}

impl<T> DatabaseResultExt<T> for std::result::Result<T, rusqlite::Error> {
    fn db_context(self, message: &str) -> Result<T> {
        self.map_err(|e| MasonError::database(message).with_source(e))
    }
}

/// Result type alias for scheduler operations
pub type Result<T> = std::result::Result<T, MasonError>;
