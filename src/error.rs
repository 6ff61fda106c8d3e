//! Error types for mysql-schema.

use thiserror::Error;

/// The main error type for schema operations.
#[derive(Debug, Error)]
pub enum SchemaError {
    /// The database rejected a statement.
    #[error("Database error in {operation}: {source} (statement: {statement})")]
    Database {
        operation: &'static str,
        statement: String,
        #[source]
        source: sqlx::Error,
    },

    /// Could not open a connection to the database.
    #[error("Connection error: {0}")]
    Connection(#[source] sqlx::Error),

    /// Configuration error.
    #[error("Configuration error: {0}")]
    Config(String),

    /// IO error.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl SchemaError {
    /// Wrap a driver error with the operation and statement that produced it.
    pub fn database(operation: &'static str, statement: impl Into<String>, source: sqlx::Error) -> Self {
        Self::Database {
            operation,
            statement: statement.into(),
            source,
        }
    }

    /// The statement that failed, if this error came from one.
    pub fn statement(&self) -> Option<&str> {
        match self {
            Self::Database { statement, .. } => Some(statement),
            _ => None,
        }
    }
}

/// Result type alias for schema operations.
pub type SchemaResult<T> = Result<T, SchemaError>;
