//! Error types for the companion workspace

use thiserror::Error;

/// Main error type for companion operations
#[derive(Debug, Error)]
pub enum CompanionError {
    /// Configuration error (incomplete tables, bad tunables, unreadable .env)
    #[error("Configuration error: {0}")]
    Config(String),

    /// Validation error
    #[error("Validation error: {0}")]
    Validation(String),

    /// Serialization/deserialization error
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// A lookup table is missing an entry it must contain
    #[error("Incomplete table '{table}': missing entry {entry}")]
    IncompleteTable {
        /// Table name
        table: String,
        /// Human readable key of the missing entry
        entry: String,
    },
}

/// Convenient Result type using CompanionError
pub type Result<T> = std::result::Result<T, CompanionError>;

impl CompanionError {
    /// Create a config error
    pub fn config(msg: impl Into<String>) -> Self {
        CompanionError::Config(msg.into())
    }

    /// Create a validation error
    pub fn validation(msg: impl Into<String>) -> Self {
        CompanionError::Validation(msg.into())
    }

    /// Create an incomplete table error
    pub fn incomplete_table(table: impl Into<String>, entry: impl Into<String>) -> Self {
        CompanionError::IncompleteTable {
            table: table.into(),
            entry: entry.into(),
        }
    }

    /// Whether this error means the process was misconfigured and must not serve
    pub fn is_fatal(&self) -> bool {
        matches!(
            self,
            CompanionError::Config(_) | CompanionError::IncompleteTable { .. }
        )
    }
}
