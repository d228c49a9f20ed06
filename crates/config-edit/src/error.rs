//! Error types for config-edit

/// Result type for config-edit operations
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur while addressing or editing a configuration
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("Malformed path '{path}': {reason}")]
    MalformedPath { path: String, reason: String },

    #[error("Property '{property}' does not exist")]
    MissingProperty { property: String },

    #[error("Property '{segment}' is not an array")]
    NotAnArray { segment: String },

    #[error("Array index {index} does not exist (length {len})")]
    IndexOutOfRange { index: usize, len: usize },

    #[error("Both a configuration and a value are required")]
    MissingValue,

    #[error("No configuration literal found: {reason}")]
    NoConfigLiteral { reason: String },

    #[error("Unbalanced configuration literal opened at byte {open}")]
    UnbalancedLiteral { open: usize },

    #[error("Path not found: {path}")]
    PathNotFound { path: String },

    #[error("Invalid option: {0}")]
    InvalidOption(String),

    #[error("Formatter failed: {0}")]
    Format(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl Error {
    pub fn malformed(path: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::MalformedPath {
            path: path.into(),
            reason: reason.into(),
        }
    }

    pub fn path_not_found(path: impl ToString) -> Self {
        Self::PathNotFound {
            path: path.to_string(),
        }
    }

    pub fn no_literal(reason: impl Into<String>) -> Self {
        Self::NoConfigLiteral {
            reason: reason.into(),
        }
    }
}
