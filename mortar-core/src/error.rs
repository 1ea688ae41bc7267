//! Error types for Mortar

use thiserror::Error;

/// The main error type for Mortar operations
#[derive(Error, Debug)]
pub enum Error {
    /// Database connection or execution error
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    /// A fluent call received an argument it cannot accept
    #[error("Invalid argument: {message}")]
    InvalidArgument { message: String },

    /// A grouped where entry does not have two or three elements
    #[error("Malformed where group: entry {index} has {arity} elements, expected 2 or 3")]
    MalformedGroup { index: usize, arity: usize },

    /// The query was compiled before `from` was called
    #[error("Query has no table; call from() before compiling")]
    MissingTable,

    /// Serialization error
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// Invalid connection configuration
    #[error("Configuration error: {message}")]
    Configuration { message: String },
}

/// Convenience Result type for Mortar operations
pub type Result<T> = std::result::Result<T, Error>;

impl Error {
    /// Create a new invalid argument error
    pub fn invalid_argument(message: impl Into<String>) -> Self {
        Self::InvalidArgument {
            message: message.into(),
        }
    }

    /// Create a new malformed group error
    pub fn malformed_group(index: usize, arity: usize) -> Self {
        Self::MalformedGroup { index, arity }
    }

    /// Create a new configuration error
    pub fn configuration(message: impl Into<String>) -> Self {
        Self::Configuration {
            message: message.into(),
        }
    }

    /// True for every error raised by argument validation, including
    /// malformed where groups
    pub fn is_invalid_argument(&self) -> bool {
        matches!(self, Self::InvalidArgument { .. } | Self::MalformedGroup { .. })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_invalid_argument_error() {
        let err = Error::invalid_argument("Illegal operator and value combination.");
        assert!(matches!(err, Error::InvalidArgument { .. }));
        assert_eq!(
            err.to_string(),
            "Invalid argument: Illegal operator and value combination."
        );
    }

    #[test]
    fn test_malformed_group_is_invalid_argument() {
        let err = Error::malformed_group(1, 4);
        assert!(err.is_invalid_argument());
        assert_eq!(
            err.to_string(),
            "Malformed where group: entry 1 has 4 elements, expected 2 or 3"
        );
    }

    #[test]
    fn test_missing_table_error() {
        let err = Error::MissingTable;
        assert!(!err.is_invalid_argument());
        assert_eq!(err.to_string(), "Query has no table; call from() before compiling");
    }

    #[test]
    fn test_configuration_error() {
        let err = Error::configuration("port must be non-zero");
        assert!(matches!(err, Error::Configuration { .. }));
        assert_eq!(err.to_string(), "Configuration error: port must be non-zero");
    }
}
