//! Error types for the prodsim-rs library.
//!
//! This module provides structured error types for catalog loading, index
//! construction, and the serving layer, with context preserved for proper
//! error propagation.

use std::io;

use thiserror::Error;

/// Main result type for prodsim operations.
pub type Result<T> = std::result::Result<T, ProdsimError>;

/// Comprehensive error type for all prodsim operations.
#[derive(Error, Debug)]
pub enum ProdsimError {
    /// Configuration errors
    #[error("Configuration error: {message}")]
    Config {
        /// Error description
        message: String,
        /// Configuration field that caused the error
        field: Option<String>,
    },

    /// Validation errors for input data
    #[error("Validation error: {message}")]
    Validation {
        /// Error description
        message: String,
    },

    /// I/O related errors (catalog file operations)
    #[error("I/O error: {message}")]
    Io {
        /// Human-readable error message
        message: String,
        /// Underlying I/O error
        #[source]
        source: io::Error,
    },

    /// Catalog parse errors with line context
    #[error("Catalog parse error at line {line}: {message}")]
    CatalogParse {
        /// Line number in the catalog file (1-based)
        line: usize,
        /// Error description
        message: String,
        /// Underlying deserialization error
        #[source]
        source: serde_json::Error,
    },

    /// Template rendering errors in the serving layer
    #[error("Template error: {message}")]
    Template {
        /// Error description
        message: String,
        /// Underlying template engine error
        #[source]
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },
}

impl ProdsimError {
    /// Create a configuration error
    pub fn config(message: impl Into<String>) -> Self {
        Self::Config {
            message: message.into(),
            field: None,
        }
    }

    /// Create a configuration error tagged with the offending field
    pub fn config_field(message: impl Into<String>, field: impl Into<String>) -> Self {
        Self::Config {
            message: message.into(),
            field: Some(field.into()),
        }
    }

    /// Create a validation error
    pub fn validation(message: impl Into<String>) -> Self {
        Self::Validation {
            message: message.into(),
        }
    }

    /// Create an I/O error with context
    pub fn io(message: impl Into<String>, source: io::Error) -> Self {
        Self::Io {
            message: message.into(),
            source,
        }
    }

    /// Create a template error with context
    pub fn template(
        message: impl Into<String>,
        source: impl std::error::Error + Send + Sync + 'static,
    ) -> Self {
        Self::Template {
            message: message.into(),
            source: Some(Box::new(source)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = ProdsimError::config_field("num_hashes must be positive", "num_hashes");
        assert_eq!(
            err.to_string(),
            "Configuration error: num_hashes must be positive"
        );

        let err = ProdsimError::validation("bad input");
        assert_eq!(err.to_string(), "Validation error: bad input");
    }

    #[test]
    fn test_io_error_preserves_source() {
        let inner = io::Error::new(io::ErrorKind::NotFound, "missing");
        let err = ProdsimError::io("cannot open catalog", inner);
        assert!(std::error::Error::source(&err).is_some());
    }
}
