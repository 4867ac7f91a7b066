//! Error types for rowsetlib

use thiserror::Error;

/// Boxed error produced by a row source implementation.
pub type SourceError = Box<dyn std::error::Error + Send + Sync + 'static>;

/// Errors that can occur while binding patterns or printing result sets
#[derive(Error, Debug)]
pub enum RowsetError {
    /// A result column has no counterpart in the table's column list
    #[error("column not found: '{column}'")]
    SchemaMismatch { column: String },

    /// The row source failed while fetching metadata or advancing
    #[error("row source failed: {0}")]
    Source(#[source] SourceError),

    /// A pattern string contained no specifiers
    #[error("pattern contains no format specifiers")]
    EmptyPattern,

    /// A pattern string had text before its first `%`
    #[error("pattern '{pattern}' has text before its first specifier")]
    LeadingText { pattern: String },

    /// A specifier could not be parsed when applied
    #[error("invalid format specifier '{specifier}': {message}")]
    InvalidSpecifier { specifier: String, message: String },

    /// A specifier had no value to consume
    #[error("specifier {position} ('{specifier}') has no value to format")]
    MissingValue { position: usize, specifier: String },

    /// The pattern does not reach the rightmost selected column
    #[error("pattern has {available} specifiers but column '{column}' sits at position {required}")]
    PatternTooShort {
        column: String,
        required: usize,
        available: usize,
    },

    /// A table document could not be loaded
    #[error("invalid table: {0}")]
    InvalidTable(String),

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl RowsetError {
    /// Wrap any row source failure.
    pub fn from_source(err: impl Into<SourceError>) -> Self {
        RowsetError::Source(err.into())
    }

    /// Build an `InvalidSpecifier` error.
    pub(crate) fn invalid_specifier(specifier: &str, message: impl Into<String>) -> Self {
        RowsetError::InvalidSpecifier {
            specifier: specifier.to_string(),
            message: message.into(),
        }
    }

    /// True for errors caused by a malformed or misapplied pattern.
    pub fn is_configuration(&self) -> bool {
        matches!(
            self,
            RowsetError::EmptyPattern
                | RowsetError::LeadingText { .. }
                | RowsetError::InvalidSpecifier { .. }
                | RowsetError::MissingValue { .. }
                | RowsetError::PatternTooShort { .. }
        )
    }
}
