//! Error types for schema loading.

use super::location::SourceLocation;

/// Errors that can occur when loading a schema document.
#[derive(Debug, thiserror::Error)]
pub enum SchemaError {
    /// YAML/JSON deserialization failed (malformed text or schema mismatch).
    #[error("schema deserialization failed: {message}")]
    Deserialize {
        /// The parser's error message.
        message: String,
        /// Where the parser stopped, when it reports a position.
        location: Option<SourceLocation>,
    },

    /// The schema parsed but breaks a well-formedness rule.
    #[error("malformed schema at '{path}': {reason}")]
    Malformed {
        /// Dotted path of the offending key declaration.
        path: String,
        /// A human-readable explanation of the violation.
        reason: String,
    },

    /// The schema file could not be read.
    #[error("failed to read schema '{path}': {source}")]
    Read {
        /// The path that was being read.
        path: String,
        /// The underlying I/O error.
        source: std::io::Error,
    },
}

impl SchemaError {
    /// Returns the parser location attached to a deserialization failure.
    #[must_use]
    pub const fn location(&self) -> Option<&SourceLocation> {
        match self {
            Self::Deserialize { location, .. } => location.as_ref(),
            Self::Malformed { .. } | Self::Read { .. } => None,
        }
    }
}
