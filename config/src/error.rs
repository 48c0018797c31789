//! Error type for reading, decoding, and validating run configurations.

use std::path::PathBuf;

use thiserror::Error;

/// Result alias used throughout `marley-config`.
pub type Result<T> = std::result::Result<T, ConfigError>;

/// Everything that can go wrong between a file on disk and a validated
/// [`RunConfig`](crate::RunConfig).
#[derive(Debug, Error)]
pub enum ConfigError {
    /// The configuration file could not be read.
    #[error("failed to read {}: {source}", .path.display())]
    Io {
        /// Path that was being read.
        path: PathBuf,
        /// Underlying I/O error.
        #[source]
        source: std::io::Error,
    },

    /// The document is not well-formed in the relaxed JSON dialect.
    #[error("syntax error at line {line}, column {column}: {message}")]
    Syntax {
        /// 1-based line of the offending token.
        line: usize,
        /// 1-based column of the offending token.
        column: usize,
        /// What the parser expected or found.
        message: String,
    },

    /// A required key is absent.
    #[error("missing required field `{0}`")]
    MissingField(String),

    /// A key is present that the schema does not know.
    #[error("unknown field `{0}`")]
    UnknownField(String),

    /// A section has the wrong shape or value types.
    #[error("{field}: {message}")]
    Decode {
        /// Dotted path of the section that failed to decode.
        field: String,
        /// Decoder message.
        message: String,
    },

    /// The document is well-typed but violates a physical or structural invariant.
    #[error("invalid `{field}`: {message}")]
    Invalid {
        /// Dotted path of the offending field.
        field: String,
        /// Description of the violated constraint.
        message: String,
    },
}

impl ConfigError {
    /// Returns the dotted field path this error refers to, if any.
    #[must_use]
    pub fn field(&self) -> Option<&str> {
        match self {
            ConfigError::MissingField(f) | ConfigError::UnknownField(f) => Some(f),
            ConfigError::Decode { field, .. } | ConfigError::Invalid { field, .. } => Some(field),
            ConfigError::Io { .. } | ConfigError::Syntax { .. } => None,
        }
    }
}
