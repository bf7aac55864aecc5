//! Unified error types for the envquack workspace.
//!
//! Parsers surface failures through [`EnvQuackError`]; the reconciliation
//! layer never fails and therefore never constructs one.

use std::path::PathBuf;

use thiserror::Error;

/// Top-level error type shared across the workspace.
#[derive(Debug, Error)]
pub enum EnvQuackError {
    /// An I/O operation failed.
    #[error("I/O error at {path}: {source}")]
    Io {
        /// Path where the I/O error occurred.
        path: PathBuf,
        /// Underlying I/O error.
        source: std::io::Error,
    },

    /// A required input file does not exist.
    #[error("{kind} file {} does not exist", path.display())]
    NotFound {
        /// Role of the missing file (e.g. "env", "example").
        kind: &'static str,
        /// Path that was looked up.
        path: PathBuf,
    },

    /// A structured document could not be decoded.
    #[error("failed to parse YAML in {origin}: {source}")]
    Format {
        /// Path or label of the document being decoded.
        origin: String,
        /// Underlying decoder error.
        source: serde_yaml::Error,
    },

    /// Serialization of a report failed.
    #[error("serialization error: {source}")]
    Serialization {
        /// Underlying serialization error.
        #[from]
        source: serde_json::Error,
    },
}

impl EnvQuackError {
    /// Wraps an I/O error with the path that caused it.
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }

    /// Returns `true` if the error means the file simply is not there.
    #[must_use]
    pub fn is_not_found(&self) -> bool {
        match self {
            Self::NotFound { .. } => true,
            Self::Io { source, .. } => source.kind() == std::io::ErrorKind::NotFound,
            Self::Format { .. } | Self::Serialization { .. } => false,
        }
    }
}

/// Convenience alias used throughout the workspace.
pub type Result<T> = std::result::Result<T, EnvQuackError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn io_error_message_includes_path() {
        let err = EnvQuackError::io(
            ".env",
            std::io::Error::new(std::io::ErrorKind::PermissionDenied, "denied"),
        );
        let msg = err.to_string();
        assert!(msg.contains(".env"), "got: {msg}");
        assert!(!err.is_not_found());
    }

    #[test]
    fn not_found_message_names_role_and_path() {
        let err = EnvQuackError::NotFound {
            kind: "example",
            path: PathBuf::from(".env.example"),
        };
        assert_eq!(err.to_string(), "example file .env.example does not exist");
        assert!(err.is_not_found());
    }

    #[test]
    fn io_not_found_kind_is_detected() {
        let err = EnvQuackError::io(
            "missing.env",
            std::io::Error::from(std::io::ErrorKind::NotFound),
        );
        assert!(err.is_not_found());
    }
}
