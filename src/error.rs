//! Error types for the h2h library
//!
//! Errors fall in two groups. Run-fatal errors (bad configuration, an
//! unreadable source tree, an uncreatable destination root) abort a tree
//! conversion before any file is touched. Everything else is recorded per
//! file and aggregated into [`H2hError::Conversion`].

use crate::core::Format;
use crate::ops::ConversionSummary;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// The main error type for all library operations
#[derive(Error, Debug)]
pub enum H2hError {
    /// Unsupported format, direction, or out-of-range setting
    #[error("Invalid configuration: {message}")]
    Configuration { message: String },

    /// Missing or incomplete front matter delimiters, or an empty file
    #[error("invalid markdown: {reason}")]
    InvalidDocument { reason: String },

    /// The front matter block could not be parsed
    #[error("unmarshaling {format} front matter: {message}")]
    Decode { format: Format, message: String },

    /// The converted front matter could not be serialized
    #[error("marshaling {format} front matter: {message}")]
    Encode { format: Format, message: String },

    /// Open, create, read, write, or mkdir failure
    #[error("{action} {path}: {source}")]
    Io {
        action: &'static str,
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The source tree could not be enumerated
    #[error("walking source directory {path}: {source}")]
    Walk {
        path: PathBuf,
        #[source]
        source: walkdir::Error,
    },

    /// One or more files failed; the summary carries every failure
    #[error("encountered {} errors during conversion", .summary.failures.len())]
    Conversion { summary: ConversionSummary },
}

/// Result type alias for convenience
pub type Result<T> = std::result::Result<T, H2hError>;

impl H2hError {
    /// Create a new configuration error
    pub fn configuration(message: impl Into<String>) -> Self {
        Self::Configuration {
            message: message.into(),
        }
    }

    /// Create a new invalid document error
    pub fn invalid_document(reason: impl Into<String>) -> Self {
        Self::InvalidDocument {
            reason: reason.into(),
        }
    }

    pub fn decode(format: Format, message: impl ToString) -> Self {
        Self::Decode {
            format,
            message: message.to_string(),
        }
    }

    pub fn encode(format: Format, message: impl ToString) -> Self {
        Self::Encode {
            format,
            message: message.to_string(),
        }
    }

    /// Wrap an I/O error with the action that failed and the path involved
    pub fn io(action: &'static str, path: impl AsRef<Path>, source: std::io::Error) -> Self {
        Self::Io {
            action,
            path: path.as_ref().to_path_buf(),
            source,
        }
    }

    pub fn walk(path: impl AsRef<Path>, source: walkdir::Error) -> Self {
        Self::Walk {
            path: path.as_ref().to_path_buf(),
            source,
        }
    }

    /// The per-file summary attached to an aggregate failure
    pub fn summary(&self) -> Option<&ConversionSummary> {
        match self {
            Self::Conversion { summary } => Some(summary),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ops::FileFailure;

    #[test]
    fn test_error_creation() {
        let err = H2hError::invalid_document("missing front matter delimiters");
        assert!(matches!(err, H2hError::InvalidDocument { .. }));
        assert_eq!(
            err.to_string(),
            "invalid markdown: missing front matter delimiters"
        );
    }

    #[test]
    fn test_codec_errors_name_format() {
        let err = H2hError::decode(Format::Toml, "expected `=`");
        assert_eq!(
            err.to_string(),
            "unmarshaling toml front matter: expected `=`"
        );

        let err = H2hError::encode(Format::Yaml, "boom");
        assert!(err.to_string().starts_with("marshaling yaml"));
    }

    #[test]
    fn test_io_error_display() {
        let source = std::io::Error::new(std::io::ErrorKind::NotFound, "no such file");
        let err = H2hError::io("opening source file", "posts/a.md", source);
        assert_eq!(
            err.to_string(),
            "opening source file posts/a.md: no such file"
        );
    }

    #[test]
    fn test_conversion_error_counts_failures() {
        let summary = ConversionSummary {
            converted: 3,
            failures: vec![
                FileFailure::new("a.md", H2hError::invalid_document("x")),
                FileFailure::new("b.md", H2hError::invalid_document("y")),
            ],
        };
        let err = H2hError::Conversion { summary };
        assert_eq!(err.to_string(), "encountered 2 errors during conversion");
        assert_eq!(err.summary().map(|s| s.converted), Some(3));
    }
}
