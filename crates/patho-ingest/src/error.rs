//! Error types for loading lab data and configuration.

use std::path::PathBuf;
use thiserror::Error;

/// Errors that can occur while reading or writing input files.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum IngestError {
    /// Failed to read or write a file.
    #[error("failed to access {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Malformed JSON, or JSON that does not match the expected shape.
    #[error("failed to parse JSON {path}: {source}")]
    Json {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    /// Failed to read or parse a CSV file.
    #[error("failed to read CSV {path}: {source}")]
    Csv {
        path: PathBuf,
        #[source]
        source: csv::Error,
    },

    /// Malformed TOML configuration.
    #[error("failed to parse config {path}: {source}")]
    Toml {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },

    /// File extension is not one this loader understands.
    #[error("unsupported file format for {path}: expected one of {expected}")]
    UnsupportedFormat {
        path: PathBuf,
        expected: &'static str,
    },

    /// Configuration parsed but holds values the classifier cannot use.
    #[error("invalid config {path}: {field} {reason}")]
    InvalidConfig {
        path: PathBuf,
        field: &'static str,
        reason: String,
    },
}

/// Result type for ingest operations.
pub type Result<T> = std::result::Result<T, IngestError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = IngestError::UnsupportedFormat {
            path: PathBuf::from("/data/results.xlsx"),
            expected: "csv, json",
        };
        assert_eq!(
            err.to_string(),
            "unsupported file format for /data/results.xlsx: expected one of csv, json"
        );
    }

    #[test]
    fn test_error_source_is_kept() {
        use std::error::Error as _;

        let err = IngestError::Io {
            path: PathBuf::from("missing.json"),
            source: std::io::Error::new(std::io::ErrorKind::NotFound, "gone"),
        };
        assert!(err.source().is_some());
    }
}
