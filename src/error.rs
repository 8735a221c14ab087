// Copyright (c) 2026 Bountyy Oy. All rights reserved.
// This software is proprietary and confidential.

//! Error types for the dataset builder
//!
//! Fetch errors carry the URL they happened on so the sampler can log them
//! before jumping. Schema errors carry the row and both key sets so a broken
//! dataset can be traced back to the fragment that drifted.

use thiserror::Error;

/// Result type alias for xssdata operations
pub type Result<T> = std::result::Result<T, Error>;

/// Main error type
#[derive(Error, Debug)]
pub enum Error {
    /// HTTP request failed (connection, DNS, TLS, body read)
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// URL parsing failed
    #[error("Invalid URL: {0}")]
    Url(#[from] url::ParseError),

    /// Non-success HTTP status
    #[error("HTTP status {status} for {url}")]
    HttpStatus { url: String, status: u16 },

    /// Request exceeded the per-request timeout
    #[error("Request timed out after {duration_ms}ms: {url}")]
    Timeout { url: String, duration_ms: u64 },

    /// Response body exceeded the configured maximum size
    #[error("Response from {url} exceeds {limit} bytes")]
    ResponseTooLarge { url: String, limit: usize },

    /// HTML parsing failed
    #[error("HTML parsing error: {0}")]
    HtmlParse(String),

    /// A record's key set differs from the dataset header
    #[error("Schema mismatch at row {row}: expected {expected:?}, found {found:?}")]
    SchemaMismatch {
        row: usize,
        expected: Vec<String>,
        found: Vec<String>,
    },

    /// Nothing to write
    #[error("Dataset is empty")]
    EmptyDataset,

    /// I/O error
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON serialization error
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// CSV error
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),

    /// Background task failed
    #[error("Task failed: {0}")]
    Join(#[from] tokio::task::JoinError),
}

impl Error {
    /// Create a configuration error
    pub fn config<S: Into<String>>(msg: S) -> Self {
        Error::Config(msg.into())
    }

    /// Create a timeout error
    pub fn timeout(url: impl Into<String>, duration_ms: u64) -> Self {
        Error::Timeout {
            url: url.into(),
            duration_ms,
        }
    }

    /// Errors the sampler recovers from with a random jump
    pub fn is_fetch_error(&self) -> bool {
        matches!(
            self,
            Error::Http(_)
                | Error::Url(_)
                | Error::HttpStatus { .. }
                | Error::Timeout { .. }
                | Error::ResponseTooLarge { .. }
        )
    }

    /// Check if this is a schema drift error
    pub fn is_schema_error(&self) -> bool {
        matches!(self, Error::SchemaMismatch { .. })
    }

    /// URL associated with this error, if any
    pub fn url(&self) -> Option<&str> {
        match self {
            Error::HttpStatus { url, .. }
            | Error::Timeout { url, .. }
            | Error::ResponseTooLarge { url, .. } => Some(url),
            Error::Http(e) => e.url().map(|u| u.as_str()),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fetch_error_classification() {
        assert!(Error::timeout("https://example.com", 100).is_fetch_error());
        assert!(Error::HttpStatus {
            url: "https://example.com".into(),
            status: 404
        }
        .is_fetch_error());
        assert!(!Error::config("bad").is_fetch_error());
        assert!(!Error::EmptyDataset.is_fetch_error());
    }

    #[test]
    fn test_schema_error() {
        let err = Error::SchemaMismatch {
            row: 2,
            expected: vec!["class".into()],
            found: vec!["label".into()],
        };
        assert!(err.is_schema_error());
        assert!(err.to_string().contains("row 2"));
    }

    #[test]
    fn test_error_url() {
        let err = Error::ResponseTooLarge {
            url: "https://example.com/big".into(),
            limit: 10,
        };
        assert_eq!(err.url(), Some("https://example.com/big"));
        assert_eq!(Error::EmptyDataset.url(), None);
    }
}
