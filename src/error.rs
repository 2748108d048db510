// Copyright (c) 2026 Bountyy Oy. All rights reserved.
// This software is proprietary and confidential.

//! Error types for wirelog
//!
//! Transport failures keep their original cause so callers can react to
//! them exactly as they would without the logging layer in between.

use thiserror::Error;

/// Result type alias for wirelog operations
pub type Result<T> = std::result::Result<T, Error>;

/// Main error type for wirelog
#[derive(Error, Debug)]
pub enum Error {
    /// HTTP transport failed
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// URL parsing failed
    #[error("Invalid URL: {0}")]
    Url(#[from] url::ParseError),

    /// I/O error
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Timeout error
    #[error("Operation timed out after {duration_ms}ms: {operation}")]
    Timeout {
        operation: String,
        duration_ms: u64,
        url: Option<String>,
    },

    /// Body already consumed and not replayable
    #[error("Body consumed: {0}")]
    BodyConsumed(String),

    /// Serialization error
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),

    /// Generic error
    #[error("{0}")]
    Other(String),
}

impl Error {
    /// Create a timeout error
    pub fn timeout(operation: impl Into<String>, duration_ms: u64) -> Self {
        Error::Timeout {
            operation: operation.into(),
            duration_ms,
            url: None,
        }
    }

    /// Create a timeout error with URL
    pub fn timeout_with_url(
        operation: impl Into<String>,
        duration_ms: u64,
        url: impl Into<String>,
    ) -> Self {
        Error::Timeout {
            operation: operation.into(),
            duration_ms,
            url: Some(url.into()),
        }
    }

    /// Create a generic error
    pub fn other<S: Into<String>>(msg: S) -> Self {
        Error::Other(msg.into())
    }

    /// Short classifier token used in synthesized error log lines
    ///
    /// Plays the role an exception class name plays in stack-based loggers:
    /// `"HTTP RESP: GET https://x -> ERROR Timeout deadline elapsed (3 ms)"`.
    pub fn kind(&self) -> &'static str {
        match self {
            Error::Http(e) if e.is_timeout() => "Timeout",
            Error::Http(e) if e.is_connect() => "Connect",
            Error::Http(_) => "Http",
            Error::Url(_) => "Url",
            Error::Io(_) => "Io",
            Error::Timeout { .. } => "Timeout",
            Error::BodyConsumed(_) => "BodyConsumed",
            Error::Serialization(_) => "Serialization",
            Error::Config(_) => "Config",
            Error::Other(_) => "Other",
        }
    }

    /// Check if this is a timeout error
    pub fn is_timeout(&self) -> bool {
        matches!(self, Error::Timeout { .. })
            || matches!(self, Error::Http(e) if e.is_timeout())
    }
}

impl From<String> for Error {
    fn from(s: String) -> Self {
        Error::Other(s)
    }
}

impl From<&str> for Error {
    fn from(s: &str) -> Self {
        Error::Other(s.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_timeout_error() {
        let err = Error::timeout_with_url("proceed", 5000, "https://example.com");
        assert!(err.is_timeout());
        assert_eq!(err.kind(), "Timeout");
    }

    #[test]
    fn test_kind_tokens() {
        assert_eq!(Error::Config("no proxy".into()).kind(), "Config");
        assert_eq!(Error::other("boom").kind(), "Other");
        assert_eq!(
            Error::Io(std::io::Error::new(std::io::ErrorKind::BrokenPipe, "pipe")).kind(),
            "Io"
        );
    }
}
