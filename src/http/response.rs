// Copyright (c) 2026 Bountyy Oy. All rights reserved.
// This software is proprietary and confidential.

//! HTTP response types
//!
//! The response body is a buffer-once source: the first full read pulls the
//! payload into memory and every later read sees the same bytes from the
//! start. This is what lets the logging layer read ahead without consuming
//! anything the caller still wants.

use std::fmt;

use async_trait::async_trait;
use bytes::Bytes;
use reqwest::header::HeaderMap;
use reqwest::StatusCode;
use serde::de::DeserializeOwned;
use url::Url;

use crate::error::{Error, Result};

/// Deferred body producer, typically wrapping a live transport stream
///
/// `read_all` is called at most once; afterwards the `BodySource` holds the
/// buffered bytes (or the failure) itself.
#[async_trait]
pub trait BodyReader: Send {
    /// Drain the remaining body into memory
    async fn read_all(&mut self) -> Result<Bytes>;
}

/// Replayable response body
pub struct BodySource {
    state: BodyState,
}

enum BodyState {
    /// Fully in memory; reads are cheap clones
    Buffered(Bytes),
    /// Not yet pulled from the transport
    Deferred(Box<dyn BodyReader>),
    /// A deferred read failed; the payload is gone
    Failed,
}

impl BodySource {
    /// Body already fully in memory
    pub fn buffered(bytes: impl Into<Bytes>) -> Self {
        Self {
            state: BodyState::Buffered(bytes.into()),
        }
    }

    /// Empty body
    pub fn empty() -> Self {
        Self::buffered(Bytes::new())
    }

    /// Body still held by the transport
    pub fn deferred(reader: Box<dyn BodyReader>) -> Self {
        Self {
            state: BodyState::Deferred(reader),
        }
    }

    /// Buffer the body if needed and return the full payload
    ///
    /// Leaves the source buffered, so repeated calls return identical bytes.
    pub async fn bytes(&mut self) -> Result<Bytes> {
        match &mut self.state {
            BodyState::Buffered(bytes) => Ok(bytes.clone()),
            BodyState::Deferred(reader) => match reader.read_all().await {
                Ok(bytes) => {
                    self.state = BodyState::Buffered(bytes.clone());
                    Ok(bytes)
                }
                Err(e) => {
                    self.state = BodyState::Failed;
                    Err(e)
                }
            },
            BodyState::Failed => Err(Error::BodyConsumed(
                "previous body read failed".to_string(),
            )),
        }
    }

    /// Whether the body is already buffered in memory
    pub fn is_buffered(&self) -> bool {
        matches!(self.state, BodyState::Buffered(_))
    }
}

impl fmt::Debug for BodySource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.state {
            BodyState::Buffered(b) => write!(f, "BodySource::Buffered({} bytes)", b.len()),
            BodyState::Deferred(_) => write!(f, "BodySource::Deferred"),
            BodyState::Failed => write!(f, "BodySource::Failed"),
        }
    }
}

impl From<Bytes> for BodySource {
    fn from(bytes: Bytes) -> Self {
        Self::buffered(bytes)
    }
}

impl From<&str> for BodySource {
    fn from(s: &str) -> Self {
        Self::buffered(Bytes::copy_from_slice(s.as_bytes()))
    }
}

/// HTTP response representation
#[derive(Debug)]
pub struct Response {
    /// Response status code
    pub status: StatusCode,
    /// Response headers
    pub headers: HeaderMap,
    /// Final URL
    pub url: Url,
    /// Response body
    pub body: BodySource,
}

impl Response {
    /// Create a new response
    pub fn new(status: StatusCode, headers: HeaderMap, url: Url, body: BodySource) -> Self {
        Self {
            status,
            headers,
            url,
            body,
        }
    }

    /// Check if status is success (2xx)
    pub fn is_success(&self) -> bool {
        self.status.is_success()
    }

    /// Get status code as u16
    pub fn status_code(&self) -> u16 {
        self.status.as_u16()
    }

    /// Get body bytes, buffering from the transport if necessary
    pub async fn bytes(&mut self) -> Result<Bytes> {
        self.body.bytes().await
    }

    /// Get body as text
    pub async fn text(&mut self) -> Result<String> {
        let bytes = self.bytes().await?;
        String::from_utf8(bytes.to_vec()).map_err(|e| Error::Other(e.to_string()))
    }

    /// Get body as text, lossy conversion
    pub async fn text_lossy(&mut self) -> Result<String> {
        let bytes = self.bytes().await?;
        Ok(String::from_utf8_lossy(&bytes).into_owned())
    }

    /// Parse body as JSON
    pub async fn json<T: DeserializeOwned>(&mut self) -> Result<T> {
        let bytes = self.bytes().await?;
        serde_json::from_slice(&bytes).map_err(Error::from)
    }

    /// Get a header value
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers.get(name).and_then(|v| v.to_str().ok())
    }

    /// Get content type
    pub fn content_type(&self) -> Option<&str> {
        self.header(super::headers::CONTENT_TYPE)
    }

    /// Get declared content length, if parseable
    pub fn content_length(&self) -> Option<i64> {
        self.header(super::headers::CONTENT_LENGTH)
            .and_then(|v| v.parse().ok())
    }

    /// Get the final URL as string
    pub fn url_str(&self) -> &str {
        self.url.as_str()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct FailingReader;

    #[async_trait]
    impl BodyReader for FailingReader {
        async fn read_all(&mut self) -> Result<Bytes> {
            Err(Error::Io(std::io::Error::new(
                std::io::ErrorKind::UnexpectedEof,
                "connection reset",
            )))
        }
    }

    struct CountingReader {
        reads: usize,
    }

    #[async_trait]
    impl BodyReader for CountingReader {
        async fn read_all(&mut self) -> Result<Bytes> {
            self.reads += 1;
            Ok(Bytes::from_static(b"payload"))
        }
    }

    fn response_with(body: BodySource) -> Response {
        Response::new(
            StatusCode::OK,
            HeaderMap::new(),
            Url::parse("https://example.com").unwrap(),
            body,
        )
    }

    #[tokio::test]
    async fn test_buffered_body_replayable() {
        let mut resp = response_with(BodySource::from("Hello, World!"));
        assert_eq!(resp.text().await.unwrap(), "Hello, World!");
        assert_eq!(resp.text().await.unwrap(), "Hello, World!");
    }

    #[tokio::test]
    async fn test_deferred_body_reads_once() {
        let reader = CountingReader { reads: 0 };
        let mut resp = response_with(BodySource::deferred(Box::new(reader)));
        assert!(!resp.body.is_buffered());
        assert_eq!(resp.bytes().await.unwrap().as_ref(), b"payload");
        assert!(resp.body.is_buffered());
        // Second read comes from the buffer, not the reader
        assert_eq!(resp.bytes().await.unwrap().as_ref(), b"payload");
    }

    #[tokio::test]
    async fn test_failed_read_stays_failed() {
        let mut resp = response_with(BodySource::deferred(Box::new(FailingReader)));
        assert!(resp.bytes().await.is_err());
        assert!(matches!(
            resp.bytes().await.unwrap_err(),
            Error::BodyConsumed(_)
        ));
    }

    #[tokio::test]
    async fn test_response_status() {
        let resp = response_with(BodySource::empty());
        assert!(resp.is_success());
        assert_eq!(resp.status_code(), 200);
    }
}
