// Copyright (c) 2026 Bountyy Oy. All rights reserved.
// This software is proprietary and confidential.

//! HTTP request types and builder

use std::collections::HashMap;
use std::time::Duration;

use bytes::Bytes;
use reqwest::header::{HeaderMap, HeaderName, HeaderValue};
use reqwest::{Method, Version};
use serde::Serialize;
use url::Url;

use crate::error::Result;

/// HTTP request representation
#[derive(Debug, Clone)]
pub struct Request {
    /// Request method
    pub method: Method,
    /// Request URL
    pub url: Url,
    /// Request headers
    pub headers: HeaderMap,
    /// Request body
    pub body: Option<RequestBody>,
    /// Protocol already negotiated by the transport, when the connection
    /// is being reused. None until the transport knows.
    pub protocol: Option<Version>,
    /// Request timeout
    pub timeout: Option<Duration>,
}

/// Transmission semantics of a request body
///
/// The logging layer may only buffer `Full` bodies; the other two kinds
/// cannot be read ahead of transmission without corrupting the real send.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum BodyKind {
    /// Replayable in-memory payload
    #[default]
    Full,
    /// May be transmitted at most once
    OneShot,
    /// Written incrementally while the response streams back
    Duplex,
}

/// Request body: buffered bytes tagged with transmission semantics
#[derive(Debug, Clone)]
pub struct RequestBody {
    bytes: Bytes,
    kind: BodyKind,
}

impl RequestBody {
    /// Create a replayable body
    pub fn new(bytes: impl Into<Bytes>) -> Self {
        Self {
            bytes: bytes.into(),
            kind: BodyKind::Full,
        }
    }

    /// Create a one-shot body
    pub fn one_shot(bytes: impl Into<Bytes>) -> Self {
        Self {
            bytes: bytes.into(),
            kind: BodyKind::OneShot,
        }
    }

    /// Create a duplex body
    pub fn duplex(bytes: impl Into<Bytes>) -> Self {
        Self {
            bytes: bytes.into(),
            kind: BodyKind::Duplex,
        }
    }

    /// Transmission semantics of this body
    pub fn kind(&self) -> BodyKind {
        self.kind
    }

    pub fn is_one_shot(&self) -> bool {
        self.kind == BodyKind::OneShot
    }

    pub fn is_duplex(&self) -> bool {
        self.kind == BodyKind::Duplex
    }

    /// Raw payload bytes
    pub fn bytes(&self) -> &Bytes {
        &self.bytes
    }

    pub fn len(&self) -> usize {
        self.bytes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }
}

impl Request {
    /// Create a new GET request
    pub fn get(url: impl AsRef<str>) -> Result<Self> {
        Self::new(Method::GET, url)
    }

    /// Create a new POST request
    pub fn post(url: impl AsRef<str>) -> Result<Self> {
        Self::new(Method::POST, url)
    }

    /// Create a new HEAD request
    pub fn head(url: impl AsRef<str>) -> Result<Self> {
        Self::new(Method::HEAD, url)
    }

    /// Create a new request with arbitrary method
    pub fn new(method: Method, url: impl AsRef<str>) -> Result<Self> {
        Ok(Self {
            method,
            url: Url::parse(url.as_ref())?,
            headers: HeaderMap::new(),
            body: None,
            protocol: None,
            timeout: Some(Duration::from_secs(30)),
        })
    }

    /// Set a header
    pub fn header(mut self, name: impl AsRef<str>, value: impl AsRef<str>) -> Self {
        if let (Ok(name), Ok(value)) = (
            HeaderName::try_from(name.as_ref()),
            HeaderValue::try_from(value.as_ref()),
        ) {
            self.headers.insert(name, value);
        }
        self
    }

    /// Set multiple headers
    pub fn headers(mut self, headers: HashMap<String, String>) -> Self {
        for (name, value) in headers {
            if let (Ok(name), Ok(value)) = (
                HeaderName::try_from(name.as_str()),
                HeaderValue::try_from(value.as_str()),
            ) {
                self.headers.insert(name, value);
            }
        }
        self
    }

    /// Set a replayable request body
    pub fn body(mut self, body: impl Into<Bytes>) -> Self {
        self.body = Some(RequestBody::new(body));
        self
    }

    /// Set a body with explicit transmission semantics
    pub fn body_kind(mut self, body: RequestBody) -> Self {
        self.body = Some(body);
        self
    }

    /// Set JSON body
    pub fn json<T: Serialize>(mut self, data: &T) -> Result<Self> {
        let json = serde_json::to_vec(data)?;
        self.body = Some(RequestBody::new(json));
        self = self.header("content-type", "application/json");
        Ok(self)
    }

    /// Set timeout
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    /// Disable timeout
    pub fn no_timeout(mut self) -> Self {
        self.timeout = None;
        self
    }

    /// Mark the protocol negotiated by the transport
    pub fn protocol(mut self, version: Version) -> Self {
        self.protocol = Some(version);
        self
    }

    /// Get the URL as string
    pub fn url_str(&self) -> &str {
        self.url.as_str()
    }

    /// Get a header value, lossless only
    pub fn header_value(&self, name: &str) -> Option<&str> {
        self.headers.get(name).and_then(|v| v.to_str().ok())
    }
}
