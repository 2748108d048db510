// Copyright (c) 2026 Bountyy Oy. All rights reserved.
// This software is proprietary and confidential.

//! Executor: the capability that performs the actual network call
//!
//! The logging layer receives an `Executor` and calls `proceed` exactly once
//! per exchange. `HttpExecutor` is the default reqwest-backed implementation;
//! tests substitute their own.

use async_trait::async_trait;
use bytes::Bytes;
use reqwest::header::{HeaderMap, HeaderValue};
use reqwest::redirect::Policy;
use reqwest::Client;

use super::request::Request;
use super::response::{BodyReader, BodySource, Response};
use super::DEFAULT_USER_AGENT;
use crate::error::{Error, Result};

/// Capability to perform the network call for one exchange
#[async_trait]
pub trait Executor: Send + Sync {
    /// Send the request and produce a response, or fail with the transport error
    async fn proceed(&self, request: Request) -> Result<Response>;
}

/// Executor configuration
#[derive(Debug, Clone)]
pub struct ExecutorConfig {
    /// User agent string
    pub user_agent: String,
    /// Default timeout
    pub timeout: std::time::Duration,
    /// Maximum redirects to follow
    pub max_redirects: usize,
    /// Accept invalid certificates (dangerous!)
    pub accept_invalid_certs: bool,
    /// Default headers
    pub default_headers: HeaderMap,
    /// Proxy URL
    pub proxy: Option<String>,
}

impl Default for ExecutorConfig {
    fn default() -> Self {
        let mut default_headers = HeaderMap::new();
        default_headers.insert("accept", HeaderValue::from_static("*/*"));
        default_headers.insert(
            "accept-encoding",
            HeaderValue::from_static("gzip, deflate, br"),
        );

        Self {
            user_agent: DEFAULT_USER_AGENT.to_string(),
            timeout: std::time::Duration::from_secs(30),
            max_redirects: 10,
            accept_invalid_certs: false,
            default_headers,
            proxy: None,
        }
    }
}

/// Default executor backed by reqwest
#[derive(Clone)]
pub struct HttpExecutor {
    client: Client,
    config: ExecutorConfig,
}

impl HttpExecutor {
    /// Create a new executor with default configuration
    pub fn new() -> Result<Self> {
        Self::with_config(ExecutorConfig::default())
    }

    /// Create a new executor with custom configuration
    pub fn with_config(config: ExecutorConfig) -> Result<Self> {
        let mut builder = Client::builder()
            .user_agent(&config.user_agent)
            .timeout(config.timeout)
            .redirect(Policy::limited(config.max_redirects))
            .danger_accept_invalid_certs(config.accept_invalid_certs)
            .default_headers(config.default_headers.clone());

        if let Some(ref proxy_url) = config.proxy {
            builder = builder.proxy(
                reqwest::Proxy::all(proxy_url)
                    .map_err(|e| Error::Config(format!("Invalid proxy URL: {}", e)))?,
            );
        }

        let client = builder.build()?;

        Ok(Self { client, config })
    }

    /// Get executor configuration
    pub fn config(&self) -> &ExecutorConfig {
        &self.config
    }
}

#[async_trait]
impl Executor for HttpExecutor {
    async fn proceed(&self, request: Request) -> Result<Response> {
        let mut builder = self
            .client
            .request(request.method.clone(), request.url.clone());

        for (name, value) in request.headers.iter() {
            builder = builder.header(name, value);
        }

        if let Some(body) = request.body {
            builder = builder.body(body.bytes().clone());
        }

        if let Some(timeout) = request.timeout {
            builder = builder.timeout(timeout);
        }

        let response = builder.send().await?;

        let status = response.status();
        let headers = response.headers().clone();
        let final_url = response.url().clone();

        // The payload stays on the wire until someone reads it; the logging
        // layer or the caller triggers the buffering, whichever comes first.
        let body = BodySource::deferred(Box::new(ReqwestBodyReader {
            response: Some(response),
        }));

        Ok(Response::new(status, headers, final_url, body))
    }
}

struct ReqwestBodyReader {
    response: Option<reqwest::Response>,
}

#[async_trait]
impl BodyReader for ReqwestBodyReader {
    async fn read_all(&mut self) -> Result<Bytes> {
        match self.response.take() {
            Some(response) => Ok(response.bytes().await?),
            None => Err(Error::BodyConsumed(
                "transport body already drained".to_string(),
            )),
        }
    }
}
