// Copyright (c) 2026 Bountyy Oy. All rights reserved.
// This software is proprietary and confidential.

//! # Wirelog - Compact HTTP Client Logging
//!
//! A logging interceptor for outgoing HTTP exchanges: exactly one compact
//! line block per request and one per response, with safe body capture.
//! It observes the exchange between your code and the transport without
//! ever creating, retrying, or modifying traffic.
//!
//! ## Features
//!
//! - One line per direction: request and response each render as a single
//!   log entry with optional header and body sections
//! - Safe body capture: duplex, one-shot, encoded and event-stream bodies
//!   get placeholders instead of reads; captured response bodies stay fully
//!   re-readable for the caller
//! - Header filtering: allow-list, deny-list, and value redaction with
//!   case-insensitive matching
//! - Failure-only mode: defer both lines and emit them together only when
//!   the exchange counts as a failure
//! - Transparent errors: transport failures are logged and re-raised
//!   unchanged
//!
//! ## Example
//!
//! ```rust,no_run
//! use std::sync::Arc;
//! use wirelog::{CompactLogger, HttpExecutor, Request, TracingSink};
//!
//! #[tokio::main]
//! async fn main() -> wirelog::Result<()> {
//!     let logger = CompactLogger::new(Arc::new(TracingSink::new()))
//!         .with_headers()
//!         .with_body()
//!         .redact_headers(["authorization"]);
//!     let executor = HttpExecutor::new()?;
//!
//!     let mut response = logger
//!         .intercept(Request::get("https://example.com")?, &executor)
//!         .await?;
//!     println!("{}", response.text().await?);
//!     Ok(())
//! }
//! ```

pub mod error;
pub mod http;
pub mod logger;

// Re-exports for convenience

// Errors
pub use error::{Error, Result};

// HTTP
pub use http::{
    BodyKind, BodyReader, BodySource, Executor, ExecutorConfig, HttpExecutor, Request,
    RequestBody, Response,
};

// Logging
pub use logger::{
    default_failure_filter, promises_body, CompactLogger, FailureFilter, HeaderFilter, LogSink,
    MemorySink, Severity, TracingSink,
};

/// Wirelog version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
