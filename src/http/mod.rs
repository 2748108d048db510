// Copyright (c) 2026 Bountyy Oy. All rights reserved.
// This software is proprietary and confidential.

//! HTTP exchange types for wirelog
//!
//! Lightweight request/response representations plus the `Executor`
//! capability that performs the actual network call. The logging layer
//! observes these types; it never drives the transport itself.

mod executor;
mod request;
mod response;

pub use executor::{Executor, ExecutorConfig, HttpExecutor};
pub use request::{BodyKind, Request, RequestBody};
pub use response::{BodyReader, BodySource, Response};

/// Default user agent string
pub const DEFAULT_USER_AGENT: &str = concat!("wirelog/", env!("CARGO_PKG_VERSION"));

/// Common HTTP headers
pub mod headers {
    pub const CONTENT_TYPE: &str = "content-type";
    pub const CONTENT_LENGTH: &str = "content-length";
    pub const CONTENT_ENCODING: &str = "content-encoding";
    pub const TRANSFER_ENCODING: &str = "transfer-encoding";
}
