// Copyright (c) 2026 Bountyy Oy. All rights reserved.
// This software is proprietary and confidential.

//! Compact exchange logging
//!
//! `CompactLogger` observes one request/response exchange at a time and
//! emits at most one line block per direction through a pluggable sink.

mod body;
mod compact;
mod failure;
mod headers;
mod sink;

pub use compact::{promises_body, CompactLogger};
pub use failure::{default_failure_filter, FailureFilter};
pub use headers::{HeaderFilter, MASK};
pub use sink::{LogSink, MemorySink, Severity, TracingSink};
