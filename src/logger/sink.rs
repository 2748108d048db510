// Copyright (c) 2026 Bountyy Oy. All rights reserved.
// This software is proprietary and confidential.

//! Log sinks
//!
//! The interceptor decides whether and what to emit; the sink decides
//! where it goes. `TracingSink` is the production default, `MemorySink`
//! exists for assertions in tests.

use parking_lot::Mutex;

/// Severity of an emitted log line
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Severity {
    Info,
    Debug,
}

/// Destination for rendered log lines
pub trait LogSink: Send + Sync {
    /// Persist or display one rendered line block
    fn emit(&self, message: &str, severity: Severity);
}

/// Sink backed by the `tracing` subscriber
#[derive(Debug, Default)]
pub struct TracingSink;

impl TracingSink {
    pub fn new() -> Self {
        Self
    }
}

impl LogSink for TracingSink {
    fn emit(&self, message: &str, severity: Severity) {
        match severity {
            Severity::Info => tracing::info!(target: "wirelog", "{}", message),
            Severity::Debug => tracing::debug!(target: "wirelog", "{}", message),
        }
    }
}

/// In-memory sink capturing emitted lines in order
#[derive(Debug, Default)]
pub struct MemorySink {
    entries: Mutex<Vec<(String, Severity)>>,
}

impl MemorySink {
    pub fn new() -> Self {
        Self::default()
    }

    /// Emitted lines, oldest first
    pub fn lines(&self) -> Vec<String> {
        self.entries
            .lock()
            .iter()
            .map(|(line, _)| line.clone())
            .collect()
    }

    /// Emitted lines with their severities
    pub fn entries(&self) -> Vec<(String, Severity)> {
        self.entries.lock().clone()
    }

    pub fn len(&self) -> usize {
        self.entries.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.lock().is_empty()
    }
}

impl LogSink for MemorySink {
    fn emit(&self, message: &str, severity: Severity) {
        self.entries.lock().push((message.to_string(), severity));
    }
}
