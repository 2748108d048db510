// Copyright (c) 2026 Bountyy Oy. All rights reserved.
// This software is proprietary and confidential.

//! Header filtering and rendering
//!
//! Allow-list wins first, deny-list second, redaction only touches the
//! rendered value. All matching is on the lowercase header name.

use std::collections::HashSet;

use reqwest::header::HeaderMap;

/// Mask token substituted for redacted header values
pub const MASK: &str = "██";

/// Headers dropped by `skip_common_headers`
const COMMON_HEADERS: &[&str] = &[
    "server",
    "date",
    "user-agent",
    "content-type",
    "content-length",
    "connection",
    "transfer-encoding",
    "vary",
    "strict-transport-security",
    "expires",
    "x-powered-by",
    "x-frame-options",
    "x-xss-protection",
    "x-content-type-options",
    "accept",
    "cache-control",
    "pragma",
    "referrer-policy",
    "content-security-policy",
    "via",
];

/// Header visibility configuration
#[derive(Debug, Clone, Default)]
pub struct HeaderFilter {
    only: HashSet<String>,
    skip: HashSet<String>,
    redact: HashSet<String>,
}

impl HeaderFilter {
    pub fn new() -> Self {
        Self::default()
    }

    /// Restrict output to the named headers
    pub fn only<I, S>(&mut self, names: I)
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        for name in names {
            self.only.insert(name.as_ref().to_lowercase());
        }
    }

    /// Drop the named headers from output
    pub fn skip<I, S>(&mut self, names: I)
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        for name in names {
            self.skip.insert(name.as_ref().to_lowercase());
        }
    }

    /// Remove the named headers from the deny-list
    pub fn allow<I, S>(&mut self, names: I)
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        for name in names {
            self.skip.remove(&name.as_ref().to_lowercase());
        }
    }

    /// Mask the values of the named headers
    pub fn redact<I, S>(&mut self, names: I)
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        for name in names {
            self.redact.insert(name.as_ref().to_lowercase());
        }
    }

    /// Pre-populate the deny-list with noisy standard headers
    pub fn skip_common(&mut self) {
        self.skip(COMMON_HEADERS.iter().copied());
    }

    /// Render the visible headers, one `name: value` per line
    ///
    /// Returns an empty string when everything was filtered out.
    pub fn render(&self, headers: &HeaderMap) -> String {
        let mut lines = Vec::new();
        for (name, value) in headers.iter() {
            let lower = name.as_str().to_lowercase();
            if !self.only.is_empty() && !self.only.contains(&lower) {
                continue;
            }
            if self.skip.contains(&lower) {
                continue;
            }

            let rendered = if self.redact.contains(&lower) {
                MASK.to_string()
            } else {
                String::from_utf8_lossy(value.as_bytes()).into_owned()
            };
            lines.push(format!("{}: {}", name.as_str(), rendered));
        }
        lines.join("\n")
    }
}
