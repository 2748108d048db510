// Copyright (c) 2026 Bountyy Oy. All rights reserved.
// This software is proprietary and confidential.

//! Failure classification for failure-only logging
//!
//! The predicate sees two signals per exchange: the outcome status and
//! whether a body capture failed. A transport failure is presented as a
//! synthesized 500 with the capture flag set; the predicate never sees the
//! failure text itself.

use std::sync::Arc;

use reqwest::StatusCode;

/// Predicate deciding whether an exchange's lines are emitted at all
///
/// Arguments: outcome status, had-capture-error. Evaluated exactly once per
/// exchange outcome.
pub type FailureFilter = Arc<dyn Fn(StatusCode, bool) -> bool + Send + Sync>;

/// Status fed to the predicate when the transport itself failed
pub(crate) const SYNTHESIZED_FAILURE_STATUS: StatusCode = StatusCode::INTERNAL_SERVER_ERROR;

/// Default classifier: capture error or any non-2xx status
pub fn default_failure_filter() -> FailureFilter {
    Arc::new(|status, had_error| had_error || !status.is_success())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_filter_statuses() {
        let filter = default_failure_filter();
        assert!(!filter(StatusCode::OK, false));
        assert!(!filter(StatusCode::CREATED, false));
        assert!(filter(StatusCode::BAD_REQUEST, false));
        assert!(filter(StatusCode::INTERNAL_SERVER_ERROR, false));
        assert!(filter(StatusCode::MOVED_PERMANENTLY, false));
    }

    #[test]
    fn test_capture_error_always_fails() {
        let filter = default_failure_filter();
        assert!(filter(StatusCode::OK, true));
    }

    #[test]
    fn test_custom_filter() {
        let filter: FailureFilter = Arc::new(|status, _| status.as_u16() >= 500);
        assert!(!filter(StatusCode::NOT_FOUND, false));
        assert!(filter(StatusCode::BAD_GATEWAY, false));
    }
}
