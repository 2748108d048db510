// Copyright (c) 2026 Bountyy Oy. All rights reserved.
// This software is proprietary and confidential.

//! Compact exchange logger
//!
//! One line block per request, one per response, built around a single
//! `proceed` call. The logger is a read-only observer: whatever the
//! executor produces (response or failure) reaches the caller unchanged,
//! and a logging read-ahead never consumes the response body.

use std::sync::Arc;
use std::time::Instant;

use reqwest::{Method, StatusCode};

use super::body;
use super::failure::{default_failure_filter, FailureFilter, SYNTHESIZED_FAILURE_STATUS};
use super::headers::HeaderFilter;
use super::sink::{LogSink, Severity, TracingSink};
use crate::error::Result;
use crate::http::{Executor, Request, Response};

/// Section separator inside a line block
const SEPARATOR: &str = "\n---\n";

/// Compact HTTP logging interceptor
///
/// Configure with the fluent methods, then share (typically via `Arc`)
/// across concurrent exchanges. All configuration is frozen once exchanges
/// begin; per-exchange state lives on the `intercept` stack.
///
/// # Example
///
/// ```rust,no_run
/// use std::sync::Arc;
/// use wirelog::{CompactLogger, HttpExecutor, Request, TracingSink};
///
/// #[tokio::main]
/// async fn main() -> wirelog::Result<()> {
///     let logger = CompactLogger::new(Arc::new(TracingSink::new()))
///         .with_headers()
///         .with_body()
///         .skip_common_headers()
///         .redact_headers(["authorization"]);
///
///     let executor = HttpExecutor::new()?;
///     let mut response = logger
///         .intercept(Request::get("https://example.com")?, &executor)
///         .await?;
///     let _body = response.text().await?;
///     Ok(())
/// }
/// ```
pub struct CompactLogger {
    sink: Arc<dyn LogSink>,
    log_headers: bool,
    log_body: bool,
    log_as_debug: bool,
    failure_filter: Option<FailureFilter>,
    header_filter: HeaderFilter,
}

impl CompactLogger {
    /// Create a logger emitting to the given sink, logging lines only
    pub fn new(sink: Arc<dyn LogSink>) -> Self {
        Self {
            sink,
            log_headers: false,
            log_body: false,
            log_as_debug: false,
            failure_filter: None,
            header_filter: HeaderFilter::new(),
        }
    }

    /// Create a logger emitting through the `tracing` subscriber
    pub fn tracing() -> Self {
        Self::new(Arc::new(TracingSink::new()))
    }

    /// Enable the header section in both lines
    pub fn with_headers(mut self) -> Self {
        self.log_headers = true;
        self
    }

    /// Enable the body section in both lines, subject to capture safety
    pub fn with_body(mut self) -> Self {
        self.log_body = true;
        self
    }

    /// Emit at debug severity
    pub fn as_debug(mut self) -> Self {
        self.log_as_debug = true;
        self
    }

    /// Emit at info severity (the default)
    pub fn as_info(mut self) -> Self {
        self.log_as_debug = false;
        self
    }

    /// Show only the named headers; implies `with_headers`
    pub fn only_headers<I, S>(mut self, names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        self.log_headers = true;
        self.header_filter.only(names);
        self
    }

    /// Hide the named headers; implies `with_headers`
    pub fn skip_headers<I, S>(mut self, names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        self.log_headers = true;
        self.header_filter.skip(names);
        self
    }

    /// Remove the named headers from the deny-list; implies `with_headers`
    pub fn add_headers<I, S>(mut self, names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        self.log_headers = true;
        self.header_filter.allow(names);
        self
    }

    /// Hide a fixed set of noisy standard headers; implies `with_headers`
    pub fn skip_common_headers(mut self) -> Self {
        self.log_headers = true;
        self.header_filter.skip_common();
        self
    }

    /// Mask the values of the named headers
    pub fn redact_headers<I, S>(mut self, names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        self.header_filter.redact(names);
        self
    }

    /// Emit lines only for failed exchanges (capture error or non-2xx)
    pub fn log_only_failures(mut self) -> Self {
        self.failure_filter = Some(default_failure_filter());
        self
    }

    /// Alias of `log_only_failures`
    pub fn log_failures_only(self) -> Self {
        self.log_only_failures()
    }

    /// Emit lines only when the predicate reports a failure
    ///
    /// The predicate receives the outcome status and the capture-error flag.
    /// A transport failure is presented as a synthesized 500.
    pub fn log_only_failures_with<F>(mut self, predicate: F) -> Self
    where
        F: Fn(StatusCode, bool) -> bool + Send + Sync + 'static,
    {
        self.failure_filter = Some(Arc::new(predicate));
        self
    }

    pub fn log_headers(&self) -> bool {
        self.log_headers
    }

    pub fn log_body(&self) -> bool {
        self.log_body
    }

    /// Observe one exchange: render and emit the request line, run the
    /// executor, render and emit the response (or failure) line
    ///
    /// The executor's outcome is returned unchanged. A failure while reading
    /// the response body for logging is returned to the caller after the
    /// emission logic completes.
    pub async fn intercept(&self, request: Request, executor: &dyn Executor) -> Result<Response> {
        let start = Instant::now();
        let method = request.method.clone();
        let url = request.url.clone();

        let req_line = self.render_request(&request);
        if self.failure_filter.is_none() {
            self.emit(&req_line);
        }

        let mut response = match executor.proceed(request).await {
            Ok(response) => response,
            Err(err) => {
                let took_ms = elapsed_ms(start);
                let err_line = format!(
                    "HTTP RESP: {} {} -> ERROR {} {} ({} ms)",
                    method,
                    url,
                    err.kind(),
                    err,
                    took_ms
                );
                match &self.failure_filter {
                    None => self.emit(&err_line),
                    Some(filter) => {
                        if filter(SYNTHESIZED_FAILURE_STATUS, true) {
                            self.emit(&req_line);
                            self.emit(&err_line);
                        }
                    }
                }
                return Err(err);
            }
        };

        let took_ms = elapsed_ms(start);
        let mut resp_line = format!(
            "HTTP RESP: {} {} -> {} ({} ms)",
            method,
            url,
            response.status.as_u16(),
            took_ms
        );

        if self.log_headers {
            let rendered = self.header_filter.render(&response.headers);
            if !rendered.is_empty() {
                resp_line.push_str(SEPARATOR);
                resp_line.push_str(&rendered);
            }
        }

        let mut capture_error = false;
        let mut read_failure = None;
        if self.log_body && promises_body(&method, &response) {
            if body::is_event_stream(response.content_type()) {
                resp_line.push_str(SEPARATOR);
                resp_line.push_str(body::STREAMING_BODY);
            } else if body::has_unknown_encoding(&response.headers) {
                resp_line.push_str(SEPARATOR);
                resp_line.push_str(body::ENCODED_OMITTED);
            } else {
                let content_type = response.content_type().map(str::to_owned);
                // Buffering read: the body stays readable for the caller
                match response.bytes().await {
                    Ok(bytes) => {
                        resp_line.push_str(SEPARATOR);
                        resp_line.push_str(&body::decode_text(&bytes, content_type.as_deref()));
                    }
                    Err(err) => {
                        capture_error = true;
                        tracing::error!(
                            target: "wirelog",
                            "error buffering response body for log: {}",
                            err
                        );
                        resp_line.push_str(SEPARATOR);
                        resp_line
                            .push_str(&format!("(error reading body: {} {})", err.kind(), err));
                        read_failure = Some(err);
                    }
                }
            }
        }

        match &self.failure_filter {
            None => self.emit(&resp_line),
            Some(filter) => {
                if filter(response.status, capture_error) {
                    self.emit(&req_line);
                    self.emit(&resp_line);
                }
            }
        }

        match read_failure {
            Some(err) => Err(err),
            None => Ok(response),
        }
    }

    fn render_request(&self, request: &Request) -> String {
        let mut line = format!("HTTP REQ: {} {}", request.method, request.url);
        if let Some(protocol) = request.protocol {
            line.push(' ');
            line.push_str(&format!("{:?}", protocol));
        }

        if self.log_headers {
            let rendered = self.header_filter.render(&request.headers);
            if !rendered.is_empty() {
                line.push_str(SEPARATOR);
                line.push_str(&rendered);
            }
        }

        if self.log_body {
            if let Some(ref body) = request.body {
                line.push_str(SEPARATOR);
                line.push_str(&body::render_request_body(body, &request.headers));
            }
        }

        line
    }

    fn emit(&self, message: &str) {
        let severity = if self.log_as_debug {
            Severity::Debug
        } else {
            Severity::Info
        };
        self.sink.emit(message, severity);
    }
}

/// Whether a response is expected to carry body content worth rendering
///
/// HEAD never yields one. Otherwise: any status outside 1xx except 204 and
/// 304, or an explicit non-negative Content-Length, or chunked transfer
/// encoding.
pub fn promises_body(method: &Method, response: &Response) -> bool {
    if *method == Method::HEAD {
        return false;
    }

    let code = response.status.as_u16();
    if (code < 100 || code >= 200) && code != 204 && code != 304 {
        return true;
    }

    if response.content_length().map_or(false, |len| len >= 0) {
        return true;
    }
    if response
        .header(crate::http::headers::TRANSFER_ENCODING)
        .map_or(false, |v| v.eq_ignore_ascii_case("chunked"))
    {
        return true;
    }

    false
}

fn elapsed_ms(start: Instant) -> u64 {
    (start.elapsed().as_secs_f64() * 1000.0).round() as u64
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::Error;
    use crate::http::{BodyReader, BodySource, RequestBody};
    use crate::logger::sink::MemorySink;
    use async_trait::async_trait;
    use bytes::Bytes;
    use reqwest::header::{HeaderMap, HeaderName, HeaderValue};
    use url::Url;

    const URL: &str = "https://example.com/foo";

    struct FnExecutor<F>(F);

    #[async_trait]
    impl<F> Executor for FnExecutor<F>
    where
        F: Fn(Request) -> Result<Response> + Send + Sync,
    {
        async fn proceed(&self, request: Request) -> Result<Response> {
            (self.0)(request)
        }
    }

    struct FailingReader;

    #[async_trait]
    impl BodyReader for FailingReader {
        async fn read_all(&mut self) -> Result<Bytes> {
            Err(Error::Io(std::io::Error::new(
                std::io::ErrorKind::ConnectionReset,
                "connection reset",
            )))
        }
    }

    fn headers(pairs: &[(&str, &str)]) -> HeaderMap {
        let mut map = HeaderMap::new();
        for (name, value) in pairs {
            map.append(
                HeaderName::try_from(*name).unwrap(),
                HeaderValue::try_from(*value).unwrap(),
            );
        }
        map
    }

    fn respond(status: u16, header_pairs: &[(&str, &str)], body: BodySource) -> Response {
        Response::new(
            StatusCode::from_u16(status).unwrap(),
            headers(header_pairs),
            Url::parse(URL).unwrap(),
            body,
        )
    }

    /// Replace the elapsed-ms segment so lines compare deterministically
    fn mask_ms(line: &str) -> String {
        let Some(start) = line.find(" (") else {
            return line.to_string();
        };
        let Some(end) = line[start..].find(" ms)") else {
            return line.to_string();
        };
        format!("{} (X ms){}", &line[..start], &line[start + end + 4..])
    }

    fn full_logger(sink: Arc<MemorySink>) -> CompactLogger {
        CompactLogger::new(sink).with_headers().with_body()
    }

    #[tokio::test]
    async fn test_success_logs_two_lines() {
        let sink = Arc::new(MemorySink::new());
        let logger = full_logger(sink.clone());
        let executor = FnExecutor(|_| {
            Ok(respond(
                201,
                &[("content-length", "7")],
                BodySource::from("it's ok"),
            ))
        });

        let request = Request::get(URL).unwrap().header("test_key", "test_value");
        let response = logger.intercept(request, &executor).await.unwrap();
        assert_eq!(response.status_code(), 201);

        let lines = sink.lines();
        assert_eq!(lines.len(), 2);
        assert_eq!(
            lines[0],
            format!("HTTP REQ: GET {}\n---\ntest_key: test_value", URL)
        );
        assert_eq!(
            mask_ms(&lines[1]),
            format!(
                "HTTP RESP: GET {} -> 201 (X ms)\n---\ncontent-length: 7\n---\nit's ok",
                URL
            )
        );
    }

    #[tokio::test]
    async fn test_body_still_readable_after_interception() {
        let sink = Arc::new(MemorySink::new());
        let logger = full_logger(sink);
        let executor = FnExecutor(|_| Ok(respond(200, &[], BodySource::from("it's ok"))));

        let mut response = logger
            .intercept(Request::get(URL).unwrap(), &executor)
            .await
            .unwrap();
        assert_eq!(response.text().await.unwrap(), "it's ok");
        assert_eq!(response.text().await.unwrap(), "it's ok");
    }

    #[tokio::test]
    async fn test_lines_only_when_sections_disabled() {
        let sink = Arc::new(MemorySink::new());
        let logger = CompactLogger::new(sink.clone());
        let executor = FnExecutor(|_| {
            Ok(respond(
                200,
                &[("content-length", "7")],
                BodySource::from("it's ok"),
            ))
        });

        let request = Request::get(URL).unwrap().header("test_key", "test_value");
        logger.intercept(request, &executor).await.unwrap();

        let lines = sink.lines();
        assert_eq!(lines[0], format!("HTTP REQ: GET {}", URL));
        assert_eq!(mask_ms(&lines[1]), format!("HTTP RESP: GET {} -> 200 (X ms)", URL));
    }

    #[tokio::test]
    async fn test_protocol_appended_when_negotiated() {
        let sink = Arc::new(MemorySink::new());
        let logger = CompactLogger::new(sink.clone());
        let executor = FnExecutor(|_| Ok(respond(200, &[], BodySource::empty())));

        let request = Request::get(URL).unwrap().protocol(reqwest::Version::HTTP_2);
        logger.intercept(request, &executor).await.unwrap();

        assert_eq!(sink.lines()[0], format!("HTTP REQ: GET {} HTTP/2.0", URL));
    }

    #[tokio::test]
    async fn test_skip_common_and_redact_scenario() {
        let sink = Arc::new(MemorySink::new());
        let logger = full_logger(sink.clone())
            .skip_common_headers()
            .redact_headers(["pin"]);
        let executor = FnExecutor(|_| Ok(respond(200, &[], BodySource::empty())));

        let request = Request::get(URL)
            .unwrap()
            .header("date", "super")
            .header("pin", "12345");
        logger.intercept(request, &executor).await.unwrap();

        assert_eq!(sink.lines()[0], format!("HTTP REQ: GET {}\n---\npin: ██", URL));
    }

    #[tokio::test]
    async fn test_head_response_has_no_body_section() {
        let sink = Arc::new(MemorySink::new());
        let logger = full_logger(sink.clone());
        let executor = FnExecutor(|_| {
            Ok(respond(
                200,
                &[("content-length", "7")],
                BodySource::from("ignored"),
            ))
        });

        logger
            .intercept(Request::head(URL).unwrap(), &executor)
            .await
            .unwrap();

        let lines = sink.lines();
        assert_eq!(
            mask_ms(&lines[1]),
            format!("HTTP RESP: HEAD {} -> 200 (X ms)\n---\ncontent-length: 7", URL)
        );
    }

    #[tokio::test]
    async fn test_no_content_has_no_body_section() {
        let sink = Arc::new(MemorySink::new());
        let logger = CompactLogger::new(sink.clone()).with_body();
        let executor = FnExecutor(|_| Ok(respond(204, &[], BodySource::empty())));

        logger
            .intercept(Request::get(URL).unwrap(), &executor)
            .await
            .unwrap();

        assert_eq!(
            mask_ms(&sink.lines()[1]),
            format!("HTTP RESP: GET {} -> 204 (X ms)", URL)
        );
    }

    #[tokio::test]
    async fn test_event_stream_placeholder() {
        let sink = Arc::new(MemorySink::new());
        let logger = CompactLogger::new(sink.clone()).with_body();
        let executor = FnExecutor(|_| {
            Ok(respond(
                200,
                &[("content-type", "text/event-stream")],
                BodySource::deferred(Box::new(FailingReader)),
            ))
        });

        logger
            .intercept(Request::get(URL).unwrap(), &executor)
            .await
            .unwrap();

        assert_eq!(
            mask_ms(&sink.lines()[1]),
            format!(
                "HTTP RESP: GET {} -> 200 (X ms)\n---\n(streaming response body)",
                URL
            )
        );
    }

    #[tokio::test]
    async fn test_request_one_shot_body_placeholder() {
        let sink = Arc::new(MemorySink::new());
        let logger = CompactLogger::new(sink.clone()).with_body();
        let executor = FnExecutor(|_| Ok(respond(204, &[], BodySource::empty())));

        let request = Request::post(URL)
            .unwrap()
            .body_kind(RequestBody::one_shot("secret"));
        logger.intercept(request, &executor).await.unwrap();

        assert_eq!(
            sink.lines()[0],
            format!("HTTP REQ: POST {}\n---\n(one-shot body omitted)", URL)
        );
    }

    #[tokio::test]
    async fn test_transport_failure_logs_error_line_and_reraises() {
        let sink = Arc::new(MemorySink::new());
        let logger = CompactLogger::new(sink.clone());
        let executor = FnExecutor(|_| Err(Error::timeout("proceed", 1)));

        let err = logger
            .intercept(Request::get(URL).unwrap(), &executor)
            .await
            .unwrap_err();
        assert!(err.is_timeout());

        let lines = sink.lines();
        assert_eq!(lines.len(), 2);
        assert_eq!(lines[0], format!("HTTP REQ: GET {}", URL));
        assert_eq!(
            mask_ms(&lines[1]),
            format!(
                "HTTP RESP: GET {} -> ERROR Timeout Operation timed out after 1ms: proceed (X ms)",
                URL
            )
        );
    }

    #[tokio::test]
    async fn test_failure_filter_suppresses_success() {
        let sink = Arc::new(MemorySink::new());
        let logger = full_logger(sink.clone()).log_only_failures();
        let executor = FnExecutor(|_| Ok(respond(201, &[], BodySource::from("ok"))));

        logger
            .intercept(Request::get(URL).unwrap(), &executor)
            .await
            .unwrap();
        assert!(sink.is_empty());
    }

    #[tokio::test]
    async fn test_failure_filter_emits_pair_on_failure() {
        let sink = Arc::new(MemorySink::new());
        let logger = full_logger(sink.clone()).log_only_failures();
        let executor = FnExecutor(|_| Ok(respond(400, &[], BodySource::from("bad"))));

        let request = Request::get(URL).unwrap().header("test_key", "test_value");
        logger.intercept(request, &executor).await.unwrap();

        let lines = sink.lines();
        assert_eq!(lines.len(), 2);
        assert!(lines[0].starts_with("HTTP REQ: GET"));
        assert!(lines[1].contains("-> 400"));
    }

    #[tokio::test]
    async fn test_failure_filter_sees_transport_failure_as_500() {
        let sink = Arc::new(MemorySink::new());
        let logger = CompactLogger::new(sink.clone())
            .log_only_failures_with(|status, had_error| {
                assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
                assert!(had_error);
                true
            });
        let executor = FnExecutor(|_| Err(Error::other("connection refused")));

        let err = logger
            .intercept(Request::get(URL).unwrap(), &executor)
            .await
            .unwrap_err();
        assert_eq!(err.kind(), "Other");
        assert_eq!(sink.len(), 2);
    }

    #[tokio::test]
    async fn test_failure_filter_false_still_reraises() {
        let sink = Arc::new(MemorySink::new());
        let logger = CompactLogger::new(sink.clone()).log_only_failures_with(|_, _| false);
        let executor = FnExecutor(|_| Err(Error::other("boom")));

        assert!(logger
            .intercept(Request::get(URL).unwrap(), &executor)
            .await
            .is_err());
        assert!(sink.is_empty());
    }

    #[tokio::test]
    async fn test_capture_error_renders_placeholder_and_propagates() {
        let sink = Arc::new(MemorySink::new());
        let logger = CompactLogger::new(sink.clone()).with_body();
        let executor =
            FnExecutor(|_| Ok(respond(200, &[], BodySource::deferred(Box::new(FailingReader)))));

        let err = logger
            .intercept(Request::get(URL).unwrap(), &executor)
            .await
            .unwrap_err();
        assert_eq!(err.kind(), "Io");

        let line = mask_ms(&sink.lines()[1]);
        assert_eq!(
            line,
            format!(
                "HTTP RESP: GET {} -> 200 (X ms)\n---\n(error reading body: Io I/O error: connection reset)",
                URL
            )
        );
    }

    #[tokio::test]
    async fn test_capture_error_counts_as_failure_for_filter() {
        let sink = Arc::new(MemorySink::new());
        let logger = CompactLogger::new(sink.clone()).with_body().log_only_failures();
        let executor =
            FnExecutor(|_| Ok(respond(200, &[], BodySource::deferred(Box::new(FailingReader)))));

        assert!(logger
            .intercept(Request::get(URL).unwrap(), &executor)
            .await
            .is_err());
        // 200 status, but the capture error makes the exchange a failure
        assert_eq!(sink.len(), 2);
    }

    #[tokio::test]
    async fn test_debug_severity() {
        let sink = Arc::new(MemorySink::new());
        let logger = CompactLogger::new(sink.clone()).as_debug();
        let executor = FnExecutor(|_| Ok(respond(200, &[], BodySource::empty())));

        logger
            .intercept(Request::get(URL).unwrap(), &executor)
            .await
            .unwrap();
        assert!(sink
            .entries()
            .iter()
            .all(|(_, severity)| *severity == Severity::Debug));
    }

    #[tokio::test]
    async fn test_concurrent_exchanges_share_logger() {
        let sink = Arc::new(MemorySink::new());
        let logger = Arc::new(CompactLogger::new(sink.clone()));
        let executor = FnExecutor(|_| Ok(respond(200, &[], BodySource::empty())));

        let (a, b) = tokio::join!(
            logger.intercept(Request::get(URL).unwrap(), &executor),
            logger.intercept(Request::get(URL).unwrap(), &executor),
        );
        a.unwrap();
        b.unwrap();
        assert_eq!(sink.len(), 4);
    }

    #[test]
    fn test_promises_body_predicate() {
        let no_body = |status: u16, pairs: &[(&str, &str)]| {
            !promises_body(&Method::GET, &respond(status, pairs, BodySource::empty()))
        };

        assert!(no_body(204, &[]));
        assert!(no_body(304, &[]));
        assert!(no_body(100, &[]));
        assert!(!no_body(200, &[]));
        assert!(!no_body(404, &[]));
        // 1xx with explicit length or chunked encoding still promises one
        assert!(!no_body(101, &[("content-length", "5")]));
        assert!(!no_body(101, &[("transfer-encoding", "chunked")]));

        let resp = respond(200, &[], BodySource::empty());
        assert!(!promises_body(&Method::HEAD, &resp));
    }
}
