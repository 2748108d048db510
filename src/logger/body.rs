// Copyright (c) 2026 Bountyy Oy. All rights reserved.
// This software is proprietary and confidential.

//! Body capture policy
//!
//! Decides whether a body can be pulled into memory without corrupting the
//! exchange, and turns safe bodies into log text. Unsafe bodies get a named
//! placeholder instead of a read.

use reqwest::header::HeaderMap;

use crate::http::headers::{CONTENT_ENCODING, CONTENT_TYPE};
use crate::http::RequestBody;

pub(crate) const DUPLEX_OMITTED: &str = "(duplex request body omitted)";
pub(crate) const ONE_SHOT_OMITTED: &str = "(one-shot body omitted)";
pub(crate) const ENCODED_OMITTED: &str = "(encoded body omitted)";
pub(crate) const STREAMING_BODY: &str = "(streaming response body)";

/// Render a request body as log text or a safety placeholder
pub(crate) fn render_request_body(body: &RequestBody, headers: &HeaderMap) -> String {
    if body.is_duplex() {
        return DUPLEX_OMITTED.to_string();
    }
    if body.is_one_shot() {
        return ONE_SHOT_OMITTED.to_string();
    }
    if has_unknown_encoding(headers) {
        return ENCODED_OMITTED.to_string();
    }
    let content_type = headers.get(CONTENT_TYPE).and_then(|v| v.to_str().ok());
    decode_text(body.bytes(), content_type)
}

/// Content-encoding other than identity/gzip means the payload is not
/// readable as text
pub(crate) fn has_unknown_encoding(headers: &HeaderMap) -> bool {
    match headers.get(CONTENT_ENCODING).and_then(|v| v.to_str().ok()) {
        None => false,
        Some(encoding) => {
            !encoding.eq_ignore_ascii_case("identity") && !encoding.eq_ignore_ascii_case("gzip")
        }
    }
}

/// Server-sent event streams are unbounded; never read them
pub(crate) fn is_event_stream(content_type: Option<&str>) -> bool {
    content_type
        .map(|ct| {
            ct.split(';')
                .next()
                .unwrap_or("")
                .trim()
                .eq_ignore_ascii_case("text/event-stream")
        })
        .unwrap_or(false)
}

/// Decode body bytes using the charset declared on the content type
///
/// UTF-8 is the process default; an absent or unrecognized charset falls
/// back to lossy UTF-8 rather than dropping the body.
pub(crate) fn decode_text(bytes: &[u8], content_type: Option<&str>) -> String {
    match declared_charset(content_type).as_deref() {
        Some("utf-16be") => decode_utf16(bytes, true),
        Some("utf-16") | Some("utf-16le") => decode_utf16(bytes, false),
        _ => String::from_utf8_lossy(bytes).into_owned(),
    }
}

fn declared_charset(content_type: Option<&str>) -> Option<String> {
    let ct = content_type?;
    ct.split(';').skip(1).find_map(|param| {
        let param = param.trim();
        param
            .strip_prefix("charset=")
            .or_else(|| param.strip_prefix("CHARSET="))
            .map(|cs| cs.trim_matches('"').to_lowercase())
    })
}

fn decode_utf16(bytes: &[u8], big_endian: bool) -> String {
    // BOM overrides the declared endianness
    let (bytes, big_endian) = match bytes {
        [0xFE, 0xFF, rest @ ..] => (rest, true),
        [0xFF, 0xFE, rest @ ..] => (rest, false),
        _ => (bytes, big_endian),
    };
    let units: Vec<u16> = bytes
        .chunks_exact(2)
        .map(|pair| {
            if big_endian {
                u16::from_be_bytes([pair[0], pair[1]])
            } else {
                u16::from_le_bytes([pair[0], pair[1]])
            }
        })
        .collect();
    String::from_utf16_lossy(&units)
}
