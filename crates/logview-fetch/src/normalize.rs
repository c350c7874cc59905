//! Response normalization: one step from response body to [`LogLineSet`].
//!
//! # Shape detection
//!
//! | Content type / body | Shape |
//! |---------------------|-------|
//! | `application/json` (any `+json` suffix too) | [`ResponseShape::JsonLines`] |
//! | anything else whose body parses as `{"lines": [...]}` | [`ResponseShape::JsonLines`] |
//! | anything else | [`ResponseShape::PlainText`] |
//!
//! # Blank lines
//!
//! Empty lines are dropped for both shapes. JSON elements first lose one
//! trailing `\n` (or `\r\n`), which older servers left on every line.

use logview_core::{FetchError, LogLineSet};
use serde::Deserialize;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResponseShape {
    JsonLines,
    PlainText,
}

#[derive(Debug, Deserialize)]
struct LinesBody {
    lines: Vec<String>,
}

#[derive(Debug, Deserialize)]
struct ErrorBody {
    error: String,
}

fn is_json_content_type(content_type: &str) -> bool {
    let mime = content_type
        .split(';')
        .next()
        .unwrap_or_default()
        .trim()
        .to_ascii_lowercase();
    mime == "application/json" || mime.ends_with("+json")
}

/// Decide which shape a successful response body has.
pub fn detect_shape(content_type: Option<&str>, body: &[u8]) -> ResponseShape {
    if content_type.is_some_and(is_json_content_type) {
        return ResponseShape::JsonLines;
    }
    let looks_like_object = body
        .iter()
        .find(|b| !b.is_ascii_whitespace())
        .is_some_and(|b| *b == b'{');
    if looks_like_object && serde_json::from_slice::<LinesBody>(body).is_ok() {
        ResponseShape::JsonLines
    } else {
        ResponseShape::PlainText
    }
}

/// Turn a successful response body into lines, whatever its shape.
pub fn normalize_body(content_type: Option<&str>, body: &[u8]) -> Result<LogLineSet, FetchError> {
    match detect_shape(content_type, body) {
        ResponseShape::JsonLines => json_lines(body),
        ResponseShape::PlainText => Ok(text_lines(body)),
    }
}

fn json_lines(body: &[u8]) -> Result<LogLineSet, FetchError> {
    let parsed: LinesBody = serde_json::from_slice(body)
        .map_err(|e| FetchError::Transport(format!("malformed JSON response: {e}")))?;
    Ok(parsed
        .lines
        .into_iter()
        .map(|line| strip_terminator(&line).to_string())
        .filter(|line| !line.is_empty())
        .collect())
}

fn text_lines(body: &[u8]) -> LogLineSet {
    String::from_utf8_lossy(body)
        .split('\n')
        .map(|line| line.strip_suffix('\r').unwrap_or(line))
        .filter(|line| !line.is_empty())
        .collect()
}

fn strip_terminator(line: &str) -> &str {
    line.strip_suffix("\r\n")
        .or_else(|| line.strip_suffix('\n'))
        .unwrap_or(line)
}

/// Interpret the body of a non-2xx response.
///
/// `{"error": "..."}` is surfaced verbatim as [`FetchError::Server`];
/// anything else becomes a transport error naming the status code.
pub fn error_from_body(status: u16, body: &[u8]) -> FetchError {
    match serde_json::from_slice::<ErrorBody>(body) {
        Ok(ErrorBody { error }) => FetchError::Server(error),
        Err(_) => FetchError::Transport(format!("HTTP error! status: {status}")),
    }
}
