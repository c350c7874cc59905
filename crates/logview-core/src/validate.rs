//! Validator: pure checks on raw form input, run before any request.
//!
//! Every check returns a verdict and nothing else: no panics, no I/O. The
//! caller aborts the pipeline on the first [`ValidationError`] and shows its
//! message. An over-limit line count is *not* an error; it is clamped and
//! reported through [`ClampWarning`].

use crate::error::{ClampWarning, ValidationError};
use crate::types::LogQuery;
use regex::Regex;
use std::num::IntErrorKind;
use std::sync::LazyLock;

static FILENAME_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[\w,\s-]+\.[A-Za-z]{3}$").expect("filename pattern"));

static KEYWORD_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[\w\s-]*$").expect("keyword pattern"));

/// Host used when the address field is left empty.
pub const DEFAULT_HOST: &str = "localhost";

// ---------------------------------------------------------------------------
// Field checks
// ---------------------------------------------------------------------------

/// Word characters, commas, whitespace and hyphens, then `.` and exactly
/// three ASCII letters. Path separators and query characters never match.
pub fn is_valid_filename(s: &str) -> bool {
    FILENAME_RE.is_match(s)
}

/// Empty, or any mix of word characters, whitespace and hyphens.
pub fn is_valid_keyword(s: &str) -> bool {
    KEYWORD_RE.is_match(s)
}

/// Stream names go into the query string unescaped, same as keywords.
pub fn is_valid_stream(s: &str) -> bool {
    KEYWORD_RE.is_match(s)
}

/// Exactly four dot-separated decimal octets, each within 0–255.
pub fn is_valid_ip(s: &str) -> bool {
    let octets: Vec<&str> = s.split('.').collect();
    octets.len() == 4
        && octets.iter().all(|octet| {
            !octet.is_empty()
                && octet.bytes().all(|b| b.is_ascii_digit())
                && octet.parse::<u8>().is_ok()
        })
}

/// Base-10 integer in `1..=65535`. Anything that does not parse is invalid.
pub fn is_valid_port(s: &str) -> bool {
    parse_port(s).is_some()
}

fn parse_port(s: &str) -> Option<u16> {
    match s.trim().parse::<i64>() {
        Ok(n) if (1..=65535).contains(&n) => u16::try_from(n).ok(),
        _ => None,
    }
}

/// Result of [`check_line_count`]: the value to send, plus a warning when it
/// had to be clamped.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LineCount {
    pub value: u64,
    pub clamp: Option<ClampWarning>,
}

/// Non-numeric or `<= 0` is rejected. Above `ceiling` (including values too
/// large for `u64`) is clamped to `ceiling` with a warning.
pub fn check_line_count(s: &str, ceiling: u64) -> Result<LineCount, ValidationError> {
    let trimmed = s.trim();
    let clamped = || LineCount {
        value: ceiling,
        clamp: Some(ClampWarning {
            requested: trimmed.to_string(),
            ceiling,
        }),
    };

    match trimmed.parse::<u64>() {
        Ok(0) => Err(ValidationError::LineCount),
        Ok(n) if n > ceiling => Ok(clamped()),
        Ok(n) => Ok(LineCount {
            value: n,
            clamp: None,
        }),
        Err(e) if *e.kind() == IntErrorKind::PosOverflow => Ok(clamped()),
        Err(_) => Err(ValidationError::LineCount),
    }
}

// ---------------------------------------------------------------------------
// Form validation
// ---------------------------------------------------------------------------

/// Line-count limits for a deployment.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LineLimits {
    /// Used when the line-count field is empty.
    pub default_lines: u64,
    pub ceiling: u64,
}

impl Default for LineLimits {
    fn default() -> Self {
        Self {
            default_lines: 100,
            ceiling: 100_000_000,
        }
    }
}

/// Raw, unvalidated form input, exactly as typed.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct QueryForm {
    pub host: String,
    pub port: String,
    pub filename: String,
    pub keyword: String,
    pub lines: String,
    pub stream: String,
}

/// A query that passed validation, with the clamp warning (if any) that must
/// be shown next to its results.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidatedQuery {
    pub query: LogQuery,
    pub clamp: Option<ClampWarning>,
}

impl QueryForm {
    /// Check fields in order host, port, filename, keyword, stream, line
    /// count, stopping at the first failure.
    pub fn validate(&self, limits: &LineLimits) -> Result<ValidatedQuery, ValidationError> {
        let host = match self.host.trim() {
            "" | DEFAULT_HOST => DEFAULT_HOST.to_string(),
            ip if is_valid_ip(ip) => ip.to_string(),
            _ => return Err(ValidationError::Address),
        };

        let port = parse_port(&self.port).ok_or(ValidationError::Port)?;

        if !is_valid_filename(&self.filename) {
            return Err(ValidationError::Filename);
        }
        if !is_valid_keyword(&self.keyword) {
            return Err(ValidationError::Keyword);
        }
        if !is_valid_stream(&self.stream) {
            return Err(ValidationError::Stream);
        }

        let lines = if self.lines.trim().is_empty() {
            LineCount {
                value: limits.default_lines.min(limits.ceiling),
                clamp: None,
            }
        } else {
            check_line_count(&self.lines, limits.ceiling)?
        };

        Ok(ValidatedQuery {
            query: LogQuery {
                host,
                port,
                filename: self.filename.clone(),
                keyword: self.keyword.clone(),
                max_lines: lines.value,
                stream: self.stream.clone(),
            },
            clamp: lines.clamp,
        })
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
