//! Core types for logview-core.
//!
//! This module defines the data shared across all layers: the validated
//! [`LogQuery`], the resident [`LogLineSet`], the derived [`Severity`] of a
//! line, and the [`PageView`] cursor.

/// A validated request for one log file. Built fresh per fetch by
/// [`QueryForm::validate`](crate::validate::QueryForm::validate) and
/// discarded afterwards.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LogQuery {
    /// Dotted-quad address, or `localhost` when the form left it empty.
    pub host: String,
    pub port: u16,
    pub filename: String,
    /// Substring filter applied by the server. Empty means "any line".
    pub keyword: String,
    /// Effective line count after clamping to the configured ceiling.
    pub max_lines: u64,
    pub stream: String,
}

/// Ordered log lines in server response order.
///
/// Replaced wholesale on every successful fetch; never appended to.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LogLineSet(Vec<String>);

impl LogLineSet {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn as_slice(&self) -> &[String] {
        &self.0
    }

    pub fn iter(&self) -> std::slice::Iter<'_, String> {
        self.0.iter()
    }

    pub fn into_inner(self) -> Vec<String> {
        self.0
    }
}

impl From<Vec<String>> for LogLineSet {
    fn from(lines: Vec<String>) -> Self {
        Self(lines)
    }
}

impl<S: Into<String>> FromIterator<S> for LogLineSet {
    fn from_iter<I: IntoIterator<Item = S>>(iter: I) -> Self {
        Self(iter.into_iter().map(Into::into).collect())
    }
}

impl<'a> IntoIterator for &'a LogLineSet {
    type Item = &'a String;
    type IntoIter = std::slice::Iter<'a, String>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}

/// Coarse severity of a log line, used only for styling.
///
/// Derived by substring containment, never stored. A line that mentions
/// several level tokens takes the first one in [`Severity::PRIORITY`] order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Severity {
    Info,
    Error,
    Debug,
    Warn,
    Unclassified,
}

impl Severity {
    /// Tokens checked in order; the first contained token wins.
    pub const PRIORITY: [(&'static str, Severity); 4] = [
        ("INFO", Severity::Info),
        ("ERROR", Severity::Error),
        ("DEBUG", Severity::Debug),
        ("WARN", Severity::Warn),
    ];

    /// Classify a raw line. Matching is case-sensitive.
    pub fn classify(line: &str) -> Self {
        Self::PRIORITY
            .iter()
            .find(|(token, _)| line.contains(token))
            .map(|(_, severity)| *severity)
            .unwrap_or(Severity::Unclassified)
    }

    /// Styling tag for adapters that tag lines rather than colour them.
    pub fn tag(self) -> &'static str {
        match self {
            Severity::Info => "log-info",
            Severity::Error => "log-error",
            Severity::Debug => "log-debug",
            Severity::Warn => "log-warn",
            Severity::Unclassified => "log-plain",
        }
    }
}

impl std::fmt::Display for Severity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Severity::Info => write!(f, "INFO"),
            Severity::Error => write!(f, "ERROR"),
            Severity::Debug => write!(f, "DEBUG"),
            Severity::Warn => write!(f, "WARN"),
            Severity::Unclassified => write!(f, "UNCLASSIFIED"),
        }
    }
}

/// The page cursor: 1-based page number plus page size.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageView {
    pub page: usize,
    pub page_size: usize,
}

impl PageView {
    /// A view on page 1. A zero page size is bumped to 1.
    pub fn new(page_size: usize) -> Self {
        Self {
            page: 1,
            page_size: page_size.max(1),
        }
    }

    pub fn at(self, page: usize) -> Self {
        Self {
            page: page.max(1),
            ..self
        }
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
