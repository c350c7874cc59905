//! Static log corpora used across harnesses.

use logview::core::{LogLineSet, Severity};

/// Representative lines with the severity each one must classify as.
///
/// Covers every token, lines carrying two tokens (priority order decides),
/// lowercase tokens (never matched) and tokens embedded in longer words.
pub const CORPUS_SEVERITY: &[(&str, Severity)] = &[
    ("2024-01-15 10:00:00 INFO  Starting application version 2.4.1", Severity::Info),
    ("2024-01-15 10:00:01 ERROR Failed to connect to database", Severity::Error),
    ("10:00:05.123 [main] DEBUG o.s.w.s.DispatcherServlet - Initializing", Severity::Debug),
    ("[2024-01-15T10:00:03Z] WARN: Disk usage at 92% on /dev/sda1", Severity::Warn),
    ("[2024-01-15T10:00:03Z] WARNING: deprecated flag", Severity::Warn),
    ("INFO retry after ERROR from upstream", Severity::Info),
    ("ERROR while handling DEBUG endpoint", Severity::Error),
    ("DEBUG before WARN", Severity::Debug),
    ("level=info msg=\"lowercase is not a token\"", Severity::Unclassified),
    ("GET /api/v1/users 200 47ms", Severity::Unclassified),
    ("{\"level\":\"ERROR\",\"msg\":\"json lines classify by substring\"}", Severity::Error),
    ("MISINFORMATION campaign detected", Severity::Info),
];

/// `Line 1` … `Line n`.
pub fn numbered_lines(n: usize) -> LogLineSet {
    (1..=n).map(|i| format!("Line {i}")).collect()
}

/// `n` lines cycling through INFO, ERROR, DEBUG, WARN and an unlevelled line.
pub fn mixed_severity_lines(n: usize) -> LogLineSet {
    (1..=n)
        .map(|i| match i % 5 {
            1 => format!("2024-01-15 10:00:{:02} INFO request {i} served", i % 60),
            2 => format!("2024-01-15 10:00:{:02} ERROR request {i} failed", i % 60),
            3 => format!("2024-01-15 10:00:{:02} DEBUG cache probe {i}", i % 60),
            4 => format!("2024-01-15 10:00:{:02} WARN slow request {i}", i % 60),
            _ => format!("GET /healthz {i} 200"),
        })
        .collect()
}

/// Newline-joined body of [`numbered_lines`], with a trailing newline.
pub fn numbered_text(n: usize) -> String {
    let mut body: String = numbered_lines(n)
        .iter()
        .map(|l| format!("{l}\n"))
        .collect();
    if n == 0 {
        body.clear();
    }
    body
}
