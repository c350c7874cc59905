//! Headless mode: validate, fetch once, print one page and exit.
//!
//! The page goes to `out`; the clamp warning and the page-control summary go
//! to `diag` so that piping stdout yields only log lines.
//!
//! # Exit codes
//!
//! | Code | Meaning |
//! |------|---------|
//! | 0 | Page printed (possibly empty) |
//! | 1 | The fetch failed, or output could not be written |
//! | 2 | The query was rejected before any request |

use clap::ValueEnum;
use logview_core::{
    ControlKind, FetchError, LineLimits, Notice, PageControl, QueryForm, Session, ValidationError,
};
use logview_fetch::{build_request_url, LogSource};
use std::io::Write;
use thiserror::Error;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum OutputFormat {
    /// One log line per output line, exactly as received.
    #[default]
    Raw,
    /// One JSON object per line: `{"line": N, "severity": "...", "text": "..."}`.
    Jsonl,
}

#[derive(Debug, Clone)]
pub struct HeadlessOptions {
    pub form: QueryForm,
    pub limits: LineLimits,
    pub page_size: usize,
    /// 1-based; clamped to the pages actually available.
    pub page: usize,
    pub format: OutputFormat,
}

#[derive(Debug, Error)]
pub enum HeadlessError {
    #[error(transparent)]
    Invalid(#[from] ValidationError),
    #[error(transparent)]
    Fetch(#[from] FetchError),
    #[error("writing output: {0}")]
    Io(#[from] std::io::Error),
}

impl HeadlessError {
    pub fn exit_code(&self) -> u8 {
        match self {
            HeadlessError::Invalid(_) => 2,
            HeadlessError::Fetch(_) | HeadlessError::Io(_) => 1,
        }
    }
}

/// Run one headless fetch against `source`.
pub async fn run<S, W, D>(
    source: &S,
    opts: &HeadlessOptions,
    out: &mut W,
    diag: &mut D,
) -> Result<(), HeadlessError>
where
    S: LogSource,
    W: Write,
    D: Write,
{
    let valid = opts.form.validate(&opts.limits)?;
    tracing::debug!(url = %build_request_url(&valid.query), "headless: fetching");

    let mut session = Session::new(opts.page_size);
    let ticket = session.begin_fetch(valid.clamp);
    let result = source.fetch(&valid.query).await;
    session.complete(ticket, result);

    match session.warning() {
        Some(Notice::Failed(err)) => return Err(err.clone().into()),
        Some(notice) => writeln!(diag, "{notice}")?,
        None => {}
    }

    session.go_to(opts.page);
    let page = session.render();
    for line in &page.lines {
        match opts.format {
            OutputFormat::Raw => writeln!(out, "{}", line.text)?,
            OutputFormat::Jsonl => {
                let record = serde_json::json!({
                    "line": line.number,
                    "severity": line.severity.to_string(),
                    "text": line.text,
                });
                writeln!(out, "{record}")?;
            }
        }
    }
    out.flush()?;

    if page.controls.is_empty() {
        writeln!(diag, "{}", page.summary())?;
    } else {
        writeln!(diag, "{} · {}", page.summary(), format_controls(&page.controls))?;
    }
    Ok(())
}

/// Text form of a page-control bar: the current page in brackets, jump
/// controls prefixed with `«` / `»`.
///
/// ```text
/// «1 ... 4 5 [6] 7 8 ... »10
/// ```
pub fn format_controls(controls: &[PageControl]) -> String {
    controls
        .iter()
        .map(|c| match c.kind {
            ControlKind::First => format!("«{}", c.label),
            ControlKind::Last => format!("»{}", c.label),
            ControlKind::Page if c.active => format!("[{}]", c.label),
            ControlKind::Page | ControlKind::Ellipsis => c.label.clone(),
        })
        .collect::<Vec<_>>()
        .join(" ")
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
