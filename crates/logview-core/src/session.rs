//! Session: the view-model that owns the resident line set and page cursor.
//!
//! One session per viewer. Every state change goes through a named
//! operation; the UI never edits the line set or the cursor directly.
//!
//! # Fetch sequencing
//!
//! [`Session::begin_fetch`] hands out a [`FetchTicket`]. Only the result
//! carrying the most recent ticket is applied; results of superseded
//! attempts are dropped, so overlapping fetches cannot overwrite newer data
//! with older data.

use crate::error::{ClampWarning, FetchError, ValidationError};
use crate::pagination::{self, PageControl, PageRender};
use crate::types::{LogLineSet, PageView};

/// Identifies one fetch attempt.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FetchTicket(u64);

/// What the warning area currently shows.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Notice {
    Rejected(ValidationError),
    Clamped(ClampWarning),
    Failed(FetchError),
}

impl Notice {
    /// Clamp warnings accompany results; the others replace them.
    pub fn is_error(&self) -> bool {
        !matches!(self, Notice::Clamped(_))
    }
}

impl std::fmt::Display for Notice {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Notice::Rejected(e) => write!(f, "{e}"),
            Notice::Clamped(w) => write!(f, "{w}"),
            Notice::Failed(e) => write!(f, "{e}"),
        }
    }
}

#[derive(Debug, Clone)]
pub struct Session {
    lines: LogLineSet,
    view: PageView,
    notice: Option<Notice>,
    /// Ticket number of the latest `begin_fetch`.
    latest: u64,
    in_flight: bool,
    /// Clamp warning of the attempt in flight, shown once it succeeds.
    pending_clamp: Option<ClampWarning>,
}

impl Session {
    pub fn new(page_size: usize) -> Self {
        Self {
            lines: LogLineSet::new(),
            view: PageView::new(page_size),
            notice: None,
            latest: 0,
            in_flight: false,
            pending_clamp: None,
        }
    }

    pub fn lines(&self) -> &LogLineSet {
        &self.lines
    }

    pub fn page(&self) -> usize {
        self.view.page
    }

    pub fn page_size(&self) -> usize {
        self.view.page_size
    }

    pub fn total_pages(&self) -> usize {
        pagination::total_pages(self.lines.len(), self.view.page_size)
    }

    pub fn warning(&self) -> Option<&Notice> {
        self.notice.as_ref()
    }

    pub fn is_loading(&self) -> bool {
        self.in_flight
    }

    // -----------------------------------------------------------------------
    // Fetch lifecycle
    // -----------------------------------------------------------------------

    /// Record a pre-flight rejection. Clears the log area; no ticket is issued
    /// and any attempt still in flight is superseded.
    pub fn reject(&mut self, err: ValidationError) {
        tracing::debug!(error = %err, "session: query rejected");
        self.latest += 1;
        self.in_flight = false;
        self.pending_clamp = None;
        self.clear_lines();
        self.notice = Some(Notice::Rejected(err));
    }

    /// Start a fetch attempt. Prior content and warnings are cleared so stale
    /// and new state are never shown together.
    pub fn begin_fetch(&mut self, clamp: Option<ClampWarning>) -> FetchTicket {
        self.latest += 1;
        self.in_flight = true;
        self.clear_lines();
        self.notice = clamp.clone().map(Notice::Clamped);
        self.pending_clamp = clamp;
        tracing::debug!(ticket = self.latest, "session: fetch started");
        FetchTicket(self.latest)
    }

    /// Apply the outcome of a fetch. Returns `false` (and changes nothing)
    /// when `ticket` has been superseded.
    pub fn complete(
        &mut self,
        ticket: FetchTicket,
        result: Result<LogLineSet, FetchError>,
    ) -> bool {
        if ticket.0 != self.latest {
            tracing::debug!(
                ticket = ticket.0,
                latest = self.latest,
                "session: dropping superseded fetch result"
            );
            return false;
        }

        self.in_flight = false;
        let clamp = self.pending_clamp.take();
        match result {
            Ok(lines) => {
                tracing::debug!(lines = lines.len(), "session: lines replaced");
                self.lines = lines;
                self.view = self.view.at(1);
                self.notice = clamp.map(Notice::Clamped);
            }
            Err(err) => {
                tracing::warn!(error = %err, "session: fetch failed");
                self.clear_lines();
                self.notice = Some(Notice::Failed(err));
            }
        }
        true
    }

    fn clear_lines(&mut self) {
        self.lines = LogLineSet::new();
        self.view = self.view.at(1);
    }

    // -----------------------------------------------------------------------
    // Page cursor
    // -----------------------------------------------------------------------

    /// Move to `page`, clamped to the available pages. Never fetches.
    pub fn go_to(&mut self, page: usize) {
        let last = self.total_pages().max(1);
        let page = page.clamp(1, last);
        if page != self.view.page {
            tracing::debug!(from = self.view.page, to = page, "session: page change");
        }
        self.view = self.view.at(page);
    }

    pub fn next_page(&mut self) {
        self.go_to(self.view.page.saturating_add(1));
    }

    pub fn prev_page(&mut self) {
        self.go_to(self.view.page.saturating_sub(1));
    }

    pub fn first_page(&mut self) {
        self.go_to(1);
    }

    pub fn last_page(&mut self) {
        self.go_to(self.total_pages());
    }

    /// Activate a page control. Ellipses are inert. Returns whether the
    /// control had a target.
    pub fn activate(&mut self, control: &PageControl) -> bool {
        match control.target {
            Some(target) => {
                self.go_to(target);
                true
            }
            None => false,
        }
    }

    /// Change the page size and return to page 1.
    pub fn set_page_size(&mut self, page_size: usize) {
        self.view = PageView::new(page_size);
    }

    /// Render the current page from the resident lines.
    pub fn render(&self) -> PageRender<'_> {
        pagination::render(&self.lines, self.view)
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
