//! Paginator: turns the resident line set and a page cursor into the lines
//! to show and a declarative set of page controls.
//!
//! Nothing here draws anything. Rendering adapters (the TUI page bar, the
//! headless summary) consume [`PageRender`] and decide how it looks.
//!
//! # Control window
//!
//! At most [`MAX_PAGES_TO_SHOW`] numbered controls are shown, centred on the
//! current page where possible:
//!
//! ```text
//! start = max(1, page - 2)
//! end   = min(total, start + 4)
//! if the window came up short because end hit total:
//!     start = max(1, end - 4)
//! ```
//!
//! A `First` control and an ellipsis precede the window when `start > 2`; an
//! ellipsis and a `Last` control follow it when `end < total - 1`.

use crate::types::{LogLineSet, PageView, Severity};
use std::ops::Range;

/// Maximum number of numbered page controls in the window.
pub const MAX_PAGES_TO_SHOW: usize = 5;

/// Label used for the gap markers on either side of the window.
pub const ELLIPSIS: &str = "...";

/// `ceil(len / page_size)`. A zero page size yields zero pages.
pub fn total_pages(len: usize, page_size: usize) -> usize {
    if page_size == 0 {
        0
    } else {
        len.div_ceil(page_size)
    }
}

/// Index range of the lines on `page`, clamped to `0..len`.
///
/// Pages past the end produce an empty range rather than an error.
pub fn visible_range(len: usize, page: usize, page_size: usize) -> Range<usize> {
    let start = (page.max(1) - 1).saturating_mul(page_size).min(len);
    let end = start.saturating_add(page_size).min(len);
    start..end
}

/// Inclusive range of page numbers shown as numbered controls.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageWindow {
    pub start: usize,
    pub end: usize,
}

/// Compute the numbered-control window, or `None` when there are no pages.
pub fn page_window(page: usize, total_pages: usize) -> Option<PageWindow> {
    if total_pages == 0 {
        return None;
    }
    let mut start = page.saturating_sub(MAX_PAGES_TO_SHOW / 2).max(1);
    let full_end = start.saturating_add(MAX_PAGES_TO_SHOW - 1);
    let end = total_pages.min(full_end);
    if end < full_end {
        start = (end + 1).saturating_sub(MAX_PAGES_TO_SHOW).max(1);
    }
    Some(PageWindow { start, end })
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ControlKind {
    /// Jump to page 1 from a window that no longer shows it.
    First,
    Page,
    Ellipsis,
    /// Jump to the final page.
    Last,
}

/// One entry of the page-control bar.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PageControl {
    pub kind: ControlKind,
    pub label: String,
    /// Page to show when activated. `None` for ellipses, which are inert.
    pub target: Option<usize>,
    /// True only for the numbered control of the current page.
    pub active: bool,
}

impl PageControl {
    fn page(number: usize, current: usize) -> Self {
        Self {
            kind: ControlKind::Page,
            label: number.to_string(),
            target: Some(number),
            active: number == current,
        }
    }

    fn jump(kind: ControlKind, number: usize) -> Self {
        Self {
            kind,
            label: number.to_string(),
            target: Some(number),
            active: false,
        }
    }

    fn ellipsis() -> Self {
        Self {
            kind: ControlKind::Ellipsis,
            label: ELLIPSIS.to_string(),
            target: None,
            active: false,
        }
    }

    pub fn is_activatable(&self) -> bool {
        self.target.is_some()
    }
}

/// Build the control bar for `page` out of `total_pages`.
pub fn page_controls(page: usize, total_pages: usize) -> Vec<PageControl> {
    let Some(window) = page_window(page, total_pages) else {
        return Vec::new();
    };

    let mut controls = Vec::with_capacity(MAX_PAGES_TO_SHOW + 4);
    if window.start > 2 {
        controls.push(PageControl::jump(ControlKind::First, 1));
        controls.push(PageControl::ellipsis());
    }
    controls.extend((window.start..=window.end).map(|n| PageControl::page(n, page)));
    if window.end + 1 < total_pages {
        controls.push(PageControl::ellipsis());
        controls.push(PageControl::jump(ControlKind::Last, total_pages));
    }
    controls
}

/// A visible line, tagged for styling.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderedLine<'a> {
    /// 1-based position in the whole line set.
    pub number: usize,
    pub text: &'a str,
    pub severity: Severity,
}

/// Everything an adapter needs to draw one page.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PageRender<'a> {
    pub page: usize,
    pub total_pages: usize,
    pub lines: Vec<RenderedLine<'a>>,
    pub controls: Vec<PageControl>,
}

impl PageRender<'_> {
    /// `"page 2/3"`, or `"no lines"` when the set is empty.
    pub fn summary(&self) -> String {
        if self.total_pages == 0 {
            "no lines".to_string()
        } else {
            format!("page {}/{}", self.page, self.total_pages)
        }
    }
}

/// Compute the visible slice and the controls for `view`.
///
/// Classification is advisory; it never reorders or filters lines.
pub fn render(lines: &LogLineSet, view: PageView) -> PageRender<'_> {
    let total = total_pages(lines.len(), view.page_size);
    if total == 0 {
        return PageRender {
            page: view.page.max(1),
            total_pages: 0,
            lines: Vec::new(),
            controls: Vec::new(),
        };
    }

    let range = visible_range(lines.len(), view.page, view.page_size);
    let first_number = range.start + 1;
    let visible = lines.as_slice()[range]
        .iter()
        .enumerate()
        .map(|(offset, text)| RenderedLine {
            number: first_number + offset,
            text: text.as_str(),
            severity: Severity::classify(text),
        })
        .collect();

    PageRender {
        page: view.page.max(1),
        total_pages: total,
        lines: visible,
        controls: page_controls(view.page.max(1), total),
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
