//! Domain-specific assertion macros for logview harnesses.
//!
//! These wrap `pretty_assertions` and add context-rich failure messages that
//! make it clear *which* page, line or control was wrong.

use logview::core::{LogLineSet, PageRender};

// ---------------------------------------------------------------------------
// Page assertions
// ---------------------------------------------------------------------------

/// Assert that a rendered page shows exactly the absolute line numbers in
/// `$range`, in order.
///
/// ```rust
/// assert_page_lines!(render, 401..=450);
/// ```
#[macro_export]
macro_rules! assert_page_lines {
    ($page:expr, $range:expr) => {{
        let page: &logview::core::PageRender = &$page;
        let actual: Vec<usize> = page.lines.iter().map(|l| l.number).collect();
        let expected: Vec<usize> = ($range).collect();
        if actual != expected {
            panic!(
                "assert_page_lines! failed on page {}/{}:\n  expected: {:?}\n  actual:   {:?}",
                page.page,
                page.total_pages,
                expected,
                actual
            );
        }
    }};
}

/// Assert the text form of a control bar, as printed by headless mode.
///
/// ```rust
/// assert_controls!(page_controls(6, 10), "«1 ... 4 5 [6] 7 8 ... »10");
/// ```
#[macro_export]
macro_rules! assert_controls {
    ($controls:expr, $expected:expr) => {{
        let actual = logview::headless::format_controls(&$controls);
        pretty_assertions::assert_eq!(actual, $expected, "page-control bar mismatch");
    }};
}

/// Assert that a line set holds exactly the given lines.
#[macro_export]
macro_rules! assert_lines {
    ($set:expr, $expected:expr) => {{
        let set: &logview::core::LogLineSet = &$set;
        let actual: Vec<&str> = set.iter().map(String::as_str).collect();
        let expected: Vec<&str> = $expected.iter().map(|s| &**s).collect();
        pretty_assertions::assert_eq!(actual, expected, "line set mismatch");
    }};
}

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

/// The texts shown on a rendered page.
pub fn page_texts<'a>(page: &PageRender<'a>) -> Vec<&'a str> {
    page.lines.iter().map(|l| l.text).collect()
}

/// Assert that every page of `lines` at `page_size` concatenates back to
/// the original set, with nothing dropped, duplicated or reordered.
pub fn assert_pages_cover(lines: &LogLineSet, page_size: usize) {
    use logview::core::{pagination, PageView};

    let total = pagination::total_pages(lines.len(), page_size);
    let mut seen = Vec::with_capacity(lines.len());
    for page in 1..=total {
        let render = pagination::render(lines, PageView::new(page_size).at(page));
        assert!(
            render.lines.len() <= page_size,
            "page {page} holds {} lines, more than the page size {page_size}",
            render.lines.len()
        );
        seen.extend(page_texts(&render));
    }
    let original: Vec<&str> = lines.iter().map(String::as_str).collect();
    pretty_assertions::assert_eq!(seen, original, "pages do not cover the line set");
}
