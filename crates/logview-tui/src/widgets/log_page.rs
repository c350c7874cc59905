//! Log page widget: the lines of the current page, coloured by severity.
//!
//! # Navigation (when pane is focused)
//!
//! | Key | Action |
//! |-----|--------|
//! | `↑` / `k` | Scroll up one line |
//! | `↓` / `j` | Scroll down one line |
//! | `Ctrl+u` | Scroll up half a screen |
//! | `Ctrl+d` | Scroll down half a screen |
//!
//! Scrolling moves within one page only. Crossing to another page is a
//! session operation and resets the scroll.

use std::cell::Cell;

use crate::event::{AppEvent, Direction};
use crate::theme::Theme;
use logview_core::{PageRender, RenderedLine};
use ratatui::{
    buffer::Buffer,
    layout::Rect,
    text::{Line, Span},
    widgets::{
        Block, Paragraph, Scrollbar, ScrollbarOrientation, ScrollbarState, StatefulWidget, Widget,
    },
};

// ---------------------------------------------------------------------------
// State
// ---------------------------------------------------------------------------

#[derive(Debug)]
pub struct LogPageState {
    /// Index of the first visible line within the page.
    pub scroll: usize,
    /// Whether the absolute line number gutter is drawn.
    pub show_line_numbers: bool,
    /// Lines on the current page, refreshed on every draw.
    page_len: Cell<usize>,
    /// Cached from the last render so `handle()` can clamp and half-page.
    last_height: Cell<usize>,
}

impl Default for LogPageState {
    fn default() -> Self {
        Self::new(true)
    }
}

impl LogPageState {
    pub fn new(show_line_numbers: bool) -> Self {
        Self {
            scroll: 0,
            show_line_numbers,
            page_len: Cell::new(0),
            last_height: Cell::new(20),
        }
    }

    /// Back to the top of the page. Call whenever the page changes.
    pub fn reset(&mut self) {
        self.scroll = 0;
    }

    fn height(&self) -> usize {
        self.last_height.get().max(1)
    }

    fn max_scroll(&self) -> usize {
        self.page_len.get().saturating_sub(self.height())
    }

    pub fn handle(&mut self, event: &AppEvent) {
        let before = self.scroll;
        match event {
            AppEvent::Nav(Direction::Up) => self.scroll = self.scroll.saturating_sub(1),
            AppEvent::Nav(Direction::Down) => {
                self.scroll = (self.scroll + 1).min(self.max_scroll())
            }
            AppEvent::ScrollUp => self.scroll = self.scroll.saturating_sub(self.height() / 2),
            AppEvent::ScrollDown => {
                self.scroll = (self.scroll + self.height() / 2).min(self.max_scroll())
            }
            _ => return,
        }
        if self.scroll != before {
            tracing::debug!(scroll = self.scroll, "log page: scrolled");
        }
    }
}

// ---------------------------------------------------------------------------
// Widget
// ---------------------------------------------------------------------------

pub struct LogPage<'a> {
    state: &'a LogPageState,
    page: &'a PageRender<'a>,
    loading: bool,
    focused: bool,
    theme: &'a Theme,
}

impl<'a> LogPage<'a> {
    pub fn new(
        state: &'a LogPageState,
        page: &'a PageRender<'a>,
        loading: bool,
        focused: bool,
        theme: &'a Theme,
    ) -> Self {
        Self {
            state,
            page,
            loading,
            focused,
            theme,
        }
    }
}

impl Widget for LogPage<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let title = format!(" Logs · {} ", self.page.summary());
        let block = Block::bordered()
            .title(title)
            .border_style(self.theme.border(self.focused));
        let inner = block.inner(area);
        block.render(area, buf);

        let height = inner.height as usize;
        let total = self.page.lines.len();
        self.state.last_height.set(height);
        self.state.page_len.set(total);

        if total == 0 {
            let hint = if self.loading {
                "Loading…"
            } else {
                "No lines to show. Fill in the query and press Enter."
            };
            Paragraph::new(Span::styled(hint, self.theme.form_label)).render(inner, buf);
            return;
        }

        let start = self.state.scroll.min(total.saturating_sub(height));
        let end = (start + height).min(total);
        if start == end {
            return;
        }
        // Widest absolute number on this page sets the gutter.
        let gutter = self.page.lines[end - 1].number.to_string().len();

        let lines: Vec<Line> = self.page.lines[start..end]
            .iter()
            .map(|line| self.render_line(line, gutter))
            .collect();

        let text_area = Rect {
            width: inner.width.saturating_sub(1),
            ..inner
        };
        let sb_area = Rect {
            x: inner.right().saturating_sub(1),
            width: 1,
            ..inner
        };
        Paragraph::new(lines).render(text_area, buf);

        if total > height {
            let mut sb_state = ScrollbarState::new(total)
                .position(start)
                .viewport_content_length(height);
            StatefulWidget::render(
                Scrollbar::new(ScrollbarOrientation::VerticalRight)
                    .begin_symbol(None)
                    .end_symbol(None),
                sb_area,
                buf,
                &mut sb_state,
            );
        }
    }
}

impl LogPage<'_> {
    fn render_line<'l>(&self, line: &RenderedLine<'l>, gutter: usize) -> Line<'l> {
        let text = Span::styled(line.text, self.theme.severity_style(line.severity));
        if self.state.show_line_numbers {
            Line::from(vec![
                Span::styled(format!("{:>gutter$} │ ", line.number), self.theme.line_number),
                text,
            ])
        } else {
            Line::from(text)
        }
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
