//! Status line: the 1-row strip at the top of the screen.
//!
//! Left: what was last requested and when it arrived. Right: keybinding
//! hints.

use crate::theme::Theme;
use chrono::{DateTime, Local};
use ratatui::{
    buffer::Buffer,
    layout::Rect,
    text::{Line, Span},
    widgets::Widget,
};

const HINTS: &str = " Enter:fetch  n/p:page  ?:help  q:quit ";

/// Facts about the last fetch, owned by the app shell.
#[derive(Debug, Clone, Default)]
pub struct FetchStatus {
    /// Request URL of the latest submitted query.
    pub url: Option<String>,
    /// When the latest successful result arrived.
    pub fetched_at: Option<DateTime<Local>>,
    pub line_count: usize,
    pub loading: bool,
}

pub struct StatusLine<'a> {
    status: &'a FetchStatus,
    theme: &'a Theme,
}

impl<'a> StatusLine<'a> {
    pub fn new(status: &'a FetchStatus, theme: &'a Theme) -> Self {
        Self { status, theme }
    }

    fn detail(&self) -> String {
        let Some(url) = &self.status.url else {
            return "no query yet".to_string();
        };
        if self.status.loading {
            return format!("GET {url} · loading…");
        }
        match self.status.fetched_at {
            Some(at) => format!(
                "GET {url} · {} lines · {}",
                self.status.line_count,
                at.format("%H:%M:%S")
            ),
            None => format!("GET {url}"),
        }
    }
}

impl Widget for StatusLine<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        buf.set_style(area, self.theme.status_bar);
        let line = Line::from(vec![
            Span::styled(" logview ", self.theme.status_accent),
            Span::styled(format!(" {}", self.detail()), self.theme.status_bar),
        ]);
        buf.set_line(area.x, area.y, &line, area.width);

        let hint_width = HINTS.chars().count() as u16;
        if hint_width * 2 < area.width {
            buf.set_string(area.right() - hint_width, area.y, HINTS, self.theme.status_bar);
        }
    }
}
