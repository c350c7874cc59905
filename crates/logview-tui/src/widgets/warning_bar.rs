//! Warning bar: one row between the form and the log page showing the
//! session's current [`Notice`], or nothing.

use crate::theme::Theme;
use logview_core::Notice;
use ratatui::{buffer::Buffer, layout::Rect, text::Span, widgets::Widget};

pub struct WarningBar<'a> {
    notice: Option<&'a Notice>,
    theme: &'a Theme,
}

impl<'a> WarningBar<'a> {
    pub fn new(notice: Option<&'a Notice>, theme: &'a Theme) -> Self {
        Self { notice, theme }
    }
}

impl Widget for WarningBar<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let Some(notice) = self.notice else {
            return;
        };
        let style = if notice.is_error() {
            self.theme.notice_error
        } else {
            self.theme.notice_warning
        };
        buf.set_style(area, style);
        buf.set_span(area.x, area.y, &Span::styled(format!(" {notice} "), style), area.width);
    }
}
