//! Page bar widget: the row of page controls under the log page.
//!
//! Draws the [`PageControl`]s computed by the session: an optional first-page
//! jump and ellipsis, up to five numbered pages, and an optional ellipsis and
//! last-page jump. The current page is highlighted and ellipses are inert.
//!
//! # Navigation (when the bar is focused)
//!
//! | Key | Action |
//! |-----|--------|
//! | `←` / `h` | Select the previous activatable control |
//! | `→` / `l` | Select the next activatable control |
//! | `Enter` | Activate the selected control (handled by the app shell) |

use crate::event::{AppEvent, Direction};
use crate::theme::Theme;
use logview_core::{ControlKind, PageControl};
use ratatui::{
    buffer::Buffer,
    layout::Rect,
    text::{Line, Span},
    widgets::Widget,
};

// ---------------------------------------------------------------------------
// State
// ---------------------------------------------------------------------------

/// Cursor over the current control list. Controls are rebuilt on every page
/// change, so the cursor is an index that the app re-seats with [`reset`].
///
/// [`reset`]: PageBarState::reset
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct PageBarState {
    pub selected: usize,
}

impl PageBarState {
    /// Put the cursor on the current page's control.
    pub fn reset(&mut self, controls: &[PageControl]) {
        self.selected = controls.iter().position(|c| c.active).unwrap_or(0);
    }

    /// The control under the cursor, if it can be activated.
    pub fn selected_control<'c>(&self, controls: &'c [PageControl]) -> Option<&'c PageControl> {
        controls.get(self.selected).filter(|c| c.is_activatable())
    }

    /// Move the cursor left or right, skipping ellipses.
    pub fn handle(&mut self, event: &AppEvent, controls: &[PageControl]) {
        let next = match event {
            AppEvent::Nav(Direction::Left) => controls[..self.selected.min(controls.len())]
                .iter()
                .rposition(PageControl::is_activatable),
            AppEvent::Nav(Direction::Right) => controls
                .iter()
                .enumerate()
                .skip(self.selected + 1)
                .find(|(_, c)| c.is_activatable())
                .map(|(i, _)| i),
            _ => None,
        };
        if let Some(index) = next {
            self.selected = index;
            tracing::debug!(selected = index, "page bar: cursor moved");
        }
    }
}

// ---------------------------------------------------------------------------
// Widget
// ---------------------------------------------------------------------------

pub struct PageBar<'a> {
    state: &'a PageBarState,
    controls: &'a [PageControl],
    summary: String,
    focused: bool,
    theme: &'a Theme,
}

impl<'a> PageBar<'a> {
    pub fn new(
        state: &'a PageBarState,
        controls: &'a [PageControl],
        summary: String,
        focused: bool,
        theme: &'a Theme,
    ) -> Self {
        Self {
            state,
            controls,
            summary,
            focused,
            theme,
        }
    }

    fn control_span(&self, index: usize, control: &'a PageControl) -> Span<'a> {
        let mut style = match control.kind {
            ControlKind::Ellipsis => self.theme.pager_ellipsis,
            _ if control.active => self.theme.pager_active,
            _ => self.theme.pager_page,
        };
        if self.focused && index == self.state.selected && control.is_activatable() {
            style = style.patch(self.theme.pager_selected);
        }
        Span::styled(format!(" {} ", control.label), style)
    }
}

impl Widget for PageBar<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        if area.height == 0 {
            return;
        }
        let spans: Vec<Span> = self
            .controls
            .iter()
            .enumerate()
            .map(|(i, c)| self.control_span(i, c))
            .collect();
        buf.set_line(area.x, area.y, &Line::from(spans), area.width);

        let summary = format!(" {} ", self.summary);
        let width = summary.chars().count() as u16;
        if width < area.width {
            buf.set_string(
                area.right() - width,
                area.y,
                summary,
                self.theme.pager_summary,
            );
        }
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use logview_core::pagination::page_controls;

    fn row(buf: &Buffer) -> String {
        (0..buf.area.width).map(|x| buf[(x, 0)].symbol()).collect()
    }

    #[test]
    fn reset_selects_active_page() {
        let controls = page_controls(6, 10);
        let mut state = PageBarState::default();
        state.reset(&controls);
        assert!(controls[state.selected].active);
        assert_eq!(controls[state.selected].target, Some(6));
    }

    #[test]
    fn cursor_skips_ellipses() {
        // [1] [...] [4 5 6 7 8] [...] [10]
        let controls = page_controls(6, 10);
        let mut state = PageBarState::default();
        state.reset(&controls);
        for _ in 0..3 {
            state.handle(&AppEvent::Nav(Direction::Left), &controls);
        }
        assert_eq!(state.selected_control(&controls).and_then(|c| c.target), Some(1));
        state.handle(&AppEvent::Nav(Direction::Left), &controls);
        assert_eq!(state.selected_control(&controls).and_then(|c| c.target), Some(1));

        for _ in 0..10 {
            state.handle(&AppEvent::Nav(Direction::Right), &controls);
        }
        let last = state.selected_control(&controls).map(|c| (c.kind, c.target));
        assert_eq!(last, Some((ControlKind::Last, Some(10))));
    }

    #[test]
    fn empty_controls_select_nothing() {
        let mut state = PageBarState::default();
        state.reset(&[]);
        state.handle(&AppEvent::Nav(Direction::Right), &[]);
        assert_eq!(state.selected_control(&[]), None);
    }

    #[test]
    fn renders_labels_in_order() {
        let theme = Theme::load_default();
        let controls = page_controls(6, 10);
        let state = PageBarState::default();
        let area = Rect::new(0, 0, 80, 1);
        let mut buf = Buffer::empty(area);
        PageBar::new(&state, &controls, "page 6/10".to_string(), false, &theme)
            .render(area, &mut buf);
        let text = row(&buf);
        assert!(
            text.starts_with(" 1  ...  4  5  6  7  8  ...  10 "),
            "row was {text:?}"
        );
        assert!(text.trim_end().ends_with("page 6/10"));
    }

    #[test]
    fn active_page_uses_active_style() {
        let theme = Theme::load_default();
        let controls = page_controls(1, 3);
        let state = PageBarState::default();
        let area = Rect::new(0, 0, 40, 1);
        let mut buf = Buffer::empty(area);
        PageBar::new(&state, &controls, String::new(), false, &theme).render(area, &mut buf);
        // " 1 " occupies columns 0..3
        assert_eq!(buf[(1, 0)].symbol(), "1");
        assert_eq!(buf[(1, 0)].bg, theme.pager_active.bg.unwrap_or_default());
    }
}
