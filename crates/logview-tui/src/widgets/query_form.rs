//! Query form widget: the six input fields across the top of the screen.
//!
//! # Navigation (when the form is focused)
//!
//! | Key | Action |
//! |-----|--------|
//! | printable, `Backspace`, `←` / `→` | Edit the focused field |
//! | `↑` / `↓` | Previous / next field |
//! | `Enter` | Submit (handled by the app shell) |
//!
//! Fields hold the raw text exactly as typed. Nothing is checked until the
//! form is submitted and turned into a [`QueryForm`].

use crate::event::{AppEvent, Direction};
use crate::theme::Theme;
use crate::widgets::text_field::TextField;
use logview_core::QueryForm;
use ratatui::{
    buffer::Buffer,
    layout::{Constraint, Direction as LayoutDir, Layout, Rect},
    text::{Line, Span},
    widgets::{Block, Paragraph, Widget},
};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FormField {
    Host,
    Port,
    Filename,
    Keyword,
    Lines,
    Stream,
}

impl FormField {
    pub const ALL: [FormField; 6] = [
        FormField::Host,
        FormField::Port,
        FormField::Filename,
        FormField::Keyword,
        FormField::Lines,
        FormField::Stream,
    ];

    pub fn label(self) -> &'static str {
        match self {
            FormField::Host => "host",
            FormField::Port => "port",
            FormField::Filename => "file",
            FormField::Keyword => "keyword",
            FormField::Lines => "lines",
            FormField::Stream => "stream",
        }
    }

    fn placeholder(self) -> &'static str {
        match self {
            FormField::Host => "localhost",
            FormField::Filename => "app.log",
            FormField::Lines => "default",
            FormField::Keyword | FormField::Stream => "any",
            FormField::Port => "",
        }
    }

    fn constraint(self) -> Constraint {
        match self {
            FormField::Host => Constraint::Length(22),
            FormField::Port => Constraint::Length(12),
            FormField::Filename | FormField::Keyword => Constraint::Fill(1),
            FormField::Lines => Constraint::Length(18),
            FormField::Stream => Constraint::Length(18),
        }
    }

    fn index(self) -> usize {
        FormField::ALL.iter().position(|f| *f == self).unwrap_or(0)
    }
}

// ---------------------------------------------------------------------------
// State
// ---------------------------------------------------------------------------

#[derive(Debug, Clone)]
pub struct QueryFormState {
    fields: [TextField; 6],
    /// The field that receives typed characters.
    pub focused: FormField,
}

impl Default for QueryFormState {
    fn default() -> Self {
        Self::from_form(&QueryForm::default())
    }
}

impl QueryFormState {
    /// Pre-fill every field from `form`.
    pub fn from_form(form: &QueryForm) -> Self {
        Self {
            fields: [
                TextField::with_value(form.host.as_str()),
                TextField::with_value(form.port.as_str()),
                TextField::with_value(form.filename.as_str()),
                TextField::with_value(form.keyword.as_str()),
                TextField::with_value(form.lines.as_str()),
                TextField::with_value(form.stream.as_str()),
            ],
            focused: FormField::Filename,
        }
    }

    /// Snapshot of the raw field contents, ready for validation.
    pub fn to_form(&self) -> QueryForm {
        QueryForm {
            host: self.value(FormField::Host).to_string(),
            port: self.value(FormField::Port).to_string(),
            filename: self.value(FormField::Filename).to_string(),
            keyword: self.value(FormField::Keyword).to_string(),
            lines: self.value(FormField::Lines).to_string(),
            stream: self.value(FormField::Stream).to_string(),
        }
    }

    pub fn value(&self, field: FormField) -> &str {
        self.fields[field.index()].as_str()
    }

    pub fn field(&self, field: FormField) -> &TextField {
        &self.fields[field.index()]
    }

    fn field_mut(&mut self, field: FormField) -> &mut TextField {
        &mut self.fields[field.index()]
    }

    /// Advance to the next field. Returns `false` when already on the last.
    pub fn focus_next(&mut self) -> bool {
        match FormField::ALL.get(self.focused.index() + 1) {
            Some(next) => {
                self.focused = *next;
                true
            }
            None => false,
        }
    }

    /// Move to the previous field. Returns `false` when already on the first.
    pub fn focus_prev(&mut self) -> bool {
        match self.focused.index().checked_sub(1) {
            Some(prev) => {
                self.focused = FormField::ALL[prev];
                true
            }
            None => false,
        }
    }

    /// Handle a key event while the form is focused.
    pub fn handle(&mut self, event: &AppEvent) {
        match event {
            AppEvent::Nav(Direction::Up) => {
                self.focus_prev();
            }
            AppEvent::Nav(Direction::Down) => {
                self.focus_next();
            }
            other => {
                let focused = self.focused;
                if self.field_mut(focused).handle(other) {
                    tracing::debug!(
                        field = focused.label(),
                        value = %self.value(focused),
                        "form: edited"
                    );
                }
            }
        }
    }
}

// ---------------------------------------------------------------------------
// Widget
// ---------------------------------------------------------------------------

pub struct QueryFormView<'a> {
    state: &'a QueryFormState,
    focused: bool,
    theme: &'a Theme,
}

impl<'a> QueryFormView<'a> {
    pub fn new(state: &'a QueryFormState, focused: bool, theme: &'a Theme) -> Self {
        Self {
            state,
            focused,
            theme,
        }
    }

    /// Absolute terminal position of the text cursor within this widget's
    /// rendered area. Pass to `frame.set_cursor_position()` after rendering.
    pub fn cursor_position(&self, area: Rect) -> (u16, u16) {
        let inner = Block::bordered().inner(area);
        let field = self.state.focused;
        let cell = field_areas(inner)[field.index()];
        let offset = label_width(field) + self.state.field(field).cursor_col() as u16;
        let x = (cell.x + offset).min(cell.right().saturating_sub(1));
        (x, cell.y)
    }
}

fn field_areas(inner: Rect) -> std::rc::Rc<[Rect]> {
    Layout::default()
        .direction(LayoutDir::Horizontal)
        .constraints(FormField::ALL.map(FormField::constraint))
        .spacing(1)
        .split(inner)
}

/// `label: ` prefix width.
fn label_width(field: FormField) -> u16 {
    field.label().len() as u16 + 2
}

impl Widget for QueryFormView<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let block = Block::bordered()
            .title(" Query ")
            .border_style(self.theme.border(self.focused));
        let inner = block.inner(area);
        block.render(area, buf);

        let cells = field_areas(inner);
        for (field, cell) in FormField::ALL.into_iter().zip(cells.iter()) {
            let is_focused = self.focused && field == self.state.focused;
            let label_style = if is_focused {
                self.theme.form_label_focused
            } else {
                self.theme.form_label
            };
            let value = self.state.value(field);
            let value_span = if value.is_empty() && !is_focused {
                Span::styled(field.placeholder(), self.theme.form_label)
            } else {
                Span::styled(value, self.theme.form_value)
            };
            let line = Line::from(vec![
                Span::styled(format!("{}: ", field.label()), label_style),
                value_span,
            ]);
            Paragraph::new(line).render(*cell, buf);
        }
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
