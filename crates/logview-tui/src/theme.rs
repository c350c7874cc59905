//! Colour theme for the logview TUI.
//!
//! Themes are defined as TOML files. Both shipped themes are embedded in the
//! binary via [`include_str!`] so the application works without any files on
//! disk. Resolve the configured name once at startup with [`Theme::by_name`]
//! and pass the result through the application as a shared reference.
//!
//! # Severity styles
//!
//! Every [`Severity`] maps to exactly one style, including
//! [`Severity::Unclassified`], so a themed line never falls back to the
//! terminal default by accident.

use config::{Config, File, FileFormat};
use logview_core::Severity;
use ratatui::style::{Color, Modifier, Style};
use serde::Deserialize;

const DEFAULT_THEME_SRC: &str = include_str!("themes/default.toml");
const GRUVBOX_DARK_THEME_SRC: &str = include_str!("themes/gruvbox_dark.toml");

/// Names accepted by [`Theme::by_name`] and the `:theme` command.
pub const THEME_NAMES: [&str; 2] = ["default", "gruvbox_dark"];

// ---------------------------------------------------------------------------
// Raw (serde) types: mirror the TOML structure
// ---------------------------------------------------------------------------

#[derive(Debug, Deserialize)]
struct RawStyle {
    fg: Option<String>,
    bg: Option<String>,
    #[serde(default)]
    bold: bool,
    #[serde(default)]
    dim: bool,
    #[serde(default)]
    italic: bool,
    #[serde(default)]
    underlined: bool,
    #[serde(default)]
    reversed: bool,
}

impl RawStyle {
    fn into_style(self) -> Style {
        let mut style = Style::default();
        if let Some(c) = self.fg.as_deref().and_then(parse_color) {
            style = style.fg(c);
        }
        if let Some(c) = self.bg.as_deref().and_then(parse_color) {
            style = style.bg(c);
        }
        let flags = [
            (self.bold, Modifier::BOLD),
            (self.dim, Modifier::DIM),
            (self.italic, Modifier::ITALIC),
            (self.underlined, Modifier::UNDERLINED),
            (self.reversed, Modifier::REVERSED),
        ];
        for (set, modifier) in flags {
            if set {
                style = style.add_modifier(modifier);
            }
        }
        style
    }
}

#[derive(Debug, Deserialize)]
struct RawSeverity {
    info: RawStyle,
    error: RawStyle,
    debug: RawStyle,
    warn: RawStyle,
    unclassified: RawStyle,
}

#[derive(Debug, Deserialize)]
struct RawBorders {
    focused: RawStyle,
    unfocused: RawStyle,
    command_bar: RawStyle,
}

#[derive(Debug, Deserialize)]
struct RawForm {
    label: RawStyle,
    label_focused: RawStyle,
    value: RawStyle,
}

#[derive(Debug, Deserialize)]
struct RawPager {
    page: RawStyle,
    active: RawStyle,
    selected: RawStyle,
    ellipsis: RawStyle,
    summary: RawStyle,
}

#[derive(Debug, Deserialize)]
struct RawNotice {
    warning: RawStyle,
    error: RawStyle,
}

#[derive(Debug, Deserialize)]
struct RawStatus {
    bar: RawStyle,
    accent: RawStyle,
    line_number: RawStyle,
}

#[derive(Debug, Deserialize)]
struct RawTheme {
    severity: RawSeverity,
    borders: RawBorders,
    form: RawForm,
    pager: RawPager,
    notice: RawNotice,
    status: RawStatus,
}

// ---------------------------------------------------------------------------
// Public Theme type
// ---------------------------------------------------------------------------

/// Application colour theme.
///
/// All styles are pre-resolved ratatui [`Style`] values, so drawing a frame
/// does no parsing or allocation.
#[derive(Debug, Clone, PartialEq)]
pub struct Theme {
    pub severity_info: Style,
    pub severity_error: Style,
    pub severity_debug: Style,
    pub severity_warn: Style,
    pub severity_unclassified: Style,

    /// Border style for the currently focused pane.
    pub border_focused: Style,
    /// Border style for unfocused panes.
    pub border_unfocused: Style,
    pub border_command_bar: Style,

    pub form_label: Style,
    pub form_label_focused: Style,
    pub form_value: Style,

    /// Numbered and jump controls that are not the current page.
    pub pager_page: Style,
    /// The current page's control.
    pub pager_active: Style,
    /// The control under the page-bar cursor while the bar has focus.
    pub pager_selected: Style,
    pub pager_ellipsis: Style,
    pub pager_summary: Style,

    /// Clamp warnings shown alongside results.
    pub notice_warning: Style,
    /// Validation and fetch failures.
    pub notice_error: Style,

    pub status_bar: Style,
    pub status_accent: Style,
    pub line_number: Style,
}

impl Theme {
    /// Load and parse the embedded default theme.
    ///
    /// # Panics
    ///
    /// Panics if the embedded TOML is malformed. The file ships inside the
    /// binary and is covered by the unit tests below.
    pub fn load_default() -> Self {
        Self::from_toml_str(DEFAULT_THEME_SRC).expect("embedded default theme must be valid TOML")
    }

    /// Load and parse the embedded Gruvbox Dark theme.
    ///
    /// # Panics
    ///
    /// Panics if the embedded TOML is malformed.
    pub fn load_gruvbox_dark() -> Self {
        Self::from_toml_str(GRUVBOX_DARK_THEME_SRC)
            .expect("embedded gruvbox dark theme must be valid TOML")
    }

    /// Resolve a theme by its configured name. Unknown names yield `None`.
    pub fn by_name(name: &str) -> Option<Self> {
        match name.trim().to_ascii_lowercase().replace('-', "_").as_str() {
            "default" => Some(Self::load_default()),
            "gruvbox_dark" | "gruvbox" => Some(Self::load_gruvbox_dark()),
            _ => None,
        }
    }

    /// Parse a theme from a TOML string.
    ///
    /// Unknown keys are ignored so older binaries can read newer theme files.
    pub fn from_toml_str(src: &str) -> anyhow::Result<Self> {
        let raw: RawTheme = Config::builder()
            .add_source(File::from_str(src, FileFormat::Toml))
            .build()?
            .try_deserialize()?;

        Ok(Self {
            severity_info: raw.severity.info.into_style(),
            severity_error: raw.severity.error.into_style(),
            severity_debug: raw.severity.debug.into_style(),
            severity_warn: raw.severity.warn.into_style(),
            severity_unclassified: raw.severity.unclassified.into_style(),
            border_focused: raw.borders.focused.into_style(),
            border_unfocused: raw.borders.unfocused.into_style(),
            border_command_bar: raw.borders.command_bar.into_style(),
            form_label: raw.form.label.into_style(),
            form_label_focused: raw.form.label_focused.into_style(),
            form_value: raw.form.value.into_style(),
            pager_page: raw.pager.page.into_style(),
            pager_active: raw.pager.active.into_style(),
            pager_selected: raw.pager.selected.into_style(),
            pager_ellipsis: raw.pager.ellipsis.into_style(),
            pager_summary: raw.pager.summary.into_style(),
            notice_warning: raw.notice.warning.into_style(),
            notice_error: raw.notice.error.into_style(),
            status_bar: raw.status.bar.into_style(),
            status_accent: raw.status.accent.into_style(),
            line_number: raw.status.line_number.into_style(),
        })
    }

    /// Return the [`Style`] for a line of the given [`Severity`].
    pub fn severity_style(&self, severity: Severity) -> Style {
        match severity {
            Severity::Info => self.severity_info,
            Severity::Error => self.severity_error,
            Severity::Debug => self.severity_debug,
            Severity::Warn => self.severity_warn,
            Severity::Unclassified => self.severity_unclassified,
        }
    }

    /// Border style for a pane, depending on whether it has focus.
    pub fn border(&self, focused: bool) -> Style {
        if focused {
            self.border_focused
        } else {
            self.border_unfocused
        }
    }
}

impl Default for Theme {
    fn default() -> Self {
        Self::load_default()
    }
}

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

/// Parse a colour name into a ratatui [`Color`].
///
/// Accepts:
/// - Named terminal colours (case-insensitive): `red`, `dark_gray`, etc.
/// - `reset` for the terminal's own foreground/background
/// - Hex RGB: `#rrggbb`
/// - 256-colour indexed: `indexed:N`
fn parse_color(s: &str) -> Option<Color> {
    match s.to_ascii_lowercase().as_str() {
        "reset" => Some(Color::Reset),
        "black" => Some(Color::Black),
        "red" => Some(Color::Red),
        "green" => Some(Color::Green),
        "yellow" => Some(Color::Yellow),
        "blue" => Some(Color::Blue),
        "magenta" => Some(Color::Magenta),
        "cyan" => Some(Color::Cyan),
        "gray" | "grey" => Some(Color::Gray),
        "dark_gray" | "darkgray" | "dark_grey" | "darkgrey" => Some(Color::DarkGray),
        "light_red" => Some(Color::LightRed),
        "light_green" => Some(Color::LightGreen),
        "light_yellow" => Some(Color::LightYellow),
        "light_blue" => Some(Color::LightBlue),
        "light_magenta" => Some(Color::LightMagenta),
        "light_cyan" => Some(Color::LightCyan),
        "white" => Some(Color::White),
        s if s.starts_with('#') && s.len() == 7 => {
            let r = u8::from_str_radix(&s[1..3], 16).ok()?;
            let g = u8::from_str_radix(&s[3..5], 16).ok()?;
            let b = u8::from_str_radix(&s[5..7], 16).ok()?;
            Some(Color::Rgb(r, g, b))
        }
        s if s.starts_with("indexed:") => {
            let n: u8 = s["indexed:".len()..].parse().ok()?;
            Some(Color::Indexed(n))
        }
        _ => None,
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
