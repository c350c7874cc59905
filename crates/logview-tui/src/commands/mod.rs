//! `:` commands typed into the command bar.
//!
//! | Command | Action |
//! |---------|--------|
//! | `q`, `quit` | Quit |
//! | `help` | Toggle the help popup |
//! | `fetch` | Submit the query form |
//! | `page <n>` | Go to page `n` (clamped to the available pages) |
//! | `first`, `last` | Go to the first / last page |
//! | `pagesize <n>` | Lines per page; returns to page 1 |
//! | `theme <name>` | Switch theme (`default`, `gruvbox_dark`) |
//! | `ln`, `numbers` | Toggle the line-number gutter |

use crate::{
    app::{AppState, Effect},
    theme::{Theme, THEME_NAMES},
};

/// A parsed, validated command ready to be executed by the app shell.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    Quit,
    Help,
    Fetch,
    Page(usize),
    First,
    Last,
    PageSize(usize),
    Theme(String),
    LineNumbers,
}

impl Command {
    /// Parse a raw command string (the text after the `:` prefix).
    ///
    /// Returns `Ok(cmd)` on success, `Err(message)` on failure. An empty
    /// string returns `Err("")` as a sentinel meaning "close without acting".
    pub fn parse(input: &str) -> Result<Command, String> {
        let input = input.trim();
        if input.is_empty() {
            return Err(String::new());
        }

        let (word, rest) = input
            .split_once(char::is_whitespace)
            .map(|(w, r)| (w, r.trim()))
            .unwrap_or((input, ""));

        match word {
            "q" | "quit" => Ok(Command::Quit),
            "help" => Ok(Command::Help),
            "fetch" => Ok(Command::Fetch),
            "first" => Ok(Command::First),
            "last" => Ok(Command::Last),
            "ln" | "numbers" => Ok(Command::LineNumbers),
            "page" => parse_positive(rest)
                .map(Command::Page)
                .ok_or_else(|| "usage: page <n>, n ≥ 1".to_string()),
            "pagesize" => parse_positive(rest)
                .map(Command::PageSize)
                .ok_or_else(|| "usage: pagesize <n>, n ≥ 1".to_string()),
            "theme" => {
                if rest.is_empty() {
                    Err(format!("usage: theme <{}>", THEME_NAMES.join("|")))
                } else if Theme::by_name(rest).is_none() {
                    Err(format!("unknown theme: {rest}"))
                } else {
                    Ok(Command::Theme(rest.to_string()))
                }
            }
            other => Err(format!("unknown command: {other}")),
        }
    }
}

fn parse_positive(s: &str) -> Option<usize> {
    s.parse::<usize>().ok().filter(|n| *n > 0)
}

/// Execute a parsed [`Command`] against the application state.
pub fn execute_command(s: &mut AppState, cmd: Command) -> Effect {
    match cmd {
        Command::Quit => s.quit = true,
        Command::Help => s.show_help = !s.show_help,
        Command::Fetch => return Effect::Fetch,
        Command::Page(n) => {
            s.session.go_to(n);
            s.page_changed();
        }
        Command::First => {
            s.session.first_page();
            s.page_changed();
        }
        Command::Last => {
            s.session.last_page();
            s.page_changed();
        }
        Command::PageSize(n) => {
            s.session.set_page_size(n);
            s.page_changed();
        }
        Command::Theme(name) => {
            if let Some(theme) = Theme::by_name(&name) {
                s.theme = theme;
            }
        }
        Command::LineNumbers => {
            s.log_page.show_line_numbers = !s.log_page.show_line_numbers;
        }
    }
    Effect::None
}
