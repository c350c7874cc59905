//! Ratatui widgets for the logview TUI.

pub mod command_bar;
pub mod help;
pub mod log_page;
pub mod page_bar;
pub mod query_form;
pub mod status_line;
pub mod text_field;
pub mod warning_bar;
