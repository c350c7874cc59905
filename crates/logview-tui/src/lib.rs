//! logview TUI: ratatui application shell.
//!
//! The shell owns the terminal and a tokio runtime. Fetches run on the
//! runtime; everything else (validation, paging, drawing) happens on the
//! UI thread against the [`Session`](logview_core::Session).

pub mod app;
pub mod commands;
pub mod event;
pub mod theme;
pub mod widgets;

pub use app::App;

use logview_core::{config::Config, QueryForm};
use logview_fetch::HttpLogSource;

/// Start the interactive viewer.
///
/// `form` pre-fills the query form. When it already names a file the first
/// fetch is submitted immediately.
pub fn run(config: Config, form: QueryForm) -> anyhow::Result<()> {
    let runtime = tokio::runtime::Runtime::new()?;
    let _guard = runtime.enter();

    let theme = theme::Theme::by_name(&config.ui.theme).unwrap_or_else(|| {
        tracing::warn!(theme = %config.ui.theme, "unknown theme, using default");
        theme::Theme::load_default()
    });
    let source = HttpLogSource::new().with_timeout(config.fetch.request_timeout());

    let mut app = App::new(config, &form, theme, runtime.handle().clone(), source);
    if !form.filename.is_empty() {
        app.submit();
    }
    app.run()
}
