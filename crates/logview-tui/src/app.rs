//! Top-level application state and the main event loop.
//!
//! [`App::run`] sets up the terminal, drives the crossterm event loop, and
//! tears everything down cleanly on exit or panic.
//!
//! # Fetching
//!
//! Submitting the form validates it on the UI thread. A valid query gets a
//! [`FetchTicket`] from the session and is handed to the tokio runtime; the
//! result comes back over a channel and is applied between frames. The UI
//! never blocks on the network, and a result whose ticket has been
//! superseded is discarded by the session.

use crate::{
    commands::{execute_command, Command},
    event::{self, AppEvent, Direction},
    theme::Theme,
    widgets::{
        command_bar::{CommandBar, CommandBarState},
        help::HelpPopup,
        log_page::{LogPage, LogPageState},
        page_bar::{PageBar, PageBarState},
        query_form::{FormField, QueryFormState, QueryFormView},
        status_line::{FetchStatus, StatusLine},
        warning_bar::WarningBar,
    },
};
use crossterm::{
    event::{self as ct_event, Event},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use logview_core::{
    config::Config, pagination, FetchError, FetchTicket, LogLineSet, LogQuery, QueryForm, Session,
};
use logview_fetch::{build_request_url, HttpLogSource, LogSource};
use ratatui::{
    backend::CrosstermBackend,
    layout::{Constraint, Direction as LayoutDir, Layout, Rect},
    Frame, Terminal,
};
use std::{io, time::Duration};
use tokio::{
    runtime::Handle,
    sync::mpsc::{unbounded_channel, UnboundedReceiver, UnboundedSender},
};

// ---------------------------------------------------------------------------
// Focus + effects
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Focus {
    /// The query form; the focused field lives in [`QueryFormState`].
    Form,
    Logs,
    Pager,
    /// Vim-style `:` command line is active.
    Command,
}

/// Work the shell must do after a state transition.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Effect {
    None,
    /// Validate the form and start a fetch.
    Fetch,
}

/// The outcome of one fetch attempt, sent back from the runtime.
#[derive(Debug)]
pub struct FetchDone {
    pub ticket: FetchTicket,
    pub result: Result<LogLineSet, FetchError>,
}

// ---------------------------------------------------------------------------
// AppState
// ---------------------------------------------------------------------------

pub struct AppState {
    pub form: QueryFormState,
    pub session: Session,
    pub log_page: LogPageState,
    pub page_bar: PageBarState,
    pub status: FetchStatus,
    pub focus: Focus,
    /// Focus state before entering command mode, restored on exit.
    pub prev_focus: Focus,
    pub theme: Theme,
    pub config: Config,
    pub show_help: bool,
    pub command_bar: CommandBarState,
    pub quit: bool,
}

impl AppState {
    pub fn new(config: Config, form: &QueryForm, theme: Theme) -> Self {
        Self {
            form: QueryFormState::from_form(form),
            session: Session::new(config.ui.page_size),
            log_page: LogPageState::new(config.ui.show_line_numbers),
            page_bar: PageBarState::default(),
            status: FetchStatus::default(),
            focus: Focus::Form,
            prev_focus: Focus::Form,
            theme,
            config,
            show_help: false,
            command_bar: CommandBarState::default(),
            quit: false,
        }
    }

    /// Validate the form. A rejected form is recorded on the session and
    /// yields `None`; a valid one starts an attempt and yields its ticket and
    /// query for the caller to dispatch.
    pub fn prepare_fetch(&mut self) -> Option<(FetchTicket, LogQuery)> {
        let outcome = self.form.to_form().validate(&self.config.fetch.limits());
        let prepared = match outcome {
            Ok(valid) => {
                let ticket = self.session.begin_fetch(valid.clamp);
                let url = build_request_url(&valid.query);
                tracing::debug!(url = %url, "app: fetch submitted");
                self.status = FetchStatus {
                    url: Some(url),
                    loading: true,
                    ..FetchStatus::default()
                };
                Some((ticket, valid.query))
            }
            Err(err) => {
                self.session.reject(err);
                self.status = FetchStatus::default();
                None
            }
        };
        self.page_changed();
        prepared
    }

    /// Apply a finished fetch. Returns `false` if it was superseded.
    pub fn apply(&mut self, done: FetchDone) -> bool {
        let succeeded = done.result.is_ok();
        if !self.session.complete(done.ticket, done.result) {
            return false;
        }
        self.status.loading = false;
        if succeeded {
            self.status.fetched_at = Some(chrono::Local::now());
            self.status.line_count = self.session.lines().len();
        }
        self.page_changed();
        true
    }

    /// Re-seat the per-page cursors after the session's page moved.
    pub fn page_changed(&mut self) {
        self.log_page.reset();
        let controls = pagination::page_controls(self.session.page(), self.session.total_pages());
        self.page_bar.reset(&controls);
    }

    /// Handle one event and report what the shell must do next.
    pub fn handle(&mut self, event: AppEvent) -> Effect {
        // Help popup intercepts all events; only close keys pass through.
        if self.show_help {
            match event {
                AppEvent::Char('?') | AppEvent::Escape => self.show_help = false,
                AppEvent::Quit => self.quit = true,
                _ => {}
            }
            return Effect::None;
        }

        if self.focus == Focus::Command {
            return self.handle_command_bar(event);
        }

        match event {
            AppEvent::Quit => {
                tracing::debug!("quit");
                self.quit = true;
            }

            AppEvent::Char('?') if self.focus != Focus::Form => {
                tracing::debug!("help popup opened");
                self.show_help = true;
            }

            AppEvent::Char(':') if self.focus != Focus::Form => {
                tracing::debug!(prev_focus = ?self.focus, "entering command mode");
                self.prev_focus = self.focus;
                self.command_bar.clear();
                self.focus = Focus::Command;
            }

            AppEvent::FocusNext => self.focus_next(),
            AppEvent::FocusPrev => self.focus_prev(),
            AppEvent::FormFocus => self.focus = Focus::Form,
            AppEvent::Escape if self.focus == Focus::Form => self.focus = Focus::Logs,

            AppEvent::Enter if self.focus == Focus::Form => return Effect::Fetch,
            AppEvent::Enter if self.focus == Focus::Pager => self.activate_selected(),
            AppEvent::Refetch => return Effect::Fetch,

            // Page moves are served from the resident lines
            AppEvent::NextPage => self.move_page(Session::next_page),
            AppEvent::PrevPage => self.move_page(Session::prev_page),
            AppEvent::FirstPage => self.move_page(Session::first_page),
            AppEvent::LastPage => self.move_page(Session::last_page),
            AppEvent::Nav(Direction::Left) if self.focus == Focus::Logs => {
                self.move_page(Session::prev_page)
            }
            AppEvent::Nav(Direction::Right) if self.focus == Focus::Logs => {
                self.move_page(Session::next_page)
            }

            // Terminal resize is handled automatically by ratatui
            AppEvent::Resize(_, _) => {}

            other => self.dispatch_to_focused(other),
        }
        Effect::None
    }

    fn handle_command_bar(&mut self, event: AppEvent) -> Effect {
        match event {
            AppEvent::Escape => {
                tracing::debug!("command bar cancelled");
                self.command_bar.clear();
                self.focus = self.prev_focus;
            }
            AppEvent::Quit => self.quit = true,
            AppEvent::Enter => match Command::parse(self.command_bar.input.as_str()) {
                Ok(cmd) => {
                    tracing::debug!(command = ?cmd, "executing command");
                    self.command_bar.clear();
                    self.focus = self.prev_focus;
                    return execute_command(self, cmd);
                }
                Err(msg) if msg.is_empty() => {
                    self.command_bar.clear();
                    self.focus = self.prev_focus;
                }
                Err(msg) => self.command_bar.error = Some(msg),
            },
            other => self.command_bar.handle(&other),
        }
        Effect::None
    }

    /// Tab order: form fields → log page → page bar → form.
    fn focus_next(&mut self) {
        let current = self.focus;
        let next = match current {
            Focus::Form if self.form.focus_next() => Focus::Form,
            Focus::Form => Focus::Logs,
            Focus::Logs => Focus::Pager,
            Focus::Pager | Focus::Command => {
                self.form.focused = FormField::Host;
                Focus::Form
            }
        };
        tracing::debug!(from = ?current, to = ?next, "focus cycle");
        self.focus = next;
    }

    fn focus_prev(&mut self) {
        let current = self.focus;
        let prev = match current {
            Focus::Form if self.form.focus_prev() => Focus::Form,
            Focus::Form | Focus::Command => Focus::Pager,
            Focus::Pager => Focus::Logs,
            Focus::Logs => {
                self.form.focused = FormField::Stream;
                Focus::Form
            }
        };
        tracing::debug!(from = ?current, to = ?prev, "focus cycle");
        self.focus = prev;
    }

    fn move_page(&mut self, op: fn(&mut Session)) {
        op(&mut self.session);
        self.page_changed();
    }

    fn activate_selected(&mut self) {
        let controls = pagination::page_controls(self.session.page(), self.session.total_pages());
        if let Some(control) = self.page_bar.selected_control(&controls) {
            if self.session.activate(control) {
                self.page_changed();
            }
        }
    }

    /// Route an event to the widget that owns the current focus.
    fn dispatch_to_focused(&mut self, event: AppEvent) {
        match self.focus {
            Focus::Form => self.form.handle(&event),
            Focus::Logs => self.log_page.handle(&event),
            Focus::Pager => {
                let controls =
                    pagination::page_controls(self.session.page(), self.session.total_pages());
                self.page_bar.handle(&event, &controls);
            }
            Focus::Command => {} // handled before dispatch, should not reach here
        }
    }
}

// ---------------------------------------------------------------------------
// Fetch dispatch
// ---------------------------------------------------------------------------

/// Runs fetches on the tokio runtime and posts results back to the UI loop.
struct Fetcher {
    handle: Handle,
    source: HttpLogSource,
    tx: UnboundedSender<FetchDone>,
}

impl Fetcher {
    fn spawn(&self, ticket: FetchTicket, query: LogQuery) {
        let source = self.source.clone();
        let tx = self.tx.clone();
        self.handle.spawn(async move {
            let result = source.fetch(&query).await;
            // The receiver only disappears when the app is shutting down.
            let _ = tx.send(FetchDone { ticket, result });
        });
    }
}

// ---------------------------------------------------------------------------
// App
// ---------------------------------------------------------------------------

pub struct App {
    state: AppState,
    fetcher: Fetcher,
    results: UnboundedReceiver<FetchDone>,
}

impl App {
    pub fn new(
        config: Config,
        form: &QueryForm,
        theme: Theme,
        handle: Handle,
        source: HttpLogSource,
    ) -> Self {
        let (tx, results) = unbounded_channel();
        App {
            state: AppState::new(config, form, theme),
            fetcher: Fetcher { handle, source, tx },
            results,
        }
    }

    /// Validate the form and, if it passes, start fetching.
    pub fn submit(&mut self) {
        if let Some((ticket, query)) = self.state.prepare_fetch() {
            self.fetcher.spawn(ticket, query);
        }
    }

    /// Set up the terminal, run the event loop, and restore the terminal on exit.
    pub fn run(mut self) -> anyhow::Result<()> {
        install_panic_hook();

        enable_raw_mode()?;
        execute!(io::stdout(), EnterAlternateScreen)?;
        let backend = CrosstermBackend::new(io::stdout());
        let mut terminal = Terminal::new(backend)?;

        let result = self.event_loop(&mut terminal);

        // Always restore terminal, even if the loop returned an error
        let _ = disable_raw_mode();
        let _ = execute!(io::stdout(), LeaveAlternateScreen);
        let _ = terminal.show_cursor();

        result
    }

    fn event_loop(
        &mut self,
        terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    ) -> anyhow::Result<()> {
        loop {
            while let Ok(done) = self.results.try_recv() {
                self.state.apply(done);
            }

            {
                let s = &self.state;
                terminal.draw(|frame| draw(frame, s))?;
            }

            if self.state.quit {
                break;
            }

            if ct_event::poll(Duration::from_millis(16))? {
                match ct_event::read()? {
                    Event::Key(key) if key.kind == crossterm::event::KeyEventKind::Press => {
                        let raw = Event::Key(key);
                        // Use insert-mode mapping when a text widget is focused
                        let app_event = if is_insert_mode(self.state.focus) {
                            event::to_app_event_insert(raw)
                        } else {
                            event::to_app_event(raw)
                        };
                        if let Some(ev) = app_event {
                            tracing::debug!(focus = ?self.state.focus, event = ?ev, "key event");
                            self.handle(ev);
                        }
                    }
                    other => {
                        if let Some(ev) = event::to_app_event(other) {
                            self.handle(ev);
                        }
                    }
                }
            }
        }
        Ok(())
    }

    fn handle(&mut self, event: AppEvent) {
        match self.state.handle(event) {
            Effect::Fetch => self.submit(),
            Effect::None => {}
        }
    }
}

/// Returns true when the current focus is on a text-input widget, meaning
/// alphabetic keys should produce characters rather than trigger shortcuts.
fn is_insert_mode(focus: Focus) -> bool {
    matches!(focus, Focus::Form | Focus::Command)
}

// ---------------------------------------------------------------------------
// Rendering
// ---------------------------------------------------------------------------

fn draw(frame: &mut Frame, state: &AppState) {
    let area = frame.area();

    // status | form | warning | log page | page bar
    let vert = Layout::default()
        .direction(LayoutDir::Vertical)
        .constraints([
            Constraint::Length(1),
            Constraint::Length(3),
            Constraint::Length(1),
            Constraint::Fill(1),
            Constraint::Length(1),
        ])
        .split(area);

    let page = state.session.render();
    let summary = match state.session.lines().len() {
        0 => page.summary(),
        n => format!("{} · {n} lines", page.summary()),
    };

    frame.render_widget(StatusLine::new(&state.status, &state.theme), vert[0]);
    frame.render_widget(
        QueryFormView::new(&state.form, state.focus == Focus::Form, &state.theme),
        vert[1],
    );
    frame.render_widget(WarningBar::new(state.session.warning(), &state.theme), vert[2]);
    frame.render_widget(
        LogPage::new(
            &state.log_page,
            &page,
            state.session.is_loading(),
            state.focus == Focus::Logs,
            &state.theme,
        ),
        vert[3],
    );
    frame.render_widget(
        PageBar::new(
            &state.page_bar,
            &page.controls,
            summary,
            state.focus == Focus::Pager,
            &state.theme,
        ),
        vert[4],
    );

    if state.show_help {
        frame.render_widget(HelpPopup::new(&state.theme), area);
    }

    // Command bar overlays the bottom row of the screen
    if state.focus == Focus::Command {
        let cmd_area = Rect {
            y: area.bottom().saturating_sub(1),
            height: 1,
            ..area
        };
        frame.render_widget(CommandBar::new(&state.command_bar, &state.theme), cmd_area);
        let col = state.command_bar.cursor_col(cmd_area);
        frame.set_cursor_position((col, cmd_area.y));
        return;
    }

    if state.focus == Focus::Form && !state.show_help {
        let view = QueryFormView::new(&state.form, true, &state.theme);
        frame.set_cursor_position(view.cursor_position(vert[1]));
    }
}

// ---------------------------------------------------------------------------
// Terminal helpers
// ---------------------------------------------------------------------------

fn install_panic_hook() {
    let original = std::panic::take_hook();
    std::panic::set_hook(Box::new(move |info| {
        let _ = disable_raw_mode();
        let _ = execute!(io::stdout(), LeaveAlternateScreen);
        original(info);
    }));
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
