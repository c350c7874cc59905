//! Test builders: ergonomic constructors for forms and queries.
//!
//! These builders are designed for readability in test assertions, not for
//! production use.

use super::fake_log_server::FakeLogServer;
use logview::core::{LogQuery, QueryForm};

// ---------------------------------------------------------------------------
// QueryFormBuilder
// ---------------------------------------------------------------------------

/// Fluent builder for raw [`QueryForm`] input.
///
/// Starts from a form that validates: empty host (localhost), port `5000`,
/// filename `app.log`, everything else empty.
///
/// ```rust
/// let form = QueryFormBuilder::new()
///     .file("server.log")
///     .keyword("timeout")
///     .lines("500")
///     .build();
/// ```
pub struct QueryFormBuilder {
    form: QueryForm,
}

impl Default for QueryFormBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl QueryFormBuilder {
    pub fn new() -> Self {
        Self {
            form: QueryForm {
                port: "5000".to_string(),
                filename: "app.log".to_string(),
                ..QueryForm::default()
            },
        }
    }

    /// Point the form at a running [`FakeLogServer`].
    pub fn server(self, server: &FakeLogServer) -> Self {
        self.host("127.0.0.1").port(&server.port().to_string())
    }

    pub fn host(mut self, host: &str) -> Self {
        self.form.host = host.to_string();
        self
    }

    pub fn port(mut self, port: &str) -> Self {
        self.form.port = port.to_string();
        self
    }

    pub fn file(mut self, filename: &str) -> Self {
        self.form.filename = filename.to_string();
        self
    }

    pub fn keyword(mut self, keyword: &str) -> Self {
        self.form.keyword = keyword.to_string();
        self
    }

    pub fn lines(mut self, lines: &str) -> Self {
        self.form.lines = lines.to_string();
        self
    }

    pub fn stream(mut self, stream: &str) -> Self {
        self.form.stream = stream.to_string();
        self
    }

    pub fn build(self) -> QueryForm {
        self.form
    }
}

// ---------------------------------------------------------------------------
// Queries
// ---------------------------------------------------------------------------

/// An already-validated query for `filename` on `server`, 100 lines, no
/// filters.
pub fn query_for(server: &FakeLogServer, filename: &str) -> LogQuery {
    LogQuery {
        host: "127.0.0.1".to_string(),
        port: server.port(),
        filename: filename.to_string(),
        keyword: String::new(),
        max_lines: 100,
        stream: String::new(),
    }
}
