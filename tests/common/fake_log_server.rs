//! Fake log endpoint for integration tests.
//!
//! Spins up a minimal `axum` HTTP server on a random TCP port bound to
//! 127.0.0.1 and serves `GET /{filename}?keyword=&n=&stream=` with whatever
//! reply the test configured for that file:
//!
//! - [`Reply::Json`]: `200 {"lines": [...]}` (older servers)
//! - [`Reply::Text`]: `200` raw newline-delimited text (newer servers)
//! - [`Reply::Error`]: non-2xx with `{"error": "..."}`
//! - [`Reply::Raw`]: non-2xx with a non-JSON body (e.g. a proxy page)
//!
//! Unknown files get `404 {"error": "File not found"}`. Every request is
//! recorded so tests can assert on what was sent, and how often.
//!
//! # Example
//!
//! ```rust,no_run
//! let server = FakeLogServer::start().await.unwrap();
//! server.serve("app.log", Reply::text("INFO up\nERROR down\n")).await;
//! let query = query_for(&server, "app.log");
//! ```

use axum::{
    extract::{Path, RawQuery, State},
    http::{header::CONTENT_TYPE, StatusCode},
    response::{IntoResponse, Response},
    routing::get,
    Json, Router,
};
use std::collections::HashMap;
use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;
use tokio::net::TcpListener;
use tokio::sync::Mutex;

/// What the server answers for one file.
#[derive(Debug, Clone)]
pub enum Reply {
    Json(Vec<String>),
    Text(String),
    Error(u16, String),
    Raw(u16, String),
}

impl Reply {
    pub fn json<S: Into<String>>(lines: impl IntoIterator<Item = S>) -> Self {
        Reply::Json(lines.into_iter().map(Into::into).collect())
    }

    pub fn text(body: impl Into<String>) -> Self {
        Reply::Text(body.into())
    }

    pub fn error(status: u16, message: impl Into<String>) -> Self {
        Reply::Error(status, message.into())
    }

    pub fn raw(status: u16, body: impl Into<String>) -> Self {
        Reply::Raw(status, body.into())
    }
}

/// One request as the server saw it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecordedRequest {
    /// Percent-decoded filename segment.
    pub filename: String,
    /// The query string exactly as it arrived on the wire.
    pub raw_query: String,
    /// Decoded `key=value` pairs.
    pub params: HashMap<String, String>,
    /// `Accept` header, if any.
    pub accept: Option<String>,
}

impl RecordedRequest {
    pub fn param(&self, key: &str) -> Option<&str> {
        self.params.get(key).map(String::as_str)
    }
}

#[derive(Default)]
struct ServerState {
    replies: HashMap<String, (Reply, Duration)>,
    requests: Vec<RecordedRequest>,
}

type Shared = Arc<Mutex<ServerState>>;

/// Handle to the running fake log server.
pub struct FakeLogServer {
    addr: SocketAddr,
    state: Shared,
}

impl FakeLogServer {
    /// Start the server on a random port. Returns once it is listening.
    pub async fn start() -> std::io::Result<Self> {
        let listener = TcpListener::bind("127.0.0.1:0").await?;
        let addr = listener.local_addr()?;
        let state: Shared = Arc::new(Mutex::new(ServerState::default()));

        let app = Router::new()
            .route("/{filename}", get(serve_file))
            .with_state(state.clone());

        tokio::spawn(async move {
            axum::serve(listener, app).await.unwrap();
        });

        Ok(Self { addr, state })
    }

    pub fn addr(&self) -> SocketAddr {
        self.addr
    }

    pub fn port(&self) -> u16 {
        self.addr.port()
    }

    /// Answer requests for `filename` with `reply`.
    pub async fn serve(&self, filename: &str, reply: Reply) {
        self.serve_after(filename, reply, Duration::ZERO).await;
    }

    /// Like [`serve`](Self::serve), but hold each response for `delay`.
    pub async fn serve_after(&self, filename: &str, reply: Reply, delay: Duration) {
        let mut state = self.state.lock().await;
        state.replies.insert(filename.to_string(), (reply, delay));
    }

    /// Every request received so far, oldest first.
    pub async fn requests(&self) -> Vec<RecordedRequest> {
        self.state.lock().await.requests.clone()
    }

    pub async fn request_count(&self) -> usize {
        self.state.lock().await.requests.len()
    }
}

// ---------------------------------------------------------------------------
// Route handler
// ---------------------------------------------------------------------------

async fn serve_file(
    Path(filename): Path<String>,
    RawQuery(raw_query): RawQuery,
    headers: axum::http::HeaderMap,
    State(state): State<Shared>,
) -> Response {
    let raw_query = raw_query.unwrap_or_default();
    let params = parse_query(&raw_query);
    let accept = headers
        .get(axum::http::header::ACCEPT)
        .and_then(|v| v.to_str().ok())
        .map(str::to_owned);

    let configured = {
        let mut state = state.lock().await;
        state.requests.push(RecordedRequest {
            filename: filename.clone(),
            raw_query,
            params,
            accept,
        });
        state.replies.get(&filename).cloned()
    };

    let Some((reply, delay)) = configured else {
        return (
            StatusCode::NOT_FOUND,
            Json(serde_json::json!({ "error": "File not found" })),
        )
            .into_response();
    };

    if !delay.is_zero() {
        tokio::time::sleep(delay).await;
    }

    match reply {
        Reply::Json(lines) => Json(serde_json::json!({ "lines": lines })).into_response(),
        Reply::Text(body) => {
            ([(CONTENT_TYPE, "text/plain; charset=utf-8")], body).into_response()
        }
        Reply::Error(status, message) => (
            status_code(status),
            Json(serde_json::json!({ "error": message })),
        )
            .into_response(),
        Reply::Raw(status, body) => {
            (status_code(status), [(CONTENT_TYPE, "text/html")], body).into_response()
        }
    }
}

fn status_code(status: u16) -> StatusCode {
    StatusCode::from_u16(status).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR)
}

/// Decode `a=b&c=d`, turning `%XX` escapes back into bytes.
fn parse_query(raw: &str) -> HashMap<String, String> {
    raw.split('&')
        .filter(|pair| !pair.is_empty())
        .map(|pair| {
            let (k, v) = pair.split_once('=').unwrap_or((pair, ""));
            (percent_decode(k), percent_decode(v))
        })
        .collect()
}

fn percent_decode(s: &str) -> String {
    percent_encoding::percent_decode_str(s)
        .decode_utf8_lossy()
        .into_owned()
}
