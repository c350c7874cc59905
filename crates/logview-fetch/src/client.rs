//! HTTP transport for the log endpoint, built on hyper's pooled client.

use crate::normalize::{error_from_body, normalize_body};
use crate::url::{build_request_url, request_uri};
use crate::LogSource;
use bytes::Bytes;
use http_body_util::{BodyExt, Empty};
use hyper::header::{ACCEPT, CONTENT_TYPE};
use hyper::{Request, Uri};
use hyper_util::client::legacy::{connect::HttpConnector, Client};
use hyper_util::rt::TokioExecutor;
use logview_core::{FetchError, LogLineSet, LogQuery};
use std::future::Future;
use std::time::Duration;

/// Fetches log lines over plain HTTP/1.1.
///
/// Cheap to clone; clones share the connection pool.
#[derive(Clone)]
pub struct HttpLogSource {
    client: Client<HttpConnector, Empty<Bytes>>,
    timeout: Option<Duration>,
}

impl Default for HttpLogSource {
    fn default() -> Self {
        Self::new()
    }
}

impl HttpLogSource {
    pub fn new() -> Self {
        Self {
            client: Client::builder(TokioExecutor::new()).build_http(),
            timeout: None,
        }
    }

    /// Give up on requests that take longer than `timeout`. `None` waits for
    /// the transport.
    pub fn with_timeout(mut self, timeout: Option<Duration>) -> Self {
        self.timeout = timeout;
        self
    }

    async fn get(
        client: Client<HttpConnector, Empty<Bytes>>,
        uri: Uri,
    ) -> Result<LogLineSet, FetchError> {
        let request = Request::get(uri)
            .header(ACCEPT, "application/json, text/plain")
            .body(Empty::<Bytes>::new())
            .map_err(|e| FetchError::Transport(describe(&e)))?;

        let response = client
            .request(request)
            .await
            .map_err(|e| FetchError::Transport(describe(&e)))?;

        let status = response.status();
        let content_type = response
            .headers()
            .get(CONTENT_TYPE)
            .and_then(|v| v.to_str().ok())
            .map(str::to_owned);
        let body = response
            .into_body()
            .collect()
            .await
            .map_err(|e| FetchError::Transport(describe(&e)))?
            .to_bytes();

        tracing::debug!(
            status = status.as_u16(),
            content_type = ?content_type,
            bytes = body.len(),
            "fetch: response received"
        );

        if status.is_success() {
            normalize_body(content_type.as_deref(), &body)
        } else {
            Err(error_from_body(status.as_u16(), &body))
        }
    }
}

impl LogSource for HttpLogSource {
    fn fetch(
        &self,
        query: &LogQuery,
    ) -> impl Future<Output = Result<LogLineSet, FetchError>> + Send {
        let url = build_request_url(query);
        let client = self.client.clone();
        let timeout = self.timeout;

        async move {
            tracing::debug!(url = %url, "fetch: request");
            let uri = request_uri(&url)?;
            let result = match timeout {
                Some(limit) => tokio::time::timeout(limit, Self::get(client, uri))
                    .await
                    .unwrap_or_else(|_| {
                        Err(FetchError::Transport(format!(
                            "request timed out after {}s",
                            limit.as_secs()
                        )))
                    }),
                None => Self::get(client, uri).await,
            };
            if let Err(err) = &result {
                tracing::warn!(url = %url, error = %err, "fetch: failed");
            }
            result
        }
    }
}

/// An error message followed by its chain of causes, `: `-separated.
fn describe(err: &dyn std::error::Error) -> String {
    let mut message = err.to_string();
    let mut source = err.source();
    while let Some(cause) = source {
        message.push_str(": ");
        message.push_str(&cause.to_string());
        source = cause.source();
    }
    message
}
