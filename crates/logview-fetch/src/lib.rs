//! logview-fetch: retrieval of log lines from a remote log endpoint.
//!
//! A [`LogSource`] turns a validated [`LogQuery`] into a [`LogLineSet`] or a
//! [`FetchError`]. The only production source is [`HttpLogSource`], which
//! speaks plain HTTP/1.1 to `GET /{filename}?keyword=&n=&stream=`.
//!
//! Response bodies come in two shapes (a JSON `{"lines": [...]}` object from
//! older servers, raw newline-delimited text from newer ones). Both are
//! funnelled through [`normalize::normalize_body`] so nothing downstream
//! knows which one arrived.

pub mod client;
pub mod normalize;
pub mod url;

pub use client::HttpLogSource;
pub use url::{build_request_url, request_uri};

use logview_core::{FetchError, LogLineSet, LogQuery};
use std::future::Future;

/// Anything that can produce the lines for a query.
pub trait LogSource {
    fn fetch(
        &self,
        query: &LogQuery,
    ) -> impl Future<Output = Result<LogLineSet, FetchError>> + Send;
}
