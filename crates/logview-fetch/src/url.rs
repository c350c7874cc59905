//! Request URL construction.
//!
//! [`build_request_url`] interpolates the validated fields as they are. The
//! validation rules already exclude `?`, `&`, `/`, `#` and `=`, so nothing is
//! re-encoded there. They do admit whitespace and non-ASCII word characters,
//! which an HTTP request line cannot carry literally; [`request_uri`] escapes
//! exactly those bytes when the string is handed to the transport.

use hyper::Uri;
use logview_core::{FetchError, LogQuery};
use percent_encoding::{utf8_percent_encode, AsciiSet, CONTROLS};

/// Controls, space and (implicitly) every non-ASCII byte.
const TRANSPORT_ESCAPES: &AsciiSet = &CONTROLS.add(b' ');

/// `http://{host}:{port}/{filename}?keyword={keyword}&n={max_lines}&stream={stream}`
pub fn build_request_url(query: &LogQuery) -> String {
    format!(
        "http://{}:{}/{}?keyword={}&n={}&stream={}",
        query.host, query.port, query.filename, query.keyword, query.max_lines, query.stream
    )
}

/// Parse a request URL into a [`Uri`], escaping bytes the request line
/// cannot carry.
pub fn request_uri(url: &str) -> Result<Uri, FetchError> {
    utf8_percent_encode(url, TRANSPORT_ESCAPES)
        .to_string()
        .parse::<Uri>()
        .map_err(|e| FetchError::Transport(format!("invalid request URL {url:?}: {e}")))
}
