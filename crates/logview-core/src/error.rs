//! Error taxonomy shared by the validator, the retriever and the session.
//!
//! - [`ValidationError`]: a form field is malformed; no request is issued.
//! - [`ClampWarning`]: not an error. The line count was reduced to the
//!   ceiling and the request proceeds.
//! - [`FetchError`]: the request was issued and failed.

use thiserror::Error;

/// A pre-flight rejection. Every variant carries its own user-facing text.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("Invalid IP address. Enter four numbers from 0 to 255 separated by dots.")]
    Address,
    #[error("Invalid port. Enter a whole number from 1 to 65535.")]
    Port,
    #[error(
        "Invalid filename. Use letters, digits, underscores, commas, spaces or hyphens followed by a three-letter extension (e.g. app.log)."
    )]
    Filename,
    #[error("Invalid keyword. Only letters, digits, underscores, spaces and hyphens are allowed.")]
    Keyword,
    #[error("Invalid stream. Only letters, digits, underscores, spaces and hyphens are allowed.")]
    Stream,
    #[error("Invalid number of lines. Enter a whole number greater than 0.")]
    LineCount,
}

/// The requested line count exceeded the ceiling and was reduced to it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClampWarning {
    /// The value as typed. Kept as text because it may not fit in a `u64`.
    pub requested: String,
    pub ceiling: u64,
}

impl std::fmt::Display for ClampWarning {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "Warning: {} lines requested, but the maximum is {}. Fetching {} lines.",
            self.requested, self.ceiling, self.ceiling
        )
    }
}

/// A failed fetch attempt. Terminal for that attempt; there is no retry.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FetchError {
    /// Non-2xx response carrying `{"error": "..."}`; the message is verbatim.
    #[error("Error: {0}")]
    Server(String),
    /// No usable response: connection failure, timeout, or an error body
    /// that was not the expected JSON.
    #[error("Error fetching logs: {0}")]
    Transport(String),
}
