//! logview: fetch a remote log file and page through it.
//!
//! The work is split across three crates, re-exported here so integration
//! tests and the binary can reach every layer from one place:
//!
//! ```text
//! logview-core ──► validation, pagination, session, config
//! logview-fetch ─► HTTP retrieval and response normalization
//! logview-tui ───► ratatui shell
//! ```
//!
//! [`headless`] is the non-interactive adapter used by `logview --headless`.

pub mod headless;

pub use logview_core as core;
pub use logview_fetch as fetch;
pub use logview_tui as tui;
