//! logview-core: validation, pagination and session state for logview.
//!
//! This crate holds everything that does not touch the network or the
//! terminal, so it can be tested in isolation.
//!
//! # Architecture
//!
//! ```text
//! QueryForm ──► validate ──► LogQuery ──► (logview-fetch) ──► LogLineSet
//!                  │                                              │
//!                  └──────────────► Session ◄─────────────────────┘
//!                                      │
//!                                      └──► pagination::render ──► UI
//! ```
//!
//! The [`Session`](session::Session) is the single owner of the resident
//! line set and the page cursor. Page changes re-render from memory and
//! never go back to the network.

pub mod config;
pub mod error;
pub mod pagination;
pub mod session;
pub mod types;
pub mod validate;

pub use error::{ClampWarning, FetchError, ValidationError};
pub use pagination::{ControlKind, PageControl, PageRender, RenderedLine};
pub use session::{FetchTicket, Notice, Session};
pub use types::{LogLineSet, LogQuery, PageView, Severity};
pub use validate::{LineCount, LineLimits, QueryForm, ValidatedQuery};
