//! Shared test utilities for logview integration harnesses.
//!
//! Import everything you need via `mod common; use common::*;` at the top of
//! each harness file. Network tests talk to [`FakeLogServer`], an in-process
//! `axum` server on an ephemeral 127.0.0.1 port.

pub mod assertions;
pub mod builders;
pub mod fake_log_server;
pub mod fixtures;

pub use assertions::*;
pub use builders::*;
pub use fake_log_server::*;
pub use fixtures::*;
