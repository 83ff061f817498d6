//! HTTP middleware wrapped around the redirect handler.
//!
//! - [`access_log`] - combined-format request logging
//! - [`recover`] - per-request panic boundary

pub mod access_log;
pub mod recover;
