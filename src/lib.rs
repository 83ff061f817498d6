//! # Redirector
//!
//! A minimal catch-all HTTP redirect server built with Axum.
//!
//! Every request, regardless of method or path, receives a
//! `301 Moved Permanently` pointing at a single configured target URL.
//! Around that one handler sit the pieces a long-running server needs:
//!
//! - Combined-format access logging to stdout ([`middlewares::access_log`])
//! - A per-request panic boundary that answers a well-formed 500 instead of
//!   dropping the connection ([`middlewares::recover`])
//! - Bounded graceful shutdown on SIGINT/SIGTERM ([`server`])
//!
//! ## Quick Start
//!
//! ```bash
//! cargo run -- --redirect https://example.com --host 0.0.0.0:8080
//! ```
//!
//! ## Configuration
//!
//! Configuration is command-line only and immutable after startup.
//! See [`config::Config`] for available flags.

pub mod config;
pub mod error;
pub mod handlers;
pub mod middlewares;
pub mod routes;
pub mod server;
pub mod state;

pub use config::Config;
pub use error::ServeError;
pub use state::AppState;
