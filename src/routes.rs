//! Router assembly: the catch-all redirect behind the middleware chain.
//!
//! # Route Structure
//!
//! - `/`          - redirect (any method)
//! - `/{*path}`   - redirect (any method)
//!
//! # Middleware
//!
//! The panic boundary sits inside the access-log layer, so a recovered 500
//! still produces an access line with its final status.

use axum::{Router, middleware, routing::any};

use crate::handlers::redirect_handler;
use crate::middlewares::{access_log::access_log_mw, recover};
use crate::state::AppState;

/// Constructs the application router with all routes and middleware.
pub fn app_router(state: AppState) -> Router {
    Router::new()
        .route("/", any(redirect_handler))
        .route("/{*path}", any(redirect_handler))
        .with_state(state)
        .layer(recover::layer())
        .layer(middleware::from_fn(access_log_mw))
}
