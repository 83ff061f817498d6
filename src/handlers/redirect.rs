//! Catch-all redirect handler.

use axum::{
    extract::State,
    http::{StatusCode, header},
    response::IntoResponse,
};

use crate::state::AppState;

/// Redirects any request to the configured target.
///
/// # Endpoint
///
/// Any method, any path, any query.
///
/// Responds `301 Moved Permanently` with `Location` set verbatim to the
/// configured target URL. The request path, query, and body are never
/// inspected. This handler cannot fail: the target was validated at startup.
pub async fn redirect_handler(State(state): State<AppState>) -> impl IntoResponse {
    (
        StatusCode::MOVED_PERMANENTLY,
        [(header::LOCATION, state.redirect.clone())],
    )
}
