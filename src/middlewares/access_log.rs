use axum::{
    extract::{ConnectInfo, Request},
    http::header,
    middleware::Next,
    response::Response,
};
use std::{net::SocketAddr, time::Instant};

/// Emits one combined-format access line per request.
///
/// Runs after the inner handler completes, so recovered panics show up here
/// with their final 500 status. The client address comes from [`ConnectInfo`]
/// when the connection carries one and `-` otherwise (in-process test
/// transports). The timestamp is supplied by the tracing formatter.
pub async fn access_log_mw(req: Request, next: Next) -> Response {
    let start = Instant::now();

    let ip = req
        .extensions()
        .get::<ConnectInfo<SocketAddr>>()
        .map(|ConnectInfo(addr)| addr.ip().to_string())
        .unwrap_or_else(|| "-".to_string());

    let method = req.method().to_string();
    let path = req
        .uri()
        .path_and_query()
        .map(|pq| pq.to_string())
        .unwrap_or_else(|| req.uri().path().to_string());
    let version = format!("{:?}", req.version());

    let ua = req
        .headers()
        .get(header::USER_AGENT)
        .and_then(|v| v.to_str().ok())
        .unwrap_or("-")
        .to_string();

    let referer = req
        .headers()
        .get(header::REFERER)
        .and_then(|v| v.to_str().ok())
        .unwrap_or("-")
        .to_string();

    let response = next.run(req).await;

    let status = response.status().as_u16();
    let size = response
        .headers()
        .get(header::CONTENT_LENGTH)
        .and_then(|v| v.to_str().ok())
        .unwrap_or("-")
        .to_string();
    let ms = start.elapsed().as_millis();

    tracing::info!(
        r#"{ip} - - "{method} {path} {version}" {status} {size} "{referer}" "{ua}" {ms}ms"#,
        ip = ip,
        method = method,
        path = path,
        version = version,
        status = status,
        size = size,
        referer = referer,
        ua = ua,
        ms = ms,
    );

    response
}
