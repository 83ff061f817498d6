//! Per-request panic boundary.

use axum::http::{HeaderValue, StatusCode, header};
use axum::response::{IntoResponse, Response};
use std::any::Any;
use std::backtrace::Backtrace;
use tower_http::catch_panic::CatchPanicLayer;

/// Body returned to the client when a handler panics. No error detail
/// beyond this text ever reaches the client.
const PANIC_BODY: &str = "There was an error processing your request";

type PanicHandler = fn(Box<dyn Any + Send + 'static>) -> Response;

/// Installs a process-wide panic hook that logs the panic location and a
/// backtrace at error severity.
///
/// The hook runs at the fault site, before the stack unwinds to the
/// recovery layer, so the trace points at the panicking handler rather
/// than at the layer that caught it. Install once at startup, after the
/// tracing subscriber.
pub fn install_panic_logger() {
    std::panic::set_hook(Box::new(|info| {
        tracing::error!("{info}");
        tracing::error!("{}", Backtrace::force_capture());
    }));
}

/// Layer that recovers a panicking handler into a generic 500.
///
/// The serving loop keeps accepting requests. The response carries
/// `Connection: close` since per-connection state is suspect after an
/// unwind.
pub fn layer() -> CatchPanicLayer<PanicHandler> {
    CatchPanicLayer::custom(handle_panic as PanicHandler)
}

fn handle_panic(err: Box<dyn Any + Send + 'static>) -> Response {
    let detail = if let Some(s) = err.downcast_ref::<String>() {
        s.clone()
    } else if let Some(s) = err.downcast_ref::<&str>() {
        (*s).to_string()
    } else {
        "unknown panic payload".to_string()
    };

    // The fault-site backtrace was already logged by the panic hook; the
    // frames are gone by the time the unwind reaches this layer.
    tracing::error!("recovered panic while handling request: {detail}");

    let mut response = (StatusCode::INTERNAL_SERVER_ERROR, PANIC_BODY).into_response();
    response
        .headers_mut()
        .insert(header::CONNECTION, HeaderValue::from_static("close"));
    response
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io;
    use std::sync::{Arc, Mutex};

    #[derive(Clone)]
    struct Capture(Arc<Mutex<Vec<u8>>>);

    impl io::Write for Capture {
        fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
            self.0.lock().unwrap().extend_from_slice(buf);
            Ok(buf.len())
        }

        fn flush(&mut self) -> io::Result<()> {
            Ok(())
        }
    }

    #[test]
    fn panic_hook_logs_the_fault_site() {
        install_panic_logger();

        let buf = Arc::new(Mutex::new(Vec::new()));
        let writer = Capture(buf.clone());
        let subscriber = tracing_subscriber::fmt()
            .with_writer(move || writer.clone())
            .with_ansi(false)
            .finish();

        tracing::subscriber::with_default(subscriber, || {
            let _ = std::panic::catch_unwind(|| panic!("boom at fault site"));
        });

        let logs = String::from_utf8(buf.lock().unwrap().clone()).unwrap();
        assert!(logs.contains("boom at fault site"), "got: {logs}");
        assert!(logs.contains("ERROR"), "got: {logs}");
    }
}
