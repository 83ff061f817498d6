use std::time::Duration;
use thiserror::Error;

/// Failures surfaced by the server lifecycle.
///
/// Request handling itself never produces errors: the redirect handler is
/// infallible and recovered panics are answered inline as 500s.
#[derive(Debug, Error)]
pub enum ServeError {
    /// Bind, accept, or connection-level I/O failure.
    #[error("server i/o error: {0}")]
    Io(#[from] std::io::Error),

    /// In-flight requests did not finish within the graceful-shutdown window.
    /// Their connections were forcibly closed.
    #[error("graceful shutdown timed out after {timeout:?}")]
    GraceExpired { timeout: Duration },
}
