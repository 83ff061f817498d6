//! Server lifecycle: bind, serve, bounded graceful shutdown.
//!
//! The lifecycle runs `starting → serving → shutting-down → stopped`:
//!
//! 1. [`Server::bind`] binds the listener and assembles the router.
//! 2. [`Server::serve`] accepts connections on a spawned task while the
//!    caller-supplied shutdown future (the signal wait in production) is
//!    polled alongside it.
//! 3. When the shutdown future resolves, the listener stops accepting and
//!    in-flight requests get up to the configured grace period to finish.
//! 4. Requests still running when the grace period elapses are abandoned
//!    and the shutdown is reported as [`ServeError::GraceExpired`].
//!
//! A serve failure before any shutdown was requested (the listener went bad)
//! is returned immediately instead of leaving the process parked on the
//! signal wait.

use std::future::Future;
use std::net::SocketAddr;
use std::time::Duration;

use axum::Router;
use tokio::net::TcpListener;
use tokio::sync::watch;
use tokio::task::JoinError;

use crate::config::Config;
use crate::error::ServeError;
use crate::routes::app_router;
use crate::state::AppState;

/// A bound listener plus router, ready to serve.
pub struct Server {
    listener: TcpListener,
    app: Router,
    grace: Duration,
}

impl Server {
    /// Binds the configured address and assembles the middleware-wrapped
    /// router.
    ///
    /// # Errors
    ///
    /// Returns an error if the bind fails (address in use, permission).
    pub async fn bind(config: &Config) -> Result<Self, ServeError> {
        let listener = TcpListener::bind(config.host).await?;
        let state = AppState {
            redirect: config.redirect.clone(),
        };
        Ok(Self::new(listener, app_router(state), config.graceful_timeout))
    }

    /// Wraps an already-bound listener and router.
    pub fn new(listener: TcpListener, app: Router, grace: Duration) -> Self {
        Self {
            listener,
            app,
            grace,
        }
    }

    /// Address actually bound. Differs from the configured one when port 0
    /// was requested.
    pub fn local_addr(&self) -> Result<SocketAddr, ServeError> {
        Ok(self.listener.local_addr()?)
    }

    /// Serves until `shutdown` resolves, then drains in-flight requests for
    /// at most the grace period.
    ///
    /// New connections stop being accepted the moment `shutdown` fires.
    /// If the drain outlives the grace period the serve task is aborted,
    /// dropping the remaining connections, and
    /// [`ServeError::GraceExpired`] is returned.
    pub async fn serve(self, shutdown: impl Future<Output = ()> + Send) -> Result<(), ServeError> {
        let (stop_tx, mut stop_rx) = watch::channel(false);

        let serving = axum::serve(
            self.listener,
            self.app
                .into_make_service_with_connect_info::<SocketAddr>(),
        )
        .with_graceful_shutdown(async move {
            let _ = stop_rx.wait_for(|stop| *stop).await;
        });
        let mut task = tokio::spawn(async move { serving.await });

        tokio::select! {
            res = &mut task => return flatten(res),
            () = shutdown => {}
        }

        tracing::info!("shutdown requested, draining for up to {:?}", self.grace);
        let _ = stop_tx.send(true);

        match tokio::time::timeout(self.grace, &mut task).await {
            Ok(res) => flatten(res),
            Err(_) => {
                task.abort();
                Err(ServeError::GraceExpired {
                    timeout: self.grace,
                })
            }
        }
    }
}

fn flatten(res: Result<std::io::Result<()>, JoinError>) -> Result<(), ServeError> {
    match res {
        Ok(serve_res) => Ok(serve_res?),
        Err(join_err) if join_err.is_panic() => {
            std::panic::resume_unwind(join_err.into_panic())
        }
        // Cancelled: only reachable through abort, which is reported as
        // GraceExpired before the task is polled again.
        Err(_) => Ok(()),
    }
}

/// Resolves on SIGINT or SIGTERM, whichever arrives first. Both trigger the
/// same shutdown path.
pub async fn shutdown_signal() {
    let ctrl_c = async {
        tokio::signal::ctrl_c()
            .await
            .expect("failed to install SIGINT handler");
    };

    #[cfg(unix)]
    let terminate = async {
        tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate())
            .expect("failed to install SIGTERM handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        () = ctrl_c => {}
        _ = terminate => {}
    }

    tracing::info!("received termination signal");
}
