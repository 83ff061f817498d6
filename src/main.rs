use std::process::ExitCode;

use anyhow::Context;
use clap::Parser;
use redirector::config::Config;
use redirector::server::{Server, shutdown_signal};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> ExitCode {
    let config = Config::parse();

    let default_level = if config.debug { "debug" } else { "info" };
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::from_default_env().add_directive(default_level.parse().unwrap()),
        )
        .init();

    redirector::middlewares::recover::install_panic_logger();

    if config.debug {
        tracing::debug!("DEBUG mode enabled");
    }

    match run(config).await {
        Ok(()) => {
            tracing::info!("shutting down");
            ExitCode::SUCCESS
        }
        Err(err) => {
            tracing::error!("{err:#}");
            ExitCode::FAILURE
        }
    }
}

async fn run(config: Config) -> anyhow::Result<()> {
    let server = Server::bind(&config)
        .await
        .with_context(|| format!("failed to start server on {}", config.host))?;
    tracing::info!(
        "Starting server on {}, redirecting to {}",
        server.local_addr()?,
        config.redirect
    );
    server.serve(shutdown_signal()).await?;
    Ok(())
}
