//! chatrelay entry point.
//!
//! Binary name: `chatrelay`
//!
//! Parses CLI arguments, sets up tracing, loads configuration, then either
//! prints the effective configuration or starts the HTTP server.

mod cli;
mod http;
mod state;

use anyhow::Context;
use clap::Parser;

use chatrelay_infra::config::load_config;
use chatrelay_infra::secret::load_env_file;
use chatrelay_observe::tracing_setup::{
    TracingOptions, init_tracing, shutdown_tracing, verbosity_filter,
};
use chatrelay_types::config::RelayConfig;

use cli::{Cli, Commands};
use state::AppState;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Before parsing, so `.env` can also supply CHATRELAY_CONFIG.
    let env_file = load_env_file(None);
    let cli = Cli::parse();

    init_tracing(&TracingOptions {
        default_filter: verbosity_filter(cli.verbose, cli.quiet).to_string(),
        format: cli.log_format,
        enable_otel: cli.otel,
    })
    .map_err(|e| anyhow::anyhow!("failed to initialize tracing: {e}"))?;

    if let Some(path) = env_file {
        tracing::debug!("Loaded environment from {}", path.display());
    }

    let result = run(cli).await;
    shutdown_tracing();
    result
}

async fn run(cli: Cli) -> anyhow::Result<()> {
    let mut config = load_config(cli.config.as_deref())
        .await
        .context("failed to load configuration")?;

    match cli.command {
        Commands::Serve { host, port } => {
            if let Some(host) = host {
                config.server.host = host;
            }
            if let Some(port) = port {
                config.server.port = port;
            }
            serve(config).await
        }
        Commands::Config => cli::config::show_config(&config),
    }
}

async fn serve(config: RelayConfig) -> anyhow::Result<()> {
    let addr = format!("{}:{}", config.server.host, config.server.port);
    let provider = config.responder.provider_name.clone();
    let model = config.responder.model.clone();

    let state = AppState::init(config)?;
    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .with_context(|| format!("failed to bind {addr}"))?;

    tracing::info!(%addr, %provider, %model, "chatrelay listening");

    let router = http::router::build_router(state);
    axum::serve(listener, router)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    tracing::info!("Server stopped");
    Ok(())
}

/// Wait for Ctrl+C or SIGTERM for graceful shutdown.
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::error!("failed to listen for Ctrl+C: {e}");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(e) => {
                tracing::error!("failed to install SIGTERM handler: {e}");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }
}
