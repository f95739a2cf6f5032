use std::process::ExitCode;
use std::sync::Arc;

use clap::Parser;
use stockscope_core::AlphaVantageGateway;
use stockscope_web::{build_router, AppState, ServerConfig};

#[tokio::main]
async fn main() -> ExitCode {
    let config = ServerConfig::parse();
    config.logging().init();

    match serve(config).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(error) => {
            tracing::error!(%error, "server stopped");
            eprintln!("error: {error}");
            ExitCode::FAILURE
        }
    }
}

async fn serve(config: ServerConfig) -> std::io::Result<()> {
    let gateway = AlphaVantageGateway::default()
        .with_base_url(config.upstream_base_url.as_str())
        .with_timeout(config.upstream_timeout());
    let state = AppState::new(Arc::new(gateway)).with_default_language(config.default_language);

    let listener = tokio::net::TcpListener::bind(config.bind).await?;
    tracing::info!(addr = %listener.local_addr()?, "listening");

    axum::serve(listener, build_router(state))
        .with_graceful_shutdown(shutdown_signal())
        .await
}

async fn shutdown_signal() {
    if let Err(error) = tokio::signal::ctrl_c().await {
        tracing::warn!(%error, "failed to listen for shutdown signal");
        std::future::pending::<()>().await;
    }
    tracing::info!("shutting down");
}
