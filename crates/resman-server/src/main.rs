//! resman-server - REST API server binary.

use std::net::SocketAddr;

use resman_core::ManagerConfig;
use resman_server::{create_server, AppState};
use tokio::signal;
use tracing::{info, Level};
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

/// Wait for shutdown signal (Ctrl+C or SIGTERM).
async fn shutdown_signal() {
    let ctrl_c = async {
        signal::ctrl_c()
            .await
            .expect("failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        signal::unix::signal(signal::unix::SignalKind::terminate())
            .expect("failed to install signal handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }
}

/// Load configuration from `RESMAN_CONFIG` if set, then apply env overrides.
fn load_config() -> Result<ManagerConfig, Box<dyn std::error::Error>> {
    let config = match std::env::var("RESMAN_CONFIG") {
        Ok(path) => ManagerConfig::from_file(&path)?.with_env_overrides()?,
        Err(_) => ManagerConfig::from_env()?,
    };
    Ok(config)
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Load environment variables
    dotenvy::dotenv().ok();

    // Initialize tracing
    tracing_subscriber::registry()
        .with(fmt::layer())
        .with(
            EnvFilter::from_default_env()
                .add_directive(Level::INFO.into())
                .add_directive("resman_server=debug".parse()?),
        )
        .init();

    let config = load_config()?;
    info!(
        json_dir = %config.store.json_dir.display(),
        history_limit = config.store.history_limit,
        "Configuration loaded"
    );

    let addr: SocketAddr = config.server.address().parse()?;
    let app = create_server(AppState::new(config));

    info!("Starting resman-server on {}", addr);
    let listener = tokio::net::TcpListener::bind(addr).await?;

    // Serve with graceful shutdown
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("Server stopped cleanly");
    Ok(())
}
