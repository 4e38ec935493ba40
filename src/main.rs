// src/main.rs
use anyhow::Result;
use tokio::signal;
use tracing::info;

use netbind::{config, net};

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("netbind=debug".parse()?),
        )
        .init();

    // Load configuration
    let config_path = std::env::args()
        .nth(1)
        .unwrap_or_else(|| "config.yaml".to_string());

    info!("Loading configuration from: {}", config_path);
    let config = config::load_config(&config_path).await?;

    // Create the listening socket
    let listener = net::create_listener_from(&config.listener)?;
    let addr = listener.local_addr()?;
    info!(
        "Listener ready on {} (backlog {})",
        addr, config.listener.backlog
    );

    // Hand the socket to tokio so a driver built on this crate can accept
    // from it; this binary only holds the resource until shutdown.
    let _listener = net::into_async(listener)?;

    shutdown_signal().await;
    info!("Releasing listener on {}", addr);

    Ok(())
}

// Graceful shutdown handler
async fn shutdown_signal() {
    let ctrl_c = async {
        signal::ctrl_c()
            .await
            .expect("Failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        signal::unix::signal(signal::unix::SignalKind::terminate())
            .expect("Failed to install signal handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }

    info!("Shutdown signal received");
}
