mod config;

use tower_http::services::ServeDir;
use tracing::{info, warn};

use relay_api::AppStateInner;
use relay_api::forwarder::ReplicationForwarder;
use relay_store::MessageStore;

use crate::config::Config;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load .env if present
    let _ = dotenvy::dotenv();

    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| {
                "relay=debug,relay_api=debug,relay_store=info,tower_http=debug".into()
            }),
        )
        .init();

    let config = Config::from_env()?;
    let addr = config.bind_addr()?;

    let store = MessageStore::open(&config.log_path);
    let forwarder = ReplicationForwarder::new(config.peer_url.clone(), config.forward_timeout)?;
    match forwarder.peer_url() {
        Some(peer) => info!("Replicating to peer {} (timeout {:?})", peer, config.forward_timeout),
        None => info!("No peer configured, running standalone"),
    }

    let state = AppStateInner::new(store, forwarder, config.node_name.clone());

    let mut app = relay_api::router(state);
    if let Some(dir) = &config.static_dir {
        info!("Serving static files from {}", dir.display());
        app = app.fallback_service(ServeDir::new(dir));
    }

    info!("Relay node {} listening on {}", config.node_name, addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    Ok(())
}

async fn shutdown_signal() {
    let ctrl_c = tokio::signal::ctrl_c();
    #[cfg(unix)]
    {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut sigterm) => {
                tokio::select! {
                    _ = ctrl_c => info!("Received Ctrl+C, shutting down..."),
                    _ = sigterm.recv() => info!("Received SIGTERM, shutting down..."),
                }
            }
            Err(e) => {
                warn!("Failed to install SIGTERM handler: {}", e);
                ctrl_c.await.ok();
                info!("Received Ctrl+C, shutting down...");
            }
        }
    }
    #[cfg(not(unix))]
    {
        ctrl_c.await.ok();
        info!("Received Ctrl+C, shutting down...");
    }
}
