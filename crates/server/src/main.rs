use std::{net::SocketAddr, sync::Arc};

use server::{build_router, config::load_settings, AppState};
use tokio::sync::mpsc;
use tracing::info;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt().with_env_filter("info").init();

    let settings = load_settings();
    let (shutdown_tx, mut shutdown_rx) = mpsc::channel(1);
    let state = Arc::new(AppState::new(settings.testing, shutdown_tx));
    let app = build_router(state);

    let addr: SocketAddr = settings.server_bind.parse()?;
    info!(%addr, testing = settings.testing, "server listening");
    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app)
        .with_graceful_shutdown(async move {
            let _ = shutdown_rx.recv().await;
            info!("shutdown requested");
        })
        .await?;
    Ok(())
}
