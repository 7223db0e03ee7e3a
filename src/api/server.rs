//! API server lifecycle: bind, serve, shut down on Ctrl-C.

use std::net::SocketAddr;
use std::sync::Arc;

use crate::api::router::api_router;
use crate::core_state::CoreState;

/// Bind and serve the intake API until a shutdown signal arrives.
pub async fn serve(core: Arc<CoreState>, addr: SocketAddr) -> std::io::Result<()> {
    let listener = tokio::net::TcpListener::bind(addr).await?;
    let local_addr = listener.local_addr()?;
    tracing::info!(addr = %local_addr, "Intake API listening");

    axum::serve(listener, api_router(core))
        .with_graceful_shutdown(shutdown_signal())
        .await
}

async fn shutdown_signal() {
    if tokio::signal::ctrl_c().await.is_ok() {
        tracing::info!("Shutdown signal received");
    }
}
