//! Climate statistics HTTP service.
//!
//! Serves recent precipitation, station names, recent temperature
//! observations and date range temperature aggregates from a read-only
//! measurement database.

use std::net::SocketAddr;

pub mod error;
pub mod routes;
pub mod service;
pub mod store;

pub use routes::{router, AppState};
pub use store::ClimateStore;

/// Bind `addr` and serve the API until Ctrl-C.
pub async fn serve(addr: SocketAddr, state: AppState) -> anyhow::Result<()> {
    let listener = tokio::net::TcpListener::bind(addr).await?;
    log::info!("Listening on http://{}", listener.local_addr()?);
    axum::serve(listener, router(state))
        .with_graceful_shutdown(shutdown_signal())
        .await?;
    log::info!("Server stopped");
    Ok(())
}

async fn shutdown_signal() {
    match tokio::signal::ctrl_c().await {
        Ok(()) => log::info!("Shutdown signal received"),
        Err(e) => {
            // Without a signal handler the server can only be killed.
            log::error!("Failed to install Ctrl-C handler: {}", e);
            std::future::pending::<()>().await;
        }
    }
}
