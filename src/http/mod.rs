//! Read-only status API
//!
//! - GET /health - Health check
//! - GET /session - Current session id and state

mod handlers;
mod routes;
mod state;

pub use routes::create_router;
pub use state::AppState;

use anyhow::{Context, Result};
use tracing::info;

/// Serve the status API on `0.0.0.0:<port>` until the listener fails
pub async fn serve(port: u16, state: AppState) -> Result<()> {
    let listener = tokio::net::TcpListener::bind(("0.0.0.0", port))
        .await
        .with_context(|| format!("Failed to bind status API on port {port}"))?;

    info!("Status API listening on {}", listener.local_addr()?);

    axum::serve(listener, create_router(state))
        .await
        .context("Status API server failed")
}
