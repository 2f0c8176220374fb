//! REST API for the computed household state and load profiles.
//!
//! Provides two GET endpoints:
//! - `/state` for scenario costs, grid metrics, emissions and savings
//! - `/profile` for load profile samples with optional view and range filtering

mod handlers;
mod types;

use std::net::SocketAddr;
use std::sync::Arc;

use axum::Router;
use axum::routing::get;
use tracing::info;

pub use types::{ErrorResponse, ProfileQuery, ProfileView, StateResponse};

use crate::sim::aggregate::MultiDeviceState;
use crate::sim::types::PlannerConfig;

/// Immutable application state shared across all request handlers.
///
/// Built once after the household is recomputed and wrapped in `Arc`;
/// all data is read-only.
pub struct AppState {
    /// Calculation constants the state was computed with.
    pub config: PlannerConfig,
    /// Computed household state.
    pub state: MultiDeviceState,
}

/// Builds the axum router with all API routes.
pub fn router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/state", get(handlers::get_state))
        .route("/profile", get(handlers::get_profile))
        .with_state(state)
}

/// Binds to the given address and serves the API until the server stops.
///
/// # Errors
///
/// Returns an `io::Error` if the listener cannot bind or the server fails.
pub async fn serve(state: Arc<AppState>, addr: SocketAddr) -> std::io::Result<()> {
    let app = router(state);
    let listener = tokio::net::TcpListener::bind(addr).await?;
    info!(%addr, "API server listening");
    axum::serve(listener, app).await
}
