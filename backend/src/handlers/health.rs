//! Health check handler

use axum::{extract::State, Json};
use serde::Serialize;

use crate::AppState;

/// Service liveness plus the state of the record store behind forecasts
#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
    pub version: &'static str,
    pub database: &'static str,
    /// Crops with at least one recorded sale; absent while the store is down
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tracked_crops: Option<usize>,
}

/// Report whether forecasts can currently be served
pub async fn health_check(State(state): State<AppState>) -> Json<HealthResponse> {
    let tracked_crops = match state.sales.ping().await {
        Ok(()) => state.sales.list_crops().await.ok().map(|crops| crops.len()),
        Err(e) => {
            tracing::warn!(error = %e, "Sales store unreachable from health check");
            None
        }
    };

    let (status, database) = match tracked_crops {
        Some(_) => ("healthy", "connected"),
        None => ("degraded", "disconnected"),
    };

    Json(HealthResponse {
        status,
        version: env!("CARGO_PKG_VERSION"),
        database,
        tracked_crops,
    })
}
