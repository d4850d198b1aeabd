//! HTTP handlers for sales forecasts

use axum::{extract::State, Json};
use serde::Deserialize;
use shared::models::ForecastResult;

use crate::error::AppResult;
use crate::AppState;

/// Forecast request body
#[derive(Debug, Deserialize)]
pub struct ForecastRequest {
    pub crop: String,
}

/// Forecast the next sales volume for a crop
pub async fn create_forecast(
    State(state): State<AppState>,
    Json(request): Json<ForecastRequest>,
) -> AppResult<Json<ForecastResult>> {
    let result = state.forecast_service().forecast(request.crop.trim()).await?;
    Ok(Json(result))
}
