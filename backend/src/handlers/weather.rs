//! HTTP handlers for weather observations

use axum::{extract::State, http::StatusCode, Json};
use shared::models::WeatherRecord;

use crate::error::AppResult;
use crate::services::weather::{RecordWeatherInput, WeatherService};
use crate::AppState;

/// Record a weather observation
pub async fn record_weather(
    State(state): State<AppState>,
    Json(input): Json<RecordWeatherInput>,
) -> AppResult<(StatusCode, Json<WeatherRecord>)> {
    let service = WeatherService::new(state.weather);
    let record = service.record_weather(input).await?;
    Ok((StatusCode::CREATED, Json(record)))
}

/// Get the most recent weather observation
pub async fn get_latest_weather(
    State(state): State<AppState>,
) -> AppResult<Json<Option<WeatherRecord>>> {
    let service = WeatherService::new(state.weather);
    let latest = service.latest_weather().await?;
    Ok(Json(latest))
}
