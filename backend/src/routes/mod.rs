//! Route definitions for the Crop Sales Forecasting Platform

use axum::{
    routing::{get, post},
    Router,
};

use crate::{handlers, AppState};

/// Create API routes
pub fn api_routes() -> Router<AppState> {
    Router::new()
        // Health check
        .route("/health", get(handlers::health_check))
        // Crops with recorded sales
        .route("/crops", get(handlers::list_crops))
        // Sales records
        .nest("/sales", sales_routes())
        // Weather observations
        .nest("/weather", weather_routes())
        // Forecasts
        .route("/forecasts", post(handlers::create_forecast))
}

/// Sales routes
fn sales_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(handlers::list_sales).post(handlers::record_sale))
        .route("/import", post(handlers::import_sales_csv))
}

/// Weather routes
fn weather_routes() -> Router<AppState> {
    Router::new()
        .route("/", post(handlers::record_weather))
        .route("/latest", get(handlers::get_latest_weather))
}
