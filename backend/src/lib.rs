//! Crop Sales Forecasting Platform - Backend
//!
//! Records crop sales and weather observations and forecasts future sales
//! volume per crop, adjusted for market trend and climate risk.

use std::sync::Arc;

use axum::{routing::get, Router};
use tower_http::{
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};

pub mod config;
pub mod error;
pub mod handlers;
pub mod routes;
pub mod services;
pub mod store;

pub use config::Config;

use services::{ClimateRiskService, ForecastService};
use store::{PgStore, SalesStore, WeatherStore};

/// Application state shared across handlers
#[derive(Clone)]
pub struct AppState {
    pub sales: Arc<dyn SalesStore>,
    pub weather: Arc<dyn WeatherStore>,
    pub config: Arc<Config>,
}

impl AppState {
    /// State backed by a single PostgreSQL pool for both record kinds
    pub fn from_pool(db: sqlx::PgPool, config: Config) -> Self {
        let store = Arc::new(PgStore::new(db));
        Self {
            sales: store.clone(),
            weather: store,
            config: Arc::new(config),
        }
    }

    pub fn forecast_service(&self) -> ForecastService {
        ForecastService::new(
            self.sales.clone(),
            ClimateRiskService::new(self.weather.clone()),
        )
    }
}

/// Create the application router with all routes and middleware
pub fn create_app(state: AppState) -> Router {
    // CORS configuration
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .route("/", get(root))
        .route("/health", get(health_check))
        .nest("/api/v1", routes::api_routes())
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        .with_state(state)
}

/// Root endpoint
async fn root() -> &'static str {
    "Crop Sales Forecasting Platform API v1.0"
}

/// Health check endpoint
async fn health_check() -> &'static str {
    "OK"
}
