//! Record store access
//!
//! Sales and weather records live in an external store. The services only see
//! these traits so the forecasting pipeline does not depend on a database.

use async_trait::async_trait;
use shared::models::{NewSalesRecord, NewWeatherRecord, SalesRecord, WeatherRecord};

use crate::error::AppResult;

pub mod postgres;

pub use postgres::PgStore;

/// Read and append access to sales records
#[async_trait]
pub trait SalesStore: Send + Sync {
    /// Complete history for a crop, oldest first.
    ///
    /// Failing to reach the store is `AppError::SalesDataUnavailable`.
    async fn fetch_sales_history(&self, crop: &str) -> AppResult<Vec<SalesRecord>>;

    /// All sales, newest first, optionally limited to one crop
    async fn list_sales(&self, crop: Option<&str>) -> AppResult<Vec<SalesRecord>>;

    /// Distinct crop names in alphabetical order
    async fn list_crops(&self) -> AppResult<Vec<String>>;

    async fn insert_sale(&self, sale: &NewSalesRecord) -> AppResult<SalesRecord>;

    /// Insert every sale or none of them
    async fn insert_sales(&self, sales: &[NewSalesRecord]) -> AppResult<u64>;

    /// Check the store is reachable
    async fn ping(&self) -> AppResult<()>;
}

/// Read and append access to weather records
#[async_trait]
pub trait WeatherStore: Send + Sync {
    /// Most recent observation by date, ties broken by newest id.
    ///
    /// Failing to reach the store is `AppError::ClimateDataUnavailable`.
    async fn fetch_latest_weather(&self) -> AppResult<Option<WeatherRecord>>;

    async fn insert_weather(&self, weather: &NewWeatherRecord) -> AppResult<WeatherRecord>;
}
