//! Weather service for storing and retrieving weather observations

use std::sync::Arc;

use rust_decimal::Decimal;
use serde::Deserialize;
use shared::models::{ClimateEvent, NewWeatherRecord, WeatherRecord};
use shared::types::PeriodLabel;
use shared::validation::{validate_precipitation, validate_temperature};

use crate::error::{AppError, AppResult};
use crate::store::WeatherStore;

/// Weather service for managing weather data
#[derive(Clone)]
pub struct WeatherService {
    weather: Arc<dyn WeatherStore>,
}

/// Input for recording a weather observation
#[derive(Debug, Clone, Deserialize)]
pub struct RecordWeatherInput {
    pub date: String,
    pub temperature_celsius: Option<Decimal>,
    pub precipitation_mm: Option<Decimal>,
    #[serde(default)]
    pub event: ClimateEvent,
}

impl RecordWeatherInput {
    /// Validate and normalise into a record ready for the store
    pub fn validate(self) -> AppResult<NewWeatherRecord> {
        let date = PeriodLabel::parse(&self.date)
            .map_err(|_| AppError::validation("date", "Date must be YYYY-MM-DD or YYYY-MM"))?;
        validate_temperature(self.temperature_celsius)
            .map_err(|msg| AppError::validation("temperature_celsius", msg))?;
        validate_precipitation(self.precipitation_mm)
            .map_err(|msg| AppError::validation("precipitation_mm", msg))?;

        Ok(NewWeatherRecord {
            date,
            temperature_celsius: self.temperature_celsius,
            precipitation_mm: self.precipitation_mm,
            event: self.event,
        })
    }
}

impl WeatherService {
    /// Create a new WeatherService instance
    pub fn new(weather: Arc<dyn WeatherStore>) -> Self {
        Self { weather }
    }

    /// Record a weather observation
    pub async fn record_weather(&self, input: RecordWeatherInput) -> AppResult<WeatherRecord> {
        let observation = input.validate()?;
        let record = self.weather.insert_weather(&observation).await?;

        tracing::info!(
            id = record.id,
            date = %record.date,
            event = %record.event,
            "Weather recorded"
        );
        Ok(record)
    }

    /// The observation the climate risk evaluation would use
    pub async fn latest_weather(&self) -> AppResult<Option<WeatherRecord>> {
        self.weather.fetch_latest_weather().await
    }
}
