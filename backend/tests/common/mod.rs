//! Shared test harness: an in-memory record store and app builder
#![allow(dead_code)]

use std::str::FromStr;
use std::sync::atomic::{AtomicBool, AtomicI64, AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use axum::Router;
use chrono::Utc;
use crop_forecast_backend::error::{AppError, AppResult};
use crop_forecast_backend::services::{ClimateRiskService, ForecastService};
use crop_forecast_backend::store::{SalesStore, WeatherStore};
use crop_forecast_backend::{create_app, AppState, Config};
use rust_decimal::Decimal;
use shared::models::{ClimateEvent, NewSalesRecord, NewWeatherRecord, SalesRecord, WeatherRecord};
use shared::types::PeriodLabel;

/// Helper to create Decimal from string
pub fn dec(s: &str) -> Decimal {
    Decimal::from_str(s).unwrap()
}

/// In-memory store that records how it was used and can simulate outages
#[derive(Default)]
pub struct MemoryStore {
    sales: Mutex<Vec<SalesRecord>>,
    weather: Mutex<Vec<WeatherRecord>>,
    next_id: AtomicI64,
    pub weather_fetches: AtomicUsize,
    pub sales_down: AtomicBool,
    pub weather_down: AtomicBool,
    pub sales_malformed: AtomicBool,
}

impl MemoryStore {
    pub fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }

    fn next_id(&self) -> i64 {
        self.next_id.fetch_add(1, Ordering::SeqCst) + 1
    }

    pub fn add_sale(&self, crop: &str, date: &str, volume: &str) {
        let record = SalesRecord {
            id: self.next_id(),
            crop: crop.to_string(),
            date: PeriodLabel::parse(date).unwrap(),
            volume_kg: dec(volume),
            unit_price: None,
            created_at: Utc::now(),
        };
        self.sales.lock().unwrap().push(record);
    }

    pub fn add_weather(&self, date: &str, temperature: Option<&str>, event: &str) {
        let record = WeatherRecord {
            id: self.next_id(),
            date: PeriodLabel::parse(date).unwrap(),
            temperature_celsius: temperature.map(dec),
            precipitation_mm: Some(Decimal::ZERO),
            event: ClimateEvent::from_label(Some(event)),
            created_at: Utc::now(),
        };
        self.weather.lock().unwrap().push(record);
    }

    pub fn sales_count(&self) -> usize {
        self.sales.lock().unwrap().len()
    }

    pub fn weather_fetch_count(&self) -> usize {
        self.weather_fetches.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl SalesStore for MemoryStore {
    async fn fetch_sales_history(&self, crop: &str) -> AppResult<Vec<SalesRecord>> {
        if self.sales_down.load(Ordering::SeqCst) {
            return Err(AppError::SalesDataUnavailable(sqlx::Error::PoolTimedOut));
        }
        if self.sales_malformed.load(Ordering::SeqCst) {
            return Err(AppError::MalformedRecord {
                record: "sales #1".to_string(),
                field: "volume_kg".to_string(),
            });
        }

        let mut history: Vec<SalesRecord> = self
            .sales
            .lock()
            .unwrap()
            .iter()
            .filter(|s| s.crop == crop)
            .cloned()
            .collect();
        history.sort_by(|a, b| a.date.cmp(&b.date).then(a.id.cmp(&b.id)));
        Ok(history)
    }

    async fn list_sales(&self, crop: Option<&str>) -> AppResult<Vec<SalesRecord>> {
        let mut sales: Vec<SalesRecord> = self
            .sales
            .lock()
            .unwrap()
            .iter()
            .filter(|s| crop.map_or(true, |c| s.crop == c))
            .cloned()
            .collect();
        sales.sort_by(|a, b| b.date.cmp(&a.date).then(b.id.cmp(&a.id)));
        Ok(sales)
    }

    async fn list_crops(&self) -> AppResult<Vec<String>> {
        let mut crops: Vec<String> = self
            .sales
            .lock()
            .unwrap()
            .iter()
            .map(|s| s.crop.clone())
            .collect();
        crops.sort();
        crops.dedup();
        Ok(crops)
    }

    async fn insert_sale(&self, sale: &NewSalesRecord) -> AppResult<SalesRecord> {
        let record = SalesRecord {
            id: self.next_id(),
            crop: sale.crop.clone(),
            date: sale.date.clone(),
            volume_kg: sale.volume_kg,
            unit_price: sale.unit_price,
            created_at: Utc::now(),
        };
        self.sales.lock().unwrap().push(record.clone());
        Ok(record)
    }

    async fn insert_sales(&self, sales: &[NewSalesRecord]) -> AppResult<u64> {
        for sale in sales {
            self.insert_sale(sale).await?;
        }
        Ok(sales.len() as u64)
    }

    async fn ping(&self) -> AppResult<()> {
        if self.sales_down.load(Ordering::SeqCst) {
            return Err(AppError::DatabaseError(sqlx::Error::PoolTimedOut));
        }
        Ok(())
    }
}

#[async_trait]
impl WeatherStore for MemoryStore {
    async fn fetch_latest_weather(&self) -> AppResult<Option<WeatherRecord>> {
        self.weather_fetches.fetch_add(1, Ordering::SeqCst);
        if self.weather_down.load(Ordering::SeqCst) {
            return Err(AppError::ClimateDataUnavailable(sqlx::Error::PoolTimedOut));
        }

        let latest = self
            .weather
            .lock()
            .unwrap()
            .iter()
            .max_by(|a, b| a.date.cmp(&b.date).then(a.id.cmp(&b.id)))
            .cloned();
        Ok(latest)
    }

    async fn insert_weather(&self, weather: &NewWeatherRecord) -> AppResult<WeatherRecord> {
        let record = WeatherRecord {
            id: self.next_id(),
            date: weather.date.clone(),
            temperature_celsius: weather.temperature_celsius,
            precipitation_mm: weather.precipitation_mm,
            event: weather.event.clone(),
            created_at: Utc::now(),
        };
        self.weather.lock().unwrap().push(record.clone());
        Ok(record)
    }
}

/// Forecast service wired to the memory store
pub fn forecast_service(store: &Arc<MemoryStore>) -> ForecastService {
    ForecastService::new(store.clone(), ClimateRiskService::new(store.clone()))
}

/// Full router wired to the memory store
pub fn test_app(store: &Arc<MemoryStore>) -> Router {
    let state = AppState {
        sales: store.clone(),
        weather: store.clone(),
        config: Arc::new(Config::default()),
    };
    create_app(state)
}
