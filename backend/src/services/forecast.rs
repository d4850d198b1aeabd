//! Sales forecasting service
//!
//! Combines a recency-weighted base estimate, a market trend multiplier and
//! the climate risk factor into a final volume prediction for one crop.

use std::sync::Arc;

use rust_decimal::Decimal;
use shared::models::{sort_history, simple_mean, ForecastError, ForecastResult, Prediction};

use super::climate::ClimateRiskService;
use crate::error::{AppError, AppResult};
use crate::store::SalesStore;

/// Forecasting service for crop sales volume
#[derive(Clone)]
pub struct ForecastService {
    sales: Arc<dyn SalesStore>,
    climate: ClimateRiskService,
}

impl ForecastService {
    /// Create a new ForecastService instance
    pub fn new(sales: Arc<dyn SalesStore>, climate: ClimateRiskService) -> Self {
        Self { sales, climate }
    }

    /// Forecast the next sales volume for a crop.
    ///
    /// A crop without history is returned as an error result and the climate
    /// store is not consulted. Store failures on the sales side propagate.
    pub async fn forecast(&self, crop: &str) -> AppResult<ForecastResult> {
        let mut history = self.sales.fetch_sales_history(crop).await?;

        if history.is_empty() {
            tracing::info!(crop, "No sales history, skipping forecast");
            return Ok(ForecastResult::no_history(crop));
        }

        sort_history(&mut history);
        let volumes: Vec<Decimal> = history.iter().map(|record| record.volume_kg).collect();

        let climate = self.climate.evaluate_climate_risk().await;

        let prediction = match Prediction::compose(&volumes, &climate) {
            Ok(prediction) => prediction,
            Err(ForecastError::EmptyHistory) => return Ok(ForecastResult::no_history(crop)),
            Err(ForecastError::Overflow) => {
                tracing::warn!(crop, sample_size = volumes.len(), "Forecast figures out of range");
                return Err(AppError::ForecastOverflow {
                    crop: crop.to_string(),
                });
            }
        };

        tracing::debug!(
            crop,
            simple_mean = ?simple_mean(&volumes).ok(),
            trend = ?prediction.trend,
            climate_rule = ?climate.rule,
            "Forecast signals computed"
        );
        tracing::info!(
            crop,
            sample_size = prediction.sample_size,
            base_estimate = %prediction.base_estimate,
            final_prediction = %prediction.final_prediction,
            is_alert = prediction.is_alert,
            "Forecast computed"
        );

        Ok(ForecastResult::predicted(crop, prediction))
    }
}
