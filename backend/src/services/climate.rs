//! Climate risk evaluation from the most recent weather observation

use std::sync::Arc;

use shared::models::ClimateRisk;

use crate::store::WeatherStore;

/// Turns the latest weather record into a forecast risk factor
#[derive(Clone)]
pub struct ClimateRiskService {
    weather: Arc<dyn WeatherStore>,
}

impl ClimateRiskService {
    /// Create a new ClimateRiskService instance
    pub fn new(weather: Arc<dyn WeatherStore>) -> Self {
        Self { weather }
    }

    /// Evaluate the climate risk factor.
    ///
    /// Never fails: an empty or unreachable weather store yields the neutral
    /// factor of 1.0 without an alert.
    pub async fn evaluate_climate_risk(&self) -> ClimateRisk {
        let latest = match self.weather.fetch_latest_weather().await {
            Ok(latest) => latest,
            Err(e) => {
                tracing::warn!("Climate data unavailable, using neutral factor: {}", e);
                None
            }
        };

        let risk = ClimateRisk::assess(latest.as_ref());
        tracing::debug!(
            rule = ?risk.rule,
            factor = %risk.factor,
            is_alert = risk.is_alert,
            "Climate risk evaluated"
        );
        risk
    }
}
