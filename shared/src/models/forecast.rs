//! Forecast models and the pure parts of the forecasting pipeline
//!
//! Everything here is a function of already-fetched records. The services in
//! the backend do the fetching and call into these helpers.

use rust_decimal::prelude::ToPrimitive;
use rust_decimal::{Decimal, RoundingStrategy};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use super::{ClimateEvent, WeatherRecord};

/// Temperature above which the heat rule fires (strictly greater)
pub const HEAT_THRESHOLD_CELSIUS: i64 = 30;

/// Decimal places kept in forecast figures
pub const FORECAST_SCALE: u32 = 2;

// ============================================================================
// Climate risk
// ============================================================================

/// The climate rule that decided a risk factor, in priority order
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ClimateRule {
    NoData,
    ElNino,
    LaNina,
    HeatStress,
    Normal,
}

impl ClimateRule {
    /// Pick the first matching rule for an observation
    pub fn for_observation(event: &ClimateEvent, temperature: Option<Decimal>) -> Self {
        let too_hot = temperature
            .map(|t| t > Decimal::from(HEAT_THRESHOLD_CELSIUS))
            .unwrap_or(false);

        match event {
            ClimateEvent::ElNino => ClimateRule::ElNino,
            ClimateEvent::LaNina => ClimateRule::LaNina,
            ClimateEvent::HeatWave => ClimateRule::HeatStress,
            _ if too_hot => ClimateRule::HeatStress,
            _ => ClimateRule::Normal,
        }
    }

    /// Multiplicative factor applied to the forecast
    pub fn factor(&self) -> Decimal {
        match self {
            ClimateRule::ElNino => Decimal::new(80, 2),
            ClimateRule::LaNina => Decimal::new(90, 2),
            ClimateRule::HeatStress => Decimal::new(85, 2),
            ClimateRule::NoData | ClimateRule::Normal => Decimal::ONE,
        }
    }

    pub fn is_alert(&self) -> bool {
        self.factor() < Decimal::ONE
    }

    pub fn message(&self) -> &'static str {
        match self {
            ClimateRule::NoData => "No recent climate data.",
            ClimateRule::ElNino => "ALERT: 'El Niño' detected. High risk.",
            ClimateRule::LaNina => "CAUTION: 'La Niña' detected. Moderate risk.",
            ClimateRule::HeatStress => "ALERT: High temperatures detected.",
            ClimateRule::Normal => "Normal climate conditions.",
        }
    }
}

/// Outcome of the climate risk evaluation
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ClimateRisk {
    pub rule: ClimateRule,
    pub factor: Decimal,
    pub message: String,
    pub is_alert: bool,
}

impl ClimateRisk {
    fn from_rule(rule: ClimateRule) -> Self {
        Self {
            rule,
            factor: rule.factor(),
            message: rule.message().to_string(),
            is_alert: rule.is_alert(),
        }
    }

    /// Neutral default used when there is no usable weather observation
    pub fn neutral() -> Self {
        Self::from_rule(ClimateRule::NoData)
    }

    /// Assess the most recent weather observation, if any
    pub fn assess(latest: Option<&WeatherRecord>) -> Self {
        match latest {
            Some(record) => Self::from_rule(ClimateRule::for_observation(
                &record.event,
                record.temperature_celsius,
            )),
            None => Self::neutral(),
        }
    }

    /// Percentage the forecast was cut by, rounded to a whole percent
    pub fn adjustment_percent(&self) -> i32 {
        ((Decimal::ONE - self.factor) * Decimal::ONE_HUNDRED)
            .round_dp_with_strategy(0, RoundingStrategy::MidpointNearestEven)
            .to_i32()
            .unwrap_or(0)
    }
}

// ============================================================================
// Sales history math
// ============================================================================

/// Reasons the forecast math cannot produce a figure
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ForecastError {
    #[error("sales history is empty")]
    EmptyHistory,
    #[error("sales volumes are too large to forecast")]
    Overflow,
}

fn checked_total(volumes: &[Decimal]) -> Result<Decimal, ForecastError> {
    volumes.iter().try_fold(Decimal::ZERO, |acc, volume| {
        acc.checked_add(*volume).ok_or(ForecastError::Overflow)
    })
}

/// Recency-weighted mean of volumes given oldest first.
///
/// Weights run 1..=n so the latest volume carries the most weight.
pub fn weighted_base(volumes: &[Decimal]) -> Result<Decimal, ForecastError> {
    if volumes.is_empty() {
        return Err(ForecastError::EmptyHistory);
    }

    let numerator = volumes
        .iter()
        .zip(1i64..)
        .try_fold(Decimal::ZERO, |acc, (volume, weight)| {
            volume
                .checked_mul(Decimal::from(weight))
                .and_then(|weighted| acc.checked_add(weighted))
                .ok_or(ForecastError::Overflow)
        })?;
    let n = volumes.len() as i64;
    let denominator = Decimal::from(n * (n + 1) / 2);

    numerator
        .checked_div(denominator)
        .ok_or(ForecastError::Overflow)
}

/// Unweighted mean of volumes
pub fn simple_mean(volumes: &[Decimal]) -> Result<Decimal, ForecastError> {
    if volumes.is_empty() {
        return Err(ForecastError::EmptyHistory);
    }
    checked_total(volumes)?
        .checked_div(Decimal::from(volumes.len() as i64))
        .ok_or(ForecastError::Overflow)
}

/// Market direction of the latest volume against the history's simple mean
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MarketTrend {
    Rising,
    Falling,
    Stable,
}

impl MarketTrend {
    /// Classify a history given oldest first.
    ///
    /// Compares `latest * n` with the volume total, which avoids dividing.
    pub fn from_history(volumes: &[Decimal]) -> Result<Self, ForecastError> {
        let Some(latest) = volumes.last() else {
            return Ok(MarketTrend::Stable);
        };
        let total = checked_total(volumes)?;
        let scaled_latest = latest
            .checked_mul(Decimal::from(volumes.len() as i64))
            .ok_or(ForecastError::Overflow)?;

        Ok(match scaled_latest.cmp(&total) {
            std::cmp::Ordering::Greater => MarketTrend::Rising,
            std::cmp::Ordering::Less => MarketTrend::Falling,
            std::cmp::Ordering::Equal => MarketTrend::Stable,
        })
    }

    pub fn multiplier(&self) -> Decimal {
        match self {
            MarketTrend::Rising => Decimal::new(105, 2),
            MarketTrend::Falling => Decimal::new(95, 2),
            MarketTrend::Stable => Decimal::ONE,
        }
    }
}

/// Round a forecast figure, half to even
pub fn round_figure(value: Decimal) -> Decimal {
    value.round_dp_with_strategy(FORECAST_SCALE, RoundingStrategy::MidpointNearestEven)
}

// ============================================================================
// Forecast result
// ============================================================================

/// Prediction figures and their explanation
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Prediction {
    pub base_estimate: Decimal,
    pub trend: MarketTrend,
    pub trend_multiplier: Decimal,
    pub adjustment_percent: i32,
    pub final_prediction: Decimal,
    pub climate_message: String,
    pub is_alert: bool,
    pub sample_size: usize,
}

impl Prediction {
    /// Combine a non-empty, date-ascending volume history with a climate risk.
    ///
    /// Fails on an empty history or when the figures leave the decimal range.
    pub fn compose(volumes: &[Decimal], climate: &ClimateRisk) -> Result<Self, ForecastError> {
        let base = weighted_base(volumes)?;
        let trend = MarketTrend::from_history(volumes)?;
        let final_prediction = base
            .checked_mul(trend.multiplier())
            .and_then(|adjusted| adjusted.checked_mul(climate.factor))
            .ok_or(ForecastError::Overflow)?;

        Ok(Self {
            base_estimate: round_figure(base),
            trend,
            trend_multiplier: trend.multiplier(),
            adjustment_percent: climate.adjustment_percent(),
            final_prediction: round_figure(final_prediction),
            climate_message: climate.message.clone(),
            is_alert: climate.is_alert,
            sample_size: volumes.len(),
        })
    }
}

/// Result of a forecast request.
///
/// A crop without sales history is a normal outcome carried as `error: true`
/// with a message, not a fault.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ForecastResult {
    pub crop: String,
    pub error: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    #[serde(flatten)]
    pub prediction: Option<Prediction>,
}

impl ForecastResult {
    pub fn predicted(crop: impl Into<String>, prediction: Prediction) -> Self {
        Self {
            crop: crop.into(),
            error: false,
            message: None,
            prediction: Some(prediction),
        }
    }

    pub fn no_history(crop: impl Into<String>) -> Self {
        let crop = crop.into();
        Self {
            message: Some(format!("No historical data for {}.", crop)),
            crop,
            error: true,
            prediction: None,
        }
    }
}
