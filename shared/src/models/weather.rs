//! Weather data models

use std::fmt;

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::types::PeriodLabel;

/// A persisted weather observation
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WeatherRecord {
    pub id: i64,
    pub date: PeriodLabel,
    pub temperature_celsius: Option<Decimal>,
    pub precipitation_mm: Option<Decimal>,
    #[serde(default)]
    pub event: ClimateEvent,
    pub created_at: DateTime<Utc>,
}

/// A validated weather observation ready to be appended to the store
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NewWeatherRecord {
    pub date: PeriodLabel,
    pub temperature_celsius: Option<Decimal>,
    pub precipitation_mm: Option<Decimal>,
    #[serde(default)]
    pub event: ClimateEvent,
}

/// Climate event attached to a weather observation.
///
/// `None` is the sentinel for "no event". A missing column, a null and the
/// literal label `None` all map to it.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum ClimateEvent {
    #[default]
    None,
    ElNino,
    LaNina,
    HeatWave,
    /// Free-text event with no risk rule of its own
    Other(String),
}

impl ClimateEvent {
    pub const EL_NINO: &'static str = "El Niño";
    pub const LA_NINA: &'static str = "La Niña";
    pub const HEAT_WAVE: &'static str = "Heat Wave";
    pub const NONE: &'static str = "None";

    /// Map a stored or submitted label to an event
    pub fn from_label(label: Option<&str>) -> Self {
        let label = match label.map(str::trim) {
            None | Some("") => return ClimateEvent::None,
            Some(label) => label,
        };

        match label {
            Self::NONE | "Ninguno" => ClimateEvent::None,
            Self::EL_NINO | "El Nino" => ClimateEvent::ElNino,
            Self::LA_NINA | "La Nina" => ClimateEvent::LaNina,
            Self::HEAT_WAVE | "Ola de Calor" => ClimateEvent::HeatWave,
            other => ClimateEvent::Other(other.to_string()),
        }
    }

    /// Canonical label as stored
    pub fn label(&self) -> &str {
        match self {
            ClimateEvent::None => Self::NONE,
            ClimateEvent::ElNino => Self::EL_NINO,
            ClimateEvent::LaNina => Self::LA_NINA,
            ClimateEvent::HeatWave => Self::HEAT_WAVE,
            ClimateEvent::Other(label) => label,
        }
    }
}

impl fmt::Display for ClimateEvent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl Serialize for ClimateEvent {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.label())
    }
}

impl<'de> Deserialize<'de> for ClimateEvent {
    fn deserialize<D: serde::Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let label = Option::<String>::deserialize(deserializer)?;
        Ok(ClimateEvent::from_label(label.as_deref()))
    }
}
