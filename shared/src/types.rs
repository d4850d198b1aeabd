//! Common types used across the platform

use std::fmt;
use std::str::FromStr;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// A date or period label such as `2023-10-01` or `2023-10`.
///
/// Labels are stored in canonical zero-padded form so that lexicographic
/// order equals chronological order. A month label sorts before every day
/// label of the same month.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct PeriodLabel(String);

/// Error returned when a period label cannot be parsed
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("invalid period label '{0}': expected YYYY-MM-DD or YYYY-MM")]
pub struct PeriodLabelError(pub String);

impl PeriodLabel {
    /// Parse a label, accepting a full date or a year-month period
    pub fn parse(raw: &str) -> Result<Self, PeriodLabelError> {
        let trimmed = raw.trim();

        if let Ok(date) = NaiveDate::parse_from_str(trimmed, "%Y-%m-%d") {
            return Ok(Self(date.format("%Y-%m-%d").to_string()));
        }

        // chrono cannot parse a date without a day, so pin it to the first
        let month_start = format!("{}-01", trimmed);
        if let Ok(date) = NaiveDate::parse_from_str(&month_start, "%Y-%m-%d") {
            return Ok(Self(date.format("%Y-%m").to_string()));
        }

        Err(PeriodLabelError(raw.to_string()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Whether the label names a whole month rather than a single day
    pub fn is_month(&self) -> bool {
        self.0.len() == 7
    }
}

impl FromStr for PeriodLabel {
    type Err = PeriodLabelError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl TryFrom<String> for PeriodLabel {
    type Error = PeriodLabelError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::parse(&value)
    }
}

impl From<PeriodLabel> for String {
    fn from(label: PeriodLabel) -> Self {
        label.0
    }
}

impl fmt::Display for PeriodLabel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}
