//! Sales models

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::types::PeriodLabel;

/// A persisted crop sale
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SalesRecord {
    pub id: i64,
    pub crop: String,
    pub date: PeriodLabel,
    pub volume_kg: Decimal,
    pub unit_price: Option<Decimal>,
    pub created_at: DateTime<Utc>,
}

/// A validated sale ready to be appended to the store
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NewSalesRecord {
    pub crop: String,
    pub date: PeriodLabel,
    pub volume_kg: Decimal,
    pub unit_price: Option<Decimal>,
}

/// Sort a history into forecasting order: date ascending, then insertion order
pub fn sort_history(records: &mut [SalesRecord]) {
    records.sort_by(|a, b| a.date.cmp(&b.date).then(a.id.cmp(&b.id)));
}
