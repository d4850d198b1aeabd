//! Sales service for recording, listing and bulk importing crop sales

use std::sync::Arc;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use shared::models::{NewSalesRecord, SalesRecord};
use shared::types::PeriodLabel;
use shared::validation::{validate_crop_name, validate_unit_price, validate_volume};

use crate::error::{AppError, AppResult};
use crate::store::SalesStore;

/// Sales service for managing sales records
#[derive(Clone)]
pub struct SalesService {
    sales: Arc<dyn SalesStore>,
}

/// Input for recording a sale
#[derive(Debug, Clone, Deserialize)]
pub struct RecordSaleInput {
    pub crop: String,
    pub date: String,
    pub volume_kg: Decimal,
    pub unit_price: Option<Decimal>,
}

/// One row of a sales CSV upload.
///
/// Legacy exports use Spanish headers, accepted as aliases.
#[derive(Debug, Deserialize)]
struct SalesCsvRow {
    #[serde(alias = "cultivo")]
    crop: String,
    #[serde(alias = "fecha")]
    date: String,
    #[serde(alias = "volumen_kg")]
    volume_kg: Decimal,
    #[serde(default, alias = "precio_unitario")]
    unit_price: Option<Decimal>,
}

/// Outcome of a CSV import
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct ImportSummary {
    pub imported: u64,
}

impl RecordSaleInput {
    /// Validate and normalise into a record ready for the store
    pub fn validate(self) -> AppResult<NewSalesRecord> {
        let crop = self.crop.trim().to_string();
        validate_crop_name(&crop).map_err(|msg| AppError::validation("crop", msg))?;

        let date = PeriodLabel::parse(&self.date)
            .map_err(|_| AppError::validation("date", "Date must be YYYY-MM-DD or YYYY-MM"))?;

        validate_volume(self.volume_kg).map_err(|msg| AppError::validation("volume_kg", msg))?;
        validate_unit_price(self.unit_price)
            .map_err(|msg| AppError::validation("unit_price", msg))?;

        Ok(NewSalesRecord {
            crop,
            date,
            volume_kg: self.volume_kg,
            unit_price: self.unit_price,
        })
    }
}

impl From<SalesCsvRow> for RecordSaleInput {
    fn from(row: SalesCsvRow) -> Self {
        Self {
            crop: row.crop,
            date: row.date,
            volume_kg: row.volume_kg,
            unit_price: row.unit_price,
        }
    }
}

impl SalesService {
    /// Create a new SalesService instance
    pub fn new(sales: Arc<dyn SalesStore>) -> Self {
        Self { sales }
    }

    /// Record a single sale
    pub async fn record_sale(&self, input: RecordSaleInput) -> AppResult<SalesRecord> {
        let sale = input.validate()?;
        let record = self.sales.insert_sale(&sale).await?;

        tracing::info!(
            id = record.id,
            crop = %record.crop,
            date = %record.date,
            "Sale recorded"
        );
        Ok(record)
    }

    /// List sales newest first, optionally for one crop
    pub async fn list_sales(&self, crop: Option<&str>) -> AppResult<Vec<SalesRecord>> {
        let crop = crop.map(str::trim).filter(|c| !c.is_empty());
        self.sales.list_sales(crop).await
    }

    /// List every crop with at least one sale
    pub async fn list_crops(&self) -> AppResult<Vec<String>> {
        self.sales.list_crops().await
    }

    /// Import sales from CSV text.
    ///
    /// Every row is validated before anything is written; one bad row rejects
    /// the whole file. Row numbers in errors count data rows from 1.
    pub async fn import_csv(&self, data: &[u8], max_rows: usize) -> AppResult<ImportSummary> {
        let sales = Self::parse_csv(data, max_rows)?;
        let imported = self.sales.insert_sales(&sales).await?;

        tracing::info!(imported, "Sales CSV imported");
        Ok(ImportSummary { imported })
    }

    /// Parse and validate a CSV upload without touching the store
    pub fn parse_csv(data: &[u8], max_rows: usize) -> AppResult<Vec<NewSalesRecord>> {
        let mut reader = csv::ReaderBuilder::new()
            .trim(csv::Trim::All)
            .from_reader(data);

        let mut sales = Vec::new();
        for (index, result) in reader.deserialize::<SalesCsvRow>().enumerate() {
            let row = index + 1;
            if row > max_rows {
                return Err(AppError::CsvImport {
                    row,
                    message: format!("file exceeds the limit of {} rows", max_rows),
                });
            }

            let parsed = result.map_err(|e| AppError::CsvImport {
                row,
                message: e.to_string(),
            })?;
            let sale = RecordSaleInput::from(parsed)
                .validate()
                .map_err(|e| AppError::CsvImport {
                    row,
                    message: e.to_string(),
                })?;
            sales.push(sale);
        }

        if sales.is_empty() {
            return Err(AppError::validation("file", "CSV file contains no sales rows"));
        }

        Ok(sales)
    }
}
