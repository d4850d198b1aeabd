//! PostgreSQL-backed record store

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use shared::models::{ClimateEvent, NewSalesRecord, NewWeatherRecord, SalesRecord, WeatherRecord};
use shared::types::PeriodLabel;
use sqlx::{FromRow, PgPool};

use super::{SalesStore, WeatherStore};
use crate::error::{AppError, AppResult};

/// Store backed by the `sales` and `weather` tables
#[derive(Clone)]
pub struct PgStore {
    db: PgPool,
}

/// Raw sales row; volume is nullable here so a bad row is reported, not guessed
#[derive(Debug, FromRow)]
struct SalesRow {
    id: i64,
    crop: String,
    period: String,
    volume_kg: Option<Decimal>,
    unit_price: Option<Decimal>,
    created_at: DateTime<Utc>,
}

impl TryFrom<SalesRow> for SalesRecord {
    type Error = AppError;

    fn try_from(row: SalesRow) -> Result<Self, Self::Error> {
        let malformed = |field: &str| AppError::MalformedRecord {
            record: format!("sales #{}", row.id),
            field: field.to_string(),
        };

        let date = PeriodLabel::parse(&row.period).map_err(|_| malformed("period"))?;
        let volume_kg = row
            .volume_kg
            .filter(|v| *v >= Decimal::ZERO)
            .ok_or_else(|| malformed("volume_kg"))?;

        Ok(SalesRecord {
            id: row.id,
            crop: row.crop,
            date,
            volume_kg,
            unit_price: row.unit_price,
            created_at: row.created_at,
        })
    }
}

#[derive(Debug, FromRow)]
struct WeatherRow {
    id: i64,
    period: String,
    temperature_celsius: Option<Decimal>,
    precipitation_mm: Option<Decimal>,
    event: Option<String>,
    created_at: DateTime<Utc>,
}

impl TryFrom<WeatherRow> for WeatherRecord {
    type Error = AppError;

    fn try_from(row: WeatherRow) -> Result<Self, Self::Error> {
        let date = PeriodLabel::parse(&row.period).map_err(|_| AppError::MalformedRecord {
            record: format!("weather #{}", row.id),
            field: "period".to_string(),
        })?;

        Ok(WeatherRecord {
            id: row.id,
            date,
            temperature_celsius: row.temperature_celsius,
            precipitation_mm: row.precipitation_mm,
            event: ClimateEvent::from_label(row.event.as_deref()),
            created_at: row.created_at,
        })
    }
}

impl PgStore {
    /// Create a new PgStore instance
    pub fn new(db: PgPool) -> Self {
        Self { db }
    }
}

#[async_trait]
impl SalesStore for PgStore {
    async fn fetch_sales_history(&self, crop: &str) -> AppResult<Vec<SalesRecord>> {
        let rows = sqlx::query_as::<_, SalesRow>(
            r#"
            SELECT id, crop, period, volume_kg, unit_price, created_at
            FROM sales
            WHERE crop = $1
            ORDER BY period COLLATE "C" ASC, id ASC
            "#,
        )
        .bind(crop)
        .fetch_all(&self.db)
        .await
        .map_err(AppError::SalesDataUnavailable)?;

        rows.into_iter().map(SalesRecord::try_from).collect()
    }

    async fn list_sales(&self, crop: Option<&str>) -> AppResult<Vec<SalesRecord>> {
        let rows = sqlx::query_as::<_, SalesRow>(
            r#"
            SELECT id, crop, period, volume_kg, unit_price, created_at
            FROM sales
            WHERE ($1::TEXT IS NULL OR crop = $1)
            ORDER BY period COLLATE "C" DESC, id DESC
            "#,
        )
        .bind(crop)
        .fetch_all(&self.db)
        .await?;

        rows.into_iter().map(SalesRecord::try_from).collect()
    }

    async fn list_crops(&self) -> AppResult<Vec<String>> {
        let crops = sqlx::query_scalar::<_, String>(
            "SELECT DISTINCT crop FROM sales ORDER BY crop",
        )
        .fetch_all(&self.db)
        .await?;

        Ok(crops)
    }

    async fn insert_sale(&self, sale: &NewSalesRecord) -> AppResult<SalesRecord> {
        let row = sqlx::query_as::<_, SalesRow>(
            r#"
            INSERT INTO sales (crop, period, volume_kg, unit_price)
            VALUES ($1, $2, $3, $4)
            RETURNING id, crop, period, volume_kg, unit_price, created_at
            "#,
        )
        .bind(&sale.crop)
        .bind(sale.date.as_str())
        .bind(sale.volume_kg)
        .bind(sale.unit_price)
        .fetch_one(&self.db)
        .await?;

        row.try_into()
    }

    async fn insert_sales(&self, sales: &[NewSalesRecord]) -> AppResult<u64> {
        let mut tx = self.db.begin().await?;
        let mut inserted = 0;

        for sale in sales {
            let result = sqlx::query(
                "INSERT INTO sales (crop, period, volume_kg, unit_price) VALUES ($1, $2, $3, $4)",
            )
            .bind(&sale.crop)
            .bind(sale.date.as_str())
            .bind(sale.volume_kg)
            .bind(sale.unit_price)
            .execute(&mut *tx)
            .await?;
            inserted += result.rows_affected();
        }

        tx.commit().await?;
        Ok(inserted)
    }

    async fn ping(&self) -> AppResult<()> {
        sqlx::query("SELECT 1").execute(&self.db).await?;
        Ok(())
    }
}

#[async_trait]
impl WeatherStore for PgStore {
    async fn fetch_latest_weather(&self) -> AppResult<Option<WeatherRecord>> {
        let row = sqlx::query_as::<_, WeatherRow>(
            r#"
            SELECT id, period, temperature_celsius, precipitation_mm, event, created_at
            FROM weather
            ORDER BY period COLLATE "C" DESC, id DESC
            LIMIT 1
            "#,
        )
        .fetch_optional(&self.db)
        .await
        .map_err(AppError::ClimateDataUnavailable)?;

        row.map(WeatherRecord::try_from).transpose()
    }

    async fn insert_weather(&self, weather: &NewWeatherRecord) -> AppResult<WeatherRecord> {
        let row = sqlx::query_as::<_, WeatherRow>(
            r#"
            INSERT INTO weather (period, temperature_celsius, precipitation_mm, event)
            VALUES ($1, $2, $3, $4)
            RETURNING id, period, temperature_celsius, precipitation_mm, event, created_at
            "#,
        )
        .bind(weather.date.as_str())
        .bind(weather.temperature_celsius)
        .bind(weather.precipitation_mm)
        .bind(weather.event.label())
        .fetch_one(&self.db)
        .await?;

        row.try_into()
    }
}
