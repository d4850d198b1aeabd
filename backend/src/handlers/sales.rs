//! HTTP handlers for sales records

use axum::{
    extract::{Multipart, Query, State},
    http::StatusCode,
    Json,
};
use serde::Deserialize;
use shared::models::SalesRecord;

use crate::error::{AppError, AppResult};
use crate::services::sales::{ImportSummary, RecordSaleInput, SalesService};
use crate::AppState;

/// Multipart field carrying the CSV upload
const CSV_FIELD: &str = "file";

/// Query parameters for listing sales
#[derive(Debug, Deserialize)]
pub struct SalesQuery {
    pub crop: Option<String>,
}

/// Record a single sale
pub async fn record_sale(
    State(state): State<AppState>,
    Json(input): Json<RecordSaleInput>,
) -> AppResult<(StatusCode, Json<SalesRecord>)> {
    let service = SalesService::new(state.sales);
    let record = service.record_sale(input).await?;
    Ok((StatusCode::CREATED, Json(record)))
}

/// List sales, newest first
pub async fn list_sales(
    State(state): State<AppState>,
    Query(query): Query<SalesQuery>,
) -> AppResult<Json<Vec<SalesRecord>>> {
    let service = SalesService::new(state.sales);
    let sales = service.list_sales(query.crop.as_deref()).await?;
    Ok(Json(sales))
}

/// List crops that have sales
pub async fn list_crops(State(state): State<AppState>) -> AppResult<Json<Vec<String>>> {
    let service = SalesService::new(state.sales);
    let crops = service.list_crops().await?;
    Ok(Json(crops))
}

/// Import sales from an uploaded CSV file
pub async fn import_sales_csv(
    State(state): State<AppState>,
    mut multipart: Multipart,
) -> AppResult<(StatusCode, Json<ImportSummary>)> {
    let mut upload = None;

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| AppError::validation(CSV_FIELD, &e.to_string()))?
    {
        if field.name() == Some(CSV_FIELD) {
            let bytes = field
                .bytes()
                .await
                .map_err(|e| AppError::validation(CSV_FIELD, &e.to_string()))?;
            upload = Some(bytes);
            break;
        }
    }

    let data = upload.ok_or_else(|| AppError::validation(CSV_FIELD, "No CSV file uploaded"))?;

    let service = SalesService::new(state.sales);
    let summary = service
        .import_csv(&data, state.config.import.max_rows)
        .await?;
    Ok((StatusCode::CREATED, Json(summary)))
}
