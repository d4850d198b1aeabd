//! Error handling for the Crop Sales Forecasting Platform
//!
//! Provides consistent error responses in English and Spanish

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use thiserror::Error;

/// Application error types
#[derive(Error, Debug)]
pub enum AppError {
    // Validation errors
    #[error("Validation error: {message}")]
    Validation {
        field: String,
        message: String,
        message_es: String,
    },

    #[error("CSV import error at row {row}: {message}")]
    CsvImport { row: usize, message: String },

    #[error("Sales volumes for {crop} are too large to forecast")]
    ForecastOverflow { crop: String },

    // Store errors
    #[error("Malformed {record} record: missing or invalid {field}")]
    MalformedRecord { record: String, field: String },

    #[error("Sales data unavailable: {0}")]
    SalesDataUnavailable(#[source] sqlx::Error),

    #[error("Climate data unavailable: {0}")]
    ClimateDataUnavailable(#[source] sqlx::Error),

    #[error("Database error: {0}")]
    DatabaseError(#[from] sqlx::Error),
}

impl AppError {
    /// Build a validation error for a field from a shared validation message
    pub fn validation(field: &str, message: &str) -> Self {
        AppError::Validation {
            field: field.to_string(),
            message: message.to_string(),
            message_es: format!("Dato inválido en '{}': {}", field, message),
        }
    }
}

/// Error response structure
#[derive(Serialize)]
pub struct ErrorResponse {
    pub error: ErrorDetail,
}

#[derive(Serialize)]
pub struct ErrorDetail {
    pub code: String,
    pub message_en: String,
    pub message_es: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub field: Option<String>,
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, error_detail) = match &self {
            AppError::Validation {
                field,
                message,
                message_es,
            } => (
                StatusCode::BAD_REQUEST,
                ErrorDetail {
                    code: "VALIDATION_ERROR".to_string(),
                    message_en: message.clone(),
                    message_es: message_es.clone(),
                    field: Some(field.clone()),
                },
            ),
            AppError::CsvImport { row, message } => (
                StatusCode::BAD_REQUEST,
                ErrorDetail {
                    code: "CSV_IMPORT_ERROR".to_string(),
                    message_en: format!("Row {}: {}", row, message),
                    message_es: format!("Fila {}: {}", row, message),
                    field: None,
                },
            ),
            AppError::ForecastOverflow { crop } => (
                StatusCode::UNPROCESSABLE_ENTITY,
                ErrorDetail {
                    code: "FORECAST_OVERFLOW".to_string(),
                    message_en: format!("Sales volumes for {} are too large to forecast", crop),
                    message_es: format!(
                        "Los volúmenes de venta de {} son demasiado grandes para pronosticar",
                        crop
                    ),
                    field: Some("volume_kg".to_string()),
                },
            ),
            AppError::MalformedRecord { record, field } => (
                StatusCode::UNPROCESSABLE_ENTITY,
                ErrorDetail {
                    code: "MALFORMED_RECORD".to_string(),
                    message_en: format!("Stored {} record has a missing or invalid {}", record, field),
                    message_es: format!("Registro de {} con {} ausente o inválido", record, field),
                    field: Some(field.clone()),
                },
            ),
            AppError::SalesDataUnavailable(_) => (
                StatusCode::SERVICE_UNAVAILABLE,
                ErrorDetail {
                    code: "SALES_DATA_UNAVAILABLE".to_string(),
                    message_en: "Sales history is temporarily unavailable".to_string(),
                    message_es: "El historial de ventas no está disponible temporalmente"
                        .to_string(),
                    field: None,
                },
            ),
            AppError::ClimateDataUnavailable(_) => (
                StatusCode::SERVICE_UNAVAILABLE,
                ErrorDetail {
                    code: "CLIMATE_DATA_UNAVAILABLE".to_string(),
                    message_en: "Climate data is temporarily unavailable".to_string(),
                    message_es: "Los datos climáticos no están disponibles temporalmente"
                        .to_string(),
                    field: None,
                },
            ),
            AppError::DatabaseError(_) => (
                StatusCode::INTERNAL_SERVER_ERROR,
                ErrorDetail {
                    code: "DATABASE_ERROR".to_string(),
                    message_en: "A database error occurred".to_string(),
                    message_es: "Ocurrió un error en la base de datos".to_string(),
                    field: None,
                },
            ),
        };

        // Log the error for debugging
        tracing::error!("Error: {:?}", self);

        (status, Json(ErrorResponse { error: error_detail })).into_response()
    }
}

/// Result type alias for handlers
pub type AppResult<T> = Result<T, AppError>;
