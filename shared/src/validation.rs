//! Validation utilities for the Crop Sales Forecasting Platform

use rust_decimal::Decimal;

/// Longest accepted crop name, in characters
pub const MAX_CROP_NAME_CHARS: usize = 100;

/// Largest accepted volume for a single sale, in kilograms (one million tonnes)
pub const MAX_VOLUME_KG: i64 = 1_000_000_000_000_000;

// ============================================================================
// Sales Validations
// ============================================================================

/// Validate a crop name (already trimmed)
pub fn validate_crop_name(crop: &str) -> Result<(), &'static str> {
    if crop.is_empty() {
        return Err("Crop name is required");
    }
    if crop.chars().count() > MAX_CROP_NAME_CHARS {
        return Err("Crop name must be at most 100 characters");
    }
    Ok(())
}

/// Validate a sold volume in kilograms
pub fn validate_volume(volume_kg: Decimal) -> Result<(), &'static str> {
    if volume_kg < Decimal::ZERO {
        return Err("Volume cannot be negative");
    }
    if volume_kg > Decimal::from(MAX_VOLUME_KG) {
        return Err("Volume must be at most 1e15 kg");
    }
    Ok(())
}

/// Validate an optional unit price
pub fn validate_unit_price(unit_price: Option<Decimal>) -> Result<(), &'static str> {
    match unit_price {
        Some(price) if price < Decimal::ZERO => Err("Unit price cannot be negative"),
        _ => Ok(()),
    }
}

// ============================================================================
// Weather Validations
// ============================================================================

/// Validate an optional precipitation reading in millimetres
pub fn validate_precipitation(precipitation_mm: Option<Decimal>) -> Result<(), &'static str> {
    match precipitation_mm {
        Some(mm) if mm < Decimal::ZERO => Err("Precipitation cannot be negative"),
        _ => Ok(()),
    }
}

/// Validate an optional air temperature against physically plausible bounds
pub fn validate_temperature(temperature_celsius: Option<Decimal>) -> Result<(), &'static str> {
    match temperature_celsius {
        Some(t) if t < Decimal::from(-90) || t > Decimal::from(60) => {
            Err("Temperature must be between -90 and 60 °C")
        }
        _ => Ok(()),
    }
}
