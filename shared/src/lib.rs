//! Shared types and models for the Crop Sales Forecasting Platform
//!
//! This crate contains the domain records and the pure forecasting math
//! shared between the backend and any other component of the system.

pub mod models;
pub mod types;
pub mod validation;

pub use models::*;
pub use types::*;
pub use validation::*;
