//! HTTP handlers for the Crop Sales Forecasting Platform

pub mod forecast;
pub mod health;
pub mod sales;
pub mod weather;

pub use forecast::*;
pub use health::*;
pub use sales::*;
pub use weather::*;
