//! Domain models for the Crop Sales Forecasting Platform

mod forecast;
mod sales;
mod weather;

pub use forecast::*;
pub use sales::*;
pub use weather::*;
