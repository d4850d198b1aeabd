//! Business logic services for the Crop Sales Forecasting Platform

pub mod climate;
pub mod forecast;
pub mod sales;
pub mod weather;

pub use climate::ClimateRiskService;
pub use forecast::ForecastService;
pub use sales::SalesService;
pub use weather::WeatherService;
