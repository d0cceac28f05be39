pub mod forecast_service;

pub use forecast_service::{request_catalog, request_forecast, ForecastServiceMessage};
