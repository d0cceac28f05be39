pub mod forecast_model;

pub use forecast_model::{derive_children, ForecastModel, ForecastRequest};
