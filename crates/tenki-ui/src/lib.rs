//! Terminal front end for tenki: view state, fetch services, key handling
//! and rendering of the forecast screen.

pub mod app;
pub mod app_services;
pub mod controls;
pub mod error_mapping;
pub mod models;
pub mod services;
pub mod view;

pub use app::{run, ForecastApp};
pub use app_services::AppServices;
pub use models::{ForecastModel, ForecastRequest};
