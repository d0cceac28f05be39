//! JMA forecast data for tenki
//!
//! Region catalog and forecast types, the HTTP client that fetches them, the
//! built-in sub-region table, and the classifier/card logic the view renders.

pub mod cards;
pub mod classify;
pub mod client;
pub mod regions;
pub mod types;

pub use cards::{cards, format_datetime, Cards, ForecastCard, OfficeSummary, PLACEHOLDER};
pub use classify::{weather_icon, Sky, WeatherIcon};
pub use client::{JmaClient, JmaClientConfig};
pub use types::*;
