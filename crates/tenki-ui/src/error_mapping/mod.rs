//! Maps weather client errors to tenki_core errors for consistent user-facing messages.

mod forecast;

pub use forecast::{region_data_error, weather_data_error};
