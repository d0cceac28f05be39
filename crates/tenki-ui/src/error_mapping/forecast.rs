use tenki_core::{ForecastError, ReqwestErrorExt};
use tenki_weather::WeatherError;

/// Cause text kept for the log; the view only shows the fixed message.
fn detail(e: WeatherError) -> String {
    match e {
        WeatherError::Network(err) => err.into_network_error().to_string(),
        other => other.to_string(),
    }
}

pub fn region_data_error(e: WeatherError) -> ForecastError {
    ForecastError::RegionData(detail(e))
}

pub fn weather_data_error(e: WeatherError) -> ForecastError {
    ForecastError::WeatherData(detail(e))
}

#[cfg(test)]
mod tests {
    use super::*;
    use tenki_core::error::{REGION_DATA_MESSAGE, WEATHER_DATA_MESSAGE};

    #[test]
    fn maps_to_fixed_messages() {
        let e = region_data_error(WeatherError::Parse("eof".into()));
        assert_eq!(e.user_message(), REGION_DATA_MESSAGE);
        assert!(e.to_string().contains("eof"));

        let e = weather_data_error(WeatherError::Status {
            status: 503,
            url: "http://localhost/x.json".into(),
        });
        assert_eq!(e.user_message(), WEATHER_DATA_MESSAGE);
        assert!(e.to_string().contains("503"));
    }
}
