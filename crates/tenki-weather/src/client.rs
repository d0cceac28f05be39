//! HTTP client for the JMA region catalog and forecast documents.

use std::sync::Arc;
use std::time::Duration;

use reqwest::Client;
use tracing::instrument;
use url::Url;

use crate::types::{AreaCatalog, ForecastPayload, WeatherError};

pub const AREA_URL: &str = "https://www.jma.go.jp/bosai/common/const/area.json";
pub const FORECAST_BASE_URL: &str = "https://www.jma.go.jp/bosai/forecast/data/forecast/";
const USER_AGENT: &str = concat!("tenki/", env!("CARGO_PKG_VERSION"));

/// Endpoint and transport settings for [`JmaClient`]
#[derive(Debug, Clone)]
pub struct JmaClientConfig {
    pub area_url: String,
    pub forecast_base_url: String,
    /// `None` lets a request wait as long as the server keeps the connection open
    pub timeout: Option<Duration>,
    pub user_agent: String,
}

impl Default for JmaClientConfig {
    fn default() -> Self {
        Self {
            area_url: AREA_URL.to_string(),
            forecast_base_url: FORECAST_BASE_URL.to_string(),
            timeout: None,
            user_agent: USER_AGENT.to_string(),
        }
    }
}

#[derive(Debug, Clone)]
pub struct JmaClient {
    client: Arc<Client>,
    area_url: Url,
    forecast_base_url: Url,
}

impl JmaClient {
    pub fn new_with_config(config: JmaClientConfig) -> Result<Self, WeatherError> {
        let mut builder = Client::builder().user_agent(config.user_agent);
        if let Some(timeout) = config.timeout {
            builder = builder.timeout(timeout);
        }
        let client = builder.build()?;

        let area_url = Url::parse(&config.area_url)?;
        let mut forecast_base_url = Url::parse(&config.forecast_base_url)?;
        if !forecast_base_url.path().ends_with('/') {
            let path = format!("{}/", forecast_base_url.path());
            forecast_base_url.set_path(&path);
        }

        Ok(Self {
            client: Arc::new(client),
            area_url,
            forecast_base_url,
        })
    }

    /// Forecast document URL for a sub-region code
    pub fn forecast_url(&self, code: &str) -> Result<Url, WeatherError> {
        if code.is_empty() || !code.bytes().all(|b| b.is_ascii_digit()) {
            return Err(WeatherError::InvalidCode(code.to_string()));
        }
        Ok(self.forecast_base_url.join(&format!("{code}.json"))?)
    }

    /// Fetch the region catalog (`area.json`).
    #[instrument(skip(self), level = "info")]
    pub async fn fetch_area_catalog(&self) -> Result<AreaCatalog, WeatherError> {
        let response = self.client.get(self.area_url.clone()).send().await?;
        let response = check_status(response)?;

        let catalog: AreaCatalog = response
            .json()
            .await
            .map_err(|e| WeatherError::Parse(format!("area catalog: {e}")))?;

        tracing::info!(centers = catalog.centers.len(), "Region catalog loaded");
        Ok(catalog)
    }

    /// Fetch the forecast document for a sub-region code.
    ///
    /// Any well-formed JSON body succeeds; shape problems are reported through
    /// [`ForecastPayload::Unrecognized`] rather than as an error.
    #[instrument(skip(self), level = "info")]
    pub async fn fetch_forecast(&self, code: &str) -> Result<ForecastPayload, WeatherError> {
        let url = self.forecast_url(code)?;
        let response = self.client.get(url).send().await?;
        let response = check_status(response)?;

        let body: serde_json::Value = response
            .json()
            .await
            .map_err(|e| WeatherError::Parse(format!("forecast {code}: {e}")))?;

        Ok(ForecastPayload::from_value(body))
    }
}

fn check_status(response: reqwest::Response) -> Result<reqwest::Response, WeatherError> {
    let status = response.status();
    if status.is_success() {
        Ok(response)
    } else {
        tracing::warn!("{} returned status {}", response.url(), status);
        Err(WeatherError::Status {
            status: status.as_u16(),
            url: response.url().to_string(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use wiremock::matchers::{method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn client_for(server: &MockServer) -> JmaClient {
        JmaClient::new_with_config(JmaClientConfig {
            area_url: format!("{}/bosai/common/const/area.json", server.uri()),
            forecast_base_url: format!("{}/bosai/forecast/data/forecast", server.uri()),
            ..JmaClientConfig::default()
        })
        .unwrap()
    }

    #[test]
    fn test_forecast_url_appends_code() {
        let client = JmaClient::new_with_config(JmaClientConfig::default()).unwrap();
        let url = client.forecast_url("011000").unwrap();
        assert_eq!(
            url.as_str(),
            "https://www.jma.go.jp/bosai/forecast/data/forecast/011000.json"
        );
    }

    #[test]
    fn test_forecast_url_rejects_bad_codes() {
        let client = JmaClient::new_with_config(JmaClientConfig::default()).unwrap();
        assert!(matches!(client.forecast_url(""), Err(WeatherError::InvalidCode(_))));
        assert!(matches!(
            client.forecast_url("../area"),
            Err(WeatherError::InvalidCode(_))
        ));
    }

    #[tokio::test]
    async fn test_fetch_area_catalog() {
        let mock_server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/bosai/common/const/area.json"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "centers": {
                    "010100": {"name": "北海道地方", "code": "010100", "children": ["011000"]}
                },
                "offices": {}
            })))
            .expect(1)
            .mount(&mock_server)
            .await;

        let catalog = client_for(&mock_server).fetch_area_catalog().await.unwrap();

        let parents = catalog.parents();
        assert_eq!(parents.len(), 1);
        assert_eq!(parents[0].name, "北海道地方");
    }

    #[tokio::test]
    async fn test_fetch_area_catalog_with_null_offices() {
        let mock_server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/bosai/common/const/area.json"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "centers": {
                    "010100": {"name": "北海道地方", "code": "010100", "children": ["011000"]}
                },
                "offices": null
            })))
            .expect(1)
            .mount(&mock_server)
            .await;

        let catalog = client_for(&mock_server).fetch_area_catalog().await.unwrap();

        assert_eq!(catalog.parents().len(), 1);
        assert!(catalog.office_names().is_empty());
    }

    #[tokio::test]
    async fn test_fetch_area_catalog_bad_body() {
        let mock_server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/bosai/common/const/area.json"))
            .respond_with(ResponseTemplate::new(200).set_body_string("<html>maintenance</html>"))
            .mount(&mock_server)
            .await;

        let result = client_for(&mock_server).fetch_area_catalog().await;
        assert!(matches!(result, Err(WeatherError::Parse(_))));
    }

    #[tokio::test]
    async fn test_fetch_forecast() {
        let mock_server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/bosai/forecast/data/forecast/011000.json"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!([{
                "publishingOffice": "稚内地方気象台",
                "reportDatetime": "2024-06-05T17:00:00+09:00",
                "timeSeries": []
            }])))
            .expect(1)
            .mount(&mock_server)
            .await;

        let payload = client_for(&mock_server).fetch_forecast("011000").await.unwrap();

        let office = payload.primary_office().unwrap();
        assert_eq!(office.publishing_office.as_deref(), Some("稚内地方気象台"));
    }

    #[tokio::test]
    async fn test_fetch_forecast_object_is_unrecognized() {
        let mock_server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/bosai/forecast/data/forecast/130000.json"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({"error": 1})))
            .mount(&mock_server)
            .await;

        let payload = client_for(&mock_server).fetch_forecast("130000").await.unwrap();
        assert_eq!(payload, ForecastPayload::Unrecognized);
    }

    #[tokio::test]
    async fn test_fetch_forecast_not_found() {
        let mock_server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/bosai/forecast/data/forecast/999999.json"))
            .respond_with(ResponseTemplate::new(404))
            .mount(&mock_server)
            .await;

        let result = client_for(&mock_server).fetch_forecast("999999").await;
        assert!(matches!(result, Err(WeatherError::Status { status: 404, .. })));
    }

    #[tokio::test]
    async fn test_invalid_code_makes_no_request() {
        let mock_server = MockServer::start().await;

        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(200))
            .expect(0)
            .mount(&mock_server)
            .await;

        let result = client_for(&mock_server).fetch_forecast("").await;
        assert!(matches!(result, Err(WeatherError::InvalidCode(_))));
    }
}
