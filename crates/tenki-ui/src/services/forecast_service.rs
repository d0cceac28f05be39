//! Forecast backend: async catalog and forecast fetching.
//! All network work runs off the UI thread; results sent via mpsc.

use std::sync::mpsc::Sender;
use std::sync::Arc;

use tenki_core::ForecastError;
use tenki_weather::{AreaCatalog, ForecastPayload, JmaClient};
use tokio::runtime::Handle;
use tokio::task::AbortHandle;

use crate::error_mapping::{region_data_error, weather_data_error};
use crate::models::ForecastRequest;

/// Messages sent from async operations back to the UI thread
#[derive(Debug)]
pub enum ForecastServiceMessage {
    /// Result of fetching the region catalog
    CatalogDone(Result<AreaCatalog, ForecastError>),
    /// Result of fetching one forecast, tagged with its request ticket
    ForecastDone {
        ticket: u64,
        result: Result<ForecastPayload, ForecastError>,
    },
}

/// Request the region catalog.
/// Sends `CatalogDone` on the channel when complete.
pub fn request_catalog(
    tx: &Sender<ForecastServiceMessage>,
    runtime: &Handle,
    client: Arc<JmaClient>,
) {
    let tx = tx.clone();
    runtime.spawn(async move {
        let result = client.fetch_area_catalog().await.map_err(region_data_error);
        let _ = tx.send(ForecastServiceMessage::CatalogDone(result));
    });
}

/// Request a forecast.
/// Sends `ForecastDone` on the channel when complete. The returned handle
/// aborts the request; an aborted request sends nothing.
pub fn request_forecast(
    tx: &Sender<ForecastServiceMessage>,
    runtime: &Handle,
    client: Arc<JmaClient>,
    request: ForecastRequest,
) -> AbortHandle {
    let tx = tx.clone();
    let task = runtime.spawn(async move {
        let ForecastRequest { ticket, code } = request;
        tracing::info!(ticket, code = %code, "Fetching forecast");
        let result = client.fetch_forecast(&code).await.map_err(weather_data_error);
        let _ = tx.send(ForecastServiceMessage::ForecastDone { ticket, result });
    });
    task.abort_handle()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::mpsc::{self, Receiver};
    use std::time::Duration;
    use tenki_weather::JmaClientConfig;
    use wiremock::matchers::{method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn client_for(server: &MockServer) -> Arc<JmaClient> {
        Arc::new(
            JmaClient::new_with_config(JmaClientConfig {
                area_url: format!("{}/area.json", server.uri()),
                forecast_base_url: format!("{}/forecast/", server.uri()),
                ..JmaClientConfig::default()
            })
            .unwrap(),
        )
    }

    async fn recv(rx: &Receiver<ForecastServiceMessage>) -> ForecastServiceMessage {
        for _ in 0..500 {
            if let Ok(msg) = rx.try_recv() {
                return msg;
            }
            tokio::time::sleep(Duration::from_millis(10)).await;
        }
        panic!("no service message within 5s");
    }

    #[tokio::test(flavor = "multi_thread")]
    async fn catalog_failure_maps_to_region_error() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/area.json"))
            .respond_with(ResponseTemplate::new(500))
            .expect(1)
            .mount(&server)
            .await;

        let (tx, rx) = mpsc::channel();
        request_catalog(&tx, &Handle::current(), client_for(&server));

        match recv(&rx).await {
            ForecastServiceMessage::CatalogDone(Err(ForecastError::RegionData(_))) => {}
            other => panic!("unexpected message: {other:?}"),
        }
    }

    #[tokio::test(flavor = "multi_thread")]
    async fn forecast_result_carries_ticket() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/forecast/130000.json"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!([])))
            .mount(&server)
            .await;

        let (tx, rx) = mpsc::channel();
        let request = ForecastRequest {
            ticket: 7,
            code: "130000".into(),
        };
        request_forecast(&tx, &Handle::current(), client_for(&server), request);

        match recv(&rx).await {
            ForecastServiceMessage::ForecastDone { ticket: 7, result: Ok(payload) } => {
                assert!(payload.primary_office().is_none());
            }
            other => panic!("unexpected message: {other:?}"),
        }
    }

    #[tokio::test(flavor = "multi_thread")]
    async fn aborted_forecast_sends_nothing() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/forecast/130000.json"))
            .respond_with(
                ResponseTemplate::new(200)
                    .set_body_json(serde_json::json!([]))
                    .set_delay(Duration::from_millis(500)),
            )
            .mount(&server)
            .await;

        let (tx, rx) = mpsc::channel();
        let request = ForecastRequest {
            ticket: 1,
            code: "130000".into(),
        };
        let handle = request_forecast(&tx, &Handle::current(), client_for(&server), request);
        handle.abort();

        tokio::time::sleep(Duration::from_millis(800)).await;
        assert!(rx.try_recv().is_err());
    }
}
