//! Application services shared by the forecast screen.
//!
//! `AppServices` owns the tokio runtime, the JMA client and the service
//! channel. The UI thread never blocks on network work; it spawns through
//! `runtime()` and drains results with `try_recv()`.

use std::sync::mpsc::{self, Receiver, Sender, TryRecvError};
use std::sync::Arc;

use tenki_core::{AppError, Config, ConfigError};
use tenki_weather::{JmaClient, JmaClientConfig};
use tokio::runtime::{Handle, Runtime};

/// Message type for the forecast service channel
pub use crate::services::ForecastServiceMessage;

pub struct AppServices {
    /// Present when the services own their runtime; `None` when borrowed
    runtime: Option<Runtime>,
    handle: Handle,
    client: Arc<JmaClient>,
    forecast_service_tx: Sender<ForecastServiceMessage>,
    forecast_service_rx: Receiver<ForecastServiceMessage>,
}

impl AppServices {
    /// Create services with a dedicated multi-threaded runtime.
    pub fn new(config: &Config) -> Result<Self, AppError> {
        let runtime = tokio::runtime::Builder::new_multi_thread()
            .enable_all()
            .thread_name("tenki-tokio")
            .build()?;
        let handle = runtime.handle().clone();
        let mut services = Self::with_handle(config, handle)?;
        services.runtime = Some(runtime);
        Ok(services)
    }

    /// Create services that spawn onto an existing runtime.
    pub fn with_handle(config: &Config, handle: Handle) -> Result<Self, AppError> {
        let client = JmaClient::new_with_config(client_config(config))
            .map_err(|e| ConfigError::Invalid(e.to_string()))?;
        let (forecast_service_tx, forecast_service_rx) = mpsc::channel();

        tracing::info!("JMA client initialized");
        Ok(Self {
            runtime: None,
            handle,
            client: Arc::new(client),
            forecast_service_tx,
            forecast_service_rx,
        })
    }

    /// Get the tokio runtime handle.
    pub fn runtime(&self) -> &Handle {
        &self.handle
    }

    pub fn client(&self) -> Arc<JmaClient> {
        Arc::clone(&self.client)
    }

    pub fn forecast_service_tx(&self) -> &Sender<ForecastServiceMessage> {
        &self.forecast_service_tx
    }

    /// Next pending service message, if any.
    pub fn try_recv(&self) -> Option<ForecastServiceMessage> {
        match self.forecast_service_rx.try_recv() {
            Ok(msg) => Some(msg),
            Err(TryRecvError::Empty) => None,
            Err(TryRecvError::Disconnected) => {
                tracing::warn!("Forecast service channel disconnected");
                None
            }
        }
    }

    /// Stop the owned runtime without waiting for in-flight requests.
    pub fn shutdown(self) {
        tracing::info!("AppServices shutdown initiated");
        if let Some(runtime) = self.runtime {
            runtime.shutdown_background();
        }
        tracing::info!("AppServices shutdown complete");
    }
}

fn client_config(config: &Config) -> JmaClientConfig {
    JmaClientConfig {
        area_url: config.endpoints.area_url.clone(),
        forecast_base_url: config.endpoints.forecast_base_url.clone(),
        timeout: config.request_timeout(),
        user_agent: config.http.user_agent.clone(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn client_config_follows_settings() {
        let mut config = Config::default();
        config.http.request_timeout_secs = Some(5);
        config.http.user_agent = "tenki-test".into();
        config.endpoints.area_url = "http://localhost:9/area.json".into();

        let client = client_config(&config);
        assert_eq!(client.timeout, Some(std::time::Duration::from_secs(5)));
        assert_eq!(client.user_agent, "tenki-test");
        assert_eq!(client.area_url, "http://localhost:9/area.json");
    }

    #[test]
    fn invalid_endpoint_is_a_config_error() {
        let mut config = Config::default();
        config.endpoints.forecast_base_url = "not a url".into();

        let runtime = tokio::runtime::Builder::new_current_thread()
            .build()
            .unwrap();
        let err = AppServices::with_handle(&config, runtime.handle().clone())
            .err()
            .unwrap();
        assert!(matches!(err, AppError::Config(ConfigError::Invalid(_))));
    }
}
