use anyhow::Result;

use crate::Config;

/// Application configuration holder and lifecycle logger
pub struct App {
    config: Config,
}

impl App {
    /// Create a new application instance from the user's validated config
    pub fn new() -> Result<Self> {
        let (config, _) = Config::load_validated()?;
        Ok(Self::from_config(config))
    }

    pub fn from_config(config: Config) -> Self {
        Self { config }
    }

    /// Log the effective settings before the UI takes over the terminal
    pub fn initialize(&mut self) -> Result<()> {
        let config = &self.config;
        tracing::info!(
            area_url = %config.endpoints.area_url,
            forecast_base_url = %config.endpoints.forecast_base_url,
            child_source = ?config.regions.child_source,
            timeout = ?config.request_timeout(),
            "Application initialized"
        );
        Ok(())
    }

    pub fn shutdown(&mut self) -> Result<()> {
        tracing::info!("Shutting down application");
        Ok(())
    }

    /// Get reference to application config
    pub fn config(&self) -> &Config {
        &self.config
    }
}
