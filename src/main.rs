use anyhow::Result;
use tenki_core::{App, Config, ConfigError};

fn main() -> Result<()> {
    tenki_core::init_logging(Config::log_path().ok().as_deref())?;

    let mut app = App::new().map_err(|e| {
        tracing::error!("Failed to load configuration: {:#}", e);
        match e.downcast_ref::<ConfigError>().map(ConfigError::user_message) {
            Some(message) => anyhow::anyhow!("{message}: {e:#}"),
            None => e,
        }
    })?;
    app.initialize()?;

    tracing::info!("tenki started");
    let outcome = tenki_ui::run(app.config());

    app.shutdown()?;

    outcome.map_err(|e| {
        tracing::error!("tenki exited with error: {}", e);
        anyhow::anyhow!("{}: {e}", e.user_message())
    })
}
