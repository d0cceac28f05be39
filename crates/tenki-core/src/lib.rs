pub mod app;
pub mod config;
pub mod error;

pub use app::App;
pub use config::{
    ChildSource, Config, EndpointConfig, HttpConfig, RegionConfig, UiConfig, ValidationResult,
};
pub use error::{AppError, ConfigError, ForecastError, NetworkError, ReqwestErrorExt};

use std::fs::{File, OpenOptions};
use std::path::Path;
use std::sync::Mutex;

use anyhow::Result;
use tracing_subscriber::EnvFilter;

fn env_filter() -> EnvFilter {
    EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"))
}

/// Initialize tracing/logging.
///
/// The terminal belongs to the UI, so log lines go to `log_path` when it can be
/// opened and to stderr otherwise. Calling this more than once is harmless.
pub fn init_logging(log_path: Option<&Path>) -> Result<()> {
    let (file, fallback_reason) = match log_path.map(|path| (path, open_log_file(path))) {
        Some((_, Ok(file))) => (Some(file), None),
        Some((path, Err(e))) => (None, Some(format!("{}: {}", path.display(), e))),
        None => (None, None),
    };

    let installed = match file {
        Some(file) => tracing_subscriber::fmt()
            .with_env_filter(env_filter())
            .with_ansi(false)
            .with_writer(Mutex::new(file))
            .try_init(),
        None => tracing_subscriber::fmt()
            .with_env_filter(env_filter())
            .with_writer(std::io::stderr)
            .try_init(),
    };

    if installed.is_ok() {
        if let Some(reason) = fallback_reason {
            tracing::warn!("Cannot open log file, logging to stderr: {}", reason);
        }
        tracing::info!("tenki core initialized");
    }
    Ok(())
}

fn open_log_file(path: &Path) -> std::io::Result<File> {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)?;
    }
    OpenOptions::new().create(true).append(true).open(path)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_open_log_file_creates_parent_dirs() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("tenki").join("tenki.log");

        open_log_file(&path).unwrap();
        assert!(path.exists());
    }

    #[test]
    fn test_open_log_file_reports_blocked_parent() {
        let dir = tempfile::tempdir().unwrap();
        let blocker = dir.path().join("tenki");
        std::fs::write(&blocker, "not a directory").unwrap();

        assert!(open_log_file(&blocker.join("tenki.log")).is_err());
    }

    #[test]
    fn test_init_logging_falls_back_without_failing() {
        let dir = tempfile::tempdir().unwrap();
        let blocker = dir.path().join("tenki");
        std::fs::write(&blocker, "not a directory").unwrap();

        assert!(init_logging(Some(&blocker.join("tenki.log"))).is_ok());
        assert!(init_logging(None).is_ok());
    }
}
