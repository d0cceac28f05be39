//! Centralized error types for the tenki application.
//!
//! This module provides a typed error hierarchy that:
//! - Enables precise error handling throughout the codebase
//! - Provides user-facing messages in the embedded (Japanese) locale
//! - Preserves full error context for logging

use thiserror::Error;

/// Top-level application error type.
///
/// Use `user_message()` to get a UI-appropriate message.
#[derive(Debug, Error)]
pub enum AppError {
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("{0}")]
    Other(#[from] anyhow::Error),
}

impl AppError {
    /// Returns a user-friendly message suitable for display.
    pub fn user_message(&self) -> &'static str {
        match self {
            AppError::Config(e) => e.user_message(),
            AppError::Io(_) => "端末の操作に失敗しました",
            AppError::Other(_) => "予期しないエラーが発生しました",
        }
    }
}

/// Network-related errors (HTTP, connectivity).
#[derive(Debug, Error)]
pub enum NetworkError {
    #[error("Connection failed: {0}")]
    ConnectionFailed(String),

    #[error("Request timed out")]
    Timeout,

    #[error("Server error: {status} - {message}")]
    ServerError { status: u16, message: String },

    #[error("Invalid response: {0}")]
    InvalidResponse(String),
}

/// Configuration errors.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Invalid configuration: {0}")]
    Invalid(String),

    #[error("Configuration parse error: {0}")]
    ParseError(String),

    #[error("Configuration directory unavailable")]
    NoConfigDir,
}

impl ConfigError {
    pub fn user_message(&self) -> &'static str {
        match self {
            ConfigError::Invalid(_) => "設定が正しくありません",
            ConfigError::ParseError(_) => "設定ファイルを読み込めませんでした",
            ConfigError::NoConfigDir => "設定ディレクトリが見つかりません",
        }
    }
}

/// Forecast data errors surfaced in the view.
///
/// Only two messages are ever shown: one for the region catalog and one for
/// the forecast itself. The payload carries the underlying cause for logs.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ForecastError {
    #[error("Region catalog unavailable: {0}")]
    RegionData(String),

    #[error("Forecast unavailable: {0}")]
    WeatherData(String),
}

/// Shown when the region catalog cannot be loaded ("failed to retrieve region data").
pub const REGION_DATA_MESSAGE: &str = "地域データの取得に失敗しました";

/// Shown when a forecast cannot be loaded ("failed to retrieve weather data").
pub const WEATHER_DATA_MESSAGE: &str = "天気データの取得に失敗しました";

impl ForecastError {
    pub fn user_message(&self) -> &'static str {
        match self {
            ForecastError::RegionData(_) => REGION_DATA_MESSAGE,
            ForecastError::WeatherData(_) => WEATHER_DATA_MESSAGE,
        }
    }
}

/// Extension trait for converting reqwest errors to our error types.
pub trait ReqwestErrorExt {
    fn into_network_error(self) -> NetworkError;
}

impl ReqwestErrorExt for reqwest::Error {
    fn into_network_error(self) -> NetworkError {
        if self.is_timeout() {
            NetworkError::Timeout
        } else if self.is_connect() {
            NetworkError::ConnectionFailed(self.to_string())
        } else if let Some(status) = self.status() {
            NetworkError::ServerError {
                status: status.as_u16(),
                message: self.to_string(),
            }
        } else if self.is_decode() {
            NetworkError::InvalidResponse(self.to_string())
        } else {
            NetworkError::ConnectionFailed(self.to_string())
        }
    }
}
