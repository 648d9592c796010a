//! Runtime configuration.
//!
//! Settings are resolved once at startup, in increasing priority:
//!
//! 1. Built-in defaults
//! 2. An optional TOML file (`--config`)
//! 3. Environment variables prefixed with `PULSEWATCH_` (e.g. `PULSEWATCH_ACCESS_TOKEN`)
//! 4. Command-line overrides
//!
//! ```toml
//! base_url = "https://health-api.cloud.honor.com"
//! access_token = "..."
//! use_mock = false
//! refresh_interval = "5m"
//! loading_floor = "500ms"
//! request_timeout = "15s"
//! ```
//!
//! The resulting [`Settings`] value is immutable and handed to the data source
//! when it is built.

use std::path::Path;
use std::time::Duration;

use config::{Config, Environment, File};
use serde::Deserialize;
use thiserror::Error;

use crate::data::duration::parse_duration;

/// Default vendor API endpoint.
pub const DEFAULT_BASE_URL: &str = "https://health-api.cloud.honor.com";
/// Default period of the refresh timer.
pub const DEFAULT_REFRESH_INTERVAL: &str = "5m";
/// Default minimum time the loading indicator stays on after a manual refresh.
pub const DEFAULT_LOADING_FLOOR: &str = "500ms";

/// Errors raised while resolving settings.
#[derive(Debug, Error)]
pub enum SettingsError {
    #[error("Failed to load configuration: {0}")]
    Config(#[from] config::ConfigError),

    #[error("Invalid duration for `{key}`: {value}")]
    InvalidDuration { key: &'static str, value: String },

    #[error("`{0}` must be greater than zero")]
    ZeroDuration(&'static str),

    #[error("`base_url` is required when mock data is disabled")]
    MissingBaseUrl,
}

/// Resolved, immutable runtime settings.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Settings {
    /// Vendor API base URL.
    pub base_url: String,
    /// Bearer token sent with every request.
    pub access_token: String,
    /// Generate synthetic data instead of calling the API.
    pub use_mock: bool,
    /// Period of the refresh timer.
    pub refresh_interval: Duration,
    /// Minimum time the loading indicator stays on after a manual refresh completes.
    pub loading_floor: Duration,
    /// Per-request timeout. `None` lets a hung request stall its refresh.
    pub request_timeout: Option<Duration>,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            access_token: String::new(),
            use_mock: true,
            refresh_interval: Duration::from_secs(300),
            loading_floor: Duration::from_millis(500),
            request_timeout: None,
        }
    }
}

/// Command-line values that take precedence over every other source.
#[derive(Debug, Clone, Default)]
pub struct Overrides {
    pub base_url: Option<String>,
    pub access_token: Option<String>,
    pub use_mock: Option<bool>,
    pub refresh_interval: Option<String>,
    pub request_timeout: Option<String>,
}

/// Settings as read from the config sources, before validation.
#[derive(Debug, Deserialize)]
struct RawSettings {
    base_url: String,
    access_token: String,
    use_mock: bool,
    refresh_interval: String,
    loading_floor: String,
    request_timeout: Option<String>,
}

impl Settings {
    /// Resolve settings from defaults, an optional file, the environment and overrides.
    pub fn load(config_path: Option<&Path>, overrides: &Overrides) -> Result<Self, SettingsError> {
        Self::load_with_env(config_path, overrides, Some("PULSEWATCH"))
    }

    fn load_with_env(
        config_path: Option<&Path>,
        overrides: &Overrides,
        env_prefix: Option<&str>,
    ) -> Result<Self, SettingsError> {
        let mut builder = Config::builder()
            .set_default("base_url", DEFAULT_BASE_URL)?
            .set_default("access_token", "")?
            .set_default("use_mock", true)?
            .set_default("refresh_interval", DEFAULT_REFRESH_INTERVAL)?
            .set_default("loading_floor", DEFAULT_LOADING_FLOOR)?;

        if let Some(path) = config_path {
            builder = builder.add_source(File::from(path));
        }
        if let Some(prefix) = env_prefix {
            builder = builder.add_source(Environment::with_prefix(prefix).try_parsing(true));
        }

        let raw: RawSettings = builder
            .set_override_option("base_url", overrides.base_url.clone())?
            .set_override_option("access_token", overrides.access_token.clone())?
            .set_override_option("use_mock", overrides.use_mock)?
            .set_override_option("refresh_interval", overrides.refresh_interval.clone())?
            .set_override_option("request_timeout", overrides.request_timeout.clone())?
            .build()?
            .try_deserialize()?;

        Self::from_raw(raw)
    }

    fn from_raw(raw: RawSettings) -> Result<Self, SettingsError> {
        let refresh_interval = duration_setting("refresh_interval", &raw.refresh_interval)?;
        if refresh_interval.is_zero() {
            return Err(SettingsError::ZeroDuration("refresh_interval"));
        }
        let loading_floor = duration_setting("loading_floor", &raw.loading_floor)?;
        let request_timeout = raw
            .request_timeout
            .as_deref()
            .map(|value| duration_setting("request_timeout", value))
            .transpose()?;
        if request_timeout.is_some_and(|t| t.is_zero()) {
            return Err(SettingsError::ZeroDuration("request_timeout"));
        }

        let base_url = raw.base_url.trim().to_string();
        if !raw.use_mock && base_url.is_empty() {
            return Err(SettingsError::MissingBaseUrl);
        }

        Ok(Self {
            base_url,
            access_token: raw.access_token,
            use_mock: raw.use_mock,
            refresh_interval,
            loading_floor,
            request_timeout,
        })
    }
}

fn duration_setting(key: &'static str, value: &str) -> Result<Duration, SettingsError> {
    parse_duration(value).map_err(|_| SettingsError::InvalidDuration {
        key,
        value: value.to_string(),
    })
}
