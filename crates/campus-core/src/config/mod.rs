mod defaults;

#[cfg(test)]
mod tests;

use serde::{Deserialize, Serialize};
use std::path::Path;
use tracing::info;

use crate::error::CampusError;
use crate::locale::Locale;
use defaults::*;

/// Environment variable that overrides `api.base_url`.
pub const API_URL_ENV: &str = "CAMPUS_API_URL";

/// Top-level Campus configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub campus: CampusConfig,
    #[serde(default)]
    pub api: ApiConfig,
    #[serde(default)]
    pub locale: LocaleConfig,
    #[serde(default)]
    pub store: StoreConfig,
}

/// General settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CampusConfig {
    #[serde(default = "default_data_dir")]
    pub data_dir: String,
    #[serde(default = "default_log_level")]
    pub log_level: String,
}

impl Default for CampusConfig {
    fn default() -> Self {
        Self {
            data_dir: default_data_dir(),
            log_level: default_log_level(),
        }
    }
}

/// How the active locale travels to the backend. One mode is used
/// for every request.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LocaleTransportKind {
    /// `Accept-Language: <code>` header (default).
    #[default]
    Header,
    /// `?<query_param>=<code>` query parameter.
    Query,
}

/// Backend REST API settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiConfig {
    #[serde(default = "default_base_url")]
    pub base_url: String,
    /// Per-request timeout in seconds (default: 10).
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
    #[serde(default)]
    pub locale_transport: LocaleTransportKind,
    /// Query parameter name used by `LocaleTransportKind::Query`.
    #[serde(default = "default_query_param")]
    pub query_param: String,
    /// Collapse identical concurrent requests into one.
    #[serde(default = "default_true")]
    pub dedupe_inflight: bool,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            timeout_secs: default_timeout_secs(),
            locale_transport: LocaleTransportKind::default(),
            query_param: default_query_param(),
            dedupe_inflight: true,
        }
    }
}

/// Locale settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LocaleConfig {
    /// Used when no override, preference, or system language applies.
    #[serde(default = "default_locale")]
    pub default: Locale,
    /// Preference store key holding the user's language choice.
    #[serde(default = "default_preference_key")]
    pub preference_key: String,
}

impl Default for LocaleConfig {
    fn default() -> Self {
        Self {
            default: default_locale(),
            preference_key: default_preference_key(),
        }
    }
}

/// Preference store settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StoreConfig {
    #[serde(default = "default_db_path")]
    pub db_path: String,
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            db_path: default_db_path(),
        }
    }
}

/// Expand `~` to home directory.
pub fn shellexpand(path: &str) -> String {
    if let Some(rest) = path.strip_prefix("~/") {
        if let Some(home) = std::env::var_os("HOME") {
            return format!("{}/{rest}", home.to_string_lossy());
        }
    }
    path.to_string()
}

/// Parse configuration from TOML text.
pub fn parse(content: &str) -> Result<Config, CampusError> {
    toml::from_str(content).map_err(|e| CampusError::Config(format!("failed to parse config: {e}")))
}

/// Apply environment overrides on top of file values.
fn apply_env(mut config: Config, api_url: Option<String>) -> Config {
    if let Some(url) = api_url.filter(|u| !u.trim().is_empty()) {
        config.api.base_url = url.trim().to_string();
    }
    config
}

/// Load configuration from a TOML file.
///
/// Falls back to defaults if the file does not exist.
pub fn load(path: &str) -> Result<Config, CampusError> {
    let path = Path::new(path);
    let config = if path.exists() {
        let content = std::fs::read_to_string(path).map_err(|e| {
            CampusError::Config(format!("failed to read {}: {}", path.display(), e))
        })?;
        parse(&content)?
    } else {
        info!(
            "Config file not found at {}, using defaults",
            path.display()
        );
        Config::default()
    };

    let config = apply_env(config, std::env::var(API_URL_ENV).ok());
    validate(&config)?;
    Ok(config)
}

fn validate(config: &Config) -> Result<(), CampusError> {
    url::Url::parse(&config.api.base_url).map_err(|e| {
        CampusError::Config(format!("invalid api.base_url {:?}: {e}", config.api.base_url))
    })?;
    if config.api.timeout_secs == 0 {
        return Err(CampusError::Config(
            "api.timeout_secs must be greater than zero".to_string(),
        ));
    }
    if config.api.locale_transport == LocaleTransportKind::Query
        && config.api.query_param.trim().is_empty()
    {
        return Err(CampusError::Config(
            "api.query_param is required when locale_transport = \"query\"".to_string(),
        ));
    }
    Ok(())
}
