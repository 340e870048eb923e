//! Environment-backed configuration.
//!
//! Most settings have defaults. Override with `CROSSRANK_*` environment
//! variables, then assemble a ready client with [`Config::build_client`].

pub mod error;


pub use error::ConfigError;

use std::collections::HashMap;
use std::env;
use std::path::PathBuf;
use std::time::Duration;

use tracing::debug;

use crate::backend::OnlineConfig;
use crate::client::ScoringClient;
use crate::constants::{DEFAULT_MODEL, DEFAULT_TIMEOUT_SECS};
use crate::encoder::EncoderConfig;

/// Execution strategy selected by a [`Config`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScoringMode {
    /// Local inference against a loaded cross-encoder.
    Offline,
    /// Remote inference against an HTTP scoring service.
    Online,
}

/// Scoring client configuration loaded from environment variables.
///
/// Use [`Config::from_env`] to read `CROSSRANK_*` overrides on top of
/// defaults. An explicit server URL selects online scoring even when a
/// model path is also present.
#[derive(Debug, Clone)]
pub struct Config {
    /// Cross-encoder model identifier. Default: [`DEFAULT_MODEL`].
    pub model: String,

    /// Base URL of a remote scoring service (online mode).
    pub server_url: Option<String>,

    /// Directory of a local cross-encoder model (offline mode).
    pub model_path: Option<PathBuf>,

    /// API key forwarded as the `x-api-key` request header (online mode).
    pub api_key: Option<String>,

    /// Request timeout in seconds for the online backend.
    /// Default: [`DEFAULT_TIMEOUT_SECS`].
    pub timeout_secs: u64,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            model: DEFAULT_MODEL.to_string(),
            server_url: None,
            model_path: None,
            api_key: None,
            timeout_secs: DEFAULT_TIMEOUT_SECS,
        }
    }
}

impl Config {
    const ENV_MODEL: &'static str = "CROSSRANK_MODEL";
    const ENV_SERVER_URL: &'static str = "CROSSRANK_SERVER_URL";
    const ENV_MODEL_PATH: &'static str = "CROSSRANK_MODEL_PATH";
    const ENV_API_KEY: &'static str = "CROSSRANK_API_KEY";
    const ENV_TIMEOUT_SECS: &'static str = "CROSSRANK_TIMEOUT_SECS";

    /// Loads configuration from environment variables (falling back to defaults).
    pub fn from_env() -> Result<Self, ConfigError> {
        let defaults = Self::default();

        Ok(Self {
            model: Self::parse_string_from_env(Self::ENV_MODEL, defaults.model),
            server_url: Self::parse_optional_string_from_env(Self::ENV_SERVER_URL),
            model_path: Self::parse_optional_string_from_env(Self::ENV_MODEL_PATH)
                .map(PathBuf::from),
            api_key: Self::parse_optional_string_from_env(Self::ENV_API_KEY),
            timeout_secs: Self::parse_timeout_from_env(defaults.timeout_secs)?,
        })
    }

    /// Validates paths and basic invariants (does not load anything).
    pub fn validate(&self) -> Result<(), ConfigError> {
        if let Some(ref path) = self.model_path {
            if !path.exists() {
                return Err(ConfigError::PathNotFound { path: path.clone() });
            }
            if !path.is_dir() {
                return Err(ConfigError::NotADirectory { path: path.clone() });
            }
        }

        Ok(())
    }

    /// Execution strategy this configuration selects.
    pub fn mode(&self) -> Result<ScoringMode, ConfigError> {
        if self.server_url.is_some() {
            Ok(ScoringMode::Online)
        } else if self.model_path.is_some() {
            Ok(ScoringMode::Offline)
        } else {
            Err(ConfigError::ModeUnconfigured)
        }
    }

    /// Authentication headers to attach to outbound scoring requests.
    pub fn auth_headers(&self) -> HashMap<String, String> {
        let mut headers = HashMap::new();
        if let Some(ref key) = self.api_key {
            headers.insert("x-api-key".to_string(), key.clone());
        }
        headers
    }

    /// Assembles a [`ScoringClient`] for the configured mode.
    pub fn build_client(&self) -> Result<ScoringClient, ConfigError> {
        match self.mode()? {
            ScoringMode::Online => {
                let server_url = self.server_url.as_deref().unwrap_or_default();

                debug!(model = %self.model, url = %server_url, "Building online scoring client");

                let online = OnlineConfig::new(server_url, &self.model)
                    .with_headers(self.auth_headers())
                    .with_timeout(Duration::from_secs(self.timeout_secs));

                Ok(ScoringClient::online(online)?)
            }
            ScoringMode::Offline => {
                let model_path = self.model_path.clone().unwrap_or_default();

                debug!(
                    model = %self.model,
                    model_path = %model_path.display(),
                    "Building offline scoring client"
                );

                let encoder = EncoderConfig::new(model_path);

                Ok(ScoringClient::offline(&self.model, encoder)?)
            }
        }
    }

    fn parse_string_from_env(var_name: &str, default: String) -> String {
        env::var(var_name).unwrap_or(default)
    }

    fn parse_optional_string_from_env(var_name: &str) -> Option<String> {
        env::var(var_name)
            .ok()
            .map(|v| v.trim().to_string())
            .filter(|v| !v.is_empty())
    }

    fn parse_timeout_from_env(default: u64) -> Result<u64, ConfigError> {
        match env::var(Self::ENV_TIMEOUT_SECS) {
            Ok(value) => value
                .parse()
                .map_err(|e| ConfigError::TimeoutParseError { value, source: e }),
            Err(_) => Ok(default),
        }
    }
}
