//! Application configuration management.
//!
//! This module handles loading the client configuration: the backend base
//! URL, where the session token is kept, and the request timeout.
//!
//! Configuration is stored at `~/.config/shopfront/config.json`. The base URL
//! can be overridden by the `SHOPFRONT_API` environment variable, which wins
//! over the file.

use std::path::{Path, PathBuf};
use std::time::Duration;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

use crate::api::{transport::DEFAULT_TIMEOUT_SECS, ApiClient, HttpTransport};
use crate::auth::{FileTokenStore, KeyringTokenStore, TokenStore};

/// Application name used for config/data directory paths
const APP_NAME: &str = "shopfront";

/// Config file name
const CONFIG_FILE: &str = "config.json";

/// Environment variable holding the backend base URL
pub const API_ENV_VAR: &str = "SHOPFRONT_API";

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TokenBackend {
    #[default]
    File,
    Keyring,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub api_base_url: Option<String>,
    pub token_store: TokenBackend,
    pub request_timeout_secs: u64,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            api_base_url: None,
            token_store: TokenBackend::default(),
            request_timeout_secs: DEFAULT_TIMEOUT_SECS,
        }
    }
}

impl Config {
    pub fn load() -> Result<Self> {
        Self::load_from(&Self::config_path()?)
    }

    pub fn load_from(path: &Path) -> Result<Self> {
        if path.exists() {
            let contents = std::fs::read_to_string(path)
                .with_context(|| format!("Failed to read config file {}", path.display()))?;
            serde_json::from_str(&contents)
                .with_context(|| format!("Failed to parse config file {}", path.display()))
        } else {
            Ok(Self::default())
        }
    }

    pub fn save(&self) -> Result<()> {
        let path = Self::config_path()?;
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let contents = serde_json::to_string_pretty(self)?;
        std::fs::write(path, contents)?;
        Ok(())
    }

    pub fn config_path() -> Result<PathBuf> {
        let config_dir = dirs::config_dir()
            .ok_or_else(|| anyhow::anyhow!("Could not find config directory"))?;
        Ok(config_dir.join(APP_NAME).join(CONFIG_FILE))
    }

    pub fn data_dir() -> Result<PathBuf> {
        let data_dir = dirs::data_local_dir()
            .ok_or_else(|| anyhow::anyhow!("Could not find data directory"))?;
        Ok(data_dir.join(APP_NAME))
    }

    /// Base URL, taken from the environment first and the config file second
    pub fn base_url(&self) -> Result<String> {
        self.base_url_with(std::env::var(API_ENV_VAR).ok())
    }

    pub fn base_url_with(&self, env_value: Option<String>) -> Result<String> {
        env_value
            .filter(|v| !v.trim().is_empty())
            .or_else(|| self.api_base_url.clone().filter(|v| !v.trim().is_empty()))
            .map(|v| v.trim().to_string())
            .ok_or_else(|| {
                anyhow::anyhow!(
                    "No API base URL configured. Set {} or api_base_url in {}",
                    API_ENV_VAR,
                    CONFIG_FILE
                )
            })
    }

    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }

    /// API client for the resolved base URL
    pub fn api_client(&self) -> Result<ApiClient<HttpTransport>> {
        let base_url = self.base_url()?;
        let transport = HttpTransport::with_timeout(&base_url, self.request_timeout())
            .context("Failed to build HTTP client")?;
        Ok(ApiClient::new(transport))
    }

    /// Token storage backend selected by `token_store`
    pub fn token_store(&self) -> Result<Box<dyn TokenStore + Send + Sync>> {
        Ok(match self.token_store {
            TokenBackend::File => Box::new(FileTokenStore::new(&Self::data_dir()?)),
            TokenBackend::Keyring => Box::new(KeyringTokenStore::new()?),
        })
    }
}

#[cfg(test)]
mod tests {
    use tempfile::TempDir;

    use super::*;

    #[test]
    fn test_missing_file_gives_defaults() {
        let dir = TempDir::new().unwrap();
        let config = Config::load_from(&dir.path().join("config.json")).unwrap();
        assert_eq!(config.api_base_url, None);
        assert_eq!(config.token_store, TokenBackend::File);
        assert_eq!(config.request_timeout(), Duration::from_secs(30));
    }

    #[test]
    fn test_partial_file_fills_defaults() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("config.json");
        std::fs::write(&path, r#"{"token_store":"keyring"}"#).unwrap();

        let config = Config::load_from(&path).unwrap();
        assert_eq!(config.token_store, TokenBackend::Keyring);
        assert_eq!(config.request_timeout_secs, DEFAULT_TIMEOUT_SECS);
    }

    #[test]
    fn test_environment_overrides_file() {
        let config = Config {
            api_base_url: Some("http://file.example".into()),
            ..Config::default()
        };
        assert_eq!(
            config.base_url_with(Some("http://env.example".into())).unwrap(),
            "http://env.example"
        );
        assert_eq!(config.base_url_with(None).unwrap(), "http://file.example");
        // Blank env values do not shadow the file
        assert_eq!(
            config.base_url_with(Some("  ".into())).unwrap(),
            "http://file.example"
        );
    }

    #[test]
    fn test_missing_base_url_is_an_error() {
        let err = Config::default().base_url_with(None).unwrap_err();
        assert!(err.to_string().contains(API_ENV_VAR));
    }
}
