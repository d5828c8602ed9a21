use std::{fs, path::Path};

use serde::Deserialize;

use crate::{Result, SigmapError};

/// Environment variable selecting the API host.
pub const API_URL_ENV: &str = "SIGMAP_API_URL";
/// API host used when neither the config file nor the environment names one.
pub const DEFAULT_API_URL: &str = "http://127.0.0.1:7001";

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct Config {
    /// api server config
    pub api: ApiConfig,
    /// response cache config
    pub cache: CacheConfig,
    /// notification config
    pub notify: NotifyConfig,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ApiConfig {
    /// base url of the admin api
    pub base_url: String,
    /// request timeout in milliseconds
    pub timeout_ms: u64,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct CacheConfig {
    /// max number of cached responses
    pub capacity: usize,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct NotifyConfig {
    /// lifetime of a notification in milliseconds
    pub ttl_ms: u64,
    /// size of the broadcast queue for subscribers
    pub queue_size: usize,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_API_URL.to_string(),
            timeout_ms: 10_000,
        }
    }
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self {
            capacity: 256,
        }
    }
}

impl Default for NotifyConfig {
    fn default() -> Self {
        Self {
            ttl_ms: 3000,
            queue_size: 64,
        }
    }
}

impl Config {
    pub fn create<T: AsRef<Path>>(path: T) -> Result<Self> {
        let data = fs::read_to_string(path.as_ref()).map_err(|err| SigmapError::Config(format!("failed to load config file {:?}: {}", path.as_ref(), err)))?;

        Self::load_from_str(data.as_str())
    }

    pub fn load_from_str(toml_str: &str) -> Result<Self> {
        let config = toml::from_str::<Config>(toml_str)?;
        Ok(config)
    }

    /// Applies `SIGMAP_API_URL` on top of the loaded values.
    pub fn with_env(self) -> Self {
        self.with_api_url(std::env::var(API_URL_ENV).ok())
    }

    fn with_api_url(
        mut self,
        url: Option<String>,
    ) -> Self {
        if let Some(url) = url.map(|u| u.trim().to_string()).filter(|u| !u.is_empty()) {
            self.api.base_url = url;
        }
        self
    }
}
