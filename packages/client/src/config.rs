//! Client configuration.
//!
//! Defaults point at the public API. `from_env` overlays these variables:
//!
//! | Variable            | Field      |
//! |---------------------|------------|
//! | `PLUGGY_API_URL`    | `base_url` |
//! | `PLUGGY_API_KEY`    | `api_key`  |
//! | `PLUGGY_TIMEOUT_MS` | `timeout`  |

use std::time::Duration;

use url::Url;

use crate::error::Error;

pub const DEFAULT_BASE_URL: &str = "https://api.pluggy.ai";
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

pub const ENV_API_URL: &str = "PLUGGY_API_URL";
pub const ENV_API_KEY: &str = "PLUGGY_API_KEY";
pub const ENV_TIMEOUT_MS: &str = "PLUGGY_TIMEOUT_MS";

#[derive(Clone)]
pub struct ClientConfig {
    pub base_url: String,
    /// Sent as `X-API-KEY` on every request when set.
    pub api_key: Option<String>,
    /// Per-request timeout.
    pub timeout: Duration,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            api_key: None,
            timeout: DEFAULT_TIMEOUT,
        }
    }
}

impl std::fmt::Debug for ClientConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ClientConfig")
            .field("base_url", &self.base_url)
            .field("api_key", &self.api_key.as_ref().map(|_| "<redacted>"))
            .field("timeout", &self.timeout)
            .finish()
    }
}

impl ClientConfig {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            ..Default::default()
        }
    }

    pub fn with_api_key(mut self, api_key: impl Into<String>) -> Self {
        self.api_key = Some(api_key.into());
        self
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Defaults overlaid with `PLUGGY_*` environment variables.
    pub fn from_env() -> Result<Self, Error> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Defaults overlaid with values from `lookup`; empty values are ignored.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, Error>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |name: &str| lookup(name).filter(|v| !v.trim().is_empty());
        let mut config = Self::default();

        if let Some(url) = get(ENV_API_URL) {
            config.base_url = url;
        }
        config.api_key = get(ENV_API_KEY);
        if let Some(ms) = get(ENV_TIMEOUT_MS) {
            let ms: u64 = ms.trim().parse().map_err(|_| Error::Config {
                message: format!("{} must be an integer, got '{}'", ENV_TIMEOUT_MS, ms),
            })?;
            config.timeout = Duration::from_millis(ms);
        }

        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), Error> {
        let url = self.parsed_base_url()?;
        if url.cannot_be_a_base() {
            return Err(Error::InvalidUrl {
                message: format!("'{}' cannot be used as a base URL", self.base_url),
            });
        }
        if self.timeout.is_zero() {
            return Err(Error::Config {
                message: "timeout must be greater than zero".to_string(),
            });
        }
        Ok(())
    }

    pub fn parsed_base_url(&self) -> Result<Url, Error> {
        Ok(Url::parse(&self.base_url)?)
    }
}
