//! Profile service configuration loaded via OrthoConfig.

use std::time::Duration;

use ortho_config::OrthoConfig;
use serde::Deserialize;
use url::Url;

const DEFAULT_BASE_URL: &str = "http://127.0.0.1:8080/api/v1";
const DEFAULT_TIMEOUT_MS: u64 = 10_000;

/// Problems turning loaded settings into adapter inputs.
#[derive(Debug, thiserror::Error)]
pub enum SettingsError {
    /// The configured base URL does not parse.
    #[error("invalid profile service base URL `{value}`: {source}")]
    InvalidBaseUrl {
        /// Raw configured value.
        value: String,
        /// Parser failure.
        #[source]
        source: url::ParseError,
    },
}

/// Configuration values selecting and tuning the user data service.
#[derive(Debug, Clone, Deserialize, OrthoConfig)]
#[ortho_config(prefix = "PROFILE_SERVICE")]
pub struct ProfileServiceSettings {
    /// Root URL of the profile API.
    pub base_url: Option<String>,
    /// Request timeout in milliseconds.
    pub timeout_ms: Option<u64>,
    /// Serve the built-in preview user instead of calling the API.
    #[ortho_config(default = false)]
    pub use_fixture: bool,
    /// Simulated latency for the fixture service, in milliseconds.
    pub fixture_delay_ms: Option<u64>,
    /// Emit logs as JSON lines.
    #[ortho_config(default = false)]
    pub json_logs: bool,
}

impl ProfileServiceSettings {
    /// Return the configured base URL, falling back to the local default.
    ///
    /// # Errors
    ///
    /// Returns [`SettingsError::InvalidBaseUrl`] when the value does not parse.
    pub fn base_url(&self) -> Result<Url, SettingsError> {
        let raw = self.base_url.as_deref().unwrap_or(DEFAULT_BASE_URL);
        Url::parse(raw).map_err(|source| SettingsError::InvalidBaseUrl {
            value: raw.to_owned(),
            source,
        })
    }

    /// Return the HTTP request timeout.
    pub fn timeout(&self) -> Duration {
        Duration::from_millis(self.timeout_ms.unwrap_or(DEFAULT_TIMEOUT_MS))
    }

    /// Return the fixture service latency, zero when unset.
    pub fn fixture_delay(&self) -> Duration {
        self.fixture_delay_ms
            .map(Duration::from_millis)
            .unwrap_or_default()
    }
}
