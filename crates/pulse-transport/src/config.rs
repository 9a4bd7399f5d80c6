//! Transport configuration.
//!
//! The base URL is an explicit value handed to [`HttpTransport`] at
//! construction. A missing URL is representable and surfaces as
//! [`PulseError::Configuration`] the moment an operation is attempted,
//! before any network I/O.
//!
//! [`HttpTransport`]: crate::client::HttpTransport
//! [`PulseError::Configuration`]: pulse_core::PulseError::Configuration

use std::time::Duration;

/// Environment variable holding the twin service base URL.
pub const BASE_URL_ENV: &str = "PULSE_API_URL";

/// Default per-request timeout.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

/// Configuration for the HTTP transport.
#[derive(Debug, Clone)]
pub struct TransportConfig {
    /// Base URL of the twin service, e.g. `http://localhost:8000`.
    /// `None` means unconfigured.
    pub base_url: Option<String>,

    /// Per-request timeout. Timeouts surface as transport errors.
    pub request_timeout: Duration,
}

impl Default for TransportConfig {
    fn default() -> Self {
        Self {
            base_url: None,
            request_timeout: DEFAULT_TIMEOUT,
        }
    }
}

impl TransportConfig {
    /// Read the base URL from the `PULSE_API_URL` environment variable.
    /// An unset or blank variable leaves the config unconfigured.
    pub fn from_env() -> Self {
        let base_url = std::env::var(BASE_URL_ENV)
            .ok()
            .filter(|url| !url.trim().is_empty());
        Self {
            base_url,
            ..Self::default()
        }
    }

    /// Create a config with an explicit base URL.
    pub fn with_base_url(url: impl Into<String>) -> Self {
        Self {
            base_url: Some(url.into()),
            ..Self::default()
        }
    }

    /// Override the request timeout.
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.request_timeout = timeout;
        self
    }
}
