//! API configuration.

use std::env;

/// Environment variable holding the upstream access credential.
pub const ACCESS_KEY_ENV: &str = "EXCHANGERATE_HOST_ACCESS_KEY";

/// Main API configuration.
#[derive(Debug, Clone)]
pub struct ApiConfig {
    /// Listen address.
    pub listen_addr: String,
    /// Listen port.
    pub listen_port: u16,
    /// Upstream access credential. Required and non-empty.
    pub access_key: Option<String>,
    /// Upstream endpoint override (staging, tests).
    pub upstream_endpoint: Option<String>,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            listen_addr: "0.0.0.0".to_string(),
            listen_port: 8080,
            access_key: None,
            upstream_endpoint: None,
        }
    }
}

impl ApiConfig {
    /// Load configuration from environment variables.
    pub fn from_env() -> Self {
        let mut config = Self::default();

        if let Ok(addr) = env::var("FIAT2BTC_LISTEN_ADDR") {
            config.listen_addr = addr;
        }

        if let Ok(port) = env::var("FIAT2BTC_LISTEN_PORT") {
            if let Ok(port) = port.parse() {
                config.listen_port = port;
            }
        }

        if let Ok(key) = env::var(ACCESS_KEY_ENV) {
            config.access_key = Some(key);
        }

        if let Ok(endpoint) = env::var("FIAT2BTC_UPSTREAM_ENDPOINT") {
            config.upstream_endpoint = Some(endpoint);
        }

        config
    }

    /// Validate configuration.
    ///
    /// A missing or empty credential is a configuration error surfaced here,
    /// before the server binds; the request path never sees the case.
    pub fn validate(&self) -> Result<(), String> {
        if self.listen_port == 0 {
            return Err("Listen port cannot be 0".to_string());
        }

        match self.access_key.as_deref() {
            Some(key) if !key.trim().is_empty() => Ok(()),
            _ => Err(format!(
                "Server is missing {ACCESS_KEY_ENV} environment variable"
            )),
        }
    }
}
