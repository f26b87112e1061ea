//! Server configuration loaded from environment variables.
//!
//! # Environment Variables
//!
//! All variables are optional.
//!
//! - `STOREBUILDER_HOST` - Bind address (default: 127.0.0.1)
//! - `STOREBUILDER_PORT` - Listen port (default: 5173)
//! - `STOREBUILDER_API_URL` - Backend base URL (default: <http://localhost:5000>)
//! - `STOREBUILDER_REQUEST_TIMEOUT_SECS` - Backend transport timeout (default: 10)
//! - `STOREBUILDER_PUBLIC_PROTOCOL` - Scheme of storefront URLs (default: http)
//! - `STOREBUILDER_DEV_SUFFIX` - Local development host suffix (e.g. `.localhost:5173`)
//! - `STOREBUILDER_DEMO_PATH` - Demo storefront location (default: localhost:5173/demo)
//! - `STOREBUILDER_DEMO_TENANT` - Tenant shown by the console demo (default: demo)
//! - `STOREBUILDER_STOREFRONT_FALLBACK_NAME` - Storefront sentinel name (default: Demo Store)
//! - `STOREBUILDER_CONSOLE_FALLBACK_NAME` - Console sentinel name (default: My Store)
//! - `STOREBUILDER_TRUST_FORWARDED_HOST` - Honor `X-Forwarded-Host` (default: false)
//! - `SENTRY_DSN` - Sentry error tracking DSN
//! - `SENTRY_ENVIRONMENT` - Sentry environment name

use std::net::{IpAddr, SocketAddr};
use std::str::FromStr;
use std::time::Duration;

use storebuilder_core::{StorefrontEnv, TenantSlug};
use thiserror::Error;
use url::Url;

/// Configuration errors that can occur during loading.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Invalid environment variable {0}: {1}")]
    InvalidEnvVar(String, String),
}

/// Server configuration.
#[derive(Debug, Clone)]
pub struct WebConfig {
    /// IP address to bind the server to
    pub host: IpAddr,
    /// Port to listen on
    pub port: u16,
    /// Backend REST API configuration
    pub backend: BackendConfig,
    /// How canonical storefront URLs are built
    pub storefront_env: StorefrontEnv,
    /// Tenant rendered by the console demo pages
    pub demo_tenant: TenantSlug,
    /// Store name shown when a storefront's store identity is unavailable
    pub storefront_fallback_name: String,
    /// Store name shown in the console when the operator's store is unavailable
    pub console_fallback_name: String,
    /// Read the host from `X-Forwarded-Host` (only behind a trusted proxy)
    pub trust_forwarded_host: bool,
    /// Sentry DSN for error tracking
    pub sentry_dsn: Option<String>,
    /// Sentry environment name
    pub sentry_environment: Option<String>,
}

/// Backend REST API configuration.
#[derive(Debug, Clone)]
pub struct BackendConfig {
    /// Base URL, e.g. `http://localhost:5000`
    pub base_url: Url,
    /// Transport timeout applied to every backend request
    pub request_timeout: Duration,
}

impl WebConfig {
    /// Load configuration from environment variables.
    ///
    /// Calls `dotenvy::dotenv()` to load from `.env` file if present.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if a variable is present but invalid.
    pub fn from_env() -> Result<Self, ConfigError> {
        // Load .env file if present (ignore errors if not found)
        let _ = dotenvy::dotenv();

        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build configuration from an arbitrary key lookup.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if a value is present but invalid.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let vars = Vars(lookup);

        let host = vars.parsed("STOREBUILDER_HOST", "127.0.0.1")?;
        let port = vars.parsed("STOREBUILDER_PORT", "5173")?;
        let base_url = vars.parsed("STOREBUILDER_API_URL", "http://localhost:5000")?;
        let timeout_secs: u64 = vars.parsed("STOREBUILDER_REQUEST_TIMEOUT_SECS", "10")?;

        let storefront_env = StorefrontEnv::new(
            vars.or_default("STOREBUILDER_PUBLIC_PROTOCOL", "http"),
            vars.optional("STOREBUILDER_DEV_SUFFIX"),
            vars.or_default("STOREBUILDER_DEMO_PATH", "localhost:5173/demo"),
        );

        Ok(Self {
            host,
            port,
            backend: BackendConfig {
                base_url,
                request_timeout: Duration::from_secs(timeout_secs),
            },
            storefront_env,
            demo_tenant: TenantSlug::new(vars.or_default("STOREBUILDER_DEMO_TENANT", "demo")),
            storefront_fallback_name: vars
                .or_default("STOREBUILDER_STOREFRONT_FALLBACK_NAME", "Demo Store"),
            console_fallback_name: vars.or_default("STOREBUILDER_CONSOLE_FALLBACK_NAME", "My Store"),
            trust_forwarded_host: parse_bool(
                "STOREBUILDER_TRUST_FORWARDED_HOST",
                &vars.or_default("STOREBUILDER_TRUST_FORWARDED_HOST", "false"),
            )?,
            sentry_dsn: vars.optional("SENTRY_DSN"),
            sentry_environment: vars.optional("SENTRY_ENVIRONMENT"),
        })
    }

    /// Returns the socket address for binding the server.
    #[must_use]
    pub const fn socket_addr(&self) -> SocketAddr {
        SocketAddr::new(self.host, self.port)
    }

    /// Whether public URLs are served over HTTPS (drives secure cookies).
    #[must_use]
    pub fn is_secure(&self) -> bool {
        self.storefront_env.protocol.eq_ignore_ascii_case("https")
    }
}

// =============================================================================
// Helper Functions
// =============================================================================

struct Vars<F>(F);

impl<F: Fn(&str) -> Option<String>> Vars<F> {
    /// Get an optional variable, treating blank values as unset.
    fn optional(&self, key: &str) -> Option<String> {
        (self.0)(key).filter(|value| !value.trim().is_empty())
    }

    /// Get a variable with a default value.
    fn or_default(&self, key: &str, default: &str) -> String {
        self.optional(key).unwrap_or_else(|| default.to_string())
    }

    /// Get a variable (or its default) parsed into `T`.
    fn parsed<T>(&self, key: &str, default: &str) -> Result<T, ConfigError>
    where
        T: FromStr,
        T::Err: std::fmt::Display,
    {
        self.or_default(key, default)
            .trim()
            .parse::<T>()
            .map_err(|e| ConfigError::InvalidEnvVar(key.to_string(), e.to_string()))
    }
}

/// Parse a boolean flag (`true`/`false`/`1`/`0`/`yes`/`no`).
fn parse_bool(key: &str, value: &str) -> Result<bool, ConfigError> {
    match value.trim().to_ascii_lowercase().as_str() {
        "true" | "1" | "yes" | "on" => Ok(true),
        "false" | "0" | "no" | "off" => Ok(false),
        other => Err(ConfigError::InvalidEnvVar(
            key.to_string(),
            format!("expected a boolean, got '{other}'"),
        )),
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use std::collections::HashMap;

    use super::*;

    fn config_from(pairs: &[(&str, &str)]) -> Result<WebConfig, ConfigError> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| ((*k).to_string(), (*v).to_string()))
            .collect();
        WebConfig::from_lookup(|key| map.get(key).cloned())
    }

    #[test]
    fn test_defaults() {
        let config = config_from(&[]).unwrap();
        assert_eq!(config.socket_addr().to_string(), "127.0.0.1:5173");
        assert_eq!(config.backend.base_url.as_str(), "http://localhost:5000/");
        assert_eq!(config.backend.request_timeout, Duration::from_secs(10));
        assert_eq!(config.storefront_env.demo_url(), "http://localhost:5173/demo");
        assert_eq!(config.storefront_env.dev_suffix, None);
        assert_eq!(config.demo_tenant.as_str(), "demo");
        assert_eq!(config.storefront_fallback_name, "Demo Store");
        assert_eq!(config.console_fallback_name, "My Store");
        assert!(!config.trust_forwarded_host);
        assert!(!config.is_secure());
    }

    #[test]
    fn test_overrides() {
        let config = config_from(&[
            ("STOREBUILDER_PORT", "8080"),
            ("STOREBUILDER_PUBLIC_PROTOCOL", "https"),
            ("STOREBUILDER_DEV_SUFFIX", ".mystore.local:5173"),
            ("STOREBUILDER_TRUST_FORWARDED_HOST", "yes"),
            ("STOREBUILDER_REQUEST_TIMEOUT_SECS", "3"),
        ])
        .unwrap();
        assert_eq!(config.port, 8080);
        assert!(config.is_secure());
        assert_eq!(
            config.storefront_env.dev_suffix.as_deref(),
            Some(".mystore.local:5173")
        );
        assert!(config.trust_forwarded_host);
        assert_eq!(config.backend.request_timeout, Duration::from_secs(3));
    }

    #[test]
    fn test_url_settings_are_normalized() {
        let config = config_from(&[
            ("STOREBUILDER_PUBLIC_PROTOCOL", "https://"),
            ("STOREBUILDER_DEV_SUFFIX", ".mystore.local:5173/"),
        ])
        .unwrap();
        assert!(config.is_secure());
        assert_eq!(config.storefront_env.demo_url(), "https://localhost:5173/demo");
        assert_eq!(
            config.storefront_env.dev_suffix.as_deref(),
            Some(".mystore.local:5173")
        );
    }

    #[test]
    fn test_blank_values_fall_back_to_defaults() {
        let config = config_from(&[("STOREBUILDER_PORT", "  "), ("STOREBUILDER_DEV_SUFFIX", "")])
            .unwrap();
        assert_eq!(config.port, 5173);
        assert_eq!(config.storefront_env.dev_suffix, None);
    }

    #[test]
    fn test_invalid_values_are_rejected() {
        let err = config_from(&[("STOREBUILDER_PORT", "not-a-port")]).unwrap_err();
        assert!(matches!(err, ConfigError::InvalidEnvVar(ref key, _) if key == "STOREBUILDER_PORT"));

        let err = config_from(&[("STOREBUILDER_API_URL", "::nope")]).unwrap_err();
        assert!(matches!(err, ConfigError::InvalidEnvVar(_, _)));

        let err = config_from(&[("STOREBUILDER_TRUST_FORWARDED_HOST", "maybe")]).unwrap_err();
        assert!(err.to_string().contains("expected a boolean"));
    }
}
