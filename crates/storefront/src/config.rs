//! Storefront configuration loaded from environment variables.
//!
//! # Environment Variables
//!
//! All variables are optional.
//!
//! - `EDUCART_HOST` - Bind address (default: 127.0.0.1)
//! - `EDUCART_PORT` - Listen port (default: 3000)
//! - `EDUCART_BASE_URL` - Public URL for the storefront (default: <http://localhost:3000>)
//! - `EDUCART_CATALOG_PATH` - JSON catalog file (default: built-in sample catalog)
//! - `EDUCART_CHECKOUT_URL` - External checkout/payment link (default: `#`)
//! - `EDUCART_STATIC_DIR` - Directory served under `/static` (default: crates/storefront/static)
//! - `EDUCART_MAX_SESSIONS` - Upper bound on live visitor sessions (default: 10000)
//! - `SENTRY_DSN` - Sentry error tracking DSN
//! - `SENTRY_ENVIRONMENT` - Sentry environment name
//! - `SENTRY_SAMPLE_RATE` - Sentry error sample rate, 0.0 to 1.0 (default: 1.0)
//! - `SENTRY_TRACES_SAMPLE_RATE` - Sentry traces sample rate, 0.0 to 1.0 (default: 0.0)

use std::net::{IpAddr, SocketAddr};
use std::path::PathBuf;

use educart_core::PLACEHOLDER_CHECKOUT_URL;
use thiserror::Error;
use url::Url;

use crate::middleware::session_store::DEFAULT_MAX_SESSIONS;

/// Default static asset directory, relative to the workspace root.
const DEFAULT_STATIC_DIR: &str = "crates/storefront/static";

/// Configuration errors that can occur during loading.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Invalid environment variable {0}: {1}")]
    InvalidEnvVar(String, String),
}

/// Storefront application configuration.
#[derive(Debug, Clone)]
pub struct StorefrontConfig {
    /// IP address to bind the server to
    pub host: IpAddr,
    /// Port to listen on
    pub port: u16,
    /// Public base URL for the storefront
    pub base_url: String,
    /// Optional JSON catalog replacing the built-in sample
    pub catalog_path: Option<PathBuf>,
    /// Where the checkout button hands the visitor off to
    pub checkout_url: String,
    /// Directory served under `/static`
    pub static_dir: PathBuf,
    /// Most sessions kept in memory at once
    pub max_sessions: u64,
    /// Sentry DSN for error tracking
    pub sentry_dsn: Option<String>,
    /// Sentry environment (e.g., "development", "production")
    pub sentry_environment: Option<String>,
    /// Sentry error sample rate (0.0 to 1.0)
    pub sentry_sample_rate: f32,
    /// Sentry traces sample rate (0.0 to 1.0)
    pub sentry_traces_sample_rate: f32,
}

impl Default for StorefrontConfig {
    fn default() -> Self {
        Self {
            host: IpAddr::from([127, 0, 0, 1]),
            port: 3000,
            base_url: "http://localhost:3000".to_string(),
            catalog_path: None,
            checkout_url: PLACEHOLDER_CHECKOUT_URL.to_string(),
            static_dir: PathBuf::from(DEFAULT_STATIC_DIR),
            max_sessions: DEFAULT_MAX_SESSIONS,
            sentry_dsn: None,
            sentry_environment: None,
            sentry_sample_rate: 1.0,
            sentry_traces_sample_rate: 0.0,
        }
    }
}

impl StorefrontConfig {
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

        Self::from_lookup(&|key| std::env::var(key).ok())
    }

    /// Load configuration from an arbitrary variable lookup.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if a variable is present but invalid.
    pub fn from_lookup(lookup: &dyn Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let defaults = Self::default();

        let host = match lookup("EDUCART_HOST") {
            Some(value) => value.parse::<IpAddr>().map_err(|e| {
                ConfigError::InvalidEnvVar("EDUCART_HOST".to_string(), e.to_string())
            })?,
            None => defaults.host,
        };
        let port = match lookup("EDUCART_PORT") {
            Some(value) => value.parse::<u16>().map_err(|e| {
                ConfigError::InvalidEnvVar("EDUCART_PORT".to_string(), e.to_string())
            })?,
            None => defaults.port,
        };
        let base_url = lookup("EDUCART_BASE_URL").unwrap_or(defaults.base_url);
        validate_url(&base_url, "EDUCART_BASE_URL")?;

        let catalog_path = lookup("EDUCART_CATALOG_PATH")
            .filter(|path| !path.trim().is_empty())
            .map(PathBuf::from);

        let checkout_url = lookup("EDUCART_CHECKOUT_URL").unwrap_or(defaults.checkout_url);
        validate_checkout_url(&checkout_url)?;

        let static_dir = lookup("EDUCART_STATIC_DIR")
            .filter(|dir| !dir.trim().is_empty())
            .map_or(defaults.static_dir, PathBuf::from);

        let max_sessions = match lookup("EDUCART_MAX_SESSIONS") {
            Some(value) => value
                .parse::<u64>()
                .ok()
                .filter(|&n| n > 0)
                .ok_or_else(|| {
                    ConfigError::InvalidEnvVar(
                        "EDUCART_MAX_SESSIONS".to_string(),
                        format!("expected a positive integer (got '{value}')"),
                    )
                })?,
            None => defaults.max_sessions,
        };

        let sentry_dsn = lookup("SENTRY_DSN").filter(|dsn| !dsn.is_empty());
        let sentry_environment = lookup("SENTRY_ENVIRONMENT");
        let sentry_sample_rate = get_sample_rate(
            lookup,
            "SENTRY_SAMPLE_RATE",
            defaults.sentry_sample_rate,
        )?;
        let sentry_traces_sample_rate = get_sample_rate(
            lookup,
            "SENTRY_TRACES_SAMPLE_RATE",
            defaults.sentry_traces_sample_rate,
        )?;

        Ok(Self {
            host,
            port,
            base_url,
            catalog_path,
            checkout_url,
            static_dir,
            max_sessions,
            sentry_dsn,
            sentry_environment,
            sentry_sample_rate,
            sentry_traces_sample_rate,
        })
    }

    /// Returns the socket address for binding the server.
    #[must_use]
    pub const fn socket_addr(&self) -> SocketAddr {
        SocketAddr::new(self.host, self.port)
    }

    /// Whether the storefront is served over HTTPS (secure cookies).
    #[must_use]
    pub fn is_secure(&self) -> bool {
        self.base_url.starts_with("https://")
    }
}

// =============================================================================
// Helper Functions
// =============================================================================

/// Validate that a value is an absolute http(s) URL.
fn validate_url(value: &str, var_name: &str) -> Result<(), ConfigError> {
    let url = Url::parse(value)
        .map_err(|e| ConfigError::InvalidEnvVar(var_name.to_string(), e.to_string()))?;
    if !matches!(url.scheme(), "http" | "https") {
        return Err(ConfigError::InvalidEnvVar(
            var_name.to_string(),
            format!("unsupported scheme '{}'", url.scheme()),
        ));
    }
    Ok(())
}

/// The checkout link may be the `#` placeholder or an absolute URL.
fn validate_checkout_url(value: &str) -> Result<(), ConfigError> {
    if value == PLACEHOLDER_CHECKOUT_URL {
        return Ok(());
    }
    validate_url(value, "EDUCART_CHECKOUT_URL")
}

/// Parse a sample rate in `0.0..=1.0`, falling back to `default` when unset.
fn get_sample_rate(
    lookup: &dyn Fn(&str) -> Option<String>,
    key: &str,
    default: f32,
) -> Result<f32, ConfigError> {
    let Some(raw) = lookup(key) else {
        return Ok(default);
    };
    let rate = raw
        .parse::<f32>()
        .map_err(|e| ConfigError::InvalidEnvVar(key.to_string(), e.to_string()))?;
    if !(0.0..=1.0).contains(&rate) {
        return Err(ConfigError::InvalidEnvVar(
            key.to_string(),
            format!("must be between 0.0 and 1.0 (got {rate})"),
        ));
    }
    Ok(rate)
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use std::collections::HashMap;

    use super::*;

    fn load(vars: &[(&str, &str)]) -> Result<StorefrontConfig, ConfigError> {
        let vars: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| ((*k).to_string(), (*v).to_string()))
            .collect();
        StorefrontConfig::from_lookup(&|key| vars.get(key).cloned())
    }

    #[test]
    fn test_defaults_when_unset() {
        let config = load(&[]).unwrap();
        assert_eq!(config.port, 3000);
        assert_eq!(config.host.to_string(), "127.0.0.1");
        assert_eq!(config.checkout_url, "#");
        assert!(config.catalog_path.is_none());
        assert!(config.sentry_dsn.is_none());
        assert!(!config.is_secure());
    }

    #[test]
    fn test_overrides() {
        let config = load(&[
            ("EDUCART_HOST", "0.0.0.0"),
            ("EDUCART_PORT", "8080"),
            ("EDUCART_BASE_URL", "https://shop.example.org"),
            ("EDUCART_CATALOG_PATH", "/srv/catalog.json"),
            ("EDUCART_CHECKOUT_URL", "https://pay.example.org/educart"),
            ("SENTRY_TRACES_SAMPLE_RATE", "0.25"),
        ])
        .unwrap();

        assert_eq!(config.socket_addr().to_string(), "0.0.0.0:8080");
        assert!(config.is_secure());
        assert_eq!(
            config.catalog_path.as_deref(),
            Some(std::path::Path::new("/srv/catalog.json"))
        );
        assert_eq!(config.checkout_url, "https://pay.example.org/educart");
        assert!((config.sentry_traces_sample_rate - 0.25).abs() < f32::EPSILON);
    }

    #[test]
    fn test_invalid_port() {
        let err = load(&[("EDUCART_PORT", "http")]).unwrap_err();
        assert!(matches!(err, ConfigError::InvalidEnvVar(name, _) if name == "EDUCART_PORT"));
    }

    #[test]
    fn test_invalid_checkout_url() {
        let err = load(&[("EDUCART_CHECKOUT_URL", "not a url")]).unwrap_err();
        assert!(matches!(err, ConfigError::InvalidEnvVar(name, _) if name == "EDUCART_CHECKOUT_URL"));

        let err = load(&[("EDUCART_CHECKOUT_URL", "javascript:alert(1)")]).unwrap_err();
        assert!(matches!(err, ConfigError::InvalidEnvVar(_, _)));
    }

    #[test]
    fn test_max_sessions() {
        assert_eq!(load(&[]).unwrap().max_sessions, DEFAULT_MAX_SESSIONS);
        assert_eq!(
            load(&[("EDUCART_MAX_SESSIONS", "500")]).unwrap().max_sessions,
            500
        );
        let err = load(&[("EDUCART_MAX_SESSIONS", "0")]).unwrap_err();
        assert!(matches!(err, ConfigError::InvalidEnvVar(name, _) if name == "EDUCART_MAX_SESSIONS"));
    }

    #[test]
    fn test_sample_rate_out_of_range() {
        let err = load(&[("SENTRY_SAMPLE_RATE", "1.5")]).unwrap_err();
        assert!(matches!(err, ConfigError::InvalidEnvVar(name, _) if name == "SENTRY_SAMPLE_RATE"));
    }

    #[test]
    fn test_blank_catalog_path_is_ignored() {
        let config = load(&[("EDUCART_CATALOG_PATH", "  ")]).unwrap();
        assert!(config.catalog_path.is_none());
    }

    #[test]
    fn test_socket_addr() {
        let config = StorefrontConfig::default();
        let addr = config.socket_addr();
        assert_eq!(addr.ip().to_string(), "127.0.0.1");
        assert_eq!(addr.port(), 3000);
    }
}
