//! Storefront configuration loaded from environment variables.
//!
//! # Environment Variables
//!
//! All optional:
//! - `KYBOOT_HOST` - Bind address (default: 127.0.0.1)
//! - `KYBOOT_PORT` - Listen port (default: 3000)
//! - `KYBOOT_DATA_DIR` - Directory for the persistent cart store
//!   (default: ./data)
//! - `KYBOOT_CATALOG_PATH` - JSON catalog file; the built-in catalog is
//!   used when unset
//! - `KYBOOT_CHECKOUT_URL` - External checkout hand-off target
//!   (default: /checkout.html)
//! - `KYBOOT_FX` - Enable decorative effects, "true"/"false"
//!   (default: true)
//! - `SENTRY_DSN` - Sentry error tracking DSN
//! - `SENTRY_ENVIRONMENT` - Sentry environment name

use std::net::{IpAddr, SocketAddr};
use std::path::PathBuf;

use thiserror::Error;

use crate::fx::FxConfig;

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
    /// Directory backing the persistent cart store
    pub data_dir: PathBuf,
    /// Catalog file to load instead of the built-in catalog
    pub catalog_path: Option<PathBuf>,
    /// Where `GET /checkout` hands off to
    pub checkout_url: String,
    /// Decorative effects switch
    pub fx: FxConfig,
    /// Sentry DSN for error tracking
    pub sentry_dsn: Option<String>,
    /// Sentry environment name
    pub sentry_environment: Option<String>,
}

impl StorefrontConfig {
    /// Load configuration from environment variables.
    ///
    /// Calls `dotenvy::dotenv()` to load from `.env` file if present.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if a set variable fails to parse.
    pub fn from_env() -> Result<Self, ConfigError> {
        // Load .env file if present (ignore errors if not found)
        let _ = dotenvy::dotenv();

        let host = get_env_or_default("KYBOOT_HOST", "127.0.0.1")
            .parse::<IpAddr>()
            .map_err(|e| ConfigError::InvalidEnvVar("KYBOOT_HOST".to_string(), e.to_string()))?;
        let port = get_env_or_default("KYBOOT_PORT", "3000")
            .parse::<u16>()
            .map_err(|e| ConfigError::InvalidEnvVar("KYBOOT_PORT".to_string(), e.to_string()))?;

        let data_dir = PathBuf::from(get_env_or_default("KYBOOT_DATA_DIR", "./data"));
        let catalog_path = get_optional_env("KYBOOT_CATALOG_PATH").map(PathBuf::from);
        let checkout_url = get_env_or_default("KYBOOT_CHECKOUT_URL", "/checkout.html");

        let fx_enabled = match get_env_or_default("KYBOOT_FX", "true").as_str() {
            "true" | "1" | "on" => true,
            "false" | "0" | "off" => false,
            other => {
                return Err(ConfigError::InvalidEnvVar(
                    "KYBOOT_FX".to_string(),
                    format!("expected true/false, got {other}"),
                ));
            }
        };

        Ok(Self {
            host,
            port,
            data_dir,
            catalog_path,
            checkout_url,
            fx: FxConfig {
                enabled: fx_enabled,
            },
            sentry_dsn: get_optional_env("SENTRY_DSN"),
            sentry_environment: get_optional_env("SENTRY_ENVIRONMENT"),
        })
    }

    /// Socket address to bind the server to.
    #[must_use]
    pub const fn socket_addr(&self) -> SocketAddr {
        SocketAddr::new(self.host, self.port)
    }
}

impl Default for StorefrontConfig {
    /// Local development defaults, also used by the test harness.
    fn default() -> Self {
        Self {
            host: IpAddr::from([127, 0, 0, 1]),
            port: 3000,
            data_dir: PathBuf::from("./data"),
            catalog_path: None,
            checkout_url: "/checkout.html".to_owned(),
            fx: FxConfig::default(),
            sentry_dsn: None,
            sentry_environment: None,
        }
    }
}

/// Get an environment variable, or a default if unset.
fn get_env_or_default(key: &str, default: &str) -> String {
    std::env::var(key).unwrap_or_else(|_| default.to_string())
}

/// Get an environment variable, treating empty as unset.
fn get_optional_env(key: &str) -> Option<String> {
    std::env::var(key).ok().filter(|v| !v.is_empty())
}
