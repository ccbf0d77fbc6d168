//! Server configuration loaded from environment variables.
//!
//! # Environment Variables
//!
//! All optional - the service carries no secrets and every variable has a
//! sensible default:
//! - `CAR_FINDER_HOST` - Bind address (default: 127.0.0.1)
//! - `CAR_FINDER_PORT` - Listen port (default: 3000)
//! - `CAR_FINDER_API_DELAY_MS` - Simulated response latency in milliseconds
//!   (default: 500; set to 0 to disable)
//! - `SENTRY_DSN` - Sentry error tracking DSN
//! - `SENTRY_ENVIRONMENT` - Sentry environment name

use std::net::{IpAddr, Ipv4Addr, SocketAddr};
use std::time::Duration;

use thiserror::Error;

const DEFAULT_PORT: u16 = 3000;
const DEFAULT_API_DELAY_MS: u64 = 500;

/// Configuration errors that can occur during loading.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Invalid environment variable {0}: {1}")]
    InvalidEnvVar(String, String),
}

/// Catalog service configuration.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// IP address to bind the server to
    pub host: IpAddr,
    /// Port to listen on
    pub port: u16,
    /// Artificial latency applied to the catalog endpoints.
    ///
    /// The delay only postpones the response; it never reorders or filters
    /// the records.
    pub api_delay: Duration,
    /// Sentry DSN for error tracking
    pub sentry_dsn: Option<String>,
    /// Sentry environment name
    pub sentry_environment: Option<String>,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: IpAddr::V4(Ipv4Addr::LOCALHOST),
            port: DEFAULT_PORT,
            api_delay: Duration::from_millis(DEFAULT_API_DELAY_MS),
            sentry_dsn: None,
            sentry_environment: None,
        }
    }
}

impl ServerConfig {
    /// Load configuration from process environment variables.
    ///
    /// # Errors
    ///
    /// Returns an error if a variable is present but unparseable.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Load configuration from an arbitrary variable source.
    ///
    /// Split out from [`Self::from_env`] so tests can supply variables
    /// without mutating the process environment.
    pub fn from_lookup(
        lookup: impl Fn(&str) -> Option<String>,
    ) -> Result<Self, ConfigError> {
        let mut config = Self::default();

        if let Some(host) = lookup("CAR_FINDER_HOST") {
            config.host = host
                .parse()
                .map_err(|_| invalid("CAR_FINDER_HOST", &host))?;
        }
        if let Some(port) = lookup("CAR_FINDER_PORT") {
            config.port = port
                .parse()
                .map_err(|_| invalid("CAR_FINDER_PORT", &port))?;
        }
        if let Some(delay) = lookup("CAR_FINDER_API_DELAY_MS") {
            let millis: u64 = delay
                .parse()
                .map_err(|_| invalid("CAR_FINDER_API_DELAY_MS", &delay))?;
            config.api_delay = Duration::from_millis(millis);
        }
        config.sentry_dsn = lookup("SENTRY_DSN");
        config.sentry_environment = lookup("SENTRY_ENVIRONMENT");

        Ok(config)
    }

    /// Socket address to bind to.
    #[must_use]
    pub const fn socket_addr(&self) -> SocketAddr {
        SocketAddr::new(self.host, self.port)
    }
}

fn invalid(key: &str, value: &str) -> ConfigError {
    ConfigError::InvalidEnvVar(key.to_owned(), value.to_owned())
}
