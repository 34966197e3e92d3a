//! Application configuration module
//!
//! Configuration is read from the environment (after `.env` has been loaded
//! by the binary) and validated before the server starts.
//!
//! | Variable | Default | Meaning |
//! |---|---|---|
//! | `SERVER_HOST` | `0.0.0.0` | bind address |
//! | `SERVER_PORT` | `3000` | bind port |
//! | `DATABASE_URL` | unset | Postgres URL; in-memory store when unset |
//! | `TOKEN_TTL_HOURS` | `12` | access token lifetime, at most one year |

use std::net::{IpAddr, SocketAddr};

use thiserror::Error;

/// Default token lifetime
pub const DEFAULT_TOKEN_TTL_HOURS: i64 = 12;

/// Longest accepted token lifetime (one year)
pub const MAX_TOKEN_TTL_HOURS: i64 = 24 * 365;

/// Application configuration
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub host: IpAddr,
    pub port: u16,
    pub database_url: Option<String>,
    pub token_ttl_hours: i64,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            host: IpAddr::from([0, 0, 0, 0]),
            port: 3000,
            database_url: None,
            token_ttl_hours: DEFAULT_TOKEN_TTL_HOURS,
        }
    }
}

impl AppConfig {
    /// Create a new AppConfigBuilder
    pub fn builder() -> AppConfigBuilder {
        AppConfigBuilder::default()
    }

    /// Read configuration from environment variables
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::Invalid` when a variable is set but cannot be
    /// parsed, or when the result fails [`AppConfig::validate`].
    pub fn from_env() -> Result<Self, ConfigError> {
        let mut builder = Self::builder();

        if let Ok(host) = std::env::var("SERVER_HOST") {
            let host = host
                .parse::<IpAddr>()
                .map_err(|_| ConfigError::Invalid("SERVER_HOST", host.clone()))?;
            builder = builder.host(host);
        }
        if let Ok(port) = std::env::var("SERVER_PORT") {
            let port = port
                .parse::<u16>()
                .map_err(|_| ConfigError::Invalid("SERVER_PORT", port.clone()))?;
            builder = builder.port(port);
        }
        if let Ok(url) = std::env::var("DATABASE_URL") {
            if !url.trim().is_empty() {
                builder = builder.database_url(url);
            }
        }
        if let Ok(ttl) = std::env::var("TOKEN_TTL_HOURS") {
            let ttl = ttl
                .parse::<i64>()
                .map_err(|_| ConfigError::Invalid("TOKEN_TTL_HOURS", ttl.clone()))?;
            builder = builder.token_ttl_hours(ttl);
        }

        builder.build()
    }

    /// Validate the configuration
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.port == 0 {
            return Err(ConfigError::Invalid("SERVER_PORT", "0".to_string()));
        }
        if !(1..=MAX_TOKEN_TTL_HOURS).contains(&self.token_ttl_hours) {
            return Err(ConfigError::Invalid(
                "TOKEN_TTL_HOURS",
                self.token_ttl_hours.to_string(),
            ));
        }
        if let Some(url) = &self.database_url {
            if !(url.starts_with("postgres://") || url.starts_with("postgresql://")) {
                return Err(ConfigError::InvalidUrl(url.clone()));
            }
        }
        Ok(())
    }

    /// Socket address the server binds to
    pub fn bind_addr(&self) -> SocketAddr {
        SocketAddr::new(self.host, self.port)
    }
}

/// Builder for AppConfig
#[derive(Debug, Default)]
pub struct AppConfigBuilder {
    host: Option<IpAddr>,
    port: Option<u16>,
    database_url: Option<String>,
    token_ttl_hours: Option<i64>,
}

impl AppConfigBuilder {
    pub fn host(mut self, host: IpAddr) -> Self {
        self.host = Some(host);
        self
    }

    pub fn port(mut self, port: u16) -> Self {
        self.port = Some(port);
        self
    }

    /// Set the Postgres connection URL
    pub fn database_url(mut self, url: String) -> Self {
        self.database_url = Some(url);
        self
    }

    pub fn token_ttl_hours(mut self, hours: i64) -> Self {
        self.token_ttl_hours = Some(hours);
        self
    }

    /// Build and validate the configuration
    pub fn build(self) -> Result<AppConfig, ConfigError> {
        let defaults = AppConfig::default();
        let config = AppConfig {
            host: self.host.unwrap_or(defaults.host),
            port: self.port.unwrap_or(defaults.port),
            database_url: self.database_url,
            token_ttl_hours: self.token_ttl_hours.unwrap_or(defaults.token_ttl_hours),
        };
        config.validate()?;
        Ok(config)
    }
}

/// Configuration errors
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("invalid URL: {0}")]
    InvalidUrl(String),
    #[error("invalid value for {0}: {1}")]
    Invalid(&'static str, String),
}
