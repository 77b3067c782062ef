//! Configuration module for the tank registry backend.
//!
//! All configuration is loaded from environment variables. Only the store
//! connection string is mandatory; everything else has a default.

use std::env;
use std::fmt;
use std::net::SocketAddr;

use axum::http::HeaderValue;

/// Origin accepted by the CORS layer when none is configured.
pub const DEFAULT_ALLOWED_ORIGIN: &str = "https://ecse3038-lab3-tester.netlify.app";

/// Application configuration loaded from environment variables.
#[derive(Debug, Clone)]
pub struct Config {
    /// sqlx connection string for the document store
    pub database_url: String,
    /// Address to bind the server to
    pub bind_addr: SocketAddr,
    /// The single origin allowed to make credentialed cross-origin requests
    pub allowed_origin: HeaderValue,
    /// Log level (trace, debug, info, warn, error)
    pub log_level: String,
}

/// Reasons the process refuses to start.
#[derive(Debug)]
pub enum ConfigError {
    /// A required variable is not set
    Missing(&'static str),
    /// A variable is set but cannot be parsed
    Invalid { key: &'static str, reason: String },
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::Missing(key) => write!(f, "{} must be set", key),
            ConfigError::Invalid { key, reason } => write!(f, "Invalid {}: {}", key, reason),
        }
    }
}

impl std::error::Error for ConfigError {}

impl Config {
    /// Load configuration from environment variables.
    pub fn from_env() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();

        let database_url = env::var("TANKS_DATABASE_URL")
            .ok()
            .filter(|url| !url.trim().is_empty())
            .ok_or(ConfigError::Missing("TANKS_DATABASE_URL"))?;

        let bind_addr = env::var("TANKS_BIND_ADDR")
            .unwrap_or_else(|_| "127.0.0.1:8000".to_string())
            .parse()
            .map_err(|e: std::net::AddrParseError| ConfigError::Invalid {
                key: "TANKS_BIND_ADDR",
                reason: e.to_string(),
            })?;

        let allowed_origin = env::var("TANKS_ALLOWED_ORIGIN")
            .unwrap_or_else(|_| DEFAULT_ALLOWED_ORIGIN.to_string())
            .parse()
            .map_err(|e: axum::http::header::InvalidHeaderValue| ConfigError::Invalid {
                key: "TANKS_ALLOWED_ORIGIN",
                reason: e.to_string(),
            })?;

        let log_level = env::var("TANKS_LOG_LEVEL").unwrap_or_else(|_| "info".to_string());

        Ok(Self {
            database_url,
            bind_addr,
            allowed_origin,
            log_level,
        })
    }
}
