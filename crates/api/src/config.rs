//! # API Configuration Module
//!
//! Loads the server configuration from environment variables, with defaults
//! where a value is optional.
//!
//! ## Environment Variables
//!
//! - `API_HOST`: host address to bind to (default: "0.0.0.0")
//! - `API_PORT`: port to listen on (default: 3030)
//! - `DATABASE_URL`: PostgreSQL connection string (required)
//! - `DATABASE_MAX_CONNECTIONS`: connection pool size (default: 5)
//! - `LOG_LEVEL`: logging level (default: "info")
//! - `API_CORS_ORIGINS`: comma-separated list of allowed CORS origins
//! - `API_REQUEST_TIMEOUT_SECONDS`: per-request timeout (default: 30)
//! - `ENFORCE_WEEKDAY_MATCH`: apply window weekday masks by default (default: false)
//! - `SLOT_RANGE_MAX_DAYS`: largest day count a range query may ask for (default: 14)

use axum::http::HeaderValue;
use clinicdesk_core::service::DEFAULT_MAX_RANGE_DAYS;
use clinicdesk_db::DEFAULT_MAX_CONNECTIONS;
use eyre::{eyre, Result, WrapErr};
use std::env;
use tracing::Level;

/// Configuration for the ClinicDesk API server
///
/// # Example
///
/// ```no_run
/// use eyre::Result;
/// use clinicdesk_api::config::ApiConfig;
///
/// fn example() -> Result<()> {
///     let config = ApiConfig::from_env()?;
///     println!("Starting server on {}", config.server_addr());
///     Ok(())
/// }
/// ```
#[derive(Debug, Clone)]
pub struct ApiConfig {
    /// Host address for the API server (e.g., "127.0.0.1", "0.0.0.0")
    pub host: String,

    /// Port for the API server to listen on
    pub port: u16,

    /// PostgreSQL database connection string
    pub database_url: String,

    /// Maximum number of pooled database connections
    pub database_max_connections: u32,

    /// Log level for the application
    pub log_level: Level,

    /// CORS allowed origins (optional)
    pub cors_origins: Option<Vec<String>>,

    /// Request timeout in seconds
    pub request_timeout: u64,

    /// Whether slot queries honour window weekday masks unless told otherwise
    pub enforce_weekday_match: bool,

    /// Upper bound for the `days` parameter of range queries
    pub slot_range_max_days: u32,
}

impl ApiConfig {
    /// Creates a new ApiConfig from environment variables
    ///
    /// # Errors
    ///
    /// This function will return an error if:
    /// - The DATABASE_URL environment variable is not set
    /// - A numeric value cannot be parsed
    /// - A CORS origin is not a valid header value
    /// - ENFORCE_WEEKDAY_MATCH is not a recognised boolean
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Builds the configuration from an arbitrary key lookup.
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let var = |key: &str, default: &str| lookup(key).unwrap_or_else(|| default.to_string());

        // Network settings
        let host = var("API_HOST", "0.0.0.0");
        let port = var("API_PORT", "3030")
            .parse()
            .wrap_err("Invalid API_PORT value")?;

        // Database settings
        let database_url =
            lookup("DATABASE_URL").ok_or_else(|| eyre!("DATABASE_URL environment variable must be set"))?;
        let database_max_connections: u32 = var(
            "DATABASE_MAX_CONNECTIONS",
            &DEFAULT_MAX_CONNECTIONS.to_string(),
        )
        .parse()
        .wrap_err("Invalid DATABASE_MAX_CONNECTIONS value")?;
        if database_max_connections == 0 {
            return Err(eyre!("DATABASE_MAX_CONNECTIONS must be at least 1"));
        }

        // Logging settings
        let log_level = match var("LOG_LEVEL", "info").to_ascii_lowercase().as_str() {
            "trace" => Level::TRACE,
            "debug" => Level::DEBUG,
            "info" => Level::INFO,
            "warn" => Level::WARN,
            "error" => Level::ERROR,
            _ => Level::INFO,
        };

        // CORS settings
        let cors_origins = match lookup("API_CORS_ORIGINS") {
            Some(origins) => {
                let origins: Vec<String> = origins
                    .split(',')
                    .map(|s| s.trim().to_string())
                    .filter(|s| !s.is_empty())
                    .collect();
                for origin in &origins {
                    HeaderValue::from_str(origin)
                        .wrap_err_with(|| format!("Invalid CORS origin {:?}", origin))?;
                }
                Some(origins)
            }
            None => None,
        };

        // Performance settings
        let request_timeout = var("API_REQUEST_TIMEOUT_SECONDS", "30")
            .parse()
            .unwrap_or(30);

        // Slot settings
        let enforce_weekday_match = match lookup("ENFORCE_WEEKDAY_MATCH") {
            Some(raw) => parse_flag(&raw)
                .ok_or_else(|| eyre!("Invalid ENFORCE_WEEKDAY_MATCH value {:?}", raw))?,
            None => false,
        };
        let slot_range_max_days: u32 = var("SLOT_RANGE_MAX_DAYS", &DEFAULT_MAX_RANGE_DAYS.to_string())
            .parse()
            .wrap_err("Invalid SLOT_RANGE_MAX_DAYS value")?;
        if slot_range_max_days == 0 {
            return Err(eyre!("SLOT_RANGE_MAX_DAYS must be at least 1"));
        }

        Ok(Self {
            host,
            port,
            database_url,
            database_max_connections,
            log_level,
            cors_origins,
            request_timeout,
            enforce_weekday_match,
            slot_range_max_days,
        })
    }

    /// Returns the server address as a string, e.g. "127.0.0.1:8080"
    pub fn server_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

/// Parses the boolean spellings accepted in env vars and query strings.
pub fn parse_flag(raw: &str) -> Option<bool> {
    match raw.trim().to_ascii_lowercase().as_str() {
        "true" | "1" | "yes" | "on" => Some(true),
        "false" | "0" | "no" | "off" => Some(false),
        _ => None,
    }
}
