//! Runtime settings read from the process environment.

use crate::error::ConfigError;
use crate::store::{PoolSettings, SslMode};
use std::time::Duration;

pub const DEFAULT_PORT: u16 = 4000;
pub const DEFAULT_HOST: &str = "0.0.0.0";

/// Whether 500 responses carry the underlying error chain.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct ErrorExposure {
    pub verbose: bool,
}

impl ErrorExposure {
    /// Verbose errors are only honored outside production.
    pub fn new(debug_errors: bool, production: bool) -> Self {
        ErrorExposure {
            verbose: debug_errors && !production,
        }
    }
}

#[derive(Clone, Debug)]
pub struct Settings {
    /// Empty when neither `DATABASE_URL` nor `DB_URL` is set.
    pub database_url: String,
    pub ssl_mode: SslMode,
    pub pool: PoolSettings,
    pub host: String,
    pub port: u16,
    pub environment: String,
    pub errors: ErrorExposure,
}

impl Settings {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build settings from an arbitrary key lookup. Empty values count as unset.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| lookup(key).map(|v| v.trim().to_string()).filter(|v| !v.is_empty());

        let database_url = get("DATABASE_URL").or_else(|| get("DB_URL")).unwrap_or_default();
        let ssl_mode = match get("DB_SSL") {
            Some(v) => v.parse()?,
            None => SslMode::Required,
        };

        let defaults = PoolSettings::default();
        let max_connections = match get("DB_MAX_CONNECTIONS") {
            Some(v) => match parse_number::<u32>("DB_MAX_CONNECTIONS", &v)? {
                // sqlx panics when the pool is built with no connections.
                0 => return Err(ConfigError::Invalid { key: "DB_MAX_CONNECTIONS", value: v }),
                n => n,
            },
            None => defaults.max_connections,
        };
        let acquire_timeout = match get("DB_ACQUIRE_TIMEOUT_SECS") {
            Some(v) => Duration::from_secs(parse_number::<u64>("DB_ACQUIRE_TIMEOUT_SECS", &v)?),
            None => defaults.acquire_timeout,
        };
        let log_statements = get("DEBUG_SQL").map(|v| is_truthy(&v)).unwrap_or(false);

        let host = get("HOST").unwrap_or_else(|| DEFAULT_HOST.into());
        let port = match get("PORT") {
            Some(v) => parse_number::<u16>("PORT", &v)?,
            None => DEFAULT_PORT,
        };

        let environment = get("APP_ENV")
            .or_else(|| get("NODE_ENV"))
            .unwrap_or_else(|| "development".into())
            .to_lowercase();
        let debug_errors = get("DEBUG_ERRORS").map(|v| is_truthy(&v)).unwrap_or(false);
        let errors = ErrorExposure::new(debug_errors, environment == "production");

        Ok(Settings {
            database_url,
            ssl_mode,
            pool: PoolSettings {
                max_connections,
                acquire_timeout,
                log_statements,
            },
            host,
            port,
            environment,
            errors,
        })
    }

    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

fn parse_number<T: std::str::FromStr>(key: &'static str, value: &str) -> Result<T, ConfigError> {
    value.parse().map_err(|_| ConfigError::Invalid {
        key,
        value: value.to_string(),
    })
}

fn is_truthy(value: &str) -> bool {
    matches!(value.to_lowercase().as_str(), "1" | "true" | "yes" | "on")
}
