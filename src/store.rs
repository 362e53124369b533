//! Connection manager: the shared PostgreSQL pool, its liveness check, table sync, and shutdown.

use crate::error::{ConfigError, StoreError};
use sqlx::postgres::{PgConnectOptions, PgPoolOptions, PgSslMode};
use sqlx::{ConnectOptions, PgPool};
use std::str::FromStr;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::Duration;

pub const SUPPLIERS_TABLE: &str = "suppliers";

/// TLS policy for the store connection.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SslMode {
    /// Encrypt, but accept any server certificate (managed hosts commonly use self-signed certs).
    Required,
    Disabled,
}

impl FromStr for SslMode {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "true" | "1" | "on" | "require" | "required" => Ok(SslMode::Required),
            "false" | "0" | "off" | "disable" | "disabled" => Ok(SslMode::Disabled),
            _ => Err(ConfigError::Invalid {
                key: "DB_SSL",
                value: s.to_string(),
            }),
        }
    }
}

impl From<SslMode> for PgSslMode {
    fn from(mode: SslMode) -> Self {
        match mode {
            // `require` negotiates TLS without chain or hostname verification.
            SslMode::Required => PgSslMode::Require,
            SslMode::Disabled => PgSslMode::Disable,
        }
    }
}

#[derive(Clone, Debug)]
pub struct PoolSettings {
    pub max_connections: u32,
    pub acquire_timeout: Duration,
    /// Log every SQL statement at debug level.
    pub log_statements: bool,
}

impl Default for PoolSettings {
    fn default() -> Self {
        PoolSettings {
            max_connections: 5,
            acquire_timeout: Duration::from_secs(10),
            log_statements: false,
        }
    }
}

/// Owns the process-wide pool. Clones share the same pool and the same close flag.
#[derive(Clone, Debug)]
pub struct Database {
    pool: PgPool,
    closed: Arc<AtomicBool>,
}

impl Database {
    pub fn configure(connection_string: &str, ssl_mode: SslMode) -> Result<Self, StoreError> {
        Self::configure_with(connection_string, ssl_mode, &PoolSettings::default())
    }

    /// Build the pool without connecting. A missing connection string is only warned about;
    /// the failure surfaces on first use. `ssl_mode` overrides any `sslmode` in the string.
    pub fn configure_with(
        connection_string: &str,
        ssl_mode: SslMode,
        settings: &PoolSettings,
    ) -> Result<Self, StoreError> {
        let options = if connection_string.trim().is_empty() {
            tracing::warn!(
                "no database connection string found; set DATABASE_URL (or DB_URL). Queries will fail until it is provided"
            );
            PgConnectOptions::new()
        } else {
            PgConnectOptions::from_str(connection_string).map_err(StoreError::Configuration)?
        };
        let mut options = options.ssl_mode(ssl_mode.into());
        if !settings.log_statements {
            options = options.disable_statement_logging();
        }
        let pool = PgPoolOptions::new()
            .max_connections(settings.max_connections)
            .acquire_timeout(settings.acquire_timeout)
            .connect_lazy_with(options);
        Ok(Database {
            pool,
            closed: Arc::new(AtomicBool::new(false)),
        })
    }

    pub fn pool(&self) -> &PgPool {
        &self.pool
    }

    pub fn is_closed(&self) -> bool {
        self.closed.load(Ordering::Acquire) || self.pool.is_closed()
    }

    /// Round-trip `SELECT 1` to confirm the store is reachable and accepts our credentials.
    pub async fn authenticate(&self) -> Result<(), StoreError> {
        if self.is_closed() {
            return Err(StoreError::Closed);
        }
        sqlx::query("SELECT 1")
            .execute(&self.pool)
            .await
            .map_err(StoreError::from_round_trip)?;
        Ok(())
    }

    /// Create the suppliers table if it does not exist. Existing rows are left untouched.
    pub async fn sync(&self) -> Result<(), StoreError> {
        if self.is_closed() {
            return Err(StoreError::Closed);
        }
        let ddl = format!(
            r#"
            CREATE TABLE IF NOT EXISTS {} (
                id SERIAL PRIMARY KEY,
                name VARCHAR(100) NOT NULL CHECK (char_length(name) > 0)
            )
            "#,
            SUPPLIERS_TABLE
        );
        tracing::debug!(sql = %ddl, "sync");
        sqlx::query(&ddl).execute(&self.pool).await.map_err(|e| match e {
            sqlx::Error::PoolClosed => StoreError::Closed,
            sqlx::Error::Database(_) => StoreError::Sync(e),
            other => StoreError::Connection(other),
        })?;
        Ok(())
    }

    /// Close every pooled connection, waiting for checked-out ones to come back.
    /// Only the first call succeeds, including when several race.
    pub async fn close(&self) -> Result<(), StoreError> {
        if self.closed.swap(true, Ordering::AcqRel) {
            return Err(StoreError::Closed);
        }
        self.pool.close().await;
        Ok(())
    }
}
