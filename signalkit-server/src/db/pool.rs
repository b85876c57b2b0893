//! Database connection pool management
//!
//! Wraps a sqlx PgPool with explicit lifecycle: `initialize` at startup,
//! `shutdown` at exit. Connections are handed out as RAII guards, so a
//! failed query still returns its connection when the guard drops.

use std::time::Duration;

use sqlx::pool::PoolConnection;
use sqlx::postgres::{PgConnectOptions, PgPoolOptions};
use sqlx::{PgPool, Postgres};

/// Default minimum connections kept open.
pub const DEFAULT_MIN_CONNECTIONS: u32 = 1;

/// Default maximum connections for the pool.
/// Kept low for a single prototype service.
pub const DEFAULT_MAX_CONNECTIONS: u32 = 5;

/// Default time to wait for a free connection.
pub const DEFAULT_ACQUIRE_TIMEOUT: Duration = Duration::from_secs(30);

/// A checked-out connection. Dropping it returns it to the pool.
pub type PooledConnection = PoolConnection<Postgres>;

/// Pool errors
#[derive(Debug, thiserror::Error)]
pub enum PoolError {
    /// Bad settings or unreachable database at startup
    #[error("pool configuration error: {0}")]
    Configuration(String),

    /// `acquire` after `shutdown`
    #[error("connection pool is closed")]
    Closed,

    /// No connection could be obtained (timeout, network)
    #[error("failed to acquire connection: {0}")]
    Acquire(#[source] sqlx::Error),
}

/// Pool sizing and target
#[derive(Debug, Clone)]
pub struct PoolConfig {
    /// PostgreSQL connection string
    pub database_url: String,
    pub min_connections: u32,
    pub max_connections: u32,
    pub acquire_timeout: Duration,
}

impl PoolConfig {
    pub fn new(database_url: impl Into<String>) -> Self {
        Self {
            database_url: database_url.into(),
            min_connections: DEFAULT_MIN_CONNECTIONS,
            max_connections: DEFAULT_MAX_CONNECTIONS,
            acquire_timeout: DEFAULT_ACQUIRE_TIMEOUT,
        }
    }

    pub fn with_size(mut self, min_connections: u32, max_connections: u32) -> Self {
        self.min_connections = min_connections;
        self.max_connections = max_connections;
        self
    }

    /// Check sizing and parse the connection string.
    fn connect_options(&self) -> Result<PgConnectOptions, PoolError> {
        if self.database_url.trim().is_empty() {
            return Err(PoolError::Configuration("database url is empty".into()));
        }
        if self.max_connections == 0 {
            return Err(PoolError::Configuration(
                "max_connections must be at least 1".into(),
            ));
        }
        if self.min_connections > self.max_connections {
            return Err(PoolError::Configuration(format!(
                "min_connections ({}) exceeds max_connections ({})",
                self.min_connections, self.max_connections
            )));
        }

        self.database_url
            .parse::<PgConnectOptions>()
            .map_err(|e| PoolError::Configuration(format!("invalid database url: {e}")))
    }

    fn pool_options(&self) -> PgPoolOptions {
        PgPoolOptions::new()
            .min_connections(self.min_connections)
            .max_connections(self.max_connections)
            .acquire_timeout(self.acquire_timeout)
    }
}

/// Bounded pool of Postgres connections.
///
/// Cloning is cheap and every clone shares the same connections.
#[derive(Debug, Clone)]
pub struct SignalPool {
    inner: PgPool,
}

impl SignalPool {
    /// Open the pool with `min_connections` live connections.
    ///
    /// # Errors
    ///
    /// Returns `PoolError::Configuration` for invalid settings or when any of
    /// the minimum connections cannot be established.
    ///
    /// # Example
    ///
    /// ```ignore
    /// let pool = SignalPool::initialize(&PoolConfig::new("postgres://localhost/signals")).await?;
    /// ```
    pub async fn initialize(config: &PoolConfig) -> Result<Self, PoolError> {
        let options = config.connect_options()?;

        let inner = config
            .pool_options()
            .connect_with(options)
            .await
            .map_err(|e| PoolError::Configuration(format!("cannot reach database: {e}")))?;

        // Hold every guard until the last one opens so each is a distinct connection
        let mut warm = Vec::with_capacity(config.min_connections as usize);
        for _ in 0..config.min_connections {
            match inner.acquire().await {
                Ok(conn) => warm.push(conn),
                Err(e) => {
                    drop(warm);
                    inner.close().await;
                    return Err(PoolError::Configuration(format!(
                        "cannot open {} connections: {e}",
                        config.min_connections
                    )));
                }
            }
        }
        drop(warm);

        tracing::info!(
            min = config.min_connections,
            max = config.max_connections,
            "database pool initialized"
        );

        Ok(Self { inner })
    }

    /// Build the pool without connecting. Connections open on first acquire.
    pub fn connect_lazy(config: &PoolConfig) -> Result<Self, PoolError> {
        let options = config.connect_options()?;
        let inner = config.pool_options().connect_lazy_with(options);
        Ok(Self { inner })
    }

    /// Check out a connection, waiting until one is free.
    ///
    /// # Errors
    ///
    /// `PoolError::Closed` once `shutdown` has been called,
    /// `PoolError::Acquire` on timeout or connection failure.
    pub async fn acquire(&self) -> Result<PooledConnection, PoolError> {
        if self.inner.is_closed() {
            return Err(PoolError::Closed);
        }

        self.inner.acquire().await.map_err(|e| match e {
            sqlx::Error::PoolClosed => PoolError::Closed,
            other => PoolError::Acquire(other),
        })
    }

    /// Return a connection to the pool for reuse.
    ///
    /// Equivalent to dropping the guard; the connection stays open.
    pub fn release(&self, conn: PooledConnection) {
        drop(conn);
    }

    /// Connections currently checked out.
    pub fn checked_out(&self) -> u32 {
        let idle = u32::try_from(self.inner.num_idle()).unwrap_or(u32::MAX);
        self.inner.size().saturating_sub(idle)
    }

    /// Upper bound on concurrently open connections.
    pub fn max_size(&self) -> u32 {
        self.inner.options().get_max_connections()
    }

    pub fn is_closed(&self) -> bool {
        self.inner.is_closed()
    }

    /// Close every connection. Waits for checked-out connections to come back.
    pub async fn shutdown(&self) {
        tracing::info!(open = self.inner.size(), "closing database pool");
        self.inner.close().await;
    }
}
