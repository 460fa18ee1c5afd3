//! SQLite backend implementation using sqlx.
//!
//! Provides connection pooling for SQLite. The pool itself is sqlx's; this
//! wrapper only applies the configured knobs and connection options.

use sqlx::pool::PoolConnection;
use sqlx::sqlite::{
    Sqlite, SqliteConnectOptions, SqliteJournalMode, SqlitePool as SqlxPool, SqlitePoolOptions,
    SqliteSynchronous,
};
use std::str::FromStr;
use std::time::Duration;

use crate::storage::StorageError;

/// Default maximum connections in the pool.
pub const DEFAULT_MAX_CONNECTIONS: u32 = 10;

/// Default acquire timeout.
pub const DEFAULT_ACQUIRE_TIMEOUT: Duration = Duration::from_secs(30);

/// Default idle timeout.
pub const DEFAULT_IDLE_TIMEOUT: Duration = Duration::from_secs(10 * 60);

/// Default maximum connection lifetime.
pub const DEFAULT_MAX_LIFETIME: Duration = Duration::from_secs(30 * 60);

/// Pool sizing and timeout knobs.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PoolSettings {
    /// Upper bound on open connections.
    pub max_connections: u32,
    /// Connections kept open even when idle.
    pub min_idle: u32,
    /// How long `acquire` waits before failing.
    pub acquire_timeout: Duration,
    /// Idle connections older than this are closed (`None` = never).
    pub idle_timeout: Option<Duration>,
    /// Connections older than this are closed on release (`None` = never).
    pub max_lifetime: Option<Duration>,
}

impl Default for PoolSettings {
    fn default() -> Self {
        Self {
            max_connections: DEFAULT_MAX_CONNECTIONS,
            min_idle: 0,
            acquire_timeout: DEFAULT_ACQUIRE_TIMEOUT,
            idle_timeout: Some(DEFAULT_IDLE_TIMEOUT),
            max_lifetime: Some(DEFAULT_MAX_LIFETIME),
        }
    }
}

/// Snapshot of pool usage.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PoolStats {
    /// Open connections, idle or in use.
    pub size: u32,
    /// Idle connections.
    pub idle: u32,
}

/// SQLite connection pool wrapper.
///
/// Cloning is cheap; all clones share the same underlying pool.
#[derive(Clone)]
pub struct SqlitePool {
    inner: SqlxPool,
}

impl std::fmt::Debug for SqlitePool {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SqlitePool").finish_non_exhaustive()
    }
}

impl SqlitePool {
    /// Connect to a SQLite database.
    ///
    /// # Arguments
    ///
    /// * `url` - SQLite connection URL, e.g., `sqlite:data/bank.db`
    /// * `settings` - pool sizing and timeouts
    ///
    /// # Configuration
    ///
    /// - WAL journal mode for better concurrency
    /// - Normal synchronous mode for performance with durability
    /// - Create database if not exists
    /// - Foreign key enforcement on
    pub async fn connect(url: &str, settings: &PoolSettings) -> Result<Self, StorageError> {
        if settings.max_connections == 0 {
            return Err(StorageError::ConnectionUnavailable(
                "max_connections must be positive".to_string(),
            ));
        }

        let options = SqliteConnectOptions::from_str(url)?
            .journal_mode(SqliteJournalMode::Wal)
            .synchronous(SqliteSynchronous::Normal)
            .foreign_keys(true)
            .create_if_missing(true);

        let pool = SqlitePoolOptions::new()
            .max_connections(settings.max_connections)
            .min_connections(settings.min_idle.min(settings.max_connections))
            .acquire_timeout(settings.acquire_timeout)
            .idle_timeout(settings.idle_timeout)
            .max_lifetime(settings.max_lifetime)
            .connect_with(options)
            .await?;

        tracing::info!(
            max_connections = settings.max_connections,
            min_idle = settings.min_idle,
            "SQLite pool connected"
        );

        Ok(Self { inner: pool })
    }

    /// Borrow one connection. It returns to the pool when dropped.
    ///
    /// # Errors
    /// Returns [`StorageError::ConnectionUnavailable`] if the acquire timeout
    /// elapses or the pool is closed.
    pub async fn acquire(&self) -> Result<PoolConnection<Sqlite>, StorageError> {
        Ok(self.inner.acquire().await?)
    }

    /// Get the underlying sqlx pool for direct query execution.
    #[inline]
    pub fn inner(&self) -> &SqlxPool {
        &self.inner
    }

    /// Current pool usage.
    pub fn stats(&self) -> PoolStats {
        PoolStats {
            size: self.inner.size(),
            idle: u32::try_from(self.inner.num_idle()).unwrap_or(u32::MAX),
        }
    }

    /// Close the connection pool gracefully.
    pub async fn close(&self) {
        self.inner.close().await;
        tracing::info!("SQLite pool closed");
    }

    /// Check if the pool is closed.
    pub fn is_closed(&self) -> bool {
        self.inner.is_closed()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[tokio::test]
    async fn test_sqlite_pool_connect() {
        let pool = SqlitePool::connect("sqlite::memory:", &PoolSettings::default())
            .await
            .unwrap();
        assert!(!pool.is_closed());

        // Verify we can execute a query
        let row: (i32,) = sqlx::query_as("SELECT 1")
            .fetch_one(pool.inner())
            .await
            .unwrap();
        assert_eq!(row.0, 1);

        pool.close().await;
        assert!(pool.is_closed());
    }

    #[tokio::test]
    async fn test_sqlite_pool_wal_mode() {
        let dir = tempdir().unwrap();
        let url = format!("sqlite:{}", dir.path().join("wal.db").display());
        let pool = SqlitePool::connect(&url, &PoolSettings::default())
            .await
            .unwrap();

        let row: (String,) = sqlx::query_as("PRAGMA journal_mode")
            .fetch_one(pool.inner())
            .await
            .unwrap();
        assert_eq!(row.0, "wal");

        pool.close().await;
    }

    #[tokio::test]
    async fn test_acquire_times_out_when_exhausted() {
        let settings = PoolSettings {
            max_connections: 1,
            acquire_timeout: Duration::from_millis(100),
            ..PoolSettings::default()
        };
        let pool = SqlitePool::connect("sqlite::memory:", &settings)
            .await
            .unwrap();

        let held = pool.acquire().await.unwrap();
        let err = pool.acquire().await.unwrap_err();
        assert!(matches!(err, StorageError::ConnectionUnavailable(_)));

        drop(held);
        assert!(pool.acquire().await.is_ok());
        assert_eq!(pool.stats().size, 1);
    }

    #[tokio::test]
    async fn test_zero_max_connections_rejected() {
        let settings = PoolSettings {
            max_connections: 0,
            ..PoolSettings::default()
        };
        assert!(SqlitePool::connect("sqlite::memory:", &settings).await.is_err());
    }

    #[tokio::test]
    async fn test_acquire_after_close_fails() {
        let pool = SqlitePool::connect("sqlite::memory:", &PoolSettings::default())
            .await
            .unwrap();
        pool.close().await;
        assert!(matches!(
            pool.acquire().await,
            Err(StorageError::ConnectionUnavailable(_))
        ));
    }
}
