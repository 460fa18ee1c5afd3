//! Database backend layer.
//!
//! Currently supports SQLite through sqlx. The store depends only on the
//! [`SqlitePool`] facade, never on the driver's pool type directly.
//!
//! # Example
//!
//! ```ignore
//! let pool = SqlitePool::connect("sqlite:data/bank.db", &PoolSettings::default()).await?;
//! let mut conn = pool.acquire().await?;
//! sqlx::query("SELECT 1").fetch_one(&mut *conn).await?;
//! ```

mod sqlite;

pub use sqlite::{
    DEFAULT_ACQUIRE_TIMEOUT, DEFAULT_IDLE_TIMEOUT, DEFAULT_MAX_CONNECTIONS, DEFAULT_MAX_LIFETIME,
    PoolSettings, PoolStats, SqlitePool,
};
