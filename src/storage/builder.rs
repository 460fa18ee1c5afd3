//! Storage builder and handles.
//!
//! Provides a builder pattern for constructing the storage layer
//! and a handles struct for accessing the pool and the customer store.

use std::sync::Arc;

use crate::storage::StorageError;
use crate::storage::customer_store::CustomerStore;
use crate::storage::db::{PoolSettings, PoolStats, SqlitePool};
use crate::storage::schema::init_schema;
use crate::storage::statements::Statements;

/// Builder for constructing the storage layer.
pub struct StorageBuilder {
    db_url: String,
    pool_settings: PoolSettings,
    statements: Statements,
    init_schema: bool,
}

impl StorageBuilder {
    /// Create a new storage builder.
    ///
    /// Defaults: 10 pooled connections, built-in statements, schema created
    /// on build.
    pub fn new(db_url: impl Into<String>) -> Self {
        Self {
            db_url: db_url.into(),
            pool_settings: PoolSettings::default(),
            statements: Statements::default(),
            init_schema: true,
        }
    }

    /// Set all pool knobs at once.
    pub fn pool_settings(mut self, settings: PoolSettings) -> Self {
        self.pool_settings = settings;
        self
    }

    /// Set the maximum number of pooled connections.
    pub fn max_connections(mut self, size: u32) -> Self {
        self.pool_settings.max_connections = size;
        self
    }

    /// Replace the statement templates.
    pub fn statements(mut self, statements: Statements) -> Self {
        self.statements = statements;
        self
    }

    /// Whether to create the schema during [`build`](Self::build).
    pub fn init_schema(mut self, enabled: bool) -> Self {
        self.init_schema = enabled;
        self
    }

    /// Connect the pool, optionally create the schema, and return handles.
    pub async fn build(self) -> Result<StorageHandles, StorageError> {
        let pool = SqlitePool::connect(&self.db_url, &self.pool_settings).await?;

        if self.init_schema {
            init_schema(&pool).await?;
        }

        let customer_store = CustomerStore::new(pool.clone(), Arc::new(self.statements));

        Ok(StorageHandles {
            pool,
            customer_store,
        })
    }
}

/// Handles to the storage layer.
#[derive(Debug, Clone)]
pub struct StorageHandles {
    /// Customer CRUD facade.
    pub customer_store: CustomerStore,
    /// Shared connection pool.
    pub pool: SqlitePool,
}

impl StorageHandles {
    /// Current pool usage.
    pub fn pool_stats(&self) -> PoolStats {
        self.pool.stats()
    }

    /// Create the schema if it does not exist yet.
    pub async fn init_schema(&self) -> Result<(), StorageError> {
        init_schema(&self.pool).await
    }

    /// Close the pool. Waits for borrowed connections to be returned.
    pub async fn shutdown(self) {
        self.pool.close().await;
    }
}
