//! Customer storage.
//!
//! Provides the five CRUD operations over the `customers` table. Every
//! operation borrows exactly one pooled connection and holds it in a local,
//! so the connection goes back to the pool on every exit path.

use std::sync::Arc;

use async_trait::async_trait;

use crate::storage::StorageError;
use crate::storage::codec::{self, BindValue};
use crate::storage::db::SqlitePool;
use crate::storage::statements::{StatementKind, Statements};
use crate::storage::types::Customer;

// =============================================================================
// Repository trait
// =============================================================================

/// CRUD operations on customers.
#[async_trait]
pub trait CustomerRepository: Send + Sync {
    /// Insert a new customer.
    ///
    /// Returns `true` iff exactly one row was inserted. Fails with
    /// [`StorageError::ConstraintViolation`] if the account number or email
    /// is already taken.
    async fn create(&self, customer: &Customer) -> Result<bool, StorageError>;

    /// Fetch one customer.
    ///
    /// Fails with [`StorageError::NotFound`] if no row matches and
    /// [`StorageError::AmbiguousResult`] if several do.
    async fn get_by_id(&self, account_no: i64) -> Result<Customer, StorageError>;

    /// Fetch every customer in storage order. Empty when there are none.
    async fn get_all(&self) -> Result<Vec<Customer>, StorageError>;

    /// Persist the customer's contact number. All other fields are ignored.
    ///
    /// Returns `false` if the account does not exist.
    async fn update(&self, customer: &Customer) -> Result<bool, StorageError>;

    /// Delete a customer. Returns `false` if the account does not exist.
    async fn delete(&self, account_no: i64) -> Result<bool, StorageError>;
}

// =============================================================================
// Customer Store
// =============================================================================

/// SQL-backed customer repository.
#[derive(Debug, Clone)]
pub struct CustomerStore {
    pool: SqlitePool,
    statements: Arc<Statements>,
}

impl CustomerStore {
    /// Create a new customer store.
    pub fn new(pool: SqlitePool, statements: Arc<Statements>) -> Self {
        Self { pool, statements }
    }

    /// Set a customer's contact number.
    ///
    /// Returns `true` iff exactly one row was updated.
    pub async fn update_contact_no(
        &self,
        account_no: i64,
        contact_no: i64,
    ) -> Result<bool, StorageError> {
        let rows = self
            .execute(
                StatementKind::UpdateContact,
                vec![BindValue::Integer(contact_no), BindValue::Integer(account_no)],
            )
            .await?;

        tracing::debug!(account_no, rows, "Updated customer contact number");
        Ok(rows == 1)
    }

    async fn execute(
        &self,
        kind: StatementKind,
        params: Vec<BindValue>,
    ) -> Result<u64, StorageError> {
        let mut conn = self.pool.acquire().await?;
        let query = codec::bind_values(sqlx::query(self.statements.get(kind)), params);
        let result = query.execute(&mut *conn).await?;
        Ok(result.rows_affected())
    }
}

#[async_trait]
impl CustomerRepository for CustomerStore {
    async fn create(&self, customer: &Customer) -> Result<bool, StorageError> {
        // Validate before touching the pool.
        let params = codec::encode_for_insert(customer)?;
        let rows = self.execute(StatementKind::Insert, params).await?;

        tracing::debug!(account_no = customer.account_no, rows, "Inserted customer");
        Ok(rows == 1)
    }

    async fn get_by_id(&self, account_no: i64) -> Result<Customer, StorageError> {
        let mut conn = self.pool.acquire().await?;
        let rows = sqlx::query(self.statements.get(StatementKind::SelectById))
            .bind(account_no)
            .fetch_all(&mut *conn)
            .await?;

        match rows.as_slice() {
            [] => Err(StorageError::NotFound { account_no }),
            [row] => codec::decode(row),
            _ => {
                tracing::warn!(account_no, rows = rows.len(), "Primary key matched several rows");
                Err(StorageError::AmbiguousResult {
                    account_no,
                    rows: rows.len(),
                })
            }
        }
    }

    async fn get_all(&self) -> Result<Vec<Customer>, StorageError> {
        let mut conn = self.pool.acquire().await?;
        let rows = sqlx::query(self.statements.get(StatementKind::SelectAll))
            .fetch_all(&mut *conn)
            .await?;

        rows.iter().map(codec::decode).collect()
    }

    async fn update(&self, customer: &Customer) -> Result<bool, StorageError> {
        self.update_contact_no(customer.account_no, customer.contact_no)
            .await
    }

    async fn delete(&self, account_no: i64) -> Result<bool, StorageError> {
        let rows = self
            .execute(StatementKind::DeleteById, vec![BindValue::Integer(account_no)])
            .await?;

        tracing::debug!(account_no, rows, "Deleted customer");
        Ok(rows == 1)
    }
}
