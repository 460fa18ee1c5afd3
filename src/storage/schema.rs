//! Database schema definitions.

use crate::storage::StorageError;
use crate::storage::db::SqlitePool;

/// SQL statement for creating the customers table.
///
/// SQLite does not enforce `VARCHAR(n)`, so column widths are CHECK constraints.
pub const CUSTOMERS_TABLE_DDL: &str = r#"
CREATE TABLE IF NOT EXISTS customers (
    account_no  INTEGER PRIMARY KEY,
    first_name  VARCHAR(50)  NOT NULL CHECK (length(first_name) <= 50),
    middle_name VARCHAR(50)           CHECK (length(middle_name) <= 50),
    last_name   VARCHAR(50)  NOT NULL CHECK (length(last_name) <= 50),
    email       VARCHAR(100) NOT NULL UNIQUE CHECK (length(email) <= 100),
    password    VARCHAR(100) NOT NULL CHECK (length(password) <= 100),
    contact_no  BIGINT       NOT NULL,
    created_at  TIMESTAMP    NOT NULL DEFAULT CURRENT_TIMESTAMP,
    updated_at  TIMESTAMP    NOT NULL DEFAULT CURRENT_TIMESTAMP
);
"#;

/// Trigger refreshing `updated_at` on every update that does not set it.
pub const CUSTOMERS_UPDATED_AT_TRIGGER_DDL: &str = r#"
CREATE TRIGGER IF NOT EXISTS customers_touch_updated_at
AFTER UPDATE ON customers
FOR EACH ROW WHEN NEW.updated_at = OLD.updated_at
BEGIN
    UPDATE customers SET updated_at = CURRENT_TIMESTAMP WHERE account_no = NEW.account_no;
END;
"#;

/// Initialize the database schema.
///
/// Creates the table and trigger if they don't exist.
pub async fn init_schema(pool: &SqlitePool) -> Result<(), StorageError> {
    let mut conn = pool.acquire().await?;
    sqlx::query(CUSTOMERS_TABLE_DDL).execute(&mut *conn).await?;
    sqlx::query(CUSTOMERS_UPDATED_AT_TRIGGER_DDL)
        .execute(&mut *conn)
        .await?;

    tracing::info!("Database schema initialized");
    Ok(())
}
