//! Row codec: maps `customers` rows to [`Customer`] values and back.
//!
//! Decoding reads columns by name, so statements may list columns in any
//! order. Encoding produces the insert parameters in the fixed binder order:
//! account_no, first_name, middle_name, last_name, email, password, contact_no.

use chrono::{DateTime, Utc};
use sqlx::query::Query;
use sqlx::sqlite::{Sqlite, SqliteArguments, SqliteRow};
use sqlx::{Decode, Row, Type};

use crate::storage::StorageError;
use crate::storage::types::{Customer, FullName};

/// Column width for name parts.
pub const NAME_MAX_LEN: usize = 50;

/// Column width for email and password.
pub const TEXT_MAX_LEN: usize = 100;

/// A single positional statement parameter.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BindValue {
    Integer(i64),
    Text(String),
    Null,
}

/// Decode one row into a customer.
///
/// # Errors
/// Returns [`StorageError::Decode`] if a column is missing, has the wrong
/// type, or is NULL where the schema forbids it.
pub fn decode(row: &SqliteRow) -> Result<Customer, StorageError> {
    let middle: Option<String> = row.try_get("middle_name")?;

    Ok(Customer {
        account_no: required(row, "account_no")?,
        name: FullName::new(
            required::<String>(row, "first_name")?,
            middle.as_deref(),
            required::<String>(row, "last_name")?,
        ),
        email: required(row, "email")?,
        password: required(row, "password")?,
        contact_no: required(row, "contact_no")?,
        created_at: Some(required::<DateTime<Utc>>(row, "created_at")?),
        updated_at: Some(required::<DateTime<Utc>>(row, "updated_at")?),
    })
}

fn required<'r, T>(row: &'r SqliteRow, column: &str) -> Result<T, StorageError>
where
    T: Decode<'r, Sqlite> + Type<Sqlite>,
{
    row.try_get::<Option<T>, _>(column)?
        .ok_or_else(|| StorageError::Decode(format!("column '{column}' is null")))
}

/// Encode a customer into the seven insert parameters.
///
/// Pure: validates everything first and either returns the full list or
/// fails without side effects.
///
/// # Errors
/// Returns [`StorageError::Validation`] if a required field is blank or a
/// value exceeds its column width.
pub fn encode_for_insert(customer: &Customer) -> Result<Vec<BindValue>, StorageError> {
    let name = &customer.name;
    check_text("first_name", &name.first, NAME_MAX_LEN)?;
    check_text("last_name", &name.last, NAME_MAX_LEN)?;
    check_text("email", &customer.email, TEXT_MAX_LEN)?;
    check_text("password", &customer.password, TEXT_MAX_LEN)?;

    let middle = match name.middle.as_deref() {
        Some(m) if !m.is_empty() => {
            check_len("middle_name", m, NAME_MAX_LEN)?;
            BindValue::Text(m.to_string())
        }
        _ => BindValue::Null,
    };

    Ok(vec![
        BindValue::Integer(customer.account_no),
        BindValue::Text(name.first.clone()),
        middle,
        BindValue::Text(name.last.clone()),
        BindValue::Text(customer.email.clone()),
        BindValue::Text(customer.password.clone()),
        BindValue::Integer(customer.contact_no),
    ])
}

fn check_text(field: &str, value: &str, max: usize) -> Result<(), StorageError> {
    if value.trim().is_empty() {
        return Err(StorageError::Validation(format!("{field} must not be blank")));
    }
    check_len(field, value, max)
}

fn check_len(field: &str, value: &str, max: usize) -> Result<(), StorageError> {
    let len = value.chars().count();
    if len > max {
        return Err(StorageError::Validation(format!(
            "{field} is {len} characters, maximum is {max}"
        )));
    }
    Ok(())
}

/// Bind parameters to a query in order.
pub(crate) fn bind_values<'q>(
    mut query: Query<'q, Sqlite, SqliteArguments<'q>>,
    values: Vec<BindValue>,
) -> Query<'q, Sqlite, SqliteArguments<'q>> {
    for value in values {
        query = match value {
            BindValue::Integer(v) => query.bind(v),
            BindValue::Text(v) => query.bind(v),
            BindValue::Null => query.bind(None::<String>),
        };
    }
    query
}
