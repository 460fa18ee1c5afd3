//! Core data types for the storage layer.
//!
//! - [`Customer`]: one bank customer row in the `customers` table
//! - [`FullName`]: the customer's name, owned by value

use chrono::{DateTime, Utc};
use serde::Serialize;

/// A person's name: first, optional middle, last.
///
/// Has no identity of its own. It is always copied along with its [`Customer`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FullName {
    pub first: String,
    pub middle: Option<String>,
    pub last: String,
}

impl FullName {
    /// Create a name. An empty middle name is stored as `None`.
    pub fn new(first: impl Into<String>, middle: Option<&str>, last: impl Into<String>) -> Self {
        Self {
            first: first.into(),
            middle: middle.filter(|m| !m.is_empty()).map(str::to_string),
            last: last.into(),
        }
    }
}

impl std::fmt::Display for FullName {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match &self.middle {
            Some(middle) => write!(f, "{} {} {}", self.first, middle, self.last),
            None => write!(f, "{} {}", self.first, self.last),
        }
    }
}

/// A customer record stored in the `customers` table.
///
/// `account_no` is the primary key and is supplied by the caller. `email` is
/// unique across customers; the database enforces it.
///
/// **Security:** `password` is stored and read back as plain text. It is
/// never serialized and is redacted in `Debug` output, but it is not hashed.
///
/// # Example
///
/// ```
/// use bankstore::{Customer, FullName};
///
/// let customer = Customer::new(
///     1234567890,
///     FullName::new("John", Some("Michael"), "Doe"),
///     "john.doe@email.com",
///     "Pass@123",
///     9876543210,
/// );
/// assert!(customer.created_at.is_none());
/// ```
#[derive(Clone, PartialEq, Eq, Serialize)]
pub struct Customer {
    /// Account number (primary key).
    pub account_no: i64,
    /// Customer name.
    pub name: FullName,
    /// Unique email address.
    pub email: String,
    /// Plain-text password.
    #[serde(skip_serializing)]
    pub password: String,
    /// Contact phone number.
    pub contact_no: i64,
    /// Insertion time, assigned by the database.
    pub created_at: Option<DateTime<Utc>>,
    /// Last update time, assigned by the database.
    pub updated_at: Option<DateTime<Utc>>,
}

impl Customer {
    /// Create a customer that has not been persisted yet.
    pub fn new(
        account_no: i64,
        name: FullName,
        email: impl Into<String>,
        password: impl Into<String>,
        contact_no: i64,
    ) -> Self {
        Self {
            account_no,
            name,
            email: email.into(),
            password: password.into(),
            contact_no,
            created_at: None,
            updated_at: None,
        }
    }

    /// Copy of this customer with a different contact number.
    pub fn with_contact_no(&self, contact_no: i64) -> Self {
        Self {
            contact_no,
            ..self.clone()
        }
    }
}

impl std::fmt::Debug for Customer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Customer")
            .field("account_no", &self.account_no)
            .field("name", &self.name)
            .field("email", &self.email)
            .field("password", &"<redacted>")
            .field("contact_no", &self.contact_no)
            .field("created_at", &self.created_at)
            .field("updated_at", &self.updated_at)
            .finish()
    }
}
