//! Named statement templates.
//!
//! The store issues exactly five statements. Their text is configurable, but
//! each one is checked once at construction time: the number of positional
//! `?` placeholders must equal the number of values the store binds for it.

use strum::IntoEnumIterator;
use strum_macros::{AsRefStr, Display, EnumIter, EnumString};

use crate::storage::StorageError;

/// Default insert: seven parameters in binder order.
pub const DEFAULT_INSERT: &str = "INSERT INTO customers \
    (account_no, first_name, middle_name, last_name, email, password, contact_no) \
    VALUES (?, ?, ?, ?, ?, ?, ?)";

/// Default select-all.
pub const DEFAULT_SELECT_ALL: &str = "SELECT account_no, first_name, middle_name, last_name, \
    email, password, contact_no, created_at, updated_at FROM customers";

/// Default select-by-id.
pub const DEFAULT_SELECT_BY_ID: &str = "SELECT account_no, first_name, middle_name, last_name, \
    email, password, contact_no, created_at, updated_at FROM customers WHERE account_no = ?";

/// Default contact update: contact number first, then account number.
pub const DEFAULT_UPDATE_CONTACT: &str =
    "UPDATE customers SET contact_no = ? WHERE account_no = ?";

/// Default delete-by-id.
pub const DEFAULT_DELETE_BY_ID: &str = "DELETE FROM customers WHERE account_no = ?";

/// The five statements the store knows how to bind.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, EnumString, Display, AsRefStr, EnumIter)]
#[strum(serialize_all = "snake_case")]
pub enum StatementKind {
    Insert,
    SelectAll,
    SelectById,
    UpdateContact,
    DeleteById,
}

impl StatementKind {
    /// Number of positional parameters the store binds for this statement.
    pub fn arity(self) -> usize {
        match self {
            Self::Insert => 7,
            Self::SelectAll => 0,
            Self::SelectById => 1,
            Self::UpdateContact => 2,
            Self::DeleteById => 1,
        }
    }
}

/// Validated statement templates. Immutable once built.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Statements {
    insert: String,
    select_all: String,
    select_by_id: String,
    update_contact: String,
    delete_by_id: String,
}

impl Statements {
    /// Build a statement table, checking every template's placeholder count.
    ///
    /// # Errors
    /// Returns [`StorageError::InvalidStatement`] for the first template whose
    /// placeholder count differs from [`StatementKind::arity`].
    pub fn new(
        insert: impl Into<String>,
        select_all: impl Into<String>,
        select_by_id: impl Into<String>,
        update_contact: impl Into<String>,
        delete_by_id: impl Into<String>,
    ) -> Result<Self, StorageError> {
        let statements = Self {
            insert: insert.into(),
            select_all: select_all.into(),
            select_by_id: select_by_id.into(),
            update_contact: update_contact.into(),
            delete_by_id: delete_by_id.into(),
        };

        for kind in StatementKind::iter() {
            let found = count_placeholders(statements.get(kind));
            if found != kind.arity() {
                return Err(StorageError::InvalidStatement {
                    kind,
                    expected: kind.arity(),
                    found,
                });
            }
        }

        Ok(statements)
    }

    /// Template text for a statement.
    pub fn get(&self, kind: StatementKind) -> &str {
        match kind {
            StatementKind::Insert => &self.insert,
            StatementKind::SelectAll => &self.select_all,
            StatementKind::SelectById => &self.select_by_id,
            StatementKind::UpdateContact => &self.update_contact,
            StatementKind::DeleteById => &self.delete_by_id,
        }
    }
}

impl Default for Statements {
    fn default() -> Self {
        Self {
            insert: DEFAULT_INSERT.to_string(),
            select_all: DEFAULT_SELECT_ALL.to_string(),
            select_by_id: DEFAULT_SELECT_BY_ID.to_string(),
            update_contact: DEFAULT_UPDATE_CONTACT.to_string(),
            delete_by_id: DEFAULT_DELETE_BY_ID.to_string(),
        }
    }
}

/// Count `?` placeholders outside quoted literals and identifiers.
fn count_placeholders(sql: &str) -> usize {
    let mut count = 0;
    let mut quote: Option<char> = None;

    for c in sql.chars() {
        match (quote, c) {
            (Some(q), c) if c == q => quote = None,
            (Some(_), _) => {}
            (None, '\'' | '"' | '`') => quote = Some(c),
            (None, '?') => count += 1,
            (None, _) => {}
        }
    }

    count
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_statements_are_valid() {
        let defaults = Statements::default();
        let rebuilt = Statements::new(
            DEFAULT_INSERT,
            DEFAULT_SELECT_ALL,
            DEFAULT_SELECT_BY_ID,
            DEFAULT_UPDATE_CONTACT,
            DEFAULT_DELETE_BY_ID,
        )
        .unwrap();
        assert_eq!(defaults, rebuilt);
    }

    #[test]
    fn test_arity_mismatch_is_rejected() {
        let err = Statements::new(
            "INSERT INTO customers VALUES (?, ?, ?, ?, ?, ?)",
            DEFAULT_SELECT_ALL,
            DEFAULT_SELECT_BY_ID,
            DEFAULT_UPDATE_CONTACT,
            DEFAULT_DELETE_BY_ID,
        )
        .unwrap_err();

        match err {
            StorageError::InvalidStatement {
                kind,
                expected,
                found,
            } => {
                assert_eq!(kind, StatementKind::Insert);
                assert_eq!(expected, 7);
                assert_eq!(found, 6);
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_update_parameter_count() {
        let err = Statements::new(
            DEFAULT_INSERT,
            DEFAULT_SELECT_ALL,
            DEFAULT_SELECT_BY_ID,
            "UPDATE customers SET contact_no = ?",
            DEFAULT_DELETE_BY_ID,
        )
        .unwrap_err();
        assert!(matches!(
            err,
            StorageError::InvalidStatement {
                kind: StatementKind::UpdateContact,
                expected: 2,
                found: 1,
            }
        ));
    }

    #[test]
    fn test_quoted_question_marks_are_ignored() {
        assert_eq!(count_placeholders("SELECT '?' FROM t WHERE a = ?"), 1);
        assert_eq!(count_placeholders(r#"SELECT "a?b" FROM t"#), 0);
        assert_eq!(count_placeholders("SELECT 1"), 0);
    }

    #[test]
    fn test_statement_kind_names() {
        use std::str::FromStr;

        assert_eq!(StatementKind::SelectById.to_string(), "select_by_id");
        assert_eq!(
            StatementKind::from_str("update_contact").unwrap(),
            StatementKind::UpdateContact
        );
        assert_eq!(StatementKind::Insert.arity(), 7);
        assert_eq!(StatementKind::SelectAll.arity(), 0);
    }
}
