//! Storage Layer
//!
//! Customer persistence over a pooled SQLite connection:
//! - **Pool**: sqlx connection pool behind the [`SqlitePool`] facade
//! - **Codec**: row to [`Customer`] mapping and insert parameter encoding
//! - **Store**: five CRUD operations driven by validated [`Statements`]
//!
//! # Components
//!
//! - [`CustomerRepository`] / [`CustomerStore`]: CRUD operations
//! - [`Statements`]: named statement templates, checked for arity
//! - [`StorageBuilder`] / [`StorageHandles`]: initialization and lifecycle

mod builder;
pub mod codec;
pub mod customer_store;
pub mod db;
mod error;
pub mod schema;
pub mod statements;
mod types;

pub use builder::{StorageBuilder, StorageHandles};
pub use codec::BindValue;
pub use customer_store::{CustomerRepository, CustomerStore};
pub use db::{PoolSettings, PoolStats, SqlitePool};
pub use error::StorageError;
pub use statements::{StatementKind, Statements};
pub use types::{Customer, FullName};
