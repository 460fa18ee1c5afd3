//! Bankstore - Customer Record Store
//!
//! This crate stores bank customers in a single relational table through a
//! pooled SQLite connection. It can be used as a library, or run as the
//! `bankstore` command-line tool.
//!
//! # Architecture
//!
//! - **Storage**: pool facade, row codec, statement templates and the CRUD store
//! - **Config**: YAML configuration for the pool and statement templates
//! - **Demo**: random customer generation for trying the store out
//!
//! # Example
//!
//! ```rust,no_run
//! use bankstore::{Customer, CustomerRepository, FullName, StorageBuilder};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), bankstore::StorageError> {
//!     let handles = StorageBuilder::new("sqlite:data/bank.db").build().await?;
//!     let store = &handles.customer_store;
//!
//!     let customer = Customer::new(
//!         1234567890,
//!         FullName::new("John", Some("Michael"), "Doe"),
//!         "john.doe@email.com",
//!         "Pass@123",
//!         9876543210,
//!     );
//!     store.create(&customer).await?;
//!     store.update(&customer.with_contact_no(1111111111)).await?;
//!     let fetched = store.get_by_id(1234567890).await?;
//!     assert_eq!(fetched.contact_no, 1111111111);
//!
//!     handles.shutdown().await;
//!     Ok(())
//! }
//! ```

pub mod config;
pub mod demo;
pub mod storage;

pub use storage::{
    Customer, CustomerRepository, CustomerStore, FullName, PoolSettings, StatementKind,
    Statements, StorageBuilder, StorageError, StorageHandles,
};
