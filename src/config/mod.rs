//! Configuration module for Bankstore.
//!
//! Provides YAML-based configuration loading and validation for:
//! - Database settings (URL, pool size, timeouts)
//! - Statement templates for the five customer operations

mod app;
mod validation;

pub use app::{AppConfig, DEFAULT_DATABASE_URL, DatabaseConfig, StatementsConfig};
pub use validation::{ConfigError, expand_env_vars, parse_duration};
