//! Application configuration structures.

use std::path::Path;
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::storage::db::{
    DEFAULT_ACQUIRE_TIMEOUT, DEFAULT_IDLE_TIMEOUT, DEFAULT_MAX_CONNECTIONS, DEFAULT_MAX_LIFETIME,
    PoolSettings,
};
use crate::storage::statements::{
    DEFAULT_DELETE_BY_ID, DEFAULT_INSERT, DEFAULT_SELECT_ALL, DEFAULT_SELECT_BY_ID,
    DEFAULT_UPDATE_CONTACT,
};
use crate::storage::{StorageError, Statements};

use super::validation::{ConfigError, expand_env_vars};

// =============================================================================
// Constants
// =============================================================================

/// Default database URL.
pub const DEFAULT_DATABASE_URL: &str = "sqlite:data/bank.db";

// =============================================================================
// Database Configuration
// =============================================================================

/// Database and pool configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct DatabaseConfig {
    /// Connection URL. `${VAR}` and `${VAR:-default}` are expanded.
    pub url: String,

    /// Maximum pooled connections (default: 10).
    pub max_connections: u32,

    /// Connections kept open while idle (default: 0).
    pub min_idle: u32,

    /// How long to wait for a free connection (default: "30s").
    #[serde(with = "humantime_serde")]
    pub acquire_timeout: Duration,

    /// Close connections idle for this long (default: "10m").
    #[serde(with = "humantime_serde")]
    pub idle_timeout: Option<Duration>,

    /// Close connections older than this (default: "30m").
    #[serde(with = "humantime_serde")]
    pub max_lifetime: Option<Duration>,

    /// Create the customers table on startup (default: true).
    pub init_schema: bool,
}

impl Default for DatabaseConfig {
    fn default() -> Self {
        Self {
            url: DEFAULT_DATABASE_URL.to_string(),
            max_connections: DEFAULT_MAX_CONNECTIONS,
            min_idle: 0,
            acquire_timeout: DEFAULT_ACQUIRE_TIMEOUT,
            idle_timeout: Some(DEFAULT_IDLE_TIMEOUT),
            max_lifetime: Some(DEFAULT_MAX_LIFETIME),
            init_schema: true,
        }
    }
}

impl DatabaseConfig {
    /// Connection URL with environment variables expanded.
    pub fn connection_url(&self) -> String {
        expand_env_vars(&self.url)
    }

    /// Pool knobs for [`crate::storage::SqlitePool::connect`].
    pub fn pool_settings(&self) -> PoolSettings {
        PoolSettings {
            max_connections: self.max_connections,
            min_idle: self.min_idle,
            acquire_timeout: self.acquire_timeout,
            idle_timeout: self.idle_timeout,
            max_lifetime: self.max_lifetime,
        }
    }
}

// =============================================================================
// Statement Configuration
// =============================================================================

/// Statement templates. Any template left out uses the built-in default.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct StatementsConfig {
    pub insert: String,
    pub select_all: String,
    pub select_by_id: String,
    pub update_contact: String,
    pub delete_by_id: String,
}

impl Default for StatementsConfig {
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

impl StatementsConfig {
    /// Build the validated statement table.
    pub fn to_statements(&self) -> Result<Statements, StorageError> {
        Statements::new(
            self.insert.as_str(),
            self.select_all.as_str(),
            self.select_by_id.as_str(),
            self.update_contact.as_str(),
            self.delete_by_id.as_str(),
        )
    }
}

// =============================================================================
// Application Configuration
// =============================================================================

/// Top-level application configuration.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AppConfig {
    /// Database configuration.
    #[serde(default)]
    pub database: DatabaseConfig,

    /// Statement templates.
    #[serde(default)]
    pub statements: StatementsConfig,
}

impl AppConfig {
    /// Load configuration from a YAML file.
    ///
    /// # Errors
    /// Returns `ConfigError` if the file cannot be read, parsed, or validated.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_yaml(&content)
    }

    /// Parse and validate configuration from a YAML string.
    pub fn from_yaml(content: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_yaml::from_str(content)?;
        config.validate()?;
        Ok(config)
    }

    /// Validate configuration values.
    ///
    /// # Errors
    /// Returns `ConfigError::ValidationError` if any field is invalid.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let db = &self.database;

        if db.url.trim().is_empty() {
            return Err(ConfigError::ValidationError(
                "database url must not be empty".to_string(),
            ));
        }

        if db.max_connections == 0 {
            return Err(ConfigError::ValidationError(
                "database max_connections must be positive".to_string(),
            ));
        }

        if db.min_idle > db.max_connections {
            return Err(ConfigError::ValidationError(format!(
                "database min_idle ({}) exceeds max_connections ({})",
                db.min_idle, db.max_connections
            )));
        }

        if db.acquire_timeout.is_zero() {
            return Err(ConfigError::ValidationError(
                "database acquire_timeout must be non-zero".to_string(),
            ));
        }

        self.statements
            .to_statements()
            .map_err(|e| ConfigError::ValidationError(e.to_string()))?;

        Ok(())
    }
}
