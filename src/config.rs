//! Configuration file support.
//!
//! ```toml
//! database_url = "mysql://root@localhost/app"
//! engine = "InnoDB"
//! max_connections = 5
//! ```

use std::path::{Path, PathBuf};

use serde::Deserialize;

use crate::ddl::StorageEngine;
use crate::error::{SchemaError, SchemaResult};

/// Settings shared by the CLI and [`crate::engine::Connection::from_config`].
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Config {
    /// Database connection URL
    #[serde(default)]
    pub database_url: Option<String>,

    /// Storage engine for created tables
    #[serde(default)]
    pub engine: StorageEngine,

    /// Upper bound of the driver's connection pool
    #[serde(default = "default_max_connections")]
    pub max_connections: u32,
}

fn default_max_connections() -> u32 {
    5
}

impl Default for Config {
    fn default() -> Self {
        Self {
            database_url: None,
            engine: StorageEngine::default(),
            max_connections: default_max_connections(),
        }
    }
}

impl Config {
    /// `<config dir>/mysql-schema/config.toml`, when the platform has a config dir.
    pub fn default_path() -> Option<PathBuf> {
        dirs::config_dir().map(|dir| dir.join("mysql-schema").join("config.toml"))
    }

    /// Load the file at the default path, falling back to defaults when it
    /// does not exist.
    pub fn load() -> SchemaResult<Self> {
        match Self::default_path() {
            Some(path) if path.exists() => Self::from_path(&path),
            _ => Ok(Self::default()),
        }
    }

    /// Load a config file. A missing file is an error.
    pub fn from_path(path: &Path) -> SchemaResult<Self> {
        let content = std::fs::read_to_string(path)?;
        let config: Self = toml::from_str(&content)
            .map_err(|e| SchemaError::Config(format!("{}: {}", path.display(), e)))?;
        config
            .validate()
            .map_err(|e| SchemaError::Config(format!("{}: {}", path.display(), e)))?;
        Ok(config)
    }

    /// Parse config from TOML text.
    pub fn from_toml(content: &str) -> SchemaResult<Self> {
        let config: Self = toml::from_str(content).map_err(|e| SchemaError::Config(e.to_string()))?;
        config.validate().map_err(SchemaError::Config)?;
        Ok(config)
    }

    // A pool without permits would only fail after the acquire timeout.
    fn validate(&self) -> Result<(), String> {
        if self.max_connections == 0 {
            return Err("max_connections must be at least 1".to_string());
        }
        Ok(())
    }
}
