//! Configuration loading and management
//!
//! Settings come from an optional YAML file (path in `CINE_CONFIG`, default
//! `config/cine.yaml`) and are then overridden by environment variables:
//!
//! | Variable            | Setting                        |
//! |---------------------|--------------------------------|
//! | `CINE_BIND`         | `server.bind`                  |
//! | `CINE_DATABASE_URL` | `database.connection_string`   |
//! | `CINE_SIGNING_KEY`  | `auth.signing_key`             |
//!
//! Log filtering is read from `RUST_LOG` by the tracing subscriber.

use chrono::Duration;
use serde::{Deserialize, Serialize};
use std::path::Path;

use crate::auth::{LockoutPolicy, PasswordPolicy};
use crate::core::ITEMS_PER_PAGE;
use crate::core::error::ConfigError;

pub const CONFIG_PATH_VAR: &str = "CINE_CONFIG";
pub const DEFAULT_CONFIG_PATH: &str = "config/cine.yaml";

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub server: ServerConfig,
    pub database: DatabaseConfig,
    pub auth: AuthConfig,
    pub serialization: SerializationConfig,
    pub pagination: PaginationConfig,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    /// Socket address to listen on
    pub bind: String,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            bind: "127.0.0.1:3000".to_string(),
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct DatabaseConfig {
    /// MySQL connection string; the in-memory store is used when absent
    pub connection_string: Option<String>,
    pub max_connections: u32,
}

impl Default for DatabaseConfig {
    fn default() -> Self {
        Self {
            connection_string: None,
            max_connections: 5,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct AuthConfig {
    /// Shared secret for HS256 tokens (required)
    pub signing_key: Option<String>,
    pub token_lifetime_days: i64,
    pub lockout_max_failed: i32,
    pub lockout_minutes: i64,
    pub password: PasswordPolicy,
}

impl Default for AuthConfig {
    fn default() -> Self {
        Self {
            signing_key: None,
            token_lifetime_days: 7,
            lockout_max_failed: 5,
            lockout_minutes: 5,
            password: PasswordPolicy::default(),
        }
    }
}

impl AuthConfig {
    pub fn lockout(&self) -> LockoutPolicy {
        LockoutPolicy {
            max_failed_attempts: self.lockout_max_failed,
            duration: Duration::minutes(self.lockout_minutes),
        }
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct SerializationConfig {
    /// Relationship names emitted on every response
    pub keep_relations: Vec<String>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct PaginationConfig {
    pub items_per_page: usize,
}

impl Default for PaginationConfig {
    fn default() -> Self {
        Self {
            items_per_page: ITEMS_PER_PAGE,
        }
    }
}

impl AppConfig {
    /// Load configuration from a YAML file
    pub fn from_yaml_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path).map_err(|e| ConfigError::IoError {
            message: format!("{}: {}", path.display(), e),
        })?;
        Self::parse(&content, &path.display().to_string())
    }

    /// Load configuration from a YAML string
    pub fn from_yaml_str(yaml: &str) -> Result<Self, ConfigError> {
        Self::parse(yaml, "<inline>")
    }

    fn parse(yaml: &str, file: &str) -> Result<Self, ConfigError> {
        if yaml.trim().is_empty() {
            return Ok(Self::default());
        }
        serde_yaml::from_str(yaml).map_err(|e| ConfigError::ParseError {
            file: file.to_string(),
            message: e.to_string(),
        })
    }

    /// Load the file named by `CINE_CONFIG` (if it exists), apply
    /// environment overrides and validate the result
    pub fn load() -> Result<Self, ConfigError> {
        let path = std::env::var(CONFIG_PATH_VAR).unwrap_or_else(|_| DEFAULT_CONFIG_PATH.into());
        let mut config = if Path::new(&path).exists() {
            Self::from_yaml_file(&path)?
        } else {
            Self::default()
        };
        config.apply_overrides(|name| std::env::var(name).ok());
        config.validate()?;
        Ok(config)
    }

    /// Overwrite settings with values found through `lookup`
    pub fn apply_overrides<F>(&mut self, lookup: F)
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(bind) = lookup("CINE_BIND") {
            self.server.bind = bind;
        }
        if let Some(url) = lookup("CINE_DATABASE_URL") {
            self.database.connection_string = Some(url);
        }
        if let Some(key) = lookup("CINE_SIGNING_KEY") {
            self.auth.signing_key = Some(key);
        }
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        match self.auth.signing_key.as_deref() {
            None | Some("") => {
                return Err(ConfigError::MissingField {
                    field: "auth.signing_key".into(),
                });
            }
            Some(_) => {}
        }
        if self.auth.token_lifetime_days < 1 {
            return Err(ConfigError::InvalidValue {
                field: "auth.token_lifetime_days".into(),
                value: self.auth.token_lifetime_days.to_string(),
                message: "must be at least 1".into(),
            });
        }
        if self.pagination.items_per_page == 0 {
            return Err(ConfigError::InvalidValue {
                field: "pagination.items_per_page".into(),
                value: "0".into(),
                message: "must be at least 1".into(),
            });
        }
        Ok(())
    }

    /// The validated signing key
    pub fn signing_key(&self) -> Result<&str, ConfigError> {
        self.auth
            .signing_key
            .as_deref()
            .filter(|key| !key.is_empty())
            .ok_or_else(|| ConfigError::MissingField {
                field: "auth.signing_key".into(),
            })
    }
}
