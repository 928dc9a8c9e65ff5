use std::env;

use crate::error::ConfigError;

/// Where accounts are persisted.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum StoreConfig {
    Postgres { database_url: String },
    /// Process-local store; contents are lost on restart.
    Memory,
}

impl StoreConfig {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_values(
            env::var("ACCOUNT_STORE").ok(),
            env::var("DATABASE_URL").ok(),
        )
    }

    fn from_values(
        backend: Option<String>,
        database_url: Option<String>,
    ) -> Result<Self, ConfigError> {
        match backend.as_deref().map(str::trim).unwrap_or("postgres") {
            "postgres" => database_url
                .filter(|url| !url.trim().is_empty())
                .map(|database_url| StoreConfig::Postgres { database_url })
                .ok_or(ConfigError::Missing("DATABASE_URL")),
            "memory" => Ok(StoreConfig::Memory),
            other => Err(ConfigError::Invalid {
                key: "ACCOUNT_STORE",
                value: other.to_string(),
                reason: "expected `postgres` or `memory`",
            }),
        }
    }
}
