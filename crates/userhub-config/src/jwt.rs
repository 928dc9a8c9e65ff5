use std::env;
use std::fmt;

use crate::error::ConfigError;

/// Token lifetime used when `JWT_EXPIRES_IN` is not set (30 minutes).
pub const DEFAULT_ACCESS_TOKEN_EXPIRY: i64 = 1800;

/// Longest accepted token lifetime (one year).
pub const MAX_ACCESS_TOKEN_EXPIRY: i64 = 365 * 24 * 60 * 60;

#[derive(Clone)]
pub struct JwtConfig {
    pub secret: String,
    /// Access token lifetime in seconds.
    pub access_token_expiry: i64,
}

impl JwtConfig {
    pub fn new(secret: impl Into<String>, access_token_expiry: i64) -> Self {
        Self {
            secret: secret.into(),
            access_token_expiry,
        }
    }

    /// Reads `JWT_SECRET` (required) and `JWT_EXPIRES_IN` (optional).
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_values(
            env::var("JWT_SECRET").ok(),
            env::var("JWT_EXPIRES_IN").ok(),
        )
    }

    fn from_values(secret: Option<String>, expires_in: Option<String>) -> Result<Self, ConfigError> {
        let secret = secret
            .filter(|s| !s.trim().is_empty())
            .ok_or(ConfigError::Missing("JWT_SECRET"))?;

        let access_token_expiry = match expires_in {
            Some(raw) => parse_seconds(&raw)?,
            None => DEFAULT_ACCESS_TOKEN_EXPIRY,
        };

        Ok(Self {
            secret,
            access_token_expiry,
        })
    }
}

impl fmt::Debug for JwtConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("JwtConfig")
            .field("secret", &"[redacted]")
            .field("access_token_expiry", &self.access_token_expiry)
            .finish()
    }
}

/// Accepts `1800` as well as `1800s`.
fn parse_seconds(raw: &str) -> Result<i64, ConfigError> {
    let trimmed = raw.trim();
    let digits = trimmed.strip_suffix('s').unwrap_or(trimmed);

    let invalid = |reason| ConfigError::Invalid {
        key: "JWT_EXPIRES_IN",
        value: raw.to_string(),
        reason,
    };

    match digits.parse::<i64>() {
        Ok(seconds) if seconds > MAX_ACCESS_TOKEN_EXPIRY => {
            Err(invalid("token lifetime must not exceed one year"))
        }
        Ok(seconds) if seconds > 0 => Ok(seconds),
        _ => Err(invalid("expected a positive number of seconds")),
    }
}
