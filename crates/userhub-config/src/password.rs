use std::env;

use crate::error::ConfigError;

#[derive(Clone, Copy, Debug)]
pub struct PasswordConfig {
    /// bcrypt work factor.
    pub cost: u32,
}

impl Default for PasswordConfig {
    fn default() -> Self {
        Self { cost: 10 }
    }
}

impl PasswordConfig {
    pub fn from_env() -> Result<Self, ConfigError> {
        match env::var("BCRYPT_COST") {
            Ok(raw) => Self::parse(&raw),
            Err(_) => Ok(Self::default()),
        }
    }

    fn parse(raw: &str) -> Result<Self, ConfigError> {
        match raw.trim().parse::<u32>() {
            Ok(cost) if (4..=31).contains(&cost) => Ok(Self { cost }),
            _ => Err(ConfigError::Invalid {
                key: "BCRYPT_COST",
                value: raw.to_string(),
                reason: "expected an integer between 4 and 31",
            }),
        }
    }
}
