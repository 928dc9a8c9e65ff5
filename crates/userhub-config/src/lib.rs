//! # userhub Config
//!
//! Configuration structures loaded from environment variables:
//!
//! - [`jwt`]: token signing secret and lifetime (`JWT_SECRET` is required)
//! - [`password`]: bcrypt work factor
//! - [`cors`]: allowed CORS origins
//! - [`server`]: listen address
//! - [`store`]: account store backend
//!
//! [`AppConfig::from_env`] loads all of them at once and fails on the first missing or
//! malformed value, so a misconfigured process never starts serving.

pub mod cors;
pub mod error;
pub mod jwt;
pub mod password;
pub mod server;
pub mod store;

// Re-export commonly used types at crate root
pub use cors::CorsConfig;
pub use error::ConfigError;
pub use jwt::JwtConfig;
pub use password::PasswordConfig;
pub use server::ServerConfig;
pub use store::StoreConfig;

#[derive(Clone, Debug)]
pub struct AppConfig {
    pub jwt: JwtConfig,
    pub password: PasswordConfig,
    pub cors: CorsConfig,
    pub server: ServerConfig,
    pub store: StoreConfig,
}

impl AppConfig {
    pub fn from_env() -> Result<Self, ConfigError> {
        Ok(Self {
            jwt: JwtConfig::from_env()?,
            password: PasswordConfig::from_env()?,
            cors: CorsConfig::from_env(),
            server: ServerConfig::from_env()?,
            store: StoreConfig::from_env()?,
        })
    }
}
