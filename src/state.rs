use std::sync::Arc;

use tracing::{info, warn};
use userhub_config::{AppConfig, CorsConfig, JwtConfig, PasswordConfig, StoreConfig};
use userhub_db::{
    AccountRepository, InMemoryAccountRepository, PgAccountRepository, connect, run_migrations,
};

use crate::middleware::access::AccessTable;
use crate::modules::users::service::init_dummy_hash;

#[derive(Clone)]
pub struct AppState {
    pub accounts: Arc<dyn AccountRepository>,
    pub jwt_config: JwtConfig,
    pub password_config: PasswordConfig,
    pub cors_config: CorsConfig,
    pub access: Arc<AccessTable>,
}

impl AppState {
    pub fn new(
        accounts: Arc<dyn AccountRepository>,
        jwt_config: JwtConfig,
        password_config: PasswordConfig,
        cors_config: CorsConfig,
    ) -> Self {
        init_dummy_hash(password_config.cost);

        Self {
            accounts,
            jwt_config,
            password_config,
            cors_config,
            access: Arc::new(AccessTable::users()),
        }
    }
}

pub async fn init_app_state(config: &AppConfig) -> anyhow::Result<AppState> {
    let accounts: Arc<dyn AccountRepository> = match &config.store {
        StoreConfig::Postgres { database_url } => {
            let pool = connect(database_url).await?;
            run_migrations(&pool).await?;
            info!("Connected to PostgreSQL account store");
            Arc::new(PgAccountRepository::new(pool))
        }
        StoreConfig::Memory => {
            warn!("Using in-memory account store; accounts are lost on restart");
            Arc::new(InMemoryAccountRepository::new())
        }
    };

    Ok(AppState::new(
        accounts,
        config.jwt.clone(),
        config.password,
        config.cors.clone(),
    ))
}
