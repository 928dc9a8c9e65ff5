use std::sync::OnceLock;

use anyhow::anyhow;
use tracing::{info, instrument, warn};

use userhub_auth::{Role, create_access_token};
use userhub_config::{JwtConfig, PasswordConfig};
use userhub_core::{AppError, hash_password, verify_password};
use userhub_db::{AccountRepository, StoreError};
use userhub_models::{
    AccountChanges, LoginUserRequest, NewAccount, RegisterUserRequest, UpdateUserRequest,
    UserResponse,
};

use crate::metrics::{
    track_jwt_issued, track_user_deleted, track_user_login_failure, track_user_login_success,
    track_user_registered,
};
use crate::middleware::auth::AuthUser;
use crate::middleware::role::check_role;

pub const USERNAME_TAKEN: &str = "Username already exists";
pub const EMAIL_REQUIRED: &str = "Email is required";
pub const INVALID_CREDENTIALS: &str = "Username or password is invalid";
pub const USER_NOT_FOUND: &str = "User not found";

/// Hash checked against when the username is unknown, so that a failed login costs
/// one bcrypt verification whether or not the account exists.
static DUMMY_HASH: OnceLock<String> = OnceLock::new();

/// Computes the dummy hash ahead of the first login. Later calls are no-ops.
pub fn init_dummy_hash(cost: u32) -> &'static str {
    DUMMY_HASH.get_or_init(|| hash_password("userhub-dummy-password", cost).unwrap_or_default())
}

async fn hash_blocking(password: String, cost: u32) -> Result<String, AppError> {
    tokio::task::spawn_blocking(move || hash_password(&password, cost))
        .await
        .map_err(AppError::internal)?
}

async fn verify_blocking(password: String, hash: Option<String>, cost: u32) -> Result<bool, AppError> {
    tokio::task::spawn_blocking(move || match hash {
        Some(hash) => verify_password(&password, &hash),
        None => {
            verify_password(&password, init_dummy_hash(cost));
            false
        }
    })
    .await
    .map_err(AppError::internal)
}

fn not_found() -> AppError {
    AppError::bad_request(anyhow!(USER_NOT_FOUND))
}

pub struct UserService;

impl UserService {
    #[instrument(skip_all, fields(username = %dto.username))]
    pub async fn register(
        accounts: &dyn AccountRepository,
        password_config: &PasswordConfig,
        dto: RegisterUserRequest,
    ) -> Result<UserResponse, AppError> {
        if accounts.count_by_username(&dto.username).await? != 0 {
            return Err(AppError::bad_request(anyhow!(USERNAME_TAKEN)));
        }

        let email = dto
            .email
            .filter(|email| !email.trim().is_empty())
            .ok_or_else(|| AppError::bad_request(anyhow!(EMAIL_REQUIRED)))?;

        let password_hash = hash_blocking(dto.password, password_config.cost).await?;

        let account = accounts
            .create(NewAccount {
                username: dto.username,
                password_hash,
                name: dto.name,
                email,
                role: Role::default(),
            })
            .await
            .map_err(|e| match e {
                // Lost a race with a concurrent registration for the same name.
                StoreError::Duplicate(_) => AppError::bad_request(anyhow!(USERNAME_TAKEN)),
                other => AppError::internal(other),
            })?;

        track_user_registered();
        info!("User registered");

        Ok(UserResponse::basic(&account))
    }

    #[instrument(skip_all, fields(username = %dto.username))]
    pub async fn login(
        accounts: &dyn AccountRepository,
        jwt_config: &JwtConfig,
        password_config: &PasswordConfig,
        dto: LoginUserRequest,
    ) -> Result<UserResponse, AppError> {
        let account = accounts.find_by_username(&dto.username).await?;

        let stored_hash = account.as_ref().map(|a| a.password.clone());
        let password_ok = verify_blocking(dto.password, stored_hash, password_config.cost).await?;

        let account = match account {
            Some(account) if password_ok => account,
            Some(_) => {
                track_user_login_failure("invalid_password");
                warn!("Login failed");
                return Err(AppError::unauthorized(INVALID_CREDENTIALS));
            }
            None => {
                track_user_login_failure("unknown_user");
                warn!("Login failed");
                return Err(AppError::unauthorized(INVALID_CREDENTIALS));
            }
        };

        let token = create_access_token(
            &account.username,
            &account.name,
            &account.email,
            account.role,
            jwt_config,
        )?;

        track_jwt_issued();
        track_user_login_success(account.role.as_str());
        info!(role = %account.role, "User logged in");

        Ok(UserResponse::with_role(&account).token(token))
    }

    #[instrument(skip_all, fields(username = %auth_user.username()))]
    pub async fn get(
        accounts: &dyn AccountRepository,
        auth_user: &AuthUser,
    ) -> Result<UserResponse, AppError> {
        let account = accounts
            .find_by_username(auth_user.username())
            .await?
            .ok_or_else(not_found)?;

        Ok(UserResponse::with_role(&account))
    }

    #[instrument(skip_all, fields(username = %auth_user.username()))]
    pub async fn update(
        accounts: &dyn AccountRepository,
        password_config: &PasswordConfig,
        auth_user: &AuthUser,
        dto: UpdateUserRequest,
    ) -> Result<UserResponse, AppError> {
        if accounts.count_by_username(auth_user.username()).await? == 0 {
            return Err(not_found());
        }

        let password_hash = match dto.password {
            Some(password) => Some(hash_blocking(password, password_config.cost).await?),
            None => None,
        };

        let changes = AccountChanges {
            name: dto.name,
            password_hash,
            email: dto.email,
            role: dto.role,
        };

        // Deleted between the check above and the write.
        let account = accounts
            .update(auth_user.username(), changes)
            .await?
            .ok_or_else(not_found)?;

        info!("User updated");

        Ok(UserResponse::with_role(&account))
    }

    #[instrument(skip_all, fields(username = %auth_user.username(), target = %username))]
    pub async fn delete(
        accounts: &dyn AccountRepository,
        auth_user: &AuthUser,
        username: &str,
    ) -> Result<(), AppError> {
        check_role(auth_user, Role::Admin)?;

        if !accounts.delete(username).await? {
            return Err(not_found());
        }

        track_user_deleted();
        info!("User deleted");

        Ok(())
    }
}
