use thiserror::Error;

use userhub_auth::Role;
use userhub_core::hash_password;
use userhub_db::{AccountRepository, StoreError};
use userhub_models::{Account, AccountChanges, NewAccount, is_reserved_username};

#[derive(Debug, Error)]
pub enum AdminError {
    #[error("User with username '{0}' already exists")]
    AlreadyExists(String),

    #[error("User '{0}' not found")]
    NotFound(String),

    #[error("{0} must not be empty")]
    Empty(&'static str),

    #[error("Username '{0}' is reserved")]
    Reserved(String),

    #[error("Failed to hash password: {0}")]
    Hash(String),

    #[error(transparent)]
    Store(#[from] StoreError),
}

pub struct AdminInput {
    pub username: String,
    pub name: String,
    pub email: String,
    pub password: String,
}

/// Creates an ADMIN account.
pub async fn create_admin(
    accounts: &dyn AccountRepository,
    input: AdminInput,
    bcrypt_cost: u32,
) -> Result<Account, AdminError> {
    for (field, value) in [
        ("username", &input.username),
        ("name", &input.name),
        ("email", &input.email),
        ("password", &input.password),
    ] {
        if value.trim().is_empty() {
            return Err(AdminError::Empty(field));
        }
    }

    if is_reserved_username(&input.username) {
        return Err(AdminError::Reserved(input.username));
    }

    let password_hash = hash_password(&input.password, bcrypt_cost)
        .map_err(|e| AdminError::Hash(e.error.to_string()))?;

    accounts
        .create(NewAccount {
            username: input.username,
            password_hash,
            name: input.name,
            email: input.email,
            role: Role::Admin,
        })
        .await
        .map_err(|e| match e {
            StoreError::Duplicate(username) => AdminError::AlreadyExists(username),
            other => AdminError::Store(other),
        })
}

/// Changes the role of an existing account.
pub async fn set_role(
    accounts: &dyn AccountRepository,
    username: &str,
    role: Role,
) -> Result<Account, AdminError> {
    let changes = AccountChanges {
        role: Some(role),
        ..Default::default()
    };

    accounts
        .update(username, changes)
        .await?
        .ok_or_else(|| AdminError::NotFound(username.to_string()))
}
