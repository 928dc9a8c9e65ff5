//! Account models and DTOs.
//!
//! # Core Types
//!
//! - [`Account`] - the persisted account, including its password hash
//! - [`NewAccount`] - what the store needs to insert an account
//! - [`AccountChanges`] - a partial update; `None` fields are left untouched
//!
//! # Request DTOs
//!
//! - [`RegisterUserRequest`] - `POST /api/users`
//! - [`LoginUserRequest`] - `POST /api/users/login`
//! - [`UpdateUserRequest`] - `PATCH /api/users/current`
//!
//! # Responses
//!
//! - [`UserResponse`] - the public view of an account, never the hash
//! - [`WebResponse`] - the `{"data": ...}` envelope around every success body
//!
//! Types that hold a password or a password hash print it as `[redacted]` in their
//! `Debug` output.

use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use validator::{Validate, ValidationError};

use userhub_auth::Role;

const REDACTED: &str = "[redacted]";

/// Usernames that collide with static path segments under `/api/users/`.
pub const RESERVED_USERNAMES: &[&str] = &["current", "login"];

pub fn is_reserved_username(username: &str) -> bool {
    RESERVED_USERNAMES.contains(&username)
}

fn validate_username(username: &str) -> Result<(), ValidationError> {
    if is_reserved_username(username) {
        return Err(ValidationError::new("reserved_username")
            .with_message(format!("username '{}' is reserved", username).into()));
    }
    Ok(())
}

/// An account as stored.
#[derive(Clone, PartialEq, Eq)]
pub struct Account {
    pub username: String,
    /// bcrypt hash of the password
    pub password: String,
    pub name: String,
    pub email: String,
    pub role: Role,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl fmt::Debug for Account {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Account")
            .field("username", &self.username)
            .field("password", &REDACTED)
            .field("name", &self.name)
            .field("email", &self.email)
            .field("role", &self.role)
            .field("created_at", &self.created_at)
            .field("updated_at", &self.updated_at)
            .finish()
    }
}

#[derive(Clone)]
pub struct NewAccount {
    pub username: String,
    pub password_hash: String,
    pub name: String,
    pub email: String,
    pub role: Role,
}

impl fmt::Debug for NewAccount {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("NewAccount")
            .field("username", &self.username)
            .field("password_hash", &REDACTED)
            .field("name", &self.name)
            .field("email", &self.email)
            .field("role", &self.role)
            .finish()
    }
}

#[derive(Clone, Default)]
pub struct AccountChanges {
    pub name: Option<String>,
    pub password_hash: Option<String>,
    pub email: Option<String>,
    pub role: Option<Role>,
}

impl AccountChanges {
    pub fn is_empty(&self) -> bool {
        self.name.is_none()
            && self.password_hash.is_none()
            && self.email.is_none()
            && self.role.is_none()
    }

    /// Applies the present fields to `account`.
    pub fn apply_to(self, account: &mut Account) {
        if let Some(name) = self.name {
            account.name = name;
        }
        if let Some(password_hash) = self.password_hash {
            account.password = password_hash;
        }
        if let Some(email) = self.email {
            account.email = email;
        }
        if let Some(role) = self.role {
            account.role = role;
        }
    }
}

impl fmt::Debug for AccountChanges {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AccountChanges")
            .field("name", &self.name)
            .field("password_hash", &self.password_hash.as_ref().map(|_| REDACTED))
            .field("email", &self.email)
            .field("role", &self.role)
            .finish()
    }
}

/// Body of `POST /api/users`.
///
/// `email` is optional at the JSON level so that a missing email produces a
/// readable client error instead of a deserialization failure.
#[derive(Deserialize, Clone, Validate, ToSchema)]
pub struct RegisterUserRequest {
    #[validate(
        length(min = 1, max = 100, message = "username must be between 1 and 100 characters"),
        custom(function = "validate_username")
    )]
    pub username: String,
    #[validate(length(min = 1, max = 100, message = "password must be between 1 and 100 characters"))]
    pub password: String,
    #[validate(length(min = 1, max = 100, message = "name must be between 1 and 100 characters"))]
    pub name: String,
    #[validate(
        email(message = "email must be a valid address"),
        length(max = 100, message = "email must be at most 100 characters")
    )]
    pub email: Option<String>,
}

impl fmt::Debug for RegisterUserRequest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RegisterUserRequest")
            .field("username", &self.username)
            .field("password", &REDACTED)
            .field("name", &self.name)
            .field("email", &self.email)
            .finish()
    }
}

/// Body of `POST /api/users/login`.
#[derive(Deserialize, Clone, Validate, ToSchema)]
pub struct LoginUserRequest {
    #[validate(length(min = 1, max = 100, message = "username must be between 1 and 100 characters"))]
    pub username: String,
    #[validate(length(min = 1, max = 100, message = "password must be between 1 and 100 characters"))]
    pub password: String,
}

impl fmt::Debug for LoginUserRequest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LoginUserRequest")
            .field("username", &self.username)
            .field("password", &REDACTED)
            .finish()
    }
}

/// Body of `PATCH /api/users/current`. Absent fields are left unchanged.
#[derive(Deserialize, Clone, Default, Validate, ToSchema)]
pub struct UpdateUserRequest {
    #[validate(length(min = 1, max = 100, message = "name must be between 1 and 100 characters"))]
    pub name: Option<String>,
    #[validate(length(min = 1, max = 100, message = "password must be between 1 and 100 characters"))]
    pub password: Option<String>,
    #[validate(
        email(message = "email must be a valid address"),
        length(max = 100, message = "email must be at most 100 characters")
    )]
    pub email: Option<String>,
    pub role: Option<Role>,
}

impl fmt::Debug for UpdateUserRequest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("UpdateUserRequest")
            .field("name", &self.name)
            .field("password", &self.password.as_ref().map(|_| REDACTED))
            .field("email", &self.email)
            .field("role", &self.role)
            .finish()
    }
}

/// Public view of an account.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct UserResponse {
    pub username: String,
    pub name: String,
    pub email: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub role: Option<Role>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub token: Option<String>,
}

impl UserResponse {
    /// Username, name, and email only.
    pub fn basic(account: &Account) -> Self {
        Self {
            username: account.username.clone(),
            name: account.name.clone(),
            email: account.email.clone(),
            role: None,
            token: None,
        }
    }

    /// Basic view plus the role.
    pub fn with_role(account: &Account) -> Self {
        Self {
            role: Some(account.role),
            ..Self::basic(account)
        }
    }

    pub fn token(mut self, token: String) -> Self {
        self.token = Some(token);
        self
    }
}

/// Success envelope: `{"data": ...}`.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct WebResponse<T> {
    pub data: T,
}

impl<T> WebResponse<T> {
    pub fn new(data: T) -> Self {
        Self { data }
    }
}
