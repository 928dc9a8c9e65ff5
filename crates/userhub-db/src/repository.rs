use async_trait::async_trait;
use thiserror::Error;

use userhub_models::{Account, AccountChanges, NewAccount};

#[derive(Debug, Error)]
pub enum StoreError {
    /// An account with this username already exists.
    #[error("account already exists: {0}")]
    Duplicate(String),

    /// A stored role value that is neither USER nor ADMIN.
    #[error("stored role is not recognised: {0}")]
    InvalidRole(String),

    #[error("database error: {0}")]
    Database(#[from] sqlx::Error),

    #[error("migration failed: {0}")]
    Migrate(#[from] sqlx::migrate::MigrateError),
}

/// Persistence for accounts, keyed by username.
///
/// Implementations must make [`create`](AccountRepository::create) atomic with
/// respect to the username: of two concurrent creates for the same name, exactly
/// one succeeds and the other gets [`StoreError::Duplicate`].
#[async_trait]
pub trait AccountRepository: Send + Sync {
    /// Number of accounts with exactly this username (0 or 1).
    async fn count_by_username(&self, username: &str) -> Result<i64, StoreError>;

    async fn find_by_username(&self, username: &str) -> Result<Option<Account>, StoreError>;

    /// Inserts a new account.
    ///
    /// # Errors
    ///
    /// - [`StoreError::Duplicate`] if the username is taken
    async fn create(&self, account: NewAccount) -> Result<Account, StoreError>;

    /// Applies `changes` and returns the updated account, or `None` if no account
    /// has this username.
    async fn update(
        &self,
        username: &str,
        changes: AccountChanges,
    ) -> Result<Option<Account>, StoreError>;

    /// Deletes the account. Returns `false` if it did not exist.
    async fn delete(&self, username: &str) -> Result<bool, StoreError>;
}
