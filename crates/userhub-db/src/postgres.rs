//! PostgreSQL-backed account store.
//!
//! Roles are stored as `TEXT` (`'USER'` / `'ADMIN'`) and parsed on read, so a
//! hand-edited row with an unknown role surfaces as [`StoreError::InvalidRole`]
//! instead of being silently mapped.

use std::str::FromStr;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::{FromRow, PgPool};
use tracing::debug;

use userhub_auth::Role;
use userhub_models::{Account, AccountChanges, NewAccount};

use crate::repository::{AccountRepository, StoreError};

/// Opens a connection pool for `database_url`.
pub async fn connect(database_url: &str) -> Result<PgPool, StoreError> {
    let pool = PgPool::connect(database_url).await?;
    Ok(pool)
}

/// Applies the bundled migrations.
pub async fn run_migrations(pool: &PgPool) -> Result<(), StoreError> {
    sqlx::migrate!().run(pool).await?;
    Ok(())
}

#[derive(FromRow)]
struct AccountRow {
    username: String,
    password: String,
    name: String,
    email: String,
    role: String,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl TryFrom<AccountRow> for Account {
    type Error = StoreError;

    fn try_from(row: AccountRow) -> Result<Self, Self::Error> {
        let role = Role::from_str(&row.role).map_err(|_| StoreError::InvalidRole(row.role))?;
        Ok(Account {
            username: row.username,
            password: row.password,
            name: row.name,
            email: row.email,
            role,
            created_at: row.created_at,
            updated_at: row.updated_at,
        })
    }
}

#[derive(Clone)]
pub struct PgAccountRepository {
    pool: PgPool,
}

impl PgAccountRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub fn pool(&self) -> &PgPool {
        &self.pool
    }
}

#[async_trait]
impl AccountRepository for PgAccountRepository {
    async fn count_by_username(&self, username: &str) -> Result<i64, StoreError> {
        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM users WHERE username = $1")
            .bind(username)
            .fetch_one(&self.pool)
            .await?;
        Ok(count)
    }

    async fn find_by_username(&self, username: &str) -> Result<Option<Account>, StoreError> {
        let row = sqlx::query_as::<_, AccountRow>(
            r#"
            SELECT username, password, name, email, role, created_at, updated_at
            FROM users
            WHERE username = $1
            "#,
        )
        .bind(username)
        .fetch_optional(&self.pool)
        .await?;

        row.map(Account::try_from).transpose()
    }

    async fn create(&self, account: NewAccount) -> Result<Account, StoreError> {
        let result = sqlx::query_as::<_, AccountRow>(
            r#"
            INSERT INTO users (username, password, name, email, role)
            VALUES ($1, $2, $3, $4, $5)
            RETURNING username, password, name, email, role, created_at, updated_at
            "#,
        )
        .bind(&account.username)
        .bind(&account.password_hash)
        .bind(&account.name)
        .bind(&account.email)
        .bind(account.role.as_str())
        .fetch_one(&self.pool)
        .await;

        match result {
            Ok(row) => Account::try_from(row),
            Err(sqlx::Error::Database(db_err)) if db_err.is_unique_violation() => {
                debug!(username = %account.username, "Insert hit unique constraint");
                Err(StoreError::Duplicate(account.username))
            }
            Err(e) => Err(e.into()),
        }
    }

    async fn update(
        &self,
        username: &str,
        changes: AccountChanges,
    ) -> Result<Option<Account>, StoreError> {
        let row = sqlx::query_as::<_, AccountRow>(
            r#"
            UPDATE users
            SET name = COALESCE($2, name),
                password = COALESCE($3, password),
                email = COALESCE($4, email),
                role = COALESCE($5, role),
                updated_at = NOW()
            WHERE username = $1
            RETURNING username, password, name, email, role, created_at, updated_at
            "#,
        )
        .bind(username)
        .bind(changes.name)
        .bind(changes.password_hash)
        .bind(changes.email)
        .bind(changes.role.map(|role| role.as_str()))
        .fetch_optional(&self.pool)
        .await?;

        row.map(Account::try_from).transpose()
    }

    async fn delete(&self, username: &str) -> Result<bool, StoreError> {
        let result = sqlx::query("DELETE FROM users WHERE username = $1")
            .bind(username)
            .execute(&self.pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}
