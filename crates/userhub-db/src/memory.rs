use std::collections::HashMap;
use std::collections::hash_map::Entry;

use async_trait::async_trait;
use chrono::Utc;
use tokio::sync::RwLock;

use userhub_models::{Account, AccountChanges, NewAccount};

use crate::repository::{AccountRepository, StoreError};

/// Account store held in process memory. Contents are lost on restart.
#[derive(Debug, Default)]
pub struct InMemoryAccountRepository {
    accounts: RwLock<HashMap<String, Account>>,
}

impl InMemoryAccountRepository {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn len(&self) -> usize {
        self.accounts.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.accounts.read().await.is_empty()
    }
}

#[async_trait]
impl AccountRepository for InMemoryAccountRepository {
    async fn count_by_username(&self, username: &str) -> Result<i64, StoreError> {
        let accounts = self.accounts.read().await;
        Ok(i64::from(accounts.contains_key(username)))
    }

    async fn find_by_username(&self, username: &str) -> Result<Option<Account>, StoreError> {
        Ok(self.accounts.read().await.get(username).cloned())
    }

    async fn create(&self, account: NewAccount) -> Result<Account, StoreError> {
        let mut accounts = self.accounts.write().await;
        match accounts.entry(account.username.clone()) {
            Entry::Occupied(_) => Err(StoreError::Duplicate(account.username)),
            Entry::Vacant(slot) => {
                let now = Utc::now();
                let created = Account {
                    username: account.username,
                    password: account.password_hash,
                    name: account.name,
                    email: account.email,
                    role: account.role,
                    created_at: now,
                    updated_at: now,
                };
                Ok(slot.insert(created).clone())
            }
        }
    }

    async fn update(
        &self,
        username: &str,
        changes: AccountChanges,
    ) -> Result<Option<Account>, StoreError> {
        let mut accounts = self.accounts.write().await;
        let Some(account) = accounts.get_mut(username) else {
            return Ok(None);
        };

        changes.apply_to(account);
        account.updated_at = Utc::now();
        Ok(Some(account.clone()))
    }

    async fn delete(&self, username: &str) -> Result<bool, StoreError> {
        Ok(self.accounts.write().await.remove(username).is_some())
    }
}
