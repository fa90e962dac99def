//! In-memory store implementation

use std::collections::HashMap;

use async_trait::async_trait;
use parking_lot::RwLock;

use crate::domain::{Account, Error, Result};
use crate::ports::AccountStore;

/// Accounts keyed by name behind a single reader/writer lock
///
/// Reads share the lock. Every mutation checks and applies under one
/// exclusive guard, so two concurrent creates of the same name cannot both
/// succeed and a rename is never observable half-done.
#[derive(Default)]
pub struct InMemoryAccountStore {
    accounts: RwLock<HashMap<String, Account>>,
}

impl InMemoryAccountStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of accounts currently held
    pub fn len(&self) -> usize {
        self.accounts.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.accounts.read().is_empty()
    }
}

#[async_trait]
impl AccountStore for InMemoryAccountStore {
    async fn create(&self, account: Account) -> Result<()> {
        let mut accounts = self.accounts.write();
        if accounts.contains_key(&account.name) {
            return Err(Error::account_exists());
        }
        accounts.insert(account.name.clone(), account);
        Ok(())
    }

    async fn get(&self, name: &str) -> Result<Account> {
        self.accounts
            .read()
            .get(name)
            .cloned()
            .ok_or_else(Error::account_not_found)
    }

    async fn delete(&self, name: &str) -> Result<()> {
        self.accounts
            .write()
            .remove(name)
            .map(|_| ())
            .ok_or_else(Error::account_not_found)
    }

    async fn set_amount(&self, name: &str, amount: i64) -> Result<()> {
        let mut accounts = self.accounts.write();
        let account = accounts.get_mut(name).ok_or_else(Error::account_not_found)?;
        account.amount = amount;
        Ok(())
    }

    async fn rename(&self, name: &str, new_name: &str) -> Result<()> {
        let mut accounts = self.accounts.write();
        if !accounts.contains_key(name) {
            return Err(Error::account_not_found());
        }
        if name == new_name {
            return Ok(());
        }
        if accounts.contains_key(new_name) {
            return Err(Error::account_exists());
        }

        // Key and record name change under the same guard
        if let Some(mut account) = accounts.remove(name) {
            account.name = new_name.to_string();
            accounts.insert(account.name.clone(), account);
        }
        Ok(())
    }

    async fn list(&self) -> Result<Vec<Account>> {
        let mut accounts: Vec<Account> = self.accounts.read().values().cloned().collect();
        accounts.sort_by(|a, b| a.name.cmp(&b.name));
        Ok(accounts)
    }
}
