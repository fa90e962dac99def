//! Store port - account storage abstraction

use async_trait::async_trait;

use crate::domain::{Account, Result};

/// Account storage abstraction
///
/// Implementations own every account record and serialize access to them.
/// Each operation either fully applies or leaves the store untouched:
/// `NotFound` and `AlreadyExists` are decided before any mutation.
#[async_trait]
pub trait AccountStore: Send + Sync {
    /// Insert a new account, failing with `AlreadyExists` if the name is taken
    async fn create(&self, account: Account) -> Result<()>;

    /// Look up an account by name
    async fn get(&self, name: &str) -> Result<Account>;

    /// Remove an account
    async fn delete(&self, name: &str) -> Result<()>;

    /// Replace the amount of an existing account, keeping its name
    async fn set_amount(&self, name: &str, amount: i64) -> Result<()>;

    /// Move an account to a new name
    ///
    /// Fails with `AlreadyExists` when `new_name` belongs to another account.
    /// Renaming an account to its own name succeeds without changes.
    async fn rename(&self, name: &str, new_name: &str) -> Result<()>;

    /// All accounts, ordered by name
    async fn list(&self) -> Result<Vec<Account>>;
}
