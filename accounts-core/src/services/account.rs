//! Account service - the one core both front-ends call into

use std::sync::Arc;

use tracing::debug;

use crate::domain::validation::validate_name;
use crate::domain::{
    Account, ChangeAccountRequest, CreateAccountRequest, DeleteAccountRequest,
    PatchAccountRequest, Result,
};
use crate::ports::AccountStore;

/// Validates requests and applies them to the injected store
///
/// Validation always runs first, so a rejected request never reaches the
/// store.
#[derive(Clone)]
pub struct AccountService {
    store: Arc<dyn AccountStore>,
}

impl AccountService {
    pub fn new(store: Arc<dyn AccountStore>) -> Self {
        Self { store }
    }

    pub async fn create(&self, request: CreateAccountRequest) -> Result<()> {
        request.validate()?;
        self.store
            .create(Account::new(request.name, request.amount))
            .await?;
        debug!("account created");
        Ok(())
    }

    pub async fn get(&self, name: &str) -> Result<Account> {
        validate_name(name)?;
        self.store.get(name).await
    }

    pub async fn delete(&self, request: DeleteAccountRequest) -> Result<()> {
        request.validate()?;
        self.store.delete(&request.name).await?;
        debug!("account deleted");
        Ok(())
    }

    pub async fn change_amount(&self, request: PatchAccountRequest) -> Result<()> {
        request.validate()?;
        self.store.set_amount(&request.name, request.amount).await?;
        debug!("account amount changed");
        Ok(())
    }

    pub async fn change_name(&self, request: ChangeAccountRequest) -> Result<()> {
        request.validate()?;
        self.store.rename(&request.name, &request.new_name).await?;
        debug!("account renamed");
        Ok(())
    }

    pub async fn list(&self) -> Result<Vec<Account>> {
        self.store.list().await
    }
}
