//! Request and response shapes shared by the HTTP and RPC front-ends
//!
//! Missing fields deserialize to their defaults so that `{}` binds
//! successfully and is then rejected by validation as an empty name.

use serde::{Deserialize, Serialize};

use super::account::Account;
use super::result::Result;
use super::validation::{validate_name, validate_new_name};

/// `{"name": "alice", "amount": 50}`
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CreateAccountRequest {
    pub name: String,
    pub amount: i64,
}

impl CreateAccountRequest {
    pub fn new(name: impl Into<String>, amount: i64) -> Self {
        Self {
            name: name.into(),
            amount,
        }
    }

    pub fn validate(&self) -> Result<()> {
        validate_name(&self.name)
    }
}

/// Sets the balance of an existing account
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PatchAccountRequest {
    pub name: String,
    pub amount: i64,
}

impl PatchAccountRequest {
    pub fn new(name: impl Into<String>, amount: i64) -> Self {
        Self {
            name: name.into(),
            amount,
        }
    }

    pub fn validate(&self) -> Result<()> {
        validate_name(&self.name)
    }
}

/// Renames an existing account
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ChangeAccountRequest {
    pub name: String,
    pub new_name: String,
}

impl ChangeAccountRequest {
    pub fn new(name: impl Into<String>, new_name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            new_name: new_name.into(),
        }
    }

    /// Checks the source name before the target name
    pub fn validate(&self) -> Result<()> {
        validate_name(&self.name)?;
        validate_new_name(&self.new_name)
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct DeleteAccountRequest {
    pub name: String,
}

impl DeleteAccountRequest {
    pub fn new(name: impl Into<String>) -> Self {
        Self { name: name.into() }
    }

    pub fn validate(&self) -> Result<()> {
        validate_name(&self.name)
    }
}

/// Lookup by name (RPC params, HTTP `?name=` query)
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct GetAccountRequest {
    pub name: String,
}

impl GetAccountRequest {
    pub fn new(name: impl Into<String>) -> Self {
        Self { name: name.into() }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GetAccountResponse {
    pub name: String,
    pub amount: i64,
}

impl From<Account> for GetAccountResponse {
    fn from(account: Account) -> Self {
        Self {
            name: account.name,
            amount: account.amount,
        }
    }
}

/// Empty acknowledgement returned by RPC mutations
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Empty {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_fields_default() {
        let req: CreateAccountRequest = serde_json::from_str("{}").unwrap();
        assert_eq!(req, CreateAccountRequest::default());
        assert!(req.validate().is_err());
    }

    #[test]
    fn test_change_request_uses_snake_case_new_name() {
        let req: ChangeAccountRequest =
            serde_json::from_str(r#"{"name":"alice","new_name":"alicia"}"#).unwrap();
        assert_eq!(req.new_name, "alicia");
        assert!(req.validate().is_ok());
    }

    #[test]
    fn test_change_request_checks_name_first() {
        let err = ChangeAccountRequest::new("", "").validate().unwrap_err();
        assert_eq!(err.to_string(), "empty name");

        let err = ChangeAccountRequest::new("alice", "").validate().unwrap_err();
        assert_eq!(err.to_string(), "empty new name");
    }

    #[test]
    fn test_negative_amount_is_valid() {
        assert!(CreateAccountRequest::new("alice", i64::MIN).validate().is_ok());
        assert!(PatchAccountRequest::new("alice", -1).validate().is_ok());
    }
}
