//! Account domain model

use serde::{Deserialize, Serialize};

/// A named balance record
///
/// The name is the identity: stores key accounts by it, and a rename moves
/// the record to a new key.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Account {
    pub name: String,
    /// Any integer is accepted, including negative balances
    pub amount: i64,
}

impl Account {
    pub fn new(name: impl Into<String>, amount: i64) -> Self {
        Self {
            name: name.into(),
            amount,
        }
    }
}
