//! Core domain entities
//!
//! The account record, the wire-level request/response shapes and the
//! validators that guard them. Pure data and pure functions - no I/O.

mod account;
pub mod requests;
pub mod result;
pub mod validation;

pub use account::Account;
pub use requests::{
    ChangeAccountRequest, CreateAccountRequest, DeleteAccountRequest, Empty, GetAccountRequest,
    GetAccountResponse, PatchAccountRequest,
};
pub use result::{Error, ErrorKind, Result};
