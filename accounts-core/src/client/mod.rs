//! Clients for the HTTP and RPC front-ends
//!
//! Both are blocking and expose the same five operations, so the CLI can
//! switch transports with a flag.

mod http;
mod rpc;

pub use http::HttpAccountClient;
pub use rpc::RpcAccountClient;

use thiserror::Error;

use crate::domain::GetAccountResponse;

#[derive(Error, Debug)]
pub enum ClientError {
    #[error("request failed: {0}")]
    Transport(#[from] reqwest::Error),

    /// Non-success HTTP status with the server's plain-text body
    #[error("server returned {status}: {message}")]
    Server { status: u16, message: String },

    /// RPC error object
    #[error("rpc error {code}: {message}")]
    Rpc { code: i32, message: String },

    #[error("invalid response: {0}")]
    InvalidResponse(String),
}

pub type ClientResult<T> = std::result::Result<T, ClientError>;

/// The operations every transport offers
pub trait AccountClient {
    fn create(&self, name: &str, amount: i64) -> ClientResult<()>;
    fn get(&self, name: &str) -> ClientResult<GetAccountResponse>;
    fn delete(&self, name: &str) -> ClientResult<()>;
    fn change_amount(&self, name: &str, amount: i64) -> ClientResult<()>;
    fn change_name(&self, name: &str, new_name: &str) -> ClientResult<()>;
}
