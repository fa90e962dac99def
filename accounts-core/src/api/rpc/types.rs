//! JSON-RPC 2.0 envelope types and status codes for the Account service

use serde::{Deserialize, Serialize};

use crate::domain::{Error, ErrorKind};

pub const JSONRPC_VERSION: &str = "2.0";

/// Method names of the `Account` service
pub mod methods {
    pub const CREATE: &str = "Account.Create";
    pub const GET: &str = "Account.Get";
    pub const DELETE: &str = "Account.Delete";
    pub const CHANGE_AMOUNT: &str = "Account.ChangeAmount";
    pub const CHANGE_NAME: &str = "Account.ChangeName";
}

/// Status codes carried in [`RpcError::code`]
///
/// Domain failures use the gRPC status numbering; protocol failures use the
/// reserved JSON-RPC range.
pub mod codes {
    /// Unexpected failure with no more specific code
    pub const UNKNOWN: i32 = 2;
    pub const INVALID_ARGUMENT: i32 = 3;
    pub const NOT_FOUND: i32 = 5;
    pub const ALREADY_EXISTS: i32 = 6;

    pub const PARSE_ERROR: i32 = -32700;
    pub const INVALID_REQUEST: i32 = -32600;
    pub const METHOD_NOT_FOUND: i32 = -32601;
    pub const INVALID_PARAMS: i32 = -32602;
}

#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct RpcRequest {
    pub jsonrpc: String,
    pub method: String,
    #[serde(default)]
    pub params: serde_json::Value,
    #[serde(default)]
    pub id: serde_json::Value,
}

impl RpcRequest {
    pub fn new(method: impl Into<String>, params: serde_json::Value, id: u64) -> Self {
        Self {
            jsonrpc: JSONRPC_VERSION.to_string(),
            method: method.into(),
            params,
            id: id.into(),
        }
    }
}

#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct RpcResponse {
    pub jsonrpc: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub result: Option<serde_json::Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<RpcError>,
    #[serde(default)]
    pub id: serde_json::Value,
}

impl RpcResponse {
    pub fn from_result(
        result: Result<serde_json::Value, RpcError>,
        id: serde_json::Value,
    ) -> Self {
        match result {
            Ok(value) => Self {
                jsonrpc: JSONRPC_VERSION.to_string(),
                result: Some(value),
                error: None,
                id,
            },
            Err(error) => Self {
                jsonrpc: JSONRPC_VERSION.to_string(),
                result: None,
                error: Some(error),
                id,
            },
        }
    }
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct RpcError {
    pub code: i32,
    pub message: String,
}

impl RpcError {
    pub fn new(code: i32, message: impl Into<String>) -> Self {
        Self {
            code,
            message: message.into(),
        }
    }
}

impl From<&Error> for RpcError {
    fn from(error: &Error) -> Self {
        let code = match error.kind() {
            ErrorKind::InvalidArgument => codes::INVALID_ARGUMENT,
            ErrorKind::NotFound => codes::NOT_FOUND,
            ErrorKind::AlreadyExists => codes::ALREADY_EXISTS,
            ErrorKind::InvalidRequest => codes::INVALID_PARAMS,
            // Storage details stay in the server log
            ErrorKind::Internal => return Self::new(codes::UNKNOWN, "internal error"),
        };
        Self::new(code, error.to_string())
    }
}
