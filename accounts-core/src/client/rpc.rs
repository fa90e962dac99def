//! Blocking client for the JSON-RPC front-end

use std::sync::atomic::{AtomicU64, Ordering};
use std::time::Duration;

use reqwest::blocking::Client;
use serde::de::DeserializeOwned;
use serde::Serialize;

use super::{AccountClient, ClientError, ClientResult};
use crate::api::rpc::types::{methods, RpcRequest, RpcResponse};
use crate::domain::{
    ChangeAccountRequest, CreateAccountRequest, DeleteAccountRequest, Empty, GetAccountRequest,
    GetAccountResponse, PatchAccountRequest,
};

/// Per-call timeout
pub const CALL_TIMEOUT: Duration = Duration::from_secs(1);

pub struct RpcAccountClient {
    url: String,
    client: Client,
    request_id: AtomicU64,
}

impl RpcAccountClient {
    /// `url` is the RPC endpoint, like `http://127.0.0.1:4567/`
    pub fn new(url: impl Into<String>) -> ClientResult<Self> {
        Ok(Self {
            url: url.into(),
            client: Client::builder().timeout(CALL_TIMEOUT).build()?,
            request_id: AtomicU64::new(1),
        })
    }

    pub fn for_host(host: &str, port: u16) -> ClientResult<Self> {
        Self::new(format!("http://{}:{}/", host, port))
    }

    /// Issue one call and decode its result
    pub fn call<P: Serialize, R: DeserializeOwned>(&self, method: &str, params: &P) -> ClientResult<R> {
        let id = self.request_id.fetch_add(1, Ordering::SeqCst);
        let params =
            serde_json::to_value(params).map_err(|e| ClientError::InvalidResponse(e.to_string()))?;
        let request = RpcRequest::new(method, params, id);

        let response: RpcResponse = self
            .client
            .post(&self.url)
            .json(&request)
            .send()?
            .error_for_status()?
            .json()?;

        if let Some(error) = response.error {
            return Err(ClientError::Rpc {
                code: error.code,
                message: error.message,
            });
        }

        let result = response
            .result
            .ok_or_else(|| ClientError::InvalidResponse("missing result".to_string()))?;
        serde_json::from_value(result).map_err(|e| ClientError::InvalidResponse(e.to_string()))
    }
}

impl AccountClient for RpcAccountClient {
    fn create(&self, name: &str, amount: i64) -> ClientResult<()> {
        let _: Empty = self.call(methods::CREATE, &CreateAccountRequest::new(name, amount))?;
        Ok(())
    }

    fn get(&self, name: &str) -> ClientResult<GetAccountResponse> {
        self.call(methods::GET, &GetAccountRequest::new(name))
    }

    fn delete(&self, name: &str) -> ClientResult<()> {
        let _: Empty = self.call(methods::DELETE, &DeleteAccountRequest::new(name))?;
        Ok(())
    }

    fn change_amount(&self, name: &str, amount: i64) -> ClientResult<()> {
        let _: Empty = self.call(methods::CHANGE_AMOUNT, &PatchAccountRequest::new(name, amount))?;
        Ok(())
    }

    fn change_name(&self, name: &str, new_name: &str) -> ClientResult<()> {
        let _: Empty = self.call(methods::CHANGE_NAME, &ChangeAccountRequest::new(name, new_name))?;
        Ok(())
    }
}
