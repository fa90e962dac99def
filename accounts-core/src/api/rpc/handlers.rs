//! JSON-RPC request dispatch and per-method handlers
//!
//! Protocol problems (unparsable body, wrong version, unknown method, params
//! that do not bind) are answered before any service call.

use axum::extract::rejection::JsonRejection;
use axum::extract::State;
use axum::Json;
use serde::de::DeserializeOwned;
use serde::Serialize;
use tracing::debug;

use super::types::*;
use crate::api::ApiState;
use crate::domain::{
    ChangeAccountRequest, CreateAccountRequest, DeleteAccountRequest, Empty, Error,
    GetAccountRequest, GetAccountResponse, PatchAccountRequest,
};

/// Main dispatcher: routes incoming JSON-RPC requests to the matching method
pub async fn handle_rpc_request(
    State(state): State<ApiState>,
    body: Result<Json<RpcRequest>, JsonRejection>,
) -> Json<RpcResponse> {
    let req = match body {
        Ok(Json(req)) => req,
        Err(rejection) => {
            tracing::error!("failed to parse RPC request: {}", rejection.body_text());
            return Json(RpcResponse::from_result(
                Err(RpcError::new(codes::PARSE_ERROR, "Parse error")),
                serde_json::Value::Null,
            ));
        }
    };

    debug!("RPC Request: method={}, id={}", req.method, req.id);

    if req.jsonrpc != JSONRPC_VERSION {
        return Json(RpcResponse::from_result(
            Err(RpcError::new(
                codes::INVALID_REQUEST,
                format!("Unsupported jsonrpc version: {}", req.jsonrpc),
            )),
            req.id,
        ));
    }

    let result = match req.method.as_str() {
        methods::CREATE => handle_create(&state, req.params).await,
        methods::GET => handle_get(&state, req.params).await,
        methods::DELETE => handle_delete(&state, req.params).await,
        methods::CHANGE_AMOUNT => handle_change_amount(&state, req.params).await,
        methods::CHANGE_NAME => handle_change_name(&state, req.params).await,
        _ => Err(RpcError::new(
            codes::METHOD_NOT_FOUND,
            format!("Method not found: {}", req.method),
        )),
    };

    Json(RpcResponse::from_result(result, req.id))
}

/// Decode method params; absent params bind like an empty object
fn parse_params<T: DeserializeOwned>(params: serde_json::Value) -> Result<T, RpcError> {
    let params = if params.is_null() {
        serde_json::Value::Object(serde_json::Map::new())
    } else {
        params
    };
    serde_json::from_value(params)
        .map_err(|e| RpcError::new(codes::INVALID_PARAMS, format!("Invalid params: {}", e)))
}

fn to_json<T: Serialize>(value: &T) -> Result<serde_json::Value, RpcError> {
    serde_json::to_value(value)
        .map_err(|e| RpcError::new(codes::UNKNOWN, format!("Serialization error: {}", e)))
}

fn rpc_error(error: Error) -> RpcError {
    RpcError::from(&error)
}

async fn handle_create(
    state: &ApiState,
    params: serde_json::Value,
) -> Result<serde_json::Value, RpcError> {
    let request: CreateAccountRequest = parse_params(params)?;
    let result = state.service.create(request).await;
    state.observe("create", result).await.map_err(rpc_error)?;
    to_json(&Empty {})
}

async fn handle_get(
    state: &ApiState,
    params: serde_json::Value,
) -> Result<serde_json::Value, RpcError> {
    let request: GetAccountRequest = parse_params(params)?;
    let result = state.service.get(&request.name).await;
    let account = state.observe("get", result).await.map_err(rpc_error)?;
    to_json(&GetAccountResponse::from(account))
}

async fn handle_delete(
    state: &ApiState,
    params: serde_json::Value,
) -> Result<serde_json::Value, RpcError> {
    let request: DeleteAccountRequest = parse_params(params)?;
    let result = state.service.delete(request).await;
    state.observe("delete", result).await.map_err(rpc_error)?;
    to_json(&Empty {})
}

async fn handle_change_amount(
    state: &ApiState,
    params: serde_json::Value,
) -> Result<serde_json::Value, RpcError> {
    let request: PatchAccountRequest = parse_params(params)?;
    let result = state.service.change_amount(request).await;
    state.observe("change_amount", result).await.map_err(rpc_error)?;
    to_json(&Empty {})
}

async fn handle_change_name(
    state: &ApiState,
    params: serde_json::Value,
) -> Result<serde_json::Value, RpcError> {
    let request: ChangeAccountRequest = parse_params(params)?;
    let result = state.service.change_name(request).await;
    state.observe("change_name", result).await.map_err(rpc_error)?;
    to_json(&Empty {})
}
