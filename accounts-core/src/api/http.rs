//! HTTP/JSON front-end
//!
//! | Operation | Route                          | Success          |
//! |-----------|--------------------------------|------------------|
//! | Create    | POST /account/create           | 201, no body     |
//! | Get       | GET  /account?name=            | 200, JSON        |
//! | Delete    | POST /account/delete           | 200, no body     |
//! | SetAmount | POST /account/change_amount    | 200, no body     |
//! | Rename    | POST /account/change_name      | 200, no body     |
//!
//! Failures answer with a plain-text body: 400 for a malformed body or an
//! empty name, 403 when the name is taken, 404 for a missing account and 500
//! for storage failures.

use axum::extract::rejection::{JsonRejection, QueryRejection};
use axum::extract::{Query, State};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::routing::{get, post};
use axum::{Json, Router};
use tower_http::trace::TraceLayer;

use super::ApiState;
use crate::domain::{
    ChangeAccountRequest, CreateAccountRequest, DeleteAccountRequest, Error, ErrorKind,
    GetAccountRequest, GetAccountResponse, PatchAccountRequest,
};

/// Build the HTTP router
pub fn router(state: ApiState) -> Router {
    Router::new()
        .route("/account", get(get_account))
        .route("/account/create", post(create_account))
        .route("/account/delete", post(delete_account))
        .route("/account/change_amount", post(change_amount))
        .route("/account/change_name", post(change_name))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// A service error on its way out as a plain-text response
#[derive(Debug)]
pub struct HttpError(pub Error);

impl HttpError {
    pub fn status(&self) -> StatusCode {
        match self.0.kind() {
            ErrorKind::InvalidArgument | ErrorKind::InvalidRequest => StatusCode::BAD_REQUEST,
            ErrorKind::AlreadyExists => StatusCode::FORBIDDEN,
            ErrorKind::NotFound => StatusCode::NOT_FOUND,
            ErrorKind::Internal => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for HttpError {
    fn into_response(self) -> Response {
        let status = self.status();
        let body = match self.0.kind() {
            ErrorKind::Internal => "internal error".to_string(),
            _ => self.0.to_string(),
        };
        (status, body).into_response()
    }
}

fn invalid_request() -> HttpError {
    HttpError(Error::InvalidRequest("invalid request".to_string()))
}

/// Unwrap a JSON body, answering 400 when it does not bind
fn bind<T>(body: Result<Json<T>, JsonRejection>) -> Result<T, HttpError> {
    match body {
        Ok(Json(request)) => Ok(request),
        Err(rejection) => {
            tracing::error!("failed to bind request body: {}", rejection.body_text());
            Err(invalid_request())
        }
    }
}

async fn create_account(
    State(state): State<ApiState>,
    body: Result<Json<CreateAccountRequest>, JsonRejection>,
) -> Result<StatusCode, HttpError> {
    let request = bind(body)?;
    let result = state.service.create(request).await;
    state.observe("create", result).await.map_err(HttpError)?;
    Ok(StatusCode::CREATED)
}

async fn get_account(
    State(state): State<ApiState>,
    query: Result<Query<GetAccountRequest>, QueryRejection>,
) -> Result<Json<GetAccountResponse>, HttpError> {
    let Query(request) = query.map_err(|rejection| {
        tracing::error!("failed to bind query: {}", rejection.body_text());
        invalid_request()
    })?;
    let result = state.service.get(&request.name).await;
    let account = state.observe("get", result).await.map_err(HttpError)?;
    Ok(Json(account.into()))
}

async fn delete_account(
    State(state): State<ApiState>,
    body: Result<Json<DeleteAccountRequest>, JsonRejection>,
) -> Result<StatusCode, HttpError> {
    let request = bind(body)?;
    let result = state.service.delete(request).await;
    state.observe("delete", result).await.map_err(HttpError)?;
    Ok(StatusCode::OK)
}

async fn change_amount(
    State(state): State<ApiState>,
    body: Result<Json<PatchAccountRequest>, JsonRejection>,
) -> Result<StatusCode, HttpError> {
    let request = bind(body)?;
    let result = state.service.change_amount(request).await;
    state.observe("change_amount", result).await.map_err(HttpError)?;
    Ok(StatusCode::OK)
}

async fn change_name(
    State(state): State<ApiState>,
    body: Result<Json<ChangeAccountRequest>, JsonRejection>,
) -> Result<StatusCode, HttpError> {
    let request = bind(body)?;
    let result = state.service.change_name(request).await;
    state.observe("change_name", result).await.map_err(HttpError)?;
    Ok(StatusCode::OK)
}
