//! JSON-RPC front-end for the `Account` service
//!
//! A single `POST /` endpoint takes JSON-RPC 2.0 requests. Methods:
//! `Account.Create`, `Account.Get`, `Account.Delete`, `Account.ChangeAmount`
//! and `Account.ChangeName`. Failures come back as an error object whose
//! code is one of [`types::codes`]. The server applies no deadline.

pub mod handlers;
pub mod types;

use axum::routing::post;
use axum::Router;
use tower_http::trace::TraceLayer;

use super::ApiState;

/// Build the RPC router
pub fn router(state: ApiState) -> Router {
    Router::new()
        .route("/", post(handlers::handle_rpc_request))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
