//! Protocol front-ends
//!
//! Two thin adapters over the same [`AccountService`]: an HTTP/JSON API and
//! a JSON-RPC API. Both translate wire types to service calls and service
//! errors back to their own status codes. [`serve_all`] runs both in one
//! process over a single store.

pub mod http;
pub mod rpc;

use std::net::SocketAddr;
use std::sync::Arc;

use axum::Router;
use tokio::net::TcpListener;

use crate::domain::{Error, ErrorKind, Result};
use crate::services::{AccountService, LoggingService};

/// State shared by every request handler
#[derive(Clone)]
pub struct ApiState {
    pub service: AccountService,
    pub logger: Option<Arc<LoggingService>>,
}

impl ApiState {
    pub fn new(service: AccountService) -> Self {
        Self {
            service,
            logger: None,
        }
    }

    pub fn with_logger(mut self, logger: Arc<LoggingService>) -> Self {
        self.logger = Some(logger);
        self
    }

    /// Pass a service result through, noting failures on the way
    ///
    /// Caller mistakes (validation, missing or duplicate accounts) are only
    /// traced at debug level. Internal failures are traced as errors and
    /// written to the event log on the blocking pool; a failing event log
    /// only produces a warning.
    pub(crate) async fn observe<T>(&self, operation: &'static str, result: Result<T>) -> Result<T> {
        if let Err(error) = &result {
            self.record_failure(operation, error).await;
        }
        result
    }

    async fn record_failure(&self, operation: &'static str, error: &Error) {
        if error.kind() != ErrorKind::Internal {
            tracing::debug!(operation, "request rejected: {}", error);
            return;
        }

        tracing::error!(operation, "request failed: {}", error);
        if let Some(logger) = &self.logger {
            let logger = Arc::clone(logger);
            let message = error.to_string();
            let written = tokio::task::spawn_blocking(move || {
                logger.log_error("request_failed", operation, &message)
            })
            .await;
            if let Ok(Err(e)) = written {
                tracing::warn!("failed to write event log: {}", e);
            }
        }
    }
}

/// Bind a listener for `host:port`
pub async fn bind(host: &str, port: u16) -> std::io::Result<TcpListener> {
    TcpListener::bind(format!("{}:{}", host, port)).await
}

/// Serve `router` until the listener fails
pub async fn serve(listener: TcpListener, router: Router) -> std::io::Result<()> {
    let addr: Option<SocketAddr> = listener.local_addr().ok();
    if let Some(addr) = addr {
        tracing::info!("listening on {}", addr);
    }
    axum::serve(listener, router).await
}

/// Serve the HTTP and RPC front-ends together over one shared state
///
/// Both routers call into the same service, so an account created over one
/// protocol is visible over the other. Returns when either server fails.
pub async fn serve_all(
    http_listener: TcpListener,
    rpc_listener: TcpListener,
    state: ApiState,
) -> std::io::Result<()> {
    let http_router = http::router(state.clone());
    let rpc_router = rpc::router(state);
    tokio::try_join!(serve(http_listener, http_router), serve(rpc_listener, rpc_router))?;
    Ok(())
}
