//! Serve command - run the HTTP front-end, the RPC front-end, or both

use std::sync::Arc;

use accounts_core::api::{self, http, rpc, ApiState};
use accounts_core::config::Config;
use accounts_core::services::{EntryPoint, LogEvent};
use accounts_core::AccountsContext;
use anyhow::{Context, Result};
use tokio::net::TcpListener;
use tracing_subscriber::EnvFilter;

use super::{get_accounts_dir, get_logger, log_event};
use crate::ServeTarget;

/// Flag overrides for the configured settings
pub struct ServeOptions {
    pub host: Option<String>,
    pub http_port: Option<u16>,
    pub rpc_port: Option<u16>,
    pub storage: Option<String>,
}

fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let _ = tracing_subscriber::fmt().with_env_filter(filter).try_init();
}

async fn bind(host: &str, port: u16) -> Result<TcpListener> {
    api::bind(host, port)
        .await
        .with_context(|| format!("Failed to bind {}:{}", host, port))
}

pub fn run(target: ServeTarget, options: ServeOptions) -> Result<()> {
    init_tracing();

    let data_dir = get_accounts_dir()?;
    let mut config = Config::load(&data_dir)?;
    if let Some(storage) = options.storage.as_deref() {
        config.storage = storage.parse()?;
    }
    let host = options.host.unwrap_or_else(|| config.host.clone());
    let http_port = options.http_port.unwrap_or(config.http_port);
    let rpc_port = options.rpc_port.unwrap_or(config.rpc_port);

    // One store for every front-end this process starts
    let context = AccountsContext::from_config(&data_dir, config)
        .context("Failed to initialize account store")?;
    tracing::info!("using {} storage", context.config.storage);

    let entry_point = match target {
        ServeTarget::Http => EntryPoint::Http,
        ServeTarget::Rpc => EntryPoint::Rpc,
        ServeTarget::All => EntryPoint::Server,
    };
    let logger = get_logger(entry_point);
    if logger.is_none() {
        tracing::warn!("event log unavailable, continuing without it");
    }
    log_event(
        &logger,
        LogEvent::new("server_started").with_operation(format!("{:?}", target).to_lowercase()),
    );

    let mut state = ApiState::new(context.account_service.clone());
    if let Some(logger) = logger {
        state = state.with_logger(Arc::new(logger));
    }

    let runtime = tokio::runtime::Runtime::new().context("Failed to start async runtime")?;
    runtime.block_on(async move {
        let served = match target {
            ServeTarget::Http => {
                let listener = bind(&host, http_port).await?;
                api::serve(listener, http::router(state)).await
            }
            ServeTarget::Rpc => {
                let listener = bind(&host, rpc_port).await?;
                api::serve(listener, rpc::router(state)).await
            }
            ServeTarget::All => {
                let http_listener = bind(&host, http_port).await?;
                let rpc_listener = bind(&host, rpc_port).await?;
                api::serve_all(http_listener, rpc_listener, state).await
            }
        };
        served.context("Server failed")
    })
}
