//! Accounts Core - a minimal account registry
//!
//! This crate implements the registry following hexagonal architecture:
//!
//! - **domain**: Core entities and request types (Account, requests, errors)
//! - **ports**: Trait definitions for external dependencies (AccountStore)
//! - **services**: Business logic orchestration (AccountService, logging, migrations)
//! - **adapters**: Concrete store implementations (in-memory, DuckDB)
//! - **api**: HTTP/JSON and JSON-RPC front-ends
//! - **client**: Blocking clients for both front-ends

pub mod adapters;
pub mod api;
pub mod client;
pub mod config;
pub mod domain;
pub mod log_migrations;
pub mod migrations;
pub mod ports;
pub mod services;

use std::path::Path;
use std::sync::Arc;

use anyhow::Result;

use adapters::{DuckDbAccountStore, InMemoryAccountStore};
use config::{Config, StorageBackend};
use ports::AccountStore;
use services::AccountService;

// Re-export commonly used types at crate root
pub use domain::{Account, Error, ErrorKind};

/// Main context for account operations
///
/// Holds the configuration, the selected store and the service built on it.
pub struct AccountsContext {
    pub config: Config,
    pub store: Arc<dyn AccountStore>,
    pub account_service: AccountService,
}

impl AccountsContext {
    /// Create a context from the settings in `data_dir`
    pub fn new(data_dir: &Path) -> Result<Self> {
        Self::from_config(data_dir, Config::load(data_dir)?)
    }

    /// Create a context from an already loaded config
    ///
    /// The DuckDB file, when selected, lives in `data_dir`.
    pub fn from_config(data_dir: &Path, config: Config) -> Result<Self> {
        let store: Arc<dyn AccountStore> = match config.storage {
            StorageBackend::Memory => Arc::new(InMemoryAccountStore::new()),
            StorageBackend::Duckdb => {
                std::fs::create_dir_all(data_dir)?;
                Arc::new(DuckDbAccountStore::open(&config.db_path(data_dir))?)
            }
        };

        Ok(Self::with_store(config, store))
    }

    /// Create a context around an already opened store
    pub fn with_store(config: Config, store: Arc<dyn AccountStore>) -> Self {
        let account_service = AccountService::new(Arc::clone(&store));
        Self {
            config,
            store,
            account_service,
        }
    }
}
