//! CLI command implementations

pub mod account;
pub mod config;
pub mod logs;
pub mod serve;

use std::path::PathBuf;

use accounts_core::config::Config;
use accounts_core::services::{EntryPoint, LogEvent, LoggingService};
use anyhow::{Context, Result};

/// Get the logging service for an entry point
///
/// Returns None if logging fails to initialize (shouldn't block operations)
pub fn get_logger(entry_point: EntryPoint) -> Option<LoggingService> {
    let data_dir = get_accounts_dir().ok()?;
    std::fs::create_dir_all(&data_dir).ok()?;
    LoggingService::new(&data_dir, entry_point, env!("CARGO_PKG_VERSION")).ok()
}

/// Log an event, ignoring any errors (logging should never break the app)
pub fn log_event(logger: &Option<LoggingService>, event: LogEvent) {
    if let Some(l) = logger {
        let _ = l.log(event);
    }
}

/// Record that a CLI command ran, ignoring any logging errors
pub fn log_command(command: &str) {
    if let Some(logger) = get_logger(EntryPoint::Cli) {
        let _ = logger.log_command(command);
    }
}

/// Get the accounts directory from environment or default
pub fn get_accounts_dir() -> Result<PathBuf> {
    if let Ok(dir) = std::env::var("ACCOUNTS_DIR") {
        return Ok(PathBuf::from(dir));
    }
    let home = dirs::home_dir().context("Could not find home directory")?;
    Ok(home.join(".accounts"))
}

/// Load settings from the accounts directory
pub fn get_config() -> Result<Config> {
    let data_dir = get_accounts_dir()?;
    Config::load(&data_dir)
        .with_context(|| format!("Failed to load settings from {:?}", data_dir))
}
