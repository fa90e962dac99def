//! Configuration management
//!
//! Settings live in `settings.json` inside the data directory:
//! ```json
//! {
//!   "server": { "host": "0.0.0.0", "httpPort": 7777, "rpcPort": 4567 },
//!   "storage": { "backend": "duckdb", "dbFile": "accounts.duckdb" }
//! }
//! ```
//! Keys this crate does not manage are preserved when saving.

use std::collections::HashMap;
use std::fmt;
use std::path::{Path, PathBuf};
use std::str::FromStr;

use anyhow::{bail, Context, Result};
use serde::{Deserialize, Serialize};

pub const DEFAULT_HOST: &str = "0.0.0.0";
pub const DEFAULT_HTTP_PORT: u16 = 7777;
pub const DEFAULT_RPC_PORT: u16 = 4567;
pub const DEFAULT_DB_FILE: &str = "accounts.duckdb";

/// Raw settings.json structure
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
struct SettingsFile {
    #[serde(default)]
    server: ServerSettings,
    #[serde(default)]
    storage: StorageSettings,
    #[serde(flatten)]
    other: HashMap<String, serde_json::Value>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
struct ServerSettings {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    host: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    http_port: Option<u16>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    rpc_port: Option<u16>,
    #[serde(flatten)]
    other: HashMap<String, serde_json::Value>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
struct StorageSettings {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    backend: Option<StorageBackend>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    db_file: Option<String>,
    #[serde(flatten)]
    other: HashMap<String, serde_json::Value>,
}

/// Which store implementation backs the service
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StorageBackend {
    #[default]
    Memory,
    Duckdb,
}

impl FromStr for StorageBackend {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_lowercase().as_str() {
            "memory" | "mem" | "in-memory" => Ok(StorageBackend::Memory),
            "duckdb" | "sql" => Ok(StorageBackend::Duckdb),
            other => bail!("Unknown storage backend '{}' (expected memory or duckdb)", other),
        }
    }
}

impl fmt::Display for StorageBackend {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StorageBackend::Memory => write!(f, "memory"),
            StorageBackend::Duckdb => write!(f, "duckdb"),
        }
    }
}

/// Effective configuration (settings file plus environment overrides)
#[derive(Debug, Clone)]
pub struct Config {
    pub host: String,
    pub http_port: u16,
    pub rpc_port: u16,
    pub storage: StorageBackend,
    pub db_file: String,
    _raw_settings: SettingsFile,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            host: DEFAULT_HOST.to_string(),
            http_port: DEFAULT_HTTP_PORT,
            rpc_port: DEFAULT_RPC_PORT,
            storage: StorageBackend::default(),
            db_file: DEFAULT_DB_FILE.to_string(),
            _raw_settings: SettingsFile::default(),
        }
    }
}

impl Config {
    /// Load config from the data directory
    ///
    /// Environment variables win over the file:
    /// ACCOUNTS_HOST, ACCOUNTS_HTTP_PORT, ACCOUNTS_RPC_PORT, ACCOUNTS_STORAGE.
    pub fn load(data_dir: &Path) -> Result<Self> {
        let mut config = Self::load_file(data_dir)?;
        config.apply_env()?;
        Ok(config)
    }

    /// Load config from settings.json alone, ignoring the environment
    ///
    /// Used when editing the file, so that overrides are not persisted.
    pub fn load_file(data_dir: &Path) -> Result<Self> {
        let settings_path = data_dir.join("settings.json");

        let raw: SettingsFile = if settings_path.exists() {
            let content = std::fs::read_to_string(&settings_path)
                .with_context(|| format!("Failed to read {:?}", settings_path))?;
            serde_json::from_str(&content)
                .with_context(|| format!("Invalid settings file {:?}", settings_path))?
        } else {
            SettingsFile::default()
        };

        Ok(Self {
            host: raw.server.host.clone().unwrap_or_else(|| DEFAULT_HOST.to_string()),
            http_port: raw.server.http_port.unwrap_or(DEFAULT_HTTP_PORT),
            rpc_port: raw.server.rpc_port.unwrap_or(DEFAULT_RPC_PORT),
            storage: raw.storage.backend.unwrap_or_default(),
            db_file: raw
                .storage
                .db_file
                .clone()
                .unwrap_or_else(|| DEFAULT_DB_FILE.to_string()),
            _raw_settings: raw,
        })
    }

    fn apply_env(&mut self) -> Result<()> {
        if let Ok(host) = std::env::var("ACCOUNTS_HOST") {
            self.host = host;
        }
        if let Ok(port) = std::env::var("ACCOUNTS_HTTP_PORT") {
            self.http_port = port
                .parse()
                .with_context(|| format!("Invalid ACCOUNTS_HTTP_PORT '{}'", port))?;
        }
        if let Ok(port) = std::env::var("ACCOUNTS_RPC_PORT") {
            self.rpc_port = port
                .parse()
                .with_context(|| format!("Invalid ACCOUNTS_RPC_PORT '{}'", port))?;
        }
        if let Ok(storage) = std::env::var("ACCOUNTS_STORAGE") {
            self.storage = storage.parse()?;
        }
        Ok(())
    }

    /// Save config to the data directory, keeping unmanaged keys
    pub fn save(&self, data_dir: &Path) -> Result<()> {
        let settings_path = data_dir.join("settings.json");

        let mut settings = if settings_path.exists() {
            let content = std::fs::read_to_string(&settings_path)
                .with_context(|| format!("Failed to read {:?}", settings_path))?;
            serde_json::from_str::<SettingsFile>(&content)
                .with_context(|| format!("Invalid settings file {:?}", settings_path))?
        } else {
            std::fs::create_dir_all(data_dir)
                .with_context(|| format!("Failed to create {:?}", data_dir))?;
            self._raw_settings.clone()
        };

        settings.server.host = Some(self.host.clone());
        settings.server.http_port = Some(self.http_port);
        settings.server.rpc_port = Some(self.rpc_port);
        settings.storage.backend = Some(self.storage);
        settings.storage.db_file = Some(self.db_file.clone());

        let content = serde_json::to_string_pretty(&settings)?;
        std::fs::write(&settings_path, content)
            .with_context(|| format!("Failed to write {:?}", settings_path))?;
        Ok(())
    }

    /// Full path of the DuckDB file
    pub fn db_path(&self, data_dir: &Path) -> PathBuf {
        data_dir.join(&self.db_file)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_defaults_without_settings_file() {
        let dir = tempdir().unwrap();
        let config = Config::load(dir.path()).unwrap();
        assert_eq!(config.http_port, DEFAULT_HTTP_PORT);
        assert_eq!(config.rpc_port, DEFAULT_RPC_PORT);
        assert_eq!(config.db_file, DEFAULT_DB_FILE);
    }

    #[test]
    fn test_settings_file_values() {
        let dir = tempdir().unwrap();
        std::fs::write(
            dir.path().join("settings.json"),
            r#"{"server": {"httpPort": 8080, "rpcPort": 9090}, "storage": {"dbFile": "x.duckdb"}}"#,
        )
        .unwrap();

        let config = Config::load(dir.path()).unwrap();
        assert_eq!(config.http_port, 8080);
        assert_eq!(config.rpc_port, 9090);
        assert_eq!(config.db_path(dir.path()), dir.path().join("x.duckdb"));
    }

    #[test]
    fn test_save_preserves_unknown_keys() {
        let dir = tempdir().unwrap();
        std::fs::write(
            dir.path().join("settings.json"),
            r#"{"theme": "dark", "server": {"httpPort": 8080, "motd": "hi"}}"#,
        )
        .unwrap();

        let mut config = Config::load(dir.path()).unwrap();
        config.rpc_port = 5000;
        config.save(dir.path()).unwrap();

        let saved: serde_json::Value = serde_json::from_str(
            &std::fs::read_to_string(dir.path().join("settings.json")).unwrap(),
        )
        .unwrap();
        assert_eq!(saved["theme"], "dark");
        assert_eq!(saved["server"]["motd"], "hi");
        assert_eq!(saved["server"]["rpcPort"], 5000);
        assert_eq!(saved["server"]["httpPort"], 8080);
    }

    #[test]
    fn test_save_refuses_to_overwrite_broken_file() {
        let dir = tempdir().unwrap();
        let config = Config::load(dir.path()).unwrap();

        let path = dir.path().join("settings.json");
        std::fs::write(&path, "{ not json").unwrap();

        let err = config.save(dir.path()).unwrap_err();
        assert!(format!("{:#}", err).contains("Invalid settings file"));
        assert_eq!(std::fs::read_to_string(&path).unwrap(), "{ not json");
    }

    #[test]
    fn test_save_creates_missing_directory() {
        let dir = tempdir().unwrap();
        let nested = dir.path().join("fresh");

        let mut config = Config::default();
        config.storage = StorageBackend::Duckdb;
        config.save(&nested).unwrap();

        assert_eq!(Config::load_file(&nested).unwrap().storage, StorageBackend::Duckdb);
    }

    #[test]
    fn test_storage_backend_parsing() {
        assert_eq!("duckdb".parse::<StorageBackend>().unwrap(), StorageBackend::Duckdb);
        assert_eq!("Memory".parse::<StorageBackend>().unwrap(), StorageBackend::Memory);
        assert!("postgres".parse::<StorageBackend>().is_err());
    }
}
