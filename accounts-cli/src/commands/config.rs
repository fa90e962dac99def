//! Config command - show and edit settings.json

use accounts_core::config::{Config, StorageBackend};
use anyhow::Result;
use clap::Subcommand;
use colored::Colorize;

use super::get_accounts_dir;
use crate::output;

#[derive(Subcommand)]
pub enum ConfigCommands {
    /// Show the effective settings (file plus environment)
    Show {
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },
    /// Change settings in settings.json
    Set {
        #[arg(long)]
        host: Option<String>,
        #[arg(long)]
        http_port: Option<u16>,
        #[arg(long)]
        rpc_port: Option<u16>,
        /// Storage backend (memory, duckdb)
        #[arg(long)]
        storage: Option<StorageBackend>,
        /// DuckDB file name inside the accounts directory
        #[arg(long)]
        db_file: Option<String>,
    },
}

pub fn run(command: ConfigCommands) -> Result<()> {
    let data_dir = get_accounts_dir()?;

    match command {
        ConfigCommands::Show { json } => {
            let config = Config::load(&data_dir)?;
            let db_path = config.db_path(&data_dir);

            if json {
                println!(
                    "{}",
                    serde_json::json!({
                        "host": config.host,
                        "http_port": config.http_port,
                        "rpc_port": config.rpc_port,
                        "storage": config.storage.to_string(),
                        "db_path": db_path.to_string_lossy(),
                    })
                );
                return Ok(());
            }

            let mut table = output::create_table();
            table.set_header(vec!["Setting", "Value"]);
            table.add_row(vec!["host".to_string(), config.host.clone()]);
            table.add_row(vec!["httpPort".to_string(), config.http_port.to_string()]);
            table.add_row(vec!["rpcPort".to_string(), config.rpc_port.to_string()]);
            table.add_row(vec!["storage".to_string(), config.storage.to_string()]);
            table.add_row(vec!["database".to_string(), db_path.display().to_string()]);
            println!("{}", table);
        }
        ConfigCommands::Set {
            host,
            http_port,
            rpc_port,
            storage,
            db_file,
        } => {
            let mut config = Config::load_file(&data_dir)?;
            let mut changed = false;

            if let Some(host) = host {
                config.host = host;
                changed = true;
            }
            if let Some(port) = http_port {
                config.http_port = port;
                changed = true;
            }
            if let Some(port) = rpc_port {
                config.rpc_port = port;
                changed = true;
            }
            if let Some(storage) = storage {
                config.storage = storage;
                changed = true;
            }
            if let Some(db_file) = db_file {
                config.db_file = db_file;
                changed = true;
            }

            if !changed {
                println!("{}", "Nothing to change.".dimmed());
                return Ok(());
            }

            config.save(&data_dir)?;
            output::success(&format!(
                "Saved {}",
                data_dir.join("settings.json").display()
            ));
        }
    }

    Ok(())
}
