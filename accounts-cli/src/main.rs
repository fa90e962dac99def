//! Accounts CLI - run the account registry servers and talk to them

use std::process::ExitCode;

use anyhow::Result;
use clap::{Parser, Subcommand, ValueEnum};

mod commands;
mod output;

use commands::{account, config, logs, serve};

/// Accounts - a minimal account registry
#[derive(Parser)]
#[command(name = "accounts", version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

/// Which front-end to serve or talk to
#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
pub enum Transport {
    Http,
    Rpc,
}

/// Which front-ends `serve` starts
#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
pub enum ServeTarget {
    Http,
    Rpc,
    /// Both front-ends in one process over one store
    All,
}

/// Connection options shared by every client command
#[derive(clap::Args, Debug, Clone)]
pub struct ClientArgs {
    /// Protocol used to reach the server
    #[arg(long, value_enum, default_value = "http")]
    pub transport: Transport,
    /// Server host
    #[arg(long, default_value = "127.0.0.1")]
    pub host: String,
    /// Server port (defaults to the configured port for the transport)
    #[arg(long)]
    pub port: Option<u16>,
    /// Output as JSON
    #[arg(long)]
    pub json: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Start a server
    Serve {
        /// Front-end(s) to start
        #[arg(value_enum)]
        target: ServeTarget,
        /// Address to bind
        #[arg(long)]
        host: Option<String>,
        /// Port for the HTTP front-end
        #[arg(long)]
        http_port: Option<u16>,
        /// Port for the RPC front-end
        #[arg(long)]
        rpc_port: Option<u16>,
        /// Storage backend (memory, duckdb)
        #[arg(long)]
        storage: Option<String>,
    },

    /// Create an account
    Create {
        #[arg(long)]
        name: String,
        #[arg(long, allow_negative_numbers = true)]
        amount: i64,
        #[command(flatten)]
        client: ClientArgs,
    },

    /// Show an account
    Get {
        #[arg(long)]
        name: String,
        #[command(flatten)]
        client: ClientArgs,
    },

    /// Delete an account
    Delete {
        #[arg(long)]
        name: String,
        /// Skip confirmation prompt
        #[arg(long, short)]
        force: bool,
        #[command(flatten)]
        client: ClientArgs,
    },

    /// Set an account's amount
    ChangeAmount {
        #[arg(long)]
        name: String,
        #[arg(long, allow_negative_numbers = true)]
        amount: i64,
        #[command(flatten)]
        client: ClientArgs,
    },

    /// Rename an account
    ChangeName {
        #[arg(long)]
        name: String,
        #[arg(long)]
        new_name: String,
        #[command(flatten)]
        client: ClientArgs,
    },

    /// Show or change settings
    Config {
        #[command(subcommand)]
        command: config::ConfigCommands,
    },

    /// View and manage the event log
    Logs {
        #[command(subcommand)]
        command: logs::LogsCommands,
    },
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    let result = run(cli);

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            output::error(&format!("{:#}", e));
            ExitCode::FAILURE
        }
    }
}

fn run(cli: Cli) -> Result<()> {
    match cli.command {
        Commands::Serve { target, host, http_port, rpc_port, storage } => serve::run(
            target,
            serve::ServeOptions { host, http_port, rpc_port, storage },
        ),
        Commands::Create { name, amount, client } => account::create(&client, &name, amount),
        Commands::Get { name, client } => account::get(&client, &name),
        Commands::Delete { name, force, client } => account::delete(&client, &name, force),
        Commands::ChangeAmount { name, amount, client } => {
            account::change_amount(&client, &name, amount)
        }
        Commands::ChangeName { name, new_name, client } => {
            account::change_name(&client, &name, &new_name)
        }
        Commands::Config { command } => config::run(command),
        Commands::Logs { command } => logs::run(command),
    }
}
