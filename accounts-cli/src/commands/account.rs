//! Account commands - the five registry operations, over HTTP or RPC

use accounts_core::client::{AccountClient, HttpAccountClient, RpcAccountClient};
use anyhow::Result;
use colored::Colorize;
use dialoguer::Confirm;

use super::{get_config, log_command};
use crate::output;
use crate::{ClientArgs, Transport};

fn connect(args: &ClientArgs, command: &str) -> Result<Box<dyn AccountClient>> {
    log_command(command);

    let port = match args.port {
        Some(port) => port,
        None => {
            let config = get_config()?;
            match args.transport {
                Transport::Http => config.http_port,
                Transport::Rpc => config.rpc_port,
            }
        }
    };

    let client: Box<dyn AccountClient> = match args.transport {
        Transport::Http => Box::new(HttpAccountClient::for_host(&args.host, port)?),
        Transport::Rpc => Box::new(RpcAccountClient::for_host(&args.host, port)?),
    };
    Ok(client)
}

/// Print the outcome of a mutating command
fn report(args: &ClientArgs, message: &str) {
    if args.json {
        println!("{}", serde_json::json!({"ok": true}));
    } else {
        output::success(message);
    }
}

pub fn create(args: &ClientArgs, name: &str, amount: i64) -> Result<()> {
    connect(args, "create")?.create(name, amount)?;
    report(args, &format!("Created account '{}'", name));
    Ok(())
}

pub fn get(args: &ClientArgs, name: &str) -> Result<()> {
    let account = connect(args, "get")?.get(name)?;

    if args.json {
        println!("{}", serde_json::to_string_pretty(&account)?);
        return Ok(());
    }

    let mut table = output::create_table();
    table.set_header(vec!["Name", "Amount"]);
    table.add_row(vec![account.name, account.amount.to_string()]);
    println!("{}", table);
    Ok(())
}

pub fn delete(args: &ClientArgs, name: &str, force: bool) -> Result<()> {
    if !force && !args.json {
        let confirmed = Confirm::new()
            .with_prompt(format!("Delete account '{}'?", name))
            .default(false)
            .interact()?;
        if !confirmed {
            println!("{}", "Cancelled.".dimmed());
            return Ok(());
        }
    }

    connect(args, "delete")?.delete(name)?;
    report(args, &format!("Deleted account '{}'", name));
    Ok(())
}

pub fn change_amount(args: &ClientArgs, name: &str, amount: i64) -> Result<()> {
    connect(args, "change-amount")?.change_amount(name, amount)?;
    report(args, &format!("Set amount of '{}' to {}", name, amount));
    Ok(())
}

pub fn change_name(args: &ClientArgs, name: &str, new_name: &str) -> Result<()> {
    connect(args, "change-name")?.change_name(name, new_name)?;
    report(args, &format!("Renamed '{}' to '{}'", name, new_name));
    Ok(())
}
