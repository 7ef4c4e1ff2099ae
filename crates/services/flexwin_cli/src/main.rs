// --- File: crates/services/flexwin_cli/src/main.rs ---
//! `flexwin-cli <operation> key=value ...`
//!
//! Loads the configuration, runs one gateway operation and prints the decoded
//! reply one `key=value` per line.

use std::process::ExitCode;
use std::sync::Arc;

use flexwin_client::{FlexwinClient, FlexwinRequest, Operation};
use flexwin_config::load_config;
use tracing::error;

const USAGE: &str = "usage: flexwin-cli <operation> [key=value ...]
operations: createTicket, authorizeTicket, captureTransaction,
            refundTransaction, cancelTransaction, deleteTicket";

fn parse_args(args: &[String]) -> Result<(Operation, FlexwinRequest), String> {
    let (operation, pairs) = args.split_first().ok_or_else(|| USAGE.to_string())?;
    let operation: Operation = operation.parse().map_err(|e| format!("{e}\n{USAGE}"))?;

    let mut request = FlexwinRequest::new();
    for pair in pairs {
        let (key, value) = pair
            .split_once('=')
            .ok_or_else(|| format!("expected key=value, got '{pair}'"))?;
        request = request.field(key, value);
    }
    Ok((operation, request))
}

#[tokio::main]
async fn main() -> ExitCode {
    let args: Vec<String> = std::env::args().skip(1).collect();
    let (operation, request) = match parse_args(&args) {
        Ok(parsed) => parsed,
        Err(message) => {
            eprintln!("{message}");
            return ExitCode::from(2);
        }
    };

    let config = match load_config() {
        Ok(config) => config,
        Err(e) => {
            eprintln!("Failed to load config: {e}");
            return ExitCode::FAILURE;
        }
    };
    flexwin_common::init_from_config(config.logging.level.as_deref());

    let client = match FlexwinClient::new(Arc::new(config.flexwin)) {
        Ok(client) => client,
        Err(e) => {
            error!("{}", e);
            return ExitCode::FAILURE;
        }
    };

    match client.execute(operation, request).await {
        Ok(reply) => {
            for (key, value) in reply.iter() {
                match value {
                    Some(value) => println!("{key}={value}"),
                    None => println!("{key}"),
                }
            }
            ExitCode::SUCCESS
        }
        Err(e) => {
            error!("{} failed: {}", operation, e);
            if let Some(body) = e.body() {
                eprintln!("{body}");
            }
            ExitCode::FAILURE
        }
    }
}
