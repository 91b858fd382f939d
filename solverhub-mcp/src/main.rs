//! SolverHub MCP Server
//!
//! Line-delimited JSON-RPC 2.0 over stdio. stdout carries protocol
//! messages only; logs go to stderr.
//!
//! Tools:
//! - convert: Convert a value between units of a category
//! - format_conversion: Convert and render for display
//! - list_categories: List unit categories
//! - list_units: List units of a category
//! - help: Documentation for a tool

mod config;
mod server;

use std::io::{self, BufRead, IsTerminal, Write};
use tracing::{debug, error, info, warn};

use config::ServerConfig;
use server::{Server, PROTOCOL_VERSION, SERVER_VERSION};

fn main() {
    let (config, warnings) = ServerConfig::from_env();

    tracing_subscriber::fmt()
        .with_writer(io::stderr)
        .with_max_level(config.log_level)
        .with_ansi(io::stderr().is_terminal())
        .init();

    for warning in &warnings {
        warn!("{}", warning);
    }

    let server = Server::new(&config);

    info!(version = SERVER_VERSION, protocol = PROTOCOL_VERSION, "SolverHub MCP server started");
    debug!(?config, "configuration");

    let stdin = io::stdin();
    let mut reader = io::BufReader::new(stdin.lock());

    loop {
        let mut line = String::new();
        match reader.read_line(&mut line) {
            Ok(0) => {
                info!("client disconnected (EOF)");
                break;
            }
            Ok(_) => {
                let Some(response) = server.handle_line(&line) else {
                    continue;
                };

                let response_json = match serde_json::to_string(&response) {
                    Ok(json) => json,
                    Err(e) => {
                        error!(error = %e, "failed to serialize response");
                        continue;
                    }
                };

                let mut stdout = io::stdout().lock();
                if let Err(e) = writeln!(stdout, "{}", response_json).and_then(|_| stdout.flush()) {
                    error!(error = %e, "failed to write response");
                    break;
                }
            }
            Err(e) => {
                error!(error = %e, "failed to read input");
                break;
            }
        }
    }

    info!("server shutting down");
}
