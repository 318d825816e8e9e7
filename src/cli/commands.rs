//! CLI command implementations
//!
//! `serve` boots in a fixed order: configuration, logging, store, runtime,
//! server. Nothing is started before configuration validates.

use std::path::Path;
use std::sync::Arc;

use tracing::info;

use super::args::Command;
use super::config::Config;
use super::errors::{CliError, CliResult};
use crate::http_server::HttpServer;
use crate::logging::init_logging;
use crate::store::BinaryCarroStore;

/// Main CLI entry point
///
/// Parses arguments and dispatches to the appropriate command.
/// This is the only function that main.rs should call.
pub fn run() -> CliResult<()> {
    let cli = super::args::Cli::parse_args();
    run_command(cli.command)
}

/// Run the appropriate command based on CLI args
pub fn run_command(cmd: Command) -> CliResult<()> {
    match cmd {
        Command::Serve { config, port } => serve(config.as_deref(), port),
        Command::CheckConfig { config } => check_config(&config),
    }
}

/// Resolve the effective configuration for `serve`.
pub fn effective_config(config_path: Option<&Path>, port: Option<u16>) -> CliResult<Config> {
    let mut config = Config::load_or_default(config_path)?;

    if let Some(port) = port {
        if port == 0 {
            return Err(CliError::config_error("--port must be > 0"));
        }
        config.http.port = port;
    }

    Ok(config)
}

/// Start the HTTP server over a fresh in-memory store.
pub fn serve(config_path: Option<&Path>, port: Option<u16>) -> CliResult<()> {
    let config = effective_config(config_path, port)?;

    init_logging(config.log_level);
    info!(addr = %config.http.socket_addr(), compression = config.http.compression, "booting carros");

    let repository = Arc::new(BinaryCarroStore::new());
    let server = HttpServer::with_config(config.http, repository);

    let rt = tokio::runtime::Runtime::new()
        .map_err(|e| CliError::boot_failed(format!("Failed to create tokio runtime: {}", e)))?;

    rt.block_on(async {
        server
            .start()
            .await
            .map_err(|e| CliError::boot_failed(format!("HTTP server failed: {}", e)))
    })
}

/// Validate a configuration file and print the effective settings.
pub fn check_config(config_path: &Path) -> CliResult<()> {
    let config = Config::load(config_path)?;
    let rendered = serde_json::to_string_pretty(&config)
        .map_err(|e| CliError::io_error(format!("JSON error: {}", e)))?;
    println!("{}", rendered);
    Ok(())
}
