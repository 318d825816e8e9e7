//! CLI argument definitions using clap
//!
//! Commands:
//! - carros serve [--config <path>] [--port <port>]
//! - carros check-config --config <path>

use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// carros - In-memory vehicle registry over HTTP
#[derive(Parser, Debug)]
#[command(name = "carros")]
#[command(version, about, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Start the HTTP server
    Serve {
        /// Path to configuration file (defaults apply when omitted)
        #[arg(long)]
        config: Option<PathBuf>,

        /// Port to listen on, overriding the configuration file
        #[arg(long)]
        port: Option<u16>,
    },

    /// Validate a configuration file and print the effective settings
    CheckConfig {
        /// Path to configuration file
        #[arg(long, default_value = "./carros.json")]
        config: PathBuf,
    },
}

impl Cli {
    /// Parse command line arguments
    pub fn parse_args() -> Self {
        Cli::parse()
    }
}
