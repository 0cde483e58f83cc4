//! Command-line interface

use std::path::PathBuf;

use clap::{Parser, Subcommand};

#[derive(Parser, Debug)]
#[command(name = "registrar")]
#[command(version, about = "Check domain availability and register domains on a schedule")]
pub struct Cli {
    /// Configuration file (TOML or JSON). Without it, the environment is
    /// tried first and then the standard file locations.
    #[arg(short, long, env = "REGISTRAR_CONFIG")]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Option<Command>,
}

#[derive(Subcommand, Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// Check availability of the given domains without registering them
    Check {
        #[arg(required = true)]
        domains: Vec<String>,
    },
    /// Check the given domains and register the available ones once
    Register {
        #[arg(required = true)]
        domains: Vec<String>,
        /// Extra registration fields: an inline JSON object or a path to a
        /// JSON file. Defaults to no extra fields.
        #[arg(short, long)]
        detail: Option<String>,
    },
    /// Run every configured schedule until interrupted (default)
    Run,
}

impl Cli {
    pub fn command(&self) -> Command {
        self.command.clone().unwrap_or(Command::Run)
    }
}
