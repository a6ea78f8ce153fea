//! Command-line interface for tend
//!
//! This module defines the CLI structure using clap derive macros.
//! Each subcommand is defined in its own submodule.

use clap::{Parser, Subcommand};

use crate::config::Config;
use crate::error::Result;
use crate::output::OutputOptions;

mod check;
mod init;
mod run;

/// tend - markdown task vault keeper
///
/// Tends a directory tree of markdown task files: parses frontmatter,
/// plans lifecycle transitions, applies retention, and archives retired
/// projects.
#[derive(Parser, Debug)]
#[command(name = "tend")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Path to the configuration file (defaults to ./tend.toml)
    #[arg(long, global = true, env = "TEND_CONFIG")]
    pub config: Option<std::path::PathBuf>,

    /// Output in JSON format
    #[arg(long, global = true)]
    pub json: bool,

    /// Suppress non-essential output
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

/// Available subcommands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Create the vault directory skeleton and a starter configuration
    Init {
        /// Vault root directory (defaults to the current directory)
        #[arg(long)]
        root: Option<std::path::PathBuf>,
    },

    /// Parse and validate every task file without changing anything
    Check,

    /// Run one batch pass: completed store first, then active store
    Run {
        /// Plan transitions without applying them
        #[arg(long)]
        dry_run: bool,
    },
}

impl Cli {
    pub fn run(self) -> Result<()> {
        let options = OutputOptions {
            json: self.json,
            quiet: self.quiet,
        };

        match &self.command {
            Commands::Init { root } => init::execute(self.config.as_deref(), root.clone(), options),
            Commands::Check => {
                let config = self.load_config()?;
                check::execute(&config, options)
            }
            Commands::Run { dry_run } => {
                let config = self.load_config()?;
                run::execute(&config, *dry_run, options)
            }
        }
    }

    fn load_config(&self) -> Result<Config> {
        Config::resolve(self.config.as_deref())
    }
}
