//! CLI argument parsing module for buddy-bot

use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// Dependency update bot core
#[derive(Parser, Debug, Clone)]
#[command(
    name = "buddy-bot",
    version,
    about = "Plan dependency update pull requests and review existing ones"
)]
pub struct CliArgs {
    /// Enable debug logging
    #[arg(long, global = true)]
    pub debug: bool,

    /// Config file (default: ./buddy-bot.toml when present)
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    /// Subcommand to execute
    #[command(subcommand)]
    pub command: Command,
}

/// Available subcommands
#[derive(Subcommand, Debug, Clone)]
pub enum Command {
    /// Classify, dedupe and group resolved dependencies into pull requests
    Plan {
        /// JSON array of dependencies with their resolved `new_version`
        input: PathBuf,

        /// Output results in JSON format
        #[arg(long)]
        json: bool,

        /// Override the configured branch prefix
        #[arg(long)]
        branch_prefix: Option<String>,
    },

    /// Print the updates and file paths recovered from a pull request body
    Decode {
        /// Markdown body of the pull request
        body: PathBuf,

        /// Output results in JSON format
        #[arg(long)]
        json: bool,
    },

    /// Decide whether a pull request should be auto-closed (exit 2 if so)
    Check {
        /// Markdown body of the pull request
        body: PathBuf,

        /// Output results in JSON format
        #[arg(long)]
        json: bool,
    },

    /// Print the rendered pull request bodies for resolved dependencies
    Render {
        /// JSON array of dependencies with their resolved `new_version`
        input: PathBuf,
    },
}
