//! Command-line interface definitions using clap

use clap::{Parser, Subcommand};

/// Linkhub - shortcut and collection manager
#[derive(Parser)]
#[command(name = "linkhub")]
#[command(version)]
#[command(about = "Self-hosted shortcut and collection manager", long_about = None)]
pub struct Cli {
    /// Path to the TOML configuration file
    #[arg(long, short = 'c', global = true, default_value = "config.toml")]
    pub config: String,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

/// Available commands
#[derive(Subcommand, Debug, PartialEq)]
pub enum Commands {
    /// Start the HTTP server (default)
    Serve,

    /// Write a sample configuration file
    GenerateConfig {
        /// Output path
        #[arg(default_value = "config.example.toml")]
        output: String,

        /// Overwrite an existing file
        #[arg(long)]
        force: bool,
    },
}
