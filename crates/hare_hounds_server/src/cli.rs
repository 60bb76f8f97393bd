//! Command-line interface for the hare_hounds server.

use std::path::PathBuf;

use clap::{Parser, Subcommand};

/// Hare and Hounds - REST game server
#[derive(Parser, Debug)]
#[command(name = "hare_hounds")]
#[command(about = "Hare and Hounds game server", long_about = None)]
#[command(version)]
pub struct Cli {
    /// Subcommand to run
    #[command(subcommand)]
    pub command: Command,
}

/// Available commands
#[derive(Subcommand, Debug)]
pub enum Command {
    /// Run the HTTP game server
    Serve {
        /// TOML configuration file
        #[arg(short, long)]
        config: Option<PathBuf>,

        /// Host to bind to
        #[arg(long)]
        host: Option<String>,

        /// Port to bind to
        #[arg(short, long)]
        port: Option<u16>,

        /// Path to the database file (created if it doesn't exist)
        #[arg(long)]
        db: Option<String>,

        /// Keep games in memory instead of a database
        #[arg(long, conflicts_with = "db")]
        in_memory: bool,
    },

    /// Apply pending database migrations and exit
    Migrate {
        /// Path to the database file (created if it doesn't exist)
        #[arg(long)]
        db: Option<String>,
    },
}
