//! Command-line interface for Courtdesk.

mod commands;

use clap::{Parser, Subcommand};

use crate::constants::limits::DEFAULT_HISTORY_LIMIT;

/// Courtdesk - court case lookup with an assistant on the side
#[derive(Parser)]
#[command(name = "courtdesk")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Start the web server (default)
    #[command(alias = "web")]
    Serve,

    /// Create default config file
    #[command(alias = "--init")]
    Init,

    /// Show recent case lookups from the query log
    #[command(alias = "h")]
    History {
        /// Number of entries to show
        #[arg(default_value_t = DEFAULT_HISTORY_LIMIT)]
        limit: u64,

        /// Only show lookups with this status (success, error, failed)
        #[arg(long)]
        status: Option<String>,
    },
}

pub use commands::*;
