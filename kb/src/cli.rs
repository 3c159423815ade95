//! CLI command definitions and subcommands

use boardstore::Status;
use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// Kanboard - three-column task board
#[derive(Parser, Debug)]
#[command(name = "kb")]
#[command(author, version, about = "Three-column task board for the terminal", long_about = None)]
pub struct Cli {
    /// Path to config file
    #[arg(short, long, global = true, help = "Path to config file")]
    pub config: Option<PathBuf>,

    /// Log level (TRACE, DEBUG, INFO, WARN, ERROR)
    #[arg(
        short = 'l',
        long = "log-level",
        global = true,
        help = "Log level (TRACE, DEBUG, INFO, WARN, ERROR)"
    )]
    pub log_level: Option<String>,

    /// Board snapshot file (overrides storage.path from config)
    #[arg(short, long, global = true)]
    pub board: Option<PathBuf>,

    /// Subcommand to execute; the board UI opens when omitted
    #[command(subcommand)]
    pub command: Option<Command>,
}

/// CLI subcommands
#[derive(Debug, Subcommand)]
pub enum Command {
    /// Print the board
    Show {
        /// Only print one column (todo, progress, done)
        #[arg(short, long, value_parser = parse_status)]
        status: Option<Status>,
    },

    /// Create a card at the end of the to-do column
    Add {
        /// Card title
        title: String,

        /// Card description
        #[arg(short, long, default_value = "")]
        description: String,
    },

    /// Move a card to a column
    Mv {
        /// Card ID
        id: String,

        /// Destination column (todo, progress, done)
        #[arg(value_parser = parse_status)]
        status: Status,

        /// Index within the destination column (appends when omitted)
        #[arg(short, long)]
        index: Option<usize>,
    },

    /// Verify the stored snapshot parses, without creating one
    Check,

    /// Renumber card positions in every column
    Repair,

    /// Replace the board with the default cards
    Reset,

    /// Show the remote database handle configuration
    Remote,

    /// Print the effective configuration
    Config,
}

fn parse_status(s: &str) -> Result<Status, String> {
    s.parse()
}
