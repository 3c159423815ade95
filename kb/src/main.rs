//! Kanboard - three-column task board
//!
//! CLI entry point. Without a subcommand the interactive board opens.

use std::fs;
use std::path::PathBuf;
use std::time::Duration;

use boardstore::{BoardStore, FileStorage, Status, Storage};
use clap::Parser;
use colored::*;
use eyre::{Context, Result};
use tracing::{debug, info};

use kanboard::cli::{Cli, Command};
use kanboard::config::Config;
use kanboard::render;
use kanboard::tui;

fn setup_logging(cli_log_level: Option<&str>, config_log_level: Option<&str>) -> Result<()> {
    // Logging isn't initialized yet, so nothing can be logged in here until the end
    let log_dir = dirs::data_local_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("kanboard")
        .join("logs");

    fs::create_dir_all(&log_dir).context("Failed to create log directory")?;

    // Priority: CLI --log-level > config file > default (INFO)
    let level = match cli_log_level.or(config_log_level) {
        Some(s) => match s.to_uppercase().as_str() {
            "TRACE" => tracing::Level::TRACE,
            "DEBUG" => tracing::Level::DEBUG,
            "INFO" => tracing::Level::INFO,
            "WARN" | "WARNING" => tracing::Level::WARN,
            "ERROR" => tracing::Level::ERROR,
            _ => {
                eprintln!("Warning: Unknown log-level '{}', defaulting to INFO", s);
                tracing::Level::INFO
            }
        },
        None => tracing::Level::INFO,
    };

    let log_file = fs::File::create(log_dir.join("kanboard.log")).context("Failed to create log file")?;

    tracing_subscriber::fmt()
        .with_writer(log_file)
        .with_ansi(false)
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env().add_directive(level.into()))
        .init();

    info!("Logging initialized (level: {:?})", level);
    Ok(())
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Load log level from config file early (before full config load)
    let config_log_level = Config::load_log_level(cli.config.as_ref());
    setup_logging(cli.log_level.as_deref(), config_log_level.as_deref()).context("Failed to setup logging")?;

    let mut config = Config::load(cli.config.as_ref()).context("Failed to load configuration")?;
    if let Some(board) = &cli.board {
        config.storage.path = board.clone();
    }
    info!(path = %config.storage.path.display(), compaction = ?config.board.compaction, "Kanboard loaded config");

    debug!(command = ?cli.command, "main: dispatching command");
    match cli.command {
        Some(Command::Show { status }) => {
            debug!(?status, "main: matched Show command");
            let store = open_store(&config)?;
            print!("{}", render::render_board(store.cards(), status));
            Ok(())
        }
        Some(Command::Add { title, description }) => {
            debug!(%title, "main: matched Add command");
            cmd_add(&mut open_store(&config)?, &title, &description)
        }
        Some(Command::Mv { id, status, index }) => {
            debug!(%id, %status, ?index, "main: matched Mv command");
            cmd_mv(&mut open_store(&config)?, &id, status, index)
        }
        Some(Command::Check) => cmd_check(&config),
        Some(Command::Repair) => {
            let mut store = open_store(&config)?;
            store.repair().context("Failed to repair board")?;
            println!("{} Renumbered {} cards", "✓".green(), store.len());
            Ok(())
        }
        Some(Command::Reset) => {
            let mut store = open_store(&config)?;
            store.reset().context("Failed to reset board")?;
            println!("{} Board reset to {} default cards", "✓".green(), store.len());
            Ok(())
        }
        Some(Command::Remote) => cmd_remote(&config),
        Some(Command::Config) => {
            print!("{}", config.to_yaml()?);
            Ok(())
        }
        None => {
            debug!("main: no command, launching TUI");
            let store = open_store(&config)?;
            tui::run(store, Duration::from_millis(config.tui.tick_rate_ms)).await
        }
    }
}

fn open_store(config: &Config) -> Result<BoardStore<FileStorage>> {
    let storage = FileStorage::new(&config.storage.path);
    BoardStore::open(storage, config.board.compaction)
        .context(format!("Failed to open board at {}", config.storage.path.display()))
}

fn cmd_add(store: &mut BoardStore<FileStorage>, title: &str, description: &str) -> Result<()> {
    let card = store.create(title, description).context("Failed to create card")?;
    println!(
        "{} Created card {} in {}",
        "✓".green(),
        card.id.cyan(),
        Status::Todo.title()
    );
    Ok(())
}

fn cmd_mv(store: &mut BoardStore<FileStorage>, id: &str, status: Status, index: Option<usize>) -> Result<()> {
    if store.move_card(id, status, index).context("Failed to move card")? {
        println!("{} Moved card {} to {}", "✓".green(), id.cyan(), status.title());
    } else {
        println!("{} No card with id {}", "✗".yellow(), id);
    }
    Ok(())
}

/// Validate the stored snapshot; never seeds or writes
fn cmd_check(config: &Config) -> Result<()> {
    let storage = FileStorage::new(&config.storage.path);
    let location = storage.describe();
    let cards = BoardStore::inspect(&storage).context(format!("Board snapshot at {} is not valid", location))?;
    match cards {
        Some(cards) => println!("{} {} cards in {}", "✓".green(), cards.len(), location),
        None => println!("{} No board at {}", "✗".yellow(), location),
    }
    Ok(())
}

fn cmd_remote(config: &Config) -> Result<()> {
    let remote = config.remote.resolve();
    let show = |name: &str, value: &Option<String>| match value {
        Some(v) => println!("  {} = {}", name, v.cyan()),
        None => println!("  {} {}", name, "(unset)".dimmed()),
    };

    println!("{}", "Remote database handle".bold());
    show(&config.remote.endpoint_env, &remote.endpoint);
    show(&config.remote.project_env, &remote.project_id);
    if remote.is_configured() {
        println!("{} configured (not contacted)", "✓".green());
    } else {
        println!("{} not configured", "✗".yellow());
    }
    Ok(())
}
