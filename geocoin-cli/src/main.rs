//! Geocoin CLI - play the coin-caching game from a terminal.
//!
//! The binary is a thin frontend over the `geocoin` library: it implements
//! the two collaborator traits (a console world view and a JSON-file
//! key-value store) and forwards typed commands to the game session.

mod commands;
mod store;
mod view;

use std::path::PathBuf;
use std::process;

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "geocoin", about = "Grid-based coin-caching game", version)]
struct Cli {
    /// Directory holding the saved game (defaults to the platform data dir).
    #[arg(long, global = true)]
    data_dir: Option<PathBuf>,

    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand)]
enum Command {
    /// Play the game (the default when no command is given).
    Play(commands::play::PlayArgs),
    /// Delete all saved game state.
    Reset,
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")))
        .init();

    let cli = Cli::parse();
    let data_dir = cli.data_dir.unwrap_or_else(default_data_dir);

    let result = match cli.command {
        Some(Command::Play(args)) => commands::play::run(&data_dir, &args),
        Some(Command::Reset) => commands::reset::run(&data_dir),
        None => commands::play::run(&data_dir, &commands::play::PlayArgs::default()),
    };

    if let Err(e) = result {
        eprintln!("error: {e}");
        process::exit(1);
    }
}

/// Platform data directory for the saved game, current directory fallback.
fn default_data_dir() -> PathBuf {
    dirs::data_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("geocoin")
}
