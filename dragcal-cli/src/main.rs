mod commands;
mod render;

use std::path::PathBuf;

use anyhow::Result;
use clap::{Parser, Subcommand};
use dragcal_core::{DragCalConfig, Session};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "dragcal")]
#[command(about = "Place, create, and delete calendar events from the terminal")]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Start an interactive session (default)
    Repl,
    /// Apply a JSON-lines script of interactions and print the calendar
    Replay {
        /// Path to the script
        file: PathBuf,

        /// Print the resulting events, templates and form state as JSON
        #[arg(long)]
        json: bool,
    },
    /// Show the config file location and resolved settings
    Config,
}

fn main() -> Result<()> {
    // Diagnostics go to stderr; RUST_LOG=debug shows every interaction.
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")))
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    match cli.command.unwrap_or(Commands::Repl) {
        Commands::Repl => commands::repl::run(new_session()?),
        Commands::Replay { file, json } => commands::replay::run(new_session()?, &file, json),
        Commands::Config => commands::config::run(),
    }
}

fn new_session() -> Result<Session> {
    let config = DragCalConfig::load()?;
    Ok(Session::from_config(&config)?)
}
