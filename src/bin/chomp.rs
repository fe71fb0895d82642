//! Chomp CLI - self-play training for matchbox-style learning agents
//!
//! Subcommands:
//! - `train` runs a self-play session and writes win-ratio and playbook exports
//! - `board` replays a move list and prints the resulting board

use anyhow::Result;
use clap::{Parser, Subcommand};

#[derive(Parser)]
#[command(name = "chomp")]
#[command(version, about = "Self-play learning for the game of Chomp", long_about = None)]
struct Cli {
    /// Enable debug logging (RUST_LOG overrides)
    #[arg(long, short = 'v', global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Train agents against each other
    Train(Box<chomp::cli::commands::train::TrainArgs>),

    /// Print a board after a sequence of moves
    Board(chomp::cli::commands::board::BoardArgs),
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let level = if cli.verbose { "debug" } else { "info" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(level)).init();

    match cli.command {
        Commands::Train(args) => chomp::cli::commands::train::execute(*args),
        Commands::Board(args) => chomp::cli::commands::board::execute(args),
    }
}
