//! Chess Party CLI - headless self-play and tournaments.

// Allow print in the CLI binary
#![allow(clippy::print_stdout, clippy::print_stderr)]

mod cli;

use std::path::PathBuf;
use std::process::ExitCode;

use chess_party::simulation::DEFAULT_MAX_MOVES;
use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

/// Chess Party - chess with random events
#[derive(Parser, Debug)]
#[command(name = "chess-party")]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Log engine events to stderr (repeat for more detail)
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    verbose: u8,

    #[command(subcommand)]
    command: Commands,
}

/// Available commands
#[derive(Subcommand, Debug)]
enum Commands {
    /// Play a single seeded self-play game
    Play {
        /// Random seed (default: random)
        #[arg(short, long)]
        seed: Option<u64>,

        /// Maximum moves (default: 500)
        #[arg(short, long, default_value_t = DEFAULT_MAX_MOVES)]
        max_moves: u32,

        /// JSON rules file
        #[arg(short, long)]
        config: Option<PathBuf>,

        /// Output format: text or json
        #[arg(short, long, default_value = "text")]
        format: cli::OutputFormat,

        /// Suppress move-by-move output
        #[arg(short, long)]
        quiet: bool,
    },

    /// Run mass parallel games and aggregate statistics
    Tournament {
        /// Number of games to run (default: 1000)
        #[arg(short, long, default_value = "1000")]
        games: u64,

        /// Starting seed (increments for each game)
        #[arg(short, long)]
        seed: Option<u64>,

        /// Parallel threads (default: CPU count)
        #[arg(short = 'j', long)]
        threads: Option<usize>,

        /// Maximum moves per game (default: 500)
        #[arg(short, long, default_value_t = DEFAULT_MAX_MOVES)]
        max_moves: u32,

        /// JSON rules file
        #[arg(short, long)]
        config: Option<PathBuf>,

        /// Output format: text, json, or csv
        #[arg(short, long, default_value = "text")]
        format: cli::TournamentFormat,

        /// Show progress bar
        #[arg(short, long)]
        progress: bool,
    },

    /// Print the starting position
    Board {
        /// JSON rules file
        #[arg(short, long)]
        config: Option<PathBuf>,
    },
}

/// Send engine events to stderr. `RUST_LOG` overrides the verbosity flag.
fn init_tracing(verbose: u8) {
    let default = match verbose {
        0 => "warn",
        1 => "chess_party=debug",
        _ => "chess_party=trace",
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

fn main() -> ExitCode {
    let args = Args::parse();
    init_tracing(args.verbose);

    let result = match args.command {
        Commands::Play {
            seed,
            max_moves,
            config,
            format,
            quiet,
        } => cli::play::execute(seed, max_moves, config, format, quiet),

        Commands::Tournament {
            games,
            seed,
            threads,
            max_moves,
            config,
            format,
            progress,
        } => cli::tournament::execute(games, seed, threads, max_moves, config, format, progress),

        Commands::Board { config } => cli::board::execute(config),
    };

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {e}");
            ExitCode::FAILURE
        }
    }
}
