//! Play command implementation.

use std::path::PathBuf;

use chess_party::decor::Decorations;
use chess_party::render::render_ascii;
use chess_party::simulation::SelfPlay;

use super::output::format_game_text;
use super::{CliError, OutputFormat, load_config, seed_or_now};

/// Execute the play command.
///
/// # Errors
///
/// Returns an error if the config cannot be loaded or the result cannot be
/// serialized.
pub(crate) fn execute(
    seed: Option<u64>,
    max_moves: u32,
    config: Option<PathBuf>,
    format: OutputFormat,
    quiet: bool,
) -> Result<(), CliError> {
    let config = load_config(config.as_deref())?;
    let seed = seed_or_now(seed);

    let mut game = SelfPlay::new(seed, &config, max_moves)?;
    let mut decorations = Decorations::new(game.state().units());
    let verbose = !quiet && format == OutputFormat::Text;

    while let Some(messages) = game.step() {
        decorations.tick();
        decorations.sync(game.state().units());

        if verbose {
            let state = game.state();
            println!("--- move {} ---", state.moves_played());
            for message in &messages {
                println!("  {message}");
            }
        }
    }

    let result = game.result();

    match format {
        OutputFormat::Text => {
            if verbose {
                println!();
            }
            let board = render_ascii(game.state(), &decorations);
            print!("{}", format_game_text(&result, &board));
        }
        OutputFormat::Json => {
            let json = serde_json::to_string_pretty(&result)?;
            println!("{json}");
        }
    }

    Ok(())
}
