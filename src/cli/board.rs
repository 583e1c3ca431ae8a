//! Board command implementation.

use std::path::PathBuf;

use chess_party::decor::Decorations;
use chess_party::render::render_ascii;
use chess_party::{GameState, game::standard_setup};

use super::{CliError, load_config};

/// Print the starting position for the configured board.
///
/// # Errors
///
/// Returns an error if the config cannot be loaded or the board is too small
/// for the standard layout.
pub(crate) fn execute(config: Option<PathBuf>) -> Result<(), CliError> {
    let config = load_config(config.as_deref())?;
    config.validate_standard_layout()?;

    let state = GameState::new(standard_setup(config.rows), config.rows, config.cols)
        .ok_or_else(|| CliError::new("Unusable board dimensions"))?;

    print!("{}", render_ascii(&state, &Decorations::new(state.units())));
    Ok(())
}
