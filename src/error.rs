//! Error types for the rules engine.

use std::path::PathBuf;

use thiserror::Error;

use crate::game::{Side, Square, UnitId};

/// Why a submitted move was rejected.
///
/// Every variant is recoverable: the game state is left exactly as it was.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum EngineError {
    /// The game already has a winner.
    #[error("the game is over")]
    GameOver,
    /// No unit with this id is on the board.
    #[error("no unit {0} on the board")]
    UnknownUnit(UnitId),
    /// The unit belongs to the side not on move.
    #[error("it is {expected}'s turn, not {actual}'s")]
    NotYourTurn {
        /// Side to move.
        expected: Side,
        /// Side of the submitted unit.
        actual: Side,
    },
    /// The unit is frozen for the given number of turns.
    #[error("unit {unit} is frozen for {turns} more turn(s)")]
    Frozen {
        /// Frozen unit.
        unit: UnitId,
        /// Turns remaining.
        turns: u32,
    },
    /// Target coordinates are off the board.
    #[error("({row}, {col}) is off the board")]
    OutOfBounds {
        /// Requested row.
        row: i32,
        /// Requested column.
        col: i32,
    },
    /// Target square is not among the unit's legal moves.
    #[error("unit {unit} cannot move to {target}")]
    IllegalMove {
        /// Unit that tried to move.
        unit: UnitId,
        /// Requested target.
        target: Square,
    },
}

/// Errors raised while loading or validating an [`crate::EngineConfig`].
#[derive(Debug, Error)]
pub enum ConfigError {
    /// The config file could not be read.
    #[error("failed to read {}: {source}", path.display())]
    Io {
        /// File that failed.
        path: PathBuf,
        /// Underlying error.
        #[source]
        source: std::io::Error,
    },
    /// The config is not valid JSON for [`crate::EngineConfig`].
    #[error("invalid config: {0}")]
    Parse(#[from] serde_json::Error),
    /// A field holds an unusable value.
    #[error("invalid config value: {0}")]
    Invalid(String),
}
