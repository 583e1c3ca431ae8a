//! Rules layer for Chess Party.
//!
//! Implements the game on a rectangular board:
//! - Units, sides and squares
//! - Board snapshot with tile labels and colors
//! - Movement rules per unit kind
//! - Random events (freeze, promotion, area removal)
//! - Turn engine with automatic turns and the King-capture win condition

mod board;
mod engine;
mod events;
mod invariants;
mod movement;
mod setup;
mod state;
mod unit;

pub use board::{Board, MAX_DIMENSION, Tile, TileColor};
pub use engine::{ALL_FROZEN_MESSAGE, GAME_OVER_MESSAGE, MoveReport, TurnEngine};
pub use events::{
    AreaRemoval, DEFAULT_FREEZE_TURNS, DEFAULT_PROMOTION_CAP, EventOutcome, Freeze,
    PromoteToMorePowerfulUnit, RandomEvent,
};
pub use invariants::{InvariantViolation, assert_invariants, check_invariants};
pub use movement::{MoveRule, Pattern, is_legal, legal_moves, rule_for};
pub use setup::{MIN_SETUP_COLS, MIN_SETUP_ROWS, initial_standard_setup, standard_setup};
pub use state::GameState;
pub use unit::{Side, Square, Unit, UnitId, UnitKind};
