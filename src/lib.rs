// Allow unwrap in tests (test code is not production)
#![cfg_attr(test, allow(clippy::unwrap_used))]
//! Chess Party: a chess-like rules engine with random events.
//!
//! Two sides move units on a rectangular board with standard chess movement.
//! After every move the engine plays an automatic turn that either lists a
//! random unit's moves or fires a random event on it (freeze, promotion,
//! and optionally an explosion). Capturing the opposing King wins.
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────────────────────────┐
//! │   CLI / self-play / tournaments     │
//! ├─────────────────────────────────────┤
//! │  TurnEngine (moves, events, win)    │
//! ├─────────────────────────────────────┤
//! │  Units, Board, MoveRules            │
//! └─────────────────────────────────────┘
//! ```
//!
//! # Example
//!
//! ```
//! use chess_party::{EngineConfig, TurnEngine};
//! use rand::SeedableRng;
//! use rand::rngs::StdRng;
//!
//! let mut engine = TurnEngine::new(EngineConfig::default(), StdRng::seed_from_u64(7))?;
//! let pawn = engine.board().get_unit(1, 4).ok_or("no pawn on E7")?.id;
//! let report = engine.submit_move(pawn, 3, 4)?;
//! assert!(!report.game_over);
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

pub mod config;
pub mod decor;
pub mod error;
pub mod game;
pub mod render;
pub mod simulation;

pub use config::{EngineConfig, SelectionPool};
pub use error::{ConfigError, EngineError};

// Re-export key game types at crate root for convenience
pub use game::{
    Board, GameState, MoveReport, Side, Square, TurnEngine, Unit, UnitId, UnitKind,
    initial_standard_setup,
};
