//! Turn orchestration: player moves, automatic turns, captures and the win
//! condition.
//!
//! ```text
//! AwaitingSelection ──submit_move──▶ ResolvingMove ──┐
//!        ▲                                           ▼
//!        │          play_automatic_turn ──▶ AdvanceTimers ──▶ ResolvingEvent
//!        │                                           │
//!        └──────────────── not over ◀────────────────┴──▶ GameOver
//! ```

use rand::Rng;
use rand::seq::IndexedRandom;
use tracing::{debug, info, trace};

use crate::config::{EngineConfig, SelectionPool};
use crate::error::{ConfigError, EngineError};
use crate::game::{
    Board, GameState, RandomEvent, Side, Square, Unit, UnitId, UnitKind, assert_invariants,
    check_invariants, is_legal, legal_moves, standard_setup,
};

/// Logged when no unit can be selected for an automatic turn.
pub const ALL_FROZEN_MESSAGE: &str = "All pieces are frozen!";

/// Returned by automatic turns requested after the game ended.
pub const GAME_OVER_MESSAGE: &str = "The game is over.";

/// What a successful move did.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MoveReport {
    /// Unit that moved.
    pub unit: UnitId,
    /// Square it left.
    pub from: Square,
    /// Square it reached.
    pub to: Square,
    /// Opposing unit taken on `to`, if any.
    pub captured: Option<Unit>,
    /// Whether the game ended during this move or its automatic turn.
    pub game_over: bool,
    /// Winner, once the game is over.
    pub winner: Option<Side>,
    /// Messages from the move followed by those of the automatic turn.
    pub messages: Vec<String>,
}

/// Drives a game: validates moves, runs automatic turns.
///
/// All randomness comes from the injected generator, so a seeded `R`
/// replays a game exactly.
#[derive(Debug, Clone)]
pub struct TurnEngine<R> {
    state: GameState,
    config: EngineConfig,
    events: Vec<RandomEvent>,
    rng: R,
}

impl<R: Rng> TurnEngine<R> {
    /// Start a game from the standard layout.
    ///
    /// # Errors
    ///
    /// Returns an error if `config` does not validate or the board is too
    /// small for the standard layout.
    pub fn new(config: EngineConfig, rng: R) -> Result<Self, ConfigError> {
        config.validate_standard_layout()?;
        Self::with_units(config, standard_setup(config.rows), rng)
    }

    /// Start a game from an arbitrary unit list.
    ///
    /// # Errors
    ///
    /// Returns an error if `config` does not validate or the units overlap,
    /// share ids or stand off the board.
    pub fn with_units(config: EngineConfig, units: Vec<Unit>, rng: R) -> Result<Self, ConfigError> {
        config.validate()?;

        // Check placement before building the board, which asserts in debug builds
        let bad_unit = units.iter().enumerate().find(|&(i, unit)| {
            units[..i]
                .iter()
                .any(|other| other.id == unit.id || other.square == unit.square)
                || unit.square.row >= config.rows
                || unit.square.col >= config.cols
        });
        if let Some((_, unit)) = bad_unit {
            return Err(ConfigError::Invalid(format!(
                "{unit} {} at {} overlaps another unit or is off the board",
                unit.id, unit.square
            )));
        }

        let state = GameState::new(units, config.rows, config.cols)
            .ok_or_else(|| ConfigError::Invalid("unusable board dimensions".to_string()))?;

        if let Some(violation) = check_invariants(&state).into_iter().next() {
            return Err(ConfigError::Invalid(violation.message));
        }

        Ok(Self {
            state,
            events: config.events(),
            config,
            rng,
        })
    }

    /// Current game state.
    #[must_use]
    pub const fn state(&self) -> &GameState {
        &self.state
    }

    /// Current board snapshot.
    #[must_use]
    pub const fn board(&self) -> &Board {
        self.state.board()
    }

    /// Active configuration.
    #[must_use]
    pub const fn config(&self) -> &EngineConfig {
        &self.config
    }

    /// The injected generator, for callers that make their own random choices.
    pub fn rng_mut(&mut self) -> &mut R {
        &mut self.rng
    }

    /// Legal destinations of unit `id`. Empty for unknown units.
    #[must_use]
    pub fn legal_moves(&self, id: UnitId) -> Vec<Square> {
        self.state
            .unit(id)
            .map(|unit| legal_moves(unit, self.board()))
            .unwrap_or_default()
    }

    /// Units of the side to move that may move right now.
    #[must_use]
    pub fn movable_units(&self) -> Vec<UnitId> {
        if self.state.game_over {
            return Vec::new();
        }
        self.state
            .units
            .iter()
            .filter(|u| u.side == self.state.current_side && !u.is_frozen())
            .filter(|u| !legal_moves(u, self.board()).is_empty())
            .map(|u| u.id)
            .collect()
    }

    /// Move unit `id` to `(row, col)`, then run one automatic turn.
    ///
    /// # Errors
    ///
    /// Returns an error, leaving the state untouched, if the game is over,
    /// the unit is unknown, belongs to the other side or is frozen, or the
    /// target is off the board or not a legal move.
    pub fn submit_move(&mut self, id: UnitId, row: i32, col: i32) -> Result<MoveReport, EngineError> {
        if self.state.game_over {
            return Err(EngineError::GameOver);
        }
        let unit = *self.state.unit(id).ok_or(EngineError::UnknownUnit(id))?;
        if unit.side != self.state.current_side {
            return Err(EngineError::NotYourTurn {
                expected: self.state.current_side,
                actual: unit.side,
            });
        }
        if unit.is_frozen() {
            return Err(EngineError::Frozen {
                unit: id,
                turns: unit.frozen_turns,
            });
        }
        let target = self.square_at(row, col)?;
        if !is_legal(&unit, self.board(), target) {
            return Err(EngineError::IllegalMove { unit: id, target });
        }

        let mut messages = Vec::new();

        let captured = self
            .board()
            .unit_at(target)
            .copied()
            .filter(|victim| victim.side != unit.side);
        if let Some(victim) = captured {
            messages.push(format!("{unit} captured {victim} at {target}"));
            debug!(attacker = %id, victim = %victim.id, square = %target, "capture");
            self.state.remove_unit(victim.id);
            self.state.record_capture(unit.side, victim);
        }

        if let Some(mover) = self.state.units.iter_mut().find(|u| u.id == id) {
            mover.square = target;
        }
        self.state.rebuild_board();
        self.state.moves_played += 1;
        debug!(unit = %id, from = %unit.square, to = %target, "move applied");

        if captured.is_some_and(|victim| victim.kind == UnitKind::King) && self.state.check_kings() {
            messages.push(format!("Checkmate! {} wins.", unit.side));
            info!(winner = %unit.side, moves = self.state.moves_played, "king captured");
        }

        self.state.pass_turn();
        self.state.log(messages.iter().cloned());

        if !self.state.game_over {
            messages.extend(self.automatic_turn());
        }

        assert_invariants(&self.state);

        Ok(MoveReport {
            unit: id,
            from: unit.square,
            to: target,
            captured,
            game_over: self.state.game_over,
            winner: self.state.winner,
            messages,
        })
    }

    /// Age frozen units and either fire a random event on one unit or list
    /// its moves. Never relocates a unit.
    pub fn play_automatic_turn(&mut self) -> Vec<String> {
        if self.state.game_over {
            return vec![GAME_OVER_MESSAGE.to_string()];
        }
        let messages = self.automatic_turn();
        assert_invariants(&self.state);
        messages
    }

    /// Run an automatic turn and hand the move to the other side without
    /// moving. Used when the side to move has nothing it can do.
    pub fn pass(&mut self) -> Vec<String> {
        if self.state.game_over {
            return vec![GAME_OVER_MESSAGE.to_string()];
        }
        let side = self.state.current_side;
        let mut messages = vec![format!("{side} has no legal move and passes.")];
        self.state.log(messages.iter().cloned());
        debug!(side = %side, "pass");

        messages.extend(self.automatic_turn());
        self.state.pass_turn();
        assert_invariants(&self.state);
        messages
    }

    fn automatic_turn(&mut self) -> Vec<String> {
        let side = self.state.current_side;
        let pool: Vec<UnitId> = self
            .state
            .units
            .iter()
            .filter(|u| !u.is_frozen())
            .filter(|u| match self.config.selection {
                SelectionPool::Global => true,
                SelectionPool::CurrentSide => u.side == side,
            })
            .map(|u| u.id)
            .collect();

        let Some(&selected) = pool.choose(&mut self.rng) else {
            debug!("automatic turn skipped, nothing selectable");
            let messages = vec![ALL_FROZEN_MESSAGE.to_string()];
            self.state.log(messages.iter().cloned());
            return messages;
        };

        let mut messages = Vec::new();

        for unit in self.state.units.iter_mut().filter(|u| u.is_frozen()) {
            unit.thaw_one();
            messages.push(format!("{} is frozen.", unit.kind));
        }
        self.state.rebuild_board();

        let event = if self.rng.random_bool(self.config.event_chance) {
            self.events.choose(&mut self.rng).copied()
        } else {
            None
        };

        if let Some(event) = event {
            let outcome = event.apply(selected, &mut self.state.units, &mut self.state.board);
            debug!(event = event.name(), unit = %selected, success = outcome.success, "event applied");
            messages.push(outcome.message);

            if !outcome.removed.is_empty() && self.state.check_kings() {
                let message = match self.state.winner {
                    Some(winner) => format!("A King was lost in the blast! {winner} wins."),
                    None => "Both Kings were lost in the blast! No winner.".to_string(),
                };
                info!(winner = ?self.state.winner, "king removed by event");
                messages.push(message);
            }
        } else if let Some(unit) = self.state.unit(selected) {
            let moves = legal_moves(unit, self.board());
            trace!(unit = %selected, count = moves.len(), "listing moves");
            messages.push(format!("{} valid moves: {}", unit.kind, format_squares(&moves)));
        }

        self.state.log(messages.iter().cloned());
        messages
    }

    fn square_at(&self, row: i32, col: i32) -> Result<Square, EngineError> {
        let out_of_bounds = EngineError::OutOfBounds { row, col };
        if !self.board().contains(row, col) {
            return Err(out_of_bounds);
        }
        match (u8::try_from(row), u8::try_from(col)) {
            (Ok(row), Ok(col)) => Ok(Square::new(row, col)),
            _ => Err(out_of_bounds),
        }
    }
}

fn format_squares(squares: &[Square]) -> String {
    let inner: Vec<String> = squares.iter().map(ToString::to_string).collect();
    format!("[{}]", inner.join(", "))
}
