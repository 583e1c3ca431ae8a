//! Game invariants - sanity checks that detect bugs.
//!
//! No sequence of engine calls should ever trigger these. A violation means
//! the engine mutated the unit list or the board incorrectly.

use std::collections::HashSet;

use crate::game::GameState;

/// Invariant violation error.
#[derive(Debug, Clone)]
pub struct InvariantViolation {
    /// Description of the violated invariant.
    pub message: String,
}

impl std::fmt::Display for InvariantViolation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Invariant violation: {}", self.message)
    }
}

impl std::error::Error for InvariantViolation {}

/// Check all game invariants.
///
/// Returns a list of violations found, or empty if all invariants hold.
#[must_use]
pub fn check_invariants(state: &GameState) -> Vec<InvariantViolation> {
    let mut violations = Vec::new();
    let board = &state.board;

    let mut ids = HashSet::new();
    let mut squares = HashSet::new();

    for unit in &state.units {
        if !ids.insert(unit.id) {
            violations.push(InvariantViolation {
                message: format!("Unit id {} appears more than once", unit.id),
            });
        }

        let (row, col) = (i32::from(unit.square.row), i32::from(unit.square.col));
        if !board.contains(row, col) {
            violations.push(InvariantViolation {
                message: format!(
                    "{unit} {} is at {} outside the {}x{} board",
                    unit.id,
                    unit.square,
                    board.rows(),
                    board.cols()
                ),
            });
            continue;
        }

        if !squares.insert(unit.square) {
            violations.push(InvariantViolation {
                message: format!("Two units share square {}", unit.square),
            });
        }

        if board.unit_at(unit.square) != Some(unit) {
            violations.push(InvariantViolation {
                message: format!("Board is stale at {} for {unit} {}", unit.square, unit.id),
            });
        }
    }

    // Occupancy consistency
    for (square, occupant) in board.iter() {
        let (row, col) = (i32::from(square.row), i32::from(square.col));
        let occupied = board.tile(row, col).is_some_and(|t| t.occupied);
        if occupied != occupant.is_some() {
            violations.push(InvariantViolation {
                message: format!("Tile occupied flag disagrees with grid at {square}"),
            });
        }
        if occupant.is_some() && !squares.contains(&square) {
            violations.push(InvariantViolation {
                message: format!("Board holds a unit at {square} that is not in the unit list"),
            });
        }
    }

    // Captured units must be gone
    for captured in state.captured_by_white.iter().chain(&state.captured_by_black) {
        if ids.contains(&captured.id) {
            violations.push(InvariantViolation {
                message: format!("Captured unit {} is still on the board", captured.id),
            });
        }
    }

    // Winner consistency
    if state.winner.is_some() && !state.game_over {
        violations.push(InvariantViolation {
            message: "Winner set while game is not over".to_string(),
        });
    }

    violations
}

/// Assert all game invariants hold, panicking if any are violated.
///
/// Only active in debug builds. No-op in release builds.
///
/// # Panics
///
/// Panics with detailed message if any invariant is violated.
#[cfg(debug_assertions)]
pub fn assert_invariants(state: &GameState) {
    let violations = check_invariants(state);
    if !violations.is_empty() {
        let messages: Vec<_> = violations.iter().map(|v| v.message.as_str()).collect();
        panic!("Game invariant violations:\n  - {}", messages.join("\n  - "));
    }
}

/// No-op in release builds.
#[cfg(not(debug_assertions))]
pub fn assert_invariants(_state: &GameState) {}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game::{Side, Square, UnitId, initial_standard_setup};

    fn create_valid_game() -> GameState {
        GameState::new(initial_standard_setup(), 8, 8).unwrap()
    }

    #[test]
    fn test_valid_game_passes() {
        let game = create_valid_game();
        let violations = check_invariants(&game);
        assert!(violations.is_empty(), "{violations:?}");
    }

    #[test]
    fn test_empty_board_passes() {
        let game = GameState::new(Vec::new(), 8, 8).unwrap();
        assert!(check_invariants(&game).is_empty());
    }

    #[test]
    fn test_stale_board_detected() {
        let mut game = create_valid_game();
        // Move a unit without rebuilding the snapshot
        game.units[0].square = Square::new(3, 0);

        let violations = check_invariants(&game);
        assert!(!violations.is_empty());
        assert!(violations.iter().any(|v| v.message.contains("stale")));
        assert!(violations.iter().any(|v| v.message.contains("not in the unit list")));
    }

    #[test]
    fn test_shared_square_detected() {
        let mut game = create_valid_game();
        game.units[1].square = game.units[0].square;

        let violations = check_invariants(&game);
        assert!(violations.iter().any(|v| v.message.contains("share square")));
    }

    #[test]
    fn test_duplicate_id_detected() {
        let mut game = create_valid_game();
        game.units[1].id = UnitId(0);

        let violations = check_invariants(&game);
        assert!(violations.iter().any(|v| v.message.contains("more than once")));
    }

    #[test]
    fn test_off_board_unit_detected() {
        let mut game = create_valid_game();
        game.units[0].square = Square::new(9, 0);

        let violations = check_invariants(&game);
        assert!(violations.iter().any(|v| v.message.contains("outside")));
    }

    #[test]
    fn test_captured_unit_still_present_detected() {
        let mut game = create_valid_game();
        let unit = game.units[0];
        game.captured_by_black.push(unit);

        let violations = check_invariants(&game);
        assert_eq!(violations.len(), 1);
        assert!(violations[0].message.contains("Captured"));
    }

    #[test]
    fn test_winner_without_game_over_detected() {
        let mut game = create_valid_game();
        game.winner = Some(Side::White);

        let violations = check_invariants(&game);
        assert_eq!(violations.len(), 1);
    }
}
