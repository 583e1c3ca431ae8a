//! Game state management.

use crate::game::{Board, Side, Unit, UnitId, UnitKind};

/// Complete game state.
///
/// The unit list is authoritative; `board` is a snapshot refreshed after
/// every change to it.
#[derive(Debug, Clone)]
pub struct GameState {
    /// Units on the board, in setup order.
    pub(crate) units: Vec<Unit>,
    /// Occupancy snapshot of `units`.
    pub(crate) board: Board,
    /// Side to move.
    pub(crate) current_side: Side,
    /// Black units captured by White.
    pub(crate) captured_by_white: Vec<Unit>,
    /// White units captured by Black.
    pub(crate) captured_by_black: Vec<Unit>,
    /// Every player-facing message so far.
    pub(crate) event_log: Vec<String>,
    /// Set once a King leaves the board.
    pub(crate) game_over: bool,
    /// Winner, if the game ended with one.
    pub(crate) winner: Option<Side>,
    /// Moves applied so far.
    pub(crate) moves_played: u32,
}

impl GameState {
    /// Create a state with White to move.
    ///
    /// Returns `None` if the board dimensions are unusable.
    #[must_use]
    pub fn new(units: Vec<Unit>, rows: u8, cols: u8) -> Option<Self> {
        let board = Board::from_units(rows, cols, &units)?;
        Some(Self {
            units,
            board,
            current_side: Side::White,
            captured_by_white: Vec::new(),
            captured_by_black: Vec::new(),
            event_log: Vec::new(),
            game_over: false,
            winner: None,
            moves_played: 0,
        })
    }

    /// Units currently on the board.
    #[must_use]
    pub fn units(&self) -> &[Unit] {
        &self.units
    }

    /// Current board snapshot.
    #[must_use]
    pub const fn board(&self) -> &Board {
        &self.board
    }

    /// Side to move.
    #[must_use]
    pub const fn current_side(&self) -> Side {
        self.current_side
    }

    /// Units `side` has captured.
    #[must_use]
    pub fn captured_by(&self, side: Side) -> &[Unit] {
        match side {
            Side::White => &self.captured_by_white,
            Side::Black => &self.captured_by_black,
        }
    }

    /// Check if the game is over.
    #[must_use]
    pub const fn is_game_over(&self) -> bool {
        self.game_over
    }

    /// Winning side, if any.
    #[must_use]
    pub const fn winner(&self) -> Option<Side> {
        self.winner
    }

    /// Moves applied so far.
    #[must_use]
    pub const fn moves_played(&self) -> u32 {
        self.moves_played
    }

    /// Full message history.
    #[must_use]
    pub fn event_log(&self) -> &[String] {
        &self.event_log
    }

    /// The last `n` messages, oldest first.
    #[must_use]
    pub fn recent_log(&self, n: usize) -> &[String] {
        let start = self.event_log.len().saturating_sub(n);
        &self.event_log[start..]
    }

    /// Get a unit by id.
    #[must_use]
    pub fn unit(&self, id: UnitId) -> Option<&Unit> {
        self.units.iter().find(|u| u.id == id)
    }

    /// Whether `side` still has its King.
    #[must_use]
    pub fn has_king(&self, side: Side) -> bool {
        self.units
            .iter()
            .any(|u| u.side == side && u.kind == UnitKind::King)
    }

    /// Refresh the board snapshot from the unit list.
    pub(crate) fn rebuild_board(&mut self) {
        self.board.rebuild(&self.units);
    }

    /// Remove a unit by id and refresh the board.
    pub(crate) fn remove_unit(&mut self, id: UnitId) -> Option<Unit> {
        let idx = self.units.iter().position(|u| u.id == id)?;
        let unit = self.units.remove(idx);
        self.rebuild_board();
        Some(unit)
    }

    /// Append a captured unit to `by`'s list.
    pub(crate) fn record_capture(&mut self, by: Side, unit: Unit) {
        match by {
            Side::White => self.captured_by_white.push(unit),
            Side::Black => self.captured_by_black.push(unit),
        }
    }

    /// Hand the move to the other side.
    pub(crate) fn pass_turn(&mut self) {
        self.current_side = self.current_side.opponent();
    }

    /// End the game if a King is gone.
    ///
    /// Returns `true` if this call ended the game.
    pub(crate) fn check_kings(&mut self) -> bool {
        if self.game_over {
            return false;
        }
        let (white, black) = (self.has_king(Side::White), self.has_king(Side::Black));
        let winner = match (white, black) {
            (true, true) => return false,
            (true, false) => Some(Side::White),
            (false, true) => Some(Side::Black),
            (false, false) => None,
        };
        self.game_over = true;
        self.winner = winner;
        true
    }

    /// Append messages to the log.
    pub(crate) fn log<I: IntoIterator<Item = String>>(&mut self, messages: I) {
        self.event_log.extend(messages);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game::{Square, initial_standard_setup};

    fn create_test_game() -> GameState {
        GameState::new(initial_standard_setup(), 8, 8).unwrap()
    }

    #[test]
    fn test_game_state_creation() {
        let game = create_test_game();
        assert_eq!(game.current_side(), Side::White);
        assert_eq!(game.units().len(), 32);
        assert_eq!(game.board().occupied_count(), 32);
        assert!(!game.is_game_over());
        assert!(game.winner().is_none());
    }

    #[test]
    fn test_bad_dimensions() {
        assert!(GameState::new(Vec::new(), 0, 8).is_none());
    }

    #[test]
    fn test_remove_unit_refreshes_board() {
        let mut game = create_test_game();
        let id = game.board().get_unit(1, 0).unwrap().id;

        let removed = game.remove_unit(id).unwrap();

        assert_eq!(removed.square, Square::new(1, 0));
        assert!(game.board().is_empty(1, 0));
        assert!(game.unit(id).is_none());
        assert!(game.remove_unit(id).is_none());
    }

    #[test]
    fn test_check_kings() {
        let mut game = create_test_game();
        assert!(!game.check_kings());

        let black_king = game.board().get_unit(7, 4).unwrap().id;
        game.remove_unit(black_king);
        assert!(game.check_kings());
        assert!(game.is_game_over());
        assert_eq!(game.winner(), Some(Side::White));

        // Already over
        assert!(!game.check_kings());
    }

    #[test]
    fn test_both_kings_gone_is_undecided() {
        let mut game = create_test_game();
        let kings: Vec<_> = game
            .units()
            .iter()
            .filter(|u| u.kind == UnitKind::King)
            .map(|u| u.id)
            .collect();
        for id in kings {
            game.remove_unit(id);
        }
        assert!(game.check_kings());
        assert!(game.winner().is_none());
    }

    #[test]
    fn test_recent_log() {
        let mut game = create_test_game();
        assert!(game.recent_log(3).is_empty());

        game.log((1..=5).map(|i| format!("message {i}")));
        assert_eq!(game.recent_log(3), ["message 3", "message 4", "message 5"]);
        assert_eq!(game.recent_log(10).len(), 5);
    }

    #[test]
    fn test_captures_by_side() {
        let mut game = create_test_game();
        let pawn = *game.board().get_unit(6, 0).unwrap();
        game.record_capture(Side::White, pawn);
        assert_eq!(game.captured_by(Side::White), [pawn]);
        assert!(game.captured_by(Side::Black).is_empty());
    }
}
