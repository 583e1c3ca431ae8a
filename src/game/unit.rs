//! Units, sides and board squares.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::game::movement::{MoveRule, rule_for};

/// One of the two players.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Side {
    /// Moves first, starts on rows 0 and 1.
    White,
    /// Starts on the two highest rows.
    Black,
}

impl Side {
    /// Get the opposing side.
    #[must_use]
    pub const fn opponent(self) -> Side {
        match self {
            Side::White => Side::Black,
            Side::Black => Side::White,
        }
    }

    /// Row delta of a forward pawn step.
    #[must_use]
    pub const fn forward(self) -> i32 {
        match self {
            Side::White => 1,
            Side::Black => -1,
        }
    }

    /// Row a pawn of this side starts on, given the board height.
    #[must_use]
    pub const fn pawn_row(self, rows: u8) -> u8 {
        match self {
            Side::White => 1,
            Side::Black => rows.saturating_sub(2),
        }
    }

    /// Row the major pieces of this side start on.
    #[must_use]
    pub const fn back_row(self, rows: u8) -> u8 {
        match self {
            Side::White => 0,
            Side::Black => rows.saturating_sub(1),
        }
    }
}

impl fmt::Display for Side {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Side::White => write!(f, "White"),
            Side::Black => write!(f, "Black"),
        }
    }
}

/// Kind of a unit. Determines how it moves.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum UnitKind {
    /// Steps forward, captures diagonally.
    Pawn,
    /// Slides orthogonally.
    Rook,
    /// Jumps in an L shape.
    Knight,
    /// Slides diagonally.
    Bishop,
    /// Slides in all eight directions.
    Queen,
    /// Steps one square in any direction. Losing it loses the game.
    King,
}

impl UnitKind {
    /// All kinds in declaration order.
    pub const ALL: [UnitKind; 6] = [
        UnitKind::Pawn,
        UnitKind::Rook,
        UnitKind::Knight,
        UnitKind::Bishop,
        UnitKind::Queen,
        UnitKind::King,
    ];

    /// Single-letter symbol, upper case.
    #[must_use]
    pub const fn symbol(self) -> char {
        match self {
            UnitKind::Pawn => 'P',
            UnitKind::Rook => 'R',
            UnitKind::Knight => 'N',
            UnitKind::Bishop => 'B',
            UnitKind::Queen => 'Q',
            UnitKind::King => 'K',
        }
    }
}

impl fmt::Display for UnitKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            UnitKind::Pawn => "Pawn",
            UnitKind::Rook => "Rook",
            UnitKind::Knight => "Knight",
            UnitKind::Bishop => "Bishop",
            UnitKind::Queen => "Queen",
            UnitKind::King => "King",
        };
        f.write_str(name)
    }
}

/// A square on the board.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Square {
    /// Row, 0 is White's back row.
    pub row: u8,
    /// Column.
    pub col: u8,
}

impl Square {
    /// Create a new square.
    #[must_use]
    pub const fn new(row: u8, col: u8) -> Self {
        Self { row, col }
    }

    /// Square displaced by `(dr, dc)`, or `None` if it leaves `rows x cols`.
    #[must_use]
    pub fn offset(self, dr: i32, dc: i32, rows: u8, cols: u8) -> Option<Square> {
        let row = i32::from(self.row) + dr;
        let col = i32::from(self.col) + dc;
        if (0..i32::from(rows)).contains(&row) && (0..i32::from(cols)).contains(&col) {
            Some(Square::new(u8::try_from(row).ok()?, u8::try_from(col).ok()?))
        } else {
            None
        }
    }
}

impl fmt::Display for Square {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.row, self.col)
    }
}

/// Stable identity of a unit within one game.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct UnitId(pub u16);

impl fmt::Display for UnitId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// A single game piece.
///
/// Carries gameplay data only. Display timers for promotion sparkles and
/// frost overlays live in [`crate::decor::Decorations`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Unit {
    /// Identity, unique within a game.
    pub id: UnitId,
    /// Kind of unit.
    pub kind: UnitKind,
    /// Owning side.
    pub side: Side,
    /// Current square.
    pub square: Square,
    /// Automatic turns left before the unit may act again.
    pub frozen_turns: u32,
    /// Whether the unit was created by a promotion event.
    pub promoted: bool,
}

impl Unit {
    /// Create a fresh, unfrozen unit.
    #[must_use]
    pub const fn new(id: UnitId, kind: UnitKind, side: Side, square: Square) -> Self {
        Self {
            id,
            kind,
            side,
            square,
            frozen_turns: 0,
            promoted: false,
        }
    }

    /// Movement rule for this unit's kind.
    #[must_use]
    pub fn rule(&self) -> &'static MoveRule {
        rule_for(self.kind)
    }

    /// Add `turns` to the frozen counter.
    pub fn freeze(&mut self, turns: u32) {
        self.frozen_turns = self.frozen_turns.saturating_add(turns);
    }

    /// Check whether the unit is currently frozen.
    #[must_use]
    pub const fn is_frozen(&self) -> bool {
        self.frozen_turns > 0
    }

    /// Age the frozen counter by one automatic turn.
    pub fn thaw_one(&mut self) {
        self.frozen_turns = self.frozen_turns.saturating_sub(1);
    }

    /// The same unit turned into `kind`, flagged as promoted.
    #[must_use]
    pub const fn promoted_to(self, kind: UnitKind) -> Self {
        Self {
            kind,
            promoted: true,
            ..self
        }
    }
}

impl fmt::Display for Unit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.side, self.kind)
    }
}
