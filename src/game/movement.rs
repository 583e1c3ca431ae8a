//! Legal-move generation.
//!
//! Every kind maps to a static [`MoveRule`]. Sliding kinds share one walker;
//! knights and pawns have their own patterns. All generators are pure
//! functions of the unit and the current [`Board`] snapshot.

use crate::game::{Board, Square, Unit, UnitKind};

const ORTHOGONAL: [(i32, i32); 4] = [(-1, 0), (1, 0), (0, -1), (0, 1)];

const DIAGONAL: [(i32, i32); 4] = [(-1, -1), (-1, 1), (1, -1), (1, 1)];

const ALL_DIRECTIONS: [(i32, i32); 8] = [
    (-1, 0),
    (1, 0),
    (0, -1),
    (0, 1),
    (-1, -1),
    (-1, 1),
    (1, -1),
    (1, 1),
];

const KNIGHT_OFFSETS: [(i32, i32); 8] = [
    (-2, -1),
    (-2, 1),
    (-1, -2),
    (-1, 2),
    (1, -2),
    (1, 2),
    (2, -1),
    (2, 1),
];

/// How a kind turns its direction table into destinations.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Pattern {
    /// Walk each direction until blocked or out of steps.
    Slide,
    /// Jump straight to each offset, ignoring anything in between.
    Leap,
    /// Side-dependent forward step with diagonal captures.
    Pawn,
}

/// Movement parameters for a unit kind.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MoveRule {
    /// Generation pattern.
    pub pattern: Pattern,
    /// Direction vectors or jump offsets as `(row, col)` deltas.
    pub directions: &'static [(i32, i32)],
    /// Step limit for sliders. `None` means until the board edge; leaps and
    /// pawn moves ignore it.
    pub max_steps: Option<u8>,
}

static PAWN: MoveRule = MoveRule {
    pattern: Pattern::Pawn,
    directions: &[],
    max_steps: None,
};

static ROOK: MoveRule = MoveRule {
    pattern: Pattern::Slide,
    directions: &ORTHOGONAL,
    max_steps: None,
};

static KNIGHT: MoveRule = MoveRule {
    pattern: Pattern::Leap,
    directions: &KNIGHT_OFFSETS,
    max_steps: None,
};

static BISHOP: MoveRule = MoveRule {
    pattern: Pattern::Slide,
    directions: &DIAGONAL,
    max_steps: None,
};

static QUEEN: MoveRule = MoveRule {
    pattern: Pattern::Slide,
    directions: &ALL_DIRECTIONS,
    max_steps: None,
};

static KING: MoveRule = MoveRule {
    pattern: Pattern::Slide,
    directions: &ALL_DIRECTIONS,
    max_steps: Some(1),
};

/// Look up the movement rule for a kind.
#[must_use]
pub fn rule_for(kind: UnitKind) -> &'static MoveRule {
    match kind {
        UnitKind::Pawn => &PAWN,
        UnitKind::Rook => &ROOK,
        UnitKind::Knight => &KNIGHT,
        UnitKind::Bishop => &BISHOP,
        UnitKind::Queen => &QUEEN,
        UnitKind::King => &KING,
    }
}

/// Destinations `unit` may move to on `board`.
///
/// Ordered by direction table, then by distance. Frozen units still get
/// their geometric moves; whether they may act is the engine's decision.
#[must_use]
pub fn legal_moves(unit: &Unit, board: &Board) -> Vec<Square> {
    let rule = unit.rule();
    match rule.pattern {
        Pattern::Slide => slide_moves(unit, rule, board),
        Pattern::Leap => leap_moves(unit, rule, board),
        Pattern::Pawn => pawn_moves(unit, board),
    }
}

/// Check whether `target` is among `unit`'s legal moves.
#[must_use]
pub fn is_legal(unit: &Unit, board: &Board, target: Square) -> bool {
    legal_moves(unit, board).contains(&target)
}

fn slide_moves(unit: &Unit, rule: &MoveRule, board: &Board) -> Vec<Square> {
    let limit = rule
        .max_steps
        .unwrap_or_else(|| board.rows().max(board.cols()));
    let mut moves = Vec::new();

    for &(dr, dc) in rule.directions {
        for step in 1..=i32::from(limit) {
            let Some(target) = unit
                .square
                .offset(dr * step, dc * step, board.rows(), board.cols())
            else {
                break;
            };
            match board.unit_at(target) {
                None => moves.push(target),
                Some(other) if other.side != unit.side => {
                    moves.push(target);
                    break;
                }
                Some(_) => break,
            }
        }
    }

    moves
}

fn leap_moves(unit: &Unit, rule: &MoveRule, board: &Board) -> Vec<Square> {
    rule.directions
        .iter()
        .filter_map(|&(dr, dc)| unit.square.offset(dr, dc, board.rows(), board.cols()))
        .filter(|&target| board.unit_at(target).is_none_or(|other| other.side != unit.side))
        .collect()
}

fn pawn_moves(unit: &Unit, board: &Board) -> Vec<Square> {
    let (rows, cols) = (board.rows(), board.cols());
    let forward = unit.side.forward();
    let mut moves = Vec::new();

    if let Some(one) = unit.square.offset(forward, 0, rows, cols) {
        if board.unit_at(one).is_none() {
            moves.push(one);

            if unit.square.row == unit.side.pawn_row(rows) {
                if let Some(two) = unit.square.offset(2 * forward, 0, rows, cols) {
                    if board.unit_at(two).is_none() {
                        moves.push(two);
                    }
                }
            }
        }
    }

    for dc in [-1, 1] {
        let Some(diagonal) = unit.square.offset(forward, dc, rows, cols) else {
            continue;
        };
        if board
            .unit_at(diagonal)
            .is_some_and(|other| other.side != unit.side)
        {
            moves.push(diagonal);
        }
    }

    moves
}
