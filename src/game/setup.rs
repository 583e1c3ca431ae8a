//! Starting positions.

use crate::game::{Side, Square, Unit, UnitId, UnitKind};

/// Fewest rows that fit two sides of two ranks each.
pub const MIN_SETUP_ROWS: u8 = 4;

/// Fewest columns that fit a back rank.
pub const MIN_SETUP_COLS: u8 = 8;

/// Back rank from column 0 to 7.
const BACK_RANK: [UnitKind; 8] = [
    UnitKind::Rook,
    UnitKind::Knight,
    UnitKind::Bishop,
    UnitKind::Queen,
    UnitKind::King,
    UnitKind::Bishop,
    UnitKind::Knight,
    UnitKind::Rook,
];

/// The 32-unit standard layout on an 8x8 board.
#[must_use]
pub fn initial_standard_setup() -> Vec<Unit> {
    standard_setup(8)
}

/// Standard layout for a board with `rows` rows, in the first eight columns.
///
/// White fills rows 0 and 1, Black the last two rows. Ids run 0..16 for
/// White pawns then pieces, 16..32 for Black in the same order.
#[must_use]
pub fn standard_setup(rows: u8) -> Vec<Unit> {
    let mut units = Vec::with_capacity(32);
    let mut next_id = 0u16;

    for side in [Side::White, Side::Black] {
        let pawn_row = side.pawn_row(rows);
        let back_row = side.back_row(rows);

        let pawns = (0..8).map(|col| (UnitKind::Pawn, Square::new(pawn_row, col)));
        let pieces = (0u8..)
            .zip(BACK_RANK)
            .map(|(col, kind)| (kind, Square::new(back_row, col)));

        for (kind, square) in pawns.chain(pieces) {
            units.push(Unit::new(UnitId(next_id), kind, side, square));
            next_id += 1;
        }
    }

    units
}
