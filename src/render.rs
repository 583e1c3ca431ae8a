//! ASCII renderer for terminal viewing.

use std::fmt::Write;

use crate::decor::Decorations;
use crate::game::{GameState, Side, TileColor, Unit};

/// Render the game to plain text.
///
/// Output format:
/// ```text
/// Move 3, Black to move
///    ┌─────────────────────────┐
///  8 │ R  N  B  Q  K  B  N  R  │
///  7 │ P  P  P  .  P  P* P  P  │
///  6 │ :  .  :  .  :  .  :  .  │
///    ...
///    └─────────────────────────┘
///      A  B  C  D  E  F  G  H
///
/// Legend: upper case=White  lower case=Black  *=frozen  +=promoted
/// Captured by White: p
/// Captured by Black: -
/// ```
///
/// Tile labels follow the board's own labelling, so row 0 is drawn first.
#[must_use]
pub fn render_ascii(state: &GameState, decorations: &Decorations) -> String {
    let mut output = String::new();

    render_header(&mut output, state);
    render_board(&mut output, state, decorations);

    output.push_str("\nLegend: upper case=White  lower case=Black  *=frozen  +=promoted\n");

    for side in [Side::White, Side::Black] {
        let captured = state.captured_by(side);
        let symbols: String = if captured.is_empty() {
            "-".to_string()
        } else {
            captured.iter().map(unit_symbol).collect()
        };
        let _ = writeln!(output, "Captured by {side}: {symbols}");
    }

    output
}

fn render_header(output: &mut String, state: &GameState) {
    let moves = state.moves_played();
    if state.is_game_over() {
        match state.winner() {
            Some(winner) => {
                let _ = writeln!(output, "Move {moves}, game over: {winner} wins");
            }
            None => {
                let _ = writeln!(output, "Move {moves}, game over: no winner");
            }
        }
    } else {
        let _ = writeln!(output, "Move {moves}, {} to move", state.current_side());
    }
}

fn render_board(output: &mut String, state: &GameState, decorations: &Decorations) {
    let board = state.board();
    let width = usize::from(board.cols()) * 3 + 1;
    let border = "─".repeat(width);

    let _ = writeln!(output, "   ┌{border}┐");

    for row in 0..i32::from(board.rows()) {
        let rank = i32::from(board.rows()) - row;
        let _ = write!(output, "{rank:>2} │ ");
        for col in 0..i32::from(board.cols()) {
            match board.get_unit(row, col) {
                Some(unit) => {
                    output.push(unit_symbol(unit));
                    output.push(unit_marker(unit, decorations));
                }
                None => {
                    let empty = match board.tile(row, col).map(|t| t.color) {
                        Some(TileColor::Dark) => ':',
                        _ => '.',
                    };
                    output.push(empty);
                    output.push(' ');
                }
            }
            output.push(' ');
        }
        output.push_str("│\n");
    }

    let _ = writeln!(output, "   └{border}┘");

    output.push_str("     ");
    for col in 0..board.cols() {
        let _ = write!(output, "{}  ", char::from(b'A' + col));
    }
    output.truncate(output.trim_end().len());
    output.push('\n');
}

/// Upper case for White, lower case for Black.
fn unit_symbol(unit: &Unit) -> char {
    let symbol = unit.kind.symbol();
    match unit.side {
        Side::White => symbol,
        Side::Black => symbol.to_ascii_lowercase(),
    }
}

fn unit_marker(unit: &Unit, decorations: &Decorations) -> char {
    if unit.is_frozen() {
        '*'
    } else if decorations.is_sparkling(unit.id) {
        '+'
    } else {
        ' '
    }
}
