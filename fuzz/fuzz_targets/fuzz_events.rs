#![no_main]

//! Random event fuzzer.
//!
//! Applies freezes, promotions and explosions to arbitrary targets on an
//! arbitrary unit layout and checks that the board snapshot stays in sync
//! with the unit list.

use arbitrary::Arbitrary;
use chess_party::game::{
    AreaRemoval, Board, Freeze, PromoteToMorePowerfulUnit, RandomEvent, Side, Square, Unit,
    UnitId, UnitKind,
};
use libfuzzer_sys::fuzz_target;

const ROWS: u8 = 8;
const COLS: u8 = 8;

/// A fuzzer-generated event.
#[derive(Arbitrary, Debug, Clone)]
enum FuzzEvent {
    /// Freeze a unit.
    Freeze { target: u8, turns: u8 },
    /// Promote a unit.
    Promote { target: u8, cap: u8 },
    /// Explode around a unit.
    Explode { target: u8 },
    /// Explode around a raw coordinate.
    Trigger { row: i8, col: i8 },
}

/// Structured input for event fuzzing.
#[derive(Arbitrary, Debug)]
struct EventsInput {
    /// Raw unit placements as (square index, kind index, black).
    placements: Vec<(u8, u8, bool)>,
    /// Events to apply.
    events: Vec<FuzzEvent>,
}

fuzz_target!(|input: EventsInput| {
    // One unit per square, first placement wins
    let mut units: Vec<Unit> = Vec::new();
    for (square, kind, black) in input.placements.into_iter().take(64) {
        let square = Square::new((square / COLS) % ROWS, square % COLS);
        if units.iter().any(|u| u.square == square) {
            continue;
        }
        let kind = UnitKind::ALL[usize::from(kind) % UnitKind::ALL.len()];
        let side = if black { Side::Black } else { Side::White };
        let id = UnitId(u16::try_from(units.len()).unwrap_or(u16::MAX));
        units.push(Unit::new(id, kind, side, square));
    }

    let Some(mut board) = Board::from_units(ROWS, COLS, &units) else {
        return;
    };

    for event in input.events.into_iter().take(50) {
        let count_before = units.len();
        let outcome = match event {
            FuzzEvent::Freeze { target, turns } => RandomEvent::Freeze(Freeze {
                turns: u32::from(turns),
            })
            .apply(UnitId(u16::from(target)), &mut units, &mut board),
            FuzzEvent::Promote { target, cap } => RandomEvent::Promote(PromoteToMorePowerfulUnit {
                kind: UnitKind::Queen,
                cap: usize::from(cap % 8),
            })
            .apply(UnitId(u16::from(target)), &mut units, &mut board),
            FuzzEvent::Explode { target } => RandomEvent::AreaRemoval(AreaRemoval).apply(
                UnitId(u16::from(target)),
                &mut units,
                &mut board,
            ),
            FuzzEvent::Trigger { row, col } => {
                let removed =
                    AreaRemoval.trigger(i32::from(row), i32::from(col), &mut units, &mut board);
                assert!(removed.len() <= 9);
                assert_eq!(units.len() + removed.len(), count_before);
                continue;
            }
        };

        assert_eq!(units.len() + outcome.removed.len(), count_before);
        if !outcome.success {
            assert!(outcome.affected.is_empty());
            assert!(outcome.removed.is_empty());
        }

        // The snapshot matches the list
        assert_eq!(board.occupied_count(), units.len());
        for unit in &units {
            assert_eq!(board.unit_at(unit.square), Some(unit));
        }
    }
});
