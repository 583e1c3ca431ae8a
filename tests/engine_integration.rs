//! Multi-turn integration tests for the turn engine.
//!
//! These drive whole games through the public API: scripted openings,
//! King captures, event-heavy configurations and seeded self-play.
//!
//! Run with: cargo test --release engine_integration

#![allow(missing_docs)]
#![allow(clippy::unwrap_used)]

use chess_party::game::{ALL_FROZEN_MESSAGE, check_invariants};
use chess_party::simulation::{DEFAULT_MAX_MOVES, run_game, run_tournament};
use chess_party::{
    EngineConfig, EngineError, Side, Square, TurnEngine, Unit, UnitId, UnitKind,
};
use rand::SeedableRng;
use rand::rngs::StdRng;

fn quiet() -> EngineConfig {
    EngineConfig {
        event_chance: 0.0,
        ..EngineConfig::default()
    }
}

fn engine(config: EngineConfig, seed: u64) -> TurnEngine<StdRng> {
    TurnEngine::new(config, StdRng::seed_from_u64(seed)).unwrap()
}

fn id_at(engine: &TurnEngine<StdRng>, row: i32, col: i32) -> UnitId {
    engine.board().get_unit(row, col).unwrap().id
}

#[test]
fn test_scripted_opening_alternates_sides() {
    let mut engine = engine(quiet(), 1);

    let moves = [((1, 4), (3, 4)), ((6, 4), (4, 4)), ((0, 6), (2, 5)), ((7, 1), (5, 2))];
    for (i, ((fr, fc), (tr, tc))) in moves.into_iter().enumerate() {
        let expected = if i % 2 == 0 { Side::White } else { Side::Black };
        assert_eq!(engine.state().current_side(), expected);

        let unit = id_at(&engine, fr, fc);
        let report = engine.submit_move(unit, tr, tc).unwrap();
        assert_eq!(report.to, Square::new(u8::try_from(tr).unwrap(), u8::try_from(tc).unwrap()));
    }

    assert_eq!(engine.state().moves_played(), 4);
    assert_eq!(engine.state().units().len(), 32);
    assert!(check_invariants(engine.state()).is_empty());
}

#[test]
fn test_scholars_mate_style_king_capture() {
    let mut engine = engine(quiet(), 2);

    // Open lines to the Black King, then walk the Queen in
    let script = [
        ((1, 4), (2, 4)), // White pawn
        ((6, 3), (5, 3)), // Black pawn
        ((0, 3), (4, 7)), // White Queen out
        ((6, 0), (5, 0)), // Black pawn
        ((4, 7), (6, 5)), // Queen takes f-pawn
        ((5, 0), (4, 0)), // Black pawn
    ];
    for ((fr, fc), (tr, tc)) in script {
        let unit = id_at(&engine, fr, fc);
        engine.submit_move(unit, tr, tc).unwrap();
    }
    assert_eq!(engine.state().captured_by(Side::White).len(), 1);

    let queen = id_at(&engine, 6, 5);
    let report = engine.submit_move(queen, 7, 4).unwrap();

    assert!(report.game_over);
    assert_eq!(report.winner, Some(Side::White));
    assert_eq!(report.captured.map(|u| u.kind), Some(UnitKind::King));
    assert!(!engine.state().has_king(Side::Black));
    assert_eq!(engine.state().event_log().last().unwrap(), "Checkmate! White wins.");

    let pawn = id_at(&engine, 4, 0);
    assert_eq!(engine.submit_move(pawn, 3, 0), Err(EngineError::GameOver));
}

#[test]
fn test_rejected_moves_do_not_touch_state() {
    let mut engine = engine(EngineConfig::default(), 3);
    let before = engine.state().units().to_vec();
    let knight = id_at(&engine, 0, 1);

    for (row, col) in [(-1, 0), (8, 8), (1, 1), (3, 3), (0, 1)] {
        assert!(engine.submit_move(knight, row, col).is_err());
    }
    assert!(engine.submit_move(UnitId(500), 2, 2).is_err());

    assert_eq!(engine.state().units(), before.as_slice());
    assert!(engine.state().event_log().is_empty());
    assert_eq!(engine.state().moves_played(), 0);
}

#[test]
fn test_all_frozen_board_reports_and_waits() {
    let mut units = chess_party::initial_standard_setup();
    for unit in &mut units {
        unit.freeze(3);
    }
    let mut engine =
        TurnEngine::with_units(EngineConfig::default(), units, StdRng::seed_from_u64(4)).unwrap();

    for _ in 0..3 {
        assert_eq!(engine.play_automatic_turn(), vec![ALL_FROZEN_MESSAGE.to_string()]);
    }
    assert!(engine.state().units().iter().all(Unit::is_frozen));
}

#[test]
fn test_explosions_can_end_the_game() {
    let config = EngineConfig {
        event_chance: 1.0,
        area_removal: true,
        ..EngineConfig::default()
    };

    let mut ended_by_blast = false;
    for seed in 0..200 {
        let mut engine = engine(config, seed);
        for _ in 0..50 {
            engine.play_automatic_turn();
            assert!(check_invariants(engine.state()).is_empty());
            if engine.state().is_game_over() {
                break;
            }
        }
        if engine.state().is_game_over() {
            ended_by_blast = true;
            // Blasts are not captures
            assert!(engine.state().captured_by(Side::White).is_empty());
            assert!(engine.state().captured_by(Side::Black).is_empty());
            let winner = engine.state().winner();
            assert!(winner.is_none_or(|side| engine.state().has_king(side)));
        }
    }
    assert!(ended_by_blast, "no seed exploded a King in 50 turns");
}

#[test]
fn test_promotions_respect_cap() {
    let config = EngineConfig {
        event_chance: 1.0,
        promotion_cap: 2,
        ..EngineConfig::default()
    };
    let mut engine = engine(config, 5);

    for _ in 0..300 {
        engine.play_automatic_turn();
    }

    for side in [Side::White, Side::Black] {
        let queens = engine
            .state()
            .units()
            .iter()
            .filter(|u| u.side == side && u.kind == UnitKind::Queen)
            .count();
        assert!(queens <= 2, "{side} has {queens} queens");
    }
    assert!(engine.state().units().iter().any(|u| u.promoted));
}

#[test]
fn test_self_play_games_are_consistent() {
    let config = EngineConfig::default();
    for seed in 0..25 {
        let result = run_game(seed, &config, DEFAULT_MAX_MOVES).unwrap();
        assert!(result.moves_played <= DEFAULT_MAX_MOVES);

        let captured = result.captured_by_white.len() + result.captured_by_black.len();
        assert!(captured <= 31, "seed {seed} captured {captured}");
        assert!(result.captured_by_white.iter().all(|u| u.side == Side::Black));
        assert!(result.captured_by_black.iter().all(|u| u.side == Side::White));
    }
}

#[test]
fn test_tournament_counts_every_game() {
    let stats = run_tournament(7, 16, &EngineConfig::default(), 100, || {}).unwrap();
    assert_eq!(stats.games_played, 16);
    assert_eq!(stats.white_wins + stats.black_wins + stats.undecided, 16);
    assert!(stats.longest_game <= 100);
}
