#![no_main]

//! Move sequence fuzzer.
//!
//! Submits arbitrary unit ids and signed coordinates, interleaved with
//! automatic turns and passes. Rejected moves must leave the state exactly
//! as it was, and the invariants must hold after every call.

use arbitrary::Arbitrary;
use chess_party::game::check_invariants;
use chess_party::{EngineConfig, SelectionPool, TurnEngine, UnitId};
use libfuzzer_sys::fuzz_target;
use rand::SeedableRng;
use rand::rngs::StdRng;

/// A fuzzer-generated engine call.
#[derive(Arbitrary, Debug, Clone)]
enum FuzzAction {
    /// Submit a move, possibly for a bogus unit or off-board square.
    Move { unit: u16, row: i8, col: i8 },
    /// Run an automatic turn.
    Automatic,
    /// Pass the turn.
    Pass,
}

/// Structured input for move fuzzing.
#[derive(Arbitrary, Debug)]
struct MovesInput {
    /// RNG seed for automatic turns.
    seed: u64,
    /// Event chance in hundredths.
    event_percent: u8,
    /// Whether explosions are enabled.
    area_removal: bool,
    /// Whether automatic turns pick from the side to move only.
    current_side: bool,
    /// Calls to make.
    actions: Vec<FuzzAction>,
}

fuzz_target!(|input: MovesInput| {
    let config = EngineConfig {
        event_chance: f64::from(input.event_percent % 101) / 100.0,
        area_removal: input.area_removal,
        selection: if input.current_side {
            SelectionPool::CurrentSide
        } else {
            SelectionPool::Global
        },
        ..EngineConfig::default()
    };

    let Ok(mut engine) = TurnEngine::new(config, StdRng::seed_from_u64(input.seed)) else {
        return;
    };

    for action in input.actions.into_iter().take(200) {
        match action {
            FuzzAction::Move { unit, row, col } => {
                let before = engine.state().units().to_vec();
                let side = engine.state().current_side();
                // Bias towards real ids
                let id = UnitId(unit % 40);

                if engine.submit_move(id, i32::from(row), i32::from(col)).is_err() {
                    assert_eq!(engine.state().units(), before.as_slice());
                    assert_eq!(engine.state().current_side(), side);
                }
            }
            FuzzAction::Automatic => {
                let messages = engine.play_automatic_turn();
                assert!(!messages.is_empty());
            }
            FuzzAction::Pass => {
                engine.pass();
            }
        }

        let violations = check_invariants(engine.state());
        assert!(violations.is_empty(), "Invariants violated: {violations:?}");

        if engine.state().is_game_over() {
            assert!(engine.movable_units().is_empty());
            break;
        }
    }
});
