//! Headless self-play and tournament batches.
//!
//! Each game owns its engine and a generator seeded from its own seed, so
//! games are reproducible and can run on any thread.

use rand::SeedableRng;
use rand::rngs::StdRng;
use rand::seq::IndexedRandom;
use rayon::prelude::*;
use serde::Serialize;
use tracing::{debug, info, warn};

use crate::config::EngineConfig;
use crate::error::ConfigError;
use crate::game::{GameState, Side, TurnEngine, Unit};

/// Default cap on moves per self-play game.
pub const DEFAULT_MAX_MOVES: u32 = 500;

/// Outcome of one self-play game.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct GameResult {
    /// Seed the game was played with.
    pub seed: u64,
    /// Winner, or `None` if the game hit the move cap or lost both Kings.
    pub winner: Option<Side>,
    /// Moves applied.
    pub moves_played: u32,
    /// Black units White captured.
    pub captured_by_white: Vec<Unit>,
    /// White units Black captured.
    pub captured_by_black: Vec<Unit>,
    /// Full message log.
    pub log: Vec<String>,
}

/// A seeded self-play game advanced one turn at a time.
///
/// The side to move picks a random movable unit and a random legal target.
/// A side with nothing to move passes. Passes count towards the move cap.
#[derive(Debug, Clone)]
pub struct SelfPlay {
    engine: TurnEngine<StdRng>,
    seed: u64,
    max_moves: u32,
    turns: u32,
}

impl SelfPlay {
    /// Set up a game from the standard layout.
    ///
    /// # Errors
    ///
    /// Returns an error if `config` does not validate.
    pub fn new(seed: u64, config: &EngineConfig, max_moves: u32) -> Result<Self, ConfigError> {
        Ok(Self {
            engine: TurnEngine::new(*config, StdRng::seed_from_u64(seed))?,
            seed,
            max_moves,
            turns: 0,
        })
    }

    /// Current game state.
    #[must_use]
    pub fn state(&self) -> &GameState {
        self.engine.state()
    }

    /// Whether the game ended or hit the move cap.
    #[must_use]
    pub fn is_finished(&self) -> bool {
        self.engine.state().is_game_over() || self.turns >= self.max_moves
    }

    /// Play one move (or pass) and its automatic turn.
    ///
    /// Returns the messages produced, or `None` once the game is finished.
    pub fn step(&mut self) -> Option<Vec<String>> {
        if self.is_finished() {
            return None;
        }
        self.turns += 1;

        let movable = self.engine.movable_units();
        let Some(&unit) = movable.choose(self.engine.rng_mut()) else {
            return Some(self.engine.pass());
        };

        let targets = self.engine.legal_moves(unit);
        let Some(&target) = targets.choose(self.engine.rng_mut()) else {
            return Some(self.engine.pass());
        };

        match self.engine.submit_move(unit, i32::from(target.row), i32::from(target.col)) {
            Ok(report) => Some(report.messages),
            Err(err) => {
                warn!(seed = self.seed, unit = %unit, %err, "self-play move rejected");
                // Stop here rather than loop on a rejected move
                self.turns = self.max_moves;
                Some(Vec::new())
            }
        }
    }

    /// Summarize the game as it stands.
    #[must_use]
    pub fn result(&self) -> GameResult {
        let state = self.engine.state();
        GameResult {
            seed: self.seed,
            winner: state.winner(),
            moves_played: state.moves_played(),
            captured_by_white: state.captured_by(Side::White).to_vec(),
            captured_by_black: state.captured_by(Side::Black).to_vec(),
            log: state.event_log().to_vec(),
        }
    }
}

/// Play one seeded game to completion or `max_moves`.
///
/// # Errors
///
/// Returns an error if `config` does not validate.
pub fn run_game(seed: u64, config: &EngineConfig, max_moves: u32) -> Result<GameResult, ConfigError> {
    let mut game = SelfPlay::new(seed, config, max_moves)?;
    while game.step().is_some() {}

    let result = game.result();
    debug!(seed, winner = ?result.winner, moves = result.moves_played, "game finished");
    Ok(result)
}

/// Aggregated results of many games.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TournamentStats {
    /// Games played.
    pub games_played: u64,
    /// Games White won.
    pub white_wins: u64,
    /// Games Black won.
    pub black_wins: u64,
    /// Games without a winner.
    pub undecided: u64,
    /// Moves across all games.
    pub total_moves: u64,
    /// Units captured across all games.
    pub total_captures: u64,
    /// Longest game in moves.
    pub longest_game: u32,
}

impl TournamentStats {
    /// Add a game result to the stats.
    pub fn add_result(&mut self, result: &GameResult) {
        self.games_played += 1;
        self.total_moves += u64::from(result.moves_played);
        self.total_captures +=
            (result.captured_by_white.len() + result.captured_by_black.len()) as u64;
        self.longest_game = self.longest_game.max(result.moves_played);

        match result.winner {
            Some(Side::White) => self.white_wins += 1,
            Some(Side::Black) => self.black_wins += 1,
            None => self.undecided += 1,
        }
    }

    /// Fold another partial result into this one.
    pub fn merge(&mut self, other: &TournamentStats) {
        self.games_played += other.games_played;
        self.white_wins += other.white_wins;
        self.black_wins += other.black_wins;
        self.undecided += other.undecided;
        self.total_moves += other.total_moves;
        self.total_captures += other.total_captures;
        self.longest_game = self.longest_game.max(other.longest_game);
    }

    /// Wins by `side`.
    #[must_use]
    pub const fn wins(&self, side: Side) -> u64 {
        match side {
            Side::White => self.white_wins,
            Side::Black => self.black_wins,
        }
    }

    /// Share of games `side` won (0.0-1.0).
    #[must_use]
    #[allow(clippy::cast_precision_loss)]
    pub fn win_rate(&self, side: Side) -> f64 {
        if self.games_played == 0 {
            return 0.0;
        }
        self.wins(side) as f64 / self.games_played as f64
    }

    /// Share of games without a winner (0.0-1.0).
    #[must_use]
    #[allow(clippy::cast_precision_loss)]
    pub fn undecided_rate(&self) -> f64 {
        if self.games_played == 0 {
            return 0.0;
        }
        self.undecided as f64 / self.games_played as f64
    }

    /// Average game length in moves.
    #[must_use]
    #[allow(clippy::cast_precision_loss)]
    pub fn avg_moves(&self) -> f64 {
        if self.games_played == 0 {
            return 0.0;
        }
        self.total_moves as f64 / self.games_played as f64
    }
}

/// Play `games` games in parallel with seeds `base_seed..base_seed + games`.
///
/// `on_game` runs after every finished game, from whichever worker played it.
///
/// # Errors
///
/// Returns an error if `config` does not validate or the board is too small
/// for the standard layout.
pub fn run_tournament<F>(
    base_seed: u64,
    games: u64,
    config: &EngineConfig,
    max_moves: u32,
    on_game: F,
) -> Result<TournamentStats, ConfigError>
where
    F: Fn() + Sync,
{
    config.validate_standard_layout()?;

    // Each worker folds into its own stats, merged at the end
    let stats = (0..games)
        .into_par_iter()
        .fold(TournamentStats::default, |mut local, i| {
            let seed = base_seed.wrapping_add(i);
            match run_game(seed, config, max_moves) {
                Ok(result) => local.add_result(&result),
                Err(err) => warn!(seed, %err, "game skipped"),
            }
            on_game();
            local
        })
        .reduce(TournamentStats::default, |mut a, b| {
            a.merge(&b);
            a
        });

    info!(
        games = stats.games_played,
        white = stats.white_wins,
        black = stats.black_wins,
        undecided = stats.undecided,
        "tournament finished"
    );
    Ok(stats)
}

#[cfg(test)]
mod tests {
    use std::sync::atomic::{AtomicU64, Ordering};

    use super::*;
    use crate::game::UnitKind;

    #[test]
    fn test_run_game_is_reproducible() {
        let config = EngineConfig::default();
        let a = run_game(17, &config, 100).unwrap();
        let b = run_game(17, &config, 100).unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn test_run_game_respects_cap() {
        let result = run_game(3, &EngineConfig::default(), 10).unwrap();
        assert!(result.moves_played <= 10);
        assert_eq!(result.seed, 3);
        assert!(!result.log.is_empty());
    }

    #[test]
    fn test_winner_captured_enemy_king() {
        let config = EngineConfig::default();
        for seed in 0..20 {
            let result = run_game(seed, &config, DEFAULT_MAX_MOVES).unwrap();
            if let Some(winner) = result.winner {
                let captured = match winner {
                    Side::White => &result.captured_by_white,
                    Side::Black => &result.captured_by_black,
                };
                assert!(captured.iter().any(|u| u.kind == UnitKind::King), "seed {seed}");
            }
        }
    }

    #[test]
    fn test_self_play_steps_until_finished() {
        let mut game = SelfPlay::new(5, &EngineConfig::default(), 12).unwrap();
        let mut steps = 0;
        while let Some(messages) = game.step() {
            assert!(!messages.is_empty());
            steps += 1;
        }
        assert!(game.is_finished());
        assert!(steps <= 12);
        assert!(game.step().is_none());
        assert_eq!(game.result(), run_game(5, &EngineConfig::default(), 12).unwrap());
    }

    #[test]
    fn test_run_game_rejects_bad_config() {
        let config = EngineConfig {
            rows: 2,
            ..EngineConfig::default()
        };
        assert!(run_game(0, &config, 10).is_err());
        assert!(run_tournament(0, 4, &config, 10, || {}).is_err());
    }

    #[test]
    fn test_stats_add_and_merge() {
        let result = |winner, moves| GameResult {
            seed: 0,
            winner,
            moves_played: moves,
            captured_by_white: Vec::new(),
            captured_by_black: Vec::new(),
            log: Vec::new(),
        };

        let mut a = TournamentStats::default();
        a.add_result(&result(Some(Side::White), 10));
        a.add_result(&result(None, 30));

        let mut b = TournamentStats::default();
        b.add_result(&result(Some(Side::Black), 20));

        let before = a;
        a.merge(&b);
        assert_eq!(before.games_played, 2);

        assert_eq!(a.games_played, 3);
        assert_eq!(a.wins(Side::White), 1);
        assert_eq!(a.wins(Side::Black), 1);
        assert_eq!(a.undecided, 1);
        assert_eq!(a.longest_game, 30);
        assert!((a.avg_moves() - 20.0).abs() < f64::EPSILON);
        assert!((a.win_rate(Side::White) - 1.0 / 3.0).abs() < 1e-9);
    }

    #[test]
    fn test_empty_stats() {
        let stats = TournamentStats::default();
        assert!(stats.avg_moves().abs() < f64::EPSILON);
        assert!(stats.win_rate(Side::Black).abs() < f64::EPSILON);
    }

    #[test]
    fn test_tournament_matches_sequential() {
        let config = EngineConfig::default();
        let finished = AtomicU64::new(0);

        let stats = run_tournament(100, 8, &config, 60, || {
            finished.fetch_add(1, Ordering::Relaxed);
        })
        .unwrap();

        let mut expected = TournamentStats::default();
        for seed in 100..108 {
            expected.add_result(&run_game(seed, &config, 60).unwrap());
        }

        assert_eq!(stats, expected);
        assert_eq!(finished.load(Ordering::Relaxed), 8);
    }
}
