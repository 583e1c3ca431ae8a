//! Output formatting utilities for CLI.

use std::fmt::Write;

use chess_party::Side;
use chess_party::simulation::{GameResult, TournamentStats};
use serde::Serialize;

/// Messages shown at the end of a text game report.
const LOG_TAIL: usize = 10;

/// Format a game result as human-readable text.
pub(super) fn format_game_text(result: &GameResult, board: &str) -> String {
    let mut output = String::new();

    let _ = writeln!(output, "Game Result (seed: {})", result.seed);
    match result.winner {
        Some(winner) => {
            let _ = writeln!(output, "  Winner: {winner}");
        }
        None => output.push_str("  Winner: none\n"),
    }
    let _ = writeln!(output, "  Moves: {}", result.moves_played);
    let _ = writeln!(
        output,
        "  Captures: White {}, Black {}\n",
        result.captured_by_white.len(),
        result.captured_by_black.len()
    );

    let start = result.log.len().saturating_sub(LOG_TAIL);
    if start > 0 {
        let _ = writeln!(output, "  ... {start} earlier messages");
    }
    for message in &result.log[start..] {
        let _ = writeln!(output, "  {message}");
    }

    output.push('\n');
    output.push_str(board);
    output
}

/// JSON-serializable tournament result.
#[derive(Debug, Serialize)]
pub(super) struct JsonTournamentResult {
    /// Total games played.
    games_played: u64,
    /// Games White won.
    white_wins: u64,
    /// Games Black won.
    black_wins: u64,
    /// Games without a winner.
    undecided: u64,
    /// White win rate (0.0-1.0).
    white_win_rate: f64,
    /// Black win rate (0.0-1.0).
    black_win_rate: f64,
    /// Average game length in moves.
    avg_moves: f64,
    /// Longest game in moves.
    longest_game: u32,
    /// Units captured across all games.
    total_captures: u64,
}

impl JsonTournamentResult {
    /// Create from stats.
    pub(super) fn from_stats(stats: &TournamentStats) -> Self {
        Self {
            games_played: stats.games_played,
            white_wins: stats.white_wins,
            black_wins: stats.black_wins,
            undecided: stats.undecided,
            white_win_rate: stats.win_rate(Side::White),
            black_win_rate: stats.win_rate(Side::Black),
            avg_moves: stats.avg_moves(),
            longest_game: stats.longest_game,
            total_captures: stats.total_captures,
        }
    }
}

/// Format tournament stats as human-readable text.
pub(super) fn format_tournament_text(stats: &TournamentStats) -> String {
    let mut output = String::new();

    let _ = writeln!(output, "Tournament Results ({} games)", stats.games_played);
    output.push_str("========================================\n\n");

    output.push_str("Win Rates:\n");
    for side in [Side::White, Side::Black] {
        let _ = writeln!(
            output,
            "  {side}: {:.1}% ({} wins)",
            stats.win_rate(side) * 100.0,
            stats.wins(side)
        );
    }
    let _ = writeln!(
        output,
        "  Undecided: {} ({:.1}%)\n",
        stats.undecided,
        stats.undecided_rate() * 100.0
    );

    let _ = writeln!(output, "Average Game Length: {:.0} moves", stats.avg_moves());
    let _ = writeln!(output, "Longest Game: {} moves", stats.longest_game);
    let _ = writeln!(output, "Total Captures: {}", stats.total_captures);

    output
}

/// Format tournament stats as CSV.
pub(super) fn format_tournament_csv(stats: &TournamentStats) -> String {
    let mut output = String::new();

    // Header
    output.push_str("side,wins,win_rate\n");

    // Data rows
    for side in [Side::White, Side::Black] {
        let _ = writeln!(output, "{side},{},{:.4}", stats.wins(side), stats.win_rate(side));
    }
    let _ = writeln!(output, "none,{},{:.4}", stats.undecided, stats.undecided_rate());

    output
}
