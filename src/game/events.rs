//! Random events applied during automatic turns.
//!
//! Events never fail by panicking. A rejected event reports
//! `success = false` and leaves the unit collection untouched.

use tracing::debug;

use crate::game::{Board, Square, Unit, UnitId, UnitKind};

/// Default number of turns a freeze lasts.
pub const DEFAULT_FREEZE_TURNS: u32 = 1;

/// Default number of promoted-kind units a side may hold.
pub const DEFAULT_PROMOTION_CAP: usize = 4;

/// Result of applying an event.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EventOutcome {
    /// Player-facing description.
    pub message: String,
    /// Whether the event changed anything.
    pub success: bool,
    /// Units whose state changed in place (frozen or promoted).
    pub affected: Vec<UnitId>,
    /// Units removed from the collection.
    pub removed: Vec<Unit>,
}

impl EventOutcome {
    fn applied(message: String, affected: Vec<UnitId>, removed: Vec<Unit>) -> Self {
        Self {
            message,
            success: true,
            affected,
            removed,
        }
    }

    fn rejected(message: String) -> Self {
        Self {
            message,
            success: false,
            affected: Vec::new(),
            removed: Vec::new(),
        }
    }
}

/// Adds frozen turns to the target.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Freeze {
    /// Turns added to the frozen counter.
    pub turns: u32,
}

impl Default for Freeze {
    fn default() -> Self {
        Self {
            turns: DEFAULT_FREEZE_TURNS,
        }
    }
}

impl Freeze {
    /// Freeze the unit with id `target`.
    ///
    /// A freeze of zero turns changes nothing and reports failure.
    pub fn apply(&self, target: UnitId, units: &mut [Unit], board: &mut Board) -> EventOutcome {
        if self.turns == 0 {
            return EventOutcome::rejected("A zero-turn freeze has no effect.".to_string());
        }
        let Some(unit) = units.iter_mut().find(|u| u.id == target) else {
            return EventOutcome::rejected(format!("No unit {target} to freeze."));
        };

        unit.freeze(self.turns);
        let message = format!("{} is frozen for {} turn(s)!", unit.kind, self.turns);
        debug!(unit = %target, turns = self.turns, frozen_turns = unit.frozen_turns, "unit frozen");

        board.rebuild(units);
        EventOutcome::applied(message, vec![target], Vec::new())
    }
}

/// Replaces the target with a stronger kind, up to a per-side cap.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PromoteToMorePowerfulUnit {
    /// Kind the target becomes.
    pub kind: UnitKind,
    /// Maximum units of `kind` a side may hold after promotion.
    pub cap: usize,
}

impl Default for PromoteToMorePowerfulUnit {
    fn default() -> Self {
        Self {
            kind: UnitKind::Queen,
            cap: DEFAULT_PROMOTION_CAP,
        }
    }
}

impl PromoteToMorePowerfulUnit {
    /// Promote the unit with id `target` in place.
    ///
    /// Kings are never promoted, and a unit that already is the target kind
    /// is left alone.
    pub fn apply(&self, target: UnitId, units: &mut [Unit], board: &mut Board) -> EventOutcome {
        let Some(idx) = units.iter().position(|u| u.id == target) else {
            return EventOutcome::rejected(format!("No unit {target} to promote."));
        };
        let unit = units[idx];

        if unit.kind == UnitKind::King {
            return EventOutcome::rejected(format!("{} King cannot be promoted.", unit.side));
        }
        if unit.kind == self.kind {
            return EventOutcome::rejected(format!("{unit} is already a {}.", self.kind));
        }

        let held = units
            .iter()
            .filter(|u| u.side == unit.side && u.kind == self.kind)
            .count();
        if held >= self.cap {
            debug!(unit = %target, held, cap = self.cap, "promotion cap reached");
            return EventOutcome::rejected(format!(
                "{} already has {held} {}s, no promotion.",
                unit.side, self.kind
            ));
        }

        units[idx] = unit.promoted_to(self.kind);
        debug!(unit = %target, from = %unit.kind, to = %self.kind, "unit promoted");

        board.rebuild(units);
        EventOutcome::applied(
            format!("{} piece has been promoted to {}!", unit.side, self.kind),
            vec![target],
            Vec::new(),
        )
    }
}

/// Removes every unit in the 3x3 block around a center square.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct AreaRemoval;

impl AreaRemoval {
    /// Explode centered on the square of unit `target`.
    pub fn apply(&self, target: UnitId, units: &mut Vec<Unit>, board: &mut Board) -> EventOutcome {
        let Some(center) = units.iter().find(|u| u.id == target).map(|u| u.square) else {
            return EventOutcome::rejected(format!("No unit {target} to explode."));
        };

        let removed = self.trigger(i32::from(center.row), i32::from(center.col), units, board);
        let message = format!("Explosion at {center} removed {} unit(s)!", removed.len());
        EventOutcome::applied(message, Vec::new(), removed)
    }

    /// Explode centered on `(row, col)`.
    ///
    /// The neighborhood is clamped to the board. A center off the board
    /// removes nothing. Returns the removed units in collection order.
    pub fn trigger(&self, row: i32, col: i32, units: &mut Vec<Unit>, board: &mut Board) -> Vec<Unit> {
        if !board.contains(row, col) {
            return Vec::new();
        }

        let in_blast = |square: Square| {
            (i32::from(square.row) - row).abs() <= 1 && (i32::from(square.col) - col).abs() <= 1
        };

        let (removed, kept): (Vec<Unit>, Vec<Unit>) =
            units.drain(..).partition(|u| in_blast(u.square));
        *units = kept;

        debug!(row, col, removed = removed.len(), "explosion");
        board.rebuild(units);
        removed
    }
}

/// The closed set of events an automatic turn can draw from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RandomEvent {
    /// See [`Freeze`].
    Freeze(Freeze),
    /// See [`PromoteToMorePowerfulUnit`].
    Promote(PromoteToMorePowerfulUnit),
    /// See [`AreaRemoval`].
    AreaRemoval(AreaRemoval),
}

impl RandomEvent {
    /// Short name for logs.
    #[must_use]
    pub const fn name(&self) -> &'static str {
        match self {
            RandomEvent::Freeze(_) => "freeze",
            RandomEvent::Promote(_) => "promote",
            RandomEvent::AreaRemoval(_) => "area-removal",
        }
    }

    /// Apply the event to unit `target`, mutating `units` and refreshing `board`.
    pub fn apply(&self, target: UnitId, units: &mut Vec<Unit>, board: &mut Board) -> EventOutcome {
        match self {
            RandomEvent::Freeze(event) => event.apply(target, units, board),
            RandomEvent::Promote(event) => event.apply(target, units, board),
            RandomEvent::AreaRemoval(event) => event.apply(target, units, board),
        }
    }
}
