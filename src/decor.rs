//! Display timers for promotion sparkles and frost overlays.
//!
//! Presentation state only. The engine never reads it; a front end calls
//! [`Decorations::sync`] after each engine call and [`Decorations::tick`]
//! once per frame.

use std::collections::HashMap;

use crate::game::{Unit, UnitId};

/// Frames a freshly started timer lasts.
pub const DECORATION_FRAMES: u32 = 100;

/// Timers attached to one unit.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Decoration {
    /// Frames left on the promotion sparkle.
    pub promotion_timer: u32,
    /// Frames left on the frost overlay fade.
    pub frozen_timer: u32,
}

impl Decoration {
    fn is_idle(&self) -> bool {
        self.promotion_timer == 0 && self.frozen_timer == 0
    }
}

#[derive(Debug, Clone, Copy)]
struct Seen {
    frozen_turns: u32,
    promoted: bool,
}

/// Decorations keyed by unit id.
#[derive(Debug, Clone, Default)]
pub struct Decorations {
    active: HashMap<UnitId, Decoration>,
    seen: HashMap<UnitId, Seen>,
}

impl Decorations {
    /// Create an empty set, treating `units` as already displayed.
    #[must_use]
    pub fn new(units: &[Unit]) -> Self {
        let mut decorations = Self::default();
        decorations.remember(units);
        decorations
    }

    /// Start timers for units that were promoted or frozen since the last
    /// sync, and forget units that left the board.
    pub fn sync(&mut self, units: &[Unit]) {
        for unit in units {
            let previous = self.seen.get(&unit.id);
            let newly_promoted = unit.promoted && !previous.is_some_and(|s| s.promoted);
            let newly_frozen =
                unit.frozen_turns > previous.map_or(0, |s| s.frozen_turns);

            if newly_promoted {
                self.active.entry(unit.id).or_default().promotion_timer = DECORATION_FRAMES;
            }
            if newly_frozen {
                self.active.entry(unit.id).or_default().frozen_timer = DECORATION_FRAMES;
            }
        }

        self.active.retain(|id, _| units.iter().any(|u| u.id == *id));
        self.remember(units);
    }

    /// Advance every timer by one frame.
    pub fn tick(&mut self) {
        for decoration in self.active.values_mut() {
            decoration.promotion_timer = decoration.promotion_timer.saturating_sub(1);
            decoration.frozen_timer = decoration.frozen_timer.saturating_sub(1);
        }
        self.active.retain(|_, d| !d.is_idle());
    }

    /// Timers for `id`, if any are running.
    #[must_use]
    pub fn get(&self, id: UnitId) -> Option<&Decoration> {
        self.active.get(&id)
    }

    /// Whether the promotion sparkle is showing for `id`.
    #[must_use]
    pub fn is_sparkling(&self, id: UnitId) -> bool {
        self.get(id).is_some_and(|d| d.promotion_timer > 0)
    }

    /// Opacity of the frost overlay for `id`, from 1.0 down to 0.0.
    #[must_use]
    pub fn frost_alpha(&self, id: UnitId) -> f32 {
        self.get(id).map_or(0.0, |d| {
            #[allow(clippy::cast_precision_loss)]
            let alpha = d.frozen_timer as f32 / DECORATION_FRAMES as f32;
            alpha
        })
    }

    /// Number of units with running timers.
    #[must_use]
    pub fn len(&self) -> usize {
        self.active.len()
    }

    /// Whether no timers are running.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.active.is_empty()
    }

    fn remember(&mut self, units: &[Unit]) {
        self.seen = units
            .iter()
            .map(|u| {
                let seen = Seen {
                    frozen_turns: u.frozen_turns,
                    promoted: u.promoted,
                };
                (u.id, seen)
            })
            .collect();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game::{Side, Square, UnitKind};

    fn pawn(id: u16) -> Unit {
        Unit::new(UnitId(id), UnitKind::Pawn, Side::White, Square::new(1, 0))
    }

    #[test]
    fn test_fresh_units_have_no_timers() {
        let units = vec![pawn(0), pawn(1)];
        let mut decorations = Decorations::new(&units);
        decorations.sync(&units);
        assert!(decorations.is_empty());
    }

    #[test]
    fn test_promotion_starts_sparkle() {
        let mut units = vec![pawn(0)];
        let mut decorations = Decorations::new(&units);

        units[0] = units[0].promoted_to(UnitKind::Queen);
        decorations.sync(&units);

        assert!(decorations.is_sparkling(UnitId(0)));
        assert_eq!(decorations.get(UnitId(0)).unwrap().promotion_timer, DECORATION_FRAMES);

        // A second sync does not restart it
        decorations.tick();
        decorations.sync(&units);
        assert_eq!(
            decorations.get(UnitId(0)).unwrap().promotion_timer,
            DECORATION_FRAMES - 1
        );
    }

    #[test]
    fn test_frost_fades_out() {
        let mut units = vec![pawn(0)];
        let mut decorations = Decorations::new(&units);

        units[0].freeze(1);
        decorations.sync(&units);
        assert!((decorations.frost_alpha(UnitId(0)) - 1.0).abs() < f32::EPSILON);

        for _ in 0..DECORATION_FRAMES / 2 {
            decorations.tick();
        }
        assert!((decorations.frost_alpha(UnitId(0)) - 0.5).abs() < 0.01);

        for _ in 0..DECORATION_FRAMES {
            decorations.tick();
        }
        assert!(decorations.frost_alpha(UnitId(0)).abs() < f32::EPSILON);
        assert!(decorations.is_empty());
    }

    #[test]
    fn test_refreeze_restarts_frost() {
        let mut units = vec![pawn(0)];
        let mut decorations = Decorations::new(&units);

        units[0].freeze(1);
        decorations.sync(&units);
        decorations.tick();

        units[0].freeze(1);
        decorations.sync(&units);
        assert_eq!(decorations.get(UnitId(0)).unwrap().frozen_timer, DECORATION_FRAMES);
    }

    #[test]
    fn test_removed_units_are_forgotten() {
        let mut units = vec![pawn(0), pawn(1)];
        let mut decorations = Decorations::new(&units);

        units[0].freeze(2);
        decorations.sync(&units);
        assert_eq!(decorations.len(), 1);

        units.remove(0);
        decorations.sync(&units);
        assert!(decorations.get(UnitId(0)).is_none());
    }
}
