//! Engine configuration.

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;
use crate::game::{
    AreaRemoval, DEFAULT_FREEZE_TURNS, DEFAULT_PROMOTION_CAP, Freeze, MAX_DIMENSION,
    MIN_SETUP_COLS, MIN_SETUP_ROWS, PromoteToMorePowerfulUnit, RandomEvent, UnitKind,
};

/// Which units an automatic turn may pick from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum SelectionPool {
    /// Any unfrozen unit of either side.
    #[default]
    Global,
    /// Only unfrozen units of the side to move.
    CurrentSide,
}

/// Tunable rules.
///
/// Missing JSON fields fall back to [`EngineConfig::default`].
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct EngineConfig {
    /// Board rows.
    pub rows: u8,
    /// Board columns.
    pub cols: u8,
    /// Chance that an automatic turn fires an event instead of listing moves.
    pub event_chance: f64,
    /// Turns added by a freeze.
    pub freeze_turns: u32,
    /// Kind a promotion produces.
    pub promotion_kind: UnitKind,
    /// Per-side limit on units of `promotion_kind`.
    pub promotion_cap: usize,
    /// Whether explosions join the event pool.
    pub area_removal: bool,
    /// Pool automatic turns select from.
    pub selection: SelectionPool,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            rows: 8,
            cols: 8,
            event_chance: 0.5,
            freeze_turns: DEFAULT_FREEZE_TURNS,
            promotion_kind: UnitKind::Queen,
            promotion_cap: DEFAULT_PROMOTION_CAP,
            area_removal: false,
            selection: SelectionPool::Global,
        }
    }
}

impl EngineConfig {
    /// Parse a JSON config and validate it.
    ///
    /// # Errors
    ///
    /// Returns an error if the JSON is malformed or a value is out of range.
    pub fn from_json_str(json: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Read, parse and validate a JSON config file.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or is invalid.
    pub fn from_json_file(path: &Path) -> Result<Self, ConfigError> {
        let json = fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_json_str(&json)
    }

    /// Check that every field holds a usable value.
    ///
    /// Any board from 1x1 up to [`MAX_DIMENSION`] is accepted; custom layouts
    /// may be smaller than the standard one.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Invalid`] describing the first bad field.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !(1..=MAX_DIMENSION).contains(&self.rows) {
            return Err(ConfigError::Invalid(format!(
                "rows must be in 1..={MAX_DIMENSION}, got {}",
                self.rows
            )));
        }
        if !(1..=MAX_DIMENSION).contains(&self.cols) {
            return Err(ConfigError::Invalid(format!(
                "cols must be in 1..={MAX_DIMENSION}, got {}",
                self.cols
            )));
        }
        if !(0.0..=1.0).contains(&self.event_chance) {
            return Err(ConfigError::Invalid(format!(
                "event_chance must be in 0..=1, got {}",
                self.event_chance
            )));
        }
        if self.freeze_turns == 0 {
            return Err(ConfigError::Invalid("freeze_turns must be at least 1".to_string()));
        }
        if self.promotion_kind == UnitKind::King {
            return Err(ConfigError::Invalid("promotion_kind cannot be King".to_string()));
        }
        Ok(())
    }

    /// Like [`validate`](Self::validate), but also require room for the
    /// standard layout.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Invalid`] if a field is bad or the board is
    /// smaller than [`MIN_SETUP_ROWS`] x [`MIN_SETUP_COLS`].
    pub fn validate_standard_layout(&self) -> Result<(), ConfigError> {
        self.validate()?;
        if self.rows < MIN_SETUP_ROWS || self.cols < MIN_SETUP_COLS {
            return Err(ConfigError::Invalid(format!(
                "the standard layout needs at least {MIN_SETUP_ROWS}x{MIN_SETUP_COLS}, got {}x{}",
                self.rows, self.cols
            )));
        }
        Ok(())
    }

    /// Events an automatic turn draws from, in a fixed order.
    #[must_use]
    pub fn events(&self) -> Vec<RandomEvent> {
        let mut events = vec![
            RandomEvent::Freeze(Freeze {
                turns: self.freeze_turns,
            }),
            RandomEvent::Promote(PromoteToMorePowerfulUnit {
                kind: self.promotion_kind,
                cap: self.promotion_cap,
            }),
        ];
        if self.area_removal {
            events.push(RandomEvent::AreaRemoval(AreaRemoval));
        }
        events
    }
}

#[cfg(test)]
mod tests {
    use std::io::Write;

    use super::*;

    #[test]
    fn test_default_is_valid() {
        let config = EngineConfig::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.events().len(), 2);
    }

    #[test]
    fn test_area_removal_joins_pool() {
        let config = EngineConfig {
            area_removal: true,
            ..EngineConfig::default()
        };
        assert_eq!(config.events().last().map(RandomEvent::name), Some("area-removal"));
    }

    #[test]
    fn test_partial_json_uses_defaults() {
        let config =
            EngineConfig::from_json_str(r#"{ "freeze_turns": 3, "selection": "current-side" }"#)
                .unwrap();
        assert_eq!(config.freeze_turns, 3);
        assert_eq!(config.selection, SelectionPool::CurrentSide);
        assert_eq!(config.rows, 8);
        assert_eq!(config.promotion_cap, DEFAULT_PROMOTION_CAP);
    }

    #[test]
    fn test_rejects_unknown_field() {
        assert!(matches!(
            EngineConfig::from_json_str(r#"{ "colour": "red" }"#),
            Err(ConfigError::Parse(_))
        ));
    }

    #[test]
    fn test_rejects_bad_values() {
        for json in [
            r#"{ "rows": 0 }"#,
            r#"{ "cols": 30 }"#,
            r#"{ "freeze_turns": 0 }"#,
            r#"{ "event_chance": 1.5 }"#,
            r#"{ "promotion_kind": "King" }"#,
        ] {
            assert!(
                matches!(EngineConfig::from_json_str(json), Err(ConfigError::Invalid(_))),
                "{json} should be rejected"
            );
        }
    }

    #[test]
    fn test_small_board_needs_custom_layout() {
        let config = EngineConfig::from_json_str(r#"{ "rows": 3, "cols": 3 }"#).unwrap();
        assert!(config.validate().is_ok());
        assert!(matches!(
            config.validate_standard_layout(),
            Err(ConfigError::Invalid(_))
        ));
        assert!(EngineConfig::default().validate_standard_layout().is_ok());
    }

    #[test]
    fn test_from_json_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, r#"{{ "area_removal": true, "event_chance": 1.0 }}"#).unwrap();

        let config = EngineConfig::from_json_file(file.path()).unwrap();
        assert!(config.area_removal);
        assert!((config.event_chance - 1.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let err = EngineConfig::from_json_file(&dir.path().join("absent.json")).unwrap_err();
        assert!(matches!(err, ConfigError::Io { .. }));
    }
}
