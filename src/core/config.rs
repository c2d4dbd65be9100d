//! Engine configuration.

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use super::constants::*;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    #[error("parse error: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("invalid config: {0}")]
    Invalid(String),
}

/// Tunables for a game session.
///
/// Every field falls back to its default when missing from a config file,
/// so a partial file such as `{"seed": 7}` is valid.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    /// Width and height of the square dungeon grid
    pub dungeon_size: usize,
    /// Monsters placed per generated dungeon
    pub monster_count: usize,
    /// Independent per-cell chance of a wall
    pub wall_chance: f64,
    /// Seconds between a monster's death and the return to free movement
    pub combat_resolution_delay: f64,
    /// Combat log lines kept by a session
    pub combat_log_capacity: usize,
    /// Random seed for reproducibility (None = entropy)
    pub seed: Option<u64>,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            dungeon_size: DEFAULT_DUNGEON_SIZE,
            monster_count: DEFAULT_MONSTER_COUNT,
            wall_chance: WALL_CHANCE,
            combat_resolution_delay: COMBAT_RESOLUTION_DELAY_SECONDS,
            combat_log_capacity: COMBAT_LOG_CAPACITY,
            seed: None,
        }
    }
}

impl EngineConfig {
    /// Config with a fixed seed and everything else at defaults.
    pub fn seeded(seed: u64) -> Self {
        Self {
            seed: Some(seed),
            ..Default::default()
        }
    }

    /// Reads and validates a JSON config file.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let json = fs::read_to_string(path)?;
        let config: EngineConfig = serde_json::from_str(&json)?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.dungeon_size == 0 {
            return Err(ConfigError::Invalid(
                "dungeon_size must be at least 1".to_string(),
            ));
        }
        if !(0.0..1.0).contains(&self.wall_chance) {
            return Err(ConfigError::Invalid(format!(
                "wall_chance must be in [0, 1), got {}",
                self.wall_chance
            )));
        }
        if !(self.combat_resolution_delay.is_finite() && self.combat_resolution_delay >= 0.0) {
            return Err(ConfigError::Invalid(format!(
                "combat_resolution_delay must be finite and non-negative, got {}",
                self.combat_resolution_delay
            )));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_default_config_matches_constants() {
        let config = EngineConfig::default();
        assert_eq!(config.dungeon_size, 8);
        assert_eq!(config.monster_count, 5);
        assert!((config.wall_chance - 0.15).abs() < f64::EPSILON);
        assert!((config.combat_resolution_delay - 2.0).abs() < f64::EPSILON);
        assert!(config.seed.is_none());
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_partial_json_uses_defaults() {
        let config: EngineConfig = serde_json::from_str(r#"{"seed": 7, "monster_count": 2}"#)
            .expect("partial config should parse");
        assert_eq!(config.seed, Some(7));
        assert_eq!(config.monster_count, 2);
        assert_eq!(config.dungeon_size, DEFAULT_DUNGEON_SIZE);
    }

    #[test]
    fn test_validate_rejects_zero_size() {
        let config = EngineConfig {
            dungeon_size: 0,
            ..Default::default()
        };
        assert!(matches!(config.validate(), Err(ConfigError::Invalid(_))));
    }

    #[test]
    fn test_validate_rejects_certain_walls() {
        let config = EngineConfig {
            wall_chance: 1.0,
            ..Default::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_validate_rejects_negative_delay() {
        let config = EngineConfig {
            combat_resolution_delay: -1.0,
            ..Default::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_validate_rejects_nan_and_infinite_values() {
        for config in [
            EngineConfig {
                wall_chance: f64::NAN,
                ..Default::default()
            },
            EngineConfig {
                combat_resolution_delay: f64::NAN,
                ..Default::default()
            },
            EngineConfig {
                combat_resolution_delay: f64::INFINITY,
                ..Default::default()
            },
        ] {
            assert!(config.validate().is_err(), "{config:?} should be invalid");
        }
    }

    #[test]
    fn test_load_from_file() {
        let mut file = tempfile::NamedTempFile::new().expect("temp file");
        write!(file, r#"{{"dungeon_size": 12, "seed": 99}}"#).expect("write config");

        let config = EngineConfig::load(file.path()).expect("config should load");
        assert_eq!(config.dungeon_size, 12);
        assert_eq!(config.seed, Some(99));
    }

    #[test]
    fn test_load_invalid_json_is_parse_error() {
        let mut file = tempfile::NamedTempFile::new().expect("temp file");
        write!(file, "not json").expect("write config");

        assert!(matches!(
            EngineConfig::load(file.path()),
            Err(ConfigError::Parse(_))
        ));
    }
}
