//! Game configuration
//!
//! Playfield geometry and tuning values. Loaded from JSON when a config file
//! is present, otherwise the classic 375x500 playfield is used.

use color_eyre::eyre::{WrapErr, ensure};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

/// Config file picked up from the working directory when no path is given
pub const DEFAULT_CONFIG_FILE: &str = "burger-dodge.json";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GameConfig {
    // === Playfield geometry (pixels) ===
    pub game_width: f64,
    pub game_height: f64,
    pub enemy_width: f64,
    pub enemy_height: f64,
    pub player_width: f64,
    pub player_height: f64,

    // === Rules ===
    /// Target enemy population
    pub max_enemies: usize,
    pub starting_lives: u32,
    /// Length of the invincible window in ticks
    pub invincible_frames: u32,
    /// Delay between ticks requested from the scheduler
    pub tick_delay_ms: u64,
    /// Speed multiplier applied every tick while paused
    pub pause_damping: f64,
    pub points_per_level: u32,
    /// Points awarded for every enemy that leaves the bottom of the playfield
    pub points_per_dodge: u32,

    // === Enemy speed (pixels per millisecond) ===
    pub enemy_min_speed: f64,
    pub enemy_speed_spread: f64,
    /// Extra speed fraction per difficulty level above 1
    pub level_speed_step: f64,

    /// One of "off", "error", "warn", "info", "debug", "trace"
    pub log_level: String,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            game_width: 375.0,
            game_height: 500.0,
            enemy_width: 75.0,
            enemy_height: 156.0,
            player_width: 75.0,
            player_height: 54.0,

            max_enemies: 3,
            starting_lives: 3,
            invincible_frames: 75,
            tick_delay_ms: 20,
            pause_damping: 0.7,
            points_per_level: 10,
            points_per_dodge: 1,

            enemy_min_speed: 0.25,
            enemy_speed_spread: 0.5,
            level_speed_step: 0.1,

            log_level: "info".to_string(),
        }
    }
}

impl GameConfig {
    /// Load a config from a JSON file and validate it
    pub fn load(path: impl AsRef<Path>) -> color_eyre::Result<Self> {
        let path = path.as_ref();
        let raw = fs::read_to_string(path)
            .wrap_err_with(|| format!("failed to read config file {}", path.display()))?;
        Self::from_json(&raw).wrap_err_with(|| format!("invalid config file {}", path.display()))
    }

    /// Load from an explicit path, or the default file if it exists, or fall back to defaults
    pub fn load_or_default(path: Option<&Path>) -> color_eyre::Result<Self> {
        match path {
            Some(path) => Self::load(path),
            None if Path::new(DEFAULT_CONFIG_FILE).exists() => Self::load(DEFAULT_CONFIG_FILE),
            None => Ok(Self::default()),
        }
    }

    pub fn from_json(raw: &str) -> color_eyre::Result<Self> {
        let config: Self = serde_json::from_str(raw).wrap_err("failed to parse config JSON")?;
        config.validate()?;
        Ok(config)
    }

    /// Reject geometry and tuning values the engine cannot run with
    pub fn validate(&self) -> color_eyre::Result<()> {
        for (name, value) in [
            ("game_width", self.game_width),
            ("game_height", self.game_height),
            ("enemy_width", self.enemy_width),
            ("enemy_height", self.enemy_height),
            ("player_width", self.player_width),
            ("player_height", self.player_height),
        ] {
            ensure!(
                value.is_finite() && value > 0.0,
                "{name} must be a positive number, got {value}"
            );
        }
        ensure!(
            self.enemy_width <= self.game_width,
            "enemy_width ({}) is wider than the playfield ({})",
            self.enemy_width,
            self.game_width
        );
        ensure!(
            self.player_width <= self.game_width,
            "player_width ({}) is wider than the playfield ({})",
            self.player_width,
            self.game_width
        );
        // collisions compare x exactly, so player and enemies share one slot grid
        ensure!(
            self.player_width == self.enemy_width,
            "player_width ({}) must equal enemy_width ({})",
            self.player_width,
            self.enemy_width
        );
        ensure!(self.max_enemies > 0, "max_enemies must be at least 1");
        ensure!(self.starting_lives > 0, "starting_lives must be at least 1");
        ensure!(
            self.invincible_frames > 0,
            "invincible_frames must be at least 1"
        );
        ensure!(self.points_per_level > 0, "points_per_level must be at least 1");
        ensure!(
            self.pause_damping > 0.0 && self.pause_damping <= 1.0,
            "pause_damping must be in (0, 1], got {}",
            self.pause_damping
        );
        ensure!(
            self.enemy_min_speed > 0.0 && self.enemy_speed_spread >= 0.0,
            "enemy speeds must be positive"
        );
        ensure!(
            self.level_speed_step >= 0.0,
            "level_speed_step must not be negative"
        );
        ensure!(
            self.level_filter().is_some(),
            "unknown log_level {:?}",
            self.log_level
        );
        Ok(())
    }

    /// Number of horizontal spawn slots across the playfield
    pub fn slot_count(&self) -> usize {
        (self.game_width / self.enemy_width).floor() as usize
    }

    pub fn level_filter(&self) -> Option<log::LevelFilter> {
        self.log_level.parse().ok()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_is_valid() {
        let config = GameConfig::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.slot_count(), 5);
        assert_eq!(config.level_filter(), Some(log::LevelFilter::Info));
    }

    #[test]
    fn test_partial_json_keeps_defaults() {
        let config = GameConfig::from_json(r#"{ "max_enemies": 4, "log_level": "debug" }"#)
            .expect("valid config");
        assert_eq!(config.max_enemies, 4);
        assert_eq!(config.game_height, 500.0);
        assert_eq!(config.level_filter(), Some(log::LevelFilter::Debug));
    }

    #[test]
    fn test_rejects_negative_geometry() {
        let err = GameConfig::from_json(r#"{ "enemy_height": -5 }"#).unwrap_err();
        assert!(format!("{err:?}").contains("enemy_height"));
    }

    #[test]
    fn test_rejects_enemy_wider_than_playfield() {
        let config = GameConfig {
            enemy_width: 400.0,
            ..GameConfig::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_rejects_player_off_the_enemy_grid() {
        let config = GameConfig {
            player_width: 60.0,
            ..GameConfig::default()
        };
        let err = config.validate().unwrap_err();
        assert!(format!("{err:?}").contains("enemy_width"));
    }

    #[test]
    fn test_rejects_bad_damping_and_zero_enemies() {
        let config = GameConfig {
            pause_damping: 1.5,
            ..GameConfig::default()
        };
        assert!(config.validate().is_err());

        let config = GameConfig {
            max_enemies: 0,
            ..GameConfig::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_rejects_unknown_log_level() {
        assert!(GameConfig::from_json(r#"{ "log_level": "loud" }"#).is_err());
    }

    #[test]
    fn test_rejects_malformed_json() {
        assert!(GameConfig::from_json("{ max_enemies: ").is_err());
    }

    #[test]
    fn test_load_missing_file_reports_path() {
        let err = GameConfig::load("/definitely/not/here.json").unwrap_err();
        assert!(format!("{err:?}").contains("/definitely/not/here.json"));
    }
}
