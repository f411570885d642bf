//! Game tunables
//!
//! One immutable `GameConfig` is built at startup (defaults or a JSON file)
//! and passed by reference to everything that needs a constant.

use std::fs;
use std::path::Path;

use glam::UVec2;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::consts::*;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to parse config: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("invalid config: {0}")]
    Invalid(String),
}

/// Tilt reading smoothing mode
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, Default)]
#[serde(tag = "mode", rename_all = "snake_case")]
pub enum Smoothing {
    /// Use each calibrated reading as-is
    #[default]
    Off,
    /// Weighted running average: `prev * weight + new * (1 - weight)`
    Exponential { weight: f32 },
}

impl Smoothing {
    pub fn as_str(&self) -> &'static str {
        match self {
            Smoothing::Off => "off",
            Smoothing::Exponential { .. } => "exponential",
        }
    }

    /// Parse a mode name, using the default weight for `exponential`
    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "off" | "none" => Some(Smoothing::Off),
            "exponential" | "ema" => Some(Smoothing::Exponential {
                weight: SMOOTHING_WEIGHT,
            }),
            _ => None,
        }
    }
}

/// Alternative input hardware settings
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct InputConfig {
    /// Try to open the tilt sensor at startup
    pub tilt_enabled: bool,
    /// Try to open the fire button at startup
    pub button_enabled: bool,
    /// Rate (degrees/s) to player speed multiplier
    pub sensitivity: f32,
    /// Flip the tilt axis
    pub invert: bool,
    pub smoothing: Smoothing,
    /// Stationary readings averaged into the calibration offset
    pub calibration_samples: u32,
    /// Minimum seconds between accepted button presses
    pub debounce_interval: f32,
}

impl Default for InputConfig {
    fn default() -> Self {
        Self {
            tilt_enabled: true,
            button_enabled: true,
            sensitivity: GYRO_SENSITIVITY,
            invert: false,
            smoothing: Smoothing::Off,
            calibration_samples: CALIBRATION_SAMPLES,
            debounce_interval: DEBOUNCE_INTERVAL,
        }
    }
}

/// Sprite dimensions supplied by the asset loader
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
#[serde(default)]
pub struct SpriteSizes {
    pub player: UVec2,
    pub enemy: UVec2,
    pub bullet: UVec2,
    pub enemy_projectile: UVec2,
}

impl Default for SpriteSizes {
    fn default() -> Self {
        Self {
            player: UVec2::from(PLAYER_SIZE),
            enemy: UVec2::from(ENEMY_SIZE),
            bullet: UVec2::from(BULLET_SIZE),
            enemy_projectile: UVec2::from(ENEMY_PROJECTILE_SIZE),
        }
    }
}

/// Decorative background settings
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct StarfieldConfig {
    pub count: usize,
    /// Fall speeds; a star's colour is the entry at the same index
    pub speeds: Vec<f32>,
    pub colors: Vec<[u8; 3]>,
}

impl Default for StarfieldConfig {
    fn default() -> Self {
        Self {
            count: NUM_STARS,
            speeds: STAR_SPEEDS.to_vec(),
            colors: STAR_COLORS.to_vec(),
        }
    }
}

/// All gameplay tunables
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct GameConfig {
    pub screen_width: u32,
    pub screen_height: u32,
    pub player_speed: f32,
    pub bullet_speed: f32,
    pub enemy_speed: f32,
    /// Seconds between player shots
    pub shoot_cooldown: f32,
    /// Per-enemy, per-tick fire probability
    pub shoot_chance: f32,
    pub collision_radius: f32,
    pub enemy_projectile_speed: f32,
    pub sprites: SpriteSizes,
    pub stars: StarfieldConfig,
    pub input: InputConfig,
    /// Fixed RNG seed; `None` picks one at startup
    pub seed: Option<u64>,
    pub target_fps: u32,
    pub max_frame_dt: f32,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            screen_width: SCREEN_WIDTH,
            screen_height: SCREEN_HEIGHT,
            player_speed: PLAYER_SPEED,
            bullet_speed: BULLET_SPEED,
            enemy_speed: ENEMY_SPEED,
            shoot_cooldown: SHOOT_COOLDOWN,
            shoot_chance: SHOOT_CHANCE,
            collision_radius: COLLISION_RADIUS,
            enemy_projectile_speed: ENEMY_PROJECTILE_SPEED,
            sprites: SpriteSizes::default(),
            stars: StarfieldConfig::default(),
            input: InputConfig::default(),
            seed: None,
            target_fps: TARGET_FPS,
            max_frame_dt: MAX_FRAME_DT,
        }
    }
}

impl GameConfig {
    pub fn width(&self) -> f32 {
        self.screen_width as f32
    }

    pub fn height(&self) -> f32 {
        self.screen_height as f32
    }

    /// Parse and validate a JSON document; missing fields take defaults
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Load a JSON config file
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let json = fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.display().to_string(),
            source,
        })?;
        let config = Self::from_json(&json)?;
        log::info!("Loaded config from {}", path.display());
        Ok(config)
    }

    /// Write the config as pretty JSON
    pub fn save(&self, path: impl AsRef<Path>) -> Result<(), ConfigError> {
        let path = path.as_ref();
        let json = serde_json::to_string_pretty(self)?;
        fs::write(path, json).map_err(|source| ConfigError::Io {
            path: path.display().to_string(),
            source,
        })?;
        log::info!("Config saved to {}", path.display());
        Ok(())
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        let invalid = |msg: String| -> Result<(), ConfigError> { Err(ConfigError::Invalid(msg)) };

        if self.screen_width == 0 || self.screen_height == 0 {
            return invalid(format!(
                "screen must be non-empty, got {}x{}",
                self.screen_width, self.screen_height
            ));
        }
        if self.sprites.player.x > self.screen_width {
            return invalid(format!(
                "player width {} exceeds screen width {}",
                self.sprites.player.x, self.screen_width
            ));
        }
        for (name, value) in [
            ("player_speed", self.player_speed),
            ("bullet_speed", self.bullet_speed),
            ("enemy_speed", self.enemy_speed),
            ("enemy_projectile_speed", self.enemy_projectile_speed),
            ("shoot_cooldown", self.shoot_cooldown),
            ("collision_radius", self.collision_radius),
            ("max_frame_dt", self.max_frame_dt),
        ] {
            if !(value > 0.0) {
                return invalid(format!("{name} must be positive, got {value}"));
            }
        }
        if !(0.0..=1.0).contains(&self.shoot_chance) {
            return invalid(format!(
                "shoot_chance must be in [0, 1], got {}",
                self.shoot_chance
            ));
        }
        if self.target_fps == 0 {
            return invalid("target_fps must be positive".to_string());
        }
        if self.stars.speeds.len() != self.stars.colors.len() {
            return invalid(format!(
                "{} star speeds but {} star colors",
                self.stars.speeds.len(),
                self.stars.colors.len()
            ));
        }
        if self.stars.count > 0 && self.stars.speeds.is_empty() {
            return invalid("stars need at least one speed".to_string());
        }
        if self.input.debounce_interval < 0.0 {
            return invalid(format!(
                "debounce_interval must not be negative, got {}",
                self.input.debounce_interval
            ));
        }
        if self.input.calibration_samples == 0 {
            return invalid("calibration_samples must be positive".to_string());
        }
        if let Smoothing::Exponential { weight } = self.input.smoothing {
            if !(0.0..1.0).contains(&weight) {
                return invalid(format!("smoothing weight must be in [0, 1), got {weight}"));
            }
        }
        Ok(())
    }
}
