//! Tilt Invaders - an arcade shooter with swappable controls
//!
//! Core modules:
//! - `sim`: Simulation (entities, steering, spawning, collisions, game loop)
//! - `input`: Keyboard, tilt sensor and push-button input sources
//! - `config`: Tunables with JSON load/save
//! - `audio`: Sound effect boundary

pub mod audio;
pub mod config;
pub mod input;
pub mod sim;

pub use config::{ConfigError, GameConfig, InputConfig, Smoothing};
pub use input::{Controls, InputError, InputSource, KeyboardState};

/// Game configuration constants
pub mod consts {
    /// Screen dimensions
    pub const SCREEN_WIDTH: u32 = 800;
    pub const SCREEN_HEIGHT: u32 = 600;

    /// Frame pacing
    pub const TARGET_FPS: u32 = 60;
    /// Largest delta a single frame may feed into the clock
    pub const MAX_FRAME_DT: f32 = 0.1;

    /// Player defaults
    pub const PLAYER_SPEED: f32 = 200.0;
    pub const BULLET_SPEED: f32 = 400.0;
    /// Seconds between player shots
    pub const SHOOT_COOLDOWN: f32 = 0.1;

    /// Enemy defaults
    pub const ENEMY_SPEED: f32 = 50.0;
    /// Probability that an enemy fires on a given tick
    pub const SHOOT_CHANCE: f32 = 0.005;
    pub const ENEMY_PROJECTILE_SPEED: f32 = 150.0;

    /// Center-to-center hit distance
    pub const COLLISION_RADIUS: f32 = 24.0;

    /// Sprite sizes (width, height) in pixels
    pub const PLAYER_SIZE: (u32, u32) = (64, 64);
    pub const ENEMY_SIZE: (u32, u32) = (64, 64);
    pub const BULLET_SIZE: (u32, u32) = (12, 24);
    pub const ENEMY_PROJECTILE_SIZE: (u32, u32) = (12, 12);

    /// Background
    pub const NUM_STARS: usize = 200;
    pub const STAR_SPEEDS: [f32; 3] = [50.0, 100.0, 150.0];
    pub const STAR_COLORS: [[u8; 3]; 3] = [[100, 100, 100], [150, 150, 150], [255, 255, 255]];

    /// Tilt sensor
    pub const GYRO_SENSITIVITY: f32 = 2.0;
    pub const CALIBRATION_SAMPLES: u32 = 100;
    /// Weight given to the previous reading in exponential smoothing
    pub const SMOOTHING_WEIGHT: f32 = 0.7;

    /// Push button
    pub const DEBOUNCE_INTERVAL: f32 = 0.1;
}
