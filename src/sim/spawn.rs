//! Enemy wave generation

use glam::Vec2;
use rand::Rng;

use super::state::Entity;
use crate::config::GameConfig;

/// Enemies in every wave before the random extra
pub const BASE_WAVE_SIZE: usize = 10;
/// Inclusive range of extra enemies per wave
pub const EXTRA_ENEMIES: std::ops::RangeInclusive<usize> = 1..=5;

/// Spawn rectangle as fractions of the screen
pub const SPAWN_X: (f32, f32) = (0.1, 0.9);
pub const SPAWN_Y: (f32, f32) = (0.1, 0.4);

/// Initial drift, replaced by steering on the first tick
pub const DRIFT_X: f32 = 30.0;
pub const DRIFT_Y: f32 = 20.0;

/// Build a new wave of `BASE_WAVE_SIZE + U{1..=5}` enemies
pub fn spawn_wave(rng: &mut impl Rng, config: &GameConfig) -> Vec<Entity> {
    let count = BASE_WAVE_SIZE + rng.random_range(EXTRA_ENEMIES);
    let (w, h) = (config.width(), config.height());

    (0..count)
        .map(|_| {
            let pos = Vec2::new(
                rng.random_range(w * SPAWN_X.0..=w * SPAWN_X.1),
                rng.random_range(h * SPAWN_Y.0..=h * SPAWN_Y.1),
            );
            let vel = Vec2::new(
                rng.random_range(-DRIFT_X..=DRIFT_X),
                rng.random_range(-DRIFT_Y..=DRIFT_Y),
            );
            Entity::new(pos, config.sprites.enemy).with_velocity(vel)
        })
        .collect()
}
