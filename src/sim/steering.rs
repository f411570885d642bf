//! Homing steering for enemies

use glam::Vec2;

use super::state::Entity;

/// Point the entity's velocity at `target` with constant `speed`.
///
/// On exact overlap the previous velocity is kept.
pub fn steer_toward(entity: &mut Entity, target: Vec2, speed: f32) {
    let to_target = target - entity.center();
    let distance = to_target.length();
    if distance > 0.0 {
        entity.vel = to_target / distance * speed;
    }
}
