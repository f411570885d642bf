//! Proximity collisions
//!
//! Two entities collide when their centers are strictly closer than the
//! collision radius. Sprite shapes are ignored.

use super::state::Entity;

/// Center-to-center distance is below `radius` (touching at exactly `radius` is a miss)
#[inline]
pub fn centers_within(a: &Entity, b: &Entity, radius: f32) -> bool {
    a.center().distance(b.center()) < radius
}

/// Any entity in `others` hits `target`
pub fn any_hits(others: &[Entity], target: &Entity, radius: f32) -> bool {
    others.iter().any(|o| centers_within(o, target, radius))
}

/// Remove every bullet that hits an enemy along with the first enemy it hits.
///
/// Bullets are scanned in order and do not pierce: each one destroys at most
/// one enemy, and an enemy destroyed by an earlier bullet cannot be hit again.
/// Returns the destroyed enemies.
pub fn resolve_bullet_hits(
    bullets: &mut Vec<Entity>,
    enemies: &mut Vec<Entity>,
    radius: f32,
) -> Vec<Entity> {
    let mut destroyed = Vec::new();
    bullets.retain(|bullet| {
        match enemies
            .iter()
            .position(|enemy| centers_within(bullet, enemy, radius))
        {
            Some(index) => {
                destroyed.push(enemies.remove(index));
                false
            }
            None => true,
        }
    });
    destroyed
}
