//! Falling starfield
//!
//! Purely cosmetic. Stars never die: one that falls past the bottom edge
//! reappears at the top at a random column.

use glam::Vec2;
use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::config::GameConfig;

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Star {
    pub pos: Vec2,
    /// Fall speed (pixels/s)
    pub speed: f32,
    pub color: [u8; 3],
}

#[derive(Debug, Clone, Default)]
pub struct Starfield {
    pub stars: Vec<Star>,
}

impl Starfield {
    pub fn new(rng: &mut impl Rng, config: &GameConfig) -> Self {
        let layers = &config.stars;
        if layers.speeds.is_empty() {
            return Self::default();
        }
        let stars = (0..layers.count)
            .map(|_| {
                let layer = rng.random_range(0..layers.speeds.len());
                Star {
                    pos: Vec2::new(
                        rng.random_range(0..=config.screen_width) as f32,
                        rng.random_range(0..=config.screen_height) as f32,
                    ),
                    speed: layers.speeds[layer],
                    color: layers.colors.get(layer).copied().unwrap_or([255, 255, 255]),
                }
            })
            .collect();
        Self { stars }
    }

    pub fn update(&mut self, rng: &mut impl Rng, dt: f32, config: &GameConfig) {
        let height = config.height();
        for star in &mut self.stars {
            star.pos.y += star.speed * dt;
            if star.pos.y > height {
                star.pos.y = 0.0;
                star.pos.x = rng.random_range(0..=config.screen_width) as f32;
            }
        }
    }

    pub fn len(&self) -> usize {
        self.stars.len()
    }

    pub fn is_empty(&self) -> bool {
        self.stars.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand_pcg::Pcg32;

    #[test]
    fn test_stars_use_configured_layers() {
        let config = GameConfig::default();
        let mut rng = Pcg32::seed_from_u64(3);
        let field = Starfield::new(&mut rng, &config);
        assert_eq!(field.len(), 200);
        for star in &field.stars {
            let layer = config.stars.speeds.iter().position(|&s| s == star.speed).unwrap();
            assert_eq!(star.color, config.stars.colors[layer]);
        }
    }

    #[test]
    fn test_stars_wrap_to_top() {
        let config = GameConfig::default();
        let mut rng = Pcg32::seed_from_u64(3);
        let mut field = Starfield {
            stars: vec![Star {
                pos: Vec2::new(10.0, 590.0),
                speed: 100.0,
                color: [255, 255, 255],
            }],
        };

        field.update(&mut rng, 0.05, &config);
        assert_eq!(field.stars[0].pos.y, 595.0);

        field.update(&mut rng, 0.1, &config);
        assert_eq!(field.stars[0].pos.y, 0.0);
        assert!((0.0..=800.0).contains(&field.stars[0].pos.x));
        assert_eq!(field.len(), 1);
    }
}
