//! Game state and core simulation types
//!
//! Each collection owns its entities outright; an entity has no identity
//! beyond its slot in the collection.

use glam::{UVec2, Vec2};
use rand::SeedableRng;
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use super::background::Starfield;
use super::spawn::spawn_wave;
use crate::config::GameConfig;
use crate::input::InputAxis;

/// Current phase of the session
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GamePhase {
    /// Waiting for start
    Menu,
    /// Active gameplay
    Playing,
    /// Player was hit; waiting for acknowledgment
    GameOver,
}

/// Discrete things that happened during a tick (for sound and UI)
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum GameEvent {
    ShotFired,
    EnemyDestroyed { pos: Vec2 },
    EnemyFired,
    WaveSpawned { wave: u32, count: usize },
    GameOver { score: u32 },
    InputDowngraded { axis: InputAxis },
}

/// A moving actor: player, enemy or projectile
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Entity {
    /// Top-left corner
    pub pos: Vec2,
    /// Sprite size; only used for centering and bounds
    pub size: UVec2,
    pub vel: Vec2,
    pub dead: bool,
}

impl Entity {
    pub fn new(pos: Vec2, size: UVec2) -> Self {
        Self {
            pos,
            size,
            vel: Vec2::ZERO,
            dead: false,
        }
    }

    pub fn with_velocity(mut self, vel: Vec2) -> Self {
        self.vel = vel;
        self
    }

    /// Center point, using truncated integer half-size
    pub fn center(&self) -> Vec2 {
        self.pos + (self.size / 2).as_vec2()
    }

    /// Advance by velocity
    pub fn integrate(&mut self, dt: f32) {
        self.pos += self.vel * dt;
    }

    /// Position lies within `[0, width] x [0, height]`
    pub fn on_screen(&self, width: f32, height: f32) -> bool {
        (0.0..=width).contains(&self.pos.x) && (0.0..=height).contains(&self.pos.y)
    }
}

/// Complete simulation state
#[derive(Debug, Clone)]
pub struct GameState {
    /// Run seed for reproducibility
    pub seed: u64,
    pub rng: Pcg32,
    pub phase: GamePhase,
    pub player: Entity,
    pub enemies: Vec<Entity>,
    /// Player projectiles
    pub bullets: Vec<Entity>,
    pub enemy_projectiles: Vec<Entity>,
    /// Seconds until the player may fire again (fires when <= 0)
    pub shoot_timer: f32,
    pub score: u32,
    /// Best score this process has seen
    pub high_score: u32,
    /// Waves spawned this game
    pub wave: u32,
    /// Simulated seconds since the process started
    pub elapsed: f64,
    /// Simulation tick counter
    pub time_ticks: u64,
    /// Decorative background, animated in every phase
    pub stars: Starfield,
    /// Events from the most recent tick
    pub events: Vec<GameEvent>,
}

impl GameState {
    /// Create a new session in the menu
    pub fn new(config: &GameConfig, seed: u64) -> Self {
        let mut rng = Pcg32::seed_from_u64(seed);
        let stars = Starfield::new(&mut rng, config);
        let mut state = Self {
            seed,
            rng,
            phase: GamePhase::Menu,
            player: Entity::new(Vec2::ZERO, config.sprites.player),
            enemies: Vec::new(),
            bullets: Vec::new(),
            enemy_projectiles: Vec::new(),
            shoot_timer: 0.0,
            score: 0,
            high_score: 0,
            wave: 0,
            elapsed: 0.0,
            time_ticks: 0,
            stars,
            events: Vec::new(),
        };
        state.reset(config);
        state.events.clear();
        state
    }

    /// Start a fresh game: player at the bottom, empty projectiles, first wave
    pub fn reset(&mut self, config: &GameConfig) {
        let size = config.sprites.player;
        self.player = Entity::new(
            Vec2::new(
                (config.screen_width / 2) as f32,
                config.screen_height.saturating_sub(size.y) as f32,
            ),
            size,
        );
        self.enemies.clear();
        self.bullets.clear();
        self.enemy_projectiles.clear();
        self.shoot_timer = 0.0;
        self.score = 0;
        self.wave = 0;
        self.respawn(config);
    }

    /// Replace the (empty) enemy set with a new wave
    pub fn respawn(&mut self, config: &GameConfig) {
        self.enemies = spawn_wave(&mut self.rng, config);
        self.wave += 1;
        log::info!("Wave {} spawned with {} enemies", self.wave, self.enemies.len());
        self.events.push(GameEvent::WaveSpawned {
            wave: self.wave,
            count: self.enemies.len(),
        });
    }

    /// Enter game over; repeated calls in the same game change nothing
    pub fn trigger_game_over(&mut self) {
        if self.phase == GamePhase::GameOver {
            return;
        }
        self.phase = GamePhase::GameOver;
        self.high_score = self.high_score.max(self.score);
        log::info!("Game over with score {}", self.score);
        self.events.push(GameEvent::GameOver { score: self.score });
    }

    /// Take the events from the most recent tick
    pub fn drain_events(&mut self) -> Vec<GameEvent> {
        std::mem::take(&mut self.events)
    }
}
