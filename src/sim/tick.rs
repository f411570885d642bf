//! Simulation tick
//!
//! One call advances the whole game by `dt` seconds. Order inside `Playing`:
//! shoot timer, input, player movement and firing, player bullets, enemy
//! projectiles, enemies, bullet hits, then a respawn if the wave is gone.

use glam::Vec2;
use rand::Rng;

use super::collision::{any_hits, centers_within, resolve_bullet_hits};
use super::state::{Entity, GameEvent, GamePhase, GameState};
use super::steering::steer_toward;
use crate::config::GameConfig;
use crate::input::{Controls, KeyboardState, SampleContext};

/// Frontend input for a single tick
#[derive(Debug, Clone, Default)]
pub struct TickInput {
    /// Held movement/fire keys (used by keyboard sources)
    pub keys: KeyboardState,
    /// Menu: start a game
    pub start: bool,
    /// Game over: return to the menu
    pub acknowledge: bool,
}

impl TickInput {
    /// Demo input: chase the enemy closest to the player's column and keep firing
    pub fn autopilot(state: &GameState) -> Self {
        let mut input = Self {
            start: state.phase == GamePhase::Menu,
            acknowledge: state.phase == GamePhase::GameOver,
            ..Default::default()
        };

        let player_x = state.player.center().x;
        let target = state
            .enemies
            .iter()
            .map(|e| e.center().x)
            .min_by(|a, b| {
                (a - player_x)
                    .abs()
                    .partial_cmp(&(b - player_x).abs())
                    .unwrap_or(std::cmp::Ordering::Equal)
            });

        if let Some(x) = target {
            // Dead zone keeps the ship from jittering around the target
            let offset = x - player_x;
            input.keys.left = offset < -4.0;
            input.keys.right = offset > 4.0;
            input.keys.fire = true;
        }
        input
    }
}

/// Outcome of moving the enemy wave
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct EnemyStep {
    pub shots: u32,
    pub player_hit: bool,
}

/// Advance the game state by `dt` seconds
pub fn tick(
    state: &mut GameState,
    controls: &mut Controls,
    input: &TickInput,
    config: &GameConfig,
    dt: f32,
) {
    state.events.clear();
    state.time_ticks += 1;
    state.elapsed += dt as f64;

    // Background runs in every phase
    state.stars.update(&mut state.rng, dt, config);

    match state.phase {
        GamePhase::Menu => {
            if input.start {
                state.reset(config);
                state.phase = GamePhase::Playing;
                log::info!("Game started (seed {})", state.seed);
            }
            return;
        }
        GamePhase::GameOver => {
            if input.acknowledge {
                state.phase = GamePhase::Menu;
                log::debug!("Back to menu");
            }
            return;
        }
        GamePhase::Playing => {}
    }

    state.shoot_timer -= dt;

    let ctx = SampleContext {
        keys: &input.keys,
        now: state.elapsed,
        cooldown_ready: state.shoot_timer <= 0.0,
        max_speed: config.player_speed,
    };
    let axis = controls.axis(&ctx);
    let fire = controls.fire(&ctx);
    for downgrade in controls.take_downgrades() {
        state.events.push(GameEvent::InputDowngraded {
            axis: downgrade.axis,
        });
    }

    state.player.vel.x = axis;
    if fire {
        shoot(state, config);
    }
    move_player(&mut state.player, config, dt);

    advance_bullets(&mut state.bullets, dt);

    if advance_enemy_projectiles(&mut state.enemy_projectiles, &state.player, config, dt) {
        state.trigger_game_over();
    }

    let step = advance_enemies(
        &mut state.enemies,
        &mut state.enemy_projectiles,
        &state.player,
        &mut state.rng,
        config,
        dt,
    );
    for _ in 0..step.shots {
        state.events.push(GameEvent::EnemyFired);
    }
    if step.player_hit {
        state.trigger_game_over();
    }

    let destroyed = resolve_bullet_hits(
        &mut state.bullets,
        &mut state.enemies,
        config.collision_radius,
    );
    for enemy in &destroyed {
        state.score += 1;
        state.events.push(GameEvent::EnemyDestroyed { pos: enemy.center() });
    }
    state.high_score = state.high_score.max(state.score);

    if state.enemies.is_empty() {
        state.respawn(config);
    }
}

/// Fire a bullet from the top center of the player and restart the cooldown
pub fn shoot(state: &mut GameState, config: &GameConfig) {
    state.shoot_timer = config.shoot_cooldown;
    let player = &state.player;
    let size = config.sprites.bullet;
    let pos = Vec2::new(
        player.pos.x + (player.size.x / 2) as f32 - (size.x / 2) as f32,
        player.pos.y,
    );
    state
        .bullets
        .push(Entity::new(pos, size).with_velocity(Vec2::new(0.0, -config.bullet_speed)));
    state.events.push(GameEvent::ShotFired);
}

/// Move horizontally and keep the whole sprite on screen
pub fn move_player(player: &mut Entity, config: &GameConfig, dt: f32) {
    player.pos.x += player.vel.x * dt;
    let max_x = config.width() - player.size.x as f32;
    player.pos.x = player.pos.x.min(max_x).max(0.0);
}

/// Move player bullets; a bullet is gone once it is above the screen (y < 0)
pub fn advance_bullets(bullets: &mut Vec<Entity>, dt: f32) {
    for bullet in bullets.iter_mut() {
        bullet.integrate(dt);
    }
    bullets.retain(|b| b.pos.y >= 0.0);
}

/// Move enemy projectiles; returns whether any touched the player
pub fn advance_enemy_projectiles(
    projectiles: &mut Vec<Entity>,
    player: &Entity,
    config: &GameConfig,
    dt: f32,
) -> bool {
    for projectile in projectiles.iter_mut() {
        projectile.integrate(dt);
    }
    // Tested before the boundary cull, so a shot leaving the screen can still land
    let hit = any_hits(projectiles, player, config.collision_radius);
    let height = config.height();
    projectiles.retain(|p| p.pos.y <= height);
    hit
}

/// Steer, move, cull and fire for every enemy
pub fn advance_enemies(
    enemies: &mut Vec<Entity>,
    projectiles: &mut Vec<Entity>,
    player: &Entity,
    rng: &mut impl Rng,
    config: &GameConfig,
    dt: f32,
) -> EnemyStep {
    let target = player.center();
    let (width, height) = (config.width(), config.height());
    let mut step = EnemyStep::default();

    enemies.retain_mut(|enemy| {
        steer_toward(enemy, target, config.enemy_speed);
        enemy.integrate(dt);

        if !enemy.on_screen(width, height) {
            return false;
        }

        if rng.random::<f32>() < config.shoot_chance {
            projectiles.push(enemy_projectile(enemy, config));
            step.shots += 1;
        }

        if centers_within(enemy, player, config.collision_radius) {
            step.player_hit = true;
        }
        true
    });

    step
}

/// Projectile dropped from the bottom center of an enemy
fn enemy_projectile(enemy: &Entity, config: &GameConfig) -> Entity {
    let size = config.sprites.enemy_projectile;
    let pos = Vec2::new(
        enemy.pos.x + (enemy.size.x / 2) as f32 - (size.x / 2) as f32,
        enemy.pos.y + enemy.size.y as f32,
    );
    Entity::new(pos, size).with_velocity(Vec2::new(0.0, config.enemy_projectile_speed))
}
