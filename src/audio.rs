//! Sound effect boundary
//!
//! The simulation only reports events; a `SoundController` turns the ones
//! worth hearing into effects. Playback is fire-and-forget.

use crate::sim::GameEvent;

/// Sound effect types
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SoundEffect {
    /// Player fired
    Shoot,
    /// Enemy destroyed
    Explosion,
    /// Player was hit
    GameOver,
}

impl SoundEffect {
    /// Effect for an event, if it has one
    pub fn for_event(event: &GameEvent) -> Option<Self> {
        match event {
            GameEvent::ShotFired => Some(SoundEffect::Shoot),
            GameEvent::EnemyDestroyed { .. } => Some(SoundEffect::Explosion),
            GameEvent::GameOver { .. } => Some(SoundEffect::GameOver),
            _ => None,
        }
    }

    /// Default playback volume (0.0 - 1.0)
    pub fn volume(&self) -> f32 {
        match self {
            SoundEffect::Shoot => 0.3,
            SoundEffect::Explosion => 0.4,
            SoundEffect::GameOver => 0.5,
        }
    }
}

pub trait SoundController {
    fn play(&mut self, effect: SoundEffect);
}

/// Controller for headless runs: logs each effect instead of playing it
#[derive(Debug, Default)]
pub struct LogSound {
    pub played: u64,
    muted: bool,
}

impl LogSound {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set_muted(&mut self, muted: bool) {
        self.muted = muted;
    }
}

impl SoundController for LogSound {
    fn play(&mut self, effect: SoundEffect) {
        if self.muted {
            return;
        }
        self.played += 1;
        log::debug!("sfx {:?} at volume {:.1}", effect, effect.volume());
    }
}

/// Play the effect for each event
pub fn dispatch(events: &[GameEvent], sound: &mut dyn SoundController) {
    for effect in events.iter().filter_map(SoundEffect::for_event) {
        sound.play(effect);
    }
}
