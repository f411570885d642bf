//! Input sources
//!
//! Every source answers the same two questions each tick: how fast should
//! the player move, and does the player fire. The keyboard rules are the
//! trait defaults, so the hardware variants only override the capability
//! they actually provide.
//!
//! Hardware faults surface as `InputError`. `Controls` catches them and
//! permanently swaps the faulty slot back to the keyboard.

pub mod button;
pub mod controls;
pub mod hardware;
pub mod keyboard;
pub mod tilt;

use thiserror::Error;

pub use button::Button;
pub use controls::{Controls, InputAxis, InputDowngrade};
pub use hardware::{DigitalInput, HardwareProbe, NoHardware, RateSensor};
pub use keyboard::Keyboard;
pub use tilt::Tilt;

#[derive(Debug, Clone, PartialEq, Error)]
pub enum InputError {
    #[error("{0} not available")]
    Unavailable(String),
    #[error("device read failed: {0}")]
    Io(String),
    #[error("calibration failed: {0}")]
    Calibration(String),
}

/// Keys held this tick, as reported by the frontend
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct KeyboardState {
    pub left: bool,
    pub right: bool,
    pub fire: bool,
}

/// Per-tick sampling context
#[derive(Debug, Clone, Copy)]
pub struct SampleContext<'a> {
    pub keys: &'a KeyboardState,
    /// Simulated session time in seconds
    pub now: f64,
    /// Shoot timer has run out
    pub cooldown_ready: bool,
    /// Axis magnitude limit (player speed)
    pub max_speed: f32,
}

/// Keyboard movement: left is checked before right, so holding both moves left
pub fn keyboard_axis(ctx: &SampleContext) -> f32 {
    if ctx.keys.left {
        -ctx.max_speed
    } else if ctx.keys.right {
        ctx.max_speed
    } else {
        0.0
    }
}

/// Keyboard fire: a level signal gated by the cooldown
pub fn keyboard_fire(ctx: &SampleContext) -> bool {
    ctx.keys.fire && ctx.cooldown_ready
}

pub trait InputSource {
    fn name(&self) -> &'static str;

    /// Horizontal speed in `[-max_speed, max_speed]`
    fn sample_axis(&mut self, ctx: &SampleContext) -> Result<f32, InputError> {
        Ok(keyboard_axis(ctx))
    }

    /// Whether a shot should be fired this tick
    fn sample_fire(&mut self, ctx: &SampleContext) -> Result<bool, InputError> {
        Ok(keyboard_fire(ctx))
    }

    /// Release any underlying device
    fn release(&mut self) {}
}
