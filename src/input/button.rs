//! Push-button fire control
//!
//! The pin level is debounced in time: an active pin is accepted only once
//! `debounce_interval` seconds have passed since the previous accepted
//! press. The debounced signal therefore drops back to false between
//! windows, so a held button re-fires once per window at any tick rate,
//! while bounces inside a window are ignored. An accepted press restarts
//! the window even when the shoot cooldown swallows it.

use super::{DigitalInput, InputError, InputSource, SampleContext};

pub struct Button {
    pin: Box<dyn DigitalInput>,
    debounce_interval: f64,
    last_accepted: Option<f64>,
}

impl Button {
    pub fn new(pin: Box<dyn DigitalInput>, debounce_interval: f32) -> Self {
        Self {
            pin,
            debounce_interval: debounce_interval as f64,
            last_accepted: None,
        }
    }

    /// Sample the pin and report a debounced press
    fn poll_press(&mut self, now: f64) -> Result<bool, InputError> {
        if !self.pin.is_active()? {
            return Ok(false);
        }
        let settled = self
            .last_accepted
            .is_none_or(|last| now - last >= self.debounce_interval);
        if settled {
            self.last_accepted = Some(now);
        }
        Ok(settled)
    }
}

impl InputSource for Button {
    fn name(&self) -> &'static str {
        "button"
    }

    fn sample_fire(&mut self, ctx: &SampleContext) -> Result<bool, InputError> {
        let pressed = self.poll_press(ctx.now)?;
        Ok(pressed && ctx.cooldown_ready)
    }

    fn release(&mut self) {
        self.pin.release();
    }
}
