//! Composite input with permanent keyboard fallback
//!
//! Movement and fire each come from one slot. A slot holding hardware that
//! fails (at startup or mid-game) is swapped for the keyboard for the rest
//! of the session; it is never retried.

use super::{
    Button, HardwareProbe, InputError, InputSource, Keyboard, SampleContext, Tilt, keyboard_axis,
    keyboard_fire,
};
use crate::config::InputConfig;

/// Which half of the controls a source serves
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputAxis {
    Movement,
    Fire,
}

/// Record of a source being swapped out mid-session
#[derive(Debug, Clone, PartialEq)]
pub struct InputDowngrade {
    pub axis: InputAxis,
    pub source: &'static str,
    pub error: InputError,
}

pub struct Controls {
    movement: Box<dyn InputSource>,
    fire: Box<dyn InputSource>,
    /// Downgrades not yet collected by the game loop
    downgrades: Vec<InputDowngrade>,
}

impl Default for Controls {
    fn default() -> Self {
        Self::keyboard()
    }
}

impl Controls {
    pub fn keyboard() -> Self {
        Self::new(Box::new(Keyboard), Box::new(Keyboard))
    }

    pub fn new(movement: Box<dyn InputSource>, fire: Box<dyn InputSource>) -> Self {
        Self {
            movement,
            fire,
            downgrades: Vec::new(),
        }
    }

    /// Open whatever hardware the config asks for, falling back to keyboard
    pub fn detect(config: &InputConfig, probe: &mut dyn HardwareProbe) -> Self {
        let movement: Box<dyn InputSource> = if config.tilt_enabled {
            match probe
                .open_rate_sensor()
                .and_then(|sensor| Tilt::calibrate(sensor, config))
            {
                Ok(tilt) => {
                    log::info!("Tilt sensor initialized, using it for movement");
                    Box::new(tilt)
                }
                Err(e) => {
                    log::warn!("Tilt sensor unavailable ({e}), using keyboard for movement");
                    Box::new(Keyboard)
                }
            }
        } else {
            Box::new(Keyboard)
        };

        let fire: Box<dyn InputSource> = if config.button_enabled {
            match probe.open_fire_button() {
                Ok(pin) => {
                    log::info!("Fire button initialized");
                    Box::new(Button::new(pin, config.debounce_interval))
                }
                Err(e) => {
                    log::warn!("Fire button unavailable ({e}), using keyboard for shooting");
                    Box::new(Keyboard)
                }
            }
        } else {
            Box::new(Keyboard)
        };

        Self::new(movement, fire)
    }

    pub fn movement_source(&self) -> &'static str {
        self.movement.name()
    }

    pub fn fire_source(&self) -> &'static str {
        self.fire.name()
    }

    /// Take the downgrades recorded since the last call
    pub fn take_downgrades(&mut self) -> Vec<InputDowngrade> {
        std::mem::take(&mut self.downgrades)
    }

    /// Release all devices (call once on exit)
    pub fn shutdown(&mut self) {
        self.movement.release();
        self.fire.release();
    }

    /// Movement for this tick; a failing source is downgraded and the keyboard answers
    pub fn axis(&mut self, ctx: &SampleContext) -> f32 {
        match self.movement.sample_axis(ctx) {
            Ok(axis) => axis.clamp(-ctx.max_speed, ctx.max_speed),
            Err(e) => {
                self.downgrade(InputAxis::Movement, e);
                keyboard_axis(ctx)
            }
        }
    }

    /// Fire decision for this tick, with the same fallback as [`Controls::axis`]
    pub fn fire(&mut self, ctx: &SampleContext) -> bool {
        match self.fire.sample_fire(ctx) {
            Ok(fire) => fire,
            Err(e) => {
                self.downgrade(InputAxis::Fire, e);
                keyboard_fire(ctx)
            }
        }
    }

    fn downgrade(&mut self, axis: InputAxis, error: InputError) {
        let slot = match axis {
            InputAxis::Movement => &mut self.movement,
            InputAxis::Fire => &mut self.fire,
        };
        let source = slot.name();
        log::warn!("Error reading {source} ({error}), switching {axis:?} to keyboard");
        slot.release();
        *slot = Box::new(Keyboard);
        self.downgrades.push(InputDowngrade {
            axis,
            source,
            error,
        });
    }
}

impl InputSource for Controls {
    fn name(&self) -> &'static str {
        "controls"
    }

    fn sample_axis(&mut self, ctx: &SampleContext) -> Result<f32, InputError> {
        Ok(self.axis(ctx))
    }

    fn sample_fire(&mut self, ctx: &SampleContext) -> Result<bool, InputError> {
        Ok(self.fire(ctx))
    }

    fn release(&mut self) {
        self.shutdown();
    }
}

#[cfg(test)]
mod tests {
    use std::cell::Cell;
    use std::rc::Rc;

    use super::*;
    use crate::input::test_support::{ScriptedPin, ScriptedSensor, ctx};
    use crate::input::{DigitalInput, KeyboardState, NoHardware, RateSensor};

    struct FakeProbe {
        sensor: Option<ScriptedSensor>,
        pin: Option<ScriptedPin>,
    }

    impl HardwareProbe for FakeProbe {
        fn open_rate_sensor(&mut self) -> Result<Box<dyn RateSensor>, InputError> {
            match self.sensor.take() {
                Some(s) => Ok(Box::new(s)),
                None => Err(InputError::Unavailable("tilt sensor".to_string())),
            }
        }

        fn open_fire_button(&mut self) -> Result<Box<dyn DigitalInput>, InputError> {
            match self.pin.take() {
                Some(p) => Ok(Box::new(p)),
                None => Err(InputError::Unavailable("fire button".to_string())),
            }
        }
    }

    fn config() -> InputConfig {
        InputConfig {
            calibration_samples: 1,
            ..Default::default()
        }
    }

    #[test]
    fn test_detect_without_hardware() {
        let controls = Controls::detect(&config(), &mut NoHardware);
        assert_eq!(controls.movement_source(), "keyboard");
        assert_eq!(controls.fire_source(), "keyboard");
    }

    #[test]
    fn test_detect_with_hardware() {
        let mut probe = FakeProbe {
            sensor: Some(ScriptedSensor::constant(0.0)),
            pin: Some(ScriptedPin::new([])),
        };
        let controls = Controls::detect(&config(), &mut probe);
        assert_eq!(controls.movement_source(), "tilt");
        assert_eq!(controls.fire_source(), "button");
    }

    #[test]
    fn test_disabled_hardware_is_not_opened() {
        let mut probe = FakeProbe {
            sensor: Some(ScriptedSensor::constant(0.0)),
            pin: Some(ScriptedPin::new([])),
        };
        let cfg = InputConfig {
            tilt_enabled: false,
            button_enabled: false,
            ..config()
        };
        let controls = Controls::detect(&cfg, &mut probe);
        assert_eq!(controls.movement_source(), "keyboard");
        assert!(probe.sensor.is_some());
        assert!(probe.pin.is_some());
    }

    #[test]
    fn test_calibration_failure_falls_back() {
        let mut probe = FakeProbe {
            sensor: Some(ScriptedSensor::new([Err(InputError::Io("i2c".to_string()))])),
            pin: None,
        };
        let controls = Controls::detect(&config(), &mut probe);
        assert_eq!(controls.movement_source(), "keyboard");
    }

    #[test]
    fn test_sampling_failure_is_permanent_downgrade() {
        // Calibration reading, one good reading, a failure, then readings that would work
        let sensor = ScriptedSensor::new([
            Ok(0.0),
            Ok(10.0),
            Err(InputError::Io("i2c".to_string())),
            Ok(50.0),
        ]);
        let tilt = Tilt::calibrate(Box::new(sensor), &config()).unwrap();
        let mut controls = Controls::new(Box::new(tilt), Box::new(Keyboard));
        let keys = KeyboardState {
            right: true,
            ..Default::default()
        };
        let c = ctx(&keys, 0.0, true);

        assert!((controls.axis(&c) - 20.0).abs() < 1e-4);
        // Failure answered from keyboard this tick
        assert_eq!(controls.axis(&c), 200.0);
        assert_eq!(controls.movement_source(), "keyboard");

        let downgrades = controls.take_downgrades();
        assert_eq!(downgrades.len(), 1);
        assert_eq!(downgrades[0].axis, InputAxis::Movement);
        assert_eq!(downgrades[0].source, "tilt");

        // Sensor would read fine again, but it is never retried
        assert_eq!(controls.axis(&c), 200.0);
        assert!(controls.take_downgrades().is_empty());
    }

    #[test]
    fn test_button_failure_falls_back_to_fire_key() {
        let pin = ScriptedPin::new([Err(InputError::Io("gpio".to_string()))]);
        let mut controls = Controls::new(Box::new(Keyboard), Box::new(Button::new(Box::new(pin), 0.1)));
        let keys = KeyboardState {
            fire: true,
            ..Default::default()
        };
        assert!(controls.fire(&ctx(&keys, 0.0, true)));
        assert_eq!(controls.fire_source(), "keyboard");
        assert_eq!(controls.take_downgrades()[0].axis, InputAxis::Fire);
    }

    struct ReleaseCounter(Rc<Cell<u32>>);

    impl DigitalInput for ReleaseCounter {
        fn is_active(&mut self) -> Result<bool, InputError> {
            Err(InputError::Io("gpio".to_string()))
        }

        fn release(&mut self) {
            self.0.set(self.0.get() + 1);
        }
    }

    #[test]
    fn test_failed_driver_is_released() {
        let released = Rc::new(Cell::new(0));
        let button = Button::new(Box::new(ReleaseCounter(released.clone())), 0.1);
        let mut controls = Controls::new(Box::new(Keyboard), Box::new(button));
        let keys = KeyboardState::default();
        controls.sample_fire(&ctx(&keys, 0.0, true)).unwrap();
        assert_eq!(released.get(), 1);

        // Keyboard has nothing to release
        controls.shutdown();
        assert_eq!(released.get(), 1);
    }
}
