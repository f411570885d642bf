//! Driver contracts for the optional hardware
//!
//! Register-level protocols live outside this crate; a driver only has to
//! deliver a calibrated-ready rate or a pin level.

use super::InputError;

/// Signed rotation rate source (degrees per second)
pub trait RateSensor {
    fn read_rate(&mut self) -> Result<f32, InputError>;

    fn release(&mut self) {}
}

/// Digital pin, `true` while the button is held
pub trait DigitalInput {
    fn is_active(&mut self) -> Result<bool, InputError>;

    fn release(&mut self) {}
}

/// Opens the hardware at startup
pub trait HardwareProbe {
    fn open_rate_sensor(&mut self) -> Result<Box<dyn RateSensor>, InputError>;

    fn open_fire_button(&mut self) -> Result<Box<dyn DigitalInput>, InputError>;
}

/// Probe for machines without the extra hardware
#[derive(Debug, Default, Clone, Copy)]
pub struct NoHardware;

impl HardwareProbe for NoHardware {
    fn open_rate_sensor(&mut self) -> Result<Box<dyn RateSensor>, InputError> {
        Err(InputError::Unavailable("tilt sensor".to_string()))
    }

    fn open_fire_button(&mut self) -> Result<Box<dyn DigitalInput>, InputError> {
        Err(InputError::Unavailable("fire button".to_string()))
    }
}
