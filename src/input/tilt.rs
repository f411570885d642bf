//! Tilt sensor movement
//!
//! The sensor's resting bias is measured once at startup and subtracted
//! from every reading afterwards.

use super::{InputError, InputSource, RateSensor, SampleContext};
use crate::config::{InputConfig, Smoothing};

pub struct Tilt {
    sensor: Box<dyn RateSensor>,
    /// Mean stationary reading
    offset: f32,
    sensitivity: f32,
    invert: bool,
    smoothing: Smoothing,
    /// Running average (smoothing mode only)
    smoothed: f32,
}

impl Tilt {
    /// Calibrate against `config.calibration_samples` readings; keep the device still
    pub fn calibrate(mut sensor: Box<dyn RateSensor>, config: &InputConfig) -> Result<Self, InputError> {
        let samples = config.calibration_samples.max(1);
        log::info!("Calibrating tilt sensor over {samples} samples");

        let mut total = 0.0f64;
        for i in 0..samples {
            let reading = sensor
                .read_rate()
                .map_err(|e| InputError::Calibration(format!("sample {i}: {e}")))?;
            total += reading as f64;
        }
        let offset = (total / samples as f64) as f32;
        log::debug!("Tilt calibration offset: {offset}");

        Ok(Self {
            sensor,
            offset,
            sensitivity: config.sensitivity,
            invert: config.invert,
            smoothing: config.smoothing,
            smoothed: 0.0,
        })
    }
}

impl InputSource for Tilt {
    fn name(&self) -> &'static str {
        "tilt"
    }

    fn sample_axis(&mut self, ctx: &SampleContext) -> Result<f32, InputError> {
        let rate = self.sensor.read_rate()? - self.offset;

        let rate = match self.smoothing {
            Smoothing::Off => rate,
            Smoothing::Exponential { weight } => {
                self.smoothed = self.smoothed * weight + rate * (1.0 - weight);
                self.smoothed
            }
        };

        let mut movement = rate * self.sensitivity;
        if self.invert {
            movement = -movement;
        }
        Ok(movement.clamp(-ctx.max_speed, ctx.max_speed))
    }

    fn release(&mut self) {
        self.sensor.release();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::input::KeyboardState;
    use crate::input::test_support::{ScriptedSensor, ctx};

    fn config(samples: u32) -> InputConfig {
        InputConfig {
            calibration_samples: samples,
            ..Default::default()
        }
    }

    #[test]
    fn test_calibration_offset_is_mean() {
        let sensor = ScriptedSensor::new([Ok(1.0), Ok(3.0), Ok(2.0), Ok(2.0), Ok(2.0), Ok(7.0)]);
        let mut tilt = Tilt::calibrate(Box::new(sensor), &config(4)).unwrap();
        let keys = KeyboardState::default();
        let c = ctx(&keys, 0.0, true);

        // Resting at the mean reads as still
        assert!(tilt.sample_axis(&c).unwrap().abs() < 1e-6);
        assert!((tilt.sample_axis(&c).unwrap() - 10.0).abs() < 1e-4);
    }

    #[test]
    fn test_axis_scaled_and_clamped() {
        let sensor = ScriptedSensor::new([Ok(5.0), Ok(5.0), Ok(25.0), Ok(500.0), Ok(-500.0)]);
        let mut tilt = Tilt::calibrate(Box::new(sensor), &config(2)).unwrap();
        let keys = KeyboardState::default();
        let c = ctx(&keys, 0.0, true);

        // (25 - 5) * 2.0
        assert!((tilt.sample_axis(&c).unwrap() - 40.0).abs() < 1e-4);
        assert_eq!(tilt.sample_axis(&c).unwrap(), 200.0);
        assert_eq!(tilt.sample_axis(&c).unwrap(), -200.0);
    }

    #[test]
    fn test_invert() {
        let sensor = ScriptedSensor::new([Ok(0.0), Ok(10.0)]);
        let cfg = InputConfig {
            calibration_samples: 1,
            invert: true,
            ..Default::default()
        };
        let mut tilt = Tilt::calibrate(Box::new(sensor), &cfg).unwrap();
        let keys = KeyboardState::default();
        assert!((tilt.sample_axis(&ctx(&keys, 0.0, true)).unwrap() + 20.0).abs() < 1e-4);
    }

    #[test]
    fn test_exponential_smoothing() {
        let sensor = ScriptedSensor::new([Ok(0.0), Ok(10.0), Ok(10.0)]);
        let cfg = InputConfig {
            calibration_samples: 1,
            sensitivity: 1.0,
            smoothing: Smoothing::Exponential { weight: 0.7 },
            ..Default::default()
        };
        let mut tilt = Tilt::calibrate(Box::new(sensor), &cfg).unwrap();
        let keys = KeyboardState::default();
        let c = ctx(&keys, 0.0, true);

        // 0 * 0.7 + 10 * 0.3
        assert!((tilt.sample_axis(&c).unwrap() - 3.0).abs() < 1e-4);
        // 3 * 0.7 + 10 * 0.3
        assert!((tilt.sample_axis(&c).unwrap() - 5.1).abs() < 1e-4);
    }

    #[test]
    fn test_calibration_failure() {
        let sensor = ScriptedSensor::new([Ok(1.0), Err(InputError::Io("bus".to_string()))]);
        let err = Tilt::calibrate(Box::new(sensor), &config(3)).err().unwrap();
        assert!(matches!(err, InputError::Calibration(_)));
    }

    #[test]
    fn test_fire_falls_through_to_keyboard() {
        let mut tilt = Tilt::calibrate(Box::new(ScriptedSensor::constant(0.0)), &config(1)).unwrap();
        let keys = KeyboardState {
            fire: true,
            ..Default::default()
        };
        assert!(tilt.sample_fire(&ctx(&keys, 0.0, true)).unwrap());
    }
}
