//! Simulation clock
//!
//! Turns wall-clock frame deltas into tick deltas. `Fixed` mode accumulates
//! time and hands out whole steps; `Variable` mode passes each frame's delta
//! straight through after capping it.

/// How frame time becomes tick time
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ClockMode {
    Fixed { step: f32, max_substeps: u32 },
    Variable,
}

#[derive(Debug, Clone)]
pub struct SimClock {
    mode: ClockMode,
    /// Largest frame delta accepted (stalls are not replayed)
    max_frame_dt: f32,
    accumulator: f32,
}

impl SimClock {
    pub fn fixed(step: f32, max_substeps: u32, max_frame_dt: f32) -> Self {
        Self {
            mode: ClockMode::Fixed { step, max_substeps },
            max_frame_dt,
            accumulator: 0.0,
        }
    }

    pub fn variable(max_frame_dt: f32) -> Self {
        Self {
            mode: ClockMode::Variable,
            max_frame_dt,
            accumulator: 0.0,
        }
    }

    pub fn mode(&self) -> ClockMode {
        self.mode
    }

    /// Feed one frame's elapsed time; returns the deltas to tick with, in order
    pub fn push_frame(&mut self, frame_dt: f32) -> Vec<f32> {
        let frame_dt = frame_dt.clamp(0.0, self.max_frame_dt);
        match self.mode {
            ClockMode::Variable => vec![frame_dt],
            ClockMode::Fixed { step, max_substeps } => {
                self.accumulator += frame_dt;
                let mut steps = Vec::new();
                while self.accumulator >= step && (steps.len() as u32) < max_substeps {
                    self.accumulator -= step;
                    steps.push(step);
                }
                // Drop backlog we refused to simulate
                if steps.len() as u32 == max_substeps {
                    self.accumulator = self.accumulator.min(step);
                }
                steps
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fixed_accumulates() {
        let mut clock = SimClock::fixed(0.01, 8, 0.1);
        assert!(clock.push_frame(0.004).is_empty());
        assert!(clock.push_frame(0.004).is_empty());
        assert_eq!(clock.push_frame(0.004), vec![0.01]);
        assert_eq!(clock.push_frame(0.025).len(), 2);
    }

    #[test]
    fn test_fixed_caps_substeps() {
        let mut clock = SimClock::fixed(0.01, 4, 1.0);
        assert_eq!(clock.push_frame(0.5).len(), 4);
        // Backlog dropped, at most one step carried over
        assert!(clock.push_frame(0.0).len() <= 1);
    }

    #[test]
    fn test_variable_caps_frame() {
        let mut clock = SimClock::variable(0.1);
        assert_eq!(clock.push_frame(0.016), vec![0.016]);
        assert_eq!(clock.push_frame(2.0), vec![0.1]);
        assert_eq!(clock.push_frame(-1.0), vec![0.0]);
    }
}
