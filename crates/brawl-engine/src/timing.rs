//! Simulated frame clock.
//!
//! Body integration applies gravity and friction once per step no matter how
//! long the step is, so a match driven once per rendered frame plays faster
//! or slower with the frame rate. [`StepTimer::accumulate`] converts frame
//! time into a whole number of fixed simulation steps instead.

/// Simulation step used in fixed-timestep mode: 60 Hz.
pub const DEFAULT_STEP: f32 = 1.0 / 60.0;

/// Longest frame the clock will account for, in seconds.
const MAX_FRAME: f32 = 0.25;

/// Most steps handed out for a single frame.
const MAX_STEPS_PER_FRAME: u32 = 10;

/// Turns simulated frames into fixed simulation steps.
#[derive(Debug, Clone)]
pub struct StepTimer {
    fps: u32,
    step: f32,
    /// Frame time not yet consumed by a step.
    backlog: f32,
}

impl Default for StepTimer {
    fn default() -> Self {
        Self::new(60)
    }
}

impl StepTimer {
    /// Clock running at `fps` simulated frames per second (at least 1).
    #[must_use]
    pub fn new(fps: u32) -> Self {
        Self {
            fps: fps.max(1),
            step: DEFAULT_STEP,
            backlog: 0.0,
        }
    }

    /// Seconds per simulation step.
    #[must_use]
    pub fn step(&self) -> f32 {
        self.step
    }

    /// Seconds per simulated frame.
    #[must_use]
    pub fn frame_dt(&self) -> f32 {
        1.0 / self.fps as f32
    }

    /// Simulated frames per second.
    #[must_use]
    pub fn fps(&self) -> u32 {
        self.fps
    }

    /// Adds one frame of `dt` seconds and returns how many steps to run.
    ///
    /// Frames longer than a quarter second are cut short and at most ten
    /// steps are handed out per frame; a backlog left over after that is
    /// dropped rather than carried into the next frame.
    pub fn accumulate(&mut self, dt: f32) -> u32 {
        self.backlog += dt.clamp(0.0, MAX_FRAME);

        // tolerate rounding when the frame is an exact multiple of the step
        let slack = self.step * 1e-3;
        let mut due = 0;
        while due < MAX_STEPS_PER_FRAME && self.backlog + slack >= self.step {
            self.backlog = (self.backlog - self.step).max(0.0);
            due += 1;
        }
        if self.backlog > self.step * 2.0 {
            self.backlog = 0.0;
        }

        due
    }

    /// Drops any pending backlog. Called between rounds.
    pub fn reset(&mut self) {
        self.backlog = 0.0;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_to_sixty_hertz() {
        let clock = StepTimer::default();
        assert_eq!(clock.fps(), 60);
        assert!((clock.step() - DEFAULT_STEP).abs() < f32::EPSILON);
        assert!((clock.frame_dt() - 1.0 / 60.0).abs() < 1e-6);
    }

    #[test]
    fn test_zero_fps_is_raised() {
        assert_eq!(StepTimer::new(0).fps(), 1);
    }

    #[test]
    fn test_slow_frames_run_two_steps() {
        let mut clock = StepTimer::new(30);
        let mut total = 0;
        for _ in 0..30 {
            let due = clock.accumulate(clock.frame_dt());
            assert_eq!(due, 2);
            total += due;
        }
        assert_eq!(total, 60);
    }

    #[test]
    fn test_fast_frames_skip_steps() {
        let mut clock = StepTimer::new(120);
        let total: u32 = (0..120).map(|_| clock.accumulate(1.0 / 120.0)).sum();
        assert!((59..=61).contains(&total));
    }

    #[test]
    fn test_long_frame_is_capped() {
        let mut clock = StepTimer::new(60);
        assert_eq!(clock.accumulate(1.0), MAX_STEPS_PER_FRAME);
        // the leftover backlog is dropped, not replayed next frame
        assert_eq!(clock.accumulate(0.0), 0);
    }

    #[test]
    fn test_reset_drops_backlog() {
        let mut clock = StepTimer::new(60);
        assert_eq!(clock.accumulate(0.01), 0);
        clock.reset();
        // 0.01 + 0.01 would have reached a step without the reset
        assert_eq!(clock.accumulate(0.01), 0);
    }
}
