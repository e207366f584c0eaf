//! Frame clock: host timestamps in, clamped time steps out.

use crate::float::Float;

/// Converts monotonic timestamps (seconds) into a time step in `[0, max_step]`.
///
/// Long gaps such as a backgrounded tab are truncated, so simulated time lags
/// the wall clock instead of taking one huge unstable step.
#[derive(Clone, Debug)]
pub struct FrameClock<F: Float> {
    last: Option<F>,
    max_step: F,
}

impl<F: Float> FrameClock<F> {
    pub fn new(max_step: F) -> Self {
        FrameClock { last: None, max_step }
    }

    /// Time step since the previous call. The first call returns 0.
    pub fn tick(&mut self, now: F) -> F {
        let raw = match self.last {
            Some(last) => now - last,
            None => F::zero(),
        };
        if now.is_finite() {
            self.last = Some(now);
        }
        if !raw.is_finite() {
            return F::zero();
        }
        if raw > self.max_step {
            log::debug!("frame gap of {:?}s truncated to {:?}s", raw, self.max_step);
        }
        raw.clamp(F::zero(), self.max_step)
    }

    pub fn max_step(&self) -> F {
        self.max_step
    }

    /// Forget the last timestamp, e.g. after the host paused the loop.
    pub fn reset(&mut self) {
        self.last = None;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn first_frame_is_zero() {
        let mut clock = FrameClock::new(1.0f64 / 30.0);
        assert_eq!(clock.tick(12.5), 0.0);
    }

    #[test]
    fn regular_frames_pass_through() {
        let mut clock = FrameClock::new(1.0f64 / 30.0);
        clock.tick(1.0);
        let dt = clock.tick(1.0 + 1.0 / 60.0);
        assert!((dt - 1.0 / 60.0).abs() < 1e-12);
    }

    #[test]
    fn long_gap_is_clamped() {
        let mut clock = FrameClock::new(1.0f64 / 30.0);
        clock.tick(0.0);
        assert!((clock.tick(5.0) - 1.0 / 30.0).abs() < 1e-12);
    }

    #[test]
    fn reset_starts_over() {
        let mut clock = FrameClock::new(1.0f64 / 30.0);
        assert_eq!(clock.max_step(), 1.0 / 30.0);
        clock.tick(1.0);
        clock.reset();
        // After a pause the first frame is zero again, not a clamped gap.
        assert_eq!(clock.tick(50.0), 0.0);
        assert!((clock.tick(50.01) - 0.01).abs() < 1e-12);
    }

    #[test]
    fn backwards_time_is_zero() {
        let mut clock = FrameClock::new(1.0f64 / 30.0);
        clock.tick(2.0);
        assert_eq!(clock.tick(1.5), 0.0);
        // Resumes from the newer, earlier stamp.
        assert!((clock.tick(1.52) - 0.02).abs() < 1e-12);
    }
}
