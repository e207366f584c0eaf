//! Pointer/touch tracking: latest position, press state, and velocity.

use crate::float::Float;
use crate::vec::{Vec, Vec2};

/// One raw pointer sample in simulation coordinates.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct PointerEvent<F: Float> {
    pub position: Vec2<F>,
    pub down: bool,
    /// Monotonic timestamp in seconds.
    pub time: F,
}

impl<F: Float> PointerEvent<F> {
    pub fn new(x: F, y: F, down: bool, time: F) -> Self {
        PointerEvent { position: Vec2::new(x, y), down, time }
    }
}

/// Turns a stream of [`PointerEvent`]s into position, press state, and a
/// finite-difference velocity.
#[derive(Clone, Debug)]
pub struct InputTracker<F: Float> {
    position: Option<Vec2<F>>,
    down: bool,
    velocity: Vec2<F>,
    last_time: F,
    min_dt: F,
    stale_after: F,
}

impl<F: Float> InputTracker<F> {
    pub fn new(min_dt: F, stale_after: F) -> Self {
        InputTracker {
            position: None,
            down: false,
            velocity: Vec2::zero(),
            last_time: F::zero(),
            min_dt,
            stale_after,
        }
    }

    /// Feed one sample. Samples with non-finite coordinates are dropped.
    pub fn handle(&mut self, event: PointerEvent<F>) {
        if !event.position.is_finite() || !event.time.is_finite() {
            return;
        }
        if let Some(prev) = self.position {
            let dt = (event.time - self.last_time).max(self.min_dt);
            self.velocity = (event.position - prev).scale(F::one() / dt);
        }
        self.position = Some(event.position);
        self.down = event.down;
        self.last_time = event.time;
    }

    /// Drop the velocity if nothing has arrived for a while, so a parked
    /// pointer does not keep its last swipe speed forever.
    pub fn expire(&mut self, now: F) {
        if now - self.last_time > self.stale_after {
            self.velocity = Vec2::zero();
        }
    }

    /// Pointer left the canvas or the touch ended.
    pub fn clear(&mut self) {
        self.position = None;
        self.down = false;
        self.velocity = Vec2::zero();
    }

    pub fn position(&self) -> Option<Vec2<F>> {
        self.position
    }

    pub fn is_down(&self) -> bool {
        self.down
    }

    pub fn velocity(&self) -> Vec2<F> {
        self.velocity
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn first_sample_has_no_velocity() {
        let mut input = InputTracker::new(0.001f64, 0.1);
        input.handle(PointerEvent::new(10.0, 20.0, true, 1.0));
        assert_eq!(input.position(), Some(Vec2::new(10.0, 20.0)));
        assert_eq!(input.velocity(), Vec2::zero());
        assert!(input.is_down());
    }

    #[test]
    fn velocity_from_consecutive_samples() {
        let mut input = InputTracker::new(0.001f64, 0.1);
        input.handle(PointerEvent::new(0.0, 0.0, false, 1.0));
        input.handle(PointerEvent::new(5.0, -10.0, false, 1.01));
        let v = input.velocity();
        assert!((v.x - 500.0).abs() < 1e-6);
        assert!((v.y + 1000.0).abs() < 1e-6);
    }

    #[test]
    fn identical_timestamps_use_dt_floor() {
        let mut input = InputTracker::new(0.001f64, 0.1);
        input.handle(PointerEvent::new(0.0, 0.0, false, 2.0));
        input.handle(PointerEvent::new(1.0, 0.0, false, 2.0));
        assert!((input.velocity().x - 1000.0).abs() < 1e-6);
    }

    #[test]
    fn stale_velocity_expires() {
        let mut input = InputTracker::new(0.001f64, 0.1);
        input.handle(PointerEvent::new(0.0, 0.0, false, 0.0));
        input.handle(PointerEvent::new(3.0, 0.0, false, 0.01));
        input.expire(0.05);
        assert!(input.velocity().x > 0.0);
        input.expire(0.5);
        assert_eq!(input.velocity(), Vec2::zero());
    }

    #[test]
    fn non_finite_samples_are_ignored() {
        let mut input = InputTracker::new(0.001f32, 0.1);
        input.handle(PointerEvent::new(f32::NAN, 0.0, true, 0.0));
        assert_eq!(input.position(), None);
    }
}
