//! Pointer bats: turning a pointer touching the ball into an impulse.

use crate::body::Body;
use crate::config::HitConfig;
use crate::float::Float;
use crate::vec::{Vec, Vec2};

/// A pointer hit that was applied to the ball.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct PointerHit<F: Float> {
    /// Surface point nearest the pointer, where the impulse was applied.
    pub point: Vec2<F>,
    /// Unit vector from the ball center toward the pointer.
    pub toward_pointer: Vec2<F>,
    /// Impulse vector applied to the ball.
    pub impulse: Vec2<F>,
    pub magnitude: F,
    /// Pointer speed toward the ball center (positive = approaching).
    pub approach_speed: F,
    /// Body-local angle of the hit point.
    pub local_angle: F,
}

/// Detects pointer contact and rate-limits hits with a cooldown timer.
#[derive(Clone, Debug)]
pub struct HitDetector<F: Float> {
    cooldown: F,
}

impl<F: Float> HitDetector<F> {
    pub fn new() -> Self {
        HitDetector { cooldown: F::zero() }
    }

    /// Seconds until the next hit may land.
    pub fn cooldown(&self) -> F {
        self.cooldown
    }

    /// Count the cooldown down by `dt`.
    pub fn tick(&mut self, dt: F) {
        self.cooldown = (self.cooldown - dt).max(F::zero());
    }

    /// Apply a hit if the pointer is within reach and the cooldown has elapsed.
    ///
    /// `up` is the direction the push is biased toward, normally against gravity.
    pub fn try_hit(
        &mut self,
        body: &mut Body<F>,
        pointer: Vec2<F>,
        pointer_velocity: Vec2<F>,
        up: Vec2<F>,
        config: &HitConfig<F>,
    ) -> Option<PointerHit<F>> {
        if self.cooldown > F::zero() {
            return None;
        }
        let offset = pointer - body.position;
        let reach = body.radius() + config.margin;
        if offset.length_sq() > reach * reach {
            return None;
        }

        // A pointer dead on the center counts as coming from below.
        let toward_pointer = offset.normalize_or(-up);
        let approach_speed = -pointer_velocity.dot(toward_pointer);
        let boost = (approach_speed * config.approach_scale).clamp(config.min_boost, config.max_boost);
        let magnitude = config.base_impulse + boost;
        let direction = (-toward_pointer + up.scale(config.upward_bias)).normalize_or(up);
        let impulse = direction.scale(magnitude);

        let point = body.position + toward_pointer.scale(body.radius());
        body.apply_impulse_at(impulse, point);
        self.cooldown = config.cooldown;

        let local_angle = (toward_pointer.angle() - body.angle).wrap_angle();
        log::debug!(
            "pointer hit: magnitude {:?}, approach {:?}, local angle {:?}",
            magnitude,
            approach_speed,
            local_angle
        );

        Some(PointerHit {
            point,
            toward_pointer,
            impulse,
            magnitude,
            approach_speed,
            local_angle,
        })
    }
}

impl<F: Float> Default for HitDetector<F> {
    fn default() -> Self {
        Self::new()
    }
}

/// Unit vector opposite to gravity, or screen-up when gravity is zero.
pub fn up_from_gravity<F: Float>(gravity: Vec2<F>) -> Vec2<F> {
    (-gravity).normalize_or(Vec2::new(F::zero(), -F::one()))
}
