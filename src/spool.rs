//! Spool model: how much rope is off the ball, how thick the remaining wind
//! is, and where on the ball the rope leaves.
//!
//! Release is continuous feed. Each step the ball's surface velocity at the
//! anchor is projected on the spin-oriented tangent, clamped to
//! `[0, max_feed_rate]`, and added to the released length. Rope is never
//! wound back on.

use crate::body::Body;
use crate::config::SpoolConfig;
use crate::float::Float;
use crate::vec::{Vec, Vec2};

#[derive(Clone, Debug)]
pub struct Spool<F: Float> {
    total_length: F,
    released: F,
    core_radius: F,
    body_radius: F,
    /// Body-local; the world angle is this plus the body angle.
    exit_angle: F,
    /// Set when the rope reports its own exit point (wound rope).
    exit_radius: Option<F>,
    max_feed_rate: F,
    hit_nudge: F,
}

impl<F: Float> Spool<F> {
    pub fn new(config: &SpoolConfig<F>, body_radius: F) -> Self {
        Spool {
            total_length: config.total_length,
            released: config.initial_released.clamp(F::zero(), config.total_length),
            core_radius: config.core_radius,
            body_radius,
            exit_angle: config.exit_angle.wrap_angle(),
            exit_radius: None,
            max_feed_rate: config.max_feed_rate,
            hit_nudge: config.hit_nudge,
        }
    }

    pub fn released_length(&self) -> F {
        self.released
    }

    pub fn total_length(&self) -> F {
        self.total_length
    }

    pub fn remaining(&self) -> F {
        self.total_length - self.released
    }

    pub fn is_exhausted(&self) -> bool {
        self.released >= self.total_length
    }

    /// `clamp(R - a * (total - L), core, R)` with `a = (R - core) / total`.
    pub fn wound_radius(&self) -> F {
        let slope = (self.body_radius - self.core_radius) / self.total_length;
        (self.body_radius - slope * self.remaining()).clamp(self.core_radius, self.body_radius)
    }

    /// Distance of the exit point from the center: the rope-reported radius
    /// when there is one, the wound radius otherwise.
    pub fn exit_radius(&self) -> F {
        self.exit_radius.unwrap_or_else(|| self.wound_radius())
    }

    /// Body-local exit angle.
    pub fn exit_angle(&self) -> F {
        self.exit_angle
    }

    pub fn world_exit_angle(&self, body: &Body<F>) -> F {
        (self.exit_angle + body.angle).wrap_angle()
    }

    /// Point where the rope leaves the wind.
    pub fn anchor(&self, body: &Body<F>) -> Vec2<F> {
        body.position + Vec2::from_angle(self.world_exit_angle(body)).scale(self.exit_radius())
    }

    /// Unit tangent at the anchor, pointing the way the surface moves under spin.
    pub fn tangent(&self, body: &Body<F>) -> Vec2<F> {
        let radial = Vec2::from_angle(self.world_exit_angle(body));
        if body.spin < F::zero() {
            -radial.perp()
        } else {
            radial.perp()
        }
    }

    /// Feed rope for one step. Returns the length released.
    pub fn advance(&mut self, body: &Body<F>, dt: F) -> F {
        let dt = dt.max(F::zero());
        let surface = body.velocity_at(self.anchor(body));
        let feed = surface.dot(self.tangent(body)).clamp(F::zero(), self.max_feed_rate);
        let before = self.released;
        self.released = (self.released + feed * dt).min(self.total_length);
        self.released - before
    }

    /// Raise the released length to at least `length`. Used when the rope
    /// itself pays out more than the feed did.
    pub fn absorb(&mut self, length: F) {
        let length = length.min(self.total_length);
        if length > self.released {
            self.released = length;
        }
    }

    /// Take the exit point from a rope that tracks where it leaves the ball,
    /// given in body-local coordinates.
    pub fn follow_exit(&mut self, local: Vec2<F>) {
        if !local.is_finite() {
            return;
        }
        self.exit_angle = local.angle();
        self.exit_radius = Some(local.length());
    }

    /// Move the exit angle part of the way toward a body-local hit angle,
    /// along the shorter arc.
    pub fn nudge_toward(&mut self, local_angle: F) {
        let gap = (local_angle - self.exit_angle).wrap_angle();
        self.exit_angle = (self.exit_angle + gap * self.hit_nudge).wrap_angle();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::BodyConfig;

    fn spool(initial: f64) -> Spool<f64> {
        let config = SpoolConfig::new()
            .with_total_length(100.0)
            .with_core_radius(10.0)
            .with_initial_released(initial);
        Spool::new(&config, 40.0)
    }

    #[test]
    fn wound_radius_spans_core_to_rim() {
        assert!((spool(0.0).wound_radius() - 10.0).abs() < 1e-12);
        assert!((spool(50.0).wound_radius() - 25.0).abs() < 1e-12);
        assert!((spool(100.0).wound_radius() - 40.0).abs() < 1e-12);
    }

    #[test]
    fn initial_release_is_clamped() {
        assert_eq!(spool(500.0).released_length(), 100.0);
        assert!(spool(500.0).is_exhausted());
    }

    #[test]
    fn anchor_rotates_with_body() {
        let s = spool(100.0);
        let mut body = Body::new(Vec2::new(0.0, 0.0), &BodyConfig::new().with_radius(40.0));
        // Default exit angle is pi/2: straight down on screen.
        let a = s.anchor(&body);
        assert!(a.x.abs() < 1e-9 && (a.y - 40.0).abs() < 1e-9);
        body.angle = core::f64::consts::FRAC_PI_2;
        let b = s.anchor(&body);
        assert!((b.x + 40.0).abs() < 1e-9 && b.y.abs() < 1e-9);
    }

    #[test]
    fn backward_spin_does_not_rewind() {
        let mut s = spool(20.0);
        let mut body = Body::new(Vec2::new(0.0, 0.0), &BodyConfig::new().with_radius(40.0));
        body.spin = -5.0;
        // Translation outruns the spin, so the anchor slides against the tangent.
        body.velocity = Vec2::new(-300.0, 0.0);
        let fed = s.advance(&body, 0.1);
        assert_eq!(fed, 0.0);
        assert_eq!(s.released_length(), 20.0);
    }

    #[test]
    fn followed_exit_moves_the_anchor() {
        let mut s = spool(50.0);
        let body = Body::new(Vec2::new(10.0, 10.0), &BodyConfig::new().with_radius(40.0));
        s.follow_exit(Vec2::new(-16.0, 0.0));
        assert!((s.exit_radius() - 16.0).abs() < 1e-12);
        assert!(s.anchor(&body).distance(Vec2::new(-6.0, 10.0)) < 1e-9);
        // The wind itself is unchanged.
        assert!((s.wound_radius() - 25.0).abs() < 1e-12);
    }

    #[test]
    fn absorb_never_lowers() {
        let mut s = spool(30.0);
        s.absorb(10.0);
        assert_eq!(s.released_length(), 30.0);
        s.absorb(60.0);
        assert_eq!(s.released_length(), 60.0);
        s.absorb(1000.0);
        assert_eq!(s.released_length(), 100.0);
    }

    #[test]
    fn nudge_takes_short_way_round() {
        let mut s = spool(0.0);
        let pi = core::f64::consts::PI;
        // From pi/2 toward pi - 0.1: gap is positive, move a quarter of it.
        s.nudge_toward(pi - 0.1);
        let expected = pi / 2.0 + (pi / 2.0 - 0.1) * 0.25;
        assert!((s.exit_angle() - expected).abs() < 1e-9);
    }
}
