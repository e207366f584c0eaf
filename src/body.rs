//! The yarn ball: a rigid disk with linear and angular state.

use crate::config::BodyConfig;
use crate::float::Float;
use crate::vec::{Vec, Vec2};

/// Rate, in Hz, that the configured damping factors are expressed at.
pub const DAMPING_RATE: f32 = 60.0;

/// Rigid disk. Position, velocity, angle and spin change every step; radius
/// and mass properties are fixed at construction.
///
/// Angles follow screen axes (+y down), so positive spin turns clockwise on
/// screen.
#[derive(Clone, Debug)]
pub struct Body<F: Float> {
    pub position: Vec2<F>,
    pub velocity: Vec2<F>,
    pub angle: F,
    pub spin: F,
    radius: F,
    mass: F,
    inv_mass: F,
    inertia: F,
    inv_inertia: F,
    linear_damping: F,
    angular_damping: F,
}

impl<F: Float> Body<F> {
    pub fn new(position: Vec2<F>, config: &BodyConfig<F>) -> Self {
        let inertia = config.inertia_factor * config.mass * config.radius * config.radius;
        Body {
            position,
            velocity: Vec2::zero(),
            angle: F::zero(),
            spin: F::zero(),
            radius: config.radius,
            mass: config.mass,
            inv_mass: reciprocal(config.mass),
            inertia,
            inv_inertia: reciprocal(inertia),
            linear_damping: config.linear_damping,
            angular_damping: config.angular_damping,
        }
    }

    /// Semi-implicit Euler step followed by drag. Damping factors are per
    /// 1/60 s and are scaled to `dt`, so drag does not depend on sub-steps.
    pub fn integrate(&mut self, gravity: Vec2<F>, dt: F) {
        self.velocity = self.velocity + gravity.scale(dt);
        self.position = self.position + self.velocity.scale(dt);
        self.angle = (self.angle + self.spin * dt).wrap_angle();
        let ticks = dt * F::from_f32(DAMPING_RATE);
        self.velocity = self.velocity.scale(self.linear_damping.powf(ticks));
        self.spin = self.spin * self.angular_damping.powf(ticks);
    }

    /// Apply an impulse at a world-space point, changing both velocity and spin.
    pub fn apply_impulse_at(&mut self, impulse: Vec2<F>, world_point: Vec2<F>) {
        self.velocity = self.velocity + impulse.scale(self.inv_mass);
        let r = world_point - self.position;
        self.spin = self.spin + r.cross(impulse) * self.inv_inertia;
    }

    /// Velocity of the material point at `world_point`: `v + w × r`.
    pub fn velocity_at(&self, world_point: Vec2<F>) -> Vec2<F> {
        self.velocity + Vec2::cross_scalar(self.spin, world_point - self.position)
    }

    /// Effective mass for an impulse along `direction` applied at lever arm `r`:
    /// `1 / (1/m + (r × d)^2 / I)`.
    pub fn effective_mass(&self, r: Vec2<F>, direction: Vec2<F>) -> F {
        let rn = r.cross(direction);
        let denom = self.inv_mass + rn * rn * self.inv_inertia;
        if denom.is_near_zero(F::from_f32(1e-12)) {
            F::zero()
        } else {
            F::one() / denom
        }
    }

    /// Body-local point to world space.
    pub fn world_point(&self, local: Vec2<F>) -> Vec2<F> {
        self.position + local.rotate(self.angle)
    }

    /// World point to body-local space.
    pub fn local_point(&self, world: Vec2<F>) -> Vec2<F> {
        (world - self.position).rotate(-self.angle)
    }

    /// Put the ball at `position` at rest. Angle is kept.
    pub fn teleport(&mut self, position: Vec2<F>) {
        self.position = position;
        self.velocity = Vec2::zero();
        self.spin = F::zero();
    }

    /// Translational plus rotational kinetic energy.
    pub fn kinetic_energy(&self) -> F {
        F::half() * (self.mass * self.velocity.length_sq() + self.inertia * self.spin * self.spin)
    }

    /// Gravitational potential energy relative to the origin.
    pub fn potential_energy(&self, gravity: Vec2<F>) -> F {
        -self.mass * gravity.dot(self.position)
    }

    pub fn mechanical_energy(&self, gravity: Vec2<F>) -> F {
        self.kinetic_energy() + self.potential_energy(gravity)
    }

    pub fn radius(&self) -> F { self.radius }
    pub fn mass(&self) -> F { self.mass }
    pub fn inertia(&self) -> F { self.inertia }
}

fn reciprocal<F: Float>(v: F) -> F {
    if v.is_near_zero(F::from_f32(1e-12)) {
        F::zero()
    } else {
        F::one() / v
    }
}
