//! Configuration for the yarn ball simulation.
//!
//! Every group has `new()` with tuned defaults (canvas pixels and seconds,
//! +y pointing down) and `with_*` setters. [`SimConfig::validate`] runs once
//! when a [`Simulation`](crate::sim::Simulation) is built.

use crate::error::ConfigError;
use crate::float::Float;
use crate::vec::{Vec, Vec2};

/// Which rope representation trails the ball.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum RopeKind {
    /// Inextensible rod chain hanging from the spool anchor, solved with FABRIK.
    Rod,
    /// Verlet chain glued along a path inside the disk, released progressively.
    Wound,
}

/// World box and gravity.
#[derive(Clone, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct WorldConfig<F: Float> {
    pub width: F,
    pub height: F,
    /// Gravity acceleration. Default: 1400 px/s^2 downward.
    pub gravity: Vec2<F>,
}

impl<F: Float> WorldConfig<F> {
    pub fn new(width: F, height: F) -> Self {
        WorldConfig {
            width,
            height,
            gravity: Vec2::new(F::zero(), F::from_f32(1400.0)),
        }
    }

    pub fn with_gravity(mut self, gravity: Vec2<F>) -> Self {
        self.gravity = gravity;
        self
    }
}

impl<F: Float> Default for WorldConfig<F> {
    fn default() -> Self {
        Self::new(F::from_f32(800.0), F::from_f32(600.0))
    }
}

/// The disk: shape, mass properties, drag, and where it respawns.
#[derive(Clone, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct BodyConfig<F: Float> {
    pub radius: F,
    pub mass: F,
    /// `I = inertia_factor * m * r^2`. 0.5 for a solid disk, 0.4 for a sphere.
    pub inertia_factor: F,
    /// Velocity multiplier per 1/60 s, in (0, 1]. 1.0 = no drag.
    pub linear_damping: F,
    /// Spin multiplier per 1/60 s, in (0, 1].
    pub angular_damping: F,
    /// Spawn point as a fraction of world size.
    pub spawn: Vec2<F>,
    /// How far below the floor the ball may fall before it respawns.
    pub recovery_margin: F,
}

impl<F: Float> BodyConfig<F> {
    pub fn new() -> Self {
        BodyConfig {
            radius: F::from_f32(42.0),
            mass: F::one(),
            inertia_factor: F::half(),
            linear_damping: F::from_f32(0.998),
            angular_damping: F::from_f32(0.994),
            spawn: Vec2::new(F::half(), F::from_f32(0.2)),
            recovery_margin: F::from_f32(200.0),
        }
    }

    pub fn with_radius(mut self, radius: F) -> Self {
        self.radius = radius;
        self
    }

    pub fn with_mass(mut self, mass: F) -> Self {
        self.mass = mass;
        self
    }

    pub fn with_inertia_factor(mut self, factor: F) -> Self {
        self.inertia_factor = factor;
        self
    }

    pub fn with_damping(mut self, linear: F, angular: F) -> Self {
        self.linear_damping = linear;
        self.angular_damping = angular;
        self
    }

    pub fn with_spawn(mut self, spawn: Vec2<F>) -> Self {
        self.spawn = spawn;
        self
    }
}

impl<F: Float> Default for BodyConfig<F> {
    fn default() -> Self {
        Self::new()
    }
}

/// Boundary contact response.
#[derive(Clone, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ContactConfig<F: Float> {
    /// Restitution against floor and ceiling.
    pub floor_restitution: F,
    /// Coulomb friction against floor and ceiling.
    pub floor_friction: F,
    pub wall_restitution: F,
    pub wall_friction: F,
    /// Penetration tolerated before positional correction kicks in.
    pub slop: F,
    /// Fraction of the excess penetration removed per tick.
    pub correction: F,
}

impl<F: Float> ContactConfig<F> {
    pub fn new() -> Self {
        ContactConfig {
            floor_restitution: F::from_f32(0.55),
            floor_friction: F::from_f32(0.6),
            wall_restitution: F::from_f32(0.7),
            wall_friction: F::from_f32(0.3),
            slop: F::from_f32(0.2),
            correction: F::from_f32(0.8),
        }
    }

    pub fn with_floor(mut self, restitution: F, friction: F) -> Self {
        self.floor_restitution = restitution;
        self.floor_friction = friction;
        self
    }

    pub fn with_walls(mut self, restitution: F, friction: F) -> Self {
        self.wall_restitution = restitution;
        self.wall_friction = friction;
        self
    }
}

impl<F: Float> Default for ContactConfig<F> {
    fn default() -> Self {
        Self::new()
    }
}

/// Pointer bats: reach, impulse shaping, and rate limiting.
#[derive(Clone, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct HitConfig<F: Float> {
    /// Extra reach beyond the radius.
    pub margin: F,
    /// Impulse applied even by a stationary pointer.
    pub base_impulse: F,
    /// Impulse per px/s of approach speed.
    pub approach_scale: F,
    /// Clamp on the approach contribution.
    pub min_boost: F,
    pub max_boost: F,
    /// Upward component added to the push direction before normalizing.
    pub upward_bias: F,
    /// Seconds between hits.
    pub cooldown: F,
    /// Only count hits while the pointer is pressed.
    pub require_down: bool,
}

impl<F: Float> HitConfig<F> {
    pub fn new() -> Self {
        HitConfig {
            margin: F::from_f32(6.0),
            base_impulse: F::from_f32(260.0),
            approach_scale: F::from_f32(0.35),
            min_boost: F::zero(),
            max_boost: F::from_f32(600.0),
            upward_bias: F::from_f32(0.35),
            cooldown: F::from_f32(0.09),
            require_down: false,
        }
    }

    pub fn with_impulse(mut self, base: F, approach_scale: F, min_boost: F, max_boost: F) -> Self {
        self.base_impulse = base;
        self.approach_scale = approach_scale;
        self.min_boost = min_boost;
        self.max_boost = max_boost;
        self
    }

    pub fn with_upward_bias(mut self, bias: F) -> Self {
        self.upward_bias = bias;
        self
    }

    pub fn with_cooldown(mut self, cooldown: F) -> Self {
        self.cooldown = cooldown;
        self
    }

    pub fn with_require_down(mut self, require_down: bool) -> Self {
        self.require_down = require_down;
        self
    }
}

impl<F: Float> Default for HitConfig<F> {
    fn default() -> Self {
        Self::new()
    }
}

/// Rope budget and the wound-radius / feed model.
#[derive(Clone, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SpoolConfig<F: Float> {
    pub total_length: F,
    /// Radius of the bare core once nothing is released.
    pub core_radius: F,
    /// Length already hanging off the ball at spawn.
    pub initial_released: F,
    /// Upper bound on release speed, px/s.
    pub max_feed_rate: F,
    /// Body-local angle where the rope leaves the ball at spawn.
    pub exit_angle: F,
    /// Fraction of the gap to the hit angle closed after each hit.
    pub hit_nudge: F,
}

impl<F: Float> SpoolConfig<F> {
    pub fn new() -> Self {
        SpoolConfig {
            total_length: F::from_f32(900.0),
            core_radius: F::from_f32(12.0),
            initial_released: F::from_f32(24.0),
            max_feed_rate: F::from_f32(240.0),
            exit_angle: F::pi() * F::half(),
            hit_nudge: F::from_f32(0.25),
        }
    }

    pub fn with_total_length(mut self, length: F) -> Self {
        self.total_length = length;
        self
    }

    pub fn with_core_radius(mut self, radius: F) -> Self {
        self.core_radius = radius;
        self
    }

    pub fn with_initial_released(mut self, length: F) -> Self {
        self.initial_released = length;
        self
    }

    pub fn with_max_feed_rate(mut self, rate: F) -> Self {
        self.max_feed_rate = rate;
        self
    }

    pub fn with_exit_angle(mut self, angle: F) -> Self {
        self.exit_angle = angle;
        self
    }
}

impl<F: Float> Default for SpoolConfig<F> {
    fn default() -> Self {
        Self::new()
    }
}

/// Rope solver selection and tuning.
#[derive(Clone, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct RopeConfig<F: Float> {
    pub kind: RopeKind,
    pub segment_length: F,
    /// Constraint passes per step. Default: 6.
    pub iterations: usize,
    /// Implicit-velocity multiplier for free nodes. Default: 0.99.
    pub damping: F,
    /// Rod only: blend of interior nodes toward their neighbours' midpoint.
    pub smoothing: F,
    /// Rod only: tail displacement per unit of hit impulse along the tangent.
    pub tail_kick: F,
    /// Restitution of free nodes against the world box.
    pub bounds_restitution: F,
    /// Wound only: stretch ratio of the boundary pair that starts unwinding.
    pub tension_threshold: F,
    /// Wound only: particles released per unit of stretch ratio past threshold.
    pub tension_release_rate: F,
    pub max_release_per_tick: usize,
    /// Wound only: particles released per unit of hit impulse.
    pub hit_release_scale: F,
    pub max_release_per_hit: usize,
    /// Wound only: seed for the wound path.
    pub seed: u64,
}

impl<F: Float> RopeConfig<F> {
    pub fn new(kind: RopeKind) -> Self {
        RopeConfig {
            kind,
            segment_length: F::from_f32(8.0),
            iterations: 6,
            damping: F::from_f32(0.99),
            smoothing: F::from_f32(0.1),
            tail_kick: F::from_f32(0.02),
            bounds_restitution: F::from_f32(0.2),
            tension_threshold: F::from_f32(1.35),
            tension_release_rate: F::from_f32(4.0),
            max_release_per_tick: 3,
            hit_release_scale: F::from_f32(0.01),
            max_release_per_hit: 6,
            seed: 0x5eed_ba11,
        }
    }

    pub fn with_segment_length(mut self, length: F) -> Self {
        self.segment_length = length;
        self
    }

    pub fn with_iterations(mut self, iterations: usize) -> Self {
        self.iterations = iterations;
        self
    }

    pub fn with_damping(mut self, damping: F) -> Self {
        self.damping = damping;
        self
    }

    pub fn with_smoothing(mut self, smoothing: F) -> Self {
        self.smoothing = smoothing;
        self
    }

    pub fn with_tension(mut self, threshold: F, release_rate: F, max_per_tick: usize) -> Self {
        self.tension_threshold = threshold;
        self.tension_release_rate = release_rate;
        self.max_release_per_tick = max_per_tick;
        self
    }

    pub fn with_hit_release(mut self, scale: F, max_per_hit: usize) -> Self {
        self.hit_release_scale = scale;
        self.max_release_per_hit = max_per_hit;
        self
    }

    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = seed;
        self
    }
}

impl<F: Float> Default for RopeConfig<F> {
    fn default() -> Self {
        Self::new(RopeKind::Rod)
    }
}

/// Frame timing and input differencing.
#[derive(Clone, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct StepConfig<F: Float> {
    /// Longest frame simulated; longer gaps are truncated. Default: 1/30 s.
    pub max_step: F,
    /// Sub-steps per frame. Default: 2.
    pub sub_steps: usize,
    /// Floor on the time between pointer samples when differencing.
    pub min_input_dt: F,
    /// Pointer velocity is dropped after this long without an event.
    pub input_stale_after: F,
}

impl<F: Float> StepConfig<F> {
    pub fn new() -> Self {
        StepConfig {
            max_step: F::one() / F::from_f32(30.0),
            sub_steps: 2,
            min_input_dt: F::from_f32(0.001),
            input_stale_after: F::from_f32(0.1),
        }
    }

    pub fn with_max_step(mut self, max_step: F) -> Self {
        self.max_step = max_step;
        self
    }

    pub fn with_sub_steps(mut self, sub_steps: usize) -> Self {
        self.sub_steps = sub_steps.max(1);
        self
    }
}

impl<F: Float> Default for StepConfig<F> {
    fn default() -> Self {
        Self::new()
    }
}

/// Complete simulation configuration.
///
/// # Builder Pattern
/// ```
/// use yarnball::config::{SimConfig, WorldConfig, RopeConfig, RopeKind};
/// use yarnball::vec::Vec2;
///
/// let config: SimConfig<f32> = SimConfig::new()
///     .with_world(WorldConfig::new(1024.0, 768.0).with_gravity(Vec2::new(0.0, 1200.0)))
///     .with_rope(RopeConfig::new(RopeKind::Wound).with_segment_length(6.0));
/// assert!(config.validate().is_ok());
/// ```
#[derive(Clone, Debug, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SimConfig<F: Float> {
    pub world: WorldConfig<F>,
    pub body: BodyConfig<F>,
    pub contact: ContactConfig<F>,
    pub hit: HitConfig<F>,
    pub spool: SpoolConfig<F>,
    pub rope: RopeConfig<F>,
    pub step: StepConfig<F>,
}

impl<F: Float> SimConfig<F> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_world(mut self, world: WorldConfig<F>) -> Self {
        self.world = world;
        self
    }

    pub fn with_body(mut self, body: BodyConfig<F>) -> Self {
        self.body = body;
        self
    }

    pub fn with_contact(mut self, contact: ContactConfig<F>) -> Self {
        self.contact = contact;
        self
    }

    pub fn with_hit(mut self, hit: HitConfig<F>) -> Self {
        self.hit = hit;
        self
    }

    pub fn with_spool(mut self, spool: SpoolConfig<F>) -> Self {
        self.spool = spool;
        self
    }

    pub fn with_rope(mut self, rope: RopeConfig<F>) -> Self {
        self.rope = rope;
        self
    }

    pub fn with_step(mut self, step: StepConfig<F>) -> Self {
        self.step = step;
        self
    }

    /// Spawn point in world coordinates.
    pub fn spawn_point(&self) -> Vec2<F> {
        Vec2::new(
            self.body.spawn.x * self.world.width,
            self.body.spawn.y * self.world.height,
        )
    }

    /// Check every value the solvers divide by or clamp against.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let zero = F::zero();
        let one = F::one();
        let body = &self.body;
        if !(body.radius.is_finite() && body.radius > zero) {
            return Err(ConfigError::InvalidRadius);
        }
        if !(body.mass.is_finite() && body.mass > zero) {
            return Err(ConfigError::InvalidMass);
        }
        if !(body.inertia_factor.is_finite() && body.inertia_factor > zero) {
            return Err(ConfigError::InvalidInertiaFactor);
        }
        unit_open_closed("linear_damping", body.linear_damping)?;
        unit_open_closed("angular_damping", body.angular_damping)?;

        let world = &self.world;
        let diameter = body.radius * F::two();
        if !(world.width.is_finite() && world.height.is_finite())
            || world.width <= diameter
            || world.height <= diameter
        {
            return Err(ConfigError::WorldTooSmall);
        }
        if !world.gravity.is_finite() {
            return Err(ConfigError::CoefficientOutOfRange { name: "gravity" });
        }

        let contact = &self.contact;
        unit_closed("floor_restitution", contact.floor_restitution)?;
        unit_closed("wall_restitution", contact.wall_restitution)?;
        non_negative("floor_friction", contact.floor_friction)?;
        non_negative("wall_friction", contact.wall_friction)?;
        non_negative("slop", contact.slop)?;
        unit_closed("correction", contact.correction)?;

        let hit = &self.hit;
        non_negative("margin", hit.margin)?;
        non_negative("base_impulse", hit.base_impulse)?;
        non_negative("cooldown", hit.cooldown)?;
        if !(hit.min_boost <= hit.max_boost) {
            return Err(ConfigError::CoefficientOutOfRange { name: "min_boost" });
        }

        let spool = &self.spool;
        if !(spool.total_length.is_finite() && spool.total_length > zero) {
            return Err(ConfigError::InvalidRopeLength);
        }
        if !(spool.core_radius >= zero && spool.core_radius < body.radius) {
            return Err(ConfigError::CoreRadiusOutOfRange);
        }
        non_negative("max_feed_rate", spool.max_feed_rate)?;
        non_negative("initial_released", spool.initial_released)?;
        unit_closed("hit_nudge", spool.hit_nudge)?;

        let rope = &self.rope;
        if !(rope.segment_length.is_finite()
            && rope.segment_length > zero
            && rope.segment_length <= spool.total_length)
        {
            return Err(ConfigError::InvalidSegmentLength);
        }
        if rope.iterations == 0 || self.step.sub_steps == 0 {
            return Err(ConfigError::ZeroIterations);
        }
        unit_open_closed("rope_damping", rope.damping)?;
        if !(rope.smoothing >= zero && rope.smoothing < one) {
            return Err(ConfigError::CoefficientOutOfRange { name: "smoothing" });
        }
        unit_closed("bounds_restitution", rope.bounds_restitution)?;
        if !(rope.tension_threshold > one) {
            return Err(ConfigError::CoefficientOutOfRange { name: "tension_threshold" });
        }

        let step = &self.step;
        if !(step.max_step.is_finite() && step.max_step > zero) {
            return Err(ConfigError::InvalidTimeStep);
        }
        if !(step.min_input_dt > zero) {
            return Err(ConfigError::CoefficientOutOfRange { name: "min_input_dt" });
        }
        Ok(())
    }
}

fn unit_closed<F: Float>(name: &'static str, v: F) -> Result<(), ConfigError> {
    if v >= F::zero() && v <= F::one() {
        Ok(())
    } else {
        Err(ConfigError::CoefficientOutOfRange { name })
    }
}

fn unit_open_closed<F: Float>(name: &'static str, v: F) -> Result<(), ConfigError> {
    if v > F::zero() && v <= F::one() {
        Ok(())
    } else {
        Err(ConfigError::CoefficientOutOfRange { name })
    }
}

fn non_negative<F: Float>(name: &'static str, v: F) -> Result<(), ConfigError> {
    if v.is_finite() && v >= F::zero() {
        Ok(())
    } else {
        Err(ConfigError::CoefficientOutOfRange { name })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_validate() {
        assert_eq!(SimConfig::<f32>::new().validate(), Ok(()));
        assert_eq!(SimConfig::<f64>::new().validate(), Ok(()));
    }

    #[test]
    fn core_radius_must_be_inside_ball() {
        let config: SimConfig<f32> = SimConfig::new()
            .with_spool(SpoolConfig::new().with_core_radius(50.0));
        assert_eq!(config.validate(), Err(ConfigError::CoreRadiusOutOfRange));
    }

    #[test]
    fn world_smaller_than_ball_is_rejected() {
        let config: SimConfig<f32> = SimConfig::new().with_world(WorldConfig::new(60.0, 600.0));
        assert_eq!(config.validate(), Err(ConfigError::WorldTooSmall));
    }

    #[test]
    fn restitution_above_one_is_rejected() {
        let config: SimConfig<f32> = SimConfig::new()
            .with_contact(ContactConfig::new().with_floor(1.2, 0.5));
        assert_eq!(
            config.validate(),
            Err(ConfigError::CoefficientOutOfRange { name: "floor_restitution" })
        );
    }

    #[test]
    fn zero_iterations_is_rejected() {
        let config: SimConfig<f32> = SimConfig::new()
            .with_rope(RopeConfig::default().with_iterations(0));
        assert_eq!(config.validate(), Err(ConfigError::ZeroIterations));
    }
}
