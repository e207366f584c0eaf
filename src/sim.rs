//! Frame driver: owns all simulation state and runs the per-step pipeline
//! input → ball → spool → rope.

use crate::body::Body;
use crate::clock::FrameClock;
use crate::collision::resolve_boundaries;
use crate::config::SimConfig;
use crate::error::ConfigError;
use crate::float::Float;
use crate::hit::{up_from_gravity, HitDetector};
use crate::input::{InputTracker, PointerEvent};
use crate::observer::StepObserver;
use crate::rope::{Rope, RopeContext, RopeSolver};
use crate::spool::Spool;
use crate::vec::{Vec, Vec2};
use alloc::vec::Vec as AllocVec;

/// Everything a renderer needs for one frame.
#[derive(Clone, Debug)]
pub struct RenderFrame<F: Float> {
    pub body_position: Vec2<F>,
    pub body_angle: F,
    pub body_radius: F,
    pub anchor: Vec2<F>,
    pub rope: AllocVec<Vec2<F>>,
    /// Free particles at the front of `rope` (wound chain only).
    pub free_count: Option<usize>,
    pub released_length: F,
    pub total_length: F,
}

/// The whole yarn ball simulation.
///
/// # Example
/// ```
/// use yarnball::{Simulation, SimConfig, PointerEvent, NoOpStepObserver};
///
/// let mut sim: Simulation<f64> = Simulation::new(SimConfig::new()).unwrap();
/// sim.pointer(PointerEvent::new(400.0, 500.0, false, 0.0));
/// for i in 0..60 {
///     sim.frame(i as f64 / 60.0, &mut NoOpStepObserver);
/// }
/// let frame = sim.render();
/// assert!(frame.rope.len() >= 2);
/// ```
#[derive(Clone, Debug)]
pub struct Simulation<F: Float> {
    config: SimConfig<F>,
    body: Body<F>,
    spool: Spool<F>,
    rope: Rope<F>,
    input: InputTracker<F>,
    hits: HitDetector<F>,
    clock: FrameClock<F>,
    up: Vec2<F>,
    elapsed: F,
}

impl<F: Float> Simulation<F> {
    pub fn new(config: SimConfig<F>) -> Result<Self, ConfigError> {
        config.validate()?;
        let body = Body::new(config.spawn_point(), &config.body);
        let mut spool = Spool::new(&config.spool, body.radius());
        let rope = Rope::new(&config, &body, &spool);
        if let Some(local) = rope.exit_local() {
            spool.follow_exit(local);
        }
        Ok(Simulation {
            input: InputTracker::new(config.step.min_input_dt, config.step.input_stale_after),
            hits: HitDetector::new(),
            clock: FrameClock::new(config.step.max_step),
            up: up_from_gravity(config.world.gravity),
            elapsed: F::zero(),
            config,
            body,
            spool,
            rope,
        })
    }

    /// Feed one pointer/touch sample.
    pub fn pointer(&mut self, event: PointerEvent<F>) {
        self.input.handle(event);
    }

    /// The pointer left the canvas or the touch ended.
    pub fn pointer_leave(&mut self) {
        self.input.clear();
    }

    /// Advance by the time since the previous frame, split into sub-steps.
    /// Returns the simulated time step.
    pub fn frame<O: StepObserver<F>>(&mut self, now: F, observer: &mut O) -> F {
        let dt = self.clock.tick(now);
        self.input.expire(now);
        let sub_steps = self.config.step.sub_steps.max(1);
        let sub_dt = dt / F::from_f32(sub_steps as f32);
        for _ in 0..sub_steps {
            self.step(sub_dt, observer);
        }
        dt
    }

    /// One fixed step of the whole pipeline. `dt` is clamped to `[0, max_step]`.
    pub fn step<O: StepObserver<F>>(&mut self, dt: F, observer: &mut O) {
        let dt = if dt.is_finite() {
            dt.clamp(F::zero(), self.config.step.max_step)
        } else {
            F::zero()
        };
        self.elapsed = self.elapsed + dt;
        self.hits.tick(dt);

        self.body.integrate(self.config.world.gravity, dt);
        observer.on_integrate();
        resolve_boundaries(&mut self.body, &self.config.world, &self.config.contact, observer);
        self.apply_pointer(observer);
        self.recover_if_lost(observer);

        self.spool.advance(&self.body, dt);
        let ctx = RopeContext::new(&self.body, &self.spool, self.config.world.gravity);
        self.rope.advance(dt, &ctx, observer);
        self.spool.absorb(self.rope.released_length());
        self.sync_exit();

        observer.on_step_complete();
    }

    fn apply_pointer<O: StepObserver<F>>(&mut self, observer: &mut O) {
        let pointer = match self.input.position() {
            Some(p) => p,
            None => return,
        };
        if self.config.hit.require_down && !self.input.is_down() {
            return;
        }
        let hit = self.hits.try_hit(
            &mut self.body,
            pointer,
            self.input.velocity(),
            self.up,
            &self.config.hit,
        );
        if let Some(hit) = hit {
            if self.rope.exit_local().is_none() {
                self.spool.nudge_toward(hit.local_angle);
            }
            let ctx = RopeContext::new(&self.body, &self.spool, self.config.world.gravity);
            self.rope.on_hit(&hit, &ctx, observer);
            self.sync_exit();
            observer.on_hit(&hit);
        }
    }

    /// Point the spool at where the rope really leaves the ball, when the rope
    /// tracks that itself.
    fn sync_exit(&mut self) {
        if let Some(local) = self.rope.exit_local() {
            self.spool.follow_exit(local);
        }
    }

    /// Safety net: a ball that slipped far below the floor (or blew up) goes
    /// back to the spawn point, rope and all.
    fn recover_if_lost<O: StepObserver<F>>(&mut self, observer: &mut O) {
        let lost_below = self.body.position.y > self.config.world.height + self.config.body.recovery_margin;
        let blown_up = !self.body.position.is_finite() || !self.body.velocity.is_finite() || !self.body.spin.is_finite();
        if !lost_below && !blown_up {
            return;
        }
        let spawn = self.config.spawn_point();
        let offset = spawn - self.body.position;
        self.body.teleport(spawn);
        if !self.body.angle.is_finite() {
            self.body.angle = F::zero();
        }
        if offset.is_finite() {
            self.rope.translate(offset);
        } else {
            self.rope = Rope::new(&self.config, &self.body, &self.spool);
            self.sync_exit();
        }
        log::info!("yarn ball left the world, respawned at {:?}", spawn);
        observer.on_respawn();
    }

    /// Snapshot for the renderer.
    pub fn render(&self) -> RenderFrame<F> {
        RenderFrame {
            body_position: self.body.position,
            body_angle: self.body.angle,
            body_radius: self.body.radius(),
            anchor: self.spool.anchor(&self.body),
            rope: self.rope.positions(),
            free_count: self.rope.free_count(),
            released_length: self.spool.released_length(),
            total_length: self.spool.total_length(),
        }
    }

    pub fn config(&self) -> &SimConfig<F> {
        &self.config
    }

    pub fn body(&self) -> &Body<F> {
        &self.body
    }

    /// Direct access for scripted scenes and tests.
    pub fn body_mut(&mut self) -> &mut Body<F> {
        &mut self.body
    }

    pub fn spool(&self) -> &Spool<F> {
        &self.spool
    }

    pub fn rope(&self) -> &Rope<F> {
        &self.rope
    }

    pub fn input(&self) -> &InputTracker<F> {
        &self.input
    }

    /// Seconds until the pointer can hit again.
    pub fn hit_cooldown(&self) -> F {
        self.hits.cooldown()
    }

    /// Simulated seconds so far.
    pub fn elapsed(&self) -> F {
        self.elapsed
    }
}
