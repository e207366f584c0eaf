//! Disk-wound rope: a Verlet chain whose far end is glued inside the ball and
//! peels off progressively.
//!
//! Particles are ordered tail first. Indices below `free_count` are simulated;
//! the rest are pinned to a fixed body-local path and follow the ball rigidly.
//! The path starts on the rim, so the free rope leaves the ball there and the
//! exit creeps inward as the wind is used up.

use crate::config::RopeConfig;
use crate::constraint::{BoundsConstraint, DistanceConstraint};
use crate::float::Float;
use crate::hit::PointerHit;
use crate::observer::StepObserver;
use crate::particle::Particle;
use crate::rod::down_from_gravity;
use crate::rope::{RopeContext, RopeSolver};
use crate::vec::{Vec, Vec2};
use alloc::vec::Vec as AllocVec;
use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};

#[derive(Clone, Debug)]
pub struct WoundChain<F: Float> {
    particles: AllocVec<Particle<Vec2<F>>>,
    local_path: AllocVec<Vec2<F>>,
    constraints: AllocVec<DistanceConstraint<Vec2<F>>>,
    free_count: usize,
    segment_length: F,
    total_length: F,
    iterations: usize,
    damping: F,
    tension_threshold: F,
    tension_release_rate: F,
    max_release_per_tick: usize,
    hit_release_scale: F,
    max_release_per_hit: usize,
    bounds: BoundsConstraint<F>,
}

impl<F: Float> WoundChain<F> {
    pub fn new(
        ctx: &RopeContext<F>,
        config: &RopeConfig<F>,
        bounds: BoundsConstraint<F>,
        total_length: F,
        body_radius: F,
        core_radius: F,
        exit_angle: F,
    ) -> Self {
        let seg = config.segment_length;
        let count = Self::particle_count(total_length, seg);
        let local_path = wound_path(count, body_radius, core_radius, exit_angle, seg, config.seed);

        let particles = local_path
            .iter()
            .map(|&local| Particle::pinned(ctx.world_point(local)))
            .collect();
        let constraints = (0..count - 1)
            .map(|i| DistanceConstraint::new(i, i + 1, seg, F::one()))
            .collect();

        let mut chain = WoundChain {
            particles,
            local_path,
            constraints,
            free_count: 0,
            segment_length: seg,
            total_length,
            iterations: config.iterations,
            damping: config.damping,
            tension_threshold: config.tension_threshold,
            tension_release_rate: config.tension_release_rate,
            max_release_per_tick: config.max_release_per_tick,
            hit_release_scale: config.hit_release_scale,
            max_release_per_hit: config.max_release_per_hit,
            bounds,
        };
        chain.hang_initial(ctx);
        chain
    }

    /// Enough particles to cover `total_length` plus the innermost anchor.
    pub fn particle_count(total_length: F, segment_length: F) -> usize {
        let mut segments = (total_length / segment_length).floor_index();
        if F::from_f32(segments as f32) * segment_length < total_length {
            segments += 1;
        }
        segments.max(1) + 1
    }

    /// Free the particles the initial released length calls for and let them
    /// hang straight down from the exit.
    fn hang_initial(&mut self, ctx: &RopeContext<F>) {
        let target = self.feed_target(ctx.released_length);
        if target == 0 {
            return;
        }
        let exit = self.particles[target].pos;
        let down = down_from_gravity(ctx.gravity);
        for k in 0..target {
            let pos = exit + down.scale(self.segment_length * F::from_f32((target - k) as f32));
            let p = &mut self.particles[k];
            p.pos = pos;
            p.prev_pos = pos;
            p.release(F::one());
        }
        self.free_count = target;
    }

    fn feed_target(&self, released_length: F) -> usize {
        (released_length / self.segment_length)
            .floor_index()
            .min(self.particles.len() - 1)
    }

    pub fn free_count(&self) -> usize {
        self.free_count
    }

    pub fn local_path(&self) -> &[Vec2<F>] {
        &self.local_path
    }

    pub fn particle(&self, index: usize) -> &Particle<Vec2<F>> {
        &self.particles[index]
    }

    /// Stretch ratio of the pair joining the free rope to the wind.
    pub fn boundary_stretch(&self) -> Option<F> {
        if self.free_count == 0 {
            return None;
        }
        Some(self.constraints[self.free_count - 1].stretch(&self.particles))
    }

    /// Hand up to `count` wound particles to the integrator. Always leaves at
    /// least one particle glued. Returns how many were released.
    pub fn promote<O: StepObserver<F>>(&mut self, count: usize, observer: &mut O) -> usize {
        let limit = self.particles.len() - 1;
        let new_free = (self.free_count + count).min(limit);
        let released = new_free - self.free_count;
        if released == 0 {
            return 0;
        }
        for p in &mut self.particles[self.free_count..new_free] {
            p.release(F::one());
        }
        self.free_count = new_free;
        log::trace!("unwound {} particles, {} free", released, new_free);
        observer.on_unwind(released, new_free);
        released
    }

    /// Drive wound particles to the ball. With `track` the old position
    /// becomes history, so a particle released later leaves with the surface
    /// velocity it had.
    fn glue(&mut self, ctx: &RopeContext<F>, track: bool) {
        let start = self.free_count;
        for (p, &local) in self.particles[start..].iter_mut().zip(&self.local_path[start..]) {
            let world = ctx.world_point(local);
            if track {
                p.move_to(world);
            } else {
                p.pos = world;
            }
        }
    }

    fn release_under_tension<O: StepObserver<F>>(&mut self, observer: &mut O) -> usize {
        let stretch = match self.boundary_stretch() {
            Some(s) => s,
            None => return 0,
        };
        if stretch <= self.tension_threshold {
            return 0;
        }
        let excess = stretch - self.tension_threshold;
        let count = ((excess * self.tension_release_rate).floor_index() + 1).min(self.max_release_per_tick);
        self.promote(count, observer)
    }
}

impl<F: Float> RopeSolver<F> for WoundChain<F> {
    fn advance<O: StepObserver<F>>(&mut self, dt: F, ctx: &RopeContext<F>, observer: &mut O) {
        self.glue(ctx, true);

        let target = self.feed_target(ctx.released_length);
        if target > self.free_count {
            let behind = target - self.free_count;
            self.promote(behind.min(self.max_release_per_tick), observer);
        }

        for p in self.particles[..self.free_count].iter_mut() {
            p.integrate(ctx.gravity, dt, self.damping);
        }

        // Must run before the solve, which leaves the boundary pair at rest length.
        if self.release_under_tension(observer) > 0 {
            self.glue(ctx, false);
        }

        for i in 0..self.iterations {
            for c in self.constraints.iter() {
                c.solve(&mut self.particles);
            }
            self.bounds.solve(&mut self.particles[..self.free_count]);
            observer.on_constraint_iteration(i);
        }
    }

    fn on_hit<O: StepObserver<F>>(&mut self, hit: &PointerHit<F>, _ctx: &RopeContext<F>, observer: &mut O) {
        let count = (hit.magnitude * self.hit_release_scale)
            .floor_index()
            .min(self.max_release_per_hit);
        self.promote(count, observer);
    }

    fn translate(&mut self, offset: Vec2<F>) {
        for p in self.particles.iter_mut() {
            p.translate(offset);
        }
    }

    fn positions(&self) -> AllocVec<Vec2<F>> {
        self.particles.iter().map(|p| p.pos).collect()
    }

    fn released_length(&self) -> F {
        (self.segment_length * F::from_f32(self.free_count as f32)).min(self.total_length)
    }

    fn len(&self) -> usize {
        self.particles.len()
    }

    /// The first wound particle's anchor on the path.
    fn exit_local(&self) -> Option<Vec2<F>> {
        self.local_path.get(self.free_count).copied()
    }
}

/// Body-local anchor path for the wound rope: `count` points starting on the
/// rim at `exit_angle` and spiralling inward with seeded jitter, about one
/// segment apart and never outside `radius`.
pub fn wound_path<F: Float>(
    count: usize,
    radius: F,
    core_radius: F,
    exit_angle: F,
    segment_length: F,
    seed: u64,
) -> AllocVec<Vec2<F>> {
    let mut rng = SmallRng::seed_from_u64(seed);
    let mut path = AllocVec::with_capacity(count);
    if count == 0 {
        return path;
    }

    let inner = core_radius.max(segment_length).min(radius * F::half());
    let mut phi = exit_angle;
    let mut p = Vec2::from_angle(phi).scale(radius);
    path.push(p);

    let last = F::from_f32(count.saturating_sub(1).max(1) as f32);
    for k in 1..count {
        let t = F::from_f32(k as f32) / last;
        let wobble = F::from_f32(rng.gen_range(-1.0f32..1.0)) * segment_length * F::from_f32(0.35);
        let rho = (radius.lerp(inner, t) + wobble).clamp(inner, radius);
        phi = phi + segment_length / rho + F::from_f32(rng.gen_range(-0.15f32..0.15));

        let target = Vec2::from_angle(phi).scale(rho);
        let step = (target - p).normalize_or(Vec2::from_angle(phi).perp());
        let mut next = p + step.scale(segment_length);
        if next.length() > radius {
            next = next.normalize().scale(radius);
        }
        path.push(next);
        p = next;
    }
    path
}
