//! Rigid-rod rope: fixed-length segments hanging from the spool anchor,
//! solved with forward/backward reaching (FABRIK) over Verlet predictions.

use crate::config::RopeConfig;
use crate::constraint::BoundsConstraint;
use crate::float::Float;
use crate::hit::PointerHit;
use crate::observer::StepObserver;
use crate::particle::Particle;
use crate::rope::{RopeContext, RopeSolver};
use crate::vec::{Vec, Vec2};
use alloc::vec::Vec as AllocVec;

/// Node 0 is pinned to the anchor; the rest are free. The chain only grows.
#[derive(Clone, Debug)]
pub struct RodChain<F: Float> {
    nodes: AllocVec<Particle<Vec2<F>>>,
    segment_length: F,
    iterations: usize,
    damping: F,
    smoothing: F,
    tail_kick: F,
    bounds: BoundsConstraint<F>,
}

impl<F: Float> RodChain<F> {
    /// Build the chain already hanging straight along gravity, with as many
    /// nodes as the released length allows.
    pub fn new(ctx: &RopeContext<F>, config: &RopeConfig<F>, bounds: BoundsConstraint<F>) -> Self {
        let count = Self::target_count(ctx.released_length, config.segment_length);
        let down = down_from_gravity(ctx.gravity);
        let mut nodes = AllocVec::with_capacity(count);
        nodes.push(Particle::pinned(ctx.anchor));
        for i in 1..count {
            let offset = down.scale(config.segment_length * F::from_f32(i as f32));
            nodes.push(Particle::new(ctx.anchor + offset, F::one()));
        }
        RodChain {
            nodes,
            segment_length: config.segment_length,
            iterations: config.iterations,
            damping: config.damping,
            smoothing: config.smoothing,
            tail_kick: config.tail_kick,
            bounds,
        }
    }

    /// `floor(L / segment) + 1`.
    pub fn target_count(released_length: F, segment_length: F) -> usize {
        (released_length / segment_length).floor_index() + 1
    }

    pub fn segment_length(&self) -> F {
        self.segment_length
    }

    pub fn node(&self, index: usize) -> &Particle<Vec2<F>> {
        &self.nodes[index]
    }

    /// Add one node a segment past the tail, carrying the tail's velocity.
    fn append(&mut self, gravity: Vec2<F>) {
        let n = self.nodes.len();
        let tail = &self.nodes[n - 1];
        let direction = if n >= 2 {
            (tail.pos - self.nodes[n - 2].pos).normalize_or(down_from_gravity(gravity))
        } else {
            down_from_gravity(gravity)
        };
        let pos = tail.pos + direction.scale(self.segment_length);
        let velocity = if tail.pinned { Vec2::zero() } else { tail.velocity_raw() };
        let mut node = Particle::new(pos, F::one());
        node.prev_pos = pos - velocity;
        self.nodes.push(node);
    }

    /// Tail held at `tail_target`, walk back to node 0.
    fn reach_forward(&mut self, tail_target: Vec2<F>, down: Vec2<F>) {
        let n = self.nodes.len();
        self.nodes[n - 1].pos = tail_target;
        for k in (0..n - 1).rev() {
            let next = self.nodes[k + 1].pos;
            let dir = (self.nodes[k].pos - next).normalize_or(-down);
            self.nodes[k].pos = next + dir.scale(self.segment_length);
        }
    }

    /// Node 0 back on the anchor, walk out to the tail.
    fn reach_backward(&mut self, anchor: Vec2<F>, down: Vec2<F>) {
        self.nodes[0].pos = anchor;
        for k in 1..self.nodes.len() {
            let prev = self.nodes[k - 1].pos;
            let dir = (self.nodes[k].pos - prev).normalize_or(down);
            self.nodes[k].pos = prev + dir.scale(self.segment_length);
        }
    }

    fn smooth(&mut self) {
        if self.smoothing <= F::zero() {
            return;
        }
        for k in 1..self.nodes.len().saturating_sub(1) {
            let mid = self.nodes[k - 1].pos.lerp(self.nodes[k + 1].pos, F::half());
            self.nodes[k].pos = self.nodes[k].pos.lerp(mid, self.smoothing);
        }
    }
}

impl<F: Float> RopeSolver<F> for RodChain<F> {
    fn advance<O: StepObserver<F>>(&mut self, dt: F, ctx: &RopeContext<F>, observer: &mut O) {
        let target = Self::target_count(ctx.released_length, self.segment_length);
        if self.nodes.len() < target {
            self.append(ctx.gravity);
            observer.on_node_appended(self.nodes.len());
        }

        self.nodes[0].move_to(ctx.anchor);
        for node in self.nodes.iter_mut().skip(1) {
            node.integrate(ctx.gravity, dt, self.damping);
        }
        if self.nodes.len() < 2 {
            return;
        }

        for node in self.nodes.iter_mut().skip(1) {
            self.bounds.solve_one(node);
        }

        let down = down_from_gravity(ctx.gravity);
        let tail_target = self.nodes[self.nodes.len() - 1].pos;
        for i in 0..self.iterations {
            self.reach_forward(tail_target, down);
            self.smooth();
            self.reach_backward(ctx.anchor, down);
            observer.on_constraint_iteration(i);
        }
    }

    fn on_hit<O: StepObserver<F>>(&mut self, hit: &PointerHit<F>, ctx: &RopeContext<F>, _observer: &mut O) {
        let along = hit.impulse.dot(ctx.tangent);
        let kick = ctx.tangent.scale(along * self.tail_kick);
        if let Some(tail) = self.nodes.last_mut() {
            tail.kick(kick);
        }
    }

    fn translate(&mut self, offset: Vec2<F>) {
        for node in self.nodes.iter_mut() {
            node.translate(offset);
        }
    }

    fn positions(&self) -> AllocVec<Vec2<F>> {
        self.nodes.iter().map(|p| p.pos).collect()
    }

    fn released_length(&self) -> F {
        self.segment_length * F::from_f32((self.nodes.len() - 1) as f32)
    }

    fn len(&self) -> usize {
        self.nodes.len()
    }
}

pub(crate) fn down_from_gravity<F: Float>(gravity: Vec2<F>) -> Vec2<F> {
    gravity.normalize_or(Vec2::new(F::zero(), F::one()))
}
