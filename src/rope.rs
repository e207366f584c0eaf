//! The rope solver contract and the enum that selects a strategy.
//!
//! Both strategies are one-way coupled: they read the ball's pose and the
//! spool state, and never push back on the ball.

use crate::body::Body;
use crate::config::{RopeKind, SimConfig};
use crate::constraint::BoundsConstraint;
use crate::float::Float;
use crate::hit::PointerHit;
use crate::observer::StepObserver;
use crate::rod::RodChain;
use crate::spool::Spool;
use crate::vec::Vec2;
use crate::wound::WoundChain;
use alloc::vec::Vec as AllocVec;

/// Read-only view of the ball and spool handed to the rope each step.
#[derive(Copy, Clone, Debug)]
pub struct RopeContext<F: Float> {
    pub body_position: Vec2<F>,
    pub body_angle: F,
    /// Where the rope leaves the wind, in world space.
    pub anchor: Vec2<F>,
    /// Unit tangent at the anchor, oriented with the spin.
    pub tangent: Vec2<F>,
    pub released_length: F,
    pub gravity: Vec2<F>,
}

impl<F: Float> RopeContext<F> {
    pub fn new(body: &Body<F>, spool: &Spool<F>, gravity: Vec2<F>) -> Self {
        RopeContext {
            body_position: body.position,
            body_angle: body.angle,
            anchor: spool.anchor(body),
            tangent: spool.tangent(body),
            released_length: spool.released_length(),
            gravity,
        }
    }

    /// Body-local point to world space using the captured pose.
    pub fn world_point(&self, local: Vec2<F>) -> Vec2<F> {
        self.body_position + local.rotate(self.body_angle)
    }
}

/// Common interface of the rope strategies.
pub trait RopeSolver<F: Float> {
    /// Advance one step against the current ball/spool state.
    fn advance<O: StepObserver<F>>(&mut self, dt: F, ctx: &RopeContext<F>, observer: &mut O);

    /// React to a pointer hit on the ball (visual kick or extra release).
    fn on_hit<O: StepObserver<F>>(&mut self, hit: &PointerHit<F>, ctx: &RopeContext<F>, observer: &mut O);

    /// Move every node by `offset` without changing velocities.
    fn translate(&mut self, offset: Vec2<F>);

    /// Node positions, tail first for the wound chain and anchor first for the rod.
    fn positions(&self) -> AllocVec<Vec2<F>>;

    /// Rope length currently hanging free.
    fn released_length(&self) -> F;

    fn len(&self) -> usize;

    /// Body-local point where the rope leaves the ball, for ropes that decide
    /// it themselves. `None` means the rope hangs from the spool anchor.
    fn exit_local(&self) -> Option<Vec2<F>> {
        None
    }

    fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// The strategy picked at construction.
#[derive(Clone, Debug)]
pub enum Rope<F: Float> {
    Rod(RodChain<F>),
    Wound(WoundChain<F>),
}

impl<F: Float> Rope<F> {
    pub fn new(config: &SimConfig<F>, body: &Body<F>, spool: &Spool<F>) -> Self {
        let bounds = BoundsConstraint::new(
            Vec2::new(F::zero(), F::zero()),
            Vec2::new(config.world.width, config.world.height),
            config.rope.bounds_restitution,
        );
        let ctx = RopeContext::new(body, spool, config.world.gravity);
        match config.rope.kind {
            RopeKind::Rod => Rope::Rod(RodChain::new(&ctx, &config.rope, bounds)),
            RopeKind::Wound => Rope::Wound(WoundChain::new(
                &ctx,
                &config.rope,
                bounds,
                spool.total_length(),
                body.radius(),
                config.spool.core_radius,
                spool.exit_angle(),
            )),
        }
    }

    pub fn kind(&self) -> RopeKind {
        match self {
            Rope::Rod(_) => RopeKind::Rod,
            Rope::Wound(_) => RopeKind::Wound,
        }
    }

    /// Number of free particles, for the wound chain.
    pub fn free_count(&self) -> Option<usize> {
        match self {
            Rope::Rod(_) => None,
            Rope::Wound(chain) => Some(chain.free_count()),
        }
    }
}

impl<F: Float> RopeSolver<F> for Rope<F> {
    fn advance<O: StepObserver<F>>(&mut self, dt: F, ctx: &RopeContext<F>, observer: &mut O) {
        match self {
            Rope::Rod(chain) => chain.advance(dt, ctx, observer),
            Rope::Wound(chain) => chain.advance(dt, ctx, observer),
        }
    }

    fn on_hit<O: StepObserver<F>>(&mut self, hit: &PointerHit<F>, ctx: &RopeContext<F>, observer: &mut O) {
        match self {
            Rope::Rod(chain) => chain.on_hit(hit, ctx, observer),
            Rope::Wound(chain) => chain.on_hit(hit, ctx, observer),
        }
    }

    fn translate(&mut self, offset: Vec2<F>) {
        match self {
            Rope::Rod(chain) => chain.translate(offset),
            Rope::Wound(chain) => chain.translate(offset),
        }
    }

    fn positions(&self) -> AllocVec<Vec2<F>> {
        match self {
            Rope::Rod(chain) => chain.positions(),
            Rope::Wound(chain) => chain.positions(),
        }
    }

    fn released_length(&self) -> F {
        match self {
            Rope::Rod(chain) => chain.released_length(),
            Rope::Wound(chain) => chain.released_length(),
        }
    }

    fn len(&self) -> usize {
        match self {
            Rope::Rod(chain) => chain.len(),
            Rope::Wound(chain) => chain.len(),
        }
    }

    fn exit_local(&self) -> Option<Vec2<F>> {
        match self {
            Rope::Rod(chain) => chain.exit_local(),
            Rope::Wound(chain) => chain.exit_local(),
        }
    }
}
