//! Position constraints for Verlet particles: distance and world bounds.

use crate::float::Float;
use crate::vec::{Vec, Vec2};
use crate::particle::Particle;

/// Keeps two particles `rest_length` apart.
///
/// Corrections are split by inverse mass, so a pinned end stays put and only
/// the free end moves. Two pinned ends are skipped entirely.
#[derive(Clone, Debug)]
pub struct DistanceConstraint<V: Vec> {
    pub a: usize,
    pub b: usize,
    pub rest_length: V::Scalar,
    pub stiffness: V::Scalar,
}

impl<V: Vec> DistanceConstraint<V> {
    pub fn new(a: usize, b: usize, rest_length: V::Scalar, stiffness: V::Scalar) -> Self {
        DistanceConstraint { a, b, rest_length, stiffness }
    }

    /// Current length over rest length.
    pub fn stretch(&self, particles: &[Particle<V>]) -> V::Scalar {
        let dist = particles[self.a].pos.distance(particles[self.b].pos);
        dist / self.rest_length.max(V::Scalar::from_f32(1e-6))
    }

    pub fn solve(&self, particles: &mut [Particle<V>]) {
        let a_pos = particles[self.a].pos;
        let b_pos = particles[self.b].pos;
        let a_inv = particles[self.a].inv_mass;
        let b_inv = particles[self.b].inv_mass;

        let w_total = a_inv + b_inv;
        if w_total.is_near_zero(V::Scalar::from_f32(1e-10)) {
            return; // both pinned
        }

        let delta = b_pos - a_pos;
        let dist = delta.length();
        if dist.is_near_zero(V::Scalar::from_f32(1e-10)) {
            return; // degenerate
        }

        let error = dist - self.rest_length;
        let correction = delta.scale(error * self.stiffness / dist);

        if !particles[self.a].pinned {
            particles[self.a].pos = particles[self.a].pos + correction.scale(a_inv / w_total);
        }
        if !particles[self.b].pinned {
            particles[self.b].pos = particles[self.b].pos - correction.scale(b_inv / w_total);
        }
    }
}

/// Axis-aligned box that free particles are clamped into.
///
/// On contact the normal component of the implicit velocity is reflected and
/// scaled by `restitution`; 0 makes the contact fully inelastic.
#[derive(Clone, Debug)]
pub struct BoundsConstraint<F: Float> {
    pub min: Vec2<F>,
    pub max: Vec2<F>,
    pub restitution: F,
}

impl<F: Float> BoundsConstraint<F> {
    pub fn new(min: Vec2<F>, max: Vec2<F>, restitution: F) -> Self {
        BoundsConstraint { min, max, restitution }
    }

    pub fn solve(&self, particles: &mut [Particle<Vec2<F>>]) {
        for p in particles.iter_mut() {
            self.solve_one(p);
        }
    }

    pub fn solve_one(&self, p: &mut Particle<Vec2<F>>) {
        if p.pinned {
            return;
        }
        if p.pos.x < self.min.x {
            let vel_x = p.pos.x - p.prev_pos.x;
            p.pos.x = self.min.x;
            p.prev_pos.x = p.pos.x + vel_x * self.restitution;
        } else if p.pos.x > self.max.x {
            let vel_x = p.pos.x - p.prev_pos.x;
            p.pos.x = self.max.x;
            p.prev_pos.x = p.pos.x + vel_x * self.restitution;
        }
        if p.pos.y < self.min.y {
            let vel_y = p.pos.y - p.prev_pos.y;
            p.pos.y = self.min.y;
            p.prev_pos.y = p.pos.y + vel_y * self.restitution;
        } else if p.pos.y > self.max.y {
            let vel_y = p.pos.y - p.prev_pos.y;
            p.pos.y = self.max.y;
            p.prev_pos.y = p.pos.y + vel_y * self.restitution;
        }
    }
}
