//! Verlet particles with position-based dynamics.

use crate::float::Float;
use crate::vec::Vec;

/// A Verlet particle: position-based dynamics with implicit velocity.
///
/// Velocity is never stored. It is `pos - prev_pos`, which lets constraint
/// solvers edit positions directly without a separate velocity fix-up.
#[derive(Clone, Debug)]
pub struct Particle<V: Vec> {
    pub pos: V,
    pub prev_pos: V,
    pub inv_mass: V::Scalar,
    /// Pinned particles are driven externally (anchors, glued rope) and are
    /// never integrated or moved by constraints.
    pub pinned: bool,
}

impl<V: Vec> Particle<V> {
    pub fn new(pos: V, mass: V::Scalar) -> Self {
        Particle {
            pos,
            prev_pos: pos,
            inv_mass: inverse_mass(mass),
            pinned: false,
        }
    }

    pub fn pinned(pos: V) -> Self {
        Particle {
            pos,
            prev_pos: pos,
            inv_mass: V::Scalar::zero(),
            pinned: true,
        }
    }

    /// One Verlet step: `pos += (pos - prev) * damping + accel * dt^2`.
    pub fn integrate(&mut self, accel: V, dt: V::Scalar, damping: V::Scalar) {
        if self.pinned {
            return;
        }
        let velocity = (self.pos - self.prev_pos).scale(damping);
        let new_pos = self.pos + velocity + accel.scale(dt * dt);
        self.prev_pos = self.pos;
        self.pos = new_pos;
    }

    /// Per-step displacement, i.e. velocity times dt.
    pub fn velocity_raw(&self) -> V {
        self.pos - self.prev_pos
    }

    /// Add an instantaneous displacement without touching `prev_pos`, which
    /// shows up as extra implicit velocity on the next step.
    pub fn kick(&mut self, offset: V) {
        if !self.pinned {
            self.pos = self.pos + offset;
        }
    }

    /// Shift position and history together (no velocity change).
    pub fn translate(&mut self, offset: V) {
        self.pos = self.pos + offset;
        self.prev_pos = self.prev_pos + offset;
    }

    /// Hand the particle over to the integrator. Position and history are kept,
    /// so it leaves with whatever motion it was being driven with.
    pub fn release(&mut self, mass: V::Scalar) {
        self.pinned = false;
        self.inv_mass = inverse_mass(mass);
    }

    /// Drive a pinned particle to `pos`, recording the old position as history.
    pub fn move_to(&mut self, pos: V) {
        if self.pinned {
            self.prev_pos = self.pos;
            self.pos = pos;
        }
    }
}

fn inverse_mass<F: Float>(mass: F) -> F {
    if mass.is_near_zero(F::from_f32(1e-10)) {
        F::zero()
    } else {
        F::one() / mass
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::vec::Vec2;

    #[test]
    fn translate_keeps_velocity() {
        let mut p = Particle::new(Vec2::new(0.0f64, 0.0), 1.0);
        p.prev_pos = Vec2::new(-1.0, 0.0);
        p.translate(Vec2::new(10.0, 5.0));
        assert_eq!(p.velocity_raw(), Vec2::new(1.0, 0.0));
    }

    #[test]
    fn kick_adds_velocity() {
        let mut p = Particle::new(Vec2::new(0.0f64, 0.0), 1.0);
        p.kick(Vec2::new(0.0, 2.0));
        assert_eq!(p.velocity_raw(), Vec2::new(0.0, 2.0));
    }

    #[test]
    fn move_to_ignores_free_particles() {
        let mut p = Particle::new(Vec2::new(1.0f64, 1.0), 1.0);
        p.move_to(Vec2::new(5.0, 5.0));
        assert_eq!(p.pos, Vec2::new(1.0, 1.0));
    }

    #[test]
    fn zero_mass_is_immovable_weight() {
        let p: Particle<Vec2<f64>> = Particle::new(Vec2::new(0.0, 0.0), 0.0);
        assert_eq!(p.inv_mass, 0.0);
        let mut q = Particle::pinned(Vec2::new(0.0f64, 0.0));
        q.release(2.0);
        assert!(!q.pinned);
        assert_eq!(q.inv_mass, 0.5);
    }
}
