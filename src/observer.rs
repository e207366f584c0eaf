//! Step observer trait for monitoring simulation progress.

use crate::collision::Boundary;
use crate::float::Float;
use crate::hit::PointerHit;

/// Trait for observing simulation steps.
///
/// Implement this to watch solver progress for debugging, visualization, or
/// sound cues. All methods have default no-op implementations.
pub trait StepObserver<F: Float> {
    /// Called after the ball's state has been integrated.
    fn on_integrate(&mut self) {}

    /// Called when a boundary contact applied a normal impulse.
    fn on_contact(&mut self, _boundary: Boundary, _normal_impulse: F) {}

    /// Called when the pointer batted the ball.
    fn on_hit(&mut self, _hit: &PointerHit<F>) {}

    /// Called when the ball fell off-screen and was put back at the spawn point.
    fn on_respawn(&mut self) {}

    /// Called after each rope constraint iteration.
    fn on_constraint_iteration(&mut self, _iteration: usize) {}

    /// Called when wound particles were handed to the integrator.
    fn on_unwind(&mut self, _released: usize, _free_count: usize) {}

    /// Called when the rod chain gained a node.
    fn on_node_appended(&mut self, _count: usize) {}

    /// Called when a simulation step is fully complete.
    fn on_step_complete(&mut self) {}
}

/// A no-op observer that does nothing. Use as default when no observation needed.
pub struct NoOpStepObserver;

impl<F: Float> StepObserver<F> for NoOpStepObserver {}
