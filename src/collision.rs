//! Ball versus world-box contact: positional correction plus normal and
//! Coulomb friction impulses.

use crate::body::Body;
use crate::config::{ContactConfig, WorldConfig};
use crate::float::Float;
use crate::observer::StepObserver;
use crate::vec::{Vec, Vec2};

/// One of the four half-planes bounding the world.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Boundary {
    Floor,
    Ceiling,
    LeftWall,
    RightWall,
}

impl Boundary {
    pub const ALL: [Boundary; 4] = [
        Boundary::Floor,
        Boundary::Ceiling,
        Boundary::LeftWall,
        Boundary::RightWall,
    ];

    /// Unit normal pointing back into the world.
    pub fn normal<F: Float>(self) -> Vec2<F> {
        let (zero, one) = (F::zero(), F::one());
        match self {
            Boundary::Floor => Vec2::new(zero, -one),
            Boundary::Ceiling => Vec2::new(zero, one),
            Boundary::LeftWall => Vec2::new(one, zero),
            Boundary::RightWall => Vec2::new(-one, zero),
        }
    }

    /// How far a disk at `center` with `radius` reaches past this boundary.
    pub fn penetration<F: Float>(self, center: Vec2<F>, radius: F, world: &WorldConfig<F>) -> F {
        match self {
            Boundary::Floor => center.y + radius - world.height,
            Boundary::Ceiling => radius - center.y,
            Boundary::LeftWall => radius - center.x,
            Boundary::RightWall => center.x + radius - world.width,
        }
    }

    fn coefficients<F: Float>(self, contact: &ContactConfig<F>) -> (F, F) {
        match self {
            Boundary::Floor | Boundary::Ceiling => (contact.floor_restitution, contact.floor_friction),
            Boundary::LeftWall | Boundary::RightWall => (contact.wall_restitution, contact.wall_friction),
        }
    }
}

/// What one boundary did to the ball this step.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct ContactReport<F: Float> {
    pub boundary: Boundary,
    pub penetration: F,
    pub normal_impulse: F,
    pub tangent_impulse: F,
}

/// Resolve one boundary. Returns `None` when the ball does not touch it.
pub fn resolve_boundary<F: Float>(
    body: &mut Body<F>,
    boundary: Boundary,
    world: &WorldConfig<F>,
    contact: &ContactConfig<F>,
) -> Option<ContactReport<F>> {
    let radius = body.radius();
    let penetration = boundary.penetration(body.position, radius, world);
    if penetration <= F::zero() {
        return None;
    }
    let n: Vec2<F> = boundary.normal();

    let push = (penetration - contact.slop).max(F::zero()) * contact.correction;
    body.position = body.position + n.scale(push);

    let (restitution, friction) = boundary.coefficients(contact);
    let lever = n.scale(-radius);
    let point = body.position + lever;

    let v_n = body.velocity_at(point).dot(n);
    if v_n >= F::zero() {
        return Some(ContactReport {
            boundary,
            penetration,
            normal_impulse: F::zero(),
            tangent_impulse: F::zero(),
        });
    }

    let k_n = body.effective_mass(lever, n);
    let j_n = -(F::one() + restitution) * v_n * k_n;
    body.apply_impulse_at(n.scale(j_n), point);

    let t = n.perp();
    let v_t = body.velocity_at(point).dot(t);
    let k_t = body.effective_mass(lever, t);
    let limit = friction * j_n.abs();
    let j_t = (-v_t * k_t).clamp(-limit, limit);
    body.apply_impulse_at(t.scale(j_t), point);

    Some(ContactReport {
        boundary,
        penetration,
        normal_impulse: j_n,
        tangent_impulse: j_t,
    })
}

/// Resolve all four boundaries independently, in floor, ceiling, left, right order.
pub fn resolve_boundaries<F: Float, O: StepObserver<F>>(
    body: &mut Body<F>,
    world: &WorldConfig<F>,
    contact: &ContactConfig<F>,
    observer: &mut O,
) {
    for boundary in Boundary::ALL {
        if let Some(report) = resolve_boundary(body, boundary, world, contact) {
            if report.normal_impulse > F::zero() {
                observer.on_contact(boundary, report.normal_impulse);
            }
        }
    }
}
