use yarnball::collision::resolve_boundary;
use yarnball::{
    Body, BodyConfig, Boundary, ContactConfig, NoOpStepObserver, RopeConfig, RopeKind, SimConfig,
    Simulation, StepConfig, Vec2, WorldConfig,
};

const DT: f64 = 1.0 / 240.0;

fn lossless_body(radius: f64) -> BodyConfig<f64> {
    BodyConfig::new().with_radius(radius).with_damping(1.0, 1.0)
}

/// A ball dropped straight down from rest, with no pointer around.
fn drop_sim(height: f64, restitution: f64) -> Simulation<f64> {
    let world = WorldConfig::new(800.0, 600.0).with_gravity(Vec2::new(0.0, 1000.0));
    let floor = world.height - 20.0;
    let config = SimConfig::new()
        .with_world(world)
        .with_body(lossless_body(20.0).with_spawn(Vec2::new(0.5, (floor - height) / 600.0)))
        .with_contact(ContactConfig::new().with_floor(restitution, 0.6))
        .with_rope(RopeConfig::new(RopeKind::Rod))
        .with_step(StepConfig::new().with_max_step(DT));
    Simulation::new(config).unwrap()
}

#[test]
fn drop_rebounds_to_restitution_squared_height() {
    let h = 400.0;
    let e = 0.5;
    let mut sim = drop_sim(h, e);
    let rest_line = 600.0 - 20.0;

    // Fall until the first bounce turns the ball around.
    let mut steps = 0;
    while sim.body().velocity.y >= 0.0 {
        sim.step(DT, &mut NoOpStepObserver);
        steps += 1;
        assert!(steps < 10_000, "ball never bounced");
    }
    // Rise until the apex.
    let mut apex = sim.body().position.y;
    while sim.body().velocity.y < 0.0 {
        sim.step(DT, &mut NoOpStepObserver);
        apex = apex.min(sim.body().position.y);
    }

    let rebound = rest_line - apex;
    let expected = e * e * h;
    assert!(
        (rebound - expected).abs() < 0.1 * expected,
        "rebound {} expected ~{}",
        rebound,
        expected
    );
    assert!(sim.body().spin.abs() < 1e-12, "head-on drop must not spin, got {}", sim.body().spin);
    assert!(sim.body().velocity.x.abs() < 1e-12);
}

#[test]
fn mechanical_energy_never_grows() {
    let world = WorldConfig::new(800.0, 600.0).with_gravity(Vec2::new(0.0, 1000.0));
    let config = SimConfig::new()
        .with_world(world)
        .with_body(lossless_body(30.0))
        .with_contact(ContactConfig::new().with_floor(0.7, 0.4).with_walls(0.8, 0.3))
        .with_step(StepConfig::new().with_max_step(DT));
    let mut sim: Simulation<f64> = Simulation::new(config).unwrap();
    sim.body_mut().velocity = Vec2::new(650.0, -200.0);
    sim.body_mut().spin = 4.0;

    let g = sim.config().world.gravity;
    // Room for rounding and for positional correction nudging a resting ball.
    let per_step = 1e-2;
    let mut energy = sim.body().mechanical_energy(g);
    let start = energy;
    let mut total_rise = 0.0;
    for i in 0..4000 {
        sim.step(DT, &mut NoOpStepObserver);
        let next = sim.body().mechanical_energy(g);
        assert!(next <= energy + per_step, "step {}: energy rose from {} to {}", i, energy, next);
        total_rise += (next - energy).max(0.0);
        energy = next;
    }
    assert!(total_rise < 5e-2, "energy rose by {} in total", total_rise);
    assert!(energy < start, "contacts should have dissipated energy");
}

#[test]
fn ball_stays_in_the_box() {
    let world = WorldConfig::new(400.0, 300.0).with_gravity(Vec2::new(0.0, 1000.0));
    let config = SimConfig::new()
        .with_world(world.clone())
        .with_body(BodyConfig::new().with_radius(25.0))
        .with_step(StepConfig::new().with_max_step(DT));
    let mut sim: Simulation<f64> = Simulation::new(config).unwrap();
    sim.body_mut().velocity = Vec2::new(-900.0, 700.0);

    let r = sim.body().radius();
    let allowance = 2.0;
    for _ in 0..3000 {
        sim.step(DT, &mut NoOpStepObserver);
        let p = sim.body().position;
        assert!(p.x >= r - allowance && p.x <= world.width - r + allowance, "x escaped: {}", p.x);
        assert!(p.y >= r - allowance && p.y <= world.height - r + allowance, "y escaped: {}", p.y);
    }
}

#[test]
fn correction_leaves_at_most_slop_plus_residual() {
    let world = WorldConfig::new(400.0, 300.0);
    let contact = ContactConfig::new();
    for &pen in &[0.1, 0.5, 3.0, 12.0] {
        let mut body = Body::new(Vec2::new(100.0, 280.0 + pen), &BodyConfig::new().with_radius(20.0));
        body.velocity = Vec2::new(0.0, 50.0);
        resolve_boundary(&mut body, Boundary::Floor, &world, &contact).unwrap();
        let left = Boundary::Floor.penetration(body.position, 20.0, &world);
        let bound = contact.slop + (1.0 - contact.correction) * pen;
        assert!(left <= bound + 1e-9, "penetration {} left {} > {}", pen, left, bound);
    }
}

#[test]
fn glancing_floor_contact_spins_the_ball() {
    let world = WorldConfig::new(800.0, 600.0).with_gravity(Vec2::new(0.0, 1000.0));
    let config = SimConfig::new()
        .with_world(world)
        .with_body(lossless_body(20.0).with_spawn(Vec2::new(0.2, 0.9)))
        .with_step(StepConfig::new().with_max_step(DT));
    let mut sim: Simulation<f64> = Simulation::new(config).unwrap();
    sim.body_mut().velocity = Vec2::new(400.0, 300.0);
    for _ in 0..120 {
        sim.step(DT, &mut NoOpStepObserver);
    }
    // Rolling right along a floor below it: clockwise on screen.
    assert!(sim.body().spin > 0.0, "spin {}", sim.body().spin);
}
