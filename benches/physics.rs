//! Benchmarks for yarnball physics simulation.

use criterion::{criterion_group, criterion_main, Criterion};
use yarnball::{
    BoundsConstraint, NoOpStepObserver, PointerEvent, RodChain, RopeConfig, RopeContext, RopeKind,
    RopeSolver, SimConfig, Simulation, Vec2, WoundChain,
};

fn context(t: f32, released: f32) -> RopeContext<f32> {
    let body = Vec2::new(400.0 + 150.0 * (t * 3.0).sin(), 300.0);
    let angle = t * 8.0;
    let radial = Vec2::from_angle(angle + 1.57);
    RopeContext {
        body_position: body,
        body_angle: angle,
        anchor: Vec2::new(body.x + radial.x * 40.0, body.y + radial.y * 40.0),
        tangent: radial.perp(),
        released_length: released,
        gravity: Vec2::new(0.0, 1400.0),
    }
}

fn bounds() -> BoundsConstraint<f32> {
    BoundsConstraint::new(Vec2::new(0.0, 0.0), Vec2::new(800.0, 600.0), 0.2)
}

fn bench_rod_rope(c: &mut Criterion) {
    c.bench_function("rod_rope_100_nodes_120_steps", |b| {
        b.iter(|| {
            let config = RopeConfig::new(RopeKind::Rod);
            let mut rope = RodChain::new(&context(0.0, 800.0), &config, bounds());
            for i in 0..120 {
                let t = i as f32 / 120.0;
                rope.advance(1.0 / 120.0, &context(t, 800.0), &mut NoOpStepObserver);
            }
            rope.positions()
        });
    });
}

fn bench_wound_rope(c: &mut Criterion) {
    c.bench_function("wound_rope_900px_120_steps", |b| {
        b.iter(|| {
            let config = RopeConfig::new(RopeKind::Wound);
            let mut rope = WoundChain::new(&context(0.0, 24.0), &config, bounds(), 900.0, 42.0, 12.0, 1.57);
            for i in 0..120 {
                let t = i as f32 / 120.0;
                rope.advance(1.0 / 120.0, &context(t, 24.0 + 240.0 * t), &mut NoOpStepObserver);
            }
            rope.positions()
        });
    });
}

fn bench_full_frame(c: &mut Criterion) {
    for kind in [RopeKind::Rod, RopeKind::Wound] {
        let name = match kind {
            RopeKind::Rod => "simulation_rod_60_frames",
            RopeKind::Wound => "simulation_wound_60_frames",
        };
        c.bench_function(name, |b| {
            b.iter(|| {
                let config = SimConfig::new().with_rope(RopeConfig::new(kind));
                let mut sim: Simulation<f32> = Simulation::new(config).unwrap();
                for i in 0..60 {
                    let t = i as f32 / 60.0;
                    if i % 15 == 0 {
                        let p = sim.body().position;
                        sim.pointer(PointerEvent::new(p.x - 10.0, p.y + 30.0, true, t));
                    }
                    sim.frame(t, &mut NoOpStepObserver);
                }
                sim.render()
            });
        });
    }
}

criterion_group!(benches, bench_rod_rope, bench_wound_rope, bench_full_frame);
criterion_main!(benches);
