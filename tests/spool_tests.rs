use yarnball::{
    Body, BodyConfig, NoOpStepObserver, PointerEvent, RopeConfig, RopeKind, RopeSolver, SimConfig,
    Simulation, Spool, SpoolConfig, Vec2,
};

fn spinning_ball(spin: f64) -> Body<f64> {
    let mut body = Body::new(Vec2::new(200.0, 200.0), &BodyConfig::new().with_radius(40.0));
    body.spin = spin;
    body
}

fn spool() -> Spool<f64> {
    let config = SpoolConfig::new()
        .with_total_length(900.0)
        .with_core_radius(10.0)
        .with_initial_released(0.0)
        .with_max_feed_rate(240.0);
    Spool::new(&config, 40.0)
}

#[test]
fn fast_spin_feeds_at_max_rate() {
    let body = spinning_ball(100.0);
    let mut spool = spool();
    let dt = 1.0 / 60.0;
    for _ in 0..60 {
        spool.advance(&body, dt);
    }
    assert!(
        (spool.released_length() - 240.0).abs() < 1e-9,
        "released {}",
        spool.released_length()
    );
}

#[test]
fn backward_spin_feeds_just_the_same() {
    let body = spinning_ball(-100.0);
    let mut spool = spool();
    for _ in 0..30 {
        spool.advance(&body, 1.0 / 60.0);
    }
    assert!((spool.released_length() - 120.0).abs() < 1e-9);
}

#[test]
fn feed_stops_at_total_length() {
    let body = spinning_ball(100.0);
    let mut spool = spool();
    for _ in 0..600 {
        spool.advance(&body, 1.0 / 60.0);
    }
    assert_eq!(spool.released_length(), 900.0);
    assert!(spool.is_exhausted());
    assert_eq!(spool.advance(&body, 1.0 / 60.0), 0.0);
    assert!((spool.wound_radius() - 40.0).abs() < 1e-12);
}

#[test]
fn slow_spin_feeds_below_max_rate() {
    let body = spinning_ball(2.0);
    let mut spool = spool();
    let mut last = spool.released_length();
    for _ in 0..120 {
        let fed = spool.advance(&body, 1.0 / 60.0);
        assert!(fed >= 0.0 && fed < 240.0 / 60.0);
        assert!(spool.released_length() >= last);
        last = spool.released_length();
    }
    assert!(last > 0.0);
}

#[test]
fn still_ball_feeds_nothing() {
    let body = spinning_ball(0.0);
    let mut spool = spool();
    assert_eq!(spool.advance(&body, 1.0 / 60.0), 0.0);
    assert_eq!(spool.released_length(), 0.0);
}

#[test]
fn anchor_sits_on_the_wound_radius() {
    let mut body = spinning_ball(0.0);
    body.angle = 1.1;
    let mut spool = spool();
    spool.absorb(450.0);
    let anchor = spool.anchor(&body);
    let r = ((anchor.x - 200.0).powi(2) + (anchor.y - 200.0).powi(2)).sqrt();
    assert!((r - spool.wound_radius()).abs() < 1e-9);
    assert!((spool.wound_radius() - 25.0).abs() < 1e-9);
}

fn batted_sim(kind: RopeKind) -> Simulation<f64> {
    let config = SimConfig::new()
        .with_spool(SpoolConfig::new().with_total_length(400.0))
        .with_rope(RopeConfig::new(kind));
    Simulation::new(config).unwrap()
}

/// Swing the pointer through the ball over and over.
fn bat_around(sim: &mut Simulation<f64>, frames: usize, mut check: impl FnMut(&Simulation<f64>)) {
    for i in 0..frames {
        let t = i as f64 / 60.0;
        let c = sim.body().position;
        let phase = i as f64 * 0.37;
        let x = c.x + 30.0 * phase.cos();
        let y = c.y + 30.0 * phase.sin().abs();
        sim.pointer(PointerEvent::new(x, y, true, t));
        sim.frame(t, &mut NoOpStepObserver);
        check(sim);
    }
}

#[test]
fn released_length_is_monotonic_and_bounded() {
    for kind in [RopeKind::Rod, RopeKind::Wound] {
        let mut sim = batted_sim(kind);
        let mut last = sim.spool().released_length();
        bat_around(&mut sim, 900, |sim| {
            let l = sim.spool().released_length();
            assert!(l >= last, "{:?}: released length shrank from {} to {}", kind, last, l);
            assert!(l <= sim.spool().total_length());
            assert!(sim.rope().released_length() <= l + 1e-9);
            last = l;
        });
        assert!(last > sim.config().spool.initial_released, "{:?}: nothing was fed", kind);
    }
}

#[test]
fn wound_free_count_is_monotonic_and_keeps_one_glued() {
    let mut sim = batted_sim(RopeKind::Wound);
    let mut last = sim.rope().free_count().unwrap();
    let n = sim.rope().len();
    bat_around(&mut sim, 900, |sim| {
        let free = sim.rope().free_count().unwrap();
        assert!(free >= last, "free count dropped from {} to {}", last, free);
        assert!(free <= n - 1);
        last = free;
    });
}
