use yarnball::{
    Boundary, PointerEvent, PointerHit, RopeConfig, RopeKind, SimConfig, Simulation, StepObserver,
    WorldConfig,
};
use wasm_bindgen::prelude::*;

/// Counts events during one frame so the page can play sounds.
#[derive(Default)]
struct FrameEvents {
    hits: u32,
    bounces: u32,
}

impl StepObserver<f32> for FrameEvents {
    fn on_hit(&mut self, _hit: &PointerHit<f32>) {
        self.hits += 1;
    }

    fn on_contact(&mut self, _boundary: Boundary, normal_impulse: f32) {
        if normal_impulse > 40.0 {
            self.bounces += 1;
        }
    }
}

/// Host milliseconds to simulation seconds, counted from the first stamp
/// seen. Keeps f32 time precise however long the page has been open.
fn rebase(origin: &mut Option<f64>, time_ms: f64) -> f32 {
    let start = *origin.get_or_insert(time_ms);
    ((time_ms - start) / 1000.0) as f32
}

#[wasm_bindgen]
pub struct YarnDemo {
    sim: Simulation<f32>,
    events: FrameEvents,
    origin: Option<f64>,
}

#[wasm_bindgen]
impl YarnDemo {
    /// `wound` picks the unwinding Verlet rope instead of the rod chain.
    #[wasm_bindgen(constructor)]
    pub fn new(width: f32, height: f32, wound: bool) -> Result<YarnDemo, JsValue> {
        let kind = if wound { RopeKind::Wound } else { RopeKind::Rod };
        let config = SimConfig::new()
            .with_world(WorldConfig::new(width, height))
            .with_rope(RopeConfig::new(kind));
        let sim = Simulation::new(config).map_err(|e| JsValue::from_str(&e.to_string()))?;
        Ok(YarnDemo { sim, events: FrameEvents::default(), origin: None })
    }

    /// Pointer sample in canvas pixels; `time_ms` from `performance.now()`.
    pub fn pointer(&mut self, x: f32, y: f32, down: bool, time_ms: f64) {
        let t = rebase(&mut self.origin, time_ms);
        self.sim.pointer(PointerEvent::new(x, y, down, t));
    }

    pub fn pointer_leave(&mut self) {
        self.sim.pointer_leave();
    }

    /// Advance to `time_ms`. Returns the simulated step in seconds.
    pub fn frame(&mut self, time_ms: f64) -> f32 {
        self.events = FrameEvents::default();
        let t = rebase(&mut self.origin, time_ms);
        self.sim.frame(t, &mut self.events)
    }

    /// Returns [x, y, angle, radius, anchor_x, anchor_y]
    pub fn body_pose(&self) -> Vec<f32> {
        let frame = self.sim.render();
        vec![
            frame.body_position.x,
            frame.body_position.y,
            frame.body_angle,
            frame.body_radius,
            frame.anchor.x,
            frame.anchor.y,
        ]
    }

    /// Returns flat [x0, y0, x1, y1, ...] rope positions
    pub fn rope_positions(&self) -> Vec<f32> {
        let rope = self.sim.render().rope;
        let mut out = Vec::with_capacity(rope.len() * 2);
        for p in &rope {
            out.push(p.x);
            out.push(p.y);
        }
        out
    }

    /// Free particles at the front of the rope; -1 for the rod chain.
    pub fn free_count(&self) -> i32 {
        self.sim.rope().free_count().map_or(-1, |n| n as i32)
    }

    pub fn released_length(&self) -> f32 {
        self.sim.spool().released_length()
    }

    pub fn total_length(&self) -> f32 {
        self.sim.spool().total_length()
    }

    pub fn hits_this_frame(&self) -> u32 {
        self.events.hits
    }

    pub fn bounces_this_frame(&self) -> u32 {
        self.events.bounces
    }
}
