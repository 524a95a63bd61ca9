use gossamer::{
    Bounds, NoOpObserver, PointerEvent, PointerPhase, Scene, SceneConfig, SpiderMode, Vec2,
};
use wasm_bindgen::prelude::*;

fn flatten(points: impl IntoIterator<Item = Vec2<f32>>) -> Vec<f32> {
    let mut out = Vec::new();
    for p in points {
        out.push(p.x);
        out.push(p.y);
    }
    out
}

// ---- Header Scene ----

#[wasm_bindgen]
pub struct SceneDemo {
    scene: Scene<f32>,
}

impl SceneDemo {
    fn pointer(&mut self, id: u32, x: f32, y: f32, phase: PointerPhase, primary: bool) {
        self.scene.handle_pointer(PointerEvent::new(id, Vec2::new(x, y), phase, primary));
    }
}

#[wasm_bindgen]
impl SceneDemo {
    #[wasm_bindgen(constructor)]
    pub fn new(width: f32, height: f32, seed: u64) -> Result<SceneDemo, JsValue> {
        let config = SceneConfig::new().with_seed(seed);
        let scene = Scene::new(Bounds::new(width, height), config).map_err(|e| JsValue::from_str(&e.to_string()))?;
        Ok(SceneDemo { scene })
    }

    pub fn resize(&mut self, width: f32, height: f32) -> Result<(), JsValue> {
        self.scene
            .resize(Bounds::new(width, height))
            .map_err(|e| JsValue::from_str(&e.to_string()))
    }

    pub fn pointer_down(&mut self, id: u32, x: f32, y: f32, primary: bool) {
        self.pointer(id, x, y, PointerPhase::Down, primary);
    }

    pub fn pointer_move(&mut self, id: u32, x: f32, y: f32, primary: bool) {
        self.pointer(id, x, y, PointerPhase::Move, primary);
    }

    pub fn pointer_up(&mut self, id: u32, x: f32, y: f32, primary: bool) {
        self.pointer(id, x, y, PointerPhase::Up, primary);
    }

    pub fn pointer_cancel(&mut self, id: u32, x: f32, y: f32, primary: bool) {
        self.pointer(id, x, y, PointerPhase::Cancel, primary);
    }

    /// One animation frame.
    pub fn update(&mut self) {
        self.scene.tick(&mut NoOpObserver);
    }

    pub fn rope_count(&self) -> usize {
        self.scene.ropes().len()
    }

    /// Returns flat [x0, y0, x1, y1, ...] for rope at index
    pub fn rope_positions(&self, index: usize) -> Vec<f32> {
        self.scene
            .ropes()
            .get(index)
            .map(|r| flatten(r.positions()))
            .unwrap_or_default()
    }

    /// Returns flat [x0, y0, ...]; index 0 is the web center
    pub fn web_positions(&self) -> Vec<f32> {
        flatten(self.scene.web().positions())
    }

    /// Returns flat [a0, b0, a1, b1, ...] particle index pairs, one per web strand segment
    pub fn web_links(&self) -> Vec<u32> {
        let mut out = Vec::new();
        for c in self.scene.web().constraints() {
            out.push(c.a as u32);
            out.push(c.b as u32);
        }
        out
    }

    /// Returns [x, y, mode, carrying] where mode is 0 grabbed, 1 web, 2 rope, 3 grounded, 4 falling
    pub fn spider(&self) -> Vec<f32> {
        let spider = self.scene.spider();
        let p = spider.position();
        let mode = match spider.mode() {
            SpiderMode::Grabbed => 0.0,
            SpiderMode::AttachedToWeb => 1.0,
            SpiderMode::TraversingRope { .. } => 2.0,
            SpiderMode::Grounded { .. } => 3.0,
            SpiderMode::Falling => 4.0,
        };
        let carrying = if spider.is_carrying() { 1.0 } else { 0.0 };
        vec![p.x, p.y, mode, carrying]
    }

    /// Returns flat [x0, y0, ...] for the eight feet
    pub fn spider_feet(&self) -> Vec<f32> {
        flatten(self.scene.spider().feet().iter().map(|f| f.position))
    }

    /// Returns [x, y, visible, caught]
    pub fn fly(&self) -> Vec<f32> {
        let fly = self.scene.fly();
        let visible = if fly.is_carried() { 0.0 } else { 1.0 };
        let caught = if fly.is_caught() { 1.0 } else { 0.0 };
        vec![fly.position.x, fly.position.y, visible, caught]
    }

    /// Returns flat [x0, y0, rotation0, ...]
    pub fn cocoons(&self) -> Vec<f32> {
        let mut out = Vec::new();
        for c in self.scene.cocoons() {
            let p = self.scene.cocoon_position(c);
            out.extend_from_slice(&[p.x, p.y, c.rotation]);
        }
        out
    }

    /// Returns [x, y, flicker]
    pub fn torch(&self) -> Vec<f32> {
        let t = self.scene.torch();
        vec![t.position.x, t.position.y, t.flicker]
    }

    /// Web center, for renderers that shade the web radially
    pub fn web_center(&self) -> Vec<f32> {
        let c = self.scene.web().center();
        vec![c.x, c.y]
    }
}
