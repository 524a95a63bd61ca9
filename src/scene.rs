//! The whole header scene: ropes, web, spider, fly, cocoons and torch,
//! stepped together once per frame.

use crate::anchor::AnchorSource;
use crate::bounds::Bounds;
use crate::cocoon::{Cocoon, CocoonStack};
use crate::config::SceneConfig;
use crate::error::SceneError;
use crate::float::Float;
use crate::fly::{Fly, FlyEvent};
use crate::observer::TickObserver;
use crate::pointer::{PointerEvent, PointerSet};
use crate::random;
use crate::rope::Rope;
use crate::spider::{Spider, Surroundings};
use crate::torch::Torch;
use crate::vec::Vec2;
use crate::web::Web;
use alloc::vec::Vec as AllocVec;
use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};

/// A complete, deterministic simulation for one viewport.
///
/// Two scenes built from the same viewport and config (including its seed)
/// and fed the same pointer events produce identical states tick for tick.
///
/// # Example
/// ```
/// use gossamer::{Bounds, NoOpObserver, Scene, SceneConfig};
///
/// let mut scene: Scene<f32> = Scene::new(Bounds::new(800.0, 400.0), SceneConfig::new()).unwrap();
/// for _ in 0..60 {
///     scene.tick(&mut NoOpObserver);
/// }
/// assert_eq!(scene.frame(), 60);
/// ```
#[derive(Clone, Debug)]
pub struct Scene<F: Float> {
    viewport: Bounds<F>,
    config: SceneConfig<F>,
    ropes: AllocVec<Rope<F>>,
    web: Web<F>,
    spider: Spider<F>,
    fly: Fly<F>,
    torch: Torch<F>,
    cocoons: CocoonStack<F>,
    pointers: PointerSet<F>,
    rng: SmallRng,
    frame: u64,
}

impl<F: Float> Scene<F> {
    pub fn new(viewport: Bounds<F>, config: SceneConfig<F>) -> Result<Self, SceneError> {
        config.validate()?;
        if !viewport.is_valid() {
            return Err(SceneError::InvalidViewport);
        }

        let mut rng = SmallRng::seed_from_u64(config.seed);
        let corner = Vec2::new(viewport.width, F::zero());
        let web = Web::new(corner, &config.web)?;
        let ropes = Self::hang_ropes(&viewport, &config, web.center().x, &mut rng)?;
        let fly = Fly::spawn(&viewport, &config.fly, &mut rng);

        log::info!(
            "scene built: {}x{} viewport, {} ropes, {} web particles",
            viewport.width.to_f32(),
            viewport.height.to_f32(),
            ropes.len(),
            web.particle_count()
        );

        Ok(Scene {
            viewport,
            ropes,
            spider: Spider::new(corner),
            fly,
            torch: Torch::new(&config.torch),
            web,
            cocoons: CocoonStack::new(),
            pointers: PointerSet::new(),
            rng,
            frame: 0,
            config,
        })
    }

    /// Ropes hang from random ceiling points; some end on a side wall instead.
    fn hang_ropes<R: Rng + ?Sized>(
        viewport: &Bounds<F>,
        config: &SceneConfig<F>,
        home_x: F,
        rng: &mut R,
    ) -> Result<AllocVec<Rope<F>>, SceneError> {
        let ropes = &config.ropes;
        let mut out = AllocVec::with_capacity(ropes.count);
        for _ in 0..ropes.count {
            let start = Vec2::new(random::unit::<F, R>(rng) * viewport.width, F::zero());
            let mut end = Vec2::new(random::unit::<F, R>(rng) * viewport.width, F::zero());

            if random::chance(rng, ropes.wall_anchor_chance) {
                end.x = if rng.gen_bool(0.5) { F::zero() } else { viewport.width };
                end.y = random::unit::<F, R>(rng) * ropes.wall_anchor_max_height;
            }

            let slack = random::between(rng, ropes.slack_min, ropes.slack_max);
            let mut rope = Rope::new(start, end, ropes.segments, start.distance(end) * slack)?;
            rope.set_home_towards(home_x);
            out.push(rope);
        }
        Ok(out)
    }

    /// Rebuild everything for a new viewport. Cocoons are discarded; pointer
    /// state is kept. The random stream continues rather than restarting.
    pub fn resize(&mut self, viewport: Bounds<F>) -> Result<(), SceneError> {
        if !viewport.is_valid() {
            return Err(SceneError::InvalidViewport);
        }
        let corner = Vec2::new(viewport.width, F::zero());
        let web = Web::new(corner, &self.config.web)?;
        let ropes = Self::hang_ropes(&viewport, &self.config, web.center().x, &mut self.rng)?;

        self.fly.reset(&viewport, &self.config.fly, &mut self.rng);
        self.web = web;
        self.ropes = ropes;
        self.spider = Spider::new(corner);
        self.torch = Torch::new(&self.config.torch);
        self.cocoons.clear();
        self.viewport = viewport;
        log::info!("scene resized to {}x{}", viewport.width.to_f32(), viewport.height.to_f32());
        Ok(())
    }

    /// Merge a pointer event. Takes effect on the next tick.
    pub fn handle_pointer(&mut self, event: PointerEvent<F>) {
        self.pointers.apply(event);
    }

    /// Advance one frame.
    pub fn tick<O: TickObserver<F>>(&mut self, observer: &mut O) {
        let input = self.pointers.context();
        let physics = &self.config.physics;

        self.torch.update(&self.config.torch, &mut self.rng);

        self.web.step(physics, &input, &self.viewport, observer);
        for rope in self.ropes.iter_mut() {
            rope.step(physics, &input, &self.viewport, observer);
        }

        match self.fly.update(&self.web, &input, &self.viewport, &self.config.fly, &mut self.rng) {
            Some(FlyEvent::Caught) => {
                log::debug!("fly caught at web particle {:?}", self.fly.caught_anchor());
                observer.on_prey_caught();
            }
            Some(event) => log::trace!("fly {:?}", event),
            None => {}
        }

        let env = Surroundings {
            ropes: &self.ropes,
            web: &self.web,
            bounds: self.viewport,
            input: &input,
            config: &self.config,
        };
        self.spider.update(&env, &mut self.fly, &mut self.cocoons, &mut self.rng, observer);

        self.pointers.settle();
        self.frame += 1;
        observer.on_tick_complete();
    }

    pub fn ropes(&self) -> &[Rope<F>] {
        &self.ropes
    }

    pub fn web(&self) -> &Web<F> {
        &self.web
    }

    pub fn spider(&self) -> &Spider<F> {
        &self.spider
    }

    /// For scripted scenes and tests.
    pub fn spider_mut(&mut self) -> &mut Spider<F> {
        &mut self.spider
    }

    pub fn fly(&self) -> &Fly<F> {
        &self.fly
    }

    /// For scripted scenes and tests.
    pub fn fly_mut(&mut self) -> &mut Fly<F> {
        &mut self.fly
    }

    pub fn cocoons(&self) -> &[Cocoon<F>] {
        self.cocoons.as_slice()
    }

    /// World position of a cocoon: its web particle, stacked downward.
    pub fn cocoon_position(&self, cocoon: &Cocoon<F>) -> Vec2<F> {
        let base = self.web.anchor(cocoon.anchor);
        base + Vec2::new(F::zero(), F::from_usize(cocoon.stack_index) * self.config.spider.cocoon_spacing)
    }

    pub fn torch(&self) -> &Torch<F> {
        &self.torch
    }

    pub fn pointers(&self) -> &PointerSet<F> {
        &self.pointers
    }

    pub fn viewport(&self) -> Bounds<F> {
        self.viewport
    }

    pub fn config(&self) -> &SceneConfig<F> {
        &self.config
    }

    /// Ticks since construction (not reset by `resize`).
    pub fn frame(&self) -> u64 {
        self.frame
    }
}
