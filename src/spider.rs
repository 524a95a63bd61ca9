//! The spider: a creature that lives on the ropes and the web.
//!
//! The spider's body is a single free-standing particle. Its behaviour is a
//! small state machine ([`SpiderMode`]) with two orthogonal errands layered on
//! top: *hunting* a fly stuck in the web and *carrying* one to a deposit point
//! where it becomes a [`Cocoon`](crate::cocoon::Cocoon).
//!
//! | mode            | body motion                      | leaves when                         |
//! |-----------------|----------------------------------|-------------------------------------|
//! | `AttachedToWeb` | eases to center / prey / deposit | grabbed, fell through the floor     |
//! | `TraversingRope`| eases to a particle of one rope  | near the web, reached the ceiling   |
//! | `Grounded`      | crawls along a viewport edge     | a rope or the web comes within reach|
//! | `Falling`       | Verlet under gravity             | near a rope, the web, or an edge    |
//! | `Grabbed`       | pinned to the primary pointer    | pointer released                    |

use crate::anchor::{nearest_among, nearest_among_except, AnchorSource};
use crate::bounds::{Bounds, Edge};
use crate::cocoon::CocoonStack;
use crate::config::SceneConfig;
use crate::fly::Fly;
use crate::float::Float;
use crate::legs::{Foot, Legs, LEG_COUNT};
use crate::observer::TickObserver;
use crate::particle::Particle;
use crate::pointer::InputContext;
use crate::random;
use crate::rope::Rope;
use crate::vec::Vec2;
use crate::web::Web;
use rand::Rng;

/// Where the spider is and what is moving it.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SpiderMode {
    /// Held by the primary pointer.
    Grabbed,
    /// On the web: resting, hunting or hauling prey.
    AttachedToWeb,
    /// Walking rope `rope` towards its particle `index`.
    TraversingRope { rope: usize, index: usize },
    /// Crawling along a viewport edge.
    Grounded { edge: Edge },
    /// Loose body under gravity, after a throw or after leaving a rope.
    Falling,
}

impl SpiderMode {
    /// Same mode, ignoring progress along a rope.
    fn same_place(self, other: SpiderMode) -> bool {
        match (self, other) {
            (SpiderMode::TraversingRope { rope: a, .. }, SpiderMode::TraversingRope { rope: b, .. }) => a == b,
            (a, b) => a == b,
        }
    }

    pub fn is_loose(self) -> bool {
        matches!(self, SpiderMode::Falling | SpiderMode::Grounded { .. })
    }
}

/// Everything the spider looks at during one tick, read-only.
pub struct Surroundings<'a, F: Float> {
    pub ropes: &'a [Rope<F>],
    pub web: &'a Web<F>,
    pub bounds: Bounds<F>,
    pub input: &'a InputContext<F>,
    pub config: &'a SceneConfig<F>,
}

#[derive(Clone, Debug)]
pub struct Spider<F: Float> {
    body: Particle<F>,
    mode: SpiderMode,
    hunting: bool,
    carrying: bool,
    returning_home: bool,
    deposit: Option<usize>,
    last_rope: Option<usize>,
    junction_cooldown: u32,
    move_delay: u32,
    legs: Legs<F>,
}

impl<F: Float> Spider<F> {
    /// A spider resting on the web at `position`.
    pub fn new(position: Vec2<F>) -> Self {
        Spider {
            body: Particle::new(position),
            mode: SpiderMode::AttachedToWeb,
            hunting: false,
            carrying: false,
            returning_home: false,
            deposit: None,
            last_rope: None,
            junction_cooldown: 0,
            move_delay: 0,
            legs: Legs::new(position),
        }
    }

    pub fn position(&self) -> Vec2<F> { self.body.pos }
    pub fn body(&self) -> &Particle<F> { &self.body }
    pub fn mode(&self) -> SpiderMode { self.mode }
    pub fn is_grabbed(&self) -> bool { self.mode == SpiderMode::Grabbed }
    pub fn is_hunting(&self) -> bool { self.hunting }
    pub fn is_carrying(&self) -> bool { self.carrying }
    pub fn is_returning_home(&self) -> bool { self.returning_home }
    /// Web particle the carried prey will be deposited on.
    pub fn deposit_target(&self) -> Option<usize> { self.deposit }
    /// Rope the spider most recently left through a junction or the ceiling.
    pub fn last_rope(&self) -> Option<usize> { self.last_rope }
    pub fn junction_cooldown(&self) -> u32 { self.junction_cooldown }
    pub fn feet(&self) -> &[Foot<F>; LEG_COUNT] { self.legs.feet() }
    pub fn leg_phase(&self) -> F { self.legs.phase() }

    /// Teleport the body, dropping its momentum.
    pub fn place(&mut self, position: Vec2<F>) {
        self.body.place(position);
    }

    /// Put the spider in `mode` directly, bypassing the transition rules.
    /// Observers are not notified. Entering `Grabbed` abandons any errand;
    /// a carried fly is left for the caller to reset.
    pub fn set_mode(&mut self, mode: SpiderMode) {
        if mode == SpiderMode::Grabbed {
            self.drop_errands();
        }
        self.mode = mode;
        self.move_delay = 0;
    }

    fn transition<O: TickObserver<F>>(&mut self, to: SpiderMode, observer: &mut O) {
        let from = self.mode;
        self.mode = to;
        if !from.same_place(to) {
            log::debug!("spider {:?} -> {:?}", from, to);
            observer.on_spider_transition(from, to);
        }
    }

    /// Advance one tick.
    ///
    /// Runs after the ropes and the web have relaxed and after the fly has
    /// moved, so every position read here is final for the tick.
    pub fn update<R: Rng + ?Sized, O: TickObserver<F>>(
        &mut self,
        env: &Surroundings<'_, F>,
        fly: &mut Fly<F>,
        cocoons: &mut CocoonStack<F>,
        rng: &mut R,
        observer: &mut O,
    ) {
        if self.mode == SpiderMode::Grabbed {
            self.hold(env, observer);
        } else if self.try_grab(env, fly, rng, observer) {
            self.hold(env, observer);
        } else {
            self.junction_cooldown = self.junction_cooldown.saturating_sub(1);
            self.hunting = !self.carrying && fly.is_caught();

            match self.mode {
                SpiderMode::AttachedToWeb => self.tend_web(env, fly, cocoons, rng, observer),
                SpiderMode::TraversingRope { rope, index } => self.traverse(rope, index, env, rng, observer),
                SpiderMode::Falling | SpiderMode::Grounded { .. } => self.roam(env, observer),
                SpiderMode::Grabbed => {}
            }
        }

        self.keep_inside(env, observer);

        let active = self.returning_home || self.hunting;
        self.legs.update(self.body.pos, active, env.ropes, env.web, &env.bounds, &env.config.spider);
    }

    fn try_grab<R: Rng + ?Sized, O: TickObserver<F>>(
        &mut self,
        env: &Surroundings<'_, F>,
        fly: &mut Fly<F>,
        rng: &mut R,
        observer: &mut O,
    ) -> bool {
        let primary = &env.input.primary;
        if !primary.pressed || primary.position.distance(self.body.pos) >= env.config.spider.grab_radius {
            return false;
        }

        if self.carrying {
            log::debug!("spider grabbed while carrying; prey dropped");
            fly.reset(&env.bounds, &env.config.fly, rng);
        }
        self.drop_errands();
        self.transition(SpiderMode::Grabbed, observer);
        true
    }

    /// A held spider neither hunts nor carries.
    fn drop_errands(&mut self) {
        self.hunting = false;
        self.carrying = false;
        self.deposit = None;
        self.returning_home = false;
    }

    /// Follow the primary pointer; on release, land on whatever is close.
    fn hold<O: TickObserver<F>>(&mut self, env: &Surroundings<'_, F>, observer: &mut O) {
        let primary = &env.input.primary;
        self.body.place(primary.position);
        if primary.pressed {
            return;
        }

        let config = &env.config.spider;
        if let Some((rope, hit)) = nearest_among(env.ropes, self.body.pos, config.snap_radius) {
            self.returning_home = true;
            self.move_delay = 0;
            self.transition(SpiderMode::TraversingRope { rope, index: hit.index }, observer);
        } else if env.web.any_within(self.body.pos, config.snap_radius) {
            self.transition(SpiderMode::AttachedToWeb, observer);
        } else {
            self.body.set_velocity(primary.velocity.scale(config.release_throw));
            self.transition(SpiderMode::Falling, observer);
        }
    }

    fn tend_web<R: Rng + ?Sized, O: TickObserver<F>>(
        &mut self,
        env: &Surroundings<'_, F>,
        fly: &mut Fly<F>,
        cocoons: &mut CocoonStack<F>,
        rng: &mut R,
        observer: &mut O,
    ) {
        let config = &env.config.spider;
        let destination = match (self.carrying, self.deposit) {
            (true, Some(deposit)) => env.web.anchor(deposit),
            _ if self.hunting => fly.position,
            _ => env.web.center() + config.rest_offset,
        };

        if self.body.pos.distance(destination) > config.arrival_threshold {
            self.body.pos = self.body.pos.lerp(destination, config.web_ease);
        } else {
            self.body.pos = destination;

            if self.hunting && fly.carry() {
                let deposit = Self::choose_deposit(env.web, rng);
                self.hunting = false;
                self.carrying = true;
                self.returning_home = true;
                self.deposit = Some(deposit);
                log::debug!("spider collected prey; depositing at web particle {}", deposit);
                observer.on_prey_collected();
            } else if let (true, Some(deposit)) = (self.carrying, self.deposit) {
                let rotation = random::unit::<F, R>(rng) * F::pi();
                let cocoon = cocoons.spin(deposit, rotation);
                log::debug!("cocoon spun at web particle {} (stack {})", cocoon.anchor, cocoon.stack_index);
                observer.on_cocoon_spun(cocoon);
                self.carrying = false;
                self.returning_home = false;
                self.deposit = None;
                fly.reset(&env.bounds, &env.config.fly, rng);
            }
        }
        self.body.settle();
    }

    /// A random free web particle, or the center if every particle is anchored.
    fn choose_deposit<R: Rng + ?Sized>(web: &Web<F>, rng: &mut R) -> usize {
        let free = web.free_indices().count();
        if free == 0 {
            return Web::<F>::CENTER;
        }
        let pick = rng.gen_range(0..free);
        web.free_indices().nth(pick).unwrap_or(Web::<F>::CENTER)
    }

    fn traverse<R: Rng + ?Sized, O: TickObserver<F>>(
        &mut self,
        rope_idx: usize,
        index: usize,
        env: &Surroundings<'_, F>,
        rng: &mut R,
        observer: &mut O,
    ) {
        let config = &env.config.spider;
        let Some(rope) = env.ropes.get(rope_idx) else {
            self.transition(SpiderMode::Falling, observer);
            return;
        };
        let mut rope_idx = rope_idx;
        let mut index = index.min(rope.len() - 1);

        self.body.pos = self.body.pos.lerp(rope.anchor(index), config.rope_ease);

        self.move_delay += 1;
        if self.move_delay > config.move_delay_frames {
            self.move_delay = 0;
            if self.returning_home {
                index = rope.step_home(index);
            } else if random::chance(rng, config.wander_chance) {
                index = if rng.gen_bool(0.5) {
                    (index + 1).min(rope.len() - 1)
                } else {
                    index.saturating_sub(1)
                };
                if random::chance(rng, config.return_home_chance) {
                    self.returning_home = true;
                }
            }

            if self.junction_cooldown == 0 {
                let current = rope_idx;
                let previous = self.last_rope;
                let junction = nearest_among_except(env.ropes, self.body.pos, config.junction_radius, |r| {
                    r == current || Some(r) == previous
                });
                if let Some((next, hit)) = junction {
                    self.last_rope = Some(current);
                    self.junction_cooldown = config.junction_cooldown;
                    rope_idx = next;
                    index = hit.index;
                }
            }
        }
        self.transition(SpiderMode::TraversingRope { rope: rope_idx, index }, observer);

        if env.web.any_within(self.body.pos, config.web_proximity) {
            self.returning_home = self.carrying;
            self.transition(SpiderMode::AttachedToWeb, observer);
        } else if self.body.pos.y < config.ceiling_zone
            && env.ropes[rope_idx].anchor(index).y < config.ceiling_anchor_height
        {
            self.last_rope = Some(rope_idx);
            self.junction_cooldown = config.ceiling_cooldown;
            self.body.pos.y = config.edge_inset;
            self.transition(SpiderMode::Falling, observer);
        }
        self.body.settle();
    }

    /// Loose body: latch onto a rope or the web if one is close, else fall.
    fn roam<O: TickObserver<F>>(&mut self, env: &Surroundings<'_, F>, observer: &mut O) {
        if self.latch(env, observer) {
            return;
        }
        if self.mode == SpiderMode::Falling {
            self.body.integrate(&env.config.physics, env.input);
        }
    }

    fn latch<O: TickObserver<F>>(&mut self, env: &Surroundings<'_, F>, observer: &mut O) -> bool {
        let config = &env.config.spider;
        let blocked = if self.junction_cooldown > 0 { self.last_rope } else { None };
        if let Some((rope, hit)) =
            nearest_among_except(env.ropes, self.body.pos, config.latch_radius, |r| Some(r) == blocked)
        {
            self.move_delay = 0;
            self.transition(SpiderMode::TraversingRope { rope, index: hit.index }, observer);
            return true;
        }
        if env.web.any_within(self.body.pos, config.web_proximity) {
            self.returning_home = self.carrying;
            self.transition(SpiderMode::AttachedToWeb, observer);
            self.body.settle();
            return true;
        }
        false
    }

    /// Boundary handling shared by every mode: horizontal clamp, edge crawl
    /// for loose bodies, and recovery after falling out of the scene.
    fn keep_inside<O: TickObserver<F>>(&mut self, env: &Surroundings<'_, F>, observer: &mut O) {
        let config = &env.config.spider;
        let bounds = &env.bounds;

        if self.mode != SpiderMode::Grabbed && self.body.pos.y > bounds.height + config.fall_limit {
            log::warn!("spider fell out of the scene; returning it to the web");
            self.body.place(Vec2::new(self.body.pos.x, env.web.center().y));
            self.transition(SpiderMode::AttachedToWeb, observer);
        }

        let x = self.body.pos.x.clamp(F::zero(), bounds.width);
        if x <= F::zero() || x >= bounds.width {
            self.body.pos.x = x;
            self.body.prev_pos.x = x;
        }

        if self.mode.is_loose() {
            if let Some(edge) = bounds.near_edge(self.body.pos, config.edge_margin) {
                self.transition(SpiderMode::Grounded { edge }, observer);
                self.crawl(edge, bounds, env);
                self.latch(env, observer);
            } else if matches!(self.mode, SpiderMode::Grounded { .. }) {
                self.transition(SpiderMode::Falling, observer);
            }
        }
    }

    /// Walk along `edge`, held exactly `edge_inset` inside it.
    fn crawl(&mut self, edge: Edge, bounds: &Bounds<F>, env: &Surroundings<'_, F>) {
        let config = &env.config.spider;
        let bob = F::one() + config.bob_amplitude * self.legs.phase().sin();
        let pos = &mut self.body.pos;
        match edge {
            Edge::Ceiling => {
                pos.y = config.edge_inset;
                pos.x = pos.x + config.ceiling_crawl * bob;
            }
            Edge::Floor => {
                pos.y = bounds.height - config.edge_inset;
                pos.x = pos.x + config.floor_crawl * bob;
            }
            Edge::Right => {
                pos.x = bounds.width - config.edge_inset;
                pos.y = pos.y - config.wall_climb * bob;
            }
            Edge::Left => {
                pos.x = config.edge_inset;
                pos.y = pos.y - config.wall_climb * bob;
            }
        }
        pos.x = pos.x.clamp(F::zero(), bounds.width);
        self.body.settle();
    }
}
