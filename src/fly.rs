//! The prey: wanders the viewport until the web catches it.

use crate::anchor::AnchorSource;
use crate::bounds::Bounds;
use crate::config::FlyConfig;
use crate::float::Float;
use crate::pointer::InputContext;
use crate::random;
use crate::vec::Vec2;
use crate::web::Web;
use rand::Rng;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum FlyState {
    Wandering,
    /// Stuck to the web particle at `anchor`.
    Caught { anchor: usize },
    /// Held by the spider; not updated and not drawn.
    Carried,
}

/// Something noteworthy that happened to the fly during one update.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum FlyEvent {
    /// The web caught it.
    Caught,
    /// A fast pointer knocked it off the web.
    Escaped,
    /// A fast pointer knocked it off course.
    Batted,
}

#[derive(Clone, Debug, PartialEq)]
pub struct Fly<F: Float> {
    pub position: Vec2<F>,
    pub velocity: Vec2<F>,
    state: FlyState,
    wiggle: F,
}

impl<F: Float> Fly<F> {
    pub fn spawn<R: Rng + ?Sized>(bounds: &Bounds<F>, config: &FlyConfig<F>, rng: &mut R) -> Self {
        let mut fly = Fly {
            position: Vec2::zero(),
            velocity: Vec2::zero(),
            state: FlyState::Wandering,
            wiggle: F::zero(),
        };
        fly.reset(bounds, config, rng);
        fly
    }

    /// Back to the left edge at a random height, wandering rightward.
    pub fn reset<R: Rng + ?Sized>(&mut self, bounds: &Bounds<F>, config: &FlyConfig<F>, rng: &mut R) {
        self.position = Vec2::new(config.spawn_x, random::unit::<F, R>(rng) * bounds.height);
        self.velocity = Vec2::new(
            config.spawn_speed + random::unit::<F, R>(rng) * config.spawn_speed_spread,
            random::centered(rng, config.spawn_vertical_spread),
        );
        self.state = FlyState::Wandering;
        self.wiggle = F::zero();
    }

    pub fn state(&self) -> FlyState {
        self.state
    }

    pub fn is_caught(&self) -> bool {
        matches!(self.state, FlyState::Caught { .. })
    }

    pub fn is_carried(&self) -> bool {
        self.state == FlyState::Carried
    }

    /// Web particle the fly is stuck to, if caught.
    pub fn caught_anchor(&self) -> Option<usize> {
        match self.state {
            FlyState::Caught { anchor } => Some(anchor),
            _ => None,
        }
    }

    /// Stick the fly to web particle `anchor` regardless of where it is.
    pub fn snare(&mut self, anchor: usize, web: &Web<F>) {
        self.position = web.anchor(anchor);
        self.velocity = Vec2::zero();
        self.wiggle = F::zero();
        self.state = FlyState::Caught { anchor };
    }

    /// Hand a caught fly to the spider. Returns false if it was not caught.
    pub fn carry(&mut self) -> bool {
        if !self.is_caught() {
            return false;
        }
        self.state = FlyState::Carried;
        self.velocity = Vec2::zero();
        true
    }

    pub fn update<R: Rng + ?Sized>(
        &mut self,
        web: &Web<F>,
        input: &InputContext<F>,
        bounds: &Bounds<F>,
        config: &FlyConfig<F>,
        rng: &mut R,
    ) -> Option<FlyEvent> {
        match self.state {
            FlyState::Carried => None,
            FlyState::Caught { anchor } => self.struggle(anchor, web, input, config),
            FlyState::Wandering => self.wander(web, input, bounds, config, rng),
        }
    }

    fn struggle(
        &mut self,
        anchor: usize,
        web: &Web<F>,
        input: &InputContext<F>,
        config: &FlyConfig<F>,
    ) -> Option<FlyEvent> {
        self.wiggle = self.wiggle + config.wiggle_rate;
        let orbit = Vec2::new(self.wiggle.sin(), self.wiggle.cos()).scale(config.wiggle_radius);
        self.position = web.anchor(anchor) + orbit;

        let swipe = input.swipe_near(self.position, config.escape_radius, config.escape_speed)?;
        self.velocity = swipe.velocity.scale(config.escape_transfer);
        self.state = FlyState::Wandering;
        Some(FlyEvent::Escaped)
    }

    fn wander<R: Rng + ?Sized>(
        &mut self,
        web: &Web<F>,
        input: &InputContext<F>,
        bounds: &Bounds<F>,
        config: &FlyConfig<F>,
        rng: &mut R,
    ) -> Option<FlyEvent> {
        let mut event = None;
        if let Some(swipe) = input.swipe_near(self.position, config.bat_radius, config.bat_speed) {
            self.velocity = swipe.velocity.scale(config.bat_transfer);
            event = Some(FlyEvent::Batted);
        }

        self.position += self.velocity;
        self.velocity.y = self.velocity.y + random::centered(rng, config.jitter_y);
        self.velocity.x = self.velocity.x + random::centered(rng, config.jitter_x);

        let sign = self.velocity.x.sign_or_positive();
        let speed = self.velocity.x.abs().clamp(config.min_speed, config.max_speed);
        self.velocity.x = speed * sign;
        self.velocity = self.velocity.scale(config.drag);

        if let Some(hit) = web.nearest_within(self.position, config.capture_radius) {
            self.state = FlyState::Caught { anchor: hit.index };
            self.velocity = Vec2::zero();
            event = Some(FlyEvent::Caught);
        }

        self.reflect(bounds);
        event
    }

    /// Clamp onto the viewport; velocity pointing outward is zeroed.
    fn reflect(&mut self, bounds: &Bounds<F>) {
        if self.position.x < F::zero() {
            self.position.x = F::zero();
            self.velocity.x = self.velocity.x.max(F::zero());
        } else if self.position.x > bounds.width {
            self.position.x = bounds.width;
            self.velocity.x = self.velocity.x.min(F::zero());
        }

        if self.position.y < F::zero() {
            self.position.y = F::zero();
            self.velocity.y = self.velocity.y.max(F::zero());
        } else if self.position.y > bounds.height {
            self.position.y = bounds.height;
            self.velocity.y = self.velocity.y.min(F::zero());
        }
    }
}
