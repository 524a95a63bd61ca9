//! Static scene parameters.
//!
//! Every threshold the simulation uses lives here. The defaults reproduce the
//! hand-tuned look of the header scene; none of them are physical constants.
//!
//! # Builder Pattern
//! ```
//! use gossamer::config::{SceneConfig, RopeConfig};
//!
//! let config: SceneConfig<f32> = SceneConfig::new()
//!     .with_seed(7)
//!     .with_gravity(0.4)
//!     .with_ropes(RopeConfig::new().with_count(4).with_segments(12));
//! assert!(config.validate().is_ok());
//! ```

use crate::error::SceneError;
use crate::float::Float;
use crate::vec::Vec2;

/// Integration and relaxation parameters shared by ropes, web and free bodies.
#[derive(Clone, Debug)]
pub struct PhysicsConfig<F: Float> {
    /// Downward acceleration added every tick. Default: 0.6.
    pub gravity: F,
    /// Fraction of implicit velocity kept each tick, in (0, 1). Default: 0.98.
    pub friction: F,
    /// Constraint passes per tick for each rope. Default: 5.
    pub rope_iterations: usize,
    /// Constraint passes per tick for the web. Default: 6.
    pub web_iterations: usize,
    /// Pressed pointers pull particles within this radius. Default: 50.
    pub attraction_radius: F,
    /// Fraction of the remaining distance pulled per tick. Default: 0.1.
    pub attraction_strength: F,
    /// Velocity kept (reflected) when a particle is clamped onto the
    /// viewport edge. Default: 0 (inelastic).
    pub bounds_restitution: F,
}

impl<F: Float> PhysicsConfig<F> {
    pub fn new() -> Self {
        PhysicsConfig {
            gravity: F::from_f32(0.6),
            friction: F::from_f32(0.98),
            rope_iterations: 5,
            web_iterations: 6,
            attraction_radius: F::from_f32(50.0),
            attraction_strength: F::from_f32(0.1),
            bounds_restitution: F::zero(),
        }
    }

    pub fn with_gravity(mut self, gravity: F) -> Self {
        self.gravity = gravity;
        self
    }

    pub fn with_friction(mut self, friction: F) -> Self {
        self.friction = friction;
        self
    }

    pub fn with_iterations(mut self, rope: usize, web: usize) -> Self {
        self.rope_iterations = rope;
        self.web_iterations = web;
        self
    }
}

impl<F: Float> Default for PhysicsConfig<F> {
    fn default() -> Self {
        Self::new()
    }
}

/// How the scene strings its ropes across the top of the viewport.
#[derive(Clone, Debug)]
pub struct RopeConfig<F: Float> {
    /// Number of ropes. Default: 10.
    pub count: usize,
    /// Segments per rope. Default: 20.
    pub segments: usize,
    /// Smallest slack factor (rope length / endpoint distance). Default: 1.1.
    pub slack_min: F,
    /// Largest slack factor (exclusive). Default: 1.3.
    pub slack_max: F,
    /// Chance that the far end is tied to a side wall instead of the ceiling.
    /// Default: 0.4.
    pub wall_anchor_chance: F,
    /// Wall ties land at a random height below this. Default: 100.
    pub wall_anchor_max_height: F,
}

impl<F: Float> RopeConfig<F> {
    pub fn new() -> Self {
        RopeConfig {
            count: 10,
            segments: 20,
            slack_min: F::from_f32(1.1),
            slack_max: F::from_f32(1.3),
            wall_anchor_chance: F::from_f32(0.4),
            wall_anchor_max_height: F::from_f32(100.0),
        }
    }

    pub fn with_count(mut self, count: usize) -> Self {
        self.count = count;
        self
    }

    pub fn with_segments(mut self, segments: usize) -> Self {
        self.segments = segments;
        self
    }
}

impl<F: Float> Default for RopeConfig<F> {
    fn default() -> Self {
        Self::new()
    }
}

/// Shape of the radial web hung in a corner.
#[derive(Clone, Debug)]
pub struct WebConfig<F: Float> {
    /// Concentric rings around the center. Default: 6.
    pub rings: usize,
    /// Radial strands; every ring has one particle per strand. Default: 12.
    pub strands: usize,
    /// Radius of the outermost ring before skew. Default: 280.
    pub radius: F,
    /// Angle covered by the strands, in radians. Default: 0.6 * pi.
    pub sweep: F,
    /// Radius multiplier of the first (top) strand. Default: 1.3.
    pub skew_first: F,
    /// Radius multiplier of the last (side) strand. Default: 0.6.
    pub skew_last: F,
    /// Outer-ring particles this close to the ceiling or the corner wall are
    /// anchored. Default: 5.
    pub anchor_margin: F,
}

impl<F: Float> WebConfig<F> {
    pub fn new() -> Self {
        WebConfig {
            rings: 6,
            strands: 12,
            radius: F::from_f32(280.0),
            sweep: F::from_f32(0.6) * F::pi(),
            skew_first: F::from_f32(1.3),
            skew_last: F::from_f32(0.6),
            anchor_margin: F::from_f32(5.0),
        }
    }

    pub fn with_rings(mut self, rings: usize) -> Self {
        self.rings = rings;
        self
    }

    pub fn with_strands(mut self, strands: usize) -> Self {
        self.strands = strands;
        self
    }

    pub fn with_radius(mut self, radius: F) -> Self {
        self.radius = radius;
        self
    }
}

impl<F: Float> Default for WebConfig<F> {
    fn default() -> Self {
        Self::new()
    }
}

/// Thresholds driving the spider's navigation and legs.
#[derive(Clone, Debug)]
pub struct SpiderConfig<F: Float> {
    /// Body radius; legs reach `size * leg_reach_factor`. Default: 15.
    pub size: F,
    /// A pressed pointer this close grabs the spider. Default: 40.
    pub grab_radius: F,
    /// On release, rope/web particles this close catch the spider. Default: 60.
    pub snap_radius: F,
    /// A falling or crawling spider latches onto rope particles this close.
    /// Default: 40.
    pub latch_radius: F,
    /// Rope particles of another rope this close form a junction. Default: 30.
    pub junction_radius: F,
    /// Web particles this close end a rope traversal. Default: 50.
    pub web_proximity: F,
    /// Distance under which the spider counts as arrived. Default: 5.
    pub arrival_threshold: F,
    /// Fraction of the remaining distance covered per tick on the web.
    /// Default: 0.0075.
    pub web_ease: F,
    /// Fraction of the remaining distance covered per tick on a rope.
    /// Default: 0.0125.
    pub rope_ease: F,
    /// Where the idle spider sits relative to the web center. Default: (-20, 20).
    pub rest_offset: Vec2<F>,
    /// Ticks between rope-index decisions. Default: 10.
    pub move_delay_frames: u32,
    /// Chance of a random index step on a decision tick. Default: 0.1.
    pub wander_chance: F,
    /// Chance a random step also turns the spider homeward. Default: 0.2.
    pub return_home_chance: F,
    /// Ticks before another junction may be taken. Default: 60.
    pub junction_cooldown: u32,
    /// Ticks of rope immunity after leaving a rope at the ceiling. Default: 120.
    pub ceiling_cooldown: u32,
    /// Body height under which a rope climb may end at the ceiling. Default: 40.
    pub ceiling_zone: F,
    /// A target particle above this height counts as tied to the ceiling.
    /// Default: 15.
    pub ceiling_anchor_height: F,
    /// Distance from an edge at which a loose spider starts crawling. Default: 15.
    pub edge_margin: F,
    /// Crawling spiders are held this far inside the edge. Default: 10.
    pub edge_inset: F,
    /// Crawl speed along the ceiling, towards the web. Default: 5.
    pub ceiling_crawl: F,
    /// Crawl speed along the floor. Default: 2.
    pub floor_crawl: F,
    /// Climb speed up the side walls. Default: 2.
    pub wall_climb: F,
    /// Relative speed wobble while crawling. Default: 0.3.
    pub bob_amplitude: F,
    /// Falling this far below the floor triggers recovery. Default: 200.
    pub fall_limit: F,
    /// Release velocity multiplier for a thrown spider. Default: 2.
    pub release_throw: F,
    /// Vertical gap between cocoons stacked on one web particle. Default: 8.
    pub cocoon_spacing: F,
    /// Leg reach as a multiple of `size`. Default: 3.
    pub leg_reach_factor: F,
    /// Per-tick easing of a planted foot. Default: 0.3.
    pub foot_ease: F,
    /// Per-tick easing of an idle foot. Default: 0.1.
    pub idle_ease: F,
    /// Radius of the idle foot wobble. Default: 10.
    pub idle_radius: F,
    /// Leg phase advance per tick at rest. Default: 0.025.
    pub leg_phase_rate: F,
    /// Leg phase advance per tick while travelling or hunting. Default: 0.06.
    pub leg_phase_rate_active: F,
    /// Phase offset between neighbouring legs. Default: 0.8.
    pub leg_phase_offset: F,
}

impl<F: Float> SpiderConfig<F> {
    pub fn new() -> Self {
        SpiderConfig {
            size: F::from_f32(15.0),
            grab_radius: F::from_f32(40.0),
            snap_radius: F::from_f32(60.0),
            latch_radius: F::from_f32(40.0),
            junction_radius: F::from_f32(30.0),
            web_proximity: F::from_f32(50.0),
            arrival_threshold: F::from_f32(5.0),
            web_ease: F::from_f32(0.0075),
            rope_ease: F::from_f32(0.0125),
            rest_offset: Vec2::new(F::from_f32(-20.0), F::from_f32(20.0)),
            move_delay_frames: 10,
            wander_chance: F::from_f32(0.1),
            return_home_chance: F::from_f32(0.2),
            junction_cooldown: 60,
            ceiling_cooldown: 120,
            ceiling_zone: F::from_f32(40.0),
            ceiling_anchor_height: F::from_f32(15.0),
            edge_margin: F::from_f32(15.0),
            edge_inset: F::from_f32(10.0),
            ceiling_crawl: F::from_f32(5.0),
            floor_crawl: F::from_f32(2.0),
            wall_climb: F::from_f32(2.0),
            bob_amplitude: F::from_f32(0.3),
            fall_limit: F::from_f32(200.0),
            release_throw: F::from_f32(2.0),
            cocoon_spacing: F::from_f32(8.0),
            leg_reach_factor: F::from_f32(3.0),
            foot_ease: F::from_f32(0.3),
            idle_ease: F::from_f32(0.1),
            idle_radius: F::from_f32(10.0),
            leg_phase_rate: F::from_f32(0.025),
            leg_phase_rate_active: F::from_f32(0.06),
            leg_phase_offset: F::from_f32(0.8),
        }
    }

    /// Maximum distance between a foot's ideal point and its anchor.
    pub fn leg_reach(&self) -> F {
        self.size * self.leg_reach_factor
    }

    pub fn with_size(mut self, size: F) -> Self {
        self.size = size;
        self
    }

    pub fn with_junction_cooldown(mut self, ticks: u32) -> Self {
        self.junction_cooldown = ticks;
        self
    }
}

impl<F: Float> Default for SpiderConfig<F> {
    fn default() -> Self {
        Self::new()
    }
}

/// Prey behaviour.
#[derive(Clone, Debug)]
pub struct FlyConfig<F: Float> {
    /// Web particles this close catch a wandering fly. Default: 20.
    pub capture_radius: F,
    /// Slowest horizontal cruising speed. Default: 0.5.
    pub min_speed: F,
    /// Fastest horizontal cruising speed. Default: 2.5.
    pub max_speed: F,
    /// Horizontal velocity jitter per tick (full width). Default: 0.25.
    pub jitter_x: F,
    /// Vertical velocity jitter per tick (full width). Default: 0.5.
    pub jitter_y: F,
    /// Velocity kept per tick after the speed clamp. Default: 0.99.
    pub drag: F,
    /// Wiggle phase advance per tick while caught. Default: 0.25.
    pub wiggle_rate: F,
    /// Radius of the caught wiggle. Default: 1.
    pub wiggle_radius: F,
    /// A fast pointer this close frees a caught fly. Default: 40.
    pub escape_radius: F,
    /// Pointer speed needed to free a caught fly. Default: 10.
    pub escape_speed: F,
    /// Share of the pointer velocity a freed fly inherits. Default: 0.8.
    pub escape_transfer: F,
    /// A fast pointer this close bats a wandering fly. Default: 30.
    pub bat_radius: F,
    /// Pointer speed needed to bat a wandering fly. Default: 15.
    pub bat_speed: F,
    /// Share of the pointer velocity a batted fly inherits. Default: 0.5.
    pub bat_transfer: F,
    /// Horizontal respawn position. Default: 10.
    pub spawn_x: F,
    /// Slowest horizontal respawn speed. Default: 1.
    pub spawn_speed: F,
    /// Random extra horizontal respawn speed. Default: 1.
    pub spawn_speed_spread: F,
    /// Full width of the random vertical respawn speed. Default: 2.
    pub spawn_vertical_spread: F,
}

impl<F: Float> FlyConfig<F> {
    pub fn new() -> Self {
        FlyConfig {
            capture_radius: F::from_f32(20.0),
            min_speed: F::from_f32(0.5),
            max_speed: F::from_f32(2.5),
            jitter_x: F::from_f32(0.25),
            jitter_y: F::from_f32(0.5),
            drag: F::from_f32(0.99),
            wiggle_rate: F::from_f32(0.25),
            wiggle_radius: F::one(),
            escape_radius: F::from_f32(40.0),
            escape_speed: F::from_f32(10.0),
            escape_transfer: F::from_f32(0.8),
            bat_radius: F::from_f32(30.0),
            bat_speed: F::from_f32(15.0),
            bat_transfer: F::from_f32(0.5),
            spawn_x: F::from_f32(10.0),
            spawn_speed: F::one(),
            spawn_speed_spread: F::one(),
            spawn_vertical_spread: F::two(),
        }
    }

    pub fn with_capture_radius(mut self, radius: F) -> Self {
        self.capture_radius = radius;
        self
    }

    pub fn with_speed_band(mut self, min: F, max: F) -> Self {
        self.min_speed = min;
        self.max_speed = max;
        self
    }
}

impl<F: Float> Default for FlyConfig<F> {
    fn default() -> Self {
        Self::new()
    }
}

/// Flicker of the torch that lights the scene.
#[derive(Clone, Debug)]
pub struct TorchConfig<F: Float> {
    /// Default: (40, 40).
    pub position: Vec2<F>,
    /// Phase advance per tick. Default: 0.1.
    pub time_step: F,
    /// Default: 0.9.
    pub base: F,
    /// Amplitude of the slow sine flicker. Default: 0.05.
    pub wave: F,
    /// Amplitude of the random flicker. Default: 0.05.
    pub noise: F,
}

impl<F: Float> TorchConfig<F> {
    pub fn new() -> Self {
        TorchConfig {
            position: Vec2::new(F::from_f32(40.0), F::from_f32(40.0)),
            time_step: F::from_f32(0.1),
            base: F::from_f32(0.9),
            wave: F::from_f32(0.05),
            noise: F::from_f32(0.05),
        }
    }
}

impl<F: Float> Default for TorchConfig<F> {
    fn default() -> Self {
        Self::new()
    }
}

/// Everything needed to build and run a [`Scene`](crate::scene::Scene).
#[derive(Clone, Debug)]
pub struct SceneConfig<F: Float> {
    pub physics: PhysicsConfig<F>,
    pub ropes: RopeConfig<F>,
    pub web: WebConfig<F>,
    pub spider: SpiderConfig<F>,
    pub fly: FlyConfig<F>,
    pub torch: TorchConfig<F>,
    /// Seed for every random decision in the scene. Default: 0x5EED.
    pub seed: u64,
}

impl<F: Float> SceneConfig<F> {
    /// Create a new config with default values.
    pub fn new() -> Self {
        SceneConfig {
            physics: PhysicsConfig::new(),
            ropes: RopeConfig::new(),
            web: WebConfig::new(),
            spider: SpiderConfig::new(),
            fly: FlyConfig::new(),
            torch: TorchConfig::new(),
            seed: 0x5EED,
        }
    }

    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = seed;
        self
    }

    pub fn with_gravity(mut self, gravity: F) -> Self {
        self.physics.gravity = gravity;
        self
    }

    pub fn with_friction(mut self, friction: F) -> Self {
        self.physics.friction = friction;
        self
    }

    pub fn with_physics(mut self, physics: PhysicsConfig<F>) -> Self {
        self.physics = physics;
        self
    }

    pub fn with_ropes(mut self, ropes: RopeConfig<F>) -> Self {
        self.ropes = ropes;
        self
    }

    pub fn with_web(mut self, web: WebConfig<F>) -> Self {
        self.web = web;
        self
    }

    pub fn with_spider(mut self, spider: SpiderConfig<F>) -> Self {
        self.spider = spider;
        self
    }

    pub fn with_fly(mut self, fly: FlyConfig<F>) -> Self {
        self.fly = fly;
        self
    }

    pub fn with_torch(mut self, torch: TorchConfig<F>) -> Self {
        self.torch = torch;
        self
    }

    /// Reject parameters the simulation cannot run with.
    pub fn validate(&self) -> Result<(), SceneError> {
        let physics = &self.physics;
        if !(physics.friction > F::zero() && physics.friction < F::one()) {
            return Err(SceneError::InvalidFriction);
        }
        if physics.rope_iterations == 0 || physics.web_iterations == 0 {
            return Err(SceneError::InvalidIterations);
        }
        if self.ropes.segments == 0 {
            return Err(SceneError::InvalidSegments);
        }
        if self.web.rings == 0 || self.web.strands < 2 {
            return Err(SceneError::InvalidWebDimensions {
                rings: self.web.rings,
                strands: self.web.strands,
            });
        }
        if self.fly.min_speed > self.fly.max_speed {
            return Err(SceneError::InvalidSpeedBand);
        }

        let radii = [
            ("physics.attraction_radius", physics.attraction_radius),
            ("web.radius", self.web.radius),
            ("spider.size", self.spider.size),
            ("spider.grab_radius", self.spider.grab_radius),
            ("spider.snap_radius", self.spider.snap_radius),
            ("spider.latch_radius", self.spider.latch_radius),
            ("spider.junction_radius", self.spider.junction_radius),
            ("spider.web_proximity", self.spider.web_proximity),
            ("spider.arrival_threshold", self.spider.arrival_threshold),
            ("fly.capture_radius", self.fly.capture_radius),
        ];
        for (name, value) in radii {
            if !(value > F::zero()) {
                return Err(SceneError::InvalidRadius { name });
            }
        }
        Ok(())
    }
}

impl<F: Float> Default for SceneConfig<F> {
    fn default() -> Self {
        Self::new()
    }
}
