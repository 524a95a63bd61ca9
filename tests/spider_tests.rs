use gossamer::{
    AnchorSource, Bounds, Cocoon, CocoonStack, Edge, Fly, InputContext, PointerEvent, PointerPhase, PointerSet,
    Rope, SceneConfig, Spider, SpiderMode, Surroundings, TickObserver, Vec2, Web, WebConfig,
};
use rand::rngs::SmallRng;
use rand::SeedableRng;

#[derive(Default)]
struct Recorder {
    transitions: Vec<(SpiderMode, SpiderMode)>,
    collected: usize,
    spun: Vec<Cocoon<f32>>,
}

impl TickObserver<f32> for Recorder {
    fn on_spider_transition(&mut self, from: SpiderMode, to: SpiderMode) {
        self.transitions.push((from, to));
    }

    fn on_prey_collected(&mut self) {
        self.collected += 1;
    }

    fn on_cocoon_spun(&mut self, cocoon: &Cocoon<f32>) {
        self.spun.push(cocoon.clone());
    }
}

/// Static surroundings: nothing but the spider moves unless a test moves it.
struct World {
    ropes: Vec<Rope<f32>>,
    web: Web<f32>,
    bounds: Bounds<f32>,
    config: SceneConfig<f32>,
    fly: Fly<f32>,
    cocoons: CocoonStack<f32>,
    rng: SmallRng,
}

impl World {
    fn new(ropes: Vec<Rope<f32>>, web: Web<f32>) -> Self {
        let bounds = Bounds::new(400.0, 400.0);
        let config = SceneConfig::new();
        let mut rng = SmallRng::seed_from_u64(42);
        let fly = Fly::spawn(&bounds, &config.fly, &mut rng);
        World { ropes, web, bounds, config, fly, cocoons: CocoonStack::new(), rng }
    }

    fn step(&mut self, spider: &mut Spider<f32>, input: &InputContext<f32>, observer: &mut Recorder) {
        let env = Surroundings {
            ropes: &self.ropes,
            web: &self.web,
            bounds: self.bounds,
            input,
            config: &self.config,
        };
        spider.update(&env, &mut self.fly, &mut self.cocoons, &mut self.rng, observer);
    }
}

fn far_web() -> Web<f32> {
    Web::new(Vec2::new(5000.0, 0.0), &WebConfig::new()).unwrap()
}

/// Horizontal rope A crossed by vertical rope B at (200, 100).
fn crossing_ropes() -> Vec<Rope<f32>> {
    vec![
        Rope::new(Vec2::new(0.0, 100.0), Vec2::new(400.0, 100.0), 20, 400.0).unwrap(),
        Rope::new(Vec2::new(200.0, 60.0), Vec2::new(200.0, 300.0), 20, 240.0).unwrap(),
    ]
}

fn rope_of(mode: SpiderMode) -> Option<usize> {
    match mode {
        SpiderMode::TraversingRope { rope, .. } => Some(rope),
        _ => None,
    }
}

#[test]
fn new_spider_rests_on_web() {
    let spider: Spider<f32> = Spider::new(Vec2::new(400.0, 0.0));
    assert_eq!(spider.mode(), SpiderMode::AttachedToWeb);
    assert!(!spider.is_hunting());
    assert!(!spider.is_carrying());
    assert_eq!(spider.feet().len(), 8);
}

#[test]
fn junction_switch_does_not_oscillate() {
    let mut world = World::new(crossing_ropes(), far_web());
    let mut spider = Spider::new(Vec2::new(200.0, 100.0));
    spider.set_mode(SpiderMode::TraversingRope { rope: 0, index: 10 });
    let mut rec = Recorder::default();
    let input = InputContext::idle();

    let mut history = Vec::new();
    for _ in 0..600 {
        world.step(&mut spider, &input, &mut rec);
        history.push(rope_of(spider.mode()));
    }

    let switched = history.iter().position(|r| *r == Some(1)).expect("spider should take the junction");
    assert!(
        history[switched..].iter().all(|r| *r == Some(1)),
        "spider went back to the rope it came from"
    );
    assert_eq!(spider.last_rope(), Some(0));
    let switches = rec
        .transitions
        .iter()
        .filter(|(from, to)| rope_of(*from).is_some() && rope_of(*to).is_some())
        .count();
    assert_eq!(switches, 1);
}

#[test]
fn junction_cooldown_counts_down() {
    let mut world = World::new(crossing_ropes(), far_web());
    let mut spider = Spider::new(Vec2::new(200.0, 100.0));
    spider.set_mode(SpiderMode::TraversingRope { rope: 0, index: 10 });
    let mut rec = Recorder::default();
    let input = InputContext::idle();

    while rope_of(spider.mode()) != Some(1) {
        world.step(&mut spider, &input, &mut rec);
    }
    assert_eq!(spider.junction_cooldown(), 60);
    for _ in 0..10 {
        world.step(&mut spider, &input, &mut rec);
    }
    assert_eq!(spider.junction_cooldown(), 50);
}

#[test]
fn capture_and_deposit_cycle() {
    let web = Web::new(Vec2::new(400.0, 0.0), &WebConfig::new()).unwrap();
    let mut world = World::new(Vec::new(), web);
    let prey_anchor = world.web.index(3, 5);
    world.fly.snare(prey_anchor, &world.web);

    let mut spider = Spider::new(world.fly.position);
    let mut rec = Recorder::default();
    let input = InputContext::idle();

    // Already on top of the prey: picked up this tick.
    world.step(&mut spider, &input, &mut rec);
    assert!(world.fly.is_carried());
    assert!(!world.fly.is_caught());
    assert!(spider.is_carrying());
    assert!(!spider.is_hunting());
    assert!(spider.is_returning_home());
    assert_eq!(rec.collected, 1);
    let deposit = spider.deposit_target().expect("deposit target chosen");
    assert!(!world.web.particle(deposit).anchored);

    spider.place(world.web.anchor(deposit));
    world.step(&mut spider, &input, &mut rec);

    assert_eq!(world.cocoons.len(), 1);
    let cocoon = &world.cocoons.as_slice()[0];
    assert_eq!(cocoon.anchor, deposit);
    assert_eq!(cocoon.stack_index, 0);
    assert!(cocoon.rotation >= 0.0 && cocoon.rotation < std::f32::consts::PI);
    assert_eq!(rec.spun.len(), 1);

    assert!(!spider.is_carrying());
    assert_eq!(spider.deposit_target(), None);
    assert!(!world.fly.is_carried());
    assert!(!world.fly.is_caught());
    assert_eq!(world.fly.position.x, 10.0);
}

#[test]
fn spider_walks_to_prey_and_back() {
    let web = Web::new(Vec2::new(400.0, 0.0), &WebConfig::new()).unwrap();
    let mut world = World::new(Vec::new(), web);
    let prey_anchor = world.web.index(4, 6);
    world.fly.snare(prey_anchor, &world.web);

    let mut spider = Spider::new(world.web.center());
    let mut rec = Recorder::default();
    let input = InputContext::idle();

    world.step(&mut spider, &input, &mut rec);
    assert!(spider.is_hunting());

    for _ in 0..5000 {
        world.step(&mut spider, &input, &mut rec);
        if !world.cocoons.is_empty() {
            break;
        }
    }
    assert_eq!(world.cocoons.len(), 1, "spider should finish one full cycle");
    assert_eq!(spider.mode(), SpiderMode::AttachedToWeb);
}

#[test]
fn grab_then_release_snaps_to_rope() {
    let mut world = World::new(crossing_ropes(), far_web());
    let mut spider = Spider::new(Vec2::new(100.0, 100.0));
    let mut rec = Recorder::default();
    let mut pointers = PointerSet::new();

    pointers.apply(PointerEvent::new(1, Vec2::new(105.0, 100.0), PointerPhase::Down, true));
    world.step(&mut spider, &pointers.context(), &mut rec);
    assert_eq!(spider.mode(), SpiderMode::Grabbed);
    assert_eq!(spider.position(), Vec2::new(105.0, 100.0));
    pointers.settle();

    pointers.apply(PointerEvent::new(1, Vec2::new(110.0, 130.0), PointerPhase::Move, true));
    world.step(&mut spider, &pointers.context(), &mut rec);
    assert_eq!(spider.mode(), SpiderMode::Grabbed);
    assert_eq!(spider.position(), Vec2::new(110.0, 130.0));
    pointers.settle();

    pointers.apply(PointerEvent::new(1, Vec2::new(110.0, 130.0), PointerPhase::Up, true));
    world.step(&mut spider, &pointers.context(), &mut rec);
    assert_eq!(rope_of(spider.mode()), Some(0));
    assert!(spider.is_returning_home());
}

#[test]
fn release_in_open_air_throws_spider() {
    let mut world = World::new(Vec::new(), far_web());
    let mut spider = Spider::new(Vec2::new(200.0, 200.0));
    let mut rec = Recorder::default();
    let mut pointers = PointerSet::new();

    pointers.apply(PointerEvent::new(1, Vec2::new(200.0, 200.0), PointerPhase::Down, true));
    world.step(&mut spider, &pointers.context(), &mut rec);
    pointers.settle();

    pointers.apply(PointerEvent::new(1, Vec2::new(210.0, 195.0), PointerPhase::Move, true));
    world.step(&mut spider, &pointers.context(), &mut rec);
    pointers.settle();

    pointers.apply(PointerEvent::new(1, Vec2::new(210.0, 195.0), PointerPhase::Up, true));
    world.step(&mut spider, &pointers.context(), &mut rec);

    assert_eq!(spider.mode(), SpiderMode::Falling);
    assert_eq!(spider.body().velocity(), Vec2::new(20.0, -10.0));
}

#[test]
fn grabbing_a_carrying_spider_drops_the_prey() {
    let web = Web::new(Vec2::new(400.0, 0.0), &WebConfig::new()).unwrap();
    let mut world = World::new(Vec::new(), web);
    world.fly.snare(world.web.index(3, 5), &world.web);
    let mut spider = Spider::new(world.fly.position);
    let mut rec = Recorder::default();

    world.step(&mut spider, &InputContext::idle(), &mut rec);
    assert!(spider.is_carrying());

    let mut pointers = PointerSet::new();
    pointers.apply(PointerEvent::new(1, spider.position(), PointerPhase::Down, true));
    world.step(&mut spider, &pointers.context(), &mut rec);

    assert_eq!(spider.mode(), SpiderMode::Grabbed);
    assert!(!spider.is_carrying());
    assert!(!spider.is_hunting());
    assert!(!world.fly.is_carried());
    assert!(world.cocoons.is_empty());
}

#[test]
fn falling_spider_latches_onto_rope() {
    let mut world = World::new(crossing_ropes(), far_web());
    let mut spider = Spider::new(Vec2::new(300.0, 70.0));
    spider.set_mode(SpiderMode::Falling);
    let mut rec = Recorder::default();

    world.step(&mut spider, &InputContext::idle(), &mut rec);
    assert_eq!(spider.mode(), SpiderMode::TraversingRope { rope: 0, index: 15 });
}

#[test]
fn loose_spider_crawls_along_ceiling() {
    let mut world = World::new(Vec::new(), far_web());
    let mut spider = Spider::new(Vec2::new(100.0, 5.0));
    spider.set_mode(SpiderMode::Falling);
    let mut rec = Recorder::default();

    world.step(&mut spider, &InputContext::idle(), &mut rec);
    assert_eq!(spider.mode(), SpiderMode::Grounded { edge: Edge::Ceiling });
    assert_eq!(spider.position().y, 10.0);
    assert!(spider.position().x > 100.0);

    let x = spider.position().x;
    world.step(&mut spider, &InputContext::idle(), &mut rec);
    assert!(spider.position().x > x, "ceiling crawl heads towards the web corner");
}

#[test]
fn spider_below_the_floor_returns_to_web() {
    let mut world = World::new(Vec::new(), far_web());
    let mut spider = Spider::new(Vec2::new(100.0, 900.0));
    spider.set_mode(SpiderMode::Falling);
    let mut rec = Recorder::default();

    world.step(&mut spider, &InputContext::idle(), &mut rec);
    assert_eq!(spider.mode(), SpiderMode::AttachedToWeb);
    assert_eq!(spider.position().y, world.web.center().y);
}

#[test]
fn rope_walk_ends_at_the_web() {
    let web = Web::new(Vec2::new(300.0, 60.0), &WebConfig::new().with_rings(2).with_strands(4).with_radius(40.0))
        .unwrap();
    let mut world = World::new(crossing_ropes(), web);
    let mut spider = Spider::new(Vec2::new(300.0, 100.0));
    spider.set_mode(SpiderMode::TraversingRope { rope: 0, index: 15 });
    let mut rec = Recorder::default();

    world.step(&mut spider, &InputContext::idle(), &mut rec);
    assert_eq!(spider.mode(), SpiderMode::AttachedToWeb);
    assert_eq!(rec.transitions.len(), 1);
}

#[test]
fn feet_stay_near_body() {
    let mut world = World::new(crossing_ropes(), far_web());
    let mut spider = Spider::new(Vec2::new(200.0, 100.0));
    spider.set_mode(SpiderMode::TraversingRope { rope: 0, index: 10 });
    let mut rec = Recorder::default();

    for _ in 0..120 {
        world.step(&mut spider, &InputContext::idle(), &mut rec);
    }
    let body = spider.position();
    for foot in spider.feet() {
        assert!(foot.position.is_finite());
        assert!(foot.position.distance(body) < 100.0);
    }
}

/// A single rope hanging straight down from the ceiling at x = 100.
fn ceiling_rope() -> Vec<Rope<f32>> {
    vec![Rope::new(Vec2::new(100.0, 0.0), Vec2::new(100.0, 300.0), 20, 300.0).unwrap()]
}

#[test]
fn climbing_to_the_ceiling_drops_the_rope() {
    let mut world = World::new(ceiling_rope(), far_web());
    let mut spider = Spider::new(Vec2::new(100.0, 5.0));
    spider.set_mode(SpiderMode::TraversingRope { rope: 0, index: 0 });
    let mut rec = Recorder::default();

    world.step(&mut spider, &InputContext::idle(), &mut rec);

    assert_eq!(spider.mode(), SpiderMode::Grounded { edge: Edge::Ceiling });
    assert_eq!(spider.last_rope(), Some(0));
    assert_eq!(spider.junction_cooldown(), 120);
    assert_eq!(spider.position().y, 10.0);
    assert_eq!(
        rec.transitions,
        vec![
            (SpiderMode::TraversingRope { rope: 0, index: 0 }, SpiderMode::Falling),
            (SpiderMode::Falling, SpiderMode::Grounded { edge: Edge::Ceiling }),
        ]
    );
}

#[test]
fn left_rope_is_ignored_until_cooldown_expires() {
    let mut world = World::new(ceiling_rope(), far_web());
    world.config.spider.ceiling_crawl = 0.0;
    let mut spider = Spider::new(Vec2::new(100.0, 5.0));
    spider.set_mode(SpiderMode::TraversingRope { rope: 0, index: 0 });
    let mut rec = Recorder::default();
    let input = InputContext::idle();

    world.step(&mut spider, &input, &mut rec);
    assert_eq!(spider.junction_cooldown(), 120);

    // The rope stays within latch reach the whole time.
    for _ in 0..119 {
        world.step(&mut spider, &input, &mut rec);
        assert_eq!(spider.mode(), SpiderMode::Grounded { edge: Edge::Ceiling });
        assert!(world.ropes[0].any_within(spider.position(), 40.0));
    }
    assert_eq!(spider.junction_cooldown(), 1);

    world.step(&mut spider, &input, &mut rec);
    assert_eq!(rope_of(spider.mode()), Some(0));
}

#[test]
fn release_over_the_web_attaches_to_it() {
    let web = Web::new(Vec2::new(400.0, 0.0), &WebConfig::new()).unwrap();
    let mut world = World::new(Vec::new(), web);
    let at = world.web.anchor(world.web.index(2, 3));
    let mut spider = Spider::new(at);
    let mut rec = Recorder::default();
    let mut pointers = PointerSet::new();

    pointers.apply(PointerEvent::new(1, at, PointerPhase::Down, true));
    world.step(&mut spider, &pointers.context(), &mut rec);
    assert_eq!(spider.mode(), SpiderMode::Grabbed);
    pointers.settle();

    pointers.apply(PointerEvent::new(1, at, PointerPhase::Up, true));
    world.step(&mut spider, &pointers.context(), &mut rec);

    assert_eq!(spider.mode(), SpiderMode::AttachedToWeb);
    assert!(!spider.is_returning_home());
    assert_eq!(
        rec.transitions,
        vec![
            (SpiderMode::AttachedToWeb, SpiderMode::Grabbed),
            (SpiderMode::Grabbed, SpiderMode::AttachedToWeb),
        ]
    );
}

#[test]
fn floor_crawl_heads_right() {
    let mut world = World::new(Vec::new(), far_web());
    let mut spider = Spider::new(Vec2::new(100.0, 390.0));
    spider.set_mode(SpiderMode::Falling);
    let mut rec = Recorder::default();

    world.step(&mut spider, &InputContext::idle(), &mut rec);
    assert_eq!(spider.mode(), SpiderMode::Grounded { edge: Edge::Floor });
    assert_eq!(spider.position().y, 390.0);
    assert!(spider.position().x > 100.0);

    let x = spider.position().x;
    world.step(&mut spider, &InputContext::idle(), &mut rec);
    assert!(spider.position().x > x);
}

#[test]
fn walls_are_climbed_upward() {
    for (start, edge, inset_x) in [
        (Vec2::new(395.0, 200.0), Edge::Right, 390.0),
        (Vec2::new(5.0, 200.0), Edge::Left, 10.0),
    ] {
        let mut world = World::new(Vec::new(), far_web());
        let mut spider = Spider::new(start);
        spider.set_mode(SpiderMode::Falling);
        let mut rec = Recorder::default();

        world.step(&mut spider, &InputContext::idle(), &mut rec);
        assert_eq!(spider.mode(), SpiderMode::Grounded { edge });
        assert_eq!(spider.position().x, inset_x);
        assert!(spider.position().y < 200.0, "{:?} wall should be climbed", edge);
    }
}

#[test]
fn forced_grab_abandons_errands() {
    let web = Web::new(Vec2::new(400.0, 0.0), &WebConfig::new()).unwrap();
    let mut world = World::new(Vec::new(), web);
    world.fly.snare(world.web.index(3, 5), &world.web);
    let mut spider = Spider::new(world.fly.position);
    let mut rec = Recorder::default();

    world.step(&mut spider, &InputContext::idle(), &mut rec);
    assert!(spider.is_carrying());
    assert!(spider.deposit_target().is_some());

    spider.set_mode(SpiderMode::Grabbed);
    assert!(spider.is_grabbed());
    assert!(!spider.is_carrying());
    assert!(!spider.is_hunting());
    assert!(!spider.is_returning_home());
    assert_eq!(spider.deposit_target(), None);
}
