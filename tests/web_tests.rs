use gossamer::{AnchorSource, Bounds, InputContext, NoOpObserver, PhysicsConfig, SceneError, Vec2, Web, WebConfig};

#[test]
fn default_web_dimensions() {
    let web: Web<f32> = Web::new(Vec2::new(800.0, 0.0), &WebConfig::new()).unwrap();
    assert_eq!(web.particle_count(), 1 + 6 * 12);
    // Radial 6 * 12, circumferential 6 * 11.
    assert_eq!(web.constraint_count(), 72 + 66);
    assert_eq!(web.center(), Vec2::new(800.0, 0.0));
    assert!(web.particle(Web::<f32>::CENTER).anchored);
}

#[test]
fn rejects_degenerate_dimensions() {
    let err = Web::<f32>::new(Vec2::new(0.0, 0.0), &WebConfig::new().with_strands(1)).unwrap_err();
    assert_eq!(err, SceneError::InvalidWebDimensions { rings: 6, strands: 1 });
    assert!(Web::<f32>::new(Vec2::new(0.0, 0.0), &WebConfig::new().with_rings(0)).is_err());
}

#[test]
fn web_hangs_below_its_center() {
    let web: Web<f32> = Web::new(Vec2::new(800.0, 0.0), &WebConfig::new()).unwrap();
    for p in web.particles() {
        assert!(p.pos.y >= -1e-3);
    }
    // The first strand runs straight left along the ceiling.
    let top = web.particle(web.index(1, 0)).pos;
    assert!(top.x < 800.0);
    assert!(top.y.abs() < 1e-3);
}

#[test]
fn outer_ring_ends_are_anchored() {
    let config = WebConfig::new();
    let web: Web<f32> = Web::new(Vec2::new(800.0, 0.0), &config).unwrap();
    assert!(web.particle(web.index(config.rings, 0)).anchored);
    assert!(web.particle(web.index(config.rings, config.strands - 1)).anchored);
    assert!(!web.particle(web.index(1, 5)).anchored);
}

#[test]
fn free_indices_skip_anchors() {
    let web: Web<f32> = Web::new(Vec2::new(800.0, 0.0), &WebConfig::new()).unwrap();
    let free: Vec<usize> = web.free_indices().collect();
    assert!(!free.is_empty());
    assert!(!free.contains(&Web::<f32>::CENTER));
    assert!(free.iter().all(|&i| !web.particle(i).anchored));
}

#[test]
fn web_settles_without_blowing_up() {
    let mut web: Web<f32> = Web::new(Vec2::new(800.0, 0.0), &WebConfig::new()).unwrap();
    let physics = PhysicsConfig::new();
    let bounds = Bounds::new(800.0, 600.0);
    let input = InputContext::idle();

    for _ in 0..300 {
        web.step(&physics, &input, &bounds, &mut NoOpObserver);
    }

    for p in web.particles() {
        assert!(p.pos.is_finite());
        if !p.anchored {
            assert!(bounds.contains(p.pos), "web particle escaped the viewport: {:?}", p.pos);
        }
    }
    assert_eq!(web.center(), Vec2::new(800.0, 0.0));
}

#[test]
fn web_proximity_queries() {
    let web: Web<f32> = Web::new(Vec2::new(800.0, 0.0), &WebConfig::new()).unwrap();
    assert!(web.any_within(Vec2::new(790.0, 5.0), 20.0));
    assert!(!web.any_within(Vec2::new(0.0, 590.0), 20.0));
    let hit = web.nearest_within(Vec2::new(801.0, 1.0), 10.0).unwrap();
    assert_eq!(hit.index, Web::<f32>::CENTER);
}
