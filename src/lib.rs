//! Verlet ropes, a radial web, and the spider that lives on them.
//!
//! `gossamer` simulates a small interactive header scene: ropes hang from the
//! top of the viewport, a web fans out from the top-right corner, a fly
//! wanders until the web catches it, and a spider walks the ropes, hunts the
//! fly and spins its catch into cocoons. Pointers (mouse, touch, pen) pull on
//! the strands, swat the fly and pick up the spider.
//!
//! # Features
//!
//! - **Verlet particles**: position-based integration with friction and gravity
//! - **Constraint relaxation**: Gauss-Seidel distance constraints over ropes and the web
//! - **Spider agent**: explicit mode state machine plus eight-leg foot placement
//! - **Multi-pointer input**: per-contact velocity, merged between ticks
//! - **Deterministic**: seeded randomness; same seed, same events, same scene
//! - **Observable**: monitor ticks and agent transitions via the `TickObserver` trait
//! - **`no_std` compatible**: works in embedded and WASM environments

#![no_std]

extern crate alloc;

pub mod float;
pub mod vec;
pub mod particle;
pub mod constraint;
pub mod solver;
pub mod bounds;
pub mod anchor;
pub mod rope;
pub mod web;
pub mod pointer;
pub mod fly;
pub mod legs;
pub mod spider;
pub mod cocoon;
pub mod torch;
pub mod scene;
pub mod observer;
pub mod config;
pub mod error;
pub mod random;

// Re-export primary API
pub use float::Float;
pub use vec::Vec2;
pub use particle::Particle;
pub use constraint::DistanceConstraint;
pub use solver::ConstraintSolver;
pub use bounds::{Bounds, Edge};
pub use anchor::{AnchorHit, AnchorSource};
pub use rope::{Rope, RopeEnd};
pub use web::Web;
pub use pointer::{InputContext, Pointer, PointerEvent, PointerId, PointerPhase, PointerSet, PrimaryPointer};
pub use fly::{Fly, FlyEvent, FlyState};
pub use legs::{Foot, Foothold, Legs, LEG_COUNT};
pub use spider::{Spider, SpiderMode, Surroundings};
pub use cocoon::{Cocoon, CocoonStack};
pub use torch::Torch;
pub use scene::Scene;
pub use config::{FlyConfig, PhysicsConfig, RopeConfig, SceneConfig, SpiderConfig, TorchConfig, WebConfig};
pub use observer::{NoOpObserver, TickObserver};
pub use error::SceneError;
