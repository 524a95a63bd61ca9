//! Verlet particles with position-based dynamics.

use crate::config::PhysicsConfig;
use crate::float::Float;
use crate::pointer::InputContext;
use crate::vec::Vec2;

/// A Verlet particle: position-based dynamics with implicit velocity.
///
/// Velocity is never stored: it is `pos - prev_pos`. Anchored particles are
/// immune to integration and to constraint resolution.
#[derive(Clone, Debug, PartialEq)]
pub struct Particle<F: Float> {
    pub pos: Vec2<F>,
    pub prev_pos: Vec2<F>,
    pub anchored: bool,
}

impl<F: Float> Particle<F> {
    pub fn new(pos: Vec2<F>) -> Self {
        Particle { pos, prev_pos: pos, anchored: false }
    }

    pub fn anchored(pos: Vec2<F>) -> Self {
        Particle { pos, prev_pos: pos, anchored: true }
    }

    /// Advance one tick: friction-damped inertia plus gravity, then a pull
    /// towards any pressed pointer within the attraction radius.
    pub fn integrate(&mut self, physics: &PhysicsConfig<F>, input: &InputContext<F>) {
        if self.anchored {
            return;
        }
        let velocity = (self.pos - self.prev_pos).scale(physics.friction);
        self.prev_pos = self.pos;
        self.pos = self.pos + velocity + Vec2::new(F::zero(), physics.gravity);

        if let Some(pointer) = input.pressed_near(self.pos, physics.attraction_radius) {
            self.pos = self.pos.lerp(pointer.position, physics.attraction_strength);
        }
    }

    pub fn velocity(&self) -> Vec2<F> {
        self.pos - self.prev_pos
    }

    /// Replace the implicit velocity without moving the particle.
    pub fn set_velocity(&mut self, velocity: Vec2<F>) {
        self.prev_pos = self.pos - velocity;
    }

    /// Teleport and drop all momentum.
    pub fn place(&mut self, pos: Vec2<F>) {
        self.pos = pos;
        self.prev_pos = pos;
    }

    /// Forget momentum gathered this tick; used for kinematically driven bodies.
    pub fn settle(&mut self) {
        self.prev_pos = self.pos;
    }
}
