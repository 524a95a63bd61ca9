//! The flickering light source renderers shade the scene with.

use crate::config::TorchConfig;
use crate::float::Float;
use crate::random;
use crate::vec::Vec2;
use rand::Rng;

#[derive(Clone, Debug, PartialEq)]
pub struct Torch<F: Float> {
    pub position: Vec2<F>,
    /// Brightness multiplier, around 0.9 to 1.0.
    pub flicker: F,
    time: F,
}

impl<F: Float> Torch<F> {
    pub fn new(config: &TorchConfig<F>) -> Self {
        Torch { position: config.position, flicker: F::one(), time: F::zero() }
    }

    pub fn update<R: Rng + ?Sized>(&mut self, config: &TorchConfig<F>, rng: &mut R) {
        self.time = self.time + config.time_step;
        self.flicker = config.base + self.time.sin() * config.wave + random::unit::<F, R>(rng) * config.noise;
    }
}
