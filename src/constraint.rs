//! Rigid-length links between particles, relaxed iteratively.

use crate::float::Float;
use crate::particle::Particle;

/// Keeps two particles of the same topology `rest_length` apart.
///
/// `a` and `b` index into the owning topology's particle list.
#[derive(Clone, Debug, PartialEq)]
pub struct DistanceConstraint<F: Float> {
    pub a: usize,
    pub b: usize,
    pub rest_length: F,
}

impl<F: Float> DistanceConstraint<F> {
    pub fn new(a: usize, b: usize, rest_length: F) -> Self {
        DistanceConstraint { a, b, rest_length }
    }

    /// Use the particles' current separation as rest length.
    pub fn from_particles(a: usize, b: usize, particles: &[Particle<F>]) -> Self {
        let rest_length = particles[a].pos.distance(particles[b].pos);
        DistanceConstraint { a, b, rest_length }
    }

    /// One relaxation pass.
    ///
    /// Two free particles each take half of the correction, a lone free
    /// particle takes all of it. Coincident particles get no correction.
    pub fn resolve(&self, particles: &mut [Particle<F>]) {
        let a_free = !particles[self.a].anchored;
        let b_free = !particles[self.b].anchored;
        if !a_free && !b_free {
            return;
        }

        let delta = particles[self.b].pos - particles[self.a].pos;
        let dist = delta.length();
        let fraction = if dist > F::zero() {
            (self.rest_length - dist) / dist
        } else {
            F::zero()
        };
        let offset = delta.scale(fraction);

        match (a_free, b_free) {
            (true, true) => {
                let half = offset.scale(F::half());
                particles[self.a].pos -= half;
                particles[self.b].pos += half;
            }
            (true, false) => particles[self.a].pos -= offset,
            (false, true) => particles[self.b].pos += offset,
            (false, false) => {}
        }
    }

    /// Signed stretch: positive when longer than rest length.
    pub fn error(&self, particles: &[Particle<F>]) -> F {
        particles[self.a].pos.distance(particles[self.b].pos) - self.rest_length
    }
}
