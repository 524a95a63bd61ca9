//! Radial web of concentric rings hung from a corner.

use crate::anchor::AnchorSource;
use crate::bounds::Bounds;
use crate::config::{PhysicsConfig, WebConfig};
use crate::constraint::DistanceConstraint;
use crate::error::SceneError;
use crate::float::Float;
use crate::observer::TickObserver;
use crate::particle::Particle;
use crate::pointer::InputContext;
use crate::solver::ConstraintSolver;
use crate::vec::Vec2;
use alloc::vec::Vec as AllocVec;

/// A web built from one anchored center and `rings x strands` particles.
///
/// Particle 0 is the center. The particle on ring `r` (1-based) and strand `s`
/// has index `1 + (r - 1) * strands + s`.
#[derive(Clone, Debug)]
pub struct Web<F: Float> {
    solver: ConstraintSolver<F>,
    rings: usize,
    strands: usize,
}

impl<F: Float> Web<F> {
    /// Hang a web with its center at `center`, fanning out to the left and
    /// downward over `config.sweep` radians.
    ///
    /// Creates two kinds of constraints:
    /// - Radial: center to ring 1, and ring `r - 1` to ring `r` on each strand
    /// - Circumferential: neighbouring strands within a ring
    ///
    /// Ring radii are skewed per strand, from `skew_first` on the first
    /// (topmost) strand to `skew_last` on the last. Outer-ring particles at
    /// either end of the ring, or within `anchor_margin` of the ceiling or the
    /// corner wall, are anchored.
    pub fn new(center: Vec2<F>, config: &WebConfig<F>) -> Result<Self, SceneError> {
        let rings = config.rings;
        let strands = config.strands;
        if rings == 0 || strands < 2 {
            return Err(SceneError::InvalidWebDimensions { rings, strands });
        }

        let mut solver = ConstraintSolver::with_capacity(1 + rings * strands, 2 * rings * strands);
        solver.add_particle(Particle::anchored(center));

        let last_strand = F::from_usize(strands - 1);
        for r in 1..=rings {
            let ring_radius = config.radius / F::from_usize(rings) * F::from_usize(r);
            let outer = r == rings;

            for s in 0..strands {
                let t = F::from_usize(s) / last_strand;
                let angle = t * config.sweep;
                let skew = config.skew_first.lerp(config.skew_last, t);
                let reach = ring_radius * skew;
                let pos = Vec2::new(center.x - angle.cos() * reach, center.y + angle.sin() * reach);

                let anchored = outer
                    && (s == 0
                        || s == strands - 1
                        || pos.y < center.y + config.anchor_margin
                        || pos.x > center.x - config.anchor_margin);
                let idx = solver.add_particle(if anchored {
                    Particle::anchored(pos)
                } else {
                    Particle::new(pos)
                });

                // Radial
                let inner = if r == 1 { 0 } else { Self::ring_index(strands, r - 1, s) };
                solver.link(inner, idx);

                // Circumferential
                if s > 0 {
                    solver.link(idx - 1, idx);
                }
            }
        }

        Ok(Web { solver, rings, strands })
    }

    fn ring_index(strands: usize, ring: usize, strand: usize) -> usize {
        1 + (ring - 1) * strands + strand
    }

    /// Index of the particle on `ring` (1-based) and `strand`.
    pub fn index(&self, ring: usize, strand: usize) -> usize {
        Self::ring_index(self.strands, ring, strand)
    }

    pub const CENTER: usize = 0;

    pub fn center(&self) -> Vec2<F> {
        self.solver.particle(Self::CENTER).pos
    }

    /// Indices of all particles that are not anchored.
    pub fn free_indices(&self) -> impl Iterator<Item = usize> + '_ {
        self.solver
            .particles
            .iter()
            .enumerate()
            .filter(|(_, p)| !p.anchored)
            .map(|(i, _)| i)
    }

    pub fn step<O: TickObserver<F>>(
        &mut self,
        physics: &PhysicsConfig<F>,
        input: &InputContext<F>,
        bounds: &Bounds<F>,
        observer: &mut O,
    ) {
        self.solver.step(physics, physics.web_iterations, input, Some(bounds), observer);
    }

    pub fn positions(&self) -> AllocVec<Vec2<F>> {
        self.solver.particles.iter().map(|p| p.pos).collect()
    }

    pub fn particles(&self) -> &[Particle<F>] {
        &self.solver.particles
    }

    pub fn constraints(&self) -> &[DistanceConstraint<F>] {
        &self.solver.constraints
    }

    pub fn particle(&self, index: usize) -> &Particle<F> {
        self.solver.particle(index)
    }

    pub fn rings(&self) -> usize { self.rings }
    pub fn strands(&self) -> usize { self.strands }
    pub fn particle_count(&self) -> usize { self.solver.particle_count() }
    pub fn constraint_count(&self) -> usize { self.solver.constraint_count() }
}

impl<F: Float> AnchorSource<F> for Web<F> {
    fn anchor_count(&self) -> usize {
        self.particle_count()
    }

    fn anchor(&self, index: usize) -> Vec2<F> {
        self.particle(index).pos
    }
}
