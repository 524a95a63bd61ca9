//! Hanging ropes: a chain of particles anchored at both ends.

use crate::anchor::AnchorSource;
use crate::bounds::Bounds;
use crate::config::PhysicsConfig;
use crate::constraint::DistanceConstraint;
use crate::error::SceneError;
use crate::float::Float;
use crate::observer::TickObserver;
use crate::particle::Particle;
use crate::pointer::InputContext;
use crate::solver::ConstraintSolver;
use crate::vec::Vec2;
use alloc::vec::Vec as AllocVec;

/// Which end of a rope.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum RopeEnd {
    Start,
    End,
}

/// A rope of `segments + 1` particles joined by `segments` equal-length
/// constraints. Both endpoints are anchored; interior particles hang free.
#[derive(Clone, Debug)]
pub struct Rope<F: Float> {
    solver: ConstraintSolver<F>,
    home: RopeEnd,
}

impl<F: Float> Rope<F> {
    /// Lay the rope out straight between `start` and `end`.
    ///
    /// Each segment rests at `total_length / segments`, so a rope longer than
    /// the endpoint distance sags once it starts moving.
    pub fn new(start: Vec2<F>, end: Vec2<F>, segments: usize, total_length: F) -> Result<Self, SceneError> {
        if segments == 0 {
            return Err(SceneError::InvalidSegments);
        }
        let mut solver = ConstraintSolver::with_capacity(segments + 1, segments);
        let segment_length = total_length / F::from_usize(segments);

        for i in 0..=segments {
            let t = F::from_usize(i) / F::from_usize(segments);
            let pos = start.lerp(end, t);
            let particle = if i == 0 || i == segments {
                Particle::anchored(if i == 0 { start } else { end })
            } else {
                Particle::new(pos)
            };
            solver.add_particle(particle);
        }

        for i in 0..segments {
            solver.add_constraint(DistanceConstraint::new(i, i + 1, segment_length));
        }

        Ok(Rope { solver, home: RopeEnd::End })
    }

    /// Make the endpoint horizontally closer to `x` the home end.
    pub fn set_home_towards(&mut self, x: F) {
        let start = self.particle(0).pos.x;
        let end = self.particle(self.len() - 1).pos.x;
        self.home = if (start - x).abs() < (end - x).abs() {
            RopeEnd::Start
        } else {
            RopeEnd::End
        };
    }

    /// The end a spider heading home walks towards.
    pub fn home(&self) -> RopeEnd {
        self.home
    }

    /// One index closer to the home end, saturating at the end itself.
    pub fn step_home(&self, index: usize) -> usize {
        match self.home {
            RopeEnd::Start => index.saturating_sub(1),
            RopeEnd::End => (index + 1).min(self.len() - 1),
        }
    }

    pub fn step<O: TickObserver<F>>(
        &mut self,
        physics: &PhysicsConfig<F>,
        input: &InputContext<F>,
        bounds: &Bounds<F>,
        observer: &mut O,
    ) {
        self.solver.step(physics, physics.rope_iterations, input, Some(bounds), observer);
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

    pub fn len(&self) -> usize {
        self.solver.particle_count()
    }

    pub fn is_empty(&self) -> bool {
        self.solver.particles.is_empty()
    }

    pub fn segment_count(&self) -> usize {
        self.solver.constraint_count()
    }

    pub fn particle(&self, index: usize) -> &Particle<F> {
        self.solver.particle(index)
    }

    pub fn max_error(&self) -> F {
        self.solver.max_error()
    }
}

impl<F: Float> AnchorSource<F> for Rope<F> {
    fn anchor_count(&self) -> usize {
        self.len()
    }

    fn anchor(&self, index: usize) -> Vec2<F> {
        self.particle(index).pos
    }
}
