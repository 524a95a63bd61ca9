//! Integrate-then-relax stepping shared by every particle topology.

use crate::bounds::Bounds;
use crate::config::PhysicsConfig;
use crate::constraint::DistanceConstraint;
use crate::float::Float;
use crate::observer::TickObserver;
use crate::particle::Particle;
use crate::pointer::InputContext;
use alloc::vec::Vec as AllocVec;

/// Particles plus the distance constraints linking them.
#[derive(Clone, Debug, Default)]
pub struct ConstraintSolver<F: Float> {
    pub particles: AllocVec<Particle<F>>,
    pub constraints: AllocVec<DistanceConstraint<F>>,
}

impl<F: Float> ConstraintSolver<F> {
    pub fn new() -> Self {
        ConstraintSolver {
            particles: AllocVec::new(),
            constraints: AllocVec::new(),
        }
    }

    pub fn with_capacity(particles: usize, constraints: usize) -> Self {
        ConstraintSolver {
            particles: AllocVec::with_capacity(particles),
            constraints: AllocVec::with_capacity(constraints),
        }
    }

    pub fn add_particle(&mut self, particle: Particle<F>) -> usize {
        let idx = self.particles.len();
        self.particles.push(particle);
        idx
    }

    pub fn add_constraint(&mut self, constraint: DistanceConstraint<F>) {
        self.constraints.push(constraint);
    }

    /// Link `a` and `b` at their current separation.
    pub fn link(&mut self, a: usize, b: usize) {
        let constraint = DistanceConstraint::from_particles(a, b, &self.particles);
        self.constraints.push(constraint);
    }

    /// One tick: integrate every particle, then run `iterations` relaxation
    /// passes over every constraint, then clamp stray particles onto `bounds`.
    ///
    /// Integration of all particles completes before the first relaxation pass.
    pub fn step<O: TickObserver<F>>(
        &mut self,
        physics: &PhysicsConfig<F>,
        iterations: usize,
        input: &InputContext<F>,
        bounds: Option<&Bounds<F>>,
        observer: &mut O,
    ) {
        for p in self.particles.iter_mut() {
            p.integrate(physics, input);
        }
        observer.on_integrate();

        for i in 0..iterations {
            self.relax();
            observer.on_constraint_iteration(i);
        }

        if let Some(bounds) = bounds {
            bounds.confine(&mut self.particles, physics.bounds_restitution);
        }
    }

    /// One relaxation pass over all constraints, in insertion order.
    pub fn relax(&mut self) {
        for constraint in self.constraints.iter() {
            constraint.resolve(&mut self.particles);
        }
    }

    /// Largest absolute deviation from rest length over all constraints.
    pub fn max_error(&self) -> F {
        self.constraints
            .iter()
            .map(|c| c.error(&self.particles).abs())
            .fold(F::zero(), |acc, e| acc.max(e))
    }

    pub fn particle_count(&self) -> usize { self.particles.len() }
    pub fn constraint_count(&self) -> usize { self.constraints.len() }
    pub fn particle(&self, index: usize) -> &Particle<F> { &self.particles[index] }
}
