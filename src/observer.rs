//! Tick observer trait for monitoring the simulation.

use crate::cocoon::Cocoon;
use crate::float::Float;
use crate::spider::SpiderMode;

/// Trait for observing simulation ticks.
///
/// Implement this trait to monitor solver progress and agent behaviour (for
/// debugging overlays, sound cues, or tests). All methods have default no-op
/// implementations.
pub trait TickObserver<F: Float> {
    /// Called after every particle of a topology has been integrated.
    fn on_integrate(&mut self) {}

    /// Called after each constraint relaxation pass over a topology.
    fn on_constraint_iteration(&mut self, _iteration: usize) {}

    /// Called whenever the spider changes mode.
    fn on_spider_transition(&mut self, _from: SpiderMode, _to: SpiderMode) {}

    /// Called when the web catches the fly.
    fn on_prey_caught(&mut self) {}

    /// Called when the spider picks the caught fly off the web.
    fn on_prey_collected(&mut self) {}

    /// Called when the spider deposits a cocoon.
    fn on_cocoon_spun(&mut self, _cocoon: &Cocoon<F>) {}

    /// Called when a tick is fully complete.
    fn on_tick_complete(&mut self) {}
}

/// A no-op observer that does nothing. Use as default when no observation needed.
pub struct NoOpObserver;

impl<F: Float> TickObserver<F> for NoOpObserver {}
