//! Multi-pointer input aggregation.
//!
//! Input events may arrive at any time between ticks and are merged into a
//! [`PointerSet`] immediately. Once per tick the scene takes an
//! [`InputContext`] snapshot and hands it by reference to every component
//! that reacts to pointers, so nothing reads input through shared globals.

use crate::float::Float;
use crate::vec::Vec2;
use alloc::collections::BTreeMap;
use alloc::vec::Vec as AllocVec;

/// Platform identifier of a contact (mouse, finger, pen).
pub type PointerId = u32;

/// What happened to a contact.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PointerPhase {
    /// Contact pressed.
    Down,
    /// Contact moved, pressed or hovering.
    Move,
    /// Contact released.
    Up,
    /// Contact lost (left the surface, interrupted by the platform).
    Cancel,
}

/// One raw input event.
#[derive(Clone, Copy, Debug)]
pub struct PointerEvent<F: Float> {
    pub id: PointerId,
    pub position: Vec2<F>,
    pub phase: PointerPhase,
    /// Set by the platform on the contact that drives single-pointer
    /// interactions.
    pub primary: bool,
}

impl<F: Float> PointerEvent<F> {
    pub fn new(id: PointerId, position: Vec2<F>, phase: PointerPhase, primary: bool) -> Self {
        PointerEvent { id, position, phase, primary }
    }
}

/// A live contact.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Pointer<F: Float> {
    pub id: PointerId,
    pub position: Vec2<F>,
    /// Displacement since the previous event for this contact.
    pub velocity: Vec2<F>,
    pub pressed: bool,
    pub primary: bool,
}

impl<F: Float> Pointer<F> {
    pub fn speed(&self) -> F {
        self.velocity.length()
    }
}

/// Single-pointer view used by the spider's grab and release.
///
/// Mirrors the primary contact. It keeps its last position and velocity after
/// the primary contact is released, with `pressed` cleared.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct PrimaryPointer<F: Float> {
    pub position: Vec2<F>,
    pub velocity: Vec2<F>,
    pub pressed: bool,
}

impl<F: Float> Default for PrimaryPointer<F> {
    fn default() -> Self {
        // Parked off screen until the first event arrives.
        PrimaryPointer {
            position: Vec2::new(F::from_f32(-100.0), F::from_f32(-100.0)),
            velocity: Vec2::zero(),
            pressed: false,
        }
    }
}

#[derive(Clone, Debug)]
struct Tracked<F: Float> {
    pointer: Pointer<F>,
    /// Received an event since the last settle.
    fresh: bool,
}

/// All live contacts keyed by identifier.
#[derive(Clone, Debug, Default)]
pub struct PointerSet<F: Float> {
    pointers: BTreeMap<PointerId, Tracked<F>>,
    primary: PrimaryPointer<F>,
    primary_fresh: bool,
}

impl<F: Float> PointerSet<F> {
    pub fn new() -> Self {
        PointerSet {
            pointers: BTreeMap::new(),
            primary: PrimaryPointer::default(),
            primary_fresh: false,
        }
    }

    /// Merge one event. Releases and cancels remove the contact.
    pub fn apply(&mut self, event: PointerEvent<F>) {
        match event.phase {
            PointerPhase::Up | PointerPhase::Cancel => self.release(event),
            PointerPhase::Down | PointerPhase::Move => self.track(event),
        }
    }

    fn track(&mut self, event: PointerEvent<F>) {
        if event.primary {
            for other in self.pointers.values_mut() {
                if other.pointer.id != event.id {
                    other.pointer.primary = false;
                }
            }
        }

        let tracked = self.pointers.entry(event.id).or_insert(Tracked {
            pointer: Pointer {
                id: event.id,
                position: event.position,
                velocity: Vec2::zero(),
                pressed: false,
                primary: event.primary,
            },
            fresh: true,
        });
        tracked.fresh = true;
        let pointer = &mut tracked.pointer;
        pointer.velocity = event.position - pointer.position;
        pointer.position = event.position;
        pointer.primary = event.primary;
        if event.phase == PointerPhase::Down {
            pointer.pressed = true;
        }

        if pointer.primary {
            self.primary = PrimaryPointer {
                position: pointer.position,
                velocity: pointer.velocity,
                pressed: pointer.pressed,
            };
            self.primary_fresh = true;
        }
    }

    fn release(&mut self, event: PointerEvent<F>) {
        let Some(tracked) = self.pointers.remove(&event.id) else {
            return;
        };
        let pointer = tracked.pointer;
        if pointer.primary || event.primary {
            // A release usually repeats the last move's position; keep that
            // move's velocity so a flick survives the release.
            let delta = event.position - pointer.position;
            let velocity = if delta.length_sq() > F::zero() { delta } else { pointer.velocity };
            self.primary = PrimaryPointer {
                position: event.position,
                velocity,
                pressed: false,
            };
            self.primary_fresh = true;
        }
    }

    /// Called once a tick has consumed the input. Contacts that saw no event
    /// since the previous settle lose their velocity, so a resting pointer
    /// does not keep its last swipe speed.
    pub fn settle(&mut self) {
        for tracked in self.pointers.values_mut() {
            if !tracked.fresh {
                tracked.pointer.velocity = Vec2::zero();
            }
            tracked.fresh = false;
        }
        if !self.primary_fresh {
            self.primary.velocity = Vec2::zero();
        }
        self.primary_fresh = false;
    }

    pub fn get(&self, id: PointerId) -> Option<&Pointer<F>> {
        self.pointers.get(&id).map(|t| &t.pointer)
    }

    pub fn primary(&self) -> &PrimaryPointer<F> {
        &self.primary
    }

    pub fn iter(&self) -> impl Iterator<Item = &Pointer<F>> {
        self.pointers.values().map(|t| &t.pointer)
    }

    pub fn len(&self) -> usize {
        self.pointers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pointers.is_empty()
    }

    /// Snapshot for one tick.
    pub fn context(&self) -> InputContext<F> {
        InputContext {
            primary: self.primary,
            pointers: self.iter().copied().collect(),
        }
    }
}

/// Input as seen by one tick.
#[derive(Clone, Debug, Default)]
pub struct InputContext<F: Float> {
    pub primary: PrimaryPointer<F>,
    pub pointers: AllocVec<Pointer<F>>,
}

impl<F: Float> InputContext<F> {
    /// No contacts, primary pointer parked off screen.
    pub fn idle() -> Self {
        Self::default()
    }

    /// First pressed contact within `radius` of `point`.
    pub fn pressed_near(&self, point: Vec2<F>, radius: F) -> Option<&Pointer<F>> {
        let radius_sq = radius * radius;
        self.pointers
            .iter()
            .find(|p| p.pressed && p.position.distance_sq(point) < radius_sq)
    }

    /// First contact within `radius` of `point` moving faster than `speed`.
    pub fn swipe_near(&self, point: Vec2<F>, radius: F, speed: F) -> Option<&Pointer<F>> {
        self.pointers
            .iter()
            .find(|p| p.position.distance(point) < radius && p.speed() > speed)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn event(id: PointerId, x: f32, y: f32, phase: PointerPhase) -> PointerEvent<f32> {
        PointerEvent::new(id, Vec2::new(x, y), phase, id == 1)
    }

    #[test]
    fn velocity_is_delta_between_events() {
        let mut set = PointerSet::new();
        set.apply(event(2, 10.0, 10.0, PointerPhase::Down));
        set.apply(event(2, 13.0, 14.0, PointerPhase::Move));
        let p = set.get(2).unwrap();
        assert_eq!(p.velocity, Vec2::new(3.0, 4.0));
        assert!(p.pressed);
    }

    #[test]
    fn velocity_decays_after_a_quiet_tick() {
        let mut set = PointerSet::new();
        set.apply(event(1, 0.0, 0.0, PointerPhase::Down));
        set.apply(event(1, 20.0, 0.0, PointerPhase::Move));
        set.settle();
        assert_eq!(set.get(1).unwrap().velocity, Vec2::new(20.0, 0.0));
        set.settle();
        assert_eq!(set.get(1).unwrap().velocity, Vec2::zero());
        assert_eq!(set.primary().velocity, Vec2::zero());
    }

    #[test]
    fn release_keeps_flick_velocity() {
        let mut set = PointerSet::new();
        set.apply(event(1, 0.0, 0.0, PointerPhase::Down));
        set.apply(event(1, 12.0, -5.0, PointerPhase::Move));
        set.settle();
        set.apply(event(1, 12.0, -5.0, PointerPhase::Up));
        assert!(!set.primary().pressed);
        assert_eq!(set.primary().velocity, Vec2::new(12.0, -5.0));
    }
}
