//! Records of completed capture-and-deposit cycles.

use crate::float::Float;
use alloc::vec::Vec as AllocVec;

/// A wrapped prey hanging from a web particle. Never mutated once spun.
#[derive(Clone, Debug, PartialEq)]
pub struct Cocoon<F: Float> {
    /// Index of the web particle it hangs from.
    pub anchor: usize,
    /// How many cocoons already hung from `anchor` when this one was spun.
    pub stack_index: usize,
    /// Fixed rotation in radians.
    pub rotation: F,
}

/// Append-only list of cocoons for the lifetime of a scene.
#[derive(Clone, Debug, Default)]
pub struct CocoonStack<F: Float> {
    cocoons: AllocVec<Cocoon<F>>,
}

impl<F: Float> CocoonStack<F> {
    pub fn new() -> Self {
        CocoonStack { cocoons: AllocVec::new() }
    }

    /// Spin a new cocoon on `anchor`, stacked under any already there.
    pub fn spin(&mut self, anchor: usize, rotation: F) -> &Cocoon<F> {
        let stack_index = self.count_at(anchor);
        self.cocoons.push(Cocoon { anchor, stack_index, rotation });
        &self.cocoons[self.cocoons.len() - 1]
    }

    pub fn count_at(&self, anchor: usize) -> usize {
        self.cocoons.iter().filter(|c| c.anchor == anchor).count()
    }

    pub fn as_slice(&self) -> &[Cocoon<F>] {
        &self.cocoons
    }

    pub fn len(&self) -> usize {
        self.cocoons.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cocoons.is_empty()
    }

    pub fn clear(&mut self) {
        self.cocoons.clear();
    }
}
