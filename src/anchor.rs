//! Uniform proximity queries over anything the spider can hold on to.

use crate::float::Float;
use crate::particle::Particle;
use crate::vec::Vec2;

/// A particle found by a proximity query.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct AnchorHit<F: Float> {
    pub index: usize,
    pub position: Vec2<F>,
    pub distance: F,
}

/// An indexed collection of points feet and bodies can latch onto.
///
/// Ropes and the web both implement this, so agents query them without
/// caring which kind of topology they are looking at.
pub trait AnchorSource<F: Float> {
    fn anchor_count(&self) -> usize;

    fn anchor(&self, index: usize) -> Vec2<F>;

    /// Closest point strictly within `radius` of `point`.
    fn nearest_within(&self, point: Vec2<F>, radius: F) -> Option<AnchorHit<F>> {
        let mut best: Option<AnchorHit<F>> = None;
        let mut best_dist = radius;
        for index in 0..self.anchor_count() {
            let position = self.anchor(index);
            let distance = position.distance(point);
            if distance < best_dist {
                best_dist = distance;
                best = Some(AnchorHit { index, position, distance });
            }
        }
        best
    }

    fn any_within(&self, point: Vec2<F>, radius: F) -> bool {
        let radius_sq = radius * radius;
        (0..self.anchor_count()).any(|i| self.anchor(i).distance_sq(point) < radius_sq)
    }
}

impl<F: Float> AnchorSource<F> for [Particle<F>] {
    fn anchor_count(&self) -> usize {
        self.len()
    }

    fn anchor(&self, index: usize) -> Vec2<F> {
        self[index].pos
    }
}

/// Closest point over several sources, strictly within `radius`.
///
/// Returns the source index alongside the hit.
pub fn nearest_among<'a, F, S, I>(sources: I, point: Vec2<F>, radius: F) -> Option<(usize, AnchorHit<F>)>
where
    F: Float,
    S: AnchorSource<F> + ?Sized + 'a,
    I: IntoIterator<Item = &'a S>,
{
    nearest_among_except(sources, point, radius, |_| false)
}

/// Like [`nearest_among`], but sources whose index `skip` accepts are ignored.
pub fn nearest_among_except<'a, F, S, I>(
    sources: I,
    point: Vec2<F>,
    radius: F,
    skip: impl Fn(usize) -> bool,
) -> Option<(usize, AnchorHit<F>)>
where
    F: Float,
    S: AnchorSource<F> + ?Sized + 'a,
    I: IntoIterator<Item = &'a S>,
{
    let mut best: Option<(usize, AnchorHit<F>)> = None;
    let mut reach = radius;
    for (source_idx, source) in sources.into_iter().enumerate() {
        if skip(source_idx) {
            continue;
        }
        if let Some(hit) = source.nearest_within(point, reach) {
            reach = hit.distance;
            best = Some((source_idx, hit));
        }
    }
    best
}
