//! The viewport rectangle: clamping, edge detection, edge projections.

use crate::float::Float;
use crate::particle::Particle;
use crate::vec::Vec2;

/// One side of the viewport.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Edge {
    Ceiling,
    Floor,
    Left,
    Right,
}

/// Viewport spanning `(0, 0)` to `(width, height)`; y grows downward.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Bounds<F: Float> {
    pub width: F,
    pub height: F,
}

impl<F: Float> Bounds<F> {
    pub fn new(width: F, height: F) -> Self {
        Bounds { width, height }
    }

    pub fn is_valid(&self) -> bool {
        self.width.is_finite() && self.height.is_finite()
            && self.width > F::zero() && self.height > F::zero()
    }

    pub fn contains(&self, p: Vec2<F>) -> bool {
        p.x >= F::zero() && p.x <= self.width && p.y >= F::zero() && p.y <= self.height
    }

    /// Clamp free particles onto the viewport, reflecting the offending
    /// velocity component scaled by `restitution`.
    pub fn confine(&self, particles: &mut [Particle<F>], restitution: F) {
        for p in particles.iter_mut() {
            if p.anchored { continue; }
            if p.pos.x < F::zero() {
                p.pos.x = F::zero();
                let vel_x = p.pos.x - p.prev_pos.x;
                p.prev_pos.x = p.pos.x + vel_x * restitution;
            } else if p.pos.x > self.width {
                p.pos.x = self.width;
                let vel_x = p.pos.x - p.prev_pos.x;
                p.prev_pos.x = p.pos.x + vel_x * restitution;
            }
            if p.pos.y < F::zero() {
                p.pos.y = F::zero();
                let vel_y = p.pos.y - p.prev_pos.y;
                p.prev_pos.y = p.pos.y + vel_y * restitution;
            } else if p.pos.y > self.height {
                p.pos.y = self.height;
                let vel_y = p.pos.y - p.prev_pos.y;
                p.prev_pos.y = p.pos.y + vel_y * restitution;
            }
        }
    }

    /// The edge `p` is within `margin` of.
    ///
    /// Corners resolve ceiling first, then right, floor, left, so a crawl
    /// that runs into a corner turns onto the next edge instead of stalling.
    pub fn near_edge(&self, p: Vec2<F>, margin: F) -> Option<Edge> {
        if p.y < margin {
            Some(Edge::Ceiling)
        } else if p.x > self.width - margin {
            Some(Edge::Right)
        } else if p.y > self.height - margin {
            Some(Edge::Floor)
        } else if p.x < margin {
            Some(Edge::Left)
        } else {
            None
        }
    }

    /// Closest point on each edge line (left, right, ceiling, floor).
    pub fn projections(&self, p: Vec2<F>) -> [Vec2<F>; 4] {
        [
            Vec2::new(F::zero(), p.y),
            Vec2::new(self.width, p.y),
            Vec2::new(p.x, F::zero()),
            Vec2::new(p.x, self.height),
        ]
    }

    /// Nearest edge projection of `p` strictly closer than `reach`.
    pub fn nearest_projection(&self, p: Vec2<F>, reach: F) -> Option<Vec2<F>> {
        let mut best = None;
        let mut best_dist = reach;
        for candidate in self.projections(p) {
            let d = candidate.distance(p);
            if d < best_dist {
                best_dist = d;
                best = Some(candidate);
            }
        }
        best
    }
}
