//! Foot placement for the spider's eight legs.
//!
//! Each foot looks for the closest rope or web particle near its ideal
//! position, falls back to the nearest viewport edge, and otherwise idles in
//! a small circle. There is no joint chain: a foot only ever eases towards
//! whatever it picked this tick.

use crate::anchor::{nearest_among, AnchorSource};
use crate::bounds::Bounds;
use crate::config::SpiderConfig;
use crate::float::Float;
use crate::rope::Rope;
use crate::vec::Vec2;
use crate::web::Web;

pub const LEG_COUNT: usize = 8;

/// What a foot is holding on to.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Foothold {
    Strand,
    Edge,
    Idle,
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Foot<F: Float> {
    pub position: Vec2<F>,
    pub hold: Foothold,
}

#[derive(Clone, Debug, PartialEq)]
pub struct Legs<F: Float> {
    feet: [Foot<F>; LEG_COUNT],
    phase: F,
}

impl<F: Float> Legs<F> {
    pub fn new(body: Vec2<F>) -> Self {
        Legs {
            feet: [Foot { position: body, hold: Foothold::Idle }; LEG_COUNT],
            phase: F::zero(),
        }
    }

    pub fn feet(&self) -> &[Foot<F>; LEG_COUNT] {
        &self.feet
    }

    /// Idle animation phase; also paces the crawl wobble.
    pub fn phase(&self) -> F {
        self.phase
    }

    /// Angle of leg `i` around the body.
    pub fn angle(i: usize) -> F {
        F::from_usize(i) / F::from_usize(LEG_COUNT) * F::two() * F::pi()
    }

    /// Move every foot one tick towards its chosen hold.
    pub fn update(
        &mut self,
        body: Vec2<F>,
        active: bool,
        ropes: &[Rope<F>],
        web: &Web<F>,
        bounds: &Bounds<F>,
        config: &SpiderConfig<F>,
    ) {
        let rate = if active { config.leg_phase_rate_active } else { config.leg_phase_rate };
        self.phase = self.phase + rate;
        let reach = config.leg_reach();

        for (i, foot) in self.feet.iter_mut().enumerate() {
            let ideal = body + Vec2::from_angle(Self::angle(i)).scale(reach);

            let strands = ropes
                .iter()
                .map(|r| r as &dyn AnchorSource<F>)
                .chain(core::iter::once(web as &dyn AnchorSource<F>));

            let (target, hold, ease) = if let Some((_, hit)) = nearest_among(strands, ideal, reach) {
                (hit.position, Foothold::Strand, config.foot_ease)
            } else if let Some(edge) = bounds.nearest_projection(ideal, reach) {
                (edge, Foothold::Edge, config.foot_ease)
            } else {
                let wobble_angle = self.phase + F::from_usize(i) * config.leg_phase_offset;
                let wobble = Vec2::new(wobble_angle.cos(), wobble_angle.sin()).scale(config.idle_radius);
                (ideal + wobble, Foothold::Idle, config.idle_ease)
            };

            foot.position = foot.position.lerp(target, ease);
            foot.hold = hold;
        }
    }
}
