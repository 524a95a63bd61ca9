//! Error types for scene construction.

use core::fmt;

/// Errors raised while building a scene or one of its topologies.
///
/// Per-frame updates never fail; these only come out of constructors and
/// [`SceneConfig::validate`](crate::config::SceneConfig::validate).
#[derive(Debug, Clone, PartialEq)]
pub enum SceneError {
    /// Viewport width and height must be positive and finite.
    InvalidViewport,
    /// A rope needs at least one segment.
    InvalidSegments,
    /// A web needs at least one ring and two strands.
    InvalidWebDimensions { rings: usize, strands: usize },
    /// Friction must be in (0, 1).
    InvalidFriction,
    /// Constraint relaxation needs at least one iteration.
    InvalidIterations,
    /// A radius or distance threshold must be positive.
    InvalidRadius { name: &'static str },
    /// The fly's minimum cruising speed exceeds its maximum.
    InvalidSpeedBand,
}

impl fmt::Display for SceneError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SceneError::InvalidViewport => write!(f, "viewport must have positive, finite size"),
            SceneError::InvalidSegments => write!(f, "rope needs at least one segment"),
            SceneError::InvalidWebDimensions { rings, strands } => {
                write!(f, "web needs at least 1 ring and 2 strands (got {} rings, {} strands)", rings, strands)
            }
            SceneError::InvalidFriction => write!(f, "friction must be in (0, 1)"),
            SceneError::InvalidIterations => write!(f, "relaxation needs at least one iteration"),
            SceneError::InvalidRadius { name } => write!(f, "{} must be positive", name),
            SceneError::InvalidSpeedBand => write!(f, "fly minimum speed exceeds maximum speed"),
        }
    }
}
