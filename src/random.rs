//! Small helpers for drawing `Float` values from a `rand` generator.

use crate::float::Float;
use rand::Rng;

/// Uniform in [0, 1).
pub fn unit<F: Float, R: Rng + ?Sized>(rng: &mut R) -> F {
    F::from_f32(rng.gen::<f32>())
}

/// Uniform in [-width / 2, width / 2).
pub fn centered<F: Float, R: Rng + ?Sized>(rng: &mut R, width: F) -> F {
    (unit::<F, R>(rng) - F::half()) * width
}

/// Uniform in [min, max).
pub fn between<F: Float, R: Rng + ?Sized>(rng: &mut R, min: F, max: F) -> F {
    min + (max - min) * unit::<F, R>(rng)
}

/// True with probability `p`.
pub fn chance<F: Float, R: Rng + ?Sized>(rng: &mut R, p: F) -> bool {
    unit::<F, R>(rng) < p
}
