use fastrand::Rng;
use std::f64::consts::TAU;

/// Draws from a normal distribution (Box-Muller, two uniform draws per sample).
#[inline(always)]
pub fn gaussian(rng: &mut Rng, mean: f64, stddev: f64) -> f64 {
    // 1 - [0, 1) keeps the log argument strictly positive.
    let u1 = 1.0 - rng.f64();
    let u2 = rng.f64();
    let z = (-2.0 * u1.ln()).sqrt() * (TAU * u2).cos();
    mean + stddev * z
}
