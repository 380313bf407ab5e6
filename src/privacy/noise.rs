//! Laplace mechanism for percentage distributions.
//!
//! Before a distribution leaves the core's trust boundary, every percentage
//! is perturbed with noise drawn from a Laplace distribution with scale
//! `b = 1/epsilon`, then clamped back into [0,100] and rounded. This
//! approximates differential privacy; it is not a certified guarantee.

use crate::config::ConfigError;
use crate::core::accumulator::Distribution;
use crate::detector::types::Emotion;
use rand::Rng;

/// Draw one sample from a zero-mean Laplace distribution with the given
/// scale, via the standard inverse-CDF construction:
///
///   sample = -b * sign(u) * ln(1 - 2|u|),  u uniform on (-0.5, 0.5)
pub fn laplace_sample<R: Rng + ?Sized>(rng: &mut R, scale: f64) -> f64 {
    // gen() yields [0, 1); shift to [-0.5, 0.5) and resample the single
    // excluded endpoint so ln(1 - 2|u|) stays finite
    let mut u: f64 = rng.gen::<f64>() - 0.5;
    while u == -0.5 {
        u = rng.gen::<f64>() - 0.5;
    }
    -scale * u.signum() * (1.0 - 2.0 * u.abs()).ln()
}

/// Apply calibrated Laplace noise to every percentage in a distribution.
///
/// Each output value is `round(clamp(value + noise, 0, 100))`, so the result
/// is always a well-formed distribution. Smaller epsilon means more noise.
/// Rejects epsilon outside (0, inf) at the call boundary.
///
/// This must be applied exactly once per outbound payload; callers reuse
/// the returned distribution rather than re-noising the same data.
pub fn privatize<R: Rng + ?Sized>(
    distribution: &Distribution,
    epsilon: f64,
    rng: &mut R,
) -> Result<Distribution, ConfigError> {
    if !epsilon.is_finite() || epsilon <= 0.0 {
        return Err(ConfigError::InvalidEpsilon(epsilon));
    }

    let scale = 1.0 / epsilon;
    let mut noised = Distribution::new();
    for emotion in Emotion::ALL {
        let value = distribution.get(emotion) + laplace_sample(rng, scale);
        noised.set(emotion, value.clamp(0.0, 100.0).round());
    }
    Ok(noised)
}

/// Coarsen an absolute detection count to the nearest ten.
///
/// Exact totals leak audience size; coarsening is part of the same outbound
/// gate as percentage noising.
pub fn coarsen_count(count: u64) -> u64 {
    (count + 5) / 10 * 10
}
