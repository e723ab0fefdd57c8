//! Synthetic samples drawn around a known quadratic.
//!
//! Used for demos (`quadfit generate`) and for exercising the solvers on
//! reproducible data: the same `SampleSpec` always produces the same samples.

use rand::prelude::*;
use rand::rngs::StdRng;
use rand_distr::Normal;

use crate::domain::{Coefficients, Sample};
use crate::error::AppError;

/// What to generate.
#[derive(Debug, Clone, PartialEq)]
pub struct SampleSpec {
    pub truth: Coefficients,
    pub count: usize,
    pub x_min: f64,
    pub x_max: f64,
    /// Standard deviation of additive Gaussian noise on y (0 for exact samples).
    pub noise: f64,
    pub seed: u64,
}

/// Draw `count` samples with x uniform in `[x_min, x_max]` and
/// `y = truth(x) + ε`, `ε ~ N(0, noise²)`.
pub fn generate_samples(spec: &SampleSpec) -> Result<Vec<Sample>, AppError> {
    if spec.count == 0 {
        return Err(AppError::new(2, "Sample count must be > 0."));
    }
    if !(spec.x_min.is_finite() && spec.x_max.is_finite() && spec.x_max > spec.x_min) {
        return Err(AppError::new(2, "Invalid x range for sample generation."));
    }
    if !(spec.noise.is_finite() && spec.noise >= 0.0) {
        return Err(AppError::new(2, "Noise level must be finite and >= 0."));
    }
    if !spec.truth.is_finite() {
        return Err(AppError::new(2, "Quadratic coefficients must be finite."));
    }

    let mut rng = StdRng::seed_from_u64(spec.seed);
    let normal = Normal::new(0.0, spec.noise)
        .map_err(|e| AppError::new(4, format!("Noise distribution error: {e}")))?;

    let samples = (0..spec.count)
        .map(|_| {
            let x = rng.gen_range(spec.x_min..=spec.x_max);
            let eps = if spec.noise > 0.0 { normal.sample(&mut rng) } else { 0.0 };
            Sample::new(x, spec.truth.predict(x) + eps)
        })
        .collect();

    Ok(samples)
}
