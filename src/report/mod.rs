//! Reporting utilities: residuals, error metrics, and formatted terminal output.

pub mod format;

pub use format::*;

use crate::domain::{Coefficients, FitQuality, Residual, Sample};

/// Compute fitted values and residuals for each sample.
///
/// `FitQuality::error` is the signed sum `Σ (yᵢ - ŷᵢ)`, not a sum of squares;
/// the squared metrics are reported separately in `sse`/`rmse`.
pub fn evaluate_residuals(coefficients: &Coefficients, samples: &[Sample]) -> (Vec<Residual>, FitQuality) {
    let residuals: Vec<Residual> = samples
        .iter()
        .map(|&sample| {
            let fitted = coefficients.predict(sample.x);
            Residual {
                sample,
                fitted,
                residual: sample.y - fitted,
            }
        })
        .collect();

    let n = residuals.len();
    let error = residuals.iter().map(|r| r.residual).sum();
    let sse: f64 = residuals.iter().map(|r| r.residual * r.residual).sum();
    let rmse = if n > 0 { (sse / n as f64).sqrt() } else { 0.0 };

    (residuals, FitQuality { n, error, sse, rmse })
}
