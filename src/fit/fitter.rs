//! Fit a quadratic to one set of samples.
//!
//! Pipeline:
//! - reject non-finite samples
//! - build the design matrix `A` and target `y`
//! - pick a solver variant from the sample count and caller preference
//! - solve, flagging near-singular systems
//! - evaluate residuals and error metrics
//!
//! Nothing here prints; diagnostics are returned in the report.

use tracing::{debug, warn};

use crate::domain::{Coefficients, Diagnostics, FitConfig, FitReport, FitWarning, Sample, Strategy};
use crate::error::FitError;
use crate::fit::solver::{factorize, solve_system};
use crate::math::build_design;
use crate::report::evaluate_residuals;

/// Fit `y = a*x^2 + b*x + c` by least squares.
pub fn fit_quadratic(samples: &[Sample], config: &FitConfig) -> Result<FitReport, FitError> {
    validate_samples(samples)?;

    let strategy = Strategy::select(samples.len(), config.method)?;
    let (a, y) = build_design(samples);
    debug!(
        n = samples.len(),
        strategy = strategy.display_name(),
        "solving quadratic least squares"
    );

    let solution = solve_system(strategy, &a, &y)?;

    let mut warnings = Vec::new();
    if solution.pivot_ratio < config.pivot_warn_ratio {
        let warning = FitWarning::NearSingular {
            strategy,
            pivot_ratio: solution.pivot_ratio,
        };
        warn!("{warning}");
        warnings.push(warning);
    }

    let coefficients = Coefficients::from_vector(&solution.w);
    let (residuals, quality) = evaluate_residuals(&coefficients, samples);

    let diagnostics = config.collect_diagnostics.then(|| Diagnostics {
        factorization: factorize(strategy, &a, &y),
        design: a,
        target: y,
    });

    Ok(FitReport {
        strategy,
        coefficients,
        quality,
        residuals,
        warnings,
        diagnostics,
    })
}

/// Reject NaN and infinite samples before they reach the matrices.
pub fn validate_samples(samples: &[Sample]) -> Result<(), FitError> {
    match samples.iter().position(|s| !s.is_finite()) {
        Some(index) => Err(FitError::NonFiniteSample {
            index,
            x: samples[index].x,
            y: samples[index].y,
        }),
        None => Ok(()),
    }
}
