//! Shared "fit pipeline" logic used by the CLI commands.
//!
//! Keeping this in one place avoids duplicating the core workflow:
//! read samples -> fit -> report
//!
//! The commands can then focus on presentation (printing vs export).

use std::path::{Path, PathBuf};

use tracing::info;

use crate::domain::{FitConfig, FitReport, Sample};
use crate::error::{AppError, FitError};
use crate::fit::{fit_batch, fit_quadratic};
use crate::io::load_samples;

/// All computed outputs of a single `quadfit fit` run.
#[derive(Debug, Clone)]
pub struct RunOutput {
    pub input: String,
    pub samples: Vec<Sample>,
    pub report: FitReport,
}

/// Load one input file and fit it.
pub fn run_fit(path: &Path, config: &FitConfig) -> Result<RunOutput, AppError> {
    let samples = load_samples(path)?;
    let report = fit_quadratic(&samples, config)?;
    info!(
        strategy = report.strategy.display_name(),
        error = report.quality.error,
        "fit complete"
    );

    Ok(RunOutput {
        input: path.display().to_string(),
        samples,
        report,
    })
}

/// Load every input file, then fit them in parallel.
///
/// Unreadable or malformed files abort the whole batch; fit failures are
/// returned per file.
pub fn run_batch(
    paths: &[PathBuf],
    config: &FitConfig,
) -> Result<Vec<(String, Result<FitReport, FitError>)>, AppError> {
    let inputs = paths
        .iter()
        .map(|p| load_samples(p))
        .collect::<Result<Vec<_>, _>>()?;

    let results = fit_batch(&inputs, config);
    Ok(paths
        .iter()
        .map(|p| p.display().to_string())
        .zip(results)
        .collect())
}
