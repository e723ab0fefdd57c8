//! Independent fits evaluated in parallel.
//!
//! A single fit is tiny and stays sequential; parallelism is only across
//! unrelated sample sets.

use rayon::prelude::*;

use crate::domain::{FitConfig, FitReport, Sample};
use crate::error::FitError;
use crate::fit::fitter::fit_quadratic;

/// Fit each sample set independently. Results keep the input order.
pub fn fit_batch<S>(inputs: &[S], config: &FitConfig) -> Vec<Result<FitReport, FitError>>
where
    S: AsRef<[Sample]> + Sync,
{
    inputs
        .par_iter()
        .map(|samples| fit_quadratic(samples.as_ref(), config))
        .collect()
}
