//! Design matrix for the quadratic basis `(x^2, x, 1)`.

use nalgebra::{DMatrix, DVector};

use crate::domain::{COEFF_COUNT, Sample};

/// Fill a design row for `x`: `[x^2, x, 1]`.
pub fn design_row(x: f64) -> [f64; COEFF_COUNT] {
    [x * x, x, 1.0]
}

/// Build `A` (`N x 3`) and `y` (length `N`) in input order.
pub fn build_design(samples: &[Sample]) -> (DMatrix<f64>, DVector<f64>) {
    let a = DMatrix::from_fn(samples.len(), COEFF_COUNT, |i, j| {
        design_row(samples[i].x)[j]
    });
    let y = DVector::from_iterator(samples.len(), samples.iter().map(|s| s.y));
    (a, y)
}
