//! LU decomposition with partial (row) pivoting.
//!
//! nalgebra's `LU` picks, at each elimination step, the remaining row with the
//! largest-magnitude entry in the pivot column and records the swaps as a
//! permutation sequence such that `perm(M) = L·U`. We expose the factors in the
//! `M = P·L·U` convention, with `P` an explicit permutation matrix.

use nalgebra::{DMatrix, DVector};

use crate::domain::LuFactors;

/// Result of an LU solve.
#[derive(Debug, Clone)]
pub struct LuSolution {
    /// `None` when a pivot is exactly zero.
    pub w: Option<DVector<f64>>,
    /// `min|Uᵢᵢ| / max|Uᵢᵢ|`; `0.0` for a singular matrix.
    pub pivot_ratio: f64,
}

/// Factor `m = P·L·U`.
pub fn factor_lu(m: &DMatrix<f64>) -> LuFactors {
    let lu = m.clone().lu();

    let mut p = DMatrix::identity(m.nrows(), m.nrows());
    lu.p().inv_permute_rows(&mut p);

    LuFactors {
        system: None,
        p,
        l: lu.l(),
        u: lu.u(),
    }
}

/// Solve the square system `m·w = rhs`.
///
/// # Panics
/// Panics if `m` is not square.
pub fn solve_lu(m: &DMatrix<f64>, rhs: &DVector<f64>) -> LuSolution {
    let lu = m.clone().lu();
    let pivot_ratio = diagonal_ratio(&lu.u());

    LuSolution {
        w: lu.solve(rhs),
        pivot_ratio,
    }
}

/// `min|dᵢ| / max|dᵢ|` over the diagonal of a triangular factor.
pub fn diagonal_ratio(m: &DMatrix<f64>) -> f64 {
    let diag: Vec<f64> = (0..m.nrows().min(m.ncols())).map(|i| m[(i, i)].abs()).collect();
    let max = diag.iter().fold(0.0_f64, |acc, &v| acc.max(v));
    if max == 0.0 || !max.is_finite() {
        return 0.0;
    }
    let min = diag.iter().fold(f64::INFINITY, |acc, &v| acc.min(v));
    min / max
}
