//! Householder QR for over-determined least squares.
//!
//! Nalgebra's `QR::solve` is intended for square systems and will panic for
//! tall matrices, so we apply `Qᵗ` to the target ourselves and back-substitute
//! against the `3 x 3` triangular factor:
//!
//! ```text
//! A = Q·R   =>   R·w = (Qᵗ·y)[0..3]
//! ```
//!
//! This never forms `AᵗA`, so the condition number of `A` is not squared.

use nalgebra::{DMatrix, DVector};

use crate::domain::{COEFF_COUNT, QrFactors};
use crate::math::lu::diagonal_ratio;

/// Result of a QR least-squares solve.
#[derive(Debug, Clone)]
pub struct QrSolution {
    /// `None` when a diagonal entry of `R` is exactly zero.
    pub w: Option<DVector<f64>>,
    /// `min|Rᵢᵢ| / max|Rᵢᵢ|`; `0.0` for a rank-deficient `A`.
    pub pivot_ratio: f64,
}

/// Factor `a = Q·R` with a full `N x N` orthogonal `Q`.
///
/// The full `Q` is quadratic in `N`; only build it when the factors are
/// going to be looked at.
pub fn factor_qr(a: &DMatrix<f64>) -> QrFactors {
    let n = a.nrows();
    let qr = a.clone().qr();

    let mut q_t = DMatrix::identity(n, n);
    qr.q_tr_mul(&mut q_t);
    let r = &q_t * a;

    QrFactors {
        q: q_t.transpose(),
        r,
    }
}

/// Least-squares solve of `a·w ≈ y` for a tall (`N >= 3`) `a`.
pub fn solve_qr(a: &DMatrix<f64>, y: &DVector<f64>) -> QrSolution {
    let qr = a.clone().qr();
    let r = qr.r();
    let pivot_ratio = diagonal_ratio(&r);

    let mut q_ty = y.clone();
    qr.q_tr_mul(&mut q_ty);
    let head = q_ty.rows(0, COEFF_COUNT).into_owned();

    QrSolution {
        w: r.solve_upper_triangular(&head),
        pivot_ratio,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn max_abs_diff(a: &DMatrix<f64>, b: &DMatrix<f64>) -> f64 {
        (a - b).iter().fold(0.0, |acc, v| acc.max(v.abs()))
    }

    fn tall_design() -> DMatrix<f64> {
        DMatrix::from_row_slice(
            5,
            3,
            &[
                0.0, 0.0, 1.0, //
                1.0, 1.0, 1.0, //
                4.0, 2.0, 1.0, //
                9.0, 3.0, 1.0, //
                16.0, 4.0, 1.0,
            ],
        )
    }

    #[test]
    fn factors_reconstruct_and_q_is_orthogonal() {
        let a = tall_design();
        let f = factor_qr(&a);

        assert_eq!(f.q.shape(), (5, 5));
        assert_eq!(f.r.shape(), (5, 3));
        assert!(max_abs_diff(&f.reconstruct(), &a) < 1e-10);
        assert!(max_abs_diff(&f.orthogonality(), &DMatrix::identity(5, 5)) < 1e-12);

        // Everything below the leading 3x3 block is rounding noise.
        for i in 0..5 {
            for j in 0..3 {
                if i > j {
                    assert!(f.r[(i, j)].abs() < 1e-10, "R[{i},{j}] = {}", f.r[(i, j)]);
                }
            }
        }
    }

    #[test]
    fn recovers_exact_quadratic() {
        let a = tall_design();
        // y = 2x^2 - 3x + 1 at x = 0..4
        let y = DVector::from_row_slice(&[1.0, 0.0, 3.0, 10.0, 21.0]);
        let sol = solve_qr(&a, &y);

        let w = sol.w.unwrap();
        assert!((w[0] - 2.0).abs() < 1e-9);
        assert!((w[1] + 3.0).abs() < 1e-9);
        assert!((w[2] - 1.0).abs() < 1e-9);
        assert!(sol.pivot_ratio > 1e-3);
    }
}
