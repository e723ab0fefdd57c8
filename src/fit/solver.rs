//! The three solver variants behind one capability: "solve for `w` given `A`, `y`".

use nalgebra::{DMatrix, DVector};

use crate::domain::{Factorization, LuFactors, Strategy};
use crate::error::FitError;
use crate::math::{factor_lu, factor_qr, normal_system, solve_lu, solve_qr};

/// Coefficient vector plus the conditioning signal of the factorization.
#[derive(Debug, Clone)]
pub struct Solution {
    pub w: DVector<f64>,
    pub pivot_ratio: f64,
}

/// Solve `A·w ≈ y` with the given variant.
///
/// `a` must have three columns and at least three rows (`Strategy::select`
/// guarantees this for the variant it returns).
pub fn solve_system(
    strategy: Strategy,
    a: &DMatrix<f64>,
    y: &DVector<f64>,
) -> Result<Solution, FitError> {
    let (w, pivot_ratio) = match strategy {
        Strategy::ExactLu => {
            let sol = solve_lu(a, y);
            (sol.w, sol.pivot_ratio)
        }
        Strategy::NormalEquationsLu => {
            let sys = normal_system(a, y);
            let sol = solve_lu(&sys.gram, &sys.rhs);
            (sol.w, sol.pivot_ratio)
        }
        Strategy::Qr => {
            let sol = solve_qr(a, y);
            (sol.w, sol.pivot_ratio)
        }
    };

    let w = w.ok_or_else(|| FitError::DegenerateSystem {
        strategy,
        detail: "zero pivot in triangular factor; x-values do not determine a quadratic".to_string(),
    })?;

    if !w.iter().all(|v| v.is_finite()) {
        return Err(FitError::DegenerateSystem {
            strategy,
            detail: "solution contains non-finite coefficients".to_string(),
        });
    }

    Ok(Solution { w, pivot_ratio })
}

/// Factors of the matrix the variant decomposes, for display.
pub fn factorize(strategy: Strategy, a: &DMatrix<f64>, y: &DVector<f64>) -> Factorization {
    match strategy {
        Strategy::ExactLu => Factorization::Lu(factor_lu(a)),
        Strategy::NormalEquationsLu => {
            let sys = normal_system(a, y);
            let factors = factor_lu(&sys.gram);
            Factorization::Lu(LuFactors {
                system: Some(sys),
                ..factors
            })
        }
        Strategy::Qr => Factorization::Qr(factor_qr(a)),
    }
}
