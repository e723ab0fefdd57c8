//! Normal equations `AᵗA·w = Aᵗy`.
//!
//! The Gram matrix is `3 x 3` no matter how many samples there are, which keeps
//! the solve cheap, at the price of squaring the condition number of `A`.

use nalgebra::{DMatrix, DVector};

use crate::domain::NormalSystem;

/// Form `A′ = AᵗA` and `y′ = Aᵗy`.
pub fn normal_system(a: &DMatrix<f64>, y: &DVector<f64>) -> NormalSystem {
    NormalSystem {
        gram: a.tr_mul(a),
        rhs: a.tr_mul(y),
    }
}
