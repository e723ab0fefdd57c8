//! Curve fitting orchestration.
//!
//! Responsibilities:
//!
//! - dispatch to the exact-LU / normal-equations-LU / QR solver
//! - assemble a `FitReport` (coefficients, residuals, warnings, diagnostics)
//! - fit independent sample sets in parallel

pub mod batch;
pub mod fitter;
pub mod solver;

pub use batch::*;
pub use fitter::*;
pub use solver::*;
