//! `quadfit` library crate.
//!
//! Fits `y = a*x^2 + b*x + c` to `(x, y)` samples by least squares, choosing
//! between an exact LU solve (three samples), LU on the normal equations, and
//! a Householder QR solve.
//!
//! The binary (`quadfit`) is a thin wrapper around this library so that:
//!
//! - core logic is testable without spawning processes
//! - the numerical code never does I/O; printing lives in `report`/`plot`

pub mod app;
pub mod cli;
pub mod data;
pub mod domain;
pub mod error;
pub mod fit;
pub mod io;
pub mod math;
pub mod plot;
pub mod report;

pub use domain::{Coefficients, FitConfig, FitReport, Sample, SolveMethod, Strategy};
pub use error::{AppError, FitError};
pub use fit::{fit_batch, fit_quadratic};
