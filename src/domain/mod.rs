//! Domain types used throughout the pipeline.
//!
//! This module defines:
//!
//! - samples and caller preferences (`Sample`, `SolveMethod`, `FitConfig`)
//! - the closed set of solver variants (`Strategy`)
//! - fit outputs (`FitReport`, `Coefficients`, `FitQuality`, diagnostics)

pub mod types;

pub use types::*;
