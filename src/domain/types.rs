//! Shared domain types.
//!
//! The small value types (`Sample`, `Coefficients`, `FitQuality`, ...) are
//! serializable so they can be exported to JSON and reloaded for plotting.
//! The diagnostic matrices are plain nalgebra values and stay in memory.

use clap::ValueEnum;
use nalgebra::{DMatrix, DVector};
use serde::{Deserialize, Serialize};

use crate::error::FitError;

/// Number of unknowns in `y = a*x^2 + b*x + c`.
pub const COEFF_COUNT: usize = 3;

/// Default pivot ratio below which a solve is flagged as near-singular.
pub const DEFAULT_PIVOT_WARN_RATIO: f64 = 1e-10;

/// One observation `(x, y)`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Sample {
    pub x: f64,
    pub y: f64,
}

impl Sample {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    pub fn is_finite(&self) -> bool {
        self.x.is_finite() && self.y.is_finite()
    }
}

/// Caller preference for over-determined systems (`N > 3`).
///
/// It has no effect when exactly three samples are given: that system is
/// square and always solved exactly.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, ValueEnum)]
#[serde(rename_all = "kebab-case")]
pub enum SolveMethod {
    /// Form `AᵗA·w = Aᵗy` and solve the 3x3 system with LU.
    #[default]
    NormalEquations,
    /// Factor `A = Q·R` and back-substitute `R·w = Qᵗy`.
    Qr,
}

impl SolveMethod {
    pub fn from_qr_flag(qr: bool) -> Self {
        if qr {
            SolveMethod::Qr
        } else {
            SolveMethod::NormalEquations
        }
    }
}

/// The solver variant actually used for a fit.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Strategy {
    /// `N == 3`: square system, `A = P·L·U`.
    ExactLu,
    /// `N > 3`: Gram system `A′ = AᵗA = P·L·U`.
    NormalEquationsLu,
    /// `N > 3`: Householder `A = Q·R`.
    Qr,
}

impl Strategy {
    /// Pick the solver variant for `n` samples.
    ///
    /// The choice changes numerical results, not just speed, so it depends on
    /// nothing but `n` and `method`.
    pub fn select(n: usize, method: SolveMethod) -> Result<Strategy, FitError> {
        match n {
            n if n < COEFF_COUNT => Err(FitError::InsufficientSamples { found: n }),
            COEFF_COUNT => Ok(Strategy::ExactLu),
            _ => Ok(match method {
                SolveMethod::NormalEquations => Strategy::NormalEquationsLu,
                SolveMethod::Qr => Strategy::Qr,
            }),
        }
    }

    /// Human-readable label for terminal output.
    pub fn display_name(self) -> &'static str {
        match self {
            Strategy::ExactLu => "exact LU",
            Strategy::NormalEquationsLu => "normal-equations LU",
            Strategy::Qr => "QR",
        }
    }
}

/// Fitted coefficients of `y = a*x^2 + b*x + c`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Coefficients {
    pub a: f64,
    pub b: f64,
    pub c: f64,
}

impl Coefficients {
    pub fn new(a: f64, b: f64, c: f64) -> Self {
        Self { a, b, c }
    }

    /// Build from a solved vector `w = [a, b, c]`.
    ///
    /// # Panics
    /// Panics if `w` has fewer than three entries.
    pub fn from_vector(w: &DVector<f64>) -> Self {
        Self::new(w[0], w[1], w[2])
    }

    pub fn as_array(&self) -> [f64; COEFF_COUNT] {
        [self.a, self.b, self.c]
    }

    pub fn predict(&self, x: f64) -> f64 {
        self.a * x * x + self.b * x + self.c
    }

    pub fn is_finite(&self) -> bool {
        self.as_array().iter().all(|v| v.is_finite())
    }
}

impl std::fmt::Display for Coefficients {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "y = {}*x^2 + {}*x + {}", self.a, self.b, self.c)
    }
}

/// Fitted value and residual for one sample.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Residual {
    pub sample: Sample,
    pub fitted: f64,
    /// `y - fitted`.
    pub residual: f64,
}

/// Aggregate error metrics of a fit.
///
/// `error` is the plain signed sum of residuals. Over- and under-shoot cancel,
/// so a poor fit can still report an `error` near zero; `sse`/`rmse` are the
/// squared metrics and are always reported next to it.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct FitQuality {
    pub n: usize,
    pub error: f64,
    pub sse: f64,
    pub rmse: f64,
}

/// A condition that did not stop the fit but makes the result less reliable.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "kebab-case")]
pub enum FitWarning {
    /// `min|pivot| / max|pivot|` of the triangular factor fell below the
    /// configured ratio; collinear or duplicate x-values are the usual cause.
    NearSingular { strategy: Strategy, pivot_ratio: f64 },
}

impl std::fmt::Display for FitWarning {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            FitWarning::NearSingular {
                strategy,
                pivot_ratio,
            } => write!(
                f,
                "{} system is near-singular (pivot ratio {pivot_ratio:.3e}); coefficients may be unreliable",
                strategy.display_name()
            ),
        }
    }
}

/// Knobs for a single fit.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FitConfig {
    pub method: SolveMethod,
    /// Keep the design matrix and decomposition factors in the report.
    pub collect_diagnostics: bool,
    /// Pivot ratio below which `FitWarning::NearSingular` is raised.
    pub pivot_warn_ratio: f64,
}

impl Default for FitConfig {
    fn default() -> Self {
        Self {
            method: SolveMethod::NormalEquations,
            collect_diagnostics: false,
            pivot_warn_ratio: DEFAULT_PIVOT_WARN_RATIO,
        }
    }
}

impl FitConfig {
    pub fn with_method(method: SolveMethod) -> Self {
        Self {
            method,
            ..Self::default()
        }
    }
}

/// Gram system of the normal equations: `A′ = AᵗA`, `y′ = Aᵗy`.
#[derive(Debug, Clone, PartialEq)]
pub struct NormalSystem {
    pub gram: DMatrix<f64>,
    pub rhs: DVector<f64>,
}

/// Row-pivoted LU factors, `M = P·L·U`.
#[derive(Debug, Clone, PartialEq)]
pub struct LuFactors {
    /// Present when `M` is the Gram matrix rather than `A` itself.
    pub system: Option<NormalSystem>,
    pub p: DMatrix<f64>,
    /// Unit lower-triangular.
    pub l: DMatrix<f64>,
    /// Upper-triangular.
    pub u: DMatrix<f64>,
}

impl LuFactors {
    pub fn reconstruct(&self) -> DMatrix<f64> {
        &self.p * &self.l * &self.u
    }
}

/// Householder QR factors, `A = Q·R`.
#[derive(Debug, Clone, PartialEq)]
pub struct QrFactors {
    /// Full `N x N` orthogonal factor.
    pub q: DMatrix<f64>,
    /// `Qᵗ·A`, an `N x 3` matrix whose rows below the third are zero.
    pub r: DMatrix<f64>,
}

impl QrFactors {
    pub fn reconstruct(&self) -> DMatrix<f64> {
        &self.q * &self.r
    }

    /// `Q·Qᵗ`, the identity up to rounding.
    pub fn orthogonality(&self) -> DMatrix<f64> {
        &self.q * self.q.transpose()
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum Factorization {
    Lu(LuFactors),
    Qr(QrFactors),
}

/// Intermediate matrices of a fit, kept for display only.
#[derive(Debug, Clone, PartialEq)]
pub struct Diagnostics {
    pub design: DMatrix<f64>,
    pub target: DVector<f64>,
    pub factorization: Factorization,
}

/// All outputs of a single fit.
#[derive(Debug, Clone, PartialEq)]
pub struct FitReport {
    pub strategy: Strategy,
    pub coefficients: Coefficients,
    pub quality: FitQuality,
    pub residuals: Vec<Residual>,
    pub warnings: Vec<FitWarning>,
    pub diagnostics: Option<Diagnostics>,
}

impl FitReport {
    /// Signed sum of residuals.
    pub fn error(&self) -> f64 {
        self.quality.error
    }

    pub fn is_near_singular(&self) -> bool {
        self.warnings
            .iter()
            .any(|w| matches!(w, FitWarning::NearSingular { .. }))
    }
}
