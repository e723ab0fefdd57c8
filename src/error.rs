//! Error types.
//!
//! Two layers:
//! - `FitError`: failures of the fitting core, one variant per condition so
//!   callers can tell them apart without string matching
//! - `AppError`: what the binary reports, carrying a process exit code
//!
//! Exit codes used by the binary:
//! - `2`: usage or I/O problems (missing file, bad flags, export failures)
//! - `3`: input data problems (malformed tokens, non-finite values, too few samples)
//! - `4`: numerical failures (singular system)

use crate::domain::Strategy;

/// Failure of a single fit request.
#[derive(Debug, Clone, PartialEq)]
pub enum FitError {
    /// Fewer than three samples; three unknowns cannot be determined.
    InsufficientSamples { found: usize },
    /// The factored matrix is singular and no solution could be produced.
    DegenerateSystem { strategy: Strategy, detail: String },
    /// A sample carries NaN or an infinity.
    NonFiniteSample { index: usize, x: f64, y: f64 },
    /// A token of the textual input could not be read as a finite real number.
    MalformedInput { position: usize, token: String },
}

impl FitError {
    /// Exit code the binary uses for this failure.
    pub fn exit_code(&self) -> u8 {
        match self {
            FitError::InsufficientSamples { .. }
            | FitError::NonFiniteSample { .. }
            | FitError::MalformedInput { .. } => 3,
            FitError::DegenerateSystem { .. } => 4,
        }
    }
}

impl std::fmt::Display for FitError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            FitError::InsufficientSamples { found } => write!(
                f,
                "There are not enough coordinates: need at least 3 samples, found {found}."
            ),
            FitError::DegenerateSystem { strategy, detail } => write!(
                f,
                "Degenerate system in {} solve: {detail}",
                strategy.display_name()
            ),
            FitError::NonFiniteSample { index, x, y } => write!(
                f,
                "Sample {} is not finite: ({x}, {y}).",
                index + 1
            ),
            FitError::MalformedInput { position, token } => write!(
                f,
                "Token {position} ('{token}') is not a finite real number."
            ),
        }
    }
}

impl std::error::Error for FitError {}

#[derive(Clone)]
pub struct AppError {
    exit_code: u8,
    message: String,
}

impl AppError {
    pub fn new(exit_code: u8, message: impl Into<String>) -> Self {
        Self {
            exit_code,
            message: message.into(),
        }
    }

    pub fn exit_code(&self) -> u8 {
        self.exit_code
    }
}

impl From<FitError> for AppError {
    fn from(err: FitError) -> Self {
        AppError::new(err.exit_code(), err.to_string())
    }
}

impl std::fmt::Display for AppError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.message)
    }
}

impl std::fmt::Debug for AppError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AppError")
            .field("exit_code", &self.exit_code)
            .field("message", &self.message)
            .finish()
    }
}

impl std::error::Error for AppError {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fit_errors_map_to_distinct_exit_codes() {
        let insufficient: AppError = FitError::InsufficientSamples { found: 2 }.into();
        let degenerate: AppError = FitError::DegenerateSystem {
            strategy: Strategy::ExactLu,
            detail: "zero pivot".to_string(),
        }
        .into();

        assert_eq!(insufficient.exit_code(), 3);
        assert_eq!(degenerate.exit_code(), 4);
        assert!(insufficient.to_string().contains("found 2"));
    }
}
