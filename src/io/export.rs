//! Read/write fit report JSON files.
//!
//! A report file is the portable representation of one fit:
//! - input label and solver choice
//! - coefficients and error metrics
//! - per-sample residuals (enough to re-plot without the input file)
//! - warnings raised during the solve

use std::fs::File;
use std::path::Path;

use chrono::{DateTime, Local};
use serde::{Deserialize, Serialize};

use crate::domain::{Coefficients, FitQuality, FitReport, FitWarning, Residual, SolveMethod, Strategy};
use crate::error::AppError;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReportFile {
    pub tool: String,
    pub generated: DateTime<Local>,
    pub input: String,
    pub method: SolveMethod,
    pub strategy: Strategy,
    pub coefficients: Coefficients,
    pub quality: FitQuality,
    pub residuals: Vec<Residual>,
    pub warnings: Vec<FitWarning>,
}

impl ReportFile {
    pub fn from_report(report: &FitReport, input: &str, method: SolveMethod) -> Self {
        Self {
            tool: "quadfit".to_string(),
            generated: Local::now(),
            input: input.to_string(),
            method,
            strategy: report.strategy,
            coefficients: report.coefficients,
            quality: report.quality,
            residuals: report.residuals.clone(),
            warnings: report.warnings.clone(),
        }
    }
}

/// Write a report JSON file.
pub fn write_report_json(path: &Path, file: &ReportFile) -> Result<(), AppError> {
    let out = File::create(path)
        .map_err(|e| AppError::new(2, format!("Failed to create report JSON '{}': {e}", path.display())))?;

    serde_json::to_writer_pretty(out, file)
        .map_err(|e| AppError::new(2, format!("Failed to write report JSON: {e}")))?;

    Ok(())
}

/// Read a report JSON file.
pub fn read_report_json(path: &Path) -> Result<ReportFile, AppError> {
    let file = File::open(path)
        .map_err(|e| AppError::new(2, format!("Failed to open report JSON '{}': {e}", path.display())))?;
    let report: ReportFile =
        serde_json::from_reader(file).map_err(|e| AppError::new(2, format!("Invalid report JSON: {e}")))?;
    Ok(report)
}
