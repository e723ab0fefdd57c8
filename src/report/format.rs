//! Terminal formatting for fit reports.
//!
//! We keep formatting code in one place so:
//! - the math/fitting code stays free of I/O
//! - output changes are localized (important for snapshot tests)

use nalgebra::{DMatrix, DVector};

use crate::domain::{Coefficients, Diagnostics, Factorization, FitReport};
use crate::error::FitError;

/// Significant digits used for matrix entries and coefficients.
const SIG_DIGITS: i32 = 6;

/// Format a full fit transcript: diagnostics (when collected), coefficients,
/// equation and error metrics.
pub fn format_report(report: &FitReport) -> String {
    let mut out = String::new();

    if let Some(diag) = &report.diagnostics {
        push_diagnostics(&mut out, diag);
    }

    out.push_str(&format!("Method: {}\n\n", report.strategy.display_name()));

    let w = DVector::from_row_slice(&report.coefficients.as_array());
    push_vector(&mut out, "Vector w:", &w);

    out.push_str(&format!("Equation: {}\n", format_equation(&report.coefficients)));
    out.push_str(&format!("Error: {}\n", fmt_num(report.quality.error)));
    out.push_str(&format!(
        "SSE: {} | RMSE: {} | n={}\n",
        fmt_num(report.quality.sse),
        fmt_num(report.quality.rmse),
        report.quality.n
    ));

    for warning in &report.warnings {
        out.push_str(&format!("Warning: {warning}\n"));
    }

    out
}

/// One-line summary of a fit, for batch output.
pub fn format_summary(label: &str, result: &Result<FitReport, FitError>) -> String {
    match result {
        Ok(report) => {
            let flag = if report.is_near_singular() { " [near-singular]" } else { "" };
            format!(
                "{label}: {} | n={} | {} | error={} | rmse={}{flag}",
                format_equation(&report.coefficients),
                report.quality.n,
                report.strategy.display_name(),
                fmt_num(report.quality.error),
                fmt_num(report.quality.rmse),
            )
        }
        Err(err) => format!("{label}: failed: {err}"),
    }
}

/// `y = a*x^2 + b*x + c` with six significant digits.
pub fn format_equation(w: &Coefficients) -> String {
    format!(
        "y = {}*x^2 + {}*x + {}",
        fmt_num(w.a),
        fmt_num(w.b),
        fmt_num(w.c)
    )
}

fn push_diagnostics(out: &mut String, diag: &Diagnostics) {
    push_matrix(out, "Matrix A:", &diag.design);
    push_vector(out, "Vector y:", &diag.target);

    match &diag.factorization {
        Factorization::Lu(f) => {
            let label = match &f.system {
                Some(sys) => {
                    push_matrix(out, "Matrix A Prime:", &sys.gram);
                    push_vector(out, "Vector Y Prime:", &sys.rhs);
                    "A Prime = P * L * U:"
                }
                None => "A = P * L * U:",
            };
            push_matrix(out, "Matrix P:", &f.p);
            push_matrix(out, "Matrix L:", &f.l);
            push_matrix(out, "Matrix U:", &f.u);
            push_matrix(out, label, &f.reconstruct());
        }
        Factorization::Qr(f) => {
            push_matrix(out, "Matrix Q:", &f.q);
            push_matrix(out, "Matrix R:", &f.r);
            push_matrix(out, "I = Q * Q^T:", &f.orthogonality());
            push_matrix(out, "A = Q * R:", &f.reconstruct());
        }
    }
}

fn push_vector(out: &mut String, title: &str, v: &DVector<f64>) {
    let m = DMatrix::from_column_slice(v.len(), 1, v.as_slice());
    push_matrix(out, title, &m);
}

fn push_matrix(out: &mut String, title: &str, m: &DMatrix<f64>) {
    out.push_str(title);
    out.push('\n');
    out.push_str(&format_matrix(m));
    out.push('\n');
}

/// Right-aligned columns separated by a single space, one row per line.
pub fn format_matrix(m: &DMatrix<f64>) -> String {
    let cells: Vec<Vec<String>> = (0..m.nrows())
        .map(|i| (0..m.ncols()).map(|j| fmt_num(m[(i, j)])).collect())
        .collect();
    let width = cells.iter().flatten().map(|c| c.len()).max().unwrap_or(0);

    let mut out = String::new();
    for row in cells {
        let line: Vec<String> = row.iter().map(|c| format!("{c:>width$}")).collect();
        out.push_str(&line.join(" "));
        out.push('\n');
    }
    out
}

/// Six significant digits, trailing zeros trimmed; scientific outside `[1e-5, 1e6)`.
pub fn fmt_num(v: f64) -> String {
    if v == 0.0 {
        return "0".to_string();
    }
    if !v.is_finite() {
        return format!("{v}");
    }

    let exp = v.abs().log10().floor() as i32;
    if !(-5..SIG_DIGITS).contains(&exp) {
        return format!("{:.*e}", (SIG_DIGITS - 1) as usize, v)
            .replace(".00000e", "e");
    }

    let decimals = (SIG_DIGITS - 1 - exp).max(0) as usize;
    let s = format!("{v:.decimals$}");
    let s = if s.contains('.') {
        s.trim_end_matches('0').trim_end_matches('.').to_string()
    } else {
        s
    };
    if s == "-0" { "0".to_string() } else { s }
}
