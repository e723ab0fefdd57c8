//! End-to-end properties of the quadratic fitter.
//!
//! ## Test Organization
//!
//! 1. **Exact recovery** - noiseless samples recover the generating quadratic
//! 2. **Solver agreement** - QR and normal equations minimize the same objective
//! 3. **Factor bookkeeping** - P·L·U and Q·R reconstruct their matrices
//! 4. **Error metric** - the reported error is a signed sum
//! 5. **Failure modes** - too few samples, degenerate x-values

use approx::assert_relative_eq;
use nalgebra::DMatrix;

use quadfit::data::{SampleSpec, generate_samples};
use quadfit::domain::{Factorization, FitConfig, Sample, SolveMethod, Strategy};
use quadfit::error::FitError;
use quadfit::fit::fit_quadratic;
use quadfit::io::parse_samples;

fn on_quadratic(a: f64, b: f64, c: f64, xs: &[f64]) -> Vec<Sample> {
    xs.iter().map(|&x| Sample::new(x, a * x * x + b * x + c)).collect()
}

fn with_diagnostics(method: SolveMethod) -> FitConfig {
    FitConfig {
        collect_diagnostics: true,
        ..FitConfig::with_method(method)
    }
}

fn assert_matrix_close(actual: &DMatrix<f64>, expected: &DMatrix<f64>, tol: f64) {
    assert_eq!(actual.shape(), expected.shape());
    for (x, y) in actual.iter().zip(expected.iter()) {
        assert!((x - y).abs() <= tol * (1.0 + y.abs()), "{x} vs {y}");
    }
}

// ============================================================================
// Exact Recovery Tests
// ============================================================================

/// (0,1), (1,2), (2,5) lie on y = x^2 + 1.
#[test]
fn test_three_point_scenario() {
    let samples = parse_samples("0 1\n1 2\n2 5\n").unwrap();
    let report = fit_quadratic(&samples, &FitConfig::default()).unwrap();

    assert_eq!(report.strategy, Strategy::ExactLu);
    assert_relative_eq!(report.coefficients.a, 1.0, epsilon = 1e-12);
    assert_relative_eq!(report.coefficients.b, 0.0, epsilon = 1e-12);
    assert_relative_eq!(report.coefficients.c, 1.0, epsilon = 1e-12);
    assert_relative_eq!(report.error(), 0.0, epsilon = 1e-12);
}

/// Five samples on y = 2x^2 - 3x + 1 through the default path.
#[test]
fn test_five_point_normal_equations_scenario() {
    let samples = on_quadratic(2.0, -3.0, 1.0, &[-2.0, -1.0, 0.0, 1.0, 2.0]);
    let report = fit_quadratic(&samples, &FitConfig::default()).unwrap();

    assert_eq!(report.strategy, Strategy::NormalEquationsLu);
    assert_relative_eq!(report.coefficients.a, 2.0, max_relative = 1e-9);
    assert_relative_eq!(report.coefficients.b, -3.0, max_relative = 1e-9);
    assert_relative_eq!(report.coefficients.c, 1.0, max_relative = 1e-9);
    assert_relative_eq!(report.error(), 0.0, epsilon = 1e-9);
}

/// Noiseless seeded samples are recovered by every path.
#[test]
fn test_recovery_on_generated_samples() {
    for (count, seed) in [(3, 1), (4, 2), (10, 3), (200, 4)] {
        let spec = SampleSpec {
            truth: quadfit::Coefficients::new(-0.75, 4.0, 12.5),
            count,
            x_min: -3.0,
            x_max: 3.0,
            noise: 0.0,
            seed,
        };
        let samples = generate_samples(&spec).unwrap();

        for method in [SolveMethod::NormalEquations, SolveMethod::Qr] {
            let report = fit_quadratic(&samples, &FitConfig::with_method(method)).unwrap();
            assert_relative_eq!(report.coefficients.a, -0.75, max_relative = 1e-9);
            assert_relative_eq!(report.coefficients.b, 4.0, max_relative = 1e-9);
            assert_relative_eq!(report.coefficients.c, 12.5, max_relative = 1e-9);
            assert!(report.error().abs() < 1e-8 * count as f64);
        }
    }
}

/// With exactly three samples A·w reproduces y.
#[test]
fn test_exact_solve_satisfies_system() {
    let samples = vec![Sample::new(-3.0, 2.0), Sample::new(0.25, -1.0), Sample::new(4.0, 8.0)];
    let report = fit_quadratic(&samples, &with_diagnostics(SolveMethod::NormalEquations)).unwrap();
    let diag = report.diagnostics.unwrap();

    let w = nalgebra::DVector::from_row_slice(&report.coefficients.as_array());
    let fitted = &diag.design * w;
    for i in 0..3 {
        assert_relative_eq!(fitted[i], diag.target[i], epsilon = 1e-10);
    }
}

// ============================================================================
// Solver Agreement Tests
// ============================================================================

/// QR and normal equations agree on noisy, well-conditioned data.
#[test]
fn test_qr_and_normal_equations_agree() {
    let spec = SampleSpec {
        truth: quadfit::Coefficients::new(0.5, -2.0, 3.0),
        count: 60,
        x_min: -5.0,
        x_max: 5.0,
        noise: 0.8,
        seed: 2024,
    };
    let samples = generate_samples(&spec).unwrap();

    let normal = fit_quadratic(&samples, &FitConfig::with_method(SolveMethod::NormalEquations)).unwrap();
    let qr = fit_quadratic(&samples, &FitConfig::with_method(SolveMethod::Qr)).unwrap();

    assert_eq!(qr.strategy, Strategy::Qr);
    assert_relative_eq!(normal.coefficients.a, qr.coefficients.a, epsilon = 1e-6);
    assert_relative_eq!(normal.coefficients.b, qr.coefficients.b, epsilon = 1e-6);
    assert_relative_eq!(normal.coefficients.c, qr.coefficients.c, epsilon = 1e-6);
    assert_relative_eq!(normal.quality.sse, qr.quality.sse, max_relative = 1e-9);
}

// ============================================================================
// Factor Bookkeeping Tests
// ============================================================================

#[test]
fn test_plu_reconstructs_design_for_exact_solve() {
    let samples = on_quadratic(1.0, 1.0, 1.0, &[3.0, -1.0, 0.5]);
    let report = fit_quadratic(&samples, &with_diagnostics(SolveMethod::NormalEquations)).unwrap();
    let diag = report.diagnostics.unwrap();

    let Factorization::Lu(f) = &diag.factorization else {
        panic!("exact solve should use LU");
    };
    assert!(f.system.is_none());
    assert_matrix_close(&f.reconstruct(), &diag.design, 1e-12);
}

#[test]
fn test_plu_reconstructs_gram_matrix() {
    let samples = on_quadratic(1.0, -1.0, 2.0, &[0.0, 1.0, 2.0, 3.0, 4.0, 5.0, 6.0]);
    let report = fit_quadratic(&samples, &with_diagnostics(SolveMethod::NormalEquations)).unwrap();
    let diag = report.diagnostics.unwrap();

    let Factorization::Lu(f) = &diag.factorization else {
        panic!("normal equations should use LU");
    };
    let sys = f.system.as_ref().unwrap();
    assert_matrix_close(&sys.gram, &(diag.design.transpose() * &diag.design), 1e-12);
    assert_matrix_close(&f.reconstruct(), &sys.gram, 1e-12);
}

#[test]
fn test_qr_reconstructs_design() {
    let samples = on_quadratic(1.0, -1.0, 2.0, &[0.0, 1.0, 2.0, 3.0, 4.0, 5.0]);
    let report = fit_quadratic(&samples, &with_diagnostics(SolveMethod::Qr)).unwrap();
    let diag = report.diagnostics.unwrap();

    let Factorization::Qr(f) = &diag.factorization else {
        panic!("qr preference should use QR");
    };
    assert_matrix_close(&f.reconstruct(), &diag.design, 1e-10);
    assert_matrix_close(&f.orthogonality(), &DMatrix::identity(6, 6), 1e-12);
}

// ============================================================================
// Error Metric Tests
// ============================================================================

/// The error metric cancels: residuals of a least-squares fit with an
/// intercept are orthogonal to the ones column, so their signed sum is ~0
/// even when the squared error is large.
#[test]
fn test_error_is_signed_sum() {
    // y = x^3 at symmetric x; the best quadratic is y = 8.2x, residuals
    // are -2.4, 7.2, -7.2, 2.4.
    let samples = vec![
        Sample::new(-3.0, -27.0),
        Sample::new(-1.0, -1.0),
        Sample::new(1.0, 1.0),
        Sample::new(3.0, 27.0),
    ];
    let report = fit_quadratic(&samples, &FitConfig::default()).unwrap();
    let signed: f64 = report.residuals.iter().map(|r| r.residual).sum();

    assert_relative_eq!(report.coefficients.b, 8.2, max_relative = 1e-9);
    assert_relative_eq!(report.error(), signed, epsilon = 1e-12);
    assert!(report.error().abs() < 1e-9);
    assert_relative_eq!(report.quality.sse, 115.2, max_relative = 1e-9);
}

// ============================================================================
// Failure Mode Tests
// ============================================================================

#[test]
fn test_fewer_than_three_samples() {
    for n in 0..3 {
        let samples = on_quadratic(1.0, 0.0, 0.0, &[0.0, 1.0][..n]);
        let err = fit_quadratic(&samples, &FitConfig::with_method(SolveMethod::Qr)).unwrap_err();
        assert_eq!(err, FitError::InsufficientSamples { found: samples.len() });
    }
}

#[test]
fn test_identical_x_values_are_flagged() {
    let samples = vec![
        Sample::new(1.5, 1.0),
        Sample::new(1.5, 2.0),
        Sample::new(1.5, 3.0),
        Sample::new(1.5, 4.0),
        Sample::new(1.5, 5.0),
    ];
    for method in [SolveMethod::NormalEquations, SolveMethod::Qr] {
        match fit_quadratic(&samples, &FitConfig::with_method(method)) {
            Ok(report) => assert!(report.is_near_singular(), "{method:?} did not flag the system"),
            Err(err) => assert!(matches!(err, FitError::DegenerateSystem { .. })),
        }
    }
}
