//! Command-line parsing for the quadratic fitter.
//!
//! The goal of this module is to keep **argument parsing** and **command dispatch**
//! separate from the numerical code.

use std::path::PathBuf;

use clap::{Parser, Subcommand};

use crate::domain::DEFAULT_PIVOT_WARN_RATIO;

/// Top-level CLI.
#[derive(Debug, Parser)]
#[command(name = "quadfit", version, about = "Least-squares quadratic fit (LU / QR)")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

/// CLI subcommands.
#[derive(Debug, Subcommand)]
pub enum Command {
    /// Fit y = a*x^2 + b*x + c to one input file and print the diagnostics.
    ///
    /// This is the default when no subcommand is given.
    Fit(FitArgs),
    /// Fit several input files independently (in parallel) and print one line each.
    Batch(BatchArgs),
    /// Write synthetic samples drawn around a known quadratic.
    Generate(GenerateArgs),
    /// Plot a previously exported report JSON.
    Plot(PlotArgs),
}

/// Options for a single fit.
#[derive(Debug, Parser, Clone)]
pub struct FitArgs {
    /// Input file of whitespace-separated `x y` pairs.
    #[arg(default_value = "input.txt", env = "QUADFIT_INPUT")]
    pub input: PathBuf,

    /// Solve over-determined systems (more than 3 samples) with QR instead of
    /// the normal equations.
    #[arg(long)]
    pub qr: bool,

    /// Skip the intermediate matrices and print only the result.
    #[arg(short, long)]
    pub quiet: bool,

    /// Render an ASCII plot of the samples and the fitted parabola.
    #[arg(long)]
    pub plot: bool,

    /// Plot width (columns).
    #[arg(long, default_value_t = 72)]
    pub width: usize,

    /// Plot height (rows).
    #[arg(long, default_value_t = 20)]
    pub height: usize,

    /// Export the fit (coefficients, residuals, warnings) to JSON.
    #[arg(long)]
    pub export: Option<PathBuf>,

    /// Pivot ratio below which the solve is reported as near-singular.
    #[arg(long, default_value_t = DEFAULT_PIVOT_WARN_RATIO)]
    pub pivot_warn: f64,
}

/// Options for fitting several files.
#[derive(Debug, Parser, Clone)]
pub struct BatchArgs {
    /// Input files of whitespace-separated `x y` pairs.
    #[arg(required = true)]
    pub inputs: Vec<PathBuf>,

    /// Use QR for over-determined systems.
    #[arg(long)]
    pub qr: bool,
}

/// Options for synthetic sample generation.
#[derive(Debug, Parser, Clone)]
pub struct GenerateArgs {
    /// Quadratic coefficient.
    #[arg(long, allow_negative_numbers = true, default_value_t = 1.0)]
    pub a: f64,

    /// Linear coefficient.
    #[arg(long, allow_negative_numbers = true, default_value_t = 0.0)]
    pub b: f64,

    /// Constant term.
    #[arg(long, allow_negative_numbers = true, default_value_t = 0.0)]
    pub c: f64,

    /// Number of samples.
    #[arg(short = 'n', long, default_value_t = 20)]
    pub count: usize,

    /// Lower end of the x range.
    #[arg(long, allow_negative_numbers = true, default_value_t = -5.0)]
    pub x_min: f64,

    /// Upper end of the x range.
    #[arg(long, allow_negative_numbers = true, default_value_t = 5.0)]
    pub x_max: f64,

    /// Standard deviation of Gaussian noise added to y.
    #[arg(long, default_value_t = 0.0)]
    pub noise: f64,

    /// Random seed.
    #[arg(long, default_value_t = 42)]
    pub seed: u64,

    /// Write to this file instead of stdout.
    #[arg(short, long)]
    pub output: Option<PathBuf>,
}

/// Options for plotting a saved report.
#[derive(Debug, Parser)]
pub struct PlotArgs {
    /// Report JSON file produced by `quadfit fit --export`.
    #[arg(long, value_name = "JSON")]
    pub report: PathBuf,

    /// Plot width (columns).
    #[arg(long, default_value_t = 72)]
    pub width: usize,

    /// Plot height (rows).
    #[arg(long, default_value_t = 20)]
    pub height: usize,
}
