//! Top-level application orchestration.
//!
//! `src/main.rs` is intentionally tiny; this module is the "real main" that:
//! - loads `.env` and installs the log subscriber
//! - parses CLI arguments
//! - runs the fit pipeline
//! - prints reports/plots
//! - writes optional exports

use std::fs;

use clap::Parser;
use tracing::info;
use tracing_subscriber::EnvFilter;

use crate::cli::{BatchArgs, Command, FitArgs, GenerateArgs, PlotArgs};
use crate::data::{SampleSpec, generate_samples};
use crate::domain::{Coefficients, FitConfig, SolveMethod};
use crate::error::AppError;
use crate::io::{ReportFile, format_samples, read_report_json, write_report_json};
use crate::plot::{render_ascii_plot, render_ascii_plot_from_report};
use crate::report::{format_report, format_summary};

pub mod pipeline;

/// Entry point for the `quadfit` binary.
pub fn run() -> Result<(), AppError> {
    // A missing .env is the normal case.
    let _ = dotenvy::dotenv();
    init_tracing();

    let argv = rewrite_args(std::env::args().collect());
    let cli = crate::cli::Cli::parse_from(argv);

    match cli.command {
        Command::Fit(args) => handle_fit(args),
        Command::Batch(args) => handle_batch(args),
        Command::Generate(args) => handle_generate(args),
        Command::Plot(args) => handle_plot(args),
    }
}

/// Logs go to stderr so stdout stays a clean transcript. `RUST_LOG` overrides
/// the default `warn` level.
fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .try_init();
}

fn handle_fit(args: FitArgs) -> Result<(), AppError> {
    let config = fit_config_from_args(&args);
    let run = pipeline::run_fit(&args.input, &config)?;

    println!("{}", format_report(&run.report));

    if args.plot {
        let plot = render_ascii_plot(
            &run.report.residuals,
            &run.report.coefficients,
            args.width,
            args.height,
        );
        println!("{plot}");
    }

    if let Some(path) = &args.export {
        let file = ReportFile::from_report(&run.report, &run.input, config.method);
        write_report_json(path, &file)?;
        info!(path = %path.display(), "wrote report");
    }

    Ok(())
}

fn handle_batch(args: BatchArgs) -> Result<(), AppError> {
    let config = FitConfig::with_method(SolveMethod::from_qr_flag(args.qr));
    let results = pipeline::run_batch(&args.inputs, &config)?;

    for (label, result) in &results {
        println!("{}", format_summary(label, result));
    }

    // Every file is reported; the exit code reflects the first failure.
    match results.into_iter().find_map(|(_, r)| r.err()) {
        Some(err) => Err(err.into()),
        None => Ok(()),
    }
}

fn handle_generate(args: GenerateArgs) -> Result<(), AppError> {
    let spec = SampleSpec {
        truth: Coefficients::new(args.a, args.b, args.c),
        count: args.count,
        x_min: args.x_min,
        x_max: args.x_max,
        noise: args.noise,
        seed: args.seed,
    };
    let text = format_samples(&generate_samples(&spec)?);

    match &args.output {
        Some(path) => fs::write(path, text).map_err(|e| {
            AppError::new(2, format!("Failed to write samples '{}': {e}", path.display()))
        })?,
        None => print!("{text}"),
    }
    Ok(())
}

fn handle_plot(args: PlotArgs) -> Result<(), AppError> {
    let file = read_report_json(&args.report)?;
    println!("{}", render_ascii_plot_from_report(&file, args.width, args.height));
    Ok(())
}

pub fn fit_config_from_args(args: &FitArgs) -> FitConfig {
    FitConfig {
        method: SolveMethod::from_qr_flag(args.qr),
        collect_diagnostics: !args.quiet,
        pivot_warn_ratio: args.pivot_warn,
    }
}

/// Rewrite argv so `quadfit` defaults to `quadfit fit`.
///
/// Rules:
/// - `quadfit`                          -> `quadfit fit`
/// - `quadfit data.txt --qr`            -> `quadfit fit data.txt --qr`
/// - `quadfit --qr`                     -> `quadfit fit --qr`
/// - `quadfit --help/--version/-h`      -> unchanged (show top-level help/version)
fn rewrite_args(mut argv: Vec<String>) -> Vec<String> {
    let Some(arg1) = argv.get(1).cloned() else {
        argv.push("fit".to_string());
        return argv;
    };

    let is_top_level_help_or_version = matches!(
        arg1.as_str(),
        "-h" | "--help" | "-V" | "--version" | "help"
    );
    if is_top_level_help_or_version {
        return argv;
    }

    let is_subcommand = matches!(arg1.as_str(), "fit" | "batch" | "generate" | "plot");
    if is_subcommand {
        return argv;
    }

    argv.insert(1, "fit".to_string());
    argv
}
