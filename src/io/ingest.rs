//! Sample ingest.
//!
//! The input format is a stream of whitespace-separated real numbers read two
//! at a time as `x y`. Line breaks carry no meaning.
//!
//! Rules:
//! - every token that forms a pair must parse as a finite `f64`; the first
//!   one that does not is reported with its 1-based position
//! - a dangling final token (odd token count) is dropped with a warning

use std::fs;
use std::path::Path;

use tracing::{info, warn};

use crate::domain::Sample;
use crate::error::{AppError, FitError};

/// Parse `x y` pairs from text.
pub fn parse_samples(text: &str) -> Result<Vec<Sample>, FitError> {
    let tokens: Vec<&str> = text.split_whitespace().collect();

    if tokens.len() % 2 == 1 {
        warn!(
            token = tokens[tokens.len() - 1],
            "ignoring dangling token without a y-value"
        );
    }

    tokens
        .chunks_exact(2)
        .enumerate()
        .map(|(idx, pair)| {
            let x = parse_token(pair[0], 2 * idx + 1)?;
            let y = parse_token(pair[1], 2 * idx + 2)?;
            Ok(Sample::new(x, y))
        })
        .collect()
}

fn parse_token(token: &str, position: usize) -> Result<f64, FitError> {
    match token.parse::<f64>() {
        Ok(v) if v.is_finite() => Ok(v),
        _ => Err(FitError::MalformedInput {
            position,
            token: token.to_string(),
        }),
    }
}

/// Read and parse a sample file.
pub fn load_samples(path: &Path) -> Result<Vec<Sample>, AppError> {
    let text = fs::read_to_string(path).map_err(|e| {
        AppError::new(
            2,
            format!("Input file '{}' can not be read: {e}", path.display()),
        )
    })?;

    let samples = parse_samples(&text).map_err(|e| {
        AppError::new(e.exit_code(), format!("{}: {e}", path.display()))
    })?;
    info!(path = %path.display(), n = samples.len(), "loaded samples");
    Ok(samples)
}

/// Render samples in the input format, one pair per line.
pub fn format_samples(samples: &[Sample]) -> String {
    let mut out = String::with_capacity(samples.len() * 24);
    for s in samples {
        out.push_str(&format!("{} {}\n", s.x, s.y));
    }
    out
}
