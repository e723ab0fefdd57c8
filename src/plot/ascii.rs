//! ASCII plotting for terminal output.
//!
//! This is intentionally "dumb" (fixed-size grid), optimized for:
//! - quick visual sanity checks in a terminal
//! - deterministic output (helpful for golden tests)
//!
//! Plot elements:
//! - observed samples: `o`
//! - fitted parabola: `-` line

use crate::domain::{Coefficients, Residual};
use crate::io::export::ReportFile;

/// Render samples and the fitted parabola over the samples' x-range.
pub fn render_ascii_plot(
    residuals: &[Residual],
    coefficients: &Coefficients,
    width: usize,
    height: usize,
) -> String {
    let (x_min, x_max) = x_range(residuals).unwrap_or((-1.0, 1.0));
    let curve = sample_curve(coefficients, x_min, x_max, width.max(2));
    render_plot(residuals, &curve, x_min, x_max, width, height)
}

/// Render a plot from a saved report file.
pub fn render_ascii_plot_from_report(file: &ReportFile, width: usize, height: usize) -> String {
    render_ascii_plot(&file.residuals, &file.coefficients, width, height)
}

fn render_plot(
    residuals: &[Residual],
    curve: &[(f64, f64)],
    x_min: f64,
    x_max: f64,
    width: usize,
    height: usize,
) -> String {
    let width = width.max(10);
    let height = height.max(5);

    let (y_min, y_max) = y_range(residuals, curve).unwrap_or((0.0, 1.0));
    let (y_min, y_max) = pad_range(y_min, y_max, 0.05);

    let mut grid = vec![vec![' '; width]; height];

    // Curve first so samples overlay it.
    draw_curve(&mut grid, curve, x_min, x_max, y_min, y_max);

    for r in residuals {
        let col = map_x(r.sample.x, x_min, x_max, width);
        let row = map_y(r.sample.y, y_min, y_max, height);
        grid[row][col] = 'o';
    }

    let mut out = String::new();
    out.push_str(&format!(
        "Plot: x=[{x_min:.3}, {x_max:.3}] | y=[{y_min:.2}, {y_max:.2}]\n"
    ));
    for row in grid {
        out.push_str(&row.into_iter().collect::<String>());
        out.push('\n');
    }
    out
}

fn x_range(residuals: &[Residual]) -> Option<(f64, f64)> {
    let mut min_x = f64::INFINITY;
    let mut max_x = f64::NEG_INFINITY;
    for r in residuals {
        min_x = min_x.min(r.sample.x);
        max_x = max_x.max(r.sample.x);
    }
    if min_x.is_finite() && max_x.is_finite() && max_x > min_x {
        Some((min_x, max_x))
    } else {
        None
    }
}

fn sample_curve(w: &Coefficients, x_min: f64, x_max: f64, n: usize) -> Vec<(f64, f64)> {
    let n = n.max(2);
    (0..n)
        .map(|i| {
            let u = i as f64 / (n as f64 - 1.0);
            let x = x_min + u * (x_max - x_min);
            (x, w.predict(x))
        })
        .collect()
}

fn y_range(residuals: &[Residual], curve: &[(f64, f64)]) -> Option<(f64, f64)> {
    let ys = residuals
        .iter()
        .map(|r| r.sample.y)
        .chain(curve.iter().map(|&(_, y)| y));

    let (min_y, max_y) = ys.fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), y| {
        (lo.min(y), hi.max(y))
    });

    if min_y.is_finite() && max_y.is_finite() && max_y > min_y {
        Some((min_y, max_y))
    } else {
        None
    }
}

fn pad_range(min: f64, max: f64, frac: f64) -> (f64, f64) {
    let span = (max - min).abs();
    let pad = (span * frac).max(1e-12);
    (min - pad, max + pad)
}

fn map_x(x: f64, x_min: f64, x_max: f64, width: usize) -> usize {
    let width = width.max(2);
    let u = ((x - x_min) / (x_max - x_min)).clamp(0.0, 1.0);
    (u * (width as f64 - 1.0)).round() as usize
}

fn map_y(y: f64, y_min: f64, y_max: f64, height: usize) -> usize {
    let height = height.max(2);
    let u = ((y - y_min) / (y_max - y_min)).clamp(0.0, 1.0);
    // y=top is max -> row 0
    (height as f64 - 1.0 - (u * (height as f64 - 1.0))).round() as usize
}

fn draw_curve(grid: &mut [Vec<char>], curve: &[(f64, f64)], x_min: f64, x_max: f64, y_min: f64, y_max: f64) {
    if curve.len() < 2 {
        return;
    }
    let height = grid.len();
    let width = grid[0].len();

    let mut prev = None;
    for &(x, y) in curve {
        let col = map_x(x, x_min, x_max, width);
        let row = map_y(y, y_min, y_max, height);
        if let Some((c0, r0)) = prev {
            draw_line(grid, c0, r0, col, row, '-');
        } else {
            grid[row][col] = '-';
        }
        prev = Some((col, row));
    }
}

/// Integer line drawing (Bresenham-ish).
fn draw_line(grid: &mut [Vec<char>], x0: usize, y0: usize, x1: usize, y1: usize, ch: char) {
    let mut x0 = x0 as isize;
    let mut y0 = y0 as isize;
    let x1 = x1 as isize;
    let y1 = y1 as isize;

    let dx = (x1 - x0).abs();
    let sx = if x0 < x1 { 1 } else { -1 };
    let dy = -(y1 - y0).abs();
    let sy = if y0 < y1 { 1 } else { -1 };
    let mut err = dx + dy;

    loop {
        if y0 >= 0
            && (y0 as usize) < grid.len()
            && x0 >= 0
            && (x0 as usize) < grid[0].len()
            && grid[y0 as usize][x0 as usize] == ' '
        {
            grid[y0 as usize][x0 as usize] = ch;
        }

        if x0 == x1 && y0 == y1 {
            break;
        }
        let e2 = 2 * err;
        if e2 >= dy {
            err += dy;
            x0 += sx;
        }
        if e2 <= dx {
            err += dx;
            y0 += sy;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::Sample;

    fn residual(x: f64, y: f64, w: &Coefficients) -> Residual {
        let fitted = w.predict(x);
        Residual {
            sample: Sample::new(x, y),
            fitted,
            residual: y - fitted,
        }
    }

    #[test]
    fn plot_golden_snapshot_flat_line() {
        let w = Coefficients::new(0.0, 0.0, 100.0);
        let points = vec![residual(1.0, 100.0, &w), residual(10.0, 110.0, &w)];

        let txt = render_ascii_plot(&points, &w, 10, 5);
        let expected = concat!(
            "Plot: x=[1.000, 10.000] | y=[99.50, 110.50]\n",
            "         o\n",
            "          \n",
            "          \n",
            "          \n",
            "o---------\n",
        );
        assert_eq!(txt, expected);
    }

    #[test]
    fn parabola_touches_both_top_corners() {
        let w = Coefficients::new(1.0, 0.0, 0.0);
        let points: Vec<Residual> = [-2.0, 0.0, 2.0]
            .iter()
            .map(|&x| residual(x, x * x, &w))
            .collect();

        let txt = render_ascii_plot(&points, &w, 21, 7);
        let rows: Vec<&str> = txt.lines().skip(1).collect();
        assert_eq!(rows.len(), 7);
        assert!(rows[0].starts_with('o') && rows[0].ends_with('o'));
        assert_eq!(rows[6].chars().nth(10), Some('o'));
    }
}
