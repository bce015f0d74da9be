//! ASCII plotting for terminal output.
//!
//! Fixed-size character grid with deterministic output.
//!
//! Plot elements:
//! - tabulated kp points: `o`
//! - piecewise polynomial: `-` line

use crate::domain::PolynomialPair;
use crate::report::{FittedPoint, fmt_sci};

/// Render tabulated kp points over the fitted piecewise polynomial.
pub fn render_fit_plot(fitted: &[FittedPoint], pair: &PolynomialPair, width: usize, height: usize) -> String {
    let (t_min, t_max) = temperature_range(fitted).unwrap_or((300.0, 3000.0));
    let curve = sample_curve(pair, t_min, t_max, width.max(2));
    let points: Vec<(f64, f64)> = fitted.iter().map(|f| (f.point.temperature, f.point.kp)).collect();
    render_plot(&points, &curve, t_min, t_max, width, height)
}

/// Render the piecewise polynomial alone over `[t_min, t_max]`.
pub fn render_curve_plot(pair: &PolynomialPair, t_min: f64, t_max: f64, width: usize, height: usize) -> String {
    let curve = sample_curve(pair, t_min, t_max, width.max(2));
    render_plot(&[], &curve, t_min, t_max, width, height)
}

fn render_plot(
    points: &[(f64, f64)],
    curve: &[(f64, f64)],
    t_min: f64,
    t_max: f64,
    width: usize,
    height: usize,
) -> String {
    let width = width.max(10);
    let height = height.max(5);

    let (y_min, y_max) = y_range(points, curve).unwrap_or((0.0, 1.0));
    let (y_min, y_max) = pad_range(y_min, y_max, 0.05);

    let mut grid = vec![vec![' '; width]; height];

    // Curve first so points overlay it.
    draw_curve(&mut grid, curve, t_min, t_max, y_min, y_max);

    for &(t, kp) in points {
        if !kp.is_finite() {
            continue;
        }
        let x = map_x(t, t_min, t_max, width);
        let y = map_y(kp, y_min, y_max, height);
        grid[y][x] = 'o';
    }

    let mut out = String::new();
    out.push_str(&format!(
        "Plot: T=[{t_min:.1}, {t_max:.1}] K | kp=[{}, {}]\n",
        fmt_sci(y_min, 3, false),
        fmt_sci(y_max, 3, false)
    ));

    for row in grid {
        out.push_str(&row.into_iter().collect::<String>());
        out.push('\n');
    }

    out
}

fn temperature_range(fitted: &[FittedPoint]) -> Option<(f64, f64)> {
    let mut min_t = f64::INFINITY;
    let mut max_t = f64::NEG_INFINITY;
    for f in fitted {
        min_t = min_t.min(f.point.temperature);
        max_t = max_t.max(f.point.temperature);
    }
    if min_t.is_finite() && max_t.is_finite() && max_t > min_t {
        Some((min_t, max_t))
    } else {
        None
    }
}

fn sample_curve(pair: &PolynomialPair, t_min: f64, t_max: f64, n: usize) -> Vec<(f64, f64)> {
    let n = n.max(2);
    let mut out = Vec::with_capacity(n);
    for i in 0..n {
        let u = i as f64 / (n as f64 - 1.0);
        let t = t_min + u * (t_max - t_min);
        out.push((t, pair.eval(t)));
    }
    out
}

fn y_range(points: &[(f64, f64)], curve: &[(f64, f64)]) -> Option<(f64, f64)> {
    let mut min_y = f64::INFINITY;
    let mut max_y = f64::NEG_INFINITY;

    for &(_, y) in points.iter().chain(curve) {
        if y.is_finite() {
            min_y = min_y.min(y);
            max_y = max_y.max(y);
        }
    }

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

fn map_x(t: f64, t_min: f64, t_max: f64, width: usize) -> usize {
    let width = width.max(2);
    let u = ((t - t_min) / (t_max - t_min)).clamp(0.0, 1.0);
    (u * (width as f64 - 1.0)).round() as usize
}

fn map_y(y: f64, y_min: f64, y_max: f64, height: usize) -> usize {
    let height = height.max(2);
    let u = ((y - y_min) / (y_max - y_min)).clamp(0.0, 1.0);
    // y=top is max -> row 0
    (height as f64 - 1.0 - (u * (height as f64 - 1.0))).round() as usize
}

fn draw_curve(grid: &mut [Vec<char>], curve: &[(f64, f64)], t_min: f64, t_max: f64, y_min: f64, y_max: f64) {
    if curve.len() < 2 {
        return;
    }
    let height = grid.len();
    let width = grid[0].len();

    let mut prev = None;
    for &(t, y) in curve {
        let x = map_x(t, t_min, t_max, width);
        let yy = map_y(y, y_min, y_max, height);
        if let Some((x0, y0)) = prev {
            draw_line(grid, x0, y0, x, yy, '-');
        } else {
            grid[yy][x] = '-';
        }
        prev = Some((x, yy));
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
    use crate::domain::KpPoint;

    fn fitted(t: f64, kp: f64, kp_fit: f64) -> FittedPoint {
        FittedPoint {
            point: KpPoint { temperature: t, kp },
            kp_fit,
            residual: kp - kp_fit,
        }
    }

    #[test]
    fn plot_golden_snapshot_small() {
        let pair = PolynomialPair {
            t_thresh: 800.0,
            low: vec![1.0],
            high: vec![1.0],
        };
        let points = vec![fitted(300.0, 1.0, 1.0), fitted(3000.0, 2.0, 1.0)];

        let txt = render_fit_plot(&points, &pair, 10, 5);
        let expected = concat!(
            "Plot: T=[300.0, 3000.0] K | kp=[9.500e-01, 2.050e+00]\n",
            "         o\n",
            "          \n",
            "          \n",
            "          \n",
            "o---------\n",
        );
        assert_eq!(txt, expected);
    }

    #[test]
    fn curve_plot_steps_at_threshold() {
        let pair = PolynomialPair {
            t_thresh: 1000.0,
            low: vec![0.0],
            high: vec![1.0],
        };
        let txt = render_curve_plot(&pair, 0.0, 2000.0, 11, 5);
        let rows: Vec<&str> = txt.lines().skip(1).collect();
        assert_eq!(rows.len(), 5);
        assert!(rows[0].ends_with("------"));
        assert!(rows[4].starts_with("-----"));
        assert!(rows.iter().all(|r| !r.contains('o')));
    }
}
