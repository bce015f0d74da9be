//! Trapezoidal quadrature over sampled data.
//!
//! The spectral grids here are uniform, but the `lp` path integrates over
//! `u = c2 ν / T`, and callers may pass arbitrary sample positions, so the rule
//! works on any (possibly non-uniform) monotone grid.

use crate::error::AppError;

/// Integrate `y(x)` with the trapezoidal rule.
///
/// Fewer than two samples integrate to zero. Mismatched lengths are an error.
pub fn trapz(y: &[f64], x: &[f64]) -> Result<f64, AppError> {
    if y.len() != x.len() {
        return Err(AppError::new(
            4,
            format!("trapz: length mismatch (y={}, x={}).", y.len(), x.len()),
        ));
    }
    Ok(trapz_unchecked(y, x))
}

/// Integrate the pointwise product `f(x) g(x)` without allocating the product.
pub fn trapz_product(f: &[f64], g: &[f64], x: &[f64]) -> Result<f64, AppError> {
    if f.len() != x.len() || g.len() != x.len() {
        return Err(AppError::new(
            4,
            format!(
                "trapz: length mismatch (f={}, g={}, x={}).",
                f.len(),
                g.len(),
                x.len()
            ),
        ));
    }
    let mut sum = 0.0;
    for i in 1..x.len() {
        let a = f[i - 1] * g[i - 1];
        let b = f[i] * g[i];
        sum += 0.5 * (x[i] - x[i - 1]) * (a + b);
    }
    Ok(sum)
}

fn trapz_unchecked(y: &[f64], x: &[f64]) -> f64 {
    x.windows(2)
        .zip(y.windows(2))
        .map(|(xs, ys)| 0.5 * (xs[1] - xs[0]) * (ys[0] + ys[1]))
        .sum()
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn trapz_is_exact_for_linear_functions() {
        let x = [0.0, 0.5, 2.0, 3.0];
        let y: Vec<f64> = x.iter().map(|v| 2.0 * v + 1.0).collect();
        // ∫0^3 (2x + 1) dx = 9 + 3
        assert_relative_eq!(trapz(&y, &x).unwrap(), 12.0, epsilon = 1e-12);
    }

    #[test]
    fn trapz_handles_non_uniform_grid() {
        let x = [0.0, 1.0, 3.0];
        let y = [0.0, 1.0, 9.0];
        // 0.5*1*(0+1) + 0.5*2*(1+9)
        assert_relative_eq!(trapz(&y, &x).unwrap(), 10.5, epsilon = 1e-12);
    }

    #[test]
    fn trapz_degenerate_inputs() {
        assert_eq!(trapz(&[], &[]).unwrap(), 0.0);
        assert_eq!(trapz(&[3.0], &[1.0]).unwrap(), 0.0);
        assert_eq!(trapz(&[1.0, 2.0], &[1.0]).unwrap_err().exit_code(), 4);
    }

    #[test]
    fn trapz_product_matches_explicit_product() {
        let x = [0.0, 0.2, 0.7, 1.0, 1.6];
        let f = [1.0, 2.0, 0.5, 3.0, 1.5];
        let g = [0.3, 0.1, 0.9, 0.4, 2.0];
        let fg: Vec<f64> = f.iter().zip(&g).map(|(a, b)| a * b).collect();
        assert_relative_eq!(
            trapz_product(&f, &g, &x).unwrap(),
            trapz(&fg, &x).unwrap(),
            epsilon = 1e-14
        );
    }
}
