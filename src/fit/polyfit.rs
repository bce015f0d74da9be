//! Least-squares polynomial fit for a single temperature regime.
//!
//! Given temperatures `T_i` and values `y_i` we solve
//!
//! ```text
//! minimize Σ (y_i - Σ_j a_j T_i^j)^2
//! ```
//!
//! The model is linear in `a`, so the least-squares optimum is reached in one
//! solve (an iterative curve fit started anywhere converges to the same point).
//!
//! Numerical notes:
//! - `T^5` at 3000 K is ~2e17, so the raw Vandermonde matrix is badly
//!   conditioned. We fit in `x = T / T_scale` and rescale `a_j = b_j / T_scale^j`.

use nalgebra::{DMatrix, DVector};

use crate::error::AppError;
use crate::math::solve_least_squares;
use crate::models::{fill_design_row, polyval};

/// Fitted polynomial for one regime plus its quality on the fitted points.
#[derive(Debug, Clone)]
pub struct RegimeFit {
    /// Ascending-power coefficients in the caller's units of `T`.
    pub coeffs: Vec<f64>,
    pub n: usize,
    pub sse: f64,
    pub rmse: f64,
    pub t_min: f64,
    pub t_max: f64,
}

/// Fit `order` coefficients (`a0..a{order-1}`) to `(t, y)`.
pub fn fit_polynomial(t: &[f64], y: &[f64], order: usize) -> Result<RegimeFit, AppError> {
    if t.len() != y.len() {
        return Err(AppError::new(4, "Polynomial fit: temperature/value length mismatch."));
    }
    if order == 0 {
        return Err(AppError::new(2, "Polynomial order must be >= 1."));
    }
    let n = t.len();
    if n < order {
        return Err(AppError::new(
            3,
            format!("Polynomial fit needs at least {order} points, got {n}."),
        ));
    }
    if t.iter().chain(y).any(|v| !v.is_finite()) {
        return Err(AppError::new(4, "Polynomial fit: non-finite input value."));
    }

    let t_scale = t.iter().fold(0.0_f64, |m, v| m.max(v.abs()));
    let t_scale = if t_scale > 0.0 { t_scale } else { 1.0 };

    let mut x = DMatrix::<f64>::zeros(n, order);
    let mut row = vec![0.0; order];
    for (i, &ti) in t.iter().enumerate() {
        fill_design_row(ti / t_scale, &mut row);
        for (j, &v) in row.iter().enumerate() {
            x[(i, j)] = v;
        }
    }
    let yv = DVector::from_row_slice(y);

    let beta = solve_least_squares(&x, &yv).ok_or_else(|| {
        AppError::new(4, format!("Polynomial fit did not converge ({n} points, {order} coefficients)."))
    })?;

    let mut coeffs = Vec::with_capacity(order);
    let mut power = 1.0;
    for b in beta.iter() {
        coeffs.push(b / power);
        power *= t_scale;
    }

    let sse: f64 = t
        .iter()
        .zip(y)
        .map(|(&ti, &yi)| (yi - polyval(&coeffs, ti)).powi(2))
        .sum();
    if !sse.is_finite() {
        return Err(AppError::new(4, "Polynomial fit produced non-finite residuals."));
    }

    let t_min = t.iter().cloned().fold(f64::INFINITY, f64::min);
    let t_max = t.iter().cloned().fold(f64::NEG_INFINITY, f64::max);

    Ok(RegimeFit {
        coeffs,
        n,
        sse,
        rmse: (sse / n as f64).sqrt(),
        t_min,
        t_max,
    })
}
