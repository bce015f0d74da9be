//! Reporting utilities: fitted values, residuals and console formatting.

pub mod format;

pub use format::*;

use crate::domain::{KpPoint, PolynomialPair};
use crate::error::AppError;

/// A tabulated kp point next to the piecewise polynomial's value.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FittedPoint {
    pub point: KpPoint,
    pub kp_fit: f64,
    pub residual: f64,
}

/// Evaluate the piecewise polynomial at every tabulated temperature.
pub fn compute_residuals(points: &[KpPoint], pair: &PolynomialPair) -> Result<Vec<FittedPoint>, AppError> {
    let mut out = Vec::with_capacity(points.len());
    for p in points {
        let kp_fit = pair.eval(p.temperature);
        if !kp_fit.is_finite() {
            return Err(AppError::new(
                4,
                format!("Non-finite polynomial value at T = {} K.", p.temperature),
            ));
        }
        out.push(FittedPoint {
            point: *p,
            kp_fit,
            residual: p.kp - kp_fit,
        });
    }
    Ok(out)
}

/// Largest relative residual `|kp - fit| / |kp|` over points with non-zero kp.
pub fn max_relative_residual(fitted: &[FittedPoint]) -> f64 {
    fitted
        .iter()
        .filter(|f| f.point.kp != 0.0)
        .map(|f| (f.residual / f.point.kp).abs())
        .fold(0.0, f64::max)
}
