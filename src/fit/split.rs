//! Two-regime fit split at a threshold temperature.
//!
//! The low fit uses `T <= T_thresh (1 + overlap)` and the high fit uses
//! `T >= T_thresh (1 - overlap)`. Both regimes see the band around the
//! threshold, which keeps the two polynomials close where they meet.

use crate::domain::{FitConfig, KpPoint, PolynomialPair};
use crate::error::AppError;
use crate::fit::polyfit::{RegimeFit, fit_polynomial};

/// Output of a split fit.
#[derive(Debug, Clone)]
pub struct SplitFit {
    pub pair: PolynomialPair,
    pub low: RegimeFit,
    pub high: RegimeFit,
    /// The (scaled) table that was fitted.
    pub points: Vec<KpPoint>,
    /// Relative jump `|low(T_thresh) - high(T_thresh)| / |high(T_thresh)|`.
    pub threshold_mismatch: f64,
}

/// Partition points into the overlapping low and high subsets.
pub fn split_subsets(points: &[KpPoint], t_thresh: f64, overlap: f64) -> (Vec<KpPoint>, Vec<KpPoint>) {
    let low = points
        .iter()
        .filter(|p| p.temperature <= t_thresh * (1.0 + overlap))
        .copied()
        .collect();
    let high = points
        .iter()
        .filter(|p| p.temperature >= t_thresh * (1.0 - overlap))
        .copied()
        .collect();
    (low, high)
}

/// Scale kp by `config.coef`, split, and fit both regimes.
pub fn fit_split(points: &[KpPoint], config: &FitConfig) -> Result<SplitFit, AppError> {
    if !(config.t_thresh.is_finite() && config.t_thresh > 0.0) {
        return Err(AppError::new(2, format!("Invalid threshold temperature: {}.", config.t_thresh)));
    }
    if !(config.overlap.is_finite() && (0.0..1.0).contains(&config.overlap)) {
        return Err(AppError::new(2, format!("Invalid overlap: {} (must be in [0, 1)).", config.overlap)));
    }
    if !(config.coef.is_finite() && config.coef > 0.0) {
        return Err(AppError::new(2, format!("Invalid unit coefficient: {}.", config.coef)));
    }
    if points.is_empty() {
        return Err(AppError::new(3, "No kp points to fit."));
    }

    let scaled: Vec<KpPoint> = points
        .iter()
        .map(|p| KpPoint {
            temperature: p.temperature,
            kp: p.kp * config.coef,
        })
        .collect();

    let (low_pts, high_pts) = split_subsets(&scaled, config.t_thresh, config.overlap);
    log::info!(
        "Fitting {} coefficients: {} points below {:.0} K, {} points above {:.0} K",
        config.order,
        low_pts.len(),
        config.t_thresh * (1.0 + config.overlap),
        high_pts.len(),
        config.t_thresh * (1.0 - config.overlap)
    );

    let low = fit_regime(&low_pts, config.order, "low")?;
    let high = fit_regime(&high_pts, config.order, "high")?;

    let pair = PolynomialPair {
        t_thresh: config.t_thresh,
        low: low.coeffs.clone(),
        high: high.coeffs.clone(),
    };

    let at_low = crate::models::polyval(&pair.low, config.t_thresh);
    let at_high = crate::models::polyval(&pair.high, config.t_thresh);
    let threshold_mismatch = if at_high != 0.0 {
        ((at_low - at_high) / at_high).abs()
    } else {
        (at_low - at_high).abs()
    };

    Ok(SplitFit {
        pair,
        low,
        high,
        points: scaled,
        threshold_mismatch,
    })
}

fn fit_regime(points: &[KpPoint], order: usize, label: &str) -> Result<RegimeFit, AppError> {
    let t: Vec<f64> = points.iter().map(|p| p.temperature).collect();
    let y: Vec<f64> = points.iter().map(|p| p.kp).collect();
    fit_polynomial(&t, &y, order)
        .map_err(|e| AppError::new(e.exit_code(), format!("{label}-temperature fit: {}", e.message())))
}
