//! Shared domain types.
//!
//! These types are intentionally kept lightweight so they can be:
//!
//! - used in-memory during synthesis and fitting
//! - written to the cache header / CSV / coefficient files
//! - reloaded later for plotting

use std::path::PathBuf;

use clap::ValueEnum;
use serde::{Deserialize, Serialize};

use crate::domain::Species;
use crate::error::AppError;

/// Thermodynamic conditions a spectrum is synthesized at.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Environment {
    /// Temperature [K].
    pub temperature: f64,
    /// Total pressure [atm].
    pub pressure: f64,
}

impl Environment {
    pub fn new(temperature: f64, pressure: f64) -> Result<Self, AppError> {
        if !(temperature.is_finite() && temperature > 0.0) {
            return Err(AppError::new(2, format!("Invalid temperature: {temperature} K (must be finite and > 0).")));
        }
        if !(pressure.is_finite() && pressure > 0.0) {
            return Err(AppError::new(2, format!("Invalid pressure: {pressure} atm (must be finite and > 0).")));
        }
        Ok(Self { temperature, pressure })
    }
}

/// Line-shape model used to spread each line over the wavenumber grid.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum LineShape {
    /// Convolution of Doppler and pressure broadening.
    Voigt,
    /// Pressure broadening only.
    Lorentz,
    /// Doppler broadening only.
    Doppler,
}

impl LineShape {
    pub fn display_name(self) -> &'static str {
        match self {
            LineShape::Voigt => "Voigt",
            LineShape::Lorentz => "Lorentz",
            LineShape::Doppler => "Doppler",
        }
    }
}

/// One transition from a HITRAN `.par` record.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SpectralLine {
    pub molecule_id: u8,
    pub local_iso_id: u8,
    /// Vacuum wavenumber [cm-1].
    pub nu: f64,
    /// Intensity at 296 K [cm-1 / (molecule cm-2)].
    pub sw: f64,
    /// Einstein A coefficient [s-1].
    pub a: f64,
    /// Air-broadened half width at 296 K [cm-1 / atm].
    pub gamma_air: f64,
    /// Self-broadened half width at 296 K [cm-1 / atm].
    pub gamma_self: f64,
    /// Lower-state energy [cm-1].
    pub elower: f64,
    /// Temperature exponent for `gamma_air`.
    pub n_air: f64,
    /// Air pressure shift [cm-1 / atm].
    pub delta_air: f64,
}

/// Absorption coefficient sampled on a wavenumber grid.
#[derive(Debug, Clone, Default)]
pub struct Spectrum {
    /// Wavenumber grid [cm-1], strictly increasing.
    pub nu: Vec<f64>,
    /// Absorption coefficient [cm-1] at each grid point.
    pub coef: Vec<f64>,
}

impl Spectrum {
    pub fn len(&self) -> usize {
        self.nu.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nu.is_empty()
    }
}

/// Planck-mean absorption coefficient at one temperature.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct KpPoint {
    #[serde(rename = "T[K]")]
    pub temperature: f64,
    #[serde(rename = "kp[cm-1 * atm-1]")]
    pub kp: f64,
}

/// Low/high temperature polynomial pair split at a threshold temperature.
///
/// Coefficients are in ascending power order: `kp(T) = Σ a_i T^i`.
#[derive(Debug, Clone, PartialEq)]
pub struct PolynomialPair {
    pub t_thresh: f64,
    pub low: Vec<f64>,
    pub high: Vec<f64>,
}

impl PolynomialPair {
    /// Evaluate the piecewise polynomial: `low` below the threshold, `high` at or above it.
    pub fn eval(&self, t: f64) -> f64 {
        if t < self.t_thresh {
            crate::models::polyval(&self.low, t)
        } else {
            crate::models::polyval(&self.high, t)
        }
    }

    pub fn order(&self) -> usize {
        self.low.len()
    }
}

/// Spectral grid options shared by `lp` and `table`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GridOptions {
    /// Grid spacing [cm-1].
    pub step: f64,
    /// Line wing cutoff, in multiples of the larger of the Lorentz and Doppler half widths.
    pub wing_hw: f64,
    /// Explicit grid range [cm-1]; defaults to the span of the line list.
    pub range: Option<(f64, f64)>,
    pub line_shape: LineShape,
}

impl Default for GridOptions {
    fn default() -> Self {
        Self {
            step: 0.01,
            wing_hw: 50.0,
            range: None,
            line_shape: LineShape::Voigt,
        }
    }
}

/// Which line list to fetch and where to cache it.
#[derive(Debug, Clone)]
pub struct FetchConfig {
    pub species: Species,
    pub isotopologue: u8,
    /// Fetch window start [cm-1].
    pub numin: f64,
    /// Fetch window end [cm-1].
    pub numax: f64,
    pub data_dir: PathBuf,
    /// Re-download even when the cache header exists.
    pub refresh: bool,
}

/// Resolved configuration for `pmac lp`.
#[derive(Debug, Clone)]
pub struct LpConfig {
    pub fetch: FetchConfig,
    pub environment: Environment,
    pub grid: GridOptions,
    pub output: PathBuf,
}

/// Resolved configuration for `pmac table`.
#[derive(Debug, Clone)]
pub struct TableConfig {
    pub fetch: FetchConfig,
    pub t_start: f64,
    pub t_end: f64,
    pub t_steps: usize,
    /// Pressure the sweep runs at [atm]; kp is reported per atm.
    pub pressure: f64,
    pub grid: GridOptions,
    pub output: PathBuf,
}

/// Resolved configuration for `pmac fit`.
#[derive(Debug, Clone)]
pub struct FitConfig {
    pub input: PathBuf,
    pub output: PathBuf,
    /// Number of polynomial coefficients (`a0..a{order-1}`).
    pub order: usize,
    /// Threshold temperature splitting the low/high fits [K].
    pub t_thresh: f64,
    /// Fractional overlap band around the threshold.
    pub overlap: f64,
    /// Unit multiplier applied to kp before fitting (1e2: atm-1 m-1).
    pub coef: f64,
    pub plot: bool,
    pub plot_width: usize,
    pub plot_height: usize,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn environment_rejects_non_physical_values() {
        assert!(Environment::new(300.0, 1.0).is_ok());
        assert_eq!(Environment::new(0.0, 1.0).unwrap_err().exit_code(), 2);
        assert_eq!(Environment::new(300.0, -1.0).unwrap_err().exit_code(), 2);
        assert!(Environment::new(f64::NAN, 1.0).is_err());
    }

    #[test]
    fn polynomial_pair_switches_at_threshold() {
        let pair = PolynomialPair {
            t_thresh: 800.0,
            low: vec![1.0, 0.0],
            high: vec![2.0, 0.0],
        };
        assert_eq!(pair.eval(799.9), 1.0);
        assert_eq!(pair.eval(800.0), 2.0);
        assert_eq!(pair.order(), 2);
    }
}
