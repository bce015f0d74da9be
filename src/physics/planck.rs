//! Blackbody weighting and Planck-mean integrals.
//!
//! Two normalizations are used:
//!
//! - Planck mean absorption *length* (Ju et al., PCI 27, 1998):
//!   `1/Lp = ∫ κ(u) G(u) du`, with `G(u) = 15 u^3 / (π^4 (e^u - 1))` and
//!   `u = h c ν / (k T)`. `G` integrates to one over `u ∈ [0, ∞)`.
//! - Planck mean absorption *coefficient*:
//!   `kp = ∫ κ(ν) I_b,ν(ν, T) dν / I_b(T)`, with `I_b = σ T^4 / π`.
//!
//! `e^u - 1` is evaluated with `exp_m1` so the small-`u` end of the spectrum
//! does not lose precision.

use std::f64::consts::PI;

use crate::domain::Spectrum;
use crate::error::AppError;
use crate::math::trapz_product;
use crate::physics::constants::{C0, C2, H, K_B, SIGMA};

/// First radiation constant `2π h c^2`, scaled for wavenumbers in cm-1.
const C1_NU: f64 = 2.0 * PI * H * C0 * C0 * 1e8;
/// Second radiation constant in wavenumber form [cm K].
const C2_NU: f64 = H * C0 / K_B * 1e2;

/// Dimensionless frequency `u = c2 ν / T`.
pub fn reduced_frequency(nu: f64, temperature: f64) -> f64 {
    C2 * nu / temperature
}

/// Normalized Planck kernel `G(u)`; `G(0) = 0`.
pub fn planck_kernel(u: f64) -> f64 {
    if u <= 0.0 {
        return 0.0;
    }
    15.0 / PI.powi(4) * u.powi(3) / u.exp_m1()
}

/// Total blackbody intensity `σ T^4 / π` [W m-2 sr-1].
pub fn blackbody_intensity(temperature: f64) -> f64 {
    SIGMA * temperature.powi(4) / PI
}

/// Spectral blackbody intensity at wavenumber `nu` [cm-1], per unit wavenumber
/// [W m-2 sr-1 cm].
pub fn blackbody_spectral_intensity(nu: f64, temperature: f64) -> f64 {
    if nu <= 0.0 {
        return 0.0;
    }
    C1_NU * nu.powi(3) / (C2_NU * nu / temperature).exp_m1() / PI
}

/// Result of the Planck mean absorption length integral, with the sampled
/// kernel kept for export.
#[derive(Debug, Clone)]
pub struct PlanckLength {
    pub u: Vec<f64>,
    pub g: Vec<f64>,
    /// `∫ κ G du` [cm-1].
    pub inverse_length: f64,
    /// `Lp` [cm].
    pub length: f64,
}

/// Compute the Planck mean absorption length of `spectrum` at `temperature`.
pub fn planck_mean_length(spectrum: &Spectrum, temperature: f64) -> Result<PlanckLength, AppError> {
    let u: Vec<f64> = spectrum
        .nu
        .iter()
        .map(|&nu| reduced_frequency(nu, temperature))
        .collect();
    let g: Vec<f64> = u.iter().map(|&u| planck_kernel(u)).collect();

    let inverse_length = trapz_product(&spectrum.coef, &g, &u)?;
    if !(inverse_length.is_finite() && inverse_length > 0.0) {
        return Err(AppError::new(
            4,
            format!("Planck-weighted absorption integral is not positive ({inverse_length:e}); no absorption in band?"),
        ));
    }

    Ok(PlanckLength {
        u,
        g,
        inverse_length,
        length: 1.0 / inverse_length,
    })
}

/// Compute the Planck mean absorption coefficient of `spectrum` at `temperature` [cm-1].
pub fn planck_mean_coefficient(spectrum: &Spectrum, temperature: f64) -> Result<f64, AppError> {
    let ib_nu: Vec<f64> = spectrum
        .nu
        .iter()
        .map(|&nu| blackbody_spectral_intensity(nu, temperature))
        .collect();
    let weighted = trapz_product(&spectrum.coef, &ib_nu, &spectrum.nu)?;
    let kp = weighted / blackbody_intensity(temperature);
    if !kp.is_finite() {
        return Err(AppError::new(4, format!("Non-finite Planck mean coefficient at T = {temperature} K.")));
    }
    Ok(kp)
}
