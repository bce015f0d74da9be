//! Per-wavenumber export of the `lp` command.

use std::path::Path;

use serde::Serialize;

use crate::domain::Spectrum;
use crate::error::AppError;
use crate::io::ensure_parent_dir;
use crate::physics::PlanckLength;

#[derive(Debug, Serialize)]
struct SpectrumRow {
    #[serde(rename = "wave number [cm-1]")]
    nu: f64,
    #[serde(rename = "absorption coefficient [cm-1]")]
    coef: f64,
    u: f64,
    #[serde(rename = "G")]
    g: f64,
}

/// Write `(ν, κ, u, G)` rows.
pub fn write_spectrum_csv(path: &Path, spectrum: &Spectrum, planck: &PlanckLength) -> Result<(), AppError> {
    if planck.u.len() != spectrum.len() || planck.g.len() != spectrum.len() {
        return Err(AppError::new(4, "Spectrum and Planck kernel lengths differ."));
    }

    ensure_parent_dir(path)?;
    let mut writer = csv::Writer::from_path(path)
        .map_err(|e| AppError::new(2, format!("Failed to create spectrum CSV '{}': {e}", path.display())))?;

    for i in 0..spectrum.len() {
        writer
            .serialize(SpectrumRow {
                nu: spectrum.nu[i],
                coef: spectrum.coef[i],
                u: planck.u[i],
                g: planck.g[i],
            })
            .map_err(|e| AppError::new(2, format!("Failed to write spectrum CSV row: {e}")))?;
    }
    writer
        .flush()
        .map_err(|e| AppError::new(2, format!("Failed to flush spectrum CSV: {e}")))?;
    Ok(())
}
