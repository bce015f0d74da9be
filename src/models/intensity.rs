//! Temperature scaling of HITRAN line intensities.
//!
//! ```text
//! S(T) = S(T_ref) · Q(T_ref)/Q(T)
//!        · exp(-c2 E''/T) / exp(-c2 E''/T_ref)
//!        · (1 - exp(-c2 ν/T)) / (1 - exp(-c2 ν/T_ref))
//! ```

use crate::domain::SpectralLine;
use crate::physics::constants::{C2, T_REF};

/// Line intensity at `temperature` given the precomputed `Q(T_ref)/Q(T)`.
pub fn line_intensity(line: &SpectralLine, temperature: f64, q_ratio: f64) -> f64 {
    let boltzmann = (-C2 * line.elower * (1.0 / temperature - 1.0 / T_REF)).exp();
    let stimulated = (-C2 * line.nu / temperature).exp_m1() / (-C2 * line.nu / T_REF).exp_m1();
    line.sw * q_ratio * boltzmann * stimulated
}

#[cfg(test)]
mod tests {
    use super::*;

    fn line(nu: f64, elower: f64) -> SpectralLine {
        SpectralLine {
            molecule_id: 5,
            local_iso_id: 1,
            nu,
            sw: 1e-20,
            a: 0.0,
            gamma_air: 0.07,
            gamma_self: 0.08,
            elower,
            n_air: 0.75,
            delta_air: 0.0,
        }
    }

    #[test]
    fn intensity_is_unchanged_at_reference() {
        let l = line(2143.0, 500.0);
        let s = line_intensity(&l, T_REF, 1.0);
        assert!((s - l.sw).abs() / l.sw < 1e-12);
    }

    #[test]
    fn hot_band_lines_strengthen_with_temperature() {
        // High lower-state energy: Boltzmann factor dominates.
        let l = line(2143.0, 3000.0);
        assert!(line_intensity(&l, 1500.0, 1.0) > l.sw);
        // Ground-state line: population spreads out, intensity drops once Q grows.
        let g = line(2143.0, 0.0);
        assert!(line_intensity(&g, 1500.0, 0.2) < g.sw);
    }
}
