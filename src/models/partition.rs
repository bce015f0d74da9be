//! Total internal partition sums.
//!
//! `Q(T)` is approximated as a rigid-rotor times harmonic-oscillator product:
//!
//! - rotation: `Q_rot ∝ T` for linear molecules, `T^1.5` otherwise
//! - vibration: `Q_vib = Π_i (1 - exp(-c2 ω_i / T))^(-g_i)` over the fundamentals
//!
//! Only the ratio `Q(T_ref) / Q(T)` enters the intensity scaling, so the
//! rotational constants and symmetry numbers cancel.

use crate::domain::Species;
use crate::physics::constants::{C2, T_REF};

/// Vibrational fundamentals `(ω [cm-1], degeneracy)`.
fn fundamentals(species: Species) -> &'static [(f64, u32)] {
    match species {
        Species::H2o => &[(3657.1, 1), (1594.7, 1), (3755.9, 1)],
        Species::Co2 => &[(1333.0, 1), (667.4, 2), (2349.1, 1)],
        Species::Co => &[(2143.3, 1)],
        Species::Ch4 => &[(2917.0, 1), (1533.3, 2), (3019.5, 3), (1306.0, 3)],
        Species::H2co => &[
            (2782.5, 1),
            (1746.1, 1),
            (1500.2, 1),
            (1167.3, 1),
            (2843.3, 1),
            (1249.1, 1),
        ],
        Species::H2o2 => &[
            (3599.0, 1),
            (1402.0, 1),
            (865.9, 1),
            (317.0, 1),
            (3608.0, 1),
            (1264.6, 1),
        ],
        Species::Sf6 => &[
            (775.0, 1),
            (643.0, 2),
            (948.0, 3),
            (615.0, 3),
            (524.0, 3),
            (347.0, 3),
        ],
    }
}

/// Unnormalized partition sum at `temperature` [K].
pub fn partition_sum(species: Species, temperature: f64) -> f64 {
    let rot_exponent = if species.is_linear() { 1.0 } else { 1.5 };
    let q_rot = temperature.powf(rot_exponent);
    let q_vib: f64 = fundamentals(species)
        .iter()
        .map(|&(omega, g)| (-(-C2 * omega / temperature).exp_m1()).powi(-(g as i32)))
        .product();
    q_rot * q_vib
}

/// `Q(T_ref) / Q(T)`.
pub fn partition_ratio(species: Species, temperature: f64) -> f64 {
    partition_sum(species, T_REF) / partition_sum(species, temperature)
}
