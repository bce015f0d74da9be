//! Physical constants (exact 2019 SI values) and HITRAN reference conditions.

/// Planck constant [J s].
pub const H: f64 = 6.62607015e-34;
/// Speed of light in vacuum [m s-1].
pub const C0: f64 = 2.99792458e8;
/// Boltzmann constant [J K-1].
pub const K_B: f64 = 1.380649e-23;
/// Stefan-Boltzmann constant [W m-2 K-4].
pub const SIGMA: f64 = 5.670374419e-8;
/// Avogadro constant [mol-1].
pub const N_A: f64 = 6.02214076e23;

/// Planck constant [erg s].
pub const H_CGS: f64 = 6.62607015e-27;
/// Speed of light in vacuum [cm s-1].
pub const C0_CGS: f64 = 2.99792458e10;
/// Boltzmann constant [erg K-1].
pub const K_B_CGS: f64 = 1.380649e-16;

/// Second radiation constant `hc/k` [cm K].
pub const C2: f64 = H_CGS * C0_CGS / K_B_CGS;

/// HITRAN reference temperature [K].
pub const T_REF: f64 = 296.0;
/// One standard atmosphere [Pa].
pub const ATM: f64 = 101_325.0;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn second_radiation_constant() {
        assert!((C2 - 1.438776877).abs() < 1e-8, "c2 = {C2}");
    }

    #[test]
    fn stefan_boltzmann_is_consistent_with_planck() {
        let pi = std::f64::consts::PI;
        let sigma = 2.0 * pi.powi(5) * K_B.powi(4) / (15.0 * H.powi(3) * C0.powi(2));
        assert!((sigma - SIGMA).abs() / SIGMA < 1e-9);
    }
}
