//! Area-normalized line profiles.
//!
//! For a line at `ν0` with Lorentz half width `γ` and Doppler half width `α_D`
//! (both HWHM, cm-1):
//!
//! - Lorentz: `γ / (π (Δν^2 + γ^2))`
//! - Doppler: `sqrt(ln2/π) / α_D · exp(-ln2 Δν^2 / α_D^2)`
//! - Voigt:   `sqrt(ln2/π) / α_D · K(sqrt(ln2) Δν / α_D, sqrt(ln2) γ / α_D)`
//!
//! Every profile has units of cm and integrates to one over Δν.

use std::f64::consts::{LN_2, PI};

use crate::domain::{Environment, LineShape, SpectralLine};
use crate::math::voigt_k;
use crate::physics::constants::{C0, K_B, N_A, T_REF};

/// Broadening parameters of one line at given conditions.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LineProfile {
    pub shape: LineShape,
    /// Pressure-shifted line center [cm-1].
    pub center: f64,
    /// Lorentz HWHM [cm-1].
    pub gamma: f64,
    /// Doppler HWHM [cm-1].
    pub alpha_d: f64,
}

impl LineProfile {
    /// Broaden `line` at `env` in air. `molar_mass` is in g/mol.
    pub fn new(shape: LineShape, line: &SpectralLine, env: &Environment, molar_mass: f64) -> Self {
        Self {
            shape,
            center: line.nu + line.delta_air * env.pressure,
            gamma: lorentz_hwhm(line, env),
            alpha_d: doppler_hwhm(line.nu, env.temperature, molar_mass),
        }
    }

    /// The half width that governs how far the wings extend.
    pub fn half_width(&self) -> f64 {
        match self.shape {
            LineShape::Voigt => self.gamma.max(self.alpha_d),
            LineShape::Lorentz => self.gamma,
            LineShape::Doppler => self.alpha_d,
        }
    }

    /// Profile value at wavenumber `nu` [cm].
    pub fn eval(&self, nu: f64) -> f64 {
        let dnu = nu - self.center;
        match self.shape {
            LineShape::Lorentz => lorentz(dnu, self.gamma),
            LineShape::Doppler => doppler(dnu, self.alpha_d),
            LineShape::Voigt => voigt(dnu, self.gamma, self.alpha_d),
        }
    }
}

/// Pressure-broadened HWHM in air: `(T_ref/T)^n_air · γ_air · p`.
pub fn lorentz_hwhm(line: &SpectralLine, env: &Environment) -> f64 {
    (T_REF / env.temperature).powf(line.n_air) * line.gamma_air * env.pressure
}

/// Doppler HWHM: `ν0 / c · sqrt(2 k T ln2 / m)`.
pub fn doppler_hwhm(nu0: f64, temperature: f64, molar_mass: f64) -> f64 {
    let mass = molar_mass * 1e-3 / N_A;
    nu0 / C0 * (2.0 * K_B * temperature * LN_2 / mass).sqrt()
}

pub fn lorentz(dnu: f64, gamma: f64) -> f64 {
    gamma / (PI * (dnu * dnu + gamma * gamma))
}

pub fn doppler(dnu: f64, alpha_d: f64) -> f64 {
    (LN_2 / PI).sqrt() / alpha_d * (-LN_2 * dnu * dnu / (alpha_d * alpha_d)).exp()
}

pub fn voigt(dnu: f64, gamma: f64, alpha_d: f64) -> f64 {
    if alpha_d <= 0.0 {
        return lorentz(dnu, gamma);
    }
    let scale = LN_2.sqrt() / alpha_d;
    (LN_2 / PI).sqrt() / alpha_d * voigt_k(dnu * scale, gamma * scale)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::math::{trapz, uniform_grid};
    use approx::assert_relative_eq;

    fn area(f: impl Fn(f64) -> f64, half_span: f64, step: f64) -> f64 {
        let x = uniform_grid(-half_span, half_span, step).unwrap();
        let y: Vec<f64> = x.iter().map(|&v| f(v)).collect();
        trapz(&y, &x).unwrap()
    }

    #[test]
    fn profiles_are_normalized() {
        assert_relative_eq!(area(|d| doppler(d, 0.005), 0.1, 1e-5), 1.0, max_relative = 1e-6);
        // Lorentz wings beyond ±1000 γ hold ~0.06% of the area.
        assert_relative_eq!(area(|d| lorentz(d, 0.01), 10.0, 1e-4), 1.0, max_relative = 1e-3);
        assert_relative_eq!(area(|d| voigt(d, 0.01, 0.01), 10.0, 1e-4), 1.0, max_relative = 2e-3);
    }

    #[test]
    fn voigt_reduces_to_limits() {
        // Doppler-dominated core.
        let (gamma, alpha) = (1e-6, 0.01);
        assert_relative_eq!(voigt(0.0, gamma, alpha), doppler(0.0, alpha), max_relative = 1e-3);
        // Lorentz-dominated.
        let (gamma, alpha) = (1.0, 1e-4);
        assert_relative_eq!(voigt(0.3, gamma, alpha), lorentz(0.3, gamma), max_relative = 1e-3);
    }

    #[test]
    fn co_doppler_width_at_room_temperature() {
        // CO fundamental near 2143 cm-1 has α_D ≈ 2.50e-3 cm-1 at 296 K.
        let a = doppler_hwhm(2143.0, 296.0, 27.994915);
        assert!((a - 2.495e-3).abs() < 1e-6, "α_D = {a}");
    }

    #[test]
    fn profile_applies_pressure_shift_and_scaling() {
        let line = SpectralLine {
            molecule_id: 5,
            local_iso_id: 1,
            nu: 2000.0,
            sw: 1e-20,
            a: 0.0,
            gamma_air: 0.05,
            gamma_self: 0.06,
            elower: 0.0,
            n_air: 0.5,
            delta_air: -0.002,
        };
        let env = Environment::new(4.0 * T_REF, 2.0).unwrap();
        let p = LineProfile::new(LineShape::Lorentz, &line, &env, 28.0);
        assert_relative_eq!(p.center, 1999.996, epsilon = 1e-12);
        // (1/4)^0.5 · 0.05 · 2
        assert_relative_eq!(p.gamma, 0.05, epsilon = 1e-12);
        assert_eq!(p.half_width(), p.gamma);
        assert!(p.eval(p.center) > p.eval(p.center + 0.1));
    }
}
