//! Line-by-line absorption coefficient synthesis.
//!
//! For every line in the table, at conditions `(T, p)`:
//!
//! 1. scale the reference intensity to `T` (`models::line_intensity`)
//! 2. broaden it (`models::LineProfile`): Lorentz width from air broadening,
//!    Doppler width from the isotopologue mass, center shifted by `δ_air · p`
//! 3. add `n · S(T) · f(ν - ν0)` on the grid points within
//!    `wing_hw` half widths of the center
//!
//! `n = p / (k T)` is the absorber number density [molecules cm-3], so the
//! result is an absorption coefficient in cm-1 rather than a cross section.
//!
//! Lines are split into one chunk per worker; each worker accumulates into its
//! own buffer and the buffers are summed at the end.

use rayon::prelude::*;

use crate::data::LineTable;
use crate::domain::{Environment, GridOptions, SpectralLine, Spectrum};
use crate::error::AppError;
use crate::math::uniform_grid;
use crate::models::{LineProfile, line_intensity, partition_ratio};
use crate::physics::constants::{ATM, K_B};

/// Absorber number density [molecules cm-3] of a pure gas at `env`.
pub fn number_density(env: &Environment) -> f64 {
    env.pressure * ATM / (K_B * env.temperature) * 1e-6
}

/// Synthesize the absorption coefficient of `table` at `env` on the grid
/// described by `opts`.
pub fn absorption_coefficient(
    table: &LineTable,
    env: &Environment,
    opts: &GridOptions,
) -> Result<Spectrum, AppError> {
    let (lo, hi) = match opts.range {
        Some(range) => range,
        None => table
            .nu_range()
            .ok_or_else(|| AppError::new(3, "Line table is empty."))?,
    };
    if !(opts.wing_hw.is_finite() && opts.wing_hw > 0.0) {
        return Err(AppError::new(2, format!("Invalid wing cutoff: {} half widths.", opts.wing_hw)));
    }
    let nu = uniform_grid(lo, hi, opts.step)?;

    let species = table.isotopologue.species;
    let molar_mass = table.isotopologue.molar_mass;
    let q_ratio = partition_ratio(species, env.temperature);
    let density = number_density(env);

    log::debug!(
        "{} synthesis: {} lines, {} grid points [{lo}, {hi}) step {}, T={} K p={} atm, Q(Tref)/Q(T)={q_ratio:.4e}",
        opts.line_shape.display_name(),
        table.lines.len(),
        nu.len(),
        opts.step,
        env.temperature,
        env.pressure
    );

    let workers = rayon::current_num_threads().max(1);
    let chunk = table.lines.len().div_ceil(workers).max(1);
    let n = nu.len();

    let coef = table
        .lines
        .par_chunks(chunk)
        .map(|lines| {
            let mut acc = vec![0.0; n];
            for line in lines {
                accumulate_line(&mut acc, &nu, line, env, opts, q_ratio, density, molar_mass);
            }
            acc
        })
        .reduce(
            || vec![0.0; n],
            |mut a, b| {
                for (x, y) in a.iter_mut().zip(&b) {
                    *x += y;
                }
                a
            },
        );

    Ok(Spectrum { nu, coef })
}

#[allow(clippy::too_many_arguments)]
fn accumulate_line(
    acc: &mut [f64],
    nu: &[f64],
    line: &SpectralLine,
    env: &Environment,
    opts: &GridOptions,
    q_ratio: f64,
    density: f64,
    molar_mass: f64,
) {
    let strength = line_intensity(line, env.temperature, q_ratio);
    if !(strength.is_finite() && strength > 0.0) {
        return;
    }

    let profile = LineProfile::new(opts.line_shape, line, env, molar_mass);
    let wing = opts.wing_hw * profile.half_width();
    let start = nu.partition_point(|&v| v < profile.center - wing);
    let end = nu.partition_point(|&v| v <= profile.center + wing);

    let scale = density * strength;
    for (slot, &v) in acc[start..end].iter_mut().zip(&nu[start..end]) {
        *slot += scale * profile.eval(v);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::CacheHeader;
    use crate::domain::{LineShape, Species, isotopologue};
    use crate::math::trapz;
    use crate::physics::constants::T_REF;
    use approx::assert_relative_eq;

    fn single_line_table(sw: f64) -> LineTable {
        let iso = isotopologue(Species::Co, 1).unwrap();
        LineTable {
            header: CacheHeader {
                table_name: "CO".to_string(),
                species: Species::Co,
                molecule_id: 5,
                isotopologue_id: 1,
                global_iso_id: 26,
                numin: 0.0,
                numax: 10_000.0,
                number_of_rows: 1,
                source: "test".to_string(),
                fetched_at: chrono::Utc::now(),
            },
            isotopologue: iso,
            lines: vec![SpectralLine {
                molecule_id: 5,
                local_iso_id: 1,
                nu: 2143.0,
                sw,
                a: 0.0,
                gamma_air: 0.05,
                gamma_self: 0.06,
                elower: 0.0,
                n_air: 0.7,
                delta_air: 0.0,
            }],
            row_errors: Vec::new(),
        }
    }

    #[test]
    fn number_density_at_standard_conditions() {
        // Loschmidt-like: ~2.479e19 cm-3 at 296 K, 1 atm.
        let env = Environment::new(T_REF, 1.0).unwrap();
        assert_relative_eq!(number_density(&env), 2.4794e19, max_relative = 1e-4);
    }

    #[test]
    fn integrated_absorption_equals_density_times_intensity() {
        let table = single_line_table(1e-19);
        let env = Environment::new(T_REF, 1.0).unwrap();
        for shape in [LineShape::Voigt, LineShape::Lorentz, LineShape::Doppler] {
            let opts = GridOptions {
                step: 1e-3,
                wing_hw: 500.0,
                range: Some((2118.0, 2168.0)),
                line_shape: shape,
            };
            let spectrum = absorption_coefficient(&table, &env, &opts).unwrap();
            let area = trapz(&spectrum.coef, &spectrum.nu).unwrap();
            let expected = number_density(&env) * 1e-19;
            // Lorentz wings beyond ±500 γ carry ~0.13% of the area.
            assert_relative_eq!(area, expected, max_relative = 3e-3);
        }
    }

    #[test]
    fn wing_cutoff_leaves_far_grid_untouched() {
        let table = single_line_table(1e-19);
        let env = Environment::new(1000.0, 1.0).unwrap();
        let opts = GridOptions {
            step: 0.01,
            wing_hw: 10.0,
            range: Some((2100.0, 2200.0)),
            line_shape: LineShape::Voigt,
        };
        let spectrum = absorption_coefficient(&table, &env, &opts).unwrap();
        let peak = spectrum
            .coef
            .iter()
            .cloned()
            .fold(f64::NEG_INFINITY, f64::max);
        assert!(peak > 0.0);
        assert_eq!(spectrum.coef[0], 0.0);
        assert_eq!(*spectrum.coef.last().unwrap(), 0.0);
    }

    #[test]
    fn default_range_needs_a_line_span() {
        let table = single_line_table(1e-19);
        let env = Environment::new(T_REF, 1.0).unwrap();
        // One line: [min, max) is empty.
        assert!(absorption_coefficient(&table, &env, &GridOptions::default()).is_err());
    }
}
