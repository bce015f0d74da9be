//! Console formatting.
//!
//! Everything printed to stdout is built here so the pipeline code only
//! decides *what* to print. Numbers that downstream tools parse (the
//! coefficient file, the `lp`/`table` lines) use C `printf`-style exponents
//! (`1.5e-05`, at least two exponent digits, explicit sign).

use crate::domain::{Environment, KpPoint, PolynomialPair, Species};
use crate::fit::SplitFit;
use crate::fit::polyfit::RegimeFit;
use crate::physics::PlanckLength;
use crate::report::FittedPoint;

/// Scientific notation with `prec` mantissa digits and a signed, two-digit minimum exponent.
///
/// `upper` selects `E` over `e` (and `NAN`/`INF` over `nan`/`inf`).
pub fn fmt_sci(v: f64, prec: usize, upper: bool) -> String {
    if !v.is_finite() {
        let s = if v.is_nan() {
            "nan"
        } else if v > 0.0 {
            "inf"
        } else {
            "-inf"
        };
        return if upper { s.to_uppercase() } else { s.to_string() };
    }

    let raw = format!("{v:.prec$e}");
    let (mantissa, exp) = match raw.split_once('e') {
        Some(parts) => parts,
        None => (raw.as_str(), "0"),
    };
    let (sign, digits) = match exp.strip_prefix('-') {
        Some(d) => ('-', d),
        None => ('+', exp),
    };
    let e = if upper { 'E' } else { 'e' };
    format!("{mantissa}{e}{sign}{digits:0>2}")
}

/// Shortest form of a value that is usually integral: `1300`, `40.5`.
pub fn fmt_compact(v: f64) -> String {
    if v.is_finite() && v.fract() == 0.0 && v.abs() < 1e15 {
        format!("{}", v as i64)
    } else {
        format!("{v}")
    }
}

/// `Optical thickness of CO2 @ T = 1300.0 [K], P = 40.0 [atm]: 1.2345e-02 [cm]`
pub fn format_lp_line(species: Species, env: &Environment, planck: &PlanckLength) -> String {
    format!(
        "Optical thickness of {species} @ T = {:.1} [K], P = {:.1} [atm]: {} [cm]",
        env.temperature,
        env.pressure,
        fmt_sci(planck.length, 4, false)
    )
}

/// `kp: 1.2345E-01 @ 3.000E+02 [K]`
pub fn format_kp_line(point: &KpPoint) -> String {
    format!(
        "kp: {} @ {} [K]",
        fmt_sci(point.kp, 4, true),
        fmt_sci(point.temperature, 3, true)
    )
}

/// Fit diagnostics printed by `pmac fit`.
pub fn format_fit_summary(species_label: &str, fit: &SplitFit, fitted: &[FittedPoint], coef: f64) -> String {
    let mut out = String::new();

    out.push_str(&format!("=== pmac - Planck mean polynomial fit ({species_label}) ===\n"));
    out.push_str(&format!(
        "Points: n={} | T=[{:.1}, {:.1}] K | unit coefficient={}\n",
        fit.points.len(),
        fit.points.first().map_or(f64::NAN, |p| p.temperature),
        fit.points.last().map_or(f64::NAN, |p| p.temperature),
        fmt_sci(coef, 1, false),
    ));
    out.push_str(&format!(
        "Threshold: {:.1} K | mismatch at threshold: {:.3}%\n",
        fit.pair.t_thresh,
        fit.threshold_mismatch * 100.0
    ));

    out.push_str("\nRegime diagnostics:\n");
    out.push_str(&format_regime("low", &fit.low));
    out.push_str(&format_regime("high", &fit.high));
    out.push_str(&format!(
        "  max relative residual (piecewise): {:.3}%\n",
        crate::report::max_relative_residual(fitted) * 100.0
    ));

    out.push_str("\nCoefficients:\n");
    out.push_str(&format_coefficients(&fit.pair));
    out
}

fn format_regime(label: &str, fit: &RegimeFit) -> String {
    format!(
        "  {label:<5} n={:<4} T=[{:.1}, {:.1}] K  SSE={}  RMSE={}\n",
        fit.n,
        fit.t_min,
        fit.t_max,
        fmt_sci(fit.sse, 3, false),
        fmt_sci(fit.rmse, 3, false)
    )
}

/// Coefficient table, one `a_i` per row.
pub fn format_coefficients(pair: &PolynomialPair) -> String {
    let mut out = String::new();
    out.push_str(&format!("{:<4} {:>14} {:>14}\n", "", "low", "high"));
    for (i, (lo, hi)) in pair.low.iter().zip(&pair.high).enumerate() {
        out.push_str(&format!(
            "{:<4} {:>14} {:>14}\n",
            format!("a{i}"),
            fmt_sci(*lo, 6, false),
            fmt_sci(*hi, 6, false)
        ));
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sci_matches_printf_style() {
        assert_eq!(fmt_sci(800.0, 0, false), "8e+02");
        assert_eq!(fmt_sci(1.23456, 6, false), "1.234560e+00");
        assert_eq!(fmt_sci(1.5e-5, 1, false), "1.5e-05");
        assert_eq!(fmt_sci(-2.5e-123, 2, false), "-2.50e-123");
        assert_eq!(fmt_sci(0.0, 3, true), "0.000E+00");
        assert_eq!(fmt_sci(300.0, 3, true), "3.000E+02");
        assert_eq!(fmt_sci(f64::NAN, 3, false), "nan");
        assert_eq!(fmt_sci(f64::NEG_INFINITY, 3, true), "-INF");
    }

    #[test]
    fn compact_drops_integral_fraction() {
        assert_eq!(fmt_compact(1300.0), "1300");
        assert_eq!(fmt_compact(40.25), "40.25");
    }

    #[test]
    fn kp_line_layout() {
        let line = format_kp_line(&KpPoint {
            temperature: 300.0,
            kp: 0.12345,
        });
        assert_eq!(line, "kp: 1.2345E-01 @ 3.000E+02 [K]");
    }

    #[test]
    fn lp_line_layout() {
        let env = Environment::new(1300.0, 40.0).unwrap();
        let planck = PlanckLength {
            u: vec![],
            g: vec![],
            inverse_length: 1.0 / 0.012345,
            length: 0.012345,
        };
        assert_eq!(
            format_lp_line(Species::Co2, &env, &planck),
            "Optical thickness of CO2 @ T = 1300.0 [K], P = 40.0 [atm]: 1.2345e-02 [cm]"
        );
    }

    #[test]
    fn coefficient_table_has_one_row_per_power() {
        let pair = PolynomialPair {
            t_thresh: 800.0,
            low: vec![1.0, 2.0],
            high: vec![3.0, 4.0],
        };
        let txt = format_coefficients(&pair);
        assert_eq!(txt.lines().count(), 3);
        assert!(txt.contains("a1"));
        assert!(txt.contains("4.000000e+00"));
    }
}
