//! Polynomial evaluation for the kp(T) fits.
//!
//! The fitter relies on two primitive operations:
//! - build a design row for a given temperature (for least squares)
//! - evaluate `kp(T)` given the coefficients (for residuals/plots)

/// Fill a design row `[1, x, x^2, ...]`.
///
/// The row length is the number of coefficients.
pub fn fill_design_row(x: f64, out: &mut [f64]) {
    let mut power = 1.0;
    for slot in out.iter_mut() {
        *slot = power;
        power *= x;
    }
}

/// Evaluate `Σ a_i x^i` (Horner).
pub fn polyval(coeffs: &[f64], x: f64) -> f64 {
    coeffs.iter().rev().fold(0.0, |acc, &a| acc * x + a)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn design_row_is_ascending_powers() {
        let mut row = [0.0; 4];
        fill_design_row(2.0, &mut row);
        assert_eq!(row, [1.0, 2.0, 4.0, 8.0]);
    }

    #[test]
    fn polyval_matches_expanded_form() {
        let a = [1.0, -2.0, 0.5];
        let x = 3.0;
        assert_eq!(polyval(&a, x), 1.0 - 2.0 * x + 0.5 * x * x);
        assert_eq!(polyval(&[], x), 0.0);
    }
}
