//! Annotated polynomial coefficient file.
//!
//! ```text
//! <memo>
//! 6th order polynomial coefficients for Planck mean absorption coefficients
//! 2 polynomials for each temperature range, Higher or Lower than 800 [K]
//! In <data> section...
//! T_THRESH[K]
//! a0Low[cm-1 * atm-1], a0High[cm-1 * atm-1]
//! a1Low[cm-1 * atm-1], a1High[cm-1 * atm-1]
//! .............
//! a5Low[cm-1 * atm-1], a5High[cm-1 * atm-1]
//! <memo>
//! <data>
//! 8e+02
//! 1.234560e+00,7.654321e-01
//! ...
//! <data>
//! ```
//!
//! Consumers (combustion radiation models) read the `<data>` block positionally.

use std::fs;
use std::path::Path;

use crate::domain::PolynomialPair;
use crate::error::AppError;
use crate::io::ensure_parent_dir;
use crate::report::{fmt_compact, fmt_sci};

const MEMO: &str = "<memo>";
const DATA: &str = "<data>";

/// Render the coefficient file contents.
pub fn render_coeffs(pair: &PolynomialPair) -> String {
    let order = pair.order();
    let last = order.saturating_sub(1);
    let mut out = String::new();

    out.push_str(MEMO);
    out.push('\n');
    out.push_str(&format!(
        "{order}th order polynomial coefficients for Planck mean absorption coefficients\n"
    ));
    out.push_str(&format!(
        "2 polynomials for each temperature range, Higher or Lower than {} [K]\n",
        fmt_compact(pair.t_thresh)
    ));
    out.push_str("In <data> section...\n");
    out.push_str("T_THRESH[K]\n");
    out.push_str("a0Low[cm-1 * atm-1], a0High[cm-1 * atm-1]\n");
    out.push_str("a1Low[cm-1 * atm-1], a1High[cm-1 * atm-1]\n");
    out.push_str(".............\n");
    out.push_str(&format!("a{last}Low[cm-1 * atm-1], a{last}High[cm-1 * atm-1]\n"));
    out.push_str(MEMO);
    out.push('\n');

    out.push_str(DATA);
    out.push('\n');
    out.push_str(&fmt_sci(pair.t_thresh, 0, false));
    out.push('\n');
    for (lo, hi) in pair.low.iter().zip(&pair.high) {
        out.push_str(&format!("{},{}\n", fmt_sci(*lo, 6, false), fmt_sci(*hi, 6, false)));
    }
    out.push_str(DATA);
    out.push('\n');

    out
}

/// Write the coefficient file.
pub fn write_coeffs(path: &Path, pair: &PolynomialPair) -> Result<(), AppError> {
    ensure_parent_dir(path)?;
    fs::write(path, render_coeffs(pair))
        .map_err(|e| AppError::new(2, format!("Failed to write coefficients '{}': {e}", path.display())))
}

/// Read a coefficient file back into a polynomial pair.
pub fn read_coeffs(path: &Path) -> Result<PolynomialPair, AppError> {
    let text = fs::read_to_string(path)
        .map_err(|e| AppError::new(2, format!("Failed to open coefficients '{}': {e}", path.display())))?;
    parse_coeffs(&text).map_err(|msg| AppError::new(2, format!("Invalid coefficients file '{}': {msg}", path.display())))
}

/// Parse the `<data>` block of a coefficient file.
pub fn parse_coeffs(text: &str) -> Result<PolynomialPair, String> {
    let mut lines = text.lines().map(str::trim);
    // Skip to the opening <data> marker.
    lines
        .by_ref()
        .find(|l| *l == DATA)
        .ok_or("missing <data> section")?;

    let t_thresh = lines
        .next()
        .ok_or("missing threshold temperature")?
        .parse::<f64>()
        .map_err(|e| format!("invalid threshold temperature: {e}"))?;

    let mut low = Vec::new();
    let mut high = Vec::new();
    let mut closed = false;
    for l in lines {
        if l == DATA {
            closed = true;
            break;
        }
        if l.is_empty() {
            continue;
        }
        let (a, b) = l
            .split_once(',')
            .ok_or_else(|| format!("expected `low,high` pair, got '{l}'"))?;
        low.push(a.trim().parse::<f64>().map_err(|e| format!("invalid coefficient '{a}': {e}"))?);
        high.push(b.trim().parse::<f64>().map_err(|e| format!("invalid coefficient '{b}': {e}"))?);
    }

    if !closed {
        return Err("unterminated <data> section".to_string());
    }
    if low.is_empty() {
        return Err("no coefficients in <data> section".to_string());
    }

    Ok(PolynomialPair { t_thresh, low, high })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn pair() -> PolynomialPair {
        PolynomialPair {
            t_thresh: 800.0,
            low: vec![1.23456, -2.5e-3, 3.0e-6, -4.0e-9, 5.0e-12, -6.0e-15],
            high: vec![0.5, 1.0e-4, -2.0e-8, 3.0e-12, -4.0e-16, 5.0e-20],
        }
    }

    #[test]
    fn renders_exact_layout() {
        let text = render_coeffs(&pair());
        let expected = concat!(
            "<memo>\n",
            "6th order polynomial coefficients for Planck mean absorption coefficients\n",
            "2 polynomials for each temperature range, Higher or Lower than 800 [K]\n",
            "In <data> section...\n",
            "T_THRESH[K]\n",
            "a0Low[cm-1 * atm-1], a0High[cm-1 * atm-1]\n",
            "a1Low[cm-1 * atm-1], a1High[cm-1 * atm-1]\n",
            ".............\n",
            "a5Low[cm-1 * atm-1], a5High[cm-1 * atm-1]\n",
            "<memo>\n",
            "<data>\n",
            "8e+02\n",
            "1.234560e+00,5.000000e-01\n",
            "-2.500000e-03,1.000000e-04\n",
            "3.000000e-06,-2.000000e-08\n",
            "-4.000000e-09,3.000000e-12\n",
            "5.000000e-12,-4.000000e-16\n",
            "-6.000000e-15,5.000000e-20\n",
            "<data>\n",
        );
        assert_eq!(text, expected);
    }

    #[test]
    fn parses_rendered_file() {
        let back = parse_coeffs(&render_coeffs(&pair())).unwrap();
        assert_eq!(back.t_thresh, 800.0);
        assert_eq!(back.low.len(), 6);
        assert_eq!(back.high[1], 1.0e-4);
        assert_eq!(back.low[0], 1.23456);
    }

    #[test]
    fn rejects_truncated_file() {
        assert!(parse_coeffs("<memo>\n<memo>\n").is_err());
        assert!(parse_coeffs("<data>\n8e+02\n1.0,2.0\n").is_err());
        assert!(parse_coeffs("<data>\n8e+02\n1.0;2.0\n<data>\n").is_err());
    }
}
