//! HITRAN `.par` record parsing.
//!
//! The 160-character `.par` format is fixed width. We only read the leading
//! fields that line-by-line synthesis needs:
//!
//! | field        | columns | format |
//! |--------------|---------|--------|
//! | molecule id  | 1-2     | I2     |
//! | isotopologue | 3       | I1     |
//! | ν            | 4-15    | F12.6  |
//! | S            | 16-25   | E10.3  |
//! | A            | 26-35   | E10.3  |
//! | γ_air        | 36-40   | F5.4   |
//! | γ_self       | 41-45   | F5.3   |
//! | E''          | 46-55   | F10.4  |
//! | n_air        | 56-59   | F4.2   |
//! | δ_air        | 60-67   | F8.6   |
//!
//! Malformed records are skipped and reported, not fatal.

use crate::domain::SpectralLine;

/// Minimum record width needed to reach the end of `δ_air`.
const MIN_RECORD_LEN: usize = 67;

/// A record that could not be parsed.
#[derive(Debug, Clone)]
pub struct RowError {
    pub line: usize,
    pub message: String,
}

/// Parse output: good lines plus the records that were skipped.
#[derive(Debug, Clone, Default)]
pub struct ParsedPar {
    pub lines: Vec<SpectralLine>,
    pub row_errors: Vec<RowError>,
}

/// Parse a `.par` text blob, keeping only lines of `(molecule_id, local_iso_id)`.
pub fn parse_par(text: &str, molecule_id: u8, local_iso_id: u8) -> ParsedPar {
    let mut out = ParsedPar::default();
    for (idx, raw) in text.lines().enumerate() {
        if raw.trim().is_empty() {
            continue;
        }
        match parse_par_record(raw) {
            Ok(line) if line.molecule_id == molecule_id && line.local_iso_id == local_iso_id => {
                out.lines.push(line)
            }
            Ok(_) => {} // other isotopologue
            Err(message) => out.row_errors.push(RowError {
                line: idx + 1,
                message,
            }),
        }
    }
    out
}

/// Parse one fixed-width `.par` record.
pub fn parse_par_record(raw: &str) -> Result<SpectralLine, String> {
    if !raw.is_ascii() {
        return Err("record contains non-ASCII characters".to_string());
    }
    if raw.len() < MIN_RECORD_LEN {
        return Err(format!(
            "record too short ({} chars, need {MIN_RECORD_LEN})",
            raw.len()
        ));
    }

    let molecule_id = field(raw, 0, 2, "molecule id")?
        .parse::<u8>()
        .map_err(|e| format!("invalid molecule id: {e}"))?;
    let local_iso_id = parse_iso_char(&raw[2..3])?;

    Ok(SpectralLine {
        molecule_id,
        local_iso_id,
        nu: float(raw, 3, 15, "nu")?,
        sw: float(raw, 15, 25, "sw")?,
        a: float(raw, 25, 35, "a")?,
        gamma_air: float(raw, 35, 40, "gamma_air")?,
        gamma_self: float(raw, 40, 45, "gamma_self")?,
        elower: float(raw, 45, 55, "elower")?,
        n_air: float(raw, 55, 59, "n_air")?,
        delta_air: float(raw, 59, 67, "delta_air")?,
    })
}

/// Isotopologue ids 10, 11, 12 are written as `0`, `A`, `B`.
fn parse_iso_char(s: &str) -> Result<u8, String> {
    match s {
        "0" => Ok(10),
        "A" => Ok(11),
        "B" => Ok(12),
        d => d
            .parse::<u8>()
            .map_err(|_| format!("invalid isotopologue id '{d}'")),
    }
}

fn field<'a>(raw: &'a str, start: usize, end: usize, name: &str) -> Result<&'a str, String> {
    let s = raw[start..end].trim();
    if s.is_empty() {
        return Err(format!("missing {name}"));
    }
    Ok(s)
}

fn float(raw: &str, start: usize, end: usize, name: &str) -> Result<f64, String> {
    let s = field(raw, start, end, name)?;
    let v = s
        .parse::<f64>()
        .map_err(|e| format!("invalid {name} '{s}': {e}"))?;
    if v.is_finite() {
        Ok(v)
    } else {
        Err(format!("non-finite {name}"))
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;

    /// Two CO (5,1) records, truncated after δ_air.
    pub(crate) const CO_SAMPLE: &str = concat!(
        " 51 2143.271100 3.600E-19 1.186E+01.05980.067   11.53500.69-.002570\n",
        " 51 2147.081100 4.494E-19 1.209E+01.05730.065   23.06950.69-.002690\n",
    );

    #[test]
    fn parses_fixed_width_fields() {
        let line = parse_par_record(CO_SAMPLE.lines().next().unwrap()).unwrap();
        assert_eq!(line.molecule_id, 5);
        assert_eq!(line.local_iso_id, 1);
        assert!((line.nu - 2143.2711).abs() < 1e-9);
        assert!((line.sw - 3.6e-19).abs() < 1e-30);
        assert!((line.a - 11.86).abs() < 1e-9);
        assert!((line.gamma_air - 0.0598).abs() < 1e-12);
        assert!((line.gamma_self - 0.067).abs() < 1e-12);
        assert!((line.elower - 11.535).abs() < 1e-9);
        assert!((line.n_air - 0.69).abs() < 1e-12);
        assert!((line.delta_air + 0.00257).abs() < 1e-12);
    }

    #[test]
    fn filters_by_isotopologue_and_reports_bad_rows() {
        let mut text = CO_SAMPLE.to_string();
        text.push_str(" 52 2100.000000 1.000E-21 1.000E+01.05000.060   10.00000.70-.002000\n");
        text.push_str("garbage\n\n");
        let parsed = parse_par(&text, 5, 1);
        assert_eq!(parsed.lines.len(), 2);
        assert_eq!(parsed.row_errors.len(), 1);
        assert_eq!(parsed.row_errors[0].line, 4);
    }

    #[test]
    fn extended_isotopologue_ids() {
        assert_eq!(parse_iso_char("0").unwrap(), 10);
        assert_eq!(parse_iso_char("A").unwrap(), 11);
        assert_eq!(parse_iso_char("B").unwrap(), 12);
        assert!(parse_iso_char("x").is_err());
    }
}
