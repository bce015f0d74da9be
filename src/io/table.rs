//! The `(T, kp)` table.
//!
//! Layout (header row + one row per temperature):
//!
//! ```text
//! T[K],kp[cm-1 * atm-1]
//! 300.0,0.123
//! ```
//!
//! On read, header names are trimmed and a UTF-8 BOM is ignored. Rows that
//! fail to parse are skipped and reported.

use std::collections::HashMap;
use std::fs::File;
use std::path::Path;

use csv::StringRecord;

use crate::domain::KpPoint;
use crate::error::AppError;
use crate::io::ensure_parent_dir;

pub const COL_TEMPERATURE: &str = "T[K]";
pub const COL_KP: &str = "kp[cm-1 * atm-1]";

/// Write the kp table.
pub fn write_kp_table(path: &Path, points: &[KpPoint]) -> Result<(), AppError> {
    ensure_parent_dir(path)?;
    let mut writer = csv::Writer::from_path(path)
        .map_err(|e| AppError::new(2, format!("Failed to create table CSV '{}': {e}", path.display())))?;
    for p in points {
        writer
            .serialize(p)
            .map_err(|e| AppError::new(2, format!("Failed to write table CSV row: {e}")))?;
    }
    writer
        .flush()
        .map_err(|e| AppError::new(2, format!("Failed to flush table CSV: {e}")))?;
    Ok(())
}

/// Read a kp table, sorted by temperature.
pub fn read_kp_table(path: &Path) -> Result<Vec<KpPoint>, AppError> {
    let file = File::open(path)
        .map_err(|e| AppError::new(2, format!("Failed to open table CSV '{}': {e}", path.display())))?;

    let mut reader = csv::ReaderBuilder::new()
        .flexible(true)
        .trim(csv::Trim::All)
        .from_reader(file);

    let headers = reader
        .headers()
        .map_err(|e| AppError::new(2, format!("Failed to read CSV headers: {e}")))?
        .clone();
    let header_map = build_header_map(&headers);

    let col_t = *header_map
        .get(&normalize_header_name(COL_TEMPERATURE))
        .ok_or_else(|| AppError::new(2, format!("Missing required column: `{COL_TEMPERATURE}`")))?;
    let col_kp = *header_map
        .get(&normalize_header_name(COL_KP))
        .ok_or_else(|| AppError::new(2, format!("Missing required column: `{COL_KP}`")))?;

    let mut points = Vec::new();
    let mut skipped = 0usize;
    for (idx, result) in reader.records().enumerate() {
        // records() starts at line 2 (after the header)
        let line = idx + 2;
        let parsed = result
            .map_err(|e| format!("CSV parse error: {e}"))
            .and_then(|record| parse_row(&record, col_t, col_kp));
        match parsed {
            Ok(p) => points.push(p),
            Err(msg) => {
                skipped += 1;
                log::warn!("{}:{line}: skipped row: {msg}", path.display());
            }
        }
    }

    if points.is_empty() {
        return Err(AppError::new(
            3,
            format!("No valid rows in table CSV '{}' ({skipped} skipped).", path.display()),
        ));
    }

    points.sort_by(|a, b| a.temperature.total_cmp(&b.temperature));
    Ok(points)
}

fn parse_row(record: &StringRecord, col_t: usize, col_kp: usize) -> Result<KpPoint, String> {
    let temperature = parse_f64(record.get(col_t), COL_TEMPERATURE)?;
    let kp = parse_f64(record.get(col_kp), COL_KP)?;
    Ok(KpPoint { temperature, kp })
}

fn parse_f64(raw: Option<&str>, name: &str) -> Result<f64, String> {
    let raw = raw.ok_or_else(|| format!("missing `{name}`"))?;
    let v = raw
        .parse::<f64>()
        .map_err(|e| format!("invalid `{name}` '{raw}': {e}"))?;
    if v.is_finite() {
        Ok(v)
    } else {
        Err(format!("non-finite `{name}`"))
    }
}

fn build_header_map(headers: &StringRecord) -> HashMap<String, usize> {
    headers
        .iter()
        .enumerate()
        .map(|(idx, name)| (normalize_header_name(name), idx))
        .collect()
}

fn normalize_header_name(name: &str) -> String {
    let name = name.trim().trim_start_matches('\u{feff}');
    name.to_ascii_lowercase()
}
