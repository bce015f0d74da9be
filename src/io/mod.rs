//! File I/O.
//!
//! - `table`: read/write the `(T, kp)` CSV
//! - `spectrum`: write the per-wavenumber CSV of the `lp` command
//! - `coeffs`: write/read the annotated polynomial coefficient file

pub mod coeffs;
pub mod spectrum;
pub mod table;

use std::fs::create_dir_all;
use std::path::Path;

use crate::error::AppError;

/// Create the parent directory of `path` if it has one.
pub(crate) fn ensure_parent_dir(path: &Path) -> Result<(), AppError> {
    match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => create_dir_all(parent).map_err(|e| {
            AppError::new(2, format!("Failed to create directory '{}': {e}", parent.display()))
        }),
        _ => Ok(()),
    }
}
