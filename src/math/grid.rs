//! Sample grids.
//!
//! - `linspace` gives the temperature sweep (inclusive endpoints, fixed count).
//! - `uniform_grid` gives the wavenumber grid (fixed spacing).

use crate::error::AppError;

/// Generate `steps` evenly spaced points between `start` and `end` (inclusive).
pub fn linspace(start: f64, end: f64, steps: usize) -> Result<Vec<f64>, AppError> {
    if !(start.is_finite() && end.is_finite()) {
        return Err(AppError::new(
            2,
            format!("Invalid range: start={start}, end={end} (must be finite)."),
        ));
    }
    match steps {
        0 => return Err(AppError::new(2, "Grid steps must be >= 1.")),
        1 => return Ok(vec![start]),
        _ => {}
    }

    let step = (end - start) / (steps as f64 - 1.0);
    let mut out = Vec::with_capacity(steps);
    for i in 0..steps {
        out.push(start + step * i as f64);
    }
    // Pin the endpoint exactly; accumulated rounding otherwise leaves it a ulp off.
    out[steps - 1] = end;
    Ok(out)
}

/// Largest grid `uniform_grid` will build (80 MB per `f64` buffer).
pub const MAX_GRID_POINTS: usize = 10_000_000;

/// Generate a grid `start, start + step, ...` covering `[start, end)`.
///
/// Points are computed as `start + i * step` so rounding error does not accumulate.
pub fn uniform_grid(start: f64, end: f64, step: f64) -> Result<Vec<f64>, AppError> {
    if !(start.is_finite() && end.is_finite() && end > start) {
        return Err(AppError::new(
            2,
            format!("Invalid wavenumber range: [{start}, {end}] (must be finite with end > start)."),
        ));
    }
    if !(step.is_finite() && step > 0.0) {
        return Err(AppError::new(2, format!("Invalid grid step: {step} (must be > 0).")));
    }

    let n = ((end - start) / step).ceil();
    if n > MAX_GRID_POINTS as f64 {
        return Err(AppError::new(
            2,
            format!(
                "Grid [{start}, {end}) with step {step} needs {n:.0} points (limit {MAX_GRID_POINTS}); use a coarser step or a narrower range."
            ),
        ));
    }
    let n = n as usize;
    Ok((0..n.max(1)).map(|i| start + step * i as f64).collect())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn linspace_includes_endpoints() {
        let v = linspace(300.0, 3000.0, 100).unwrap();
        assert_eq!(v.len(), 100);
        assert_eq!(v[0], 300.0);
        assert_eq!(v[99], 3000.0);
        assert!((v[1] - v[0] - 2700.0 / 99.0).abs() < 1e-9);
    }

    #[test]
    fn linspace_single_point() {
        assert_eq!(linspace(5.0, 10.0, 1).unwrap(), vec![5.0]);
        assert!(linspace(5.0, 10.0, 0).is_err());
    }

    #[test]
    fn uniform_grid_is_half_open() {
        let v = uniform_grid(0.0, 1.0, 0.25).unwrap();
        assert_eq!(v, vec![0.0, 0.25, 0.5, 0.75]);
        assert!(uniform_grid(1.0, 1.0, 0.1).is_err());
        assert!(uniform_grid(0.0, 1.0, 0.0).is_err());
    }

    #[test]
    fn uniform_grid_rejects_oversized_grids() {
        let err = uniform_grid(0.0, 100_000.0, 1e-9).unwrap_err();
        assert_eq!(err.exit_code(), 2);
        assert!(uniform_grid(0.0, 100_000.0, 100_000.0 / (2.0 * MAX_GRID_POINTS as f64)).is_err());
        assert_eq!(uniform_grid(0.0, 1000.0, 0.5).unwrap().len(), 2000);
    }
}
