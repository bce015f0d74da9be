//! Shared pipeline logic behind the subcommands.
//!
//! Each function computes and returns its outputs; `app` decides what gets
//! printed and written. The line source is passed in so the whole chain can
//! run against a fake source in tests.
//!
//! lp:    cache -> load -> synthesize k(ν) -> Lp
//! table: cache -> load -> for each T: synthesize k(ν) -> kp(T)
//! fit:   read table -> split fit -> residuals

use crate::absorption::absorption_coefficient;
use crate::data::{CacheStatus, LineCache, LineSource, LineTable, ensure_cached};
use crate::domain::{Environment, FetchConfig, FitConfig, KpPoint, LpConfig, Spectrum, TableConfig};
use crate::error::AppError;
use crate::fit::{SplitFit, fit_split};
use crate::io::table::read_kp_table;
use crate::math::linspace;
use crate::physics::{PlanckLength, planck_mean_coefficient, planck_mean_length};
use crate::report::{FittedPoint, compute_residuals};

/// Outputs of `pmac lp`.
#[derive(Debug, Clone)]
pub struct LpOutput {
    pub status: CacheStatus,
    pub spectrum: Spectrum,
    pub planck: PlanckLength,
}

/// Outputs of `pmac table`.
#[derive(Debug, Clone)]
pub struct TableOutput {
    pub status: CacheStatus,
    pub points: Vec<KpPoint>,
}

/// Outputs of `pmac fit`.
#[derive(Debug, Clone)]
pub struct FitOutput {
    pub split: SplitFit,
    pub fitted: Vec<FittedPoint>,
}

/// Ensure the table is cached and load it.
pub fn load_lines(config: &FetchConfig, source: &dyn LineSource) -> Result<(CacheStatus, LineTable), AppError> {
    let cache = LineCache::new(&config.data_dir);
    let status = ensure_cached(&cache, source, config)?;
    let table = cache.load(config.species.name())?;
    Ok((status, table))
}

/// Absorption spectrum and Planck mean absorption length at one condition.
pub fn run_lp(config: &LpConfig, source: &dyn LineSource) -> Result<LpOutput, AppError> {
    let (status, table) = load_lines(&config.fetch, source)?;
    let spectrum = absorption_coefficient(&table, &config.environment, &config.grid)?;
    let planck = planck_mean_length(&spectrum, config.environment.temperature)?;
    log::info!(
        "Lp of {} at T={} K, p={} atm: {:.4e} cm over {} grid points",
        config.fetch.species,
        config.environment.temperature,
        config.environment.pressure,
        planck.length,
        spectrum.len()
    );
    Ok(LpOutput { status, spectrum, planck })
}

/// Planck mean absorption coefficient per atm over the configured temperature grid.
///
/// `on_point` sees each point as soon as it is computed.
pub fn run_table(
    config: &TableConfig,
    source: &dyn LineSource,
    on_point: &mut dyn FnMut(&KpPoint),
) -> Result<TableOutput, AppError> {
    let temperatures = linspace(config.t_start, config.t_end, config.t_steps)?;
    if temperatures.iter().any(|t| !(t.is_finite() && *t > 0.0)) {
        return Err(AppError::new(
            2,
            format!("Temperature grid [{}, {}] must be positive.", config.t_start, config.t_end),
        ));
    }

    let (status, table) = load_lines(&config.fetch, source)?;

    let mut points = Vec::with_capacity(temperatures.len());
    for (i, &t) in temperatures.iter().enumerate() {
        let env = Environment::new(t, config.pressure)?;
        let spectrum = absorption_coefficient(&table, &env, &config.grid)?;
        let kp = planck_mean_coefficient(&spectrum, t)? / config.pressure;
        log::debug!("[{}/{}] T={t:.1} K kp={kp:.4e} cm-1 atm-1", i + 1, temperatures.len());
        let point = KpPoint { temperature: t, kp };
        on_point(&point);
        points.push(point);
    }

    Ok(TableOutput { status, points })
}

/// Fit the piecewise polynomial to a kp table on disk.
pub fn run_fit(config: &FitConfig) -> Result<FitOutput, AppError> {
    let points = read_kp_table(&config.input)?;
    let split = fit_split(&points, config)?;
    let fitted = compute_residuals(&split.points, &split.pair)?;
    Ok(FitOutput { split, fitted })
}
