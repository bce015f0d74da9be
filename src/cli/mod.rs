//! Command-line parsing for `pmac`.
//!
//! Argument parsing and command dispatch stay separate from the physics and
//! fitting code: `app` turns these structs into resolved configs.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

use crate::domain::{LineShape, Species};

/// Top-level CLI.
#[derive(Debug, Parser)]
#[command(name = "pmac", version, about = "Planck mean absorption coefficients from HITRAN line data")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

/// CLI subcommands.
#[derive(Debug, Subcommand)]
pub enum Command {
    /// Download a species' line list into the local cache.
    Fetch(FetchArgs),
    /// Planck mean absorption length at one temperature and pressure.
    Lp(LpArgs),
    /// Tabulate the Planck mean absorption coefficient over a temperature grid.
    Table(TableArgs),
    /// Fit low/high temperature polynomials to a kp table.
    Fit(FitArgs),
    /// Plot a coefficient file over a temperature range.
    Plot(PlotArgs),
}

/// Which line list to use and where it is cached.
#[derive(Debug, Args, Clone)]
pub struct FetchArgs {
    /// Species (H2O, CO2, CO, CH4, H2CO, H2O2, SF6).
    #[arg(short = 's', long, value_enum, default_value_t = Species::Co2)]
    pub species: Species,

    /// Local isotopologue id.
    #[arg(short = 'i', long, default_value_t = 1)]
    pub isotopologue: u8,

    /// Fetch window start [cm-1].
    #[arg(long, default_value_t = 0.0)]
    pub numin: f64,

    /// Fetch window end [cm-1].
    #[arg(long, default_value_t = 10000.0)]
    pub numax: f64,

    /// Cache directory.
    #[arg(long, default_value = "data")]
    pub data_dir: PathBuf,

    /// Re-download even if the table is cached.
    #[arg(long)]
    pub refresh: bool,
}

/// Spectral grid options.
#[derive(Debug, Args, Clone)]
pub struct GridArgs {
    /// Wavenumber step [cm-1].
    #[arg(long, default_value_t = 0.01)]
    pub step: f64,

    /// Line wing cutoff [half widths].
    #[arg(long, default_value_t = 50.0)]
    pub wing: f64,

    /// Grid start [cm-1] (defaults to the first line).
    #[arg(long, requires = "nu_end")]
    pub nu_start: Option<f64>,

    /// Grid end [cm-1] (defaults to the last line).
    #[arg(long, requires = "nu_start")]
    pub nu_end: Option<f64>,

    /// Line-shape model.
    #[arg(long, value_enum, default_value_t = LineShape::Voigt)]
    pub line_shape: LineShape,
}

/// Options for `pmac lp`.
#[derive(Debug, Args, Clone)]
pub struct LpArgs {
    #[command(flatten)]
    pub fetch: FetchArgs,

    #[command(flatten)]
    pub grid: GridArgs,

    /// Temperature [K].
    #[arg(short = 't', long, default_value_t = 1300.0)]
    pub temperature: f64,

    /// Pressure [atm].
    #[arg(short = 'p', long, default_value_t = 40.0)]
    pub pressure: f64,

    /// Spectrum CSV path (default `CSV/<species>_T<T>_P<P>.csv`).
    #[arg(short = 'o', long)]
    pub output: Option<PathBuf>,
}

/// Options for `pmac table`.
#[derive(Debug, Args, Clone)]
pub struct TableArgs {
    /// Species (H2O, CO2, CO, CH4, H2CO, H2O2, SF6).
    #[arg(short = 's', long, value_enum, default_value_t = Species::Co)]
    pub species: Species,

    /// Local isotopologue id.
    #[arg(short = 'i', long, default_value_t = 1)]
    pub isotopologue: u8,

    /// Fetch window start [cm-1].
    #[arg(long, default_value_t = 0.0)]
    pub numin: f64,

    /// Fetch window end [cm-1].
    #[arg(long, default_value_t = 100000.0)]
    pub numax: f64,

    /// Cache directory.
    #[arg(long, default_value = "data")]
    pub data_dir: PathBuf,

    /// Re-download even if the table is cached.
    #[arg(long)]
    pub refresh: bool,

    #[command(flatten)]
    pub grid: GridArgs,

    /// First temperature [K].
    #[arg(long, default_value_t = 300.0)]
    pub t_start: f64,

    /// Last temperature [K] (inclusive).
    #[arg(long, default_value_t = 3000.0)]
    pub t_end: f64,

    /// Number of temperatures.
    #[arg(long, default_value_t = 100)]
    pub t_steps: usize,

    /// Pressure [atm]; kp is reported per atm.
    #[arg(short = 'p', long, default_value_t = 1.0)]
    pub pressure: f64,

    /// Table CSV path (default `PMAC_<species>.csv`).
    #[arg(short = 'o', long)]
    pub output: Option<PathBuf>,
}

impl TableArgs {
    /// The line-list selection of this command, with `table`'s own defaults.
    pub fn fetch_args(&self) -> FetchArgs {
        FetchArgs {
            species: self.species,
            isotopologue: self.isotopologue,
            numin: self.numin,
            numax: self.numax,
            data_dir: self.data_dir.clone(),
            refresh: self.refresh,
        }
    }
}

/// Options for `pmac fit`.
#[derive(Debug, Args, Clone)]
pub struct FitArgs {
    /// Species whose table is fitted (sets the default file names).
    #[arg(short = 's', long, value_enum, default_value_t = Species::Co)]
    pub species: Species,

    /// Table CSV (default `PMAC_<species>.csv`).
    #[arg(long)]
    pub input: Option<PathBuf>,

    /// Coefficient file (default `coeffs_<species>.dat`).
    #[arg(short = 'o', long)]
    pub output: Option<PathBuf>,

    /// Number of polynomial coefficients.
    #[arg(long, default_value_t = 6)]
    pub order: usize,

    /// Threshold temperature between the low and high fits [K].
    #[arg(long, default_value_t = 800.0)]
    pub t_thresh: f64,

    /// Fractional overlap of the two fit ranges around the threshold.
    #[arg(long, default_value_t = 0.1)]
    pub overlap: f64,

    /// Multiplier applied to kp before fitting (1e2: atm-1 m-1, 1: atm-1 cm-1).
    #[arg(long, default_value_t = 1e2)]
    pub coef: f64,

    /// Disable the terminal plot.
    #[arg(long)]
    pub no_plot: bool,

    /// Plot width (columns).
    #[arg(long, default_value_t = 100)]
    pub width: usize,

    /// Plot height (rows).
    #[arg(long, default_value_t = 25)]
    pub height: usize,
}

/// Options for plotting a saved coefficient file.
#[derive(Debug, Args, Clone)]
pub struct PlotArgs {
    /// Coefficient file produced by `pmac fit`.
    #[arg(long, value_name = "DAT")]
    pub coeffs: PathBuf,

    /// First temperature [K].
    #[arg(long, default_value_t = 300.0)]
    pub t_start: f64,

    /// Last temperature [K].
    #[arg(long, default_value_t = 3000.0)]
    pub t_end: f64,

    /// Plot width (columns).
    #[arg(long, default_value_t = 100)]
    pub width: usize,

    /// Plot height (rows).
    #[arg(long, default_value_t = 25)]
    pub height: usize,
}
