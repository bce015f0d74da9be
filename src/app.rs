//! Top-level application orchestration.
//!
//! `src/main.rs` only sets up logging and maps the error to an exit code; this
//! module parses arguments, builds resolved configs, runs the pipeline and
//! writes/prints the results.

use std::path::PathBuf;

use clap::Parser;

use crate::cli::{Command, FetchArgs, FitArgs, GridArgs, LpArgs, PlotArgs, TableArgs};
use crate::data::{CacheStatus, HitranClient, LineCache, ensure_cached};
use crate::domain::{Environment, FetchConfig, FitConfig, GridOptions, LpConfig, TableConfig};
use crate::error::AppError;
use crate::report::fmt_compact;

pub mod pipeline;

/// Entry point for the `pmac` binary.
pub fn run() -> Result<(), AppError> {
    let cli = crate::cli::Cli::parse();

    match cli.command {
        Command::Fetch(args) => handle_fetch(args),
        Command::Lp(args) => handle_lp(args),
        Command::Table(args) => handle_table(args),
        Command::Fit(args) => handle_fit(args),
        Command::Plot(args) => handle_plot(args),
    }
}

fn handle_fetch(args: FetchArgs) -> Result<(), AppError> {
    let config = fetch_config_from_args(&args);
    let client = HitranClient::from_env()?;
    let cache = LineCache::new(&config.data_dir);
    match ensure_cached(&cache, &client, &config)? {
        CacheStatus::Hit => println!(
            "{} already cached in {} (use --refresh to download again)",
            config.species,
            cache.dir().display()
        ),
        CacheStatus::Fetched => {
            let header = cache.read_header(config.species.name())?;
            println!(
                "Fetched {} records of {} into {}",
                header.number_of_rows,
                config.species,
                cache.data_path(config.species.name()).display()
            );
        }
    }
    Ok(())
}

fn handle_lp(args: LpArgs) -> Result<(), AppError> {
    let config = lp_config_from_args(&args)?;
    let client = HitranClient::from_env()?;
    let out = pipeline::run_lp(&config, &client)?;

    crate::io::spectrum::write_spectrum_csv(&config.output, &out.spectrum, &out.planck)?;
    log::info!("Wrote {}", config.output.display());

    println!(
        "{}",
        crate::report::format_lp_line(config.fetch.species, &config.environment, &out.planck)
    );
    Ok(())
}

fn handle_table(args: TableArgs) -> Result<(), AppError> {
    let config = table_config_from_args(&args);
    let client = HitranClient::from_env()?;
    let out = pipeline::run_table(&config, &client, &mut |point| {
        println!("{}", crate::report::format_kp_line(point));
    })?;

    crate::io::table::write_kp_table(&config.output, &out.points)?;
    log::info!("Wrote {} rows to {}", out.points.len(), config.output.display());
    Ok(())
}

fn handle_fit(args: FitArgs) -> Result<(), AppError> {
    let config = fit_config_from_args(&args);
    let out = pipeline::run_fit(&config)?;

    crate::io::coeffs::write_coeffs(&config.output, &out.split.pair)?;
    log::info!("Wrote {}", config.output.display());

    println!(
        "{}",
        crate::report::format_fit_summary(args.species.name(), &out.split, &out.fitted, config.coef)
    );

    if config.plot {
        let plot = crate::plot::render_fit_plot(&out.fitted, &out.split.pair, config.plot_width, config.plot_height);
        println!("{plot}");
    }
    Ok(())
}

fn handle_plot(args: PlotArgs) -> Result<(), AppError> {
    if !(args.t_start.is_finite() && args.t_end.is_finite() && args.t_end > args.t_start) {
        return Err(AppError::new(
            2,
            format!("Invalid plot range: [{}, {}] K.", args.t_start, args.t_end),
        ));
    }
    let pair = crate::io::coeffs::read_coeffs(&args.coeffs)?;

    println!("{}", crate::report::format_coefficients(&pair));
    let plot = crate::plot::render_curve_plot(&pair, args.t_start, args.t_end, args.width, args.height);
    println!("{plot}");
    Ok(())
}

pub fn fetch_config_from_args(args: &FetchArgs) -> FetchConfig {
    FetchConfig {
        species: args.species,
        isotopologue: args.isotopologue,
        numin: args.numin,
        numax: args.numax,
        data_dir: args.data_dir.clone(),
        refresh: args.refresh,
    }
}

pub fn grid_options_from_args(args: &GridArgs) -> GridOptions {
    GridOptions {
        step: args.step,
        wing_hw: args.wing,
        range: args.nu_start.zip(args.nu_end),
        line_shape: args.line_shape,
    }
}

pub fn lp_config_from_args(args: &LpArgs) -> Result<LpConfig, AppError> {
    let environment = Environment::new(args.temperature, args.pressure)?;
    let output = args.output.clone().unwrap_or_else(|| {
        PathBuf::from("CSV").join(format!(
            "{}_T{}_P{}.csv",
            args.fetch.species,
            fmt_compact(args.temperature),
            fmt_compact(args.pressure)
        ))
    });
    Ok(LpConfig {
        fetch: fetch_config_from_args(&args.fetch),
        environment,
        grid: grid_options_from_args(&args.grid),
        output,
    })
}

pub fn table_config_from_args(args: &TableArgs) -> TableConfig {
    TableConfig {
        fetch: fetch_config_from_args(&args.fetch_args()),
        t_start: args.t_start,
        t_end: args.t_end,
        t_steps: args.t_steps,
        pressure: args.pressure,
        grid: grid_options_from_args(&args.grid),
        output: args
            .output
            .clone()
            .unwrap_or_else(|| PathBuf::from(format!("PMAC_{}.csv", args.species))),
    }
}

pub fn fit_config_from_args(args: &FitArgs) -> FitConfig {
    FitConfig {
        input: args
            .input
            .clone()
            .unwrap_or_else(|| PathBuf::from(format!("PMAC_{}.csv", args.species))),
        output: args
            .output
            .clone()
            .unwrap_or_else(|| PathBuf::from(format!("coeffs_{}.dat", args.species))),
        order: args.order,
        t_thresh: args.t_thresh,
        overlap: args.overlap,
        coef: args.coef,
        plot: !args.no_plot,
        plot_width: args.width,
        plot_height: args.height,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cli::Cli;
    use crate::domain::Species;

    fn parse(argv: &[&str]) -> Command {
        Cli::try_parse_from(argv).unwrap().command
    }

    #[test]
    fn lp_default_output_names_the_condition() {
        let Command::Lp(args) = parse(&["pmac", "lp"]) else {
            panic!("expected lp");
        };
        let config = lp_config_from_args(&args).unwrap();
        assert_eq!(config.output, PathBuf::from("CSV").join("CO2_T1300_P40.csv"));
        assert_eq!(config.grid.range, None);
    }

    #[test]
    fn lp_rejects_non_physical_condition() {
        let Command::Lp(args) = parse(&["pmac", "lp", "--temperature=-5"]) else {
            panic!("expected lp");
        };
        assert_eq!(lp_config_from_args(&args).unwrap_err().exit_code(), 2);
    }

    #[test]
    fn table_and_fit_share_file_names() {
        let Command::Table(table) = parse(&["pmac", "table", "-s", "CH4"]) else {
            panic!("expected table");
        };
        let Command::Fit(fit) = parse(&["pmac", "fit", "-s", "CH4"]) else {
            panic!("expected fit");
        };
        let table = table_config_from_args(&table);
        let fit = fit_config_from_args(&fit);
        assert_eq!(table.fetch.species, Species::Ch4);
        assert_eq!(table.fetch.numax, 100_000.0);
        assert_eq!(table.fetch.data_dir, PathBuf::from("data"));
        assert_eq!(table.output, fit.input);
        assert_eq!(fit.output, PathBuf::from("coeffs_CH4.dat"));
        assert!(fit.plot);
    }

    #[test]
    fn explicit_grid_range_is_kept() {
        let Command::Lp(args) = parse(&["pmac", "lp", "--nu-start", "2000", "--nu-end", "2300"]) else {
            panic!("expected lp");
        };
        let config = lp_config_from_args(&args).unwrap();
        assert_eq!(config.grid.range, Some((2000.0, 2300.0)));
    }
}
