//! HITRAN line-by-line API integration and the local line cache.
//!
//! A cached table `<name>` is two files in the data directory:
//!
//! - `<name>.data`: raw `.par` records as returned by the API
//! - `<name>.header`: JSON metadata (`CacheHeader`)
//!
//! The header is written last, so its presence marks a complete download.

use std::fs::{self, File};
use std::path::{Path, PathBuf};
use std::time::Duration;

use chrono::{DateTime, Utc};
use reqwest::blocking::Client;
use serde::{Deserialize, Serialize};

use crate::data::par::{RowError, parse_par};
use crate::domain::{FetchConfig, Isotopologue, Species, SpectralLine, isotopologue};
use crate::error::AppError;

const DEFAULT_HOST: &str = "https://hitran.org";
const API_PATH: &str = "/lbl/api";
const REQUEST_TIMEOUT: Duration = Duration::from_secs(600);

/// Anything that can produce raw `.par` text for an isotopologue and window.
pub trait LineSource {
    fn fetch_par(&self, iso: &Isotopologue, numin: f64, numax: f64) -> Result<String, AppError>;
}

pub struct HitranClient {
    client: Client,
    host: String,
    api_key: Option<String>,
}

impl HitranClient {
    /// Build a client from `HITRAN_HOST` / `HITRAN_API_KEY` (a `.env` file is honored).
    pub fn from_env() -> Result<Self, AppError> {
        dotenvy::dotenv().ok();
        let host = std::env::var("HITRAN_HOST").unwrap_or_else(|_| DEFAULT_HOST.to_string());
        let api_key = std::env::var("HITRAN_API_KEY").ok().filter(|k| !k.trim().is_empty());
        let client = Client::builder()
            .timeout(REQUEST_TIMEOUT)
            .build()
            .map_err(|e| AppError::new(4, format!("Failed to build HTTP client: {e}")))?;
        Ok(Self {
            client,
            host: host.trim_end_matches('/').to_string(),
            api_key,
        })
    }
}

impl LineSource for HitranClient {
    fn fetch_par(&self, iso: &Isotopologue, numin: f64, numax: f64) -> Result<String, AppError> {
        let url = format!("{}{}", self.host, API_PATH);
        let mut query: Vec<(&str, String)> = vec![
            ("iso_ids_list", iso.global_id.to_string()),
            ("numin", numin.to_string()),
            ("numax", numax.to_string()),
            ("fixwidth", "0".to_string()),
            ("sep", "[comma]".to_string()),
            ("request_params", "par_line".to_string()),
        ];
        if let Some(key) = &self.api_key {
            query.push(("api_key", key.clone()));
        }

        log::info!(
            "Fetching {} ({}) lines {numin}..{numax} cm-1 from {url}",
            iso.species,
            iso.formula
        );

        let resp = self
            .client
            .get(&url)
            .query(&query)
            .send()
            .map_err(|e| AppError::new(4, format!("HITRAN request failed: {e}")))?;

        if !resp.status().is_success() {
            return Err(AppError::new(
                4,
                format!("HITRAN request failed with status {}.", resp.status()),
            ));
        }

        resp.text()
            .map_err(|e| AppError::new(4, format!("Failed to read HITRAN response: {e}")))
    }
}

/// Metadata stored next to a cached line table.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CacheHeader {
    pub table_name: String,
    pub species: Species,
    pub molecule_id: u8,
    pub isotopologue_id: u8,
    pub global_iso_id: u16,
    pub numin: f64,
    pub numax: f64,
    pub number_of_rows: usize,
    pub source: String,
    pub fetched_at: DateTime<Utc>,
}

impl CacheHeader {
    /// Whether the cached fetch window contains `[numin, numax]`.
    pub fn covers(&self, numin: f64, numax: f64) -> bool {
        self.numin <= numin && self.numax >= numax
    }
}

/// Lines of one isotopologue loaded from the cache.
#[derive(Debug, Clone)]
pub struct LineTable {
    pub header: CacheHeader,
    pub isotopologue: Isotopologue,
    pub lines: Vec<SpectralLine>,
    pub row_errors: Vec<RowError>,
}

impl LineTable {
    /// Span of line centers [cm-1], or `None` for an empty table.
    pub fn nu_range(&self) -> Option<(f64, f64)> {
        let mut lo = f64::INFINITY;
        let mut hi = f64::NEG_INFINITY;
        for line in &self.lines {
            lo = lo.min(line.nu);
            hi = hi.max(line.nu);
        }
        (lo.is_finite() && hi.is_finite()).then_some((lo, hi))
    }
}

/// Whether `ensure_cached` had to download.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CacheStatus {
    Hit,
    Fetched,
}

/// Local line-table cache rooted at a data directory.
#[derive(Debug, Clone)]
pub struct LineCache {
    dir: PathBuf,
}

impl LineCache {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    pub fn data_path(&self, table_name: &str) -> PathBuf {
        self.dir.join(format!("{table_name}.data"))
    }

    pub fn header_path(&self, table_name: &str) -> PathBuf {
        self.dir.join(format!("{table_name}.header"))
    }

    pub fn contains(&self, table_name: &str) -> bool {
        self.header_path(table_name).is_file() && self.data_path(table_name).is_file()
    }

    pub fn read_header(&self, table_name: &str) -> Result<CacheHeader, AppError> {
        let path = self.header_path(table_name);
        let file = File::open(&path)
            .map_err(|e| AppError::new(2, format!("Failed to open cache header '{}': {e}", path.display())))?;
        serde_json::from_reader(file)
            .map_err(|e| AppError::new(2, format!("Invalid cache header '{}': {e}", path.display())))
    }

    /// Write the data file, then the header.
    pub fn store(&self, header: &CacheHeader, par_text: &str) -> Result<(), AppError> {
        fs::create_dir_all(&self.dir).map_err(|e| {
            AppError::new(2, format!("Failed to create data dir '{}': {e}", self.dir.display()))
        })?;

        let data_path = self.data_path(&header.table_name);
        fs::write(&data_path, par_text)
            .map_err(|e| AppError::new(2, format!("Failed to write '{}': {e}", data_path.display())))?;

        let header_path = self.header_path(&header.table_name);
        let file = File::create(&header_path)
            .map_err(|e| AppError::new(2, format!("Failed to create '{}': {e}", header_path.display())))?;
        serde_json::to_writer_pretty(file, header)
            .map_err(|e| AppError::new(2, format!("Failed to write cache header: {e}")))?;
        Ok(())
    }

    /// Load and parse a cached table.
    pub fn load(&self, table_name: &str) -> Result<LineTable, AppError> {
        let header = self.read_header(table_name)?;
        if Species::from_molecule_id(header.molecule_id) != Some(header.species) {
            return Err(AppError::new(
                2,
                format!(
                    "Cache header '{}' is inconsistent: molecule id {} is not {}.",
                    self.header_path(table_name).display(),
                    header.molecule_id,
                    header.species
                ),
            ));
        }
        let iso = isotopologue(header.species, header.isotopologue_id)?;

        let data_path = self.data_path(table_name);
        let text = fs::read_to_string(&data_path)
            .map_err(|e| AppError::new(2, format!("Failed to read '{}': {e}", data_path.display())))?;

        let parsed = parse_par(&text, header.molecule_id, header.isotopologue_id);
        for err in parsed.row_errors.iter().take(5) {
            log::warn!("{}:{}: skipped record: {}", data_path.display(), err.line, err.message);
        }
        if parsed.row_errors.len() > 5 {
            log::warn!("... {} more malformed records skipped", parsed.row_errors.len() - 5);
        }

        if parsed.lines.is_empty() {
            return Err(AppError::new(
                3,
                format!("No {} lines in cached table '{}'.", iso.formula, data_path.display()),
            ));
        }

        log::info!("Loaded {} lines of {} from {}", parsed.lines.len(), iso.formula, data_path.display());

        Ok(LineTable {
            header,
            isotopologue: iso,
            lines: parsed.lines,
            row_errors: parsed.row_errors,
        })
    }
}

/// Make sure the table for `config` is cached, downloading it from `source` only
/// when the header is missing, does not cover the requested window or
/// isotopologue, or a refresh was requested.
pub fn ensure_cached(
    cache: &LineCache,
    source: &dyn LineSource,
    config: &FetchConfig,
) -> Result<CacheStatus, AppError> {
    let table_name = config.species.name();
    if !config.refresh && cache.contains(table_name) {
        let header = cache.read_header(table_name)?;
        if header.covers(config.numin, config.numax) && header.isotopologue_id == config.isotopologue {
            log::info!("Using cached table {}", cache.header_path(table_name).display());
            return Ok(CacheStatus::Hit);
        }
        log::info!(
            "Cached table {} holds I={} [{}, {}] cm-1; request is I={} [{}, {}] cm-1, fetching again",
            cache.header_path(table_name).display(),
            header.isotopologue_id,
            header.numin,
            header.numax,
            config.isotopologue,
            config.numin,
            config.numax
        );
    }

    if !(config.numin.is_finite() && config.numax.is_finite() && config.numax > config.numin && config.numin >= 0.0) {
        return Err(AppError::new(
            2,
            format!(
                "Invalid fetch window: [{}, {}] cm-1 (need 0 <= numin < numax).",
                config.numin, config.numax
            ),
        ));
    }

    let iso = isotopologue(config.species, config.isotopologue)?;
    let text = source.fetch_par(&iso, config.numin, config.numax)?;
    let number_of_rows = text.lines().filter(|l| !l.trim().is_empty()).count();
    if number_of_rows == 0 {
        return Err(AppError::new(
            4,
            format!(
                "HITRAN returned no lines for {} in [{}, {}] cm-1.",
                iso.formula, config.numin, config.numax
            ),
        ));
    }

    let header = CacheHeader {
        table_name: table_name.to_string(),
        species: config.species,
        molecule_id: config.species.molecule_id(),
        isotopologue_id: iso.local_id,
        global_iso_id: iso.global_id,
        numin: config.numin,
        numax: config.numax,
        number_of_rows,
        source: "HITRANonline".to_string(),
        fetched_at: Utc::now(),
    };
    cache.store(&header, &text)?;
    log::info!("Cached {number_of_rows} records in {}", cache.data_path(table_name).display());

    Ok(CacheStatus::Fetched)
}
