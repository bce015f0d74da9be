//! Domain types used throughout the pipeline.
//!
//! This module defines:
//!
//! - the supported species and their HITRAN isotopologue metadata (`Species`, `Isotopologue`)
//! - spectral line records and the conditions they are evaluated at (`SpectralLine`, `Environment`)
//! - per-command run configuration (`FetchConfig`, `LpConfig`, `TableConfig`, `FitConfig`)
//! - tabulated and fitted outputs (`KpPoint`, `PolynomialPair`)

pub mod species;
pub mod types;

pub use species::*;
pub use types::*;
