//! `planck-mean` library crate.
//!
//! The binary (`pmac`) is a thin wrapper around this library so the physics,
//! fitting and file formats are testable without spawning processes.

pub mod absorption;
pub mod app;
pub mod cli;
pub mod data;
pub mod domain;
pub mod error;
pub mod fit;
pub mod io;
pub mod math;
pub mod models;
pub mod physics;
pub mod plot;
pub mod report;
