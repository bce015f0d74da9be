//! Physical constants and blackbody radiation.

pub mod constants;
pub mod planck;

pub use planck::*;
