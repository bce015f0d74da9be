//! Polynomial fitting of kp(T).
//!
//! Responsibilities:
//!
//! - split the table into overlapping low/high temperature subsets
//! - fit each subset with a fixed-order polynomial by least squares
//! - report per-regime fit quality

pub mod polyfit;
pub mod split;

pub use polyfit::*;
pub use split::*;
