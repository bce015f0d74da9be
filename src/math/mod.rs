//! Mathematical utilities: grids, quadrature, the complex probability function,
//! and least squares.

pub mod faddeeva;
pub mod grid;
pub mod ols;
pub mod quadrature;

pub use faddeeva::*;
pub use grid::*;
pub use ols::*;
pub use quadrature::*;
