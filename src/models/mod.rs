//! Line-by-line spectroscopy models and the fitted polynomial form.
//!
//! Models are implemented as small, pure functions so that the synthesis and
//! fitting code can stay generic.

pub mod intensity;
pub mod lineshape;
pub mod partition;
pub mod polynomial;

pub use intensity::*;
pub use lineshape::*;
pub use partition::*;
pub use polynomial::*;
