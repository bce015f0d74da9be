//! Line data access: HITRAN fetch, local cache, and `.par` parsing.

pub mod hitran;
pub mod par;

pub use hitran::{CacheHeader, CacheStatus, HitranClient, LineCache, LineSource, LineTable, ensure_cached};
