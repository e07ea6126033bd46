//! dh-core: stable foundation for the district-heating topology crates.
//!
//! Contains:
//! - units (uom SI types + constructors for the source data's units)
//! - numeric (Real + finiteness checks)
//! - ids (stable compact IDs for pipes, buildings and nodes)
//! - timing (per-stage wall-clock timers)
//! - error (shared error types)

pub mod error;
pub mod ids;
pub mod numeric;
pub mod timing;
pub mod units;

// Re-exports: nice ergonomics for downstream crates
pub use error::{DhError, DhResult};
pub use ids::*;
pub use numeric::*;
pub use timing::{StageTimer, StageTimings};
pub use units::*;
