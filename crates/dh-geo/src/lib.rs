//! dh-geo: geometric proximity between pipes and buildings.
//!
//! Provides:
//! - distance models on a reference ellipsoid, sphere or plane
//! - the "near" predicate (contained, on the boundary, or within tolerance)
//! - an R*-tree building index used as a prefilter
//! - the proximity matcher producing per-pipe candidate building sets

pub mod distance;
pub mod index;
pub mod near;
pub mod proximity;

pub use distance::DistanceModel;
pub use index::BuildingIndex;
pub use near::{DEFAULT_TOLERANCE, NearPredicate};
pub use proximity::{CandidateSets, ProximityMatcher};
