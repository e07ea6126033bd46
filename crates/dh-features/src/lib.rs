//! dh-features: the input contract of the topology core and the NetworkBuilder.
//!
//! Raw candidate records arrive from a [`FeatureSource`]; the [`NetworkBuilder`]
//! keeps the ones marked "in solution" with the right geometry type and turns
//! them into typed [`Pipe`] and [`Building`] entities using the static
//! attribute schema.

pub mod builder;
pub mod entity;
pub mod record;
pub mod schema;
pub mod source;

pub use builder::{FeatureSet, NetworkBuilder};
pub use entity::{Building, Pipe};
pub use record::{AttrValue, FeatureRecord, GeometryKind, RecordGeometry};
pub use schema::{BuildingField, PipeField, SchemaError, validate_schema};
pub use source::{FeatureSnapshot, FeatureSource};
