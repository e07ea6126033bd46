//! dh-graph: network reconstruction for district heating designs.
//!
//! Provides:
//! - Ambiguity resolution of pipe-to-building candidate sets
//! - Node topology with connector/link classification and fork detection
//! - The owning [`Network`] with identifier lookups and diagnostics
//!
//! # Example
//!
//! ```
//! use dh_features::{FeatureRecord, FeatureSnapshot};
//! use dh_geo::DistanceModel;
//! use dh_graph::{NetworkConfig, NetworkContext};
//!
//! let snapshot = FeatureSnapshot::new(
//!     vec![
//!         FeatureRecord::line(vec![[0.0, 0.0], [5.0, 0.0]]).with_attr("id", "P1")
//!             .with_attr("solution/included", true),
//!         FeatureRecord::line(vec![[5.0, 0.0], [5.0, 1.0]]).with_attr("id", "P2")
//!             .with_attr("solution/included", true),
//!     ],
//!     vec![
//!         FeatureRecord::polygon(vec![[4.0, 1.0], [6.0, 1.0], [6.0, 3.0], [4.0, 3.0], [4.0, 1.0]])
//!             .with_attr("id", "B1")
//!             .with_attr("solution/included", true),
//!     ],
//! );
//! let config = NetworkConfig {
//!     distance_model: DistanceModel::Euclidean,
//!     ..NetworkConfig::default()
//! };
//! let network = NetworkContext::new(snapshot, config).build().unwrap();
//!
//! assert_eq!(network.connectors().count(), 1);
//! assert_eq!(network.links().count(), 1);
//! let p2 = network.pipe_from_id("P2").unwrap();
//! assert_eq!(network.building_from_id("B1").unwrap().connector, Some(p2.id));
//! ```

pub mod builder;
pub mod context;
pub mod diagnostics;
pub mod error;
pub mod graph;
pub mod indexing;
pub mod resolve;
pub mod topology;
pub(crate) mod validate;

pub use context::{NetworkConfig, NetworkContext};
pub use diagnostics::{BuildingDiagnostics, PipeDiagnostics, sorted_ids};
pub use error::{GraphError, GraphResult};
pub use graph::Network;
pub use indexing::FeatureIndex;
pub use resolve::AmbiguityResolver;
pub use topology::{FORK_MIN_LINKS, Node, NodeKey, Topology};
