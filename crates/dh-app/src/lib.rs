//! Shared application service layer for district heating network tools.
//!
//! Reads configuration and feature snapshot files, builds networks through
//! dh-graph and turns them into serializable reports and lookups. The core
//! crates never touch the filesystem; this one does.

pub mod config_service;
pub mod error;
pub mod format;
pub mod network_service;
pub mod report;
pub mod snapshot_service;

pub use config_service::{load_config, save_config, validate_config};
pub use error::{AppError, AppResult};
pub use format::FileFormat;
pub use network_service::{
    BuildingSummary, PipeSummary, build_network, lookup_building, lookup_pipe,
};
pub use report::{ForkSummary, NetworkCounts, NetworkReport};
pub use snapshot_service::{load_snapshot, save_snapshot};
