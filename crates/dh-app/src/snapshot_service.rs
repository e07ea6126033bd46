//! Feature snapshot files.

use std::path::Path;

use dh_features::FeatureSnapshot;
use tracing::debug;

use crate::error::AppResult;
use crate::format::{read_file, write_file};

/// Load pipe and building candidate records from a JSON or YAML file.
pub fn load_snapshot(path: &Path) -> AppResult<FeatureSnapshot> {
    let snapshot: FeatureSnapshot = read_file(path)?;
    debug!(
        path = %path.display(),
        pipes = snapshot.pipes.len(),
        buildings = snapshot.buildings.len(),
        "loaded feature snapshot"
    );
    Ok(snapshot)
}

pub fn save_snapshot(path: &Path, snapshot: &FeatureSnapshot) -> AppResult<()> {
    write_file(path, snapshot)
}
