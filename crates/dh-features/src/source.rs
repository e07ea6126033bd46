//! Feature sources: where raw candidate records come from.

use serde::{Deserialize, Serialize};

use crate::record::FeatureRecord;

/// Hands the core pre-filtered candidate records.
///
/// Implementations must present an immutable snapshot: the same records on
/// every call for the lifetime of the source.
pub trait FeatureSource {
    fn pipe_candidates(&self) -> &[FeatureRecord];
    fn building_candidates(&self) -> &[FeatureRecord];
}

/// In-memory snapshot of pipe and building candidate records.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct FeatureSnapshot {
    #[serde(default)]
    pub pipes: Vec<FeatureRecord>,
    #[serde(default)]
    pub buildings: Vec<FeatureRecord>,
}

impl FeatureSnapshot {
    pub fn new(pipes: Vec<FeatureRecord>, buildings: Vec<FeatureRecord>) -> Self {
        Self { pipes, buildings }
    }
}

impl FeatureSource for FeatureSnapshot {
    fn pipe_candidates(&self) -> &[FeatureRecord] {
        &self.pipes
    }

    fn building_candidates(&self) -> &[FeatureRecord] {
        &self.buildings
    }
}

impl<S: FeatureSource + ?Sized> FeatureSource for &S {
    fn pipe_candidates(&self) -> &[FeatureRecord] {
        (**self).pipe_candidates()
    }

    fn building_candidates(&self) -> &[FeatureRecord] {
        (**self).building_candidates()
    }
}
