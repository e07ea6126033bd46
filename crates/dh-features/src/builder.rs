//! NetworkBuilder: inclusion filter and entity construction.

use dh_core::{BuildingId, PipeId};
use tracing::{debug, warn};

use crate::entity::{Building, Pipe};
use crate::record::{FeatureRecord, GeometryKind};
use crate::schema::{BuildingField, IN_SOLUTION, PipeField};
use crate::source::FeatureSource;

/// Typed entities retained from a feature source, in source order.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FeatureSet {
    pub pipes: Vec<Pipe>,
    pub buildings: Vec<Building>,
}

/// Filters raw candidate records into typed pipes and buildings.
///
/// Pure function of its input: a record is retained iff it is marked "in
/// solution" and carries the expected geometry type. Malformed geometry is
/// kept and simply matches nothing later on.
#[derive(Debug, Clone, Copy, Default)]
pub struct NetworkBuilder;

impl NetworkBuilder {
    pub fn new() -> Self {
        Self
    }

    pub fn is_pipe_record(record: &FeatureRecord) -> bool {
        in_solution(record) && record.geometry_kind() == GeometryKind::Line
    }

    pub fn is_building_record(record: &FeatureRecord) -> bool {
        in_solution(record) && record.geometry_kind() == GeometryKind::Polygon
    }

    /// Build typed entities from every retained record of the source.
    pub fn build<S: FeatureSource + ?Sized>(&self, source: &S) -> FeatureSet {
        let pipe_records = source.pipe_candidates();
        let building_records = source.building_candidates();

        let pipes: Vec<Pipe> = pipe_records
            .iter()
            .filter(|r| Self::is_pipe_record(r))
            .enumerate()
            .map(|(i, r)| Self::pipe_from_record(PipeId::from_position(i), r))
            .collect();

        let buildings: Vec<Building> = building_records
            .iter()
            .filter(|r| Self::is_building_record(r))
            .enumerate()
            .map(|(i, r)| Self::building_from_record(BuildingId::from_position(i), r))
            .collect();

        debug!(
            pipes_seen = pipe_records.len(),
            pipes_kept = pipes.len(),
            buildings_seen = building_records.len(),
            buildings_kept = buildings.len(),
            "filtered candidate records"
        );

        FeatureSet { pipes, buildings }
    }

    pub fn pipe_from_record(id: PipeId, record: &FeatureRecord) -> Pipe {
        let mut pipe = Pipe::new(id, record.geometry.to_line_string());
        for field in PipeField::ALL {
            if let Some(value) = record.attribute(field.key()) {
                field.apply(&mut pipe, value);
            }
        }
        if pipe.geometry.0.is_empty() {
            warn!(pipe = ?pipe.feature_id, "pipe has an empty polyline");
        } else if !pipe.has_finite_geometry() {
            warn!(pipe = ?pipe.feature_id, "pipe has non-finite coordinates");
        }
        pipe
    }

    pub fn building_from_record(id: BuildingId, record: &FeatureRecord) -> Building {
        let mut building = Building::new(id, record.geometry.to_polygon());
        for field in BuildingField::ALL {
            if let Some(value) = record.attribute(field.key()) {
                field.apply(&mut building, value);
            }
        }
        if building.geometry.exterior().0.is_empty() {
            warn!(building = ?building.feature_id, "building polygon has no exterior ring");
        } else if !building.has_finite_geometry() {
            warn!(building = ?building.feature_id, "building has non-finite coordinates");
        }
        building
    }
}

fn in_solution(record: &FeatureRecord) -> bool {
    record.attribute(IN_SOLUTION).is_some_and(|v| v.as_flag())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::record::AttrValue;
    use crate::source::FeatureSnapshot;
    use dh_core::{as_kw, as_mm};

    fn square() -> Vec<[f64; 2]> {
        vec![[0.0, 0.0], [10.0, 0.0], [10.0, 10.0], [0.0, 10.0]]
    }

    #[test]
    fn pipe_predicate_requires_flag_and_line() {
        let included = FeatureRecord::line(vec![[0.0, 0.0], [1.0, 1.0]]).with_attr(IN_SOLUTION, true);
        let excluded = FeatureRecord::line(vec![[0.0, 0.0], [1.0, 1.0]]).with_attr(IN_SOLUTION, false);
        let unflagged = FeatureRecord::line(vec![[0.0, 0.0], [1.0, 1.0]]);
        let polygon = FeatureRecord::polygon(square()).with_attr(IN_SOLUTION, true);

        assert!(NetworkBuilder::is_pipe_record(&included));
        assert!(!NetworkBuilder::is_pipe_record(&excluded));
        assert!(!NetworkBuilder::is_pipe_record(&unflagged));
        assert!(!NetworkBuilder::is_pipe_record(&polygon));
        assert!(NetworkBuilder::is_building_record(&polygon));
        assert!(!NetworkBuilder::is_building_record(&included));
    }

    #[test]
    fn point_records_are_never_retained() {
        let point = FeatureRecord::new(GeometryKind::Point, vec![[1.0, 1.0]]).with_attr(IN_SOLUTION, true);
        assert!(!NetworkBuilder::is_pipe_record(&point));
        assert!(!NetworkBuilder::is_building_record(&point));
    }

    #[test]
    fn attributes_are_typed() {
        let rec = FeatureRecord::line(vec![[0.0, 0.0], [1.0, 0.0]])
            .with_attr(IN_SOLUTION, true)
            .with_attr("id", "P-1")
            .with_attr("path/start", 101_i64)
            .with_attr("solution/diameter-mm", 80_i64)
            .with_attr("solution/capacity-kw", 12.5)
            .with_attr("path/length", "not a number");
        let pipe = NetworkBuilder::pipe_from_record(PipeId::from_index(0), &rec);

        assert_eq!(pipe.feature_id.as_deref(), Some("P-1"));
        assert_eq!(pipe.start_label.as_deref(), Some("101"));
        assert!((as_mm(pipe.diameter.unwrap()) - 80.0).abs() < 1e-9);
        assert!((as_kw(pipe.capacity.unwrap()) - 12.5).abs() < 1e-9);
        assert!(pipe.length.is_none());
        assert!(pipe.diversity.is_none());
    }

    #[test]
    fn building_attributes_are_typed() {
        let rec = FeatureRecord::polygon(square())
            .with_attr(IN_SOLUTION, true)
            .with_attr("id", "B-1")
            .with_attr("supply/capacity-kwp", 900.0)
            .with_attr("candidate/user-fields Category", "Residential")
            .with_attr("demand/kwp", AttrValue::Null);
        let b = NetworkBuilder::building_from_record(BuildingId::from_index(0), &rec);

        assert_eq!(b.feature_id.as_deref(), Some("B-1"));
        assert!(b.is_supply());
        assert_eq!(b.category.as_deref(), Some("Residential"));
        assert!(b.demand_cap_heat.is_none());
        assert!(b.connector.is_none());
    }

    #[test]
    fn build_assigns_ids_in_retained_order() {
        let snapshot = FeatureSnapshot::new(
            vec![
                FeatureRecord::line(vec![[0.0, 0.0], [1.0, 0.0]]).with_attr(IN_SOLUTION, false),
                FeatureRecord::line(vec![[0.0, 0.0], [2.0, 0.0]])
                    .with_attr(IN_SOLUTION, true)
                    .with_attr("id", "kept"),
            ],
            vec![FeatureRecord::polygon(square()).with_attr(IN_SOLUTION, true)],
        );
        let set = NetworkBuilder::new().build(&snapshot);
        assert_eq!(set.pipes.len(), 1);
        assert_eq!(set.pipes[0].id, PipeId::from_index(0));
        assert_eq!(set.pipes[0].feature_id.as_deref(), Some("kept"));
        assert_eq!(set.buildings.len(), 1);
    }

    #[test]
    fn build_is_deterministic() {
        let snapshot = FeatureSnapshot::new(
            vec![FeatureRecord::line(vec![[0.0, 0.0], [1.0, 0.0]]).with_attr(IN_SOLUTION, true)],
            vec![FeatureRecord::polygon(square()).with_attr(IN_SOLUTION, true)],
        );
        let builder = NetworkBuilder::new();
        assert_eq!(builder.build(&snapshot), builder.build(&snapshot));
    }
}
