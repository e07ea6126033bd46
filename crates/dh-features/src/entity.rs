//! Typed network entities built from retained records.

use dh_core::{Area, BuildingId, Energy, Length, NodeId, PipeId, Power, Ratio};
use geo::{Coord, LineString, Polygon};

/// A building polygon from the accepted design.
///
/// Everything except `connector` is fixed at construction. `connector` is the
/// non-owning back-reference to the pipe that claims the building, filled in
/// once ambiguity resolution has run.
#[derive(Debug, Clone, PartialEq)]
pub struct Building {
    pub id: BuildingId,
    pub feature_id: Option<String>,
    pub geometry: Polygon<f64>,
    pub area_roof: Option<Area>,
    pub area_ground: Option<Area>,
    pub demand_cap_heat: Option<Power>,
    pub demand_cap_cooling: Option<Power>,
    pub demand_cons_heat: Option<Energy>,
    pub demand_cons_cooling: Option<Energy>,
    pub height: Option<Length>,
    pub category: Option<String>,
    /// Set on supply sources rather than consumers.
    pub supply_capacity: Option<Power>,
    pub connector: Option<PipeId>,
}

impl Building {
    pub fn new(id: BuildingId, geometry: Polygon<f64>) -> Self {
        Self {
            id,
            feature_id: None,
            geometry,
            area_roof: None,
            area_ground: None,
            demand_cap_heat: None,
            demand_cap_cooling: None,
            demand_cons_heat: None,
            demand_cons_cooling: None,
            height: None,
            category: None,
            supply_capacity: None,
            connector: None,
        }
    }

    /// Whether every ring vertex has finite coordinates.
    pub fn has_finite_geometry(&self) -> bool {
        self.geometry
            .exterior()
            .0
            .iter()
            .chain(self.geometry.interiors().iter().flat_map(|ring| ring.0.iter()))
            .all(|c| is_finite(*c))
    }

    /// Whether the building is a supply source (non-zero supply capacity).
    pub fn is_supply(&self) -> bool {
        self.supply_capacity.is_some_and(|p| p.value != 0.0)
    }
}

/// A pipe polyline from the accepted design.
#[derive(Debug, Clone, PartialEq)]
pub struct Pipe {
    pub id: PipeId,
    pub feature_id: Option<String>,
    pub geometry: LineString<f64>,
    /// Point identifiers carried by the source for the first/last vertex.
    pub start_label: Option<String>,
    pub end_label: Option<String>,
    pub diameter: Option<Length>,
    pub length: Option<Length>,
    pub capacity: Option<Power>,
    /// Simultaneity factor applied to downstream demand.
    pub diversity: Option<Ratio>,
    /// Geometric candidates before ambiguity resolution.
    pub candidate_buildings: Vec<BuildingId>,
    /// Empty (link), one building (definite connector) or several (ambiguous).
    pub connected_buildings: Vec<BuildingId>,
    pub start_node: Option<NodeId>,
    pub end_node: Option<NodeId>,
}

impl Pipe {
    pub fn new(id: PipeId, geometry: LineString<f64>) -> Self {
        Self {
            id,
            feature_id: None,
            geometry,
            start_label: None,
            end_label: None,
            diameter: None,
            length: None,
            capacity: None,
            diversity: None,
            candidate_buildings: Vec::new(),
            connected_buildings: Vec::new(),
            start_node: None,
            end_node: None,
        }
    }

    /// First polyline vertex.
    pub fn start(&self) -> Option<Coord<f64>> {
        self.geometry.0.first().copied()
    }

    /// Last polyline vertex.
    pub fn end(&self) -> Option<Coord<f64>> {
        self.geometry.0.last().copied()
    }

    pub fn vertices(&self) -> impl Iterator<Item = Coord<f64>> + '_ {
        self.geometry.0.iter().copied()
    }

    pub fn has_finite_geometry(&self) -> bool {
        self.geometry.0.iter().all(|c| is_finite(*c))
    }

    pub fn is_connector(&self) -> bool {
        !self.connected_buildings.is_empty()
    }

    /// The building this pipe definitely serves, if resolved to exactly one.
    pub fn resolved_building(&self) -> Option<BuildingId> {
        match self.connected_buildings.as_slice() {
            [only] => Some(*only),
            _ => None,
        }
    }

    pub fn is_ambiguous(&self) -> bool {
        self.connected_buildings.len() > 1
    }
}

fn is_finite(c: Coord<f64>) -> bool {
    c.x.is_finite() && c.y.is_finite()
}

#[cfg(test)]
mod tests {
    use super::*;
    use dh_core::{Id, kw};

    #[test]
    fn pipe_endpoints_and_roles() {
        let line = LineString::from(vec![[0.0, 0.0], [1.0, 0.0], [1.0, 2.0]]);
        let mut pipe = Pipe::new(Id::from_index(0), line);
        assert_eq!(pipe.start(), Some(Coord { x: 0.0, y: 0.0 }));
        assert_eq!(pipe.end(), Some(Coord { x: 1.0, y: 2.0 }));
        assert_eq!(pipe.vertices().count(), 3);
        assert!(!pipe.is_connector());

        pipe.connected_buildings = vec![Id::from_index(4)];
        assert!(pipe.is_connector());
        assert_eq!(pipe.resolved_building(), Some(Id::from_index(4)));

        pipe.connected_buildings.push(Id::from_index(5));
        assert!(pipe.is_ambiguous());
        assert_eq!(pipe.resolved_building(), None);
    }

    #[test]
    fn empty_polyline_has_no_endpoints() {
        let pipe = Pipe::new(Id::from_index(0), LineString::new(vec![]));
        assert_eq!(pipe.start(), None);
        assert_eq!(pipe.end(), None);
    }

    #[test]
    fn zero_supply_capacity_is_not_a_source() {
        let poly = Polygon::new(LineString::new(vec![]), vec![]);
        let mut b = Building::new(Id::from_index(0), poly);
        assert!(!b.is_supply());
        b.supply_capacity = Some(kw(0.0));
        assert!(!b.is_supply());
        b.supply_capacity = Some(kw(500.0));
        assert!(b.is_supply());
    }

    #[test]
    fn non_finite_vertices_are_detected() {
        let ring = LineString::from(vec![[0.0, 0.0], [f64::NAN, 0.0], [1.0, 1.0]]);
        let b = Building::new(Id::from_index(0), Polygon::new(ring, vec![]));
        assert!(!b.has_finite_geometry());

        let pipe = Pipe::new(
            Id::from_index(0),
            LineString::from(vec![[0.0, 0.0], [1.0, f64::INFINITY]]),
        );
        assert!(!pipe.has_finite_geometry());
        assert!(Pipe::new(Id::from_index(1), LineString::new(vec![])).has_finite_geometry());
    }
}
