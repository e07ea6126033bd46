//! Raw feature records handed over by a feature source.

use std::collections::BTreeMap;

use geo::{Coord, LineString, Polygon};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum GeometryKind {
    Point,
    Line,
    Polygon,
}

/// Geometry of a raw record: a type tag plus an ordered coordinate sequence.
///
/// For lines `coordinates` is the polyline; for polygons it is the exterior
/// ring and `interiors` holds any holes.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct RecordGeometry {
    #[serde(rename = "type")]
    pub kind: GeometryKind,
    #[serde(default)]
    pub coordinates: Vec<[f64; 2]>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub interiors: Vec<Vec<[f64; 2]>>,
}

impl RecordGeometry {
    pub fn coords(&self) -> impl Iterator<Item = Coord<f64>> + '_ {
        self.coordinates.iter().map(|&c| Coord::from(c))
    }

    pub fn to_line_string(&self) -> LineString<f64> {
        LineString::from(self.coordinates.clone())
    }

    pub fn to_polygon(&self) -> Polygon<f64> {
        let interiors = self
            .interiors
            .iter()
            .map(|ring| LineString::from(ring.clone()))
            .collect();
        Polygon::new(self.to_line_string(), interiors)
    }
}

/// A typed attribute value as read from the source's attribute table.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(untagged)]
pub enum AttrValue {
    Null,
    Bool(bool),
    Int(i64),
    Float(f64),
    Text(String),
}

impl AttrValue {
    /// Truthiness of an inclusion flag: `true` or any non-zero number.
    pub fn as_flag(&self) -> bool {
        match self {
            AttrValue::Bool(b) => *b,
            AttrValue::Int(n) => *n != 0,
            AttrValue::Float(v) => *v != 0.0,
            AttrValue::Null | AttrValue::Text(_) => false,
        }
    }

    /// Finite numeric value, if this is a number.
    pub fn as_number(&self) -> Option<f64> {
        match self {
            AttrValue::Int(n) => Some(*n as f64),
            AttrValue::Float(v) if v.is_finite() => Some(*v),
            _ => None,
        }
    }

    /// Identifier-like value: text as-is, integers in decimal.
    pub fn as_ident(&self) -> Option<String> {
        match self {
            AttrValue::Text(s) => Some(s.clone()),
            AttrValue::Int(n) => Some(n.to_string()),
            _ => None,
        }
    }

    pub fn as_text(&self) -> Option<&str> {
        match self {
            AttrValue::Text(s) => Some(s),
            _ => None,
        }
    }
}

impl From<bool> for AttrValue {
    fn from(v: bool) -> Self {
        AttrValue::Bool(v)
    }
}

impl From<i64> for AttrValue {
    fn from(v: i64) -> Self {
        AttrValue::Int(v)
    }
}

impl From<f64> for AttrValue {
    fn from(v: f64) -> Self {
        AttrValue::Float(v)
    }
}

impl From<&str> for AttrValue {
    fn from(v: &str) -> Self {
        AttrValue::Text(v.to_string())
    }
}

impl From<String> for AttrValue {
    fn from(v: String) -> Self {
        AttrValue::Text(v)
    }
}

/// One candidate feature: geometry plus attribute lookup keyed by field name.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct FeatureRecord {
    pub geometry: RecordGeometry,
    #[serde(default)]
    pub attributes: BTreeMap<String, AttrValue>,
}

impl FeatureRecord {
    pub fn new(kind: GeometryKind, coordinates: Vec<[f64; 2]>) -> Self {
        Self {
            geometry: RecordGeometry {
                kind,
                coordinates,
                interiors: Vec::new(),
            },
            attributes: BTreeMap::new(),
        }
    }

    pub fn line(coordinates: Vec<[f64; 2]>) -> Self {
        Self::new(GeometryKind::Line, coordinates)
    }

    pub fn polygon(exterior: Vec<[f64; 2]>) -> Self {
        Self::new(GeometryKind::Polygon, exterior)
    }

    /// Builder-style attribute setter.
    pub fn with_attr(mut self, key: impl Into<String>, value: impl Into<AttrValue>) -> Self {
        self.attributes.insert(key.into(), value.into());
        self
    }

    pub fn attribute(&self, key: &str) -> Option<&AttrValue> {
        self.attributes.get(key)
    }

    pub fn geometry_kind(&self) -> GeometryKind {
        self.geometry.kind
    }
}
