use std::fmt;

use indexmap::IndexMap;
use serde::Deserialize;
use serde_json::Value;

use crate::{Error, Result};

/// One stored position. TopoJSON allows extra dimensions past x/y; decoding
/// keeps only the first two.
pub type Position = Vec<f64>;

/// A parsed TopoJSON document. Arcs hold the raw stored positions: delta
/// encoded integers for quantized topologies, absolute coordinates
/// otherwise.
#[derive(Debug, Clone, Deserialize)]
pub struct Topology {
    #[serde(default)]
    pub objects: IndexMap<String, Geometry>,
    pub arcs: Vec<Vec<Position>>,
    #[serde(default)]
    pub transform: Option<Transform>,
    #[serde(default)]
    pub bbox: Option<Vec<f64>>,
}

impl Topology {
    pub fn from_slice(bytes: &[u8]) -> Result<Self> {
        Ok(serde_json::from_slice(bytes)?)
    }

    pub fn object(&self, name: &str) -> Result<&Geometry> {
        self.objects.get(name).ok_or_else(|| Error::UnknownObject {
            name: name.to_string(),
        })
    }
}

/// Quantization transform. Stored integer coordinates scale and translate
/// back to planar coordinates.
#[derive(Debug, Clone, Copy, Deserialize)]
pub struct Transform {
    pub scale: [f64; 2],
    pub translate: [f64; 2],
}

impl Transform {
    pub(crate) fn apply(&self, x: f64, y: f64) -> (f64, f64) {
        (
            x * self.scale[0] + self.translate[0],
            y * self.scale[1] + self.translate[1],
        )
    }
}

/// A geometry object of a topology. Coordinates of `Point`/`MultiPoint` are
/// stored inline; everything else references arcs by index, where a negative
/// index `!i` selects arc `i` reversed.
#[derive(Debug, Clone, Deserialize)]
#[serde(tag = "type")]
pub enum Geometry {
    Point {
        #[serde(flatten)]
        meta: GeometryMeta,
        coordinates: Position,
    },
    MultiPoint {
        #[serde(flatten)]
        meta: GeometryMeta,
        coordinates: Vec<Position>,
    },
    LineString {
        #[serde(flatten)]
        meta: GeometryMeta,
        arcs: Vec<i32>,
    },
    MultiLineString {
        #[serde(flatten)]
        meta: GeometryMeta,
        arcs: Vec<Vec<i32>>,
    },
    Polygon {
        #[serde(flatten)]
        meta: GeometryMeta,
        arcs: Vec<Vec<i32>>,
    },
    MultiPolygon {
        #[serde(flatten)]
        meta: GeometryMeta,
        arcs: Vec<Vec<Vec<i32>>>,
    },
    GeometryCollection {
        #[serde(flatten)]
        meta: GeometryMeta,
        geometries: Vec<Geometry>,
    },
}

impl Geometry {
    pub fn meta(&self) -> &GeometryMeta {
        match self {
            Geometry::Point { meta, .. }
            | Geometry::MultiPoint { meta, .. }
            | Geometry::LineString { meta, .. }
            | Geometry::MultiLineString { meta, .. }
            | Geometry::Polygon { meta, .. }
            | Geometry::MultiPolygon { meta, .. }
            | Geometry::GeometryCollection { meta, .. } => meta,
        }
    }

    pub fn id(&self) -> Option<&FeatureId> {
        self.meta().id.as_ref()
    }
}

/// Fields shared by every geometry object.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct GeometryMeta {
    #[serde(default)]
    pub id: Option<FeatureId>,
    #[serde(default)]
    pub properties: Option<serde_json::Map<String, Value>>,
    #[serde(default)]
    pub bbox: Option<Vec<f64>>,
}

/// A geometry id: an integer or a string.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Deserialize)]
#[serde(untagged)]
pub enum FeatureId {
    Number(i64),
    Text(String),
}

impl fmt::Display for FeatureId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FeatureId::Number(n) => write!(f, "{n}"),
            FeatureId::Text(s) => f.write_str(s),
        }
    }
}
