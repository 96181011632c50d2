use geo_types::{
    Geometry as Geom, GeometryCollection, LineString, MultiLineString, MultiPoint, MultiPolygon,
    Point, Polygon,
};
use serde_json::Value;

use crate::Result;
use crate::decode::ArcDecoder;
use crate::topology::{FeatureId, Geometry, Topology};

/// One decoded object: the topology id and properties plus planar geometry.
#[derive(Debug, Clone)]
pub struct Feature {
    pub id: Option<FeatureId>,
    pub properties: serde_json::Map<String, Value>,
    pub geometry: Geom<f64>,
}

#[derive(Debug, Clone, Default)]
pub struct FeatureCollection {
    pub features: Vec<Feature>,
}

/// Decodes a named topology object as a single feature.
pub fn feature(topology: &Topology, name: &str) -> Result<Feature> {
    let object = topology.object(name)?;
    let decoder = ArcDecoder::new(topology);
    to_feature(&decoder, object)
}

/// Decodes a named topology object as a feature collection: one feature per
/// child of a `GeometryCollection`, a single feature otherwise.
pub fn feature_collection(topology: &Topology, name: &str) -> Result<FeatureCollection> {
    let object = topology.object(name)?;
    let decoder = ArcDecoder::new(topology);
    let features = match object {
        Geometry::GeometryCollection { geometries, .. } => geometries
            .iter()
            .map(|child| to_feature(&decoder, child))
            .collect::<Result<Vec<_>>>()?,
        other => vec![to_feature(&decoder, other)?],
    };
    Ok(FeatureCollection { features })
}

fn to_feature(decoder: &ArcDecoder<'_>, object: &Geometry) -> Result<Feature> {
    Ok(Feature {
        id: object.meta().id.clone(),
        properties: object.meta().properties.clone().unwrap_or_default(),
        geometry: convert(decoder, object)?,
    })
}

fn convert(decoder: &ArcDecoder<'_>, object: &Geometry) -> Result<Geom<f64>> {
    Ok(match object {
        Geometry::Point { coordinates, .. } => {
            Geom::Point(Point::from(decoder.point(coordinates)?))
        }
        Geometry::MultiPoint { coordinates, .. } => Geom::MultiPoint(MultiPoint(
            coordinates
                .iter()
                .map(|position| decoder.point(position).map(Point::from))
                .collect::<Result<Vec<_>>>()?,
        )),
        Geometry::LineString { arcs, .. } => Geom::LineString(decoder.line(arcs.iter().copied())?),
        Geometry::MultiLineString { arcs, .. } => Geom::MultiLineString(MultiLineString(
            arcs.iter()
                .map(|line| decoder.line(line.iter().copied()))
                .collect::<Result<Vec<_>>>()?,
        )),
        Geometry::Polygon { arcs, .. } => Geom::Polygon(polygon(decoder, arcs)?),
        Geometry::MultiPolygon { arcs, .. } => Geom::MultiPolygon(MultiPolygon(
            arcs.iter()
                .map(|rings| polygon(decoder, rings))
                .collect::<Result<Vec<_>>>()?,
        )),
        Geometry::GeometryCollection { geometries, .. } => {
            Geom::GeometryCollection(GeometryCollection(
                geometries
                    .iter()
                    .map(|child| convert(decoder, child))
                    .collect::<Result<Vec<_>>>()?,
            ))
        }
    })
}

fn polygon(decoder: &ArcDecoder<'_>, rings: &[Vec<i32>]) -> Result<Polygon<f64>> {
    let mut decoded = rings
        .iter()
        .map(|ring| decoder.ring(ring.iter().copied()))
        .collect::<Result<Vec<_>>>()?;
    if decoded.is_empty() {
        return Ok(Polygon::new(LineString::new(Vec::new()), Vec::new()));
    }
    let exterior = decoded.remove(0);
    Ok(Polygon::new(exterior, decoded))
}
