use geo_types::MultiLineString;

use crate::decode::{ArcDecoder, arc_slot};
use crate::stitch::stitch;
use crate::topology::{Geometry, Topology};
use crate::{Error, Result};

/// Decodes every arc of the named object as a single `MultiLineString`.
pub fn mesh(topology: &Topology, name: &str) -> Result<MultiLineString<f64>> {
    mesh_filtered(topology, name, |_, _| true)
}

/// Decodes the arcs of the named object kept by `filter`, stitching
/// contiguous arcs into maximal fragments.
///
/// For every arc the filter receives the first and the last leaf geometry
/// using it, in traversal order. An arc interior to a single geometry gets
/// the same reference twice, so `|a, b| !std::ptr::eq(a, b)` keeps exactly
/// the boundaries shared by two distinct geometries.
pub fn mesh_filtered<F>(topology: &Topology, name: &str, mut filter: F) -> Result<MultiLineString<f64>>
where
    F: FnMut(&Geometry, &Geometry) -> bool,
{
    let object = topology.object(name)?;
    let mut users: Vec<Vec<(i32, &Geometry)>> = vec![Vec::new(); topology.arcs.len()];
    collect(object, &mut users)?;

    let mut selected = Vec::new();
    for geoms in &users {
        if let (Some(first), Some(last)) = (geoms.first(), geoms.last()) {
            if filter(first.1, last.1) {
                selected.push(first.0);
            }
        }
    }

    let decoder = ArcDecoder::new(topology);
    let lines = stitch(topology, selected)?
        .into_iter()
        .map(|fragment| decoder.line(fragment))
        .collect::<Result<Vec<_>>>()?;
    Ok(MultiLineString(lines))
}

fn collect<'a>(object: &'a Geometry, users: &mut [Vec<(i32, &'a Geometry)>]) -> Result<()> {
    match object {
        Geometry::GeometryCollection { geometries, .. } => {
            for child in geometries {
                collect(child, users)?;
            }
        }
        Geometry::LineString { arcs, .. } => extract(object, arcs, users)?,
        Geometry::MultiLineString { arcs, .. } | Geometry::Polygon { arcs, .. } => {
            for line in arcs {
                extract(object, line, users)?;
            }
        }
        Geometry::MultiPolygon { arcs, .. } => {
            for polygon in arcs {
                for ring in polygon {
                    extract(object, ring, users)?;
                }
            }
        }
        Geometry::Point { .. } | Geometry::MultiPoint { .. } => {}
    }
    Ok(())
}

fn extract<'a>(
    owner: &'a Geometry,
    indexes: &[i32],
    users: &mut [Vec<(i32, &'a Geometry)>],
) -> Result<()> {
    for &index in indexes {
        users
            .get_mut(arc_slot(index))
            .ok_or(Error::ArcIndex { index })?
            .push((index, owner));
    }
    Ok(())
}
