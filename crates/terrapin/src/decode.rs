use geo_types::{Coord, LineString};

use crate::topology::{Geometry, Position, Topology, Transform};
use crate::{Error, Result};

/// Index of the arc a (possibly complemented) reference selects.
pub(crate) fn arc_slot(index: i32) -> usize {
    if index < 0 { !index as usize } else { index as usize }
}

pub(crate) fn position_xy(position: &Position) -> Result<(f64, f64)> {
    match position.as_slice() {
        [x, y, ..] => Ok((*x, *y)),
        _ => Err(Error::ShortPosition),
    }
}

/// Resolves arc references against the stored arcs, undoing delta encoding
/// and the quantization transform.
pub(crate) struct ArcDecoder<'a> {
    arcs: &'a [Vec<Position>],
    transform: Option<Transform>,
}

impl<'a> ArcDecoder<'a> {
    pub(crate) fn new(topology: &'a Topology) -> Self {
        Self {
            arcs: &topology.arcs,
            transform: topology.transform,
        }
    }

    /// Decodes an inline position. Point coordinates are absolute even in
    /// quantized topologies; only the transform applies.
    pub(crate) fn point(&self, position: &Position) -> Result<Coord<f64>> {
        let (x, y) = position_xy(position)?;
        Ok(match self.transform {
            Some(t) => {
                let (x, y) = t.apply(x, y);
                Coord { x, y }
            }
            None => Coord { x, y },
        })
    }

    /// Appends one arc reference. Consecutive arcs of a line share an
    /// endpoint, so the point carried over from the previous arc is dropped
    /// before appending.
    fn append_arc(&self, index: i32, points: &mut Vec<Coord<f64>>) -> Result<()> {
        let arc = self
            .arcs
            .get(arc_slot(index))
            .ok_or(Error::ArcIndex { index })?;
        if !points.is_empty() {
            points.pop();
        }
        let appended_at = points.len();
        match self.transform {
            Some(t) => {
                let (mut x0, mut y0) = (0.0_f64, 0.0_f64);
                for position in arc {
                    let (dx, dy) = position_xy(position)?;
                    x0 += dx;
                    y0 += dy;
                    let (x, y) = t.apply(x0, y0);
                    points.push(Coord { x, y });
                }
            }
            None => {
                for position in arc {
                    let (x, y) = position_xy(position)?;
                    points.push(Coord { x, y });
                }
            }
        }
        if index < 0 {
            points[appended_at..].reverse();
        }
        Ok(())
    }

    /// Decodes a run of arc references into an open line, padded to two
    /// points when the arcs degenerate to fewer.
    pub(crate) fn line<I>(&self, indexes: I) -> Result<LineString<f64>>
    where
        I: IntoIterator<Item = i32>,
    {
        let mut points = Vec::new();
        for index in indexes {
            self.append_arc(index, &mut points)?;
        }
        if points.len() < 2 {
            if let Some(&last) = points.last() {
                points.push(last);
            }
        }
        Ok(LineString::new(points))
    }

    /// Decodes a ring, padded to four points when its arcs are too short.
    pub(crate) fn ring<I>(&self, indexes: I) -> Result<LineString<f64>>
    where
        I: IntoIterator<Item = i32>,
    {
        let mut points = self.line(indexes)?.0;
        while points.len() < 4 {
            match points.first() {
                Some(&first) => points.push(first),
                None => break,
            }
        }
        Ok(LineString::new(points))
    }
}

/// Planar bounding box `[x0, y0, x1, y1]` over every arc and inline point of
/// the topology. The recorded `bbox` member is ignored, matching upstream.
pub fn bbox(topology: &Topology) -> Result<[f64; 4]> {
    let mut extent = Extent::new();
    for arc in &topology.arcs {
        match topology.transform {
            Some(t) => {
                let (mut x0, mut y0) = (0.0_f64, 0.0_f64);
                for position in arc {
                    let (dx, dy) = position_xy(position)?;
                    x0 += dx;
                    y0 += dy;
                    let (x, y) = t.apply(x0, y0);
                    extent.add(x, y);
                }
            }
            None => {
                for position in arc {
                    let (x, y) = position_xy(position)?;
                    extent.add(x, y);
                }
            }
        }
    }
    let decoder = ArcDecoder::new(topology);
    for object in topology.objects.values() {
        bbox_geometry(&decoder, object, &mut extent)?;
    }
    Ok([extent.x0, extent.y0, extent.x1, extent.y1])
}

fn bbox_geometry(decoder: &ArcDecoder<'_>, object: &Geometry, extent: &mut Extent) -> Result<()> {
    match object {
        Geometry::Point { coordinates, .. } => {
            let c = decoder.point(coordinates)?;
            extent.add(c.x, c.y);
        }
        Geometry::MultiPoint { coordinates, .. } => {
            for position in coordinates {
                let c = decoder.point(position)?;
                extent.add(c.x, c.y);
            }
        }
        Geometry::GeometryCollection { geometries, .. } => {
            for child in geometries {
                bbox_geometry(decoder, child, extent)?;
            }
        }
        _ => {}
    }
    Ok(())
}

struct Extent {
    x0: f64,
    y0: f64,
    x1: f64,
    y1: f64,
}

impl Extent {
    fn new() -> Self {
        Self {
            x0: f64::INFINITY,
            y0: f64::INFINITY,
            x1: f64::NEG_INFINITY,
            y1: f64::NEG_INFINITY,
        }
    }

    fn add(&mut self, x: f64, y: f64) {
        if x < self.x0 {
            self.x0 = x;
        }
        if x > self.x1 {
            self.x1 = x;
        }
        if y < self.y0 {
            self.y0 = y;
        }
        if y > self.y1 {
            self.y1 = y;
        }
    }
}
