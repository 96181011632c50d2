//! Geometry to SVG path data, following the `d3-geo` path serializer:
//! `M`/`L` commands with comma-separated coordinates and `Z` for rings.

use geo_types::{Coord, Geometry, LineString, MultiLineString, Polygon};

use crate::svg::fmt_path;

/// Maps a geographic position to drawing space. Decoded topologies are
/// usually pre-projected, so [`Identity`] is the default.
pub trait Projection {
    fn project(&self, position: Coord<f64>) -> Coord<f64>;
}

#[derive(Debug, Clone, Copy, Default)]
pub struct Identity;

impl Projection for Identity {
    fn project(&self, position: Coord<f64>) -> Coord<f64> {
        position
    }
}

/// Plate carree projection of longitude/latitude degrees onto a
/// `width` by `height` canvas.
#[derive(Debug, Clone, Copy)]
pub struct Equirectangular {
    pub width: f64,
    pub height: f64,
}

impl Projection for Equirectangular {
    fn project(&self, position: Coord<f64>) -> Coord<f64> {
        Coord {
            x: (position.x + 180.0) / 360.0 * self.width,
            y: (90.0 - position.y) / 180.0 * self.height,
        }
    }
}

pub fn geometry_path(geometry: &Geometry<f64>, projection: &dyn Projection) -> String {
    let mut out = String::new();
    write_geometry(geometry, projection, &mut out);
    out
}

pub fn multi_line_path(lines: &MultiLineString<f64>, projection: &dyn Projection) -> String {
    let mut out = String::new();
    for line in &lines.0 {
        write_line(line, projection, &mut out);
    }
    out
}

fn write_geometry(geometry: &Geometry<f64>, projection: &dyn Projection, out: &mut String) {
    match geometry {
        Geometry::LineString(line) => write_line(line, projection, out),
        Geometry::MultiLineString(lines) => {
            for line in &lines.0 {
                write_line(line, projection, out);
            }
        }
        Geometry::Polygon(polygon) => write_polygon(polygon, projection, out),
        Geometry::MultiPolygon(polygons) => {
            for polygon in &polygons.0 {
                write_polygon(polygon, projection, out);
            }
        }
        Geometry::GeometryCollection(collection) => {
            for child in &collection.0 {
                write_geometry(child, projection, out);
            }
        }
        // Points draw as circles, not path data; the remaining geo-types
        // shapes never come out of a decoded topology.
        _ => {}
    }
}

fn write_line(line: &LineString<f64>, projection: &dyn Projection, out: &mut String) {
    for (i, &coord) in line.0.iter().enumerate() {
        write_point(out, if i == 0 { 'M' } else { 'L' }, projection.project(coord));
    }
}

fn write_polygon(polygon: &Polygon<f64>, projection: &dyn Projection, out: &mut String) {
    write_ring(polygon.exterior(), projection, out);
    for interior in polygon.interiors() {
        write_ring(interior, projection, out);
    }
}

fn write_ring(ring: &LineString<f64>, projection: &dyn Projection, out: &mut String) {
    let coords = ring.0.as_slice();
    // The duplicated closing coordinate is implied by `Z`.
    let n = coords.len();
    let coords = if n > 1 && coords[n - 1] == coords[0] {
        &coords[..n - 1]
    } else {
        coords
    };
    if coords.is_empty() {
        return;
    }
    for (i, &coord) in coords.iter().enumerate() {
        write_point(out, if i == 0 { 'M' } else { 'L' }, projection.project(coord));
    }
    out.push('Z');
}

fn write_point(out: &mut String, command: char, position: Coord<f64>) {
    out.push(command);
    out.push_str(&fmt_path(position.x));
    out.push(',');
    out.push_str(&fmt_path(position.y));
}

#[cfg(test)]
mod tests {
    use geo_types::{Geometry, GeometryCollection, LineString, MultiLineString, Point, Polygon};

    use super::{Equirectangular, Identity, Projection, geometry_path, multi_line_path};

    fn square() -> Polygon<f64> {
        Polygon::new(
            LineString::from(vec![(0.0, 0.0), (10.0, 0.0), (10.0, 10.0), (0.0, 10.0)]),
            Vec::new(),
        )
    }

    #[test]
    fn rings_close_with_z_and_skip_the_duplicate_point() {
        let d = geometry_path(&Geometry::Polygon(square()), &Identity);
        assert_eq!(d, "M0,0L10,0L10,10L0,10Z");
    }

    #[test]
    fn interior_rings_become_separate_subpaths() {
        let holed = Polygon::new(
            LineString::from(vec![(0.0, 0.0), (10.0, 0.0), (10.0, 10.0), (0.0, 10.0)]),
            vec![LineString::from(vec![
                (4.0, 4.0),
                (6.0, 4.0),
                (6.0, 6.0),
                (4.0, 6.0),
            ])],
        );
        let d = geometry_path(&Geometry::Polygon(holed), &Identity);
        assert_eq!(d.matches('Z').count(), 2);
        assert_eq!(d.matches('M').count(), 2);
    }

    #[test]
    fn lines_do_not_close() {
        let lines = MultiLineString(vec![
            LineString::from(vec![(0.0, 0.0), (5.0, 0.5)]),
            LineString::from(vec![(1.0, 1.0), (2.0, 1.0)]),
        ]);
        let d = multi_line_path(&lines, &Identity);
        assert_eq!(d, "M0,0L5,0.5M1,1L2,1");
    }

    #[test]
    fn coordinates_round_to_three_fractional_digits() {
        let line = MultiLineString(vec![LineString::from(vec![
            (0.12349, 0.0),
            (1.0005, 2.0),
        ])]);
        let d = multi_line_path(&line, &Identity);
        assert_eq!(d, "M0.123,0L1.001,2");
    }

    #[test]
    fn collections_concatenate_and_points_are_skipped() {
        let collection = Geometry::GeometryCollection(GeometryCollection(vec![
            Geometry::Point(Point::new(3.0, 4.0)),
            Geometry::Polygon(square()),
        ]));
        let d = geometry_path(&collection, &Identity);
        assert_eq!(d, "M0,0L10,0L10,10L0,10Z");
    }

    #[test]
    fn equirectangular_maps_the_globe_onto_the_canvas() {
        let projection = Equirectangular {
            width: 360.0,
            height: 180.0,
        };
        let top_left = projection.project(geo_types::Coord { x: -180.0, y: 90.0 });
        let madrid = projection.project(geo_types::Coord { x: -3.7, y: 40.4 });
        assert_eq!(top_left, geo_types::Coord { x: 0.0, y: 0.0 });
        assert!((madrid.x - 176.3).abs() < 1e-9);
        assert!((madrid.y - 49.6).abs() < 1e-9);
    }
}
