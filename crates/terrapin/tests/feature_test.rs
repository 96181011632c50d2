use geo_types::Geometry as Geom;
use serde_json::json;
use terrapin::{FeatureId, Topology, bbox, feature, feature_collection};

fn topology(value: serde_json::Value) -> Topology {
    serde_json::from_value(value).unwrap()
}

/// Two unit squares sharing the vertical edge (1, 0)..(1, 1). Arc 0 is the
/// shared edge, arcs 1 and 2 are the open remainders of each square.
fn two_squares() -> Topology {
    topology(json!({
        "type": "Topology",
        "arcs": [
            [[1.0, 0.0], [1.0, 1.0]],
            [[1.0, 1.0], [0.0, 1.0], [0.0, 0.0], [1.0, 0.0]],
            [[1.0, 0.0], [2.0, 0.0], [2.0, 1.0], [1.0, 1.0]]
        ],
        "objects": {
            "squares": {
                "type": "GeometryCollection",
                "geometries": [
                    {"type": "Polygon", "id": 1, "properties": {"name": "left"}, "arcs": [[0, 1]]},
                    {"type": "Polygon", "id": 2, "properties": {"name": "right"}, "arcs": [[2, -1]]}
                ]
            }
        }
    }))
}

fn exterior_coords(geometry: &Geom<f64>) -> Vec<(f64, f64)> {
    let Geom::Polygon(polygon) = geometry else {
        panic!("expected a polygon, got {geometry:?}");
    };
    polygon.exterior().coords().map(|c| (c.x, c.y)).collect()
}

#[test]
fn decodes_absolute_arcs_into_closed_rings() {
    let collection = feature_collection(&two_squares(), "squares").unwrap();
    assert_eq!(collection.features.len(), 2);
    assert_eq!(
        exterior_coords(&collection.features[0].geometry),
        vec![
            (1.0, 0.0),
            (1.0, 1.0),
            (0.0, 1.0),
            (0.0, 0.0),
            (1.0, 0.0)
        ]
    );
}

#[test]
fn shared_arc_endpoints_are_not_duplicated() {
    let collection = feature_collection(&two_squares(), "squares").unwrap();
    // Arc 0 ends at (1, 1) and arc 1 starts there; the ring keeps one copy.
    assert_eq!(exterior_coords(&collection.features[0].geometry).len(), 5);
}

#[test]
fn complemented_arc_indexes_decode_reversed() {
    let collection = feature_collection(&two_squares(), "squares").unwrap();
    // The right square traverses the shared edge as ~0, from (1, 1) down.
    assert_eq!(
        exterior_coords(&collection.features[1].geometry),
        vec![
            (1.0, 0.0),
            (2.0, 0.0),
            (2.0, 1.0),
            (1.0, 1.0),
            (1.0, 0.0)
        ]
    );
}

#[test]
fn collection_features_carry_ids_and_properties_in_order() {
    let collection = feature_collection(&two_squares(), "squares").unwrap();
    assert_eq!(collection.features[0].id, Some(FeatureId::Number(1)));
    assert_eq!(collection.features[1].id, Some(FeatureId::Number(2)));
    assert_eq!(
        collection.features[0].properties.get("name"),
        Some(&json!("left"))
    );
}

#[test]
fn transform_deltas_accumulate_within_an_arc() {
    let topo = topology(json!({
        "type": "Topology",
        "transform": {"scale": [0.001, 0.001], "translate": [0.0, 0.0]},
        "arcs": [[[1000, 1000], [1000, 0], [0, 1000]]],
        "objects": {"road": {"type": "LineString", "arcs": [0]}}
    }));
    let decoded = feature(&topo, "road").unwrap();
    let Geom::LineString(line) = decoded.geometry else {
        panic!("expected a line string");
    };
    let coords: Vec<(f64, f64)> = line.coords().map(|c| (c.x, c.y)).collect();
    assert_eq!(coords, vec![(1.0, 1.0), (2.0, 1.0), (2.0, 2.0)]);
}

#[test]
fn transform_accumulator_resets_per_arc_and_reversal_happens_after() {
    let topo = topology(json!({
        "type": "Topology",
        "transform": {"scale": [0.001, 0.001], "translate": [0.0, 0.0]},
        "arcs": [[[1000, 1000], [1000, 0], [0, 1000]]],
        "objects": {"road": {"type": "LineString", "arcs": [-1]}}
    }));
    let decoded = feature(&topo, "road").unwrap();
    let Geom::LineString(line) = decoded.geometry else {
        panic!("expected a line string");
    };
    let coords: Vec<(f64, f64)> = line.coords().map(|c| (c.x, c.y)).collect();
    assert_eq!(coords, vec![(2.0, 2.0), (2.0, 1.0), (1.0, 1.0)]);
}

#[test]
fn point_coordinates_are_absolute_under_a_transform() {
    let topo = topology(json!({
        "type": "Topology",
        "transform": {"scale": [0.001, 0.001], "translate": [10.0, 20.0]},
        "arcs": [],
        "objects": {"capital": {"type": "Point", "coordinates": [1000, 500]}}
    }));
    let decoded = feature(&topo, "capital").unwrap();
    let Geom::Point(point) = decoded.geometry else {
        panic!("expected a point");
    };
    assert_eq!((point.x(), point.y()), (11.0, 20.5));
}

#[test]
fn degenerate_rings_are_padded_to_four_points() {
    let topo = topology(json!({
        "type": "Topology",
        "arcs": [[[5.0, 5.0], [5.0, 5.0]]],
        "objects": {"dot": {"type": "Polygon", "arcs": [[0]]}}
    }));
    let decoded = feature(&topo, "dot").unwrap();
    assert_eq!(exterior_coords(&decoded.geometry).len(), 4);
}

#[test]
fn unknown_objects_are_an_error() {
    let err = feature(&two_squares(), "nope").unwrap_err();
    assert!(err.to_string().contains("nope"));
}

#[test]
fn bbox_covers_arcs_and_inline_points() {
    let topo = topology(json!({
        "type": "Topology",
        "transform": {"scale": [0.001, 0.001], "translate": [0.0, 0.0]},
        "arcs": [[[1000, 1000], [1000, 0], [0, 1000]]],
        "objects": {
            "road": {"type": "LineString", "arcs": [0]},
            "capital": {"type": "Point", "coordinates": [5000, 100]}
        }
    }));
    assert_eq!(bbox(&topo).unwrap(), [1.0, 0.1, 5.0, 2.0]);
}
