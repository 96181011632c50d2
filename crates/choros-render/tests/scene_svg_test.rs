use std::collections::BTreeSet;
use std::sync::Arc;

use geo_types::{Geometry, LineString, MultiLineString, Polygon};
use serde_json::json;

use choros_core::{ChartOptions, ChoroplethScale, County, FipsCode};
use choros_render::{ChoroplethScene, DeterministicTextMeasurer, Identity, geometry_path};

fn county(fips: u32, state: &str, name: &str, education: f64, origin: (f64, f64)) -> County {
    let (x, y) = origin;
    County {
        fips: FipsCode(fips),
        state: state.to_string(),
        name: name.to_string(),
        education,
        geometry: Geometry::Polygon(Polygon::new(
            LineString::from(vec![
                (x, y),
                (x + 10.0, y),
                (x + 10.0, y + 10.0),
                (x, y + 10.0),
            ]),
            Vec::new(),
        )),
    }
}

fn scene(counties: Vec<County>) -> ChoroplethScene {
    let options = ChartOptions::default();
    let scale = ChoroplethScale::from_values(
        counties.iter().map(|c| c.education),
        options.low_color,
        options.high_color,
    )
    .unwrap();
    ChoroplethScene::build(
        counties,
        &MultiLineString(vec![LineString::from(vec![(10.0, 0.0), (10.0, 10.0)])]),
        &MultiLineString(vec![LineString::from(vec![(0.0, 0.0), (20.0, 0.0)])]),
        scale,
        options,
        &Identity,
        Arc::new(DeterministicTextMeasurer::default()),
    )
}

fn sample_counties() -> Vec<County> {
    vec![
        county(6001, "CA", "Alameda County", 45.2, (0.0, 0.0)),
        county(48113, "TX", "Dallas County", 30.5, (10.0, 0.0)),
    ]
}

#[test]
fn the_document_frame_matches_the_canvas_options() {
    let svg = scene(sample_counties()).to_svg();
    assert!(svg.starts_with(
        "<svg xmlns=\"http://www.w3.org/2000/svg\" width=\"1300\" height=\"565\" viewBox=\"0 0 1300 678\">"
    ));
    assert!(svg.contains("<g id=\"graph\" transform=\"translate(150, 25)\">"));
    assert!(svg.ends_with("</svg>\n"));
}

#[test]
fn county_paths_carry_their_data_attributes() {
    let svg = scene(sample_counties()).to_svg();
    assert!(svg.contains(
        "<path class=\"county\" data-fips=\"6001\" data-education=\"45.2\" data-state=\"CA\" data-county=\"Alameda County\""
    ));
    assert!(svg.contains("data-fips=\"48113\" data-education=\"30.5\""));
    assert!(svg.contains("d=\"M0,0L10,0L10,10L0,10Z\""));
}

#[test]
fn county_names_are_xml_escaped() {
    let svg = scene(vec![
        county(35013, "NM", "Do\u{f1}a Ana & \"friends\"", 20.0, (0.0, 0.0)),
        county(6001, "CA", "Alameda County", 45.2, (10.0, 0.0)),
    ])
    .to_svg();
    assert!(svg.contains("data-county=\"Do\u{f1}a Ana &amp; &quot;friends&quot;\""));
}

#[test]
fn fills_step_to_at_most_five_distinct_colors() {
    let counties = (0..30)
        .map(|i| county(1000 + i, "ST", "Somewhere", f64::from(i) * 3.3, (0.0, 0.0)))
        .collect();
    let scene = scene(counties);
    let fills: BTreeSet<&str> = scene.counties().iter().map(|c| c.fill.as_str()).collect();
    assert!(fills.len() <= 5, "got {} distinct fills", fills.len());
    assert!(fills.iter().all(|fill| fill.starts_with("rgb(")));
}

#[test]
fn mesh_borders_render_as_unfilled_strokes() {
    let svg = scene(sample_counties()).to_svg();
    assert_eq!(svg.matches("<path fill=\"none\" stroke=\"white\"").count(), 2);
    assert!(svg.contains("<path fill=\"none\" stroke=\"white\" d=\"M10,0L10,10\"/>"));
    assert!(svg.contains("<path fill=\"none\" stroke=\"white\" d=\"M0,0L20,0\"/>"));
}

#[test]
fn the_legend_has_four_swatches_five_labels_and_five_ticks() {
    let built = scene(sample_counties());
    let legend = built.legend();
    assert_eq!(legend.swatches.len(), 4);
    assert_eq!(legend.labels.len(), 5);
    assert_eq!(legend.tick_ys.len(), 5);
    assert_eq!(legend.x, 1300.0 * 0.8);
    assert_eq!(legend.y, 565.0 * 0.6);

    let svg = built.to_svg();
    assert!(svg.contains("<g id=\"legend\" transform=\"translate(1040, 339)\">"));
    assert!(svg.contains("<line x1=\"0\" x2=\"15\" y1=\"0\" y2=\"0\" stroke=\"black\"/>"));
    assert!(svg.contains("<line x1=\"0\" x2=\"15\" y1=\"160\" y2=\"160\" stroke=\"black\"/>"));
}

#[test]
fn legend_labels_mark_the_bucket_percentages() {
    let counties = [10.0, 20.0, 30.0, 40.0, 90.0]
        .iter()
        .enumerate()
        .map(|(i, &education)| county(2000 + i as u32, "ST", "Somewhere", education, (0.0, 0.0)))
        .collect();
    let built = scene(counties);
    let texts: Vec<&str> = built
        .legend()
        .labels
        .iter()
        .map(|label| label.text.as_str())
        .collect();
    assert_eq!(texts, ["10%", "30%", "50%", "70%", "90%"]);

    let svg = built.to_svg();
    assert!(svg.contains("<text x=\"20\" y=\"6\" fill=\"black\">10%</text>"));
    assert!(svg.contains("<text x=\"20\" y=\"166\" fill=\"black\">90%</text>"));
}

#[test]
fn swatch_fills_match_the_counties_in_their_band() {
    let counties = [10.0, 20.0, 30.0, 40.0, 90.0]
        .iter()
        .enumerate()
        .map(|(i, &education)| county(2000 + i as u32, "ST", "Somewhere", education, (0.0, 0.0)))
        .collect();
    let built = scene(counties);
    // Education 10 sits on the lowest bucket threshold, so its fill is the
    // first swatch's color.
    let lowest = built.county(FipsCode(2000)).unwrap();
    assert_eq!(built.legend().swatches[0].fill, lowest.fill);
}

#[test]
fn the_tooltip_is_hidden_until_hover() {
    let svg = scene(sample_counties()).to_svg();
    assert!(svg.contains("<g id=\"tooltip\" style=\"display: none\" transform=\"translate(0, 0)\">"));
    assert!(svg.contains("<rect width=\"275\" height=\"70\" rx=\"5\" ry=\"5\" fill=\"rgba(255, 255, 255, 0.9)\" stroke=\"#dde6f5\"/>"));
    assert!(!svg.contains("id=\"tooltip-0\""));
    assert!(!svg.contains("data-education=\"\""));
}

#[test]
fn decoded_quantized_counties_produce_clean_path_data() {
    let topology: terrapin::Topology = serde_json::from_value(json!({
        "type": "Topology",
        "transform": {"scale": [0.5, 0.5], "translate": [100.0, 10.0]},
        "objects": {"counties": {"type": "Polygon", "id": 1, "arcs": [[0]]}},
        "arcs": [[[0, 0], [20, 0], [0, 20], [-20, 0], [0, -20]]]
    }))
    .unwrap();
    let collection = terrapin::feature_collection(&topology, "counties").unwrap();
    let d = geometry_path(&collection.features[0].geometry, &Identity);
    assert_eq!(d, "M100,10L110,10L110,20L100,20Z");
}
