#![forbid(unsafe_code)]

//! `choros` is a headless U.S. county choropleth pipeline in Rust.
//!
//! It reproduces the D3 county education chart end to end: decode the
//! counties TopoJSON, join education records by fips code, bucket the
//! values through a stepped linear color scale, and serialize an SVG with
//! county paths, mesh borders, a legend and a tooltip overlay.
//!
//! # Features
//!
//! - `render` (default): scene building + SVG output (`choros::render`)
//! - `fetch`: dataset loading over HTTP or from disk (`choros::fetch`)

pub use choros_core::*;
pub use terrapin;

#[cfg(feature = "fetch")]
pub mod fetch;

#[cfg(feature = "render")]
pub mod render {
    //! Everything from `choros-render`, plus whole-pipeline helpers that go
    //! from a parsed topology and education records to a scene or an SVG
    //! document.

    use std::sync::Arc;

    pub use choros_render::*;

    use crate::{ChartOptions, ChoroplethScale, EducationRecord, Result, join_counties};

    /// Object names the counties topology uses.
    pub const COUNTIES_OBJECT: &str = "counties";
    pub const STATES_OBJECT: &str = "states";
    pub const NATION_OBJECT: &str = "nation";

    /// Decodes the county features, joins the education records, derives
    /// the stepped scale from the joined values and lays out the scene.
    /// State borders keep only boundaries shared by two states; the nation
    /// mesh keeps every boundary.
    pub fn build_scene(
        topology: &terrapin::Topology,
        records: &[EducationRecord],
        options: &ChartOptions,
        projection: &dyn Projection,
        measurer: Arc<dyn TextMeasurer + Send + Sync>,
    ) -> Result<ChoroplethScene> {
        let counties = join_counties(
            terrapin::feature_collection(topology, COUNTIES_OBJECT)?,
            records,
            options.join_policy,
        )?;
        let scale = ChoroplethScale::from_values(
            counties.iter().map(|county| county.education),
            options.low_color,
            options.high_color,
        )?;
        let states = terrapin::mesh_filtered(topology, STATES_OBJECT, |a, b| !std::ptr::eq(a, b))?;
        let nation = terrapin::mesh(topology, NATION_OBJECT)?;
        Ok(ChoroplethScene::build(
            counties,
            &states,
            &nation,
            scale,
            options.clone(),
            projection,
            measurer,
        ))
    }

    /// [`build_scene`] with the identity projection and the deterministic
    /// measurer, serialized straight to SVG.
    pub fn render_svg(
        topology: &terrapin::Topology,
        records: &[EducationRecord],
        options: &ChartOptions,
    ) -> Result<String> {
        let scene = build_scene(
            topology,
            records,
            options,
            &Identity,
            Arc::new(DeterministicTextMeasurer::default()),
        )?;
        Ok(scene.to_svg())
    }
}

pub const VERSION: &str = env!("CARGO_PKG_VERSION");
