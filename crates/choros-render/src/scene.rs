//! Retained scene model: every county shape with its fill, the mesh
//! borders, the legend, and the tooltip overlay. Pointer events mutate the
//! scene in place; `to_svg` serializes whatever state it is in.

use std::sync::Arc;

use geo_types::MultiLineString;
use rustc_hash::FxHashMap;

use choros_core::{ChartOptions, ChoroplethScale, County, FipsCode};

use crate::interact::HoverPhase;
use crate::path::{Projection, geometry_path, multi_line_path};
use crate::svg::fmt_js;
use crate::text::TextMeasurer;

pub(crate) const VIEWBOX_HEIGHT_FACTOR: f64 = 1.2;
pub(crate) const LEGEND_X_FACTOR: f64 = 0.8;
pub(crate) const LEGEND_Y_FACTOR: f64 = 0.6;
pub(crate) const LEGEND_SWATCH_WIDTH: f64 = 10.0;
pub(crate) const LEGEND_SWATCH_HEIGHT: f64 = 40.0;
pub(crate) const LEGEND_LABEL_X: f64 = 20.0;
pub(crate) const LEGEND_LABEL_Y_OFFSET: f64 = 6.0;
pub(crate) const LEGEND_TICK_LENGTH: f64 = 15.0;
pub(crate) const TOOLTIP_WIDTH: f64 = 275.0;
pub(crate) const TOOLTIP_HEIGHT: f64 = 70.0;
pub(crate) const TOOLTIP_RADIUS: f64 = 5.0;
pub(crate) const TOOLTIP_LINE_X: f64 = 10.0;
pub(crate) const TOOLTIP_FIRST_LINE_Y: f64 = 22.0;
pub(crate) const TOOLTIP_LINE_SPACING: f64 = 17.0;
pub(crate) const TOOLTIP_WIDTH_PAD: f64 = 25.0;
pub(crate) const TOOLTIP_OFFSET_X: f64 = 20.0;
pub(crate) const TOOLTIP_OFFSET_Y: f64 = -20.0;

/// One county path, carrying the joined record fields that become `data-*`
/// attributes.
#[derive(Debug, Clone, PartialEq)]
pub struct CountyShape {
    pub fips: FipsCode,
    pub state: String,
    pub name: String,
    pub education: f64,
    pub path: String,
    pub fill: String,
}

#[derive(Debug, Clone, PartialEq)]
pub struct LegendSwatch {
    pub y: f64,
    pub fill: String,
}

#[derive(Debug, Clone, PartialEq)]
pub struct LegendLabel {
    pub y: f64,
    pub text: String,
}

/// Stepped-scale legend: one swatch per color band, a label and a tick per
/// bucket boundary.
#[derive(Debug, Clone, PartialEq)]
pub struct Legend {
    pub x: f64,
    pub y: f64,
    pub swatches: Vec<LegendSwatch>,
    pub labels: Vec<LegendLabel>,
    pub tick_ys: Vec<f64>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Tooltip {
    pub visible: bool,
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub lines: Vec<String>,
    pub education: Option<f64>,
}

impl Default for Tooltip {
    fn default() -> Self {
        Self {
            visible: false,
            x: 0.0,
            y: 0.0,
            width: TOOLTIP_WIDTH,
            lines: Vec::new(),
            education: None,
        }
    }
}

#[derive(Clone)]
pub struct ChoroplethScene {
    pub(crate) options: ChartOptions,
    pub(crate) counties: Vec<CountyShape>,
    pub(crate) by_fips: FxHashMap<FipsCode, usize>,
    pub(crate) state_borders: String,
    pub(crate) nation_border: String,
    pub(crate) legend: Legend,
    pub(crate) tooltip: Tooltip,
    pub(crate) hover: HoverPhase,
    pub(crate) scale: ChoroplethScale,
    pub(crate) measurer: Arc<dyn TextMeasurer + Send + Sync>,
}

impl ChoroplethScene {
    /// Projects every county geometry and both meshes into path data and
    /// computes the legend layout. Fills come from the stepped scale.
    pub fn build(
        counties: Vec<County>,
        state_mesh: &MultiLineString<f64>,
        nation_mesh: &MultiLineString<f64>,
        scale: ChoroplethScale,
        options: ChartOptions,
        projection: &dyn Projection,
        measurer: Arc<dyn TextMeasurer + Send + Sync>,
    ) -> Self {
        let mut shapes = Vec::with_capacity(counties.len());
        let mut by_fips = FxHashMap::default();
        for county in counties {
            by_fips.entry(county.fips).or_insert(shapes.len());
            shapes.push(CountyShape {
                fips: county.fips,
                state: county.state,
                name: county.name,
                education: county.education,
                path: geometry_path(&county.geometry, projection),
                fill: scale.color_for(county.education).to_string(),
            });
        }
        let legend = build_legend(&scale, &options);
        Self {
            state_borders: multi_line_path(state_mesh, projection),
            nation_border: multi_line_path(nation_mesh, projection),
            counties: shapes,
            by_fips,
            legend,
            tooltip: Tooltip::default(),
            hover: HoverPhase::Idle,
            scale,
            options,
            measurer,
        }
    }

    pub fn options(&self) -> &ChartOptions {
        &self.options
    }

    pub fn counties(&self) -> &[CountyShape] {
        &self.counties
    }

    pub fn county(&self, fips: FipsCode) -> Option<&CountyShape> {
        self.by_fips.get(&fips).map(|&index| &self.counties[index])
    }

    pub fn state_borders(&self) -> &str {
        &self.state_borders
    }

    pub fn nation_border(&self) -> &str {
        &self.nation_border
    }

    pub fn legend(&self) -> &Legend {
        &self.legend
    }

    pub fn tooltip(&self) -> &Tooltip {
        &self.tooltip
    }

    pub fn scale(&self) -> &ChoroplethScale {
        &self.scale
    }

    /// The county currently highlighted, if any.
    pub fn hovered(&self) -> Option<FipsCode> {
        match self.hover {
            HoverPhase::Hover(fips) => Some(fips),
            HoverPhase::Idle => None,
        }
    }
}

fn build_legend(scale: &ChoroplethScale, options: &ChartOptions) -> Legend {
    let buckets = scale.buckets();
    // One swatch per band between consecutive buckets, colored by the
    // linear ramp at the band's lower bound.
    let swatches = buckets[..buckets.len() - 1]
        .iter()
        .enumerate()
        .map(|(i, &bucket)| LegendSwatch {
            y: i as f64 * LEGEND_SWATCH_HEIGHT,
            fill: scale.linear().color(bucket).to_string(),
        })
        .collect();
    let labels = buckets
        .iter()
        .enumerate()
        .map(|(i, &bucket)| LegendLabel {
            y: LEGEND_LABEL_Y_OFFSET + i as f64 * LEGEND_SWATCH_HEIGHT,
            text: format!("{}%", fmt_js(bucket)),
        })
        .collect();
    let tick_ys = (0..buckets.len())
        .map(|i| i as f64 * LEGEND_SWATCH_HEIGHT)
        .collect();
    Legend {
        x: options.width * LEGEND_X_FACTOR,
        y: options.height * LEGEND_Y_FACTOR,
        swatches,
        labels,
        tick_ys,
    }
}
