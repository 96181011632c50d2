//! Scene construction and SVG output for county choropleths. Baseline: the
//! D3 v5 rendition of the chart (`d3-geo` path serialization, linear color
//! ramps, DOM tooltip).

#![forbid(unsafe_code)]

pub mod interact;
pub mod path;
pub mod scene;
mod svg;
pub mod text;

pub use interact::PointerEvent;
pub use path::{Equirectangular, Identity, Projection, geometry_path, multi_line_path};
pub use scene::{ChoroplethScene, CountyShape, Legend, LegendLabel, LegendSwatch, Tooltip};
pub use text::{DeterministicTextMeasurer, TextMeasurer, TextMetrics, TextStyle};

pub const VERSION: &str = env!("CARGO_PKG_VERSION");
