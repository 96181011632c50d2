//! Data model for the county choropleth: education records, the fips join,
//! and the stepped linear color scale.

#![forbid(unsafe_code)]

pub mod color;
pub mod config;
mod error;
pub mod join;
pub mod model;
pub mod scale;

pub use color::Rgb;
pub use config::ChartOptions;
pub use error::{Error, Result};
pub use join::{JoinPolicy, join_counties};
pub use model::{County, EducationRecord, FipsCode, parse_education};
pub use scale::{BUCKET_COUNT, ChoroplethScale, LinearRgbScale};

pub const VERSION: &str = env!("CARGO_PKG_VERSION");
