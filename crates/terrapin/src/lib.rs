//! TopoJSON topology decoding.
//!
//! Baseline: `topojson-client` v3 (feature, mesh and stitch semantics).

#![forbid(unsafe_code)]

mod decode;
mod feature;
mod mesh;
mod stitch;
mod topology;

pub use decode::bbox;
pub use feature::{Feature, FeatureCollection, feature, feature_collection};
pub use mesh::{mesh, mesh_filtered};
pub use topology::{FeatureId, Geometry, GeometryMeta, Position, Topology, Transform};

pub const VERSION: &str = env!("CARGO_PKG_VERSION");

#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("unknown topology object: {name}")]
    UnknownObject { name: String },
    #[error("arc index {index} out of range")]
    ArcIndex { index: i32 },
    #[error("position with fewer than two coordinates")]
    ShortPosition,
    #[error(transparent)]
    Json(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, Error>;
