use crate::model::FipsCode;

#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error(transparent)]
    Topology(#[from] terrapin::Error),
    #[error(transparent)]
    Json(#[from] serde_json::Error),
    #[error("no education record for county fips {fips}")]
    MissingRecord { fips: FipsCode },
    #[error("county feature without a numeric id")]
    MissingId,
    #[error("education dataset is empty")]
    EmptyDataset,
    #[error("invalid color literal: {value}")]
    Color { value: String },
}

pub type Result<T> = std::result::Result<T, Error>;
