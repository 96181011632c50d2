//! Dataset loading. Both inputs fetch concurrently; either failure aborts
//! the pair. There is no retry and no timeout beyond the client defaults.

use std::fmt;
use std::path::PathBuf;

use serde::de::DeserializeOwned;
use tracing::warn;

use crate::EducationRecord;
use terrapin::Topology;

/// Production dataset locations.
pub const COUNTIES_URL: &str =
    "https://cdn.freecodecamp.org/testable-projects-fcc/data/choropleth_map/counties.json";
pub const EDUCATION_URL: &str =
    "https://cdn.freecodecamp.org/testable-projects-fcc/data/choropleth_map/for_user_education.json";

/// Where a dataset comes from. [`Source::parse`] treats `http://` and
/// `https://` values as URLs and everything else as a filesystem path.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Source {
    Url(String),
    Path(PathBuf),
}

impl Source {
    pub fn parse(value: &str) -> Self {
        if value.starts_with("http://") || value.starts_with("https://") {
            Source::Url(value.to_string())
        } else {
            Source::Path(PathBuf::from(value))
        }
    }
}

impl fmt::Display for Source {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Source::Url(url) => f.write_str(url),
            Source::Path(path) => write!(f, "{}", path.display()),
        }
    }
}

/// The pair of dataset sources. Defaults to the production URLs.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Endpoints {
    pub counties: Source,
    pub education: Source,
}

impl Default for Endpoints {
    fn default() -> Self {
        Self {
            counties: Source::Url(COUNTIES_URL.to_string()),
            education: Source::Url(EDUCATION_URL.to_string()),
        }
    }
}

#[derive(Debug, thiserror::Error)]
pub enum FetchError {
    #[error("failed to fetch {endpoint}")]
    Http {
        endpoint: String,
        #[source]
        cause: reqwest::Error,
    },
    #[error("failed to read {}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        cause: std::io::Error,
    },
    #[error("failed to decode {endpoint}")]
    Decode {
        endpoint: String,
        #[source]
        cause: serde_json::Error,
    },
    #[error("failed to start the fetch runtime")]
    Runtime(#[source] std::io::Error),
}

/// Loads the topology and the education records concurrently.
pub async fn load(endpoints: &Endpoints) -> Result<(Topology, Vec<EducationRecord>), FetchError> {
    let client = reqwest::Client::new();
    tokio::try_join!(
        load_json::<Topology>(&client, &endpoints.counties),
        load_json::<Vec<EducationRecord>>(&client, &endpoints.education),
    )
    .inspect_err(|err| warn!(%err, "dataset load failed, aborting the pair"))
}

/// [`load`] for callers without a runtime: spins a current-thread runtime
/// for the duration of the call.
pub fn load_blocking(endpoints: &Endpoints) -> Result<(Topology, Vec<EducationRecord>), FetchError> {
    let runtime = tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()
        .map_err(FetchError::Runtime)?;
    runtime.block_on(load(endpoints))
}

async fn load_json<T>(client: &reqwest::Client, source: &Source) -> Result<T, FetchError>
where
    T: DeserializeOwned,
{
    match source {
        Source::Url(url) => {
            let response = client
                .get(url)
                .send()
                .await
                .and_then(|response| response.error_for_status())
                .map_err(|cause| FetchError::Http {
                    endpoint: url.clone(),
                    cause,
                })?;
            response.json().await.map_err(|cause| FetchError::Http {
                endpoint: url.clone(),
                cause,
            })
        }
        Source::Path(path) => {
            let bytes = tokio::fs::read(path).await.map_err(|cause| FetchError::Io {
                path: path.clone(),
                cause,
            })?;
            serde_json::from_slice(&bytes).map_err(|cause| FetchError::Decode {
                endpoint: path.display().to_string(),
                cause,
            })
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn schemes_pick_urls_and_everything_else_is_a_path() {
        assert_eq!(
            Source::parse("https://example.org/counties.json"),
            Source::Url("https://example.org/counties.json".to_string())
        );
        assert_eq!(
            Source::parse("fixtures/grid.topo.json"),
            Source::Path(PathBuf::from("fixtures/grid.topo.json"))
        );
    }

    #[test]
    fn default_endpoints_point_at_the_production_data() {
        let endpoints = Endpoints::default();
        assert_eq!(endpoints.counties, Source::Url(COUNTIES_URL.to_string()));
        assert_eq!(endpoints.education, Source::Url(EDUCATION_URL.to_string()));
    }
}
