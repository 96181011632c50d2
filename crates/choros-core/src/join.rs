use rustc_hash::FxHashMap;
use terrapin::{FeatureCollection, FeatureId};
use tracing::warn;

use crate::error::{Error, Result};
use crate::model::{County, EducationRecord, FipsCode};

/// What to do with a county feature that has no education record.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum JoinPolicy {
    /// Fail the join, naming the first unmatched fips.
    #[default]
    Strict,
    /// Drop the county and log a warning.
    Skip,
    /// Keep the county with a zero value and empty names.
    ZeroFill,
}

/// Joins decoded county features with education records by fips.
///
/// Records are indexed once; on a duplicate fips the first record wins,
/// matching a linear scan over the dataset.
pub fn join_counties(
    features: FeatureCollection,
    records: &[EducationRecord],
    policy: JoinPolicy,
) -> Result<Vec<County>> {
    let mut index: FxHashMap<FipsCode, &EducationRecord> = FxHashMap::default();
    for record in records {
        index.entry(record.fips).or_insert(record);
    }

    let mut counties = Vec::with_capacity(features.features.len());
    for feature in features.features {
        let Some(fips) = feature.id.as_ref().and_then(feature_fips) else {
            if policy == JoinPolicy::Strict {
                return Err(Error::MissingId);
            }
            warn!(id = ?feature.id, "county feature without a numeric id, dropped");
            continue;
        };
        match index.get(&fips) {
            Some(record) => counties.push(County {
                fips,
                state: record.state.clone(),
                name: record.area_name.clone(),
                education: record.bachelors_or_higher,
                geometry: feature.geometry,
            }),
            None => match policy {
                JoinPolicy::Strict => return Err(Error::MissingRecord { fips }),
                JoinPolicy::Skip => {
                    warn!(%fips, "no education record for county, dropped");
                }
                JoinPolicy::ZeroFill => counties.push(County {
                    fips,
                    state: String::new(),
                    name: String::new(),
                    education: 0.0,
                    geometry: feature.geometry,
                }),
            },
        }
    }
    Ok(counties)
}

fn feature_fips(id: &FeatureId) -> Option<FipsCode> {
    match id {
        FeatureId::Number(n) => u32::try_from(*n).ok().map(FipsCode),
        FeatureId::Text(s) => s.trim().parse::<u32>().ok().map(FipsCode),
    }
}
