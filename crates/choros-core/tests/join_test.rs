use choros_core::{EducationRecord, FipsCode, JoinPolicy, join_counties};
use geo_types::{Geometry, Point};
use terrapin::{Feature, FeatureCollection, FeatureId};

fn feature(id: Option<FeatureId>) -> Feature {
    Feature {
        id,
        properties: Default::default(),
        geometry: Geometry::Point(Point::new(0.0, 0.0)),
    }
}

fn features(ids: Vec<FeatureId>) -> FeatureCollection {
    FeatureCollection {
        features: ids.into_iter().map(|id| feature(Some(id))).collect(),
    }
}

fn record(fips: u32, state: &str, name: &str, value: f64) -> EducationRecord {
    EducationRecord {
        fips: FipsCode(fips),
        state: state.to_string(),
        area_name: name.to_string(),
        bachelors_or_higher: value,
    }
}

#[test]
fn joins_by_fips_with_exact_values() {
    let records = vec![
        record(6001, "California", "Alameda County", 45.2),
        record(6003, "California", "Alpine County", 33.1),
    ];
    let counties = join_counties(
        features(vec![FeatureId::Number(6003), FeatureId::Number(6001)]),
        &records,
        JoinPolicy::Strict,
    )
    .unwrap();
    assert_eq!(counties.len(), 2);
    assert_eq!(counties[0].fips, FipsCode(6003));
    assert_eq!(counties[0].education, 33.1);
    assert_eq!(counties[1].name, "Alameda County");
    assert_eq!(counties[1].education, 45.2);
}

#[test]
fn zero_padded_string_ids_join_numeric_records() {
    let records = vec![record(6001, "California", "Alameda County", 45.2)];
    let counties = join_counties(
        features(vec![FeatureId::Text("06001".to_string())]),
        &records,
        JoinPolicy::Strict,
    )
    .unwrap();
    assert_eq!(counties[0].fips, FipsCode(6001));
}

#[test]
fn strict_policy_names_the_missing_fips() {
    let records = vec![record(6001, "California", "Alameda County", 45.2)];
    let err = join_counties(
        features(vec![FeatureId::Number(6001), FeatureId::Number(48113)]),
        &records,
        JoinPolicy::Strict,
    )
    .unwrap_err();
    assert!(err.to_string().contains("48113"));
}

#[test]
fn skip_policy_drops_unmatched_counties() {
    let records = vec![record(6001, "California", "Alameda County", 45.2)];
    let counties = join_counties(
        features(vec![FeatureId::Number(6001), FeatureId::Number(48113)]),
        &records,
        JoinPolicy::Skip,
    )
    .unwrap();
    assert_eq!(counties.len(), 1);
    assert_eq!(counties[0].fips, FipsCode(6001));
}

#[test]
fn zero_fill_policy_keeps_unmatched_counties_at_zero() {
    let counties = join_counties(
        features(vec![FeatureId::Number(48113)]),
        &[],
        JoinPolicy::ZeroFill,
    )
    .unwrap();
    assert_eq!(counties.len(), 1);
    assert_eq!(counties[0].education, 0.0);
    assert_eq!(counties[0].state, "");
}

#[test]
fn first_record_wins_on_duplicate_fips() {
    let records = vec![
        record(6001, "California", "Alameda County", 45.2),
        record(6001, "California", "Alameda (stale)", 1.0),
    ];
    let counties = join_counties(
        features(vec![FeatureId::Number(6001)]),
        &records,
        JoinPolicy::Strict,
    )
    .unwrap();
    assert_eq!(counties[0].education, 45.2);
}

#[test]
fn features_without_a_numeric_id_fail_strict_and_drop_otherwise() {
    let records = vec![record(6001, "California", "Alameda County", 45.2)];
    let no_id = FeatureCollection {
        features: vec![feature(None), feature(Some(FeatureId::Number(6001)))],
    };
    assert!(join_counties(no_id.clone(), &records, JoinPolicy::Strict).is_err());
    let counties = join_counties(no_id, &records, JoinPolicy::Skip).unwrap();
    assert_eq!(counties.len(), 1);
}
