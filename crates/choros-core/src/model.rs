use std::fmt;
use std::num::ParseIntError;
use std::str::FromStr;

use serde::de::{self, Deserializer, Unexpected, Visitor};
use serde::{Deserialize, Serialize};

use crate::Result;

/// A county FIPS code, the join key between the topology and the education
/// dataset. Accepts a JSON number or a numeric string on input (`6001` and
/// `"06001"` both parse to 6001); displays unpadded, matching the ids the
/// datasets carry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(transparent)]
pub struct FipsCode(pub u32);

impl fmt::Display for FipsCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<u32> for FipsCode {
    fn from(value: u32) -> Self {
        FipsCode(value)
    }
}

impl FromStr for FipsCode {
    type Err = ParseIntError;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        s.trim().parse::<u32>().map(FipsCode)
    }
}

impl<'de> Deserialize<'de> for FipsCode {
    fn deserialize<D>(deserializer: D) -> std::result::Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        struct FipsVisitor;

        impl Visitor<'_> for FipsVisitor {
            type Value = FipsCode;

            fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str("a fips code as a number or a numeric string")
            }

            fn visit_u64<E: de::Error>(self, v: u64) -> std::result::Result<FipsCode, E> {
                u32::try_from(v)
                    .map(FipsCode)
                    .map_err(|_| E::invalid_value(Unexpected::Unsigned(v), &self))
            }

            fn visit_i64<E: de::Error>(self, v: i64) -> std::result::Result<FipsCode, E> {
                u32::try_from(v)
                    .map(FipsCode)
                    .map_err(|_| E::invalid_value(Unexpected::Signed(v), &self))
            }

            fn visit_str<E: de::Error>(self, v: &str) -> std::result::Result<FipsCode, E> {
                v.trim()
                    .parse::<u32>()
                    .map(FipsCode)
                    .map_err(|_| E::invalid_value(Unexpected::Str(v), &self))
            }
        }

        deserializer.deserialize_any(FipsVisitor)
    }
}

/// One row of the education dataset.
///
/// `bachelorsOrHigher` arrives as a number in the production dataset, but a
/// numeric string is accepted too; anything non-numeric or non-finite is
/// rejected at load time so no NaN reaches the scale.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct EducationRecord {
    pub fips: FipsCode,
    pub state: String,
    pub area_name: String,
    #[serde(rename = "bachelorsOrHigher", deserialize_with = "finite_number")]
    pub bachelors_or_higher: f64,
}

/// Parses the education dataset from raw JSON bytes.
pub fn parse_education(bytes: &[u8]) -> Result<Vec<EducationRecord>> {
    Ok(serde_json::from_slice(bytes)?)
}

fn finite_number<'de, D>(deserializer: D) -> std::result::Result<f64, D::Error>
where
    D: Deserializer<'de>,
{
    struct FiniteVisitor;

    impl Visitor<'_> for FiniteVisitor {
        type Value = f64;

        fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
            f.write_str("a finite number or a numeric string")
        }

        fn visit_f64<E: de::Error>(self, v: f64) -> std::result::Result<f64, E> {
            if v.is_finite() {
                Ok(v)
            } else {
                Err(E::invalid_value(Unexpected::Float(v), &self))
            }
        }

        fn visit_u64<E: de::Error>(self, v: u64) -> std::result::Result<f64, E> {
            Ok(v as f64)
        }

        fn visit_i64<E: de::Error>(self, v: i64) -> std::result::Result<f64, E> {
            Ok(v as f64)
        }

        fn visit_str<E: de::Error>(self, v: &str) -> std::result::Result<f64, E> {
            match v.trim().parse::<f64>() {
                Ok(parsed) if parsed.is_finite() => Ok(parsed),
                _ => Err(E::invalid_value(Unexpected::Str(v), &self)),
            }
        }
    }

    deserializer.deserialize_any(FiniteVisitor)
}

/// A county joined with its statistic. Immutable once joined; rendering and
/// interaction read values from here, never back out of emitted markup.
#[derive(Debug, Clone, Serialize)]
pub struct County {
    pub fips: FipsCode,
    pub state: String,
    pub name: String,
    #[serde(rename = "bachelorsOrHigher")]
    pub education: f64,
    #[serde(skip)]
    pub geometry: geo_types::Geometry<f64>,
}
