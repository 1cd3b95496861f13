//! Serde helpers for optional timestamps.
//!
//! An unset timestamp is written as `0001-01-01T00:00:00Z` instead of being
//! omitted or written as `null`, and that same instant reads back as unset.
//! Use with `#[serde(with = "timestamp", default)]` on an
//! `Option<DateTime<Utc>>` field.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// Wire value of an unset timestamp.
pub const ZERO_TIME: &str = "0001-01-01T00:00:00Z";

/// Seconds between `0001-01-01T00:00:00Z` and the Unix epoch.
const ZERO_TIME_UNIX_SECONDS: i64 = -62_135_596_800;

pub fn serialize<S>(value: &Option<DateTime<Utc>>, serializer: S) -> Result<S::Ok, S::Error>
where
    S: Serializer,
{
    match value {
        Some(time) => time.serialize(serializer),
        None => serializer.serialize_str(ZERO_TIME),
    }
}

pub fn deserialize<'de, D>(deserializer: D) -> Result<Option<DateTime<Utc>>, D::Error>
where
    D: Deserializer<'de>,
{
    let parsed = Option::<DateTime<Utc>>::deserialize(deserializer)?;
    Ok(parsed.filter(|time| !is_zero(time)))
}

/// Whether `time` is the zero instant used for "never set".
pub fn is_zero(time: &DateTime<Utc>) -> bool {
    time.timestamp() == ZERO_TIME_UNIX_SECONDS && time.timestamp_subsec_nanos() == 0
}
