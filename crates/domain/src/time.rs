//! Time and timestamp helpers.

use chrono::{DateTime, NaiveDateTime, Utc};

use crate::error::ValidationError;

/// UTC timestamp used for trigger bounds, run times and execution records.
pub type Timestamp = DateTime<Utc>;

/// Parse an ISO 8601 datetime.
///
/// Accepts RFC 3339 (with offset) and naive datetimes, which are taken as UTC.
///
/// # Errors
///
/// Returns [`ValidationError::InvalidTimestamp`] when neither form matches.
pub fn parse_timestamp(value: &str) -> Result<Timestamp, ValidationError> {
    if let Ok(ts) = DateTime::parse_from_rfc3339(value) {
        return Ok(ts.with_timezone(&Utc));
    }
    ["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%d %H:%M:%S%.f", "%Y-%m-%dT%H:%M"]
        .iter()
        .find_map(|fmt| NaiveDateTime::parse_from_str(value, fmt).ok())
        .map(|naive| naive.and_utc())
        .ok_or(ValidationError::InvalidTimestamp)
}

/// Serde adapter for [`Timestamp`] fields using [`parse_timestamp`].
pub mod iso8601 {
    use serde::{Deserialize, Deserializer, Serializer};

    use super::{Timestamp, parse_timestamp};

    pub fn serialize<S: Serializer>(ts: &Timestamp, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&ts.to_rfc3339())
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Timestamp, D::Error> {
        let raw = String::deserialize(deserializer)?;
        parse_timestamp(&raw).map_err(serde::de::Error::custom)
    }

    /// Same as the parent module, for `Option<Timestamp>` fields.
    pub mod option {
        use serde::{Deserialize, Deserializer, Serializer};

        use super::super::{Timestamp, parse_timestamp};

        pub fn serialize<S: Serializer>(
            ts: &Option<Timestamp>,
            serializer: S,
        ) -> Result<S::Ok, S::Error> {
            match ts {
                Some(ts) => serializer.serialize_str(&ts.to_rfc3339()),
                None => serializer.serialize_none(),
            }
        }

        pub fn deserialize<'de, D: Deserializer<'de>>(
            deserializer: D,
        ) -> Result<Option<Timestamp>, D::Error> {
            match Option::<String>::deserialize(deserializer)? {
                Some(raw) if !raw.is_empty() => parse_timestamp(&raw)
                    .map(Some)
                    .map_err(serde::de::Error::custom),
                _ => Ok(None),
            }
        }
    }
}
