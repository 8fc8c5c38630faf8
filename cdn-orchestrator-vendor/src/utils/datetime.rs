//! Datetime serialization/deserialization helpers
//!
//! Custom Serde support for timestamps as vendors report them:
//! - Serialize: `DateTime<Utc>` -> RFC3339 string
//! - Deserialize: RFC3339 string or Unix timestamp -> `DateTime<Utc>`

use chrono::{DateTime, Utc};
use serde::{Deserialize, Deserializer, Serializer};

/// Serialize Option<`DateTime`<Utc>> as Option<RFC3339 string>
pub fn serialize<S>(dt: &Option<DateTime<Utc>>, serializer: S) -> Result<S::Ok, S::Error>
where
    S: Serializer,
{
    match dt {
        Some(dt) => serializer.serialize_some(&dt.to_rfc3339()),
        None => serializer.serialize_none(),
    }
}

/// Deserialize either an RFC3339 string or a Unix timestamp
/// (seconds/milliseconds detected automatically).
pub fn deserialize<'de, D>(deserializer: D) -> Result<Option<DateTime<Utc>>, D::Error>
where
    D: Deserializer<'de>,
{
    use serde::de::Error;

    #[derive(Deserialize)]
    #[serde(untagged)]
    enum OptionalTimestamp {
        String(String),
        I64(i64),
        U64(u64),
    }

    match Option::<OptionalTimestamp>::deserialize(deserializer)? {
        Some(OptionalTimestamp::String(s)) => DateTime::parse_from_rfc3339(&s)
            .map(|dt| Some(dt.with_timezone(&Utc)))
            .map_err(|e| Error::custom(format!("Invalid RFC3339 timestamp: {e}"))),
        Some(OptionalTimestamp::I64(ts)) => parse_unix_timestamp(ts)
            .map(Some)
            .ok_or_else(|| Error::custom("Invalid Unix timestamp")),
        Some(OptionalTimestamp::U64(ts)) => parse_unix_timestamp(ts as i64)
            .map(Some)
            .ok_or_else(|| Error::custom("Invalid Unix timestamp")),
        None => Ok(None),
    }
}

/// Parse a Unix timestamp, detecting seconds vs milliseconds.
fn parse_unix_timestamp(ts: i64) -> Option<DateTime<Utc>> {
    // Timestamps above 10^11 are taken as milliseconds
    if ts > 100_000_000_000 {
        DateTime::from_timestamp_millis(ts)
    } else {
        DateTime::from_timestamp(ts, 0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde::Serialize;

    #[derive(Serialize, Deserialize)]
    struct Wrapper {
        #[serde(with = "super", default)]
        ts: Option<DateTime<Utc>>,
    }

    #[test]
    fn rfc3339_roundtrip() {
        let w: Wrapper = serde_json::from_str(r#"{"ts":"2024-05-01T12:00:00Z"}"#).unwrap();
        let dt = w.ts.unwrap();
        assert_eq!(dt.timestamp(), 1_714_564_800);
        let json = serde_json::to_string(&w).unwrap();
        assert!(json.contains("2024-05-01T12:00:00"));
    }

    #[test]
    fn unix_seconds() {
        let w: Wrapper = serde_json::from_str(r#"{"ts":1714564800}"#).unwrap();
        assert_eq!(w.ts.unwrap().timestamp(), 1_714_564_800);
    }

    #[test]
    fn unix_milliseconds() {
        let w: Wrapper = serde_json::from_str(r#"{"ts":1714564800000}"#).unwrap();
        assert_eq!(w.ts.unwrap().timestamp(), 1_714_564_800);
    }

    #[test]
    fn null_is_none() {
        let w: Wrapper = serde_json::from_str(r#"{"ts":null}"#).unwrap();
        assert!(w.ts.is_none());
    }
}
