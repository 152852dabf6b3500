//! Instant conversion helpers

use chrono::{DateTime, Utc};
use std::time::{SystemTime, UNIX_EPOCH};

/// Convert an instant to a UTC date-time, `None` when chrono cannot represent it
pub fn instant_to_utc(instant: SystemTime) -> Option<DateTime<Utc>> {
    match instant.duration_since(UNIX_EPOCH) {
        Ok(after) => {
            let secs = i64::try_from(after.as_secs()).ok()?;
            DateTime::from_timestamp(secs, after.subsec_nanos())
        }
        Err(before) => {
            let before = before.duration();
            let secs = i64::try_from(before.as_secs()).ok()?;
            match before.subsec_nanos() {
                0 => DateTime::from_timestamp(-secs, 0),
                nanos => DateTime::from_timestamp(-secs - 1, 1_000_000_000 - nanos),
            }
        }
    }
}

/// Serde adapter writing instants as RFC 3339 strings
pub mod rfc3339 {
    use super::instant_to_utc;
    use chrono::{DateTime, SecondsFormat, Utc};
    use serde::{de, ser, Deserialize, Deserializer, Serializer};
    use std::time::SystemTime;

    pub fn serialize<S: Serializer>(instant: &SystemTime, serializer: S) -> Result<S::Ok, S::Error> {
        let utc = instant_to_utc(*instant)
            .ok_or_else(|| <S::Error as ser::Error>::custom("instant out of range"))?;
        serializer.serialize_str(&utc.to_rfc3339_opts(SecondsFormat::AutoSi, true))
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<SystemTime, D::Error> {
        let raw = String::deserialize(deserializer)?;
        let parsed = DateTime::parse_from_rfc3339(&raw).map_err(de::Error::custom)?;
        Ok(SystemTime::from(parsed.with_timezone(&Utc)))
    }
}
