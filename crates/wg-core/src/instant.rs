//! Local wall-clock instants.
//!
//! All instants in this crate are `NaiveDateTime` values on the local clock.
//! Day boundaries are computed on that clock; no timezone conversion happens
//! beyond turning RFC 3339 input into local time.

use chrono::{DateTime, Duration, Local, NaiveDate, NaiveDateTime, NaiveTime};
use thiserror::Error;

/// Formats tried, in order, for offset-free date-times.
const DATETIME_FORMATS: &[&str] = &[
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%d %H:%M:%S%.f",
    "%Y-%m-%dT%H:%M",
    "%Y-%m-%d %H:%M",
];

/// Output format. `%.f` prints nothing when the fraction is zero.
const OUTPUT_FORMAT: &str = "%Y-%m-%dT%H:%M:%S%.f";

/// Errors from parsing an instant.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum InstantParseError {
    /// The input was empty or whitespace.
    #[error("instant cannot be empty")]
    Empty,

    /// The input matched none of the accepted formats.
    #[error("unrecognized instant: {0} (expected YYYY-MM-DD, YYYY-MM-DDTHH:MM[:SS] or RFC 3339)")]
    Unrecognized(String),
}

/// Parses a local instant.
///
/// Accepts RFC 3339 (converted to the local clock), offset-free date-times
/// with `T` or a space as separator, and bare dates (midnight).
pub fn parse_local_instant(s: &str) -> Result<NaiveDateTime, InstantParseError> {
    let s = s.trim();
    if s.is_empty() {
        return Err(InstantParseError::Empty);
    }

    if let Ok(dt) = DateTime::parse_from_rfc3339(s) {
        return Ok(dt.with_timezone(&Local).naive_local());
    }

    for format in DATETIME_FORMATS {
        if let Ok(dt) = NaiveDateTime::parse_from_str(s, format) {
            return Ok(dt);
        }
    }

    NaiveDate::parse_from_str(s, "%Y-%m-%d")
        .map(|date| date.and_time(NaiveTime::MIN))
        .map_err(|_| InstantParseError::Unrecognized(s.to_string()))
}

/// Formats a local instant the way [`parse_local_instant`] reads it back.
pub fn format_local_instant(instant: NaiveDateTime) -> String {
    instant.format(OUTPUT_FORMAT).to_string()
}

/// Midnight at the start of the instant's day.
pub fn start_of_day(instant: NaiveDateTime) -> NaiveDateTime {
    instant.date().and_time(NaiveTime::MIN)
}

/// The last millisecond of the instant's day (23:59:59.999).
pub fn end_of_day(instant: NaiveDateTime) -> NaiveDateTime {
    // Less than a day past midnight never changes the date, so this cannot overflow.
    start_of_day(instant) + (Duration::days(1) - Duration::milliseconds(1))
}

/// Serde adapter for required instant fields.
pub mod serde_local {
    use chrono::NaiveDateTime;
    use serde::{Deserialize, Deserializer, Serializer};

    pub fn serialize<S>(instant: &NaiveDateTime, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(&super::format_local_instant(*instant))
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<NaiveDateTime, D::Error>
    where
        D: Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        super::parse_local_instant(&s).map_err(serde::de::Error::custom)
    }
}

/// Serde adapter for optional instant fields.
pub mod serde_local_opt {
    use chrono::NaiveDateTime;
    use serde::{Deserialize, Deserializer, Serializer};

    #[allow(clippy::ref_option)]
    pub fn serialize<S>(instant: &Option<NaiveDateTime>, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        match instant {
            Some(instant) => serializer.serialize_some(&super::format_local_instant(*instant)),
            None => serializer.serialize_none(),
        }
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<Option<NaiveDateTime>, D::Error>
    where
        D: Deserializer<'de>,
    {
        Option::<String>::deserialize(deserializer)?
            .map(|s| super::parse_local_instant(&s).map_err(serde::de::Error::custom))
            .transpose()
    }
}
