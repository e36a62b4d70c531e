//! Slot timestamps.
//!
//! Calendar widgets report slots in several textual shapes; the store keeps a
//! single UTC instant and always renders it the way `Date.toISOString` does.

use std::fmt;

use chrono::{DateTime, NaiveDate, NaiveDateTime, SecondsFormat, SubsecRound, Utc};
use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::error::{DragCalError, DragCalResult};

/// A UTC instant with millisecond precision.
///
/// Anything finer is dropped on construction, so equality and ordering agree
/// with the wire form.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Timestamp(DateTime<Utc>);

impl Timestamp {
    pub fn from_utc(datetime: DateTime<Utc>) -> Self {
        Timestamp(datetime.trunc_subsecs(3))
    }

    /// Parse a slot date.
    ///
    /// - RFC 3339 with offset (`2024-05-01T12:00:00+02:00`), converted to UTC
    /// - naive date-time (`2024-05-01T10:00:00`, `2024-05-01 10:00`), taken as UTC
    /// - bare date (`2024-05-01`), midnight UTC
    pub fn parse(text: &str) -> DragCalResult<Self> {
        let s = text.trim();

        if let Ok(dt) = DateTime::parse_from_rfc3339(s) {
            return Ok(Timestamp::from_utc(dt.with_timezone(&Utc)));
        }

        for format in ["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%dT%H:%M", "%Y-%m-%d %H:%M:%S", "%Y-%m-%d %H:%M"] {
            if let Ok(naive) = NaiveDateTime::parse_from_str(s, format) {
                return Ok(Timestamp::from_utc(naive.and_utc()));
            }
        }

        if let Ok(date) = NaiveDate::parse_from_str(s, "%Y-%m-%d") {
            return Ok(Timestamp::from_utc(date.and_time(chrono::NaiveTime::MIN).and_utc()));
        }

        Err(DragCalError::InvalidPayload(format!(
            "Invalid date '{}'. Expected YYYY-MM-DD or an ISO 8601 date-time",
            text
        )))
    }

    pub fn as_utc(&self) -> DateTime<Utc> {
        self.0
    }

    /// `YYYY-MM-DDTHH:MM:SS.sssZ`
    pub fn to_iso_string(&self) -> String {
        self.0.to_rfc3339_opts(SecondsFormat::Millis, true)
    }
}

impl fmt::Display for Timestamp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_iso_string())
    }
}

impl From<DateTime<Utc>> for Timestamp {
    fn from(datetime: DateTime<Utc>) -> Self {
        Timestamp::from_utc(datetime)
    }
}

impl Serialize for Timestamp {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.to_iso_string())
    }
}

impl<'de> Deserialize<'de> for Timestamp {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let text = String::deserialize(deserializer)?;
        Timestamp::parse(&text).map_err(serde::de::Error::custom)
    }
}
