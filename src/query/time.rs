//! Query window bounds
//!
//! Requests carry `from`/`to` as ISO-8601 strings or epoch integers. They are
//! parsed here, at the boundary, so the assembler only ever sees typed values.

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, NaiveDate, NaiveDateTime, NaiveTime, TimeZone, Utc};
use serde::{de, Deserialize, Deserializer, Serialize, Serializer};

/// Epoch values above this are taken to be milliseconds
const EPOCH_MILLIS_THRESHOLD: u64 = 100_000_000_000;

/// Error returned when a time bound cannot be parsed
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InvalidTime(pub String);

impl fmt::Display for InvalidTime {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Invalid time '{}', expected ISO-8601 date/timestamp or epoch", self.0)
    }
}

impl std::error::Error for InvalidTime {}

/// One bound of the query window
///
/// A bare date keeps its calendar meaning: as a lower bound it is midnight,
/// as an upper bound it covers the whole day.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum QueryTime {
    Instant(DateTime<Utc>),
    Date(NaiveDate),
}

impl QueryTime {
    /// Interpret an epoch number (seconds, or milliseconds when large)
    pub fn from_epoch(value: i64) -> Result<Self, InvalidTime> {
        let instant = if value.unsigned_abs() > EPOCH_MILLIS_THRESHOLD {
            Utc.timestamp_millis_opt(value).single()
        } else {
            Utc.timestamp_opt(value, 0).single()
        };
        instant
            .map(QueryTime::Instant)
            .ok_or_else(|| InvalidTime(value.to_string()))
    }

    /// Value used when this is the inclusive lower bound
    pub fn start(&self) -> DateTime<Utc> {
        match self {
            QueryTime::Instant(t) => *t,
            QueryTime::Date(d) => Utc.from_utc_datetime(&d.and_time(NaiveTime::MIN)),
        }
    }

    /// Value used when this is the inclusive upper bound
    pub fn end(&self) -> DateTime<Utc> {
        match self {
            QueryTime::Instant(t) => *t,
            // Last millisecond of the day, without date arithmetic that can
            // overflow at the end of the calendar
            QueryTime::Date(d) => d
                .and_hms_milli_opt(23, 59, 59, 999)
                .map(|t| Utc.from_utc_datetime(&t))
                .unwrap_or_else(|| self.start()),
        }
    }
}

impl FromStr for QueryTime {
    type Err = InvalidTime;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        if let Ok(t) = DateTime::parse_from_rfc3339(s) {
            return Ok(QueryTime::Instant(t.with_timezone(&Utc)));
        }
        for format in ["%Y-%m-%d %H:%M:%S%.f", "%Y-%m-%dT%H:%M:%S%.f"] {
            if let Ok(t) = NaiveDateTime::parse_from_str(s, format) {
                return Ok(QueryTime::Instant(Utc.from_utc_datetime(&t)));
            }
        }
        if let Ok(d) = NaiveDate::parse_from_str(s, "%Y-%m-%d") {
            return Ok(QueryTime::Date(d));
        }
        if let Ok(epoch) = s.parse::<i64>() {
            return QueryTime::from_epoch(epoch);
        }
        Err(InvalidTime(s.to_string()))
    }
}

impl From<DateTime<Utc>> for QueryTime {
    fn from(t: DateTime<Utc>) -> Self {
        QueryTime::Instant(t)
    }
}

impl From<NaiveDate> for QueryTime {
    fn from(d: NaiveDate) -> Self {
        QueryTime::Date(d)
    }
}

impl<'de> Deserialize<'de> for QueryTime {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        #[derive(Deserialize)]
        #[serde(untagged)]
        enum Raw {
            Epoch(i64),
            Text(String),
        }

        match Raw::deserialize(deserializer)? {
            Raw::Epoch(n) => QueryTime::from_epoch(n).map_err(de::Error::custom),
            Raw::Text(s) => s.parse().map_err(de::Error::custom),
        }
    }
}

impl Serialize for QueryTime {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            QueryTime::Instant(t) => serializer.serialize_str(&t.to_rfc3339()),
            QueryTime::Date(d) => serializer.serialize_str(&d.format("%Y-%m-%d").to_string()),
        }
    }
}
