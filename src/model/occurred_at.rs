//! The calendar timestamp of a transaction.

use chrono::{DateTime, Local, NaiveDate, NaiveDateTime, NaiveTime};
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use std::fmt::{Display, Formatter};
use std::str::FromStr;

/// The format we write. Sub-second precision is kept when present.
const WRITE_FORMAT: &str = "%Y-%m-%dT%H:%M:%S%.f";

/// When a transaction happened, as a wall-clock date and time with no timezone attached.
///
/// It is used for ordering and for the day/month shown in summaries, never for timezone
/// arithmetic. Parsing accepts:
/// - `2024-01-20`, which becomes midnight
/// - `2024-01-20T14:30:00` with optional fractional seconds
/// - RFC 3339 text such as `2024-01-20T14:30:00.000Z`, keeping the wall-clock time in the given
///   offset
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct OccurredAt(NaiveDateTime);

impl OccurredAt {
    pub const fn new(value: NaiveDateTime) -> Self {
        Self(value)
    }

    /// The current local wall-clock time.
    pub fn now() -> Self {
        Self(Local::now().naive_local())
    }

    pub fn value(&self) -> NaiveDateTime {
        self.0
    }

    pub fn date(&self) -> NaiveDate {
        self.0.date()
    }
}

impl From<NaiveDateTime> for OccurredAt {
    fn from(value: NaiveDateTime) -> Self {
        Self(value)
    }
}

impl From<NaiveDate> for OccurredAt {
    fn from(value: NaiveDate) -> Self {
        Self(value.and_time(NaiveTime::MIN))
    }
}

impl FromStr for OccurredAt {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        if let Ok(dt) = DateTime::parse_from_rfc3339(s) {
            return Ok(Self(dt.naive_local()));
        }
        if let Ok(dt) = NaiveDateTime::from_str(s) {
            return Ok(Self(dt));
        }
        if let Ok(date) = NaiveDate::from_str(s) {
            return Ok(date.into());
        }
        Err(format!(
            "'{s}' is not a date (YYYY-MM-DD) or a date and time (YYYY-MM-DDTHH:MM:SS)"
        ))
    }
}

impl Display for OccurredAt {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0.format(WRITE_FORMAT))
    }
}

impl Serialize for OccurredAt {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for OccurredAt {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        OccurredAt::from_str(&s).map_err(serde::de::Error::custom)
    }
}
