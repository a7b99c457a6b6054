//! Snapshot and payment timestamps
//!
//! The store may send true instants (`2024-03-20T13:45:00.000Z`) or bare
//! wall-clock values (`2024-03-20`, `2024-03-20T10:45:00`), and some records
//! carry epoch milliseconds instead of a string. Instants are read in a
//! caller-supplied zone; wall-clock values are taken as written.

use chrono::{DateTime, FixedOffset, NaiveDate, NaiveDateTime, NaiveTime, Utc};
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

const WALL_CLOCK_FORMATS: [&str; 3] = [
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%d %H:%M:%S%.f",
    "%Y-%m-%dT%H:%M",
];

/// A timestamp string that matches none of the accepted layouts
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("invalid timestamp '{0}'")]
pub struct TimestampError(pub String);

/// Point in time attached to a record
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Timestamp {
    /// Carries an offset; converted to the calendar zone before use
    Instant(DateTime<Utc>),
    /// No offset; already a local calendar value
    WallClock(NaiveDateTime),
}

impl Timestamp {
    /// Parse an RFC 3339 instant, a naive date-time or a bare `YYYY-MM-DD` date
    ///
    /// # Errors
    /// Returns [`TimestampError`] when the string matches none of them
    pub fn parse(raw: &str) -> Result<Self, TimestampError> {
        let s = raw.trim();
        if let Ok(instant) = DateTime::parse_from_rfc3339(s) {
            return Ok(Self::Instant(instant.with_timezone(&Utc)));
        }
        for format in WALL_CLOCK_FORMATS {
            if let Ok(naive) = NaiveDateTime::parse_from_str(s, format) {
                return Ok(Self::WallClock(naive));
            }
        }
        NaiveDate::parse_from_str(s, "%Y-%m-%d")
            .map(|date| Self::WallClock(date.and_time(NaiveTime::MIN)))
            .map_err(|_| TimestampError(raw.to_string()))
    }

    /// Instant `millis` milliseconds after the Unix epoch
    ///
    /// # Errors
    /// Returns [`TimestampError`] when the value is outside chrono's range
    pub fn from_epoch_millis(millis: i64) -> Result<Self, TimestampError> {
        DateTime::from_timestamp_millis(millis)
            .map(Self::Instant)
            .ok_or_else(|| TimestampError(millis.to_string()))
    }

    /// Wall-clock date-time in `zone`
    #[must_use]
    pub fn in_zone(&self, zone: &FixedOffset) -> NaiveDateTime {
        match self {
            Self::Instant(instant) => instant.with_timezone(zone).naive_local(),
            Self::WallClock(naive) => *naive,
        }
    }

    /// Calendar date in `zone`
    #[must_use]
    pub fn date_in(&self, zone: &FixedOffset) -> NaiveDate {
        self.in_zone(zone).date()
    }
}

impl From<NaiveDate> for Timestamp {
    fn from(date: NaiveDate) -> Self {
        Self::WallClock(date.and_time(NaiveTime::MIN))
    }
}

impl From<DateTime<Utc>> for Timestamp {
    fn from(instant: DateTime<Utc>) -> Self {
        Self::Instant(instant)
    }
}

impl FromStr for Timestamp {
    type Err = TimestampError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl fmt::Display for Timestamp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Instant(instant) => write!(f, "{}", instant.to_rfc3339()),
            Self::WallClock(naive) => write!(f, "{}", naive.format("%Y-%m-%dT%H:%M:%S")),
        }
    }
}

impl Serialize for Timestamp {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for Timestamp {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        #[derive(Deserialize)]
        #[serde(untagged)]
        enum Raw {
            Millis(i64),
            Text(String),
        }

        match Raw::deserialize(deserializer)? {
            Raw::Millis(ms) => Self::from_epoch_millis(ms),
            Raw::Text(s) => Self::parse(&s),
        }
        .map_err(serde::de::Error::custom)
    }
}

/// Parse a UTC offset such as `-03:00`, `+0530`, `-3`, `Z` or `UTC`
///
/// # Errors
/// Returns a message naming the rejected value
pub fn parse_utc_offset(raw: &str) -> Result<FixedOffset, String> {
    let s = raw.trim();
    let invalid = || format!("Invalid UTC offset: '{raw}'");
    if s.is_empty() || s.eq_ignore_ascii_case("z") || s.eq_ignore_ascii_case("utc") {
        return FixedOffset::east_opt(0).ok_or_else(invalid);
    }

    let (sign, rest) = match s.as_bytes()[0] {
        b'+' => (1, &s[1..]),
        b'-' => (-1, &s[1..]),
        _ => (1, s),
    };
    let (hours, minutes) = match rest.split_once(':') {
        Some((h, m)) => (h, m),
        None if rest.len() == 4 && rest.is_char_boundary(2) => rest.split_at(2),
        None => (rest, "0"),
    };
    let hours: i32 = hours.parse().map_err(|_| invalid())?;
    let minutes: i32 = minutes.parse().map_err(|_| invalid())?;
    if !(0..=23).contains(&hours) || !(0..=59).contains(&minutes) {
        return Err(invalid());
    }
    FixedOffset::east_opt(sign * (hours * 3600 + minutes * 60)).ok_or_else(invalid)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn brt() -> FixedOffset {
        parse_utc_offset("-03:00").unwrap()
    }

    #[test]
    fn test_parse_instant_and_wall_clock() {
        assert!(matches!(
            Timestamp::parse("2024-03-20T13:45:00.000Z"),
            Ok(Timestamp::Instant(_))
        ));
        assert!(matches!(
            Timestamp::parse("2024-03-20T10:45:00"),
            Ok(Timestamp::WallClock(_))
        ));
        assert!(matches!(
            Timestamp::parse("2024-03-20"),
            Ok(Timestamp::WallClock(_))
        ));
        assert!(Timestamp::parse("20/03/2024").is_err());
    }

    #[test]
    fn test_instant_at_month_edge_moves_with_zone() {
        // 01:30 UTC on Feb 1st is still Jan 31st in UTC-3
        let ts = Timestamp::parse("2024-02-01T01:30:00Z").unwrap();
        assert_eq!(
            ts.date_in(&brt()),
            NaiveDate::from_ymd_opt(2024, 1, 31).unwrap()
        );
        assert_eq!(
            ts.date_in(&parse_utc_offset("Z").unwrap()),
            NaiveDate::from_ymd_opt(2024, 2, 1).unwrap()
        );
    }

    #[test]
    fn test_wall_clock_ignores_zone() {
        let ts = Timestamp::parse("2024-02-01").unwrap();
        assert_eq!(
            ts.date_in(&brt()),
            NaiveDate::from_ymd_opt(2024, 2, 1).unwrap()
        );
    }

    #[test]
    fn test_parse_utc_offset_variants() {
        assert_eq!(parse_utc_offset("-03:00").unwrap().local_minus_utc(), -3 * 3600);
        assert_eq!(parse_utc_offset("+0530").unwrap().local_minus_utc(), 5 * 3600 + 1800);
        assert_eq!(parse_utc_offset("-3").unwrap().local_minus_utc(), -3 * 3600);
        assert_eq!(parse_utc_offset("UTC").unwrap().local_minus_utc(), 0);
        assert!(parse_utc_offset("+25:00").is_err());
        assert!(parse_utc_offset("brt").is_err());
        assert!(parse_utc_offset("1é2").is_err());
        assert!(parse_utc_offset("-1é2").is_err());
    }

    #[test]
    fn test_serde_uses_string_form() {
        let ts: Timestamp = serde_json::from_str("\"2024-01-10\"").unwrap();
        assert_eq!(serde_json::to_string(&ts).unwrap(), "\"2024-01-10T00:00:00\"");
    }

    #[test]
    fn test_serde_accepts_epoch_millis() {
        let ts: Timestamp = serde_json::from_str("1710940800000").unwrap();
        assert_eq!(ts, Timestamp::parse("2024-03-20T13:20:00Z").unwrap());
        assert!(serde_json::from_str::<Timestamp>("true").is_err());
    }
}
