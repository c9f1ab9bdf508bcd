//! Calendar-date parsing and wall-clock helpers.
//!
//! Availability is expressed in naive local terms: a calendar date plus a
//! wall-clock time of day. Nothing here applies a time zone.

use chrono::{DateTime, NaiveDate, NaiveDateTime, NaiveTime, Timelike};

use crate::errors::{ClinicError, ClinicResult};

pub const SECONDS_PER_DAY: u32 = 86_400;

/// Parses a query date as a calendar date.
///
/// Accepts `YYYY-MM-DD`. A full timestamp such as `2024-01-01T00:00:00.000Z`
/// is accepted too; the whole timestamp must be valid, and its leading date is
/// taken as written, without converting between zones.
pub fn parse_calendar_date(input: &str) -> ClinicResult<NaiveDate> {
    let trimmed = input.trim();
    let parsed = if trimmed.len() > 10 {
        parse_timestamp_date(trimmed)
    } else {
        NaiveDate::parse_from_str(trimmed, "%Y-%m-%d").ok()
    };

    parsed.ok_or_else(|| {
        ClinicError::Validation(format!("date must be YYYY-MM-DD, got {:?}", input))
    })
}

const TIMESTAMP_FORMATS: [&str; 4] = [
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%dT%H:%M",
    "%Y-%m-%d %H:%M:%S%.f",
    "%Y-%m-%d %H:%M",
];

fn parse_timestamp_date(input: &str) -> Option<NaiveDate> {
    // Offset timestamps keep the date in their own offset.
    if let Ok(timestamp) = DateTime::parse_from_rfc3339(input) {
        return Some(timestamp.date_naive());
    }

    TIMESTAMP_FORMATS
        .iter()
        .find_map(|format| NaiveDateTime::parse_from_str(input, format).ok())
        .map(|timestamp| timestamp.date())
}

/// Seconds elapsed since midnight for a wall-clock time.
pub fn seconds_of_day(time: NaiveTime) -> u32 {
    time.num_seconds_from_midnight()
}

/// Inverse of [`seconds_of_day`]; `None` at or past midnight of the next day.
pub fn time_from_seconds(seconds: u32) -> Option<NaiveTime> {
    if seconds >= SECONDS_PER_DAY {
        return None;
    }
    NaiveTime::from_num_seconds_from_midnight_opt(seconds, 0)
}

/// Serde adapter writing a `NaiveTime` as 24-hour `HH:MM`.
pub mod hhmm {
    use chrono::NaiveTime;
    use serde::{Deserialize, Deserializer, Serializer, de::Error};

    pub fn serialize<S>(time: &NaiveTime, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(&time.format("%H:%M").to_string())
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<NaiveTime, D::Error>
    where
        D: Deserializer<'de>,
    {
        let raw = String::deserialize(deserializer)?;
        NaiveTime::parse_from_str(&raw, "%H:%M")
            .or_else(|_| NaiveTime::parse_from_str(&raw, "%H:%M:%S"))
            .map_err(D::Error::custom)
    }
}
