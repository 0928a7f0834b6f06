//! Parsing and serde helpers for calendar dates and wall-clock times.
//!
//! The API exchanges dates as `YYYY-MM-DD` and times as `HH:MM:SS`.

use time::format_description::BorrowedFormatItem;
use time::macros::format_description;
use time::{Date, Time};

use crate::error::AppError;
use crate::errors::ErrorCode;

pub const DATE_FORMAT: &[BorrowedFormatItem<'static>] =
    format_description!("[year]-[month]-[day]");
pub const TIME_FORMAT: &[BorrowedFormatItem<'static>] =
    format_description!("[hour]:[minute]:[second]");

pub fn parse_date(raw: &str) -> Result<Date, AppError> {
    Date::parse(raw, &DATE_FORMAT).map_err(|_| {
        AppError::bad_request(
            ErrorCode::InvalidDate,
            format!("invalid date '{raw}', expected YYYY-MM-DD"),
        )
    })
}

pub fn parse_time(raw: &str) -> Result<Time, AppError> {
    Time::parse(raw, &TIME_FORMAT).map_err(|_| {
        AppError::bad_request(
            ErrorCode::InvalidTime,
            format!("invalid time '{raw}', expected HH:MM:SS"),
        )
    })
}

/// Serde adapter for `Date` fields: `"2026-08-07"`.
pub mod serde_date {
    use serde::{Deserialize, Deserializer, Serializer};
    use time::Date;

    use super::DATE_FORMAT;

    pub fn serialize<S: Serializer>(date: &Date, serializer: S) -> Result<S::Ok, S::Error> {
        let formatted = date.format(&DATE_FORMAT).map_err(serde::ser::Error::custom)?;
        serializer.serialize_str(&formatted)
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Date, D::Error> {
        let raw = String::deserialize(deserializer)?;
        Date::parse(&raw, &DATE_FORMAT).map_err(serde::de::Error::custom)
    }
}

/// Serde adapter for `Time` fields: `"14:30:00"`.
pub mod serde_time {
    use serde::{Deserialize, Deserializer, Serializer};
    use time::Time;

    use super::TIME_FORMAT;

    pub fn serialize<S: Serializer>(time: &Time, serializer: S) -> Result<S::Ok, S::Error> {
        let formatted = time.format(&TIME_FORMAT).map_err(serde::ser::Error::custom)?;
        serializer.serialize_str(&formatted)
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Time, D::Error> {
        let raw = String::deserialize(deserializer)?;
        Time::parse(&raw, &TIME_FORMAT).map_err(serde::de::Error::custom)
    }
}

#[cfg(test)]
mod tests {
    use time::macros::{date, time};

    use super::{parse_date, parse_time};

    #[test]
    fn parses_iso_date() {
        assert_eq!(parse_date("2026-08-07").unwrap(), date!(2026 - 08 - 07));
    }

    #[test]
    fn rejects_garbage_date() {
        assert!(parse_date("07/08/2026").is_err());
        assert!(parse_date("2026-13-01").is_err());
        assert!(parse_date("").is_err());
    }

    #[test]
    fn parses_wall_clock_time() {
        assert_eq!(parse_time("14:30:00").unwrap(), time!(14:30:00));
    }

    #[test]
    fn rejects_garbage_time() {
        assert!(parse_time("2pm").is_err());
        assert!(parse_time("25:00:00").is_err());
    }
}
