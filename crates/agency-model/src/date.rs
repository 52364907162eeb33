//! Date and timestamp parsing
//!
//! Two flavours:
//! - strict parsing returns [`ModelError::InvalidDate`] and is used when a
//!   record is created through a store
//! - lenient parsing falls back to `None` and is used for optional display
//!   dates in seeded data, so one bad literal does not reject a whole record

use crate::error::{ModelError, ModelResult};
use chrono::{DateTime, NaiveDate, NaiveDateTime, NaiveTime, Utc};
use serde::{Deserialize, Deserializer};

const DATE_FORMAT: &str = "%Y-%m-%d";
const DATE_EXPECTED: &str = "yyyy-MM-dd or an RFC 3339 timestamp";
const TIMESTAMP_EXPECTED: &str = "RFC 3339, yyyy-MM-ddTHH:mm:ss or yyyy-MM-dd hh:mm AM";

/// Parse a calendar date
///
/// Accepts `yyyy-MM-dd` or a full RFC 3339 timestamp, in which case the date
/// as written (in the timestamp's own offset) is taken.
///
/// # Errors
/// Returns [`ModelError::InvalidDate`] when neither form matches.
pub fn parse_date(input: &str) -> ModelResult<NaiveDate> {
    let trimmed = input.trim();
    if let Ok(date) = NaiveDate::parse_from_str(trimmed, DATE_FORMAT) {
        return Ok(date);
    }
    DateTime::parse_from_rfc3339(trimmed)
        .map(|dt| dt.date_naive())
        .map_err(|_| ModelError::InvalidDate {
            input: input.to_string(),
            expected: DATE_EXPECTED,
        })
}

/// Parse a calendar date, falling back to `None` on malformed input
#[must_use]
pub fn parse_date_lenient(input: &str) -> Option<NaiveDate> {
    match parse_date(input) {
        Ok(date) => Some(date),
        Err(err) => {
            tracing::warn!("Ignoring unparseable date: {}", err);
            None
        }
    }
}

/// Parse a point in time
///
/// Accepts RFC 3339, a bare `yyyy-MM-ddTHH:mm:ss` (read as UTC) and the
/// `yyyy-MM-dd hh:mm AM` form used in activity logs.
///
/// # Errors
/// Returns [`ModelError::InvalidDate`] when no form matches.
pub fn parse_timestamp(input: &str) -> ModelResult<DateTime<Utc>> {
    let trimmed = input.trim();
    if let Ok(dt) = DateTime::parse_from_rfc3339(trimmed) {
        return Ok(dt.with_timezone(&Utc));
    }
    for format in ["%Y-%m-%dT%H:%M:%S", "%Y-%m-%dT%H:%M", "%Y-%m-%d %I:%M %p"] {
        if let Ok(naive) = NaiveDateTime::parse_from_str(trimmed, format) {
            return Ok(naive.and_utc());
        }
    }
    if let Ok(date) = NaiveDate::parse_from_str(trimmed, DATE_FORMAT) {
        return Ok(date.and_time(NaiveTime::MIN).and_utc());
    }
    Err(ModelError::InvalidDate {
        input: input.to_string(),
        expected: TIMESTAMP_EXPECTED,
    })
}

/// Serde adapter: optional date that degrades to `None` on bad input
pub mod lenient_date {
    use super::{parse_date_lenient, Deserialize, Deserializer, NaiveDate};
    use serde::Serializer;

    /// Deserialize an optional date leniently
    ///
    /// # Errors
    /// Only fails when the JSON value is neither null nor a string.
    pub fn deserialize<'de, D>(deserializer: D) -> Result<Option<NaiveDate>, D::Error>
    where
        D: Deserializer<'de>,
    {
        let raw: Option<String> = Option::deserialize(deserializer)?;
        Ok(raw.as_deref().and_then(parse_date_lenient))
    }

    /// Serialize as `yyyy-MM-dd` or null
    ///
    /// # Errors
    /// Propagates serializer errors.
    #[allow(clippy::ref_option)]
    pub fn serialize<S>(value: &Option<NaiveDate>, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        match value {
            Some(date) => serializer.serialize_some(&date.format(super::DATE_FORMAT).to_string()),
            None => serializer.serialize_none(),
        }
    }
}

/// Serde adapter: required date, strict
pub mod strict_date {
    use super::{parse_date, Deserialize, Deserializer, NaiveDate};
    use serde::Serializer;

    /// Deserialize a date strictly
    ///
    /// # Errors
    /// Fails on anything [`parse_date`] rejects.
    pub fn deserialize<'de, D>(deserializer: D) -> Result<NaiveDate, D::Error>
    where
        D: Deserializer<'de>,
    {
        let raw = String::deserialize(deserializer)?;
        parse_date(&raw).map_err(serde::de::Error::custom)
    }

    /// Serialize as `yyyy-MM-dd`
    ///
    /// # Errors
    /// Propagates serializer errors.
    pub fn serialize<S>(value: &NaiveDate, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(&value.format(super::DATE_FORMAT).to_string())
    }
}

/// Serde adapter: timestamp accepting every form [`parse_timestamp`] does
pub mod flexible_timestamp {
    use super::{parse_timestamp, DateTime, Deserialize, Deserializer, Utc};
    use serde::Serializer;

    /// Deserialize a timestamp
    ///
    /// # Errors
    /// Fails on anything [`parse_timestamp`] rejects.
    pub fn deserialize<'de, D>(deserializer: D) -> Result<DateTime<Utc>, D::Error>
    where
        D: Deserializer<'de>,
    {
        let raw = String::deserialize(deserializer)?;
        parse_timestamp(&raw).map_err(serde::de::Error::custom)
    }

    /// Serialize as RFC 3339
    ///
    /// # Errors
    /// Propagates serializer errors.
    pub fn serialize<S>(value: &DateTime<Utc>, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(&value.to_rfc3339())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Datelike, Timelike};

    #[test]
    fn parses_plain_and_rfc3339_dates() {
        let plain = parse_date("2025-04-25").unwrap();
        let stamped = parse_date("2025-04-25T23:30:00-05:00").unwrap();
        assert_eq!(plain, stamped);
    }

    #[test]
    fn rejects_garbage_strictly() {
        let err = parse_date("next tuesday").unwrap_err();
        assert!(matches!(err, ModelError::InvalidDate { .. }));
    }

    #[test]
    fn lenient_falls_back_to_none() {
        assert_eq!(parse_date_lenient("Invalid Date"), None);
        assert!(parse_date_lenient("2025-01-10").is_some());
    }

    #[test]
    fn parses_activity_log_timestamps() {
        let ts = parse_timestamp("2025-04-20 10:30 PM").unwrap();
        assert_eq!(ts.day(), 20);
        assert_eq!(ts.hour(), 22);
        assert_eq!(ts.minute(), 30);
    }

    #[test]
    fn parses_rfc3339_timestamps_to_utc() {
        let ts = parse_timestamp("2025-04-21T10:05:00+02:00").unwrap();
        assert_eq!(ts.hour(), 8);
    }
}
