//! Field normalization shared by the staging stages
//!
//! Account, card and customer identifiers arrive formatted (`1234-5678`) and
//! are stored on the graph as plain integers. Datetimes arrive with an offset
//! and are stored as UTC epoch seconds.

use crate::error::{Error, Result};
use chrono::{DateTime, NaiveDateTime, TimeZone, Utc};

/// Datetime layouts accepted besides RFC 3339
const OFFSET_FORMATS: &[&str] = &[
    "%Y-%m-%d %H:%M:%S%:z",
    "%Y-%m-%d %H:%M:%S%.f%:z",
    "%Y-%m-%d %H:%M:%S%z",
    "%Y-%m-%dT%H:%M:%S%z",
    "%Y-%m-%dT%H:%M:%S%.f%z",
];

/// Layouts without an offset, read as UTC
const NAIVE_FORMATS: &[&str] = &[
    "%Y-%m-%d %H:%M:%S",
    "%Y-%m-%d %H:%M:%S%.f",
    "%Y-%m-%dT%H:%M:%S",
    "%Y-%m-%dT%H:%M:%S%.f",
];

/// Strip `-` separators and whitespace from an identifier and parse it as an integer
///
/// Idempotent: normalizing the decimal form of a normalized value yields the
/// same value.
pub fn normalize_identifier(field: &str, raw: &str) -> Result<i64> {
    let digits: String = raw
        .chars()
        .filter(|c| *c != '-' && !c.is_whitespace())
        .collect();

    if digits.is_empty() {
        return Err(Error::parse(field, raw, "identifier is empty"));
    }

    digits
        .parse::<i64>()
        .map_err(|e| Error::parse(field, raw, e.to_string()))
}

/// Merchant names become node labels, so spaces are replaced with underscores
pub fn normalize_merchant(raw: &str) -> String {
    raw.trim().replace(' ', "_")
}

/// Parse a datetime and convert it to UTC
///
/// Values without an offset are taken to be UTC already.
pub fn parse_datetime_utc(field: &str, raw: &str) -> Result<DateTime<Utc>> {
    let value = raw.trim();

    if let Ok(parsed) = DateTime::parse_from_rfc3339(value) {
        return Ok(parsed.with_timezone(&Utc));
    }

    for format in OFFSET_FORMATS {
        if let Ok(parsed) = DateTime::parse_from_str(value, format) {
            return Ok(parsed.with_timezone(&Utc));
        }
    }

    for format in NAIVE_FORMATS {
        if let Ok(naive) = NaiveDateTime::parse_from_str(value, format) {
            return Ok(Utc.from_utc_datetime(&naive));
        }
    }

    Err(Error::parse(field, raw, "unrecognized datetime format"))
}

/// Whole seconds since the Unix epoch
pub fn epoch_seconds(datetime: &DateTime<Utc>) -> i64 {
    datetime.timestamp()
}

/// Inverse of [`epoch_seconds`]
pub fn from_epoch_seconds(seconds: i64) -> Result<DateTime<Utc>> {
    DateTime::from_timestamp(seconds, 0).ok_or_else(|| {
        Error::parse(
            "epoch",
            seconds.to_string(),
            "timestamp is out of the representable range",
        )
    })
}
