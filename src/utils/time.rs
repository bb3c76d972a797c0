//! Timestamp parsing for PuppetDB documents
//!
//! PuppetDB emits RFC 3339 timestamps (`2013-08-01T09:57:00.000Z`). Older
//! exports and hand-written fixtures sometimes drop the offset or use a space
//! separator; those are read as UTC.

use chrono::{DateTime, NaiveDateTime, Utc};

use super::error::{TypesError, TypesResult};

/// Naive layouts accepted after RFC 3339 fails. `%.f` also matches no fraction.
const NAIVE_FORMATS: &[&str] = &["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%d %H:%M:%S%.f"];

/// Parse an ISO-8601-like timestamp into a UTC instant
pub fn json_to_datetime(value: &str) -> TypesResult<DateTime<Utc>> {
    parse_timestamp("timestamp", value)
}

/// Parse a timestamp, naming the field it came from on failure
pub(crate) fn parse_timestamp(field: &'static str, value: &str) -> TypesResult<DateTime<Utc>> {
    let trimmed = value.trim();

    if let Ok(dt) = DateTime::parse_from_rfc3339(trimmed) {
        return Ok(dt.with_timezone(&Utc));
    }

    NAIVE_FORMATS
        .iter()
        .find_map(|fmt| NaiveDateTime::parse_from_str(trimmed, fmt).ok())
        .map(|naive| naive.and_utc())
        .ok_or_else(|| TypesError::InvalidTimestamp {
            field,
            value: value.to_string(),
        })
}

/// Null passes through; present values must parse
pub(crate) fn parse_optional_timestamp(
    field: &'static str,
    value: Option<&str>,
) -> TypesResult<Option<DateTime<Utc>>> {
    value.map(|v| parse_timestamp(field, v)).transpose()
}
