//! Serde adapter for record creation timestamps.
//!
//! The backend renders datetimes as HTTP dates
//! (`Wed, 15 Oct 2026 10:00:00 GMT`). RFC 3339 strings are accepted as well.
//! Serialization always produces the HTTP-date form.
//!
//! Use with `#[serde(with = "trendx_core::types::timestamp")]`.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Deserializer, Serializer};

const HTTP_DATE: &str = "%a, %d %b %Y %H:%M:%S GMT";

/// Parse a timestamp in HTTP-date (RFC 2822) or RFC 3339 form.
#[must_use]
pub fn parse(value: &str) -> Option<DateTime<Utc>> {
    DateTime::parse_from_rfc2822(value)
        .or_else(|_| DateTime::parse_from_rfc3339(value))
        .map(|dt| dt.with_timezone(&Utc))
        .ok()
}

/// Format a timestamp the way the backend does.
#[must_use]
pub fn format(value: &DateTime<Utc>) -> String {
    value.format(HTTP_DATE).to_string()
}

/// Serialize as an HTTP date.
///
/// # Errors
///
/// Propagates serializer errors.
pub fn serialize<S: Serializer>(value: &DateTime<Utc>, serializer: S) -> Result<S::Ok, S::Error> {
    serializer.serialize_str(&format(value))
}

/// Deserialize from an HTTP date or RFC 3339 string.
///
/// # Errors
///
/// Fails if the value is not a string in either accepted format.
pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<DateTime<Utc>, D::Error> {
    let raw = String::deserialize(deserializer)?;
    parse(&raw).ok_or_else(|| serde::de::Error::custom(format!("invalid timestamp: {raw}")))
}
