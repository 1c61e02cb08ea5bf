//! Lenient ISO-8601 timestamp parsing.
//!
//! Requests carry timestamps as strings. A value that cannot be parsed never
//! fails the request; the caller-supplied fallback is used instead.

use chrono::{DateTime, NaiveDate, NaiveDateTime, Utc};
use tracing::warn;

const NAIVE_FORMATS: [&str; 3] = ["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%dT%H:%M:%S", "%Y-%m-%d %H:%M:%S"];

/// Parses an ISO-8601 timestamp. Values without an offset are taken as UTC.
pub fn parse_iso8601(raw: &str) -> Option<DateTime<Utc>> {
    let raw = raw.trim();
    if raw.is_empty() {
        return None;
    }

    if let Ok(value) = DateTime::parse_from_rfc3339(raw) {
        return Some(value.with_timezone(&Utc));
    }

    for format in NAIVE_FORMATS {
        if let Ok(value) = NaiveDateTime::parse_from_str(raw, format) {
            return Some(value.and_utc());
        }
    }

    NaiveDate::parse_from_str(raw, "%Y-%m-%d")
        .ok()
        .and_then(|date| date.and_hms_opt(0, 0, 0))
        .map(|value| value.and_utc())
}

/// Parses an optional timestamp, falling back when it is absent or invalid.
pub fn parse_or(raw: Option<&str>, fallback: DateTime<Utc>) -> DateTime<Utc> {
    match raw {
        None => fallback,
        Some(value) => parse_iso8601(value).unwrap_or_else(|| {
            warn!(value, "invalid timestamp, using fallback {}", fallback.to_rfc3339());
            fallback
        }),
    }
}
