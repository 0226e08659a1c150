//! Time and timestamp helpers.

use chrono::{DateTime, Utc};
use serde_json::Value;

/// UTC timestamp used for meter start dates and rejection records.
pub type Timestamp = DateTime<Utc>;

/// Return the current UTC time.
#[must_use]
pub fn now() -> Timestamp {
    Utc::now()
}

/// Coerce a wire timestamp.
///
/// Exactly two encodings are accepted:
/// - an RFC 3339 string (`2024-01-15T10:30:00Z`, `2024-01-15T10:30:00.5+01:00`),
/// - a JSON integer of milliseconds since the Unix epoch.
///
/// Every other value, including fractional numbers and free-form dates,
/// yields `None`.
#[must_use]
pub fn parse_timestamp(value: &Value) -> Option<Timestamp> {
    match value {
        Value::String(text) => DateTime::parse_from_rfc3339(text)
            .ok()
            .map(|parsed| parsed.with_timezone(&Utc)),
        Value::Number(number) => number.as_i64().and_then(DateTime::from_timestamp_millis),
        _ => None,
    }
}
