//! Time and timestamp utilities

use chrono::{DateTime, Utc};

/// ISO 8601 format used for every timestamp the server emits
pub const TIMESTAMP_FORMAT: &str = "%Y-%m-%dT%H:%M:%SZ";

/// Format a UTC instant with second precision, e.g. `2024-05-01T12:30:00Z`
pub fn format_utc(time: DateTime<Utc>) -> String {
    time.format(TIMESTAMP_FORMAT).to_string()
}

/// Get the current UTC time as an ISO 8601 string
pub fn current_utc_time() -> String {
    format_utc(Utc::now())
}
