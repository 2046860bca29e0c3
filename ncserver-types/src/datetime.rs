use crate::{Error, Result};
use chrono::DateTime;

/// Converts an RFC 3339 `date-and-time` value to seconds since the Unix epoch.
pub fn datetime_to_epoch(value: &str) -> Result<i64> {
    DateTime::parse_from_rfc3339(value)
        .map(|dt| dt.timestamp())
        .map_err(|e| Error::InvalidDateTime(format!("{value}: {e}")))
}
