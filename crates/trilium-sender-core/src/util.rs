//! Shared utility functions used across multiple modules.

use chrono::{DateTime, Local, TimeZone};

/// `SimpleDateFormat`-style `yyyy-MM-dd'T'HH:mm:ss.SSSZ`, e.g. `2026-10-19T14:03:07.512+0200`.
const LOCAL_DATE_FORMAT: &str = "%Y-%m-%dT%H:%M:%S%.3f%z";

/// Normalize optional text by trimming whitespace and removing empties.
///
/// Returns `None` when the input is `None` or the trimmed value is empty.
pub fn normalize_text_option(value: Option<String>) -> Option<String> {
    let value = value?;
    let value = value.trim();
    if value.is_empty() {
        None
    } else {
        Some(value.to_string())
    }
}

/// Check if a string starts with `http://` or `https://`.
pub fn is_http_url(value: &str) -> bool {
    value.starts_with("http://") || value.starts_with("https://")
}

/// Truncate text to at most 180 characters for log and error messages.
pub fn compact_text(value: &str) -> String {
    value.trim().chars().take(180).collect()
}

/// Value for the `X-Local-Date` header: local wall-clock time with offset.
pub fn local_date_header() -> String {
    format_local_date(&Local::now())
}

/// Formats a timestamp the way the server expects `X-Local-Date`.
pub fn format_local_date<Tz>(timestamp: &DateTime<Tz>) -> String
where
    Tz: TimeZone,
    Tz::Offset: std::fmt::Display,
{
    timestamp.format(LOCAL_DATE_FORMAT).to_string()
}
