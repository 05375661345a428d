use crate::logging::types::Severity;
use chrono::{DateTime, TimeZone};
use std::fmt::Display;

/// Timestamp layout: `2024-Mar-05 14:03:07.123456+01:00`.
pub const TIMESTAMP_FORMAT: &str = "%Y-%b-%d %H:%M:%S%.6f%:z";

/// Render one log line, including the trailing newline. Line breaks and tabs
/// in the message become spaces and other control characters are dropped, so
/// one call always yields exactly one line.
pub fn format_line<Tz>(now: &DateTime<Tz>, level: Severity, message: &str) -> String
where
    Tz: TimeZone,
    Tz::Offset: Display,
{
    format!(
        "{} {}{}\n",
        now.format(TIMESTAMP_FORMAT),
        level.label(),
        single_line(message)
    )
}

fn single_line(message: &str) -> String {
    message
        .replace(['\n', '\r', '\t'], " ")
        .chars()
        .filter(|c| !c.is_control())
        .collect()
}
