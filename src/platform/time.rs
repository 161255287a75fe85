//! Wall-clock helpers

use chrono::{SecondsFormat, Utc};

/// Current UTC time as ISO-8601 with millisecond precision
/// (e.g. `2026-10-16T09:30:00.000Z`)
pub fn now_iso8601() -> String {
    Utc::now().to_rfc3339_opts(SecondsFormat::Millis, true)
}

/// Run seed derived from the clock
pub fn seed_from_clock() -> u64 {
    Utc::now().timestamp_millis() as u64
}
