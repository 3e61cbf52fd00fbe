//! Formatting of the remaining time.

use chrono::Duration;

use crate::models::settings::DurationStyle;

const SECS_PER_MINUTE: i64 = 60;
const SECS_PER_HOUR: i64 = 3600;
const SECS_PER_DAY: i64 = 86400;

/// Whole seconds left, rounded up so that any positive remainder shows as
/// at least one second. Zero or negative input yields 0.
pub fn whole_seconds_ceil(remaining: Duration) -> i64 {
    let millis = remaining.num_milliseconds();
    if millis <= 0 {
        0
    } else {
        (millis + 999) / 1000
    }
}

pub fn format_remaining(remaining: Duration, style: DurationStyle) -> String {
    let total_seconds = whole_seconds_ceil(remaining);
    match style {
        DurationStyle::Compact => format_compact(total_seconds),
        DurationStyle::Iso8601 => format_iso8601(total_seconds),
    }
}

/// "2d 3h 0m 1s", leading zero units dropped.
fn format_compact(total_seconds: i64) -> String {
    let days = total_seconds / SECS_PER_DAY;
    let hours = (total_seconds % SECS_PER_DAY) / SECS_PER_HOUR;
    let minutes = (total_seconds % SECS_PER_HOUR) / SECS_PER_MINUTE;
    let seconds = total_seconds % SECS_PER_MINUTE;

    if days > 0 {
        format!("{}d {}h {}m {}s", days, hours, minutes, seconds)
    } else if hours > 0 {
        format!("{}h {}m {}s", hours, minutes, seconds)
    } else if minutes > 0 {
        format!("{}m {}s", minutes, seconds)
    } else {
        format!("{}s", seconds)
    }
}

/// "PT26H3M", hours are not folded into days.
fn format_iso8601(total_seconds: i64) -> String {
    if total_seconds == 0 {
        return "PT0S".to_string();
    }

    let hours = total_seconds / SECS_PER_HOUR;
    let minutes = (total_seconds % SECS_PER_HOUR) / SECS_PER_MINUTE;
    let seconds = total_seconds % SECS_PER_MINUTE;

    let mut out = String::from("PT");
    if hours > 0 {
        out.push_str(&format!("{}H", hours));
    }
    if minutes > 0 {
        out.push_str(&format!("{}M", minutes));
    }
    if seconds > 0 {
        out.push_str(&format!("{}S", seconds));
    }
    out
}
