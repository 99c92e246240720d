//! Shared formatting utilities for size display and console output

use chrono::{DateTime, Local, Utc};
use console::Emoji;

/// Lock emoji for compile output
pub const LOCK: Emoji = Emoji("🔒", "#");

/// Link emoji for loader output
pub const LINK: Emoji = Emoji("🔗", "->");

/// Checkmark emoji for success
pub const CHECKMARK: Emoji = Emoji("✅", "[OK]");

/// Crossmark emoji for failure
pub const CROSSMARK: Emoji = Emoji("❌", "[FAIL]");

/// Sparkles emoji for completion/success
pub const SPARKLES: Emoji = Emoji("✨", "*");

/// Info emoji for informational messages
pub const INFO: Emoji = Emoji("ℹ️", "i");

/// Chart emoji for metrics/statistics
pub const CHART: Emoji = Emoji("📊", "~");

/// Microscope emoji for analysis/inspection
pub const MICROSCOPE: Emoji = Emoji("🔍", ">>");

/// Warning emoji for caution/alerts
pub const WARNING: Emoji = Emoji("⚠️", "!");

/// Format bytes as human-readable size string
///
/// # Examples
///
/// ```
/// use luacloak::fmt::format_bytes;
///
/// assert_eq!(format_bytes(512), "512 B");
/// assert_eq!(format_bytes(1024), "1.00 KB");
/// assert_eq!(format_bytes(1_048_576), "1.00 MB");
/// ```
pub fn format_bytes(bytes: u64) -> String {
    const KB: u64 = 1024;
    const MB: u64 = KB * 1024;

    if bytes >= MB {
        format!("{:.2} MB", bytes as f64 / MB as f64)
    } else if bytes >= KB {
        format!("{:.2} KB", bytes as f64 / KB as f64)
    } else {
        format!("{} B", bytes)
    }
}

/// Describe how long ago `then` was, relative to `now`
///
/// Under a minute reads "Just now"; up to a week is counted in minutes,
/// hours or days; older timestamps print as a local date.
///
/// # Examples
///
/// ```
/// use chrono::{Duration, Utc};
/// use luacloak::fmt::format_relative_time;
///
/// let now = Utc::now();
/// assert_eq!(format_relative_time(now - Duration::seconds(5), now), "Just now");
/// assert_eq!(format_relative_time(now - Duration::minutes(5), now), "5 min ago");
/// ```
pub fn format_relative_time(then: DateTime<Utc>, now: DateTime<Utc>) -> String {
    let elapsed = now.signed_duration_since(then);

    if elapsed.num_seconds() < 60 {
        "Just now".to_string()
    } else if elapsed.num_minutes() < 60 {
        format!("{} min ago", elapsed.num_minutes())
    } else if elapsed.num_hours() < 24 {
        format!("{} hours ago", elapsed.num_hours())
    } else if elapsed.num_days() < 7 {
        format!("{} days ago", elapsed.num_days())
    } else {
        then.with_timezone(&Local).format("%Y-%m-%d").to_string()
    }
}

/// First `max` characters of `text` on one line, with `...` when cut
pub fn preview(text: &str, max: usize) -> String {
    let flat: String = text
        .chars()
        .map(|c| if c.is_whitespace() { ' ' } else { c })
        .collect();
    let flat = flat.trim();

    if flat.chars().count() > max {
        let cut: String = flat.chars().take(max).collect();
        format!("{}...", cut.trim_end())
    } else {
        flat.to_string()
    }
}
