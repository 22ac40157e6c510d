//! Duration formatting helpers.

/// Compact form used for stream durations: `"11d 13h 46m"`, `"< 1m"` under a minute.
pub fn format_duration_compact(secs: u64) -> String {
    let days = secs / 86_400;
    let hours = (secs % 86_400) / 3_600;
    let minutes = (secs % 3_600) / 60;

    let mut parts = Vec::new();
    if days > 0 {
        parts.push(format!("{days}d"));
    }
    if hours > 0 {
        parts.push(format!("{hours}h"));
    }
    if minutes > 0 {
        parts.push(format!("{minutes}m"));
    }
    if parts.is_empty() {
        "< 1m".to_string()
    } else {
        parts.join(" ")
    }
}

/// Long form used for vesting cliffs and periods: `"1 day"`, `"30 days"`,
/// `"2 hours 5 minutes"`. Under a minute it falls back to `"<n> seconds"`.
pub fn format_duration_long(secs: u64) -> String {
    fn unit(n: u64, name: &str) -> String {
        if n == 1 {
            format!("{n} {name}")
        } else {
            format!("{n} {name}s")
        }
    }

    let days = secs / 86_400;
    let hours = (secs % 86_400) / 3_600;
    let minutes = (secs % 3_600) / 60;

    let mut parts = Vec::new();
    if days > 0 {
        parts.push(unit(days, "day"));
    }
    if hours > 0 {
        parts.push(unit(hours, "hour"));
    }
    if minutes > 0 {
        parts.push(unit(minutes, "minute"));
    }
    if parts.is_empty() {
        format!("{secs} seconds")
    } else {
        parts.join(" ")
    }
}
