use chrono::{DateTime, Local};

/// Format used in upload descriptions, e.g. `2024-05-01 14:03:59`.
pub const DESCRIPTION_TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

// Get current local timestamp as a formatted string
pub fn current_local_timestamp_str(format_str: &str) -> String {
    let now: DateTime<Local> = Local::now();
    now.format(format_str).to_string()
}

pub fn unix_timestamp_secs() -> i64 {
    Local::now().timestamp()
}

pub fn build_description(prefix: &str, timestamp: &str) -> String {
    format!("{} - {}", prefix, timestamp)
}
