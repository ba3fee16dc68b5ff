//! Human-readable ages for gallery captions.

use chrono::{DateTime, Utc};

/// Convert a timestamp to a relative age string.
///
/// - "Just now" (less than 60 seconds ago)
/// - "5m ago"
/// - "2h ago"
/// - "3d ago"
pub fn relative_time(timestamp: DateTime<Utc>) -> String {
    relative_time_from(timestamp, Utc::now())
}

pub fn relative_time_from(timestamp: DateTime<Utc>, now: DateTime<Utc>) -> String {
    let diff = now.signed_duration_since(timestamp);

    if diff.num_seconds() < 60 {
        "Just now".to_string()
    } else if diff.num_minutes() < 60 {
        format!("{}m ago", diff.num_minutes())
    } else if diff.num_hours() < 24 {
        format!("{}h ago", diff.num_hours())
    } else {
        format!("{}d ago", diff.num_days())
    }
}
