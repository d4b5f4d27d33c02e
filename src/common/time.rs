use chrono::{DateTime, Utc};

/// Relative age label for a past timestamp (`2m ago`)
pub fn format_age(then: DateTime<Utc>, now: DateTime<Utc>) -> String {
    let seconds = (now - then).num_seconds().max(0);

    match seconds {
        0..=59 => "just now".to_string(),
        60..=3_599 => format!("{}m ago", seconds / 60),
        3_600..=86_399 => format!("{}h ago", seconds / 3_600),
        _ => format!("{}d ago", seconds / 86_400),
    }
}

/// Wall-clock label for the status bar
pub fn format_clock(at: DateTime<Utc>) -> String {
    at.format("%H:%M:%S UTC").to_string()
}
