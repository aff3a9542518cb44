//! Display formatting shared by the view controllers.

use chrono::{DateTime, NaiveDateTime, Utc};

const EXCERPT_LIMIT: usize = 160;

/// Human-friendly "how long ago" label for an API timestamp.
///
/// Unparseable or missing timestamps read as "just now" rather than
/// leaking a raw value into the UI.
pub fn relative_time(timestamp: Option<&str>) -> String {
    relative_time_at(timestamp, Utc::now())
}

/// [`relative_time`] against an explicit reference instant.
pub fn relative_time_at(timestamp: Option<&str>, now: DateTime<Utc>) -> String {
    let Some(parsed) = timestamp.and_then(parse_timestamp) else {
        return "just now".to_string();
    };

    let minutes = now.signed_duration_since(parsed).num_minutes();
    if minutes < 1 {
        return "just now".to_string();
    }
    if minutes < 60 {
        return format!("{minutes}m ago");
    }
    let hours = minutes / 60;
    if hours < 24 {
        return format!("{hours}h ago");
    }
    let days = hours / 24;
    if days < 7 {
        return format!("{days}d ago");
    }
    parsed.format("%Y-%m-%d").to_string()
}

/// Calendar-date label for an API timestamp; "unknown date" when absent
/// or unparseable.
pub fn format_date(timestamp: Option<&str>) -> String {
    match timestamp.and_then(parse_timestamp) {
        Some(parsed) => parsed.format("%Y-%m-%d").to_string(),
        None => "unknown date".to_string(),
    }
}

fn parse_timestamp(raw: &str) -> Option<DateTime<Utc>> {
    DateTime::parse_from_rfc3339(raw)
        .map(|parsed| parsed.with_timezone(&Utc))
        .ok()
        .or_else(|| {
            // The API also emits zone-less timestamps; read those as UTC.
            NaiveDateTime::parse_from_str(raw, "%Y-%m-%dT%H:%M:%S%.f")
                .ok()
                .map(|naive| naive.and_utc())
        })
}

/// One-line preview of a post body: whitespace collapsed, capped at 160
/// characters with an ellipsis.
pub fn excerpt(content: &str) -> String {
    let text = content.split_whitespace().collect::<Vec<_>>().join(" ");
    if text.is_empty() {
        return "No preview available.".to_string();
    }

    let chars: Vec<char> = text.chars().collect();
    if chars.len() > EXCERPT_LIMIT {
        let mut cut: String = chars[..EXCERPT_LIMIT - 3].iter().collect();
        cut.push('…');
        cut
    } else {
        text
    }
}

/// Thousands-separated counter label.
pub fn format_count(value: i64) -> String {
    let digits = value.unsigned_abs().to_string();
    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
    for (index, digit) in digits.chars().enumerate() {
        if index > 0 && (digits.len() - index) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(digit);
    }
    if value < 0 {
        format!("-{grouped}")
    } else {
        grouped
    }
}

/// Vote accuracy as a one-decimal percentage; zero votes is 0.0%, not a
/// division error.
pub fn accuracy_percent(correct: i64, total: i64) -> String {
    if total > 0 {
        format!("{:.1}%", correct as f64 / total as f64 * 100.0)
    } else {
        "0.0%".to_string()
    }
}
