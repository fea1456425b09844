//! Date and string formatting shared by templates and reports
//!
//! Every function is total: missing or unparsable input yields an empty
//! string. Dates are rendered in French.

use chrono::{DateTime, FixedOffset, Locale, NaiveDate, NaiveDateTime};
use serde_json::Value;

const LOCALE: Locale = Locale::fr_FR;

/// Parses an API timestamp
///
/// Accepts RFC 3339, an offset without colon (`+0000`), epoch
/// milliseconds, a naive date-time (read as UTC) or a bare date (midnight
/// UTC). An explicit offset is kept as given.
pub fn parse_timestamp(input: &str) -> Option<DateTime<FixedOffset>> {
    let input = input.trim();
    if input.is_empty() {
        return None;
    }

    if let Ok(dt) = DateTime::parse_from_rfc3339(input) {
        return Some(dt);
    }

    if let Ok(dt) = DateTime::parse_from_str(input, "%Y-%m-%dT%H:%M:%S%.f%z") {
        return Some(dt);
    }

    if is_integer(input) {
        return input
            .parse::<i64>()
            .ok()
            .and_then(DateTime::from_timestamp_millis)
            .map(|dt| dt.fixed_offset());
    }

    for pattern in ["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%d %H:%M:%S%.f"] {
        if let Ok(naive) = NaiveDateTime::parse_from_str(input, pattern) {
            return Some(naive.and_utc().fixed_offset());
        }
    }

    NaiveDate::parse_from_str(input, "%Y-%m-%d")
        .ok()
        .and_then(|d| d.and_hms_opt(0, 0, 0))
        .map(|naive| naive.and_utc().fixed_offset())
}

fn is_integer(input: &str) -> bool {
    let digits = input.strip_prefix('-').unwrap_or(input);
    !digits.is_empty() && digits.bytes().all(|b| b.is_ascii_digit())
}

fn localized(input: &str, pattern: &str) -> String {
    parse_timestamp(input)
        .map(|dt| dt.format_localized(pattern, LOCALE).to_string())
        .unwrap_or_default()
}

/// `14 juillet`
pub fn date(input: &str) -> String {
    localized(input, "%-d %B")
}

/// `lu 14`: two-letter weekday and day of month
pub fn nameddate(input: &str) -> String {
    match parse_timestamp(input) {
        Some(dt) => {
            let weekday = dt.format_localized("%A", LOCALE).to_string();
            let short: String = weekday.chars().take(2).collect();
            format!("{short} {}", dt.format("%-d"))
        }
        None => String::new(),
    }
}

/// `lundi 14 juillet 2025`
pub fn fulldate(input: &str) -> String {
    localized(input, "%A %-d %B %Y")
}

/// `lundi 14 juillet 2025 09:30:00`
pub fn datetime(input: &str) -> String {
    localized(input, "%A %-d %B %Y %H:%M:%S")
}

/// `14/07`
pub fn shortdate(input: &str) -> String {
    localized(input, "%d/%m")
}

/// `2025-07-14`, used in the camps report
pub fn report_date(dt: Option<&DateTime<FixedOffset>>) -> String {
    dt.map(|dt| dt.format("%Y-%m-%d").to_string())
        .unwrap_or_default()
}

pub fn lower(input: &str) -> String {
    input.to_lowercase()
}

pub fn trim(input: &str) -> String {
    input.trim().to_string()
}

/// Loose equality between template values
///
/// Scalars of different types compare by their numeric value when both
/// convert, so `"3"` equals `3` and `true` equals `1`. `null` only equals
/// `null`.
pub fn loose_equals(left: &Value, right: &Value) -> bool {
    match (left, right) {
        (Value::Null, Value::Null) => true,
        (Value::Null, _) | (_, Value::Null) => false,
        (Value::String(a), Value::String(b)) => a == b,
        (Value::Array(_) | Value::Object(_), _) | (_, Value::Array(_) | Value::Object(_)) => {
            left == right
        }
        _ => match (as_number(left), as_number(right)) {
            (Some(a), Some(b)) => a == b,
            _ => false,
        },
    }
}

fn as_number(value: &Value) -> Option<f64> {
    match value {
        Value::Number(n) => n.as_f64(),
        Value::Bool(b) => Some(if *b { 1.0 } else { 0.0 }),
        Value::String(s) if s.trim().is_empty() => Some(0.0),
        Value::String(s) => s.trim().parse().ok(),
        _ => None,
    }
}

/// Membership test where a non-array haystack counts as a one-element list
pub fn contains(haystack: &Value, needle: &Value) -> bool {
    match haystack {
        Value::Array(items) => items.iter().any(|item| item == needle),
        other => other == needle,
    }
}

/// Text of a template argument; `null` and containers read as empty
pub fn value_text(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        Value::Number(n) => n.to_string(),
        Value::Bool(b) => b.to_string(),
        _ => String::new(),
    }
}
