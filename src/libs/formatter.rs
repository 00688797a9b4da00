//! Number and duration formatting for the dashboard and exports.
//!
//! ## Examples
//!
//! ```rust
//! use lpa::libs::formatter::{format_decimal, format_minutes};
//!
//! assert_eq!(format_minutes(90.0), "01:30");
//! assert_eq!(format_decimal(12345.678, 2), "12 345.68");
//! ```

use chrono::Duration;

/// Formats a duration as `HH:MM`; negative durations become `00:00`.
pub fn format_duration(duration: &Duration) -> String {
    let hours = duration.num_hours();
    let mins = duration.num_minutes() % 60;

    format!("{:02}:{:02}", hours.max(0), mins.max(0))
}

/// Formats fractional minutes as `HH:MM`, rounded to the nearest minute.
///
/// Values beyond the range of [`Duration`] are printed as `"<n> min"`.
pub fn format_minutes(minutes: f64) -> String {
    if !minutes.is_finite() {
        return format_duration(&Duration::zero());
    }
    match Duration::try_minutes(minutes.round() as i64) {
        Some(duration) => format_duration(&duration),
        None => format!("{} min", format_decimal(minutes, 0)),
    }
}

/// Fixed-point formatting with a space as thousands separator.
pub fn format_decimal(value: f64, places: usize) -> String {
    let text = format!("{:.*}", places, value.abs());
    let (integer, fraction) = match text.split_once('.') {
        Some((integer, fraction)) => (integer, Some(fraction)),
        None => (text.as_str(), None),
    };

    let mut grouped = String::with_capacity(integer.len() + integer.len() / 3);
    for (i, digit) in integer.chars().enumerate() {
        if i > 0 && (integer.len() - i) % 3 == 0 {
            grouped.push(' ');
        }
        grouped.push(digit);
    }

    let sign = if value < 0.0 && text.chars().any(|c| c.is_ascii_digit() && c != '0') {
        "-"
    } else {
        ""
    };
    match fraction {
        Some(fraction) => format!("{}{}.{}", sign, grouped, fraction),
        None => format!("{}{}", sign, grouped),
    }
}

/// Integer count with thousands separators.
pub fn format_count(count: usize) -> String {
    format_decimal(count as f64, 0)
}

/// Share of `part` in `total` as `"12.5 %"`; `"0.0 %"` when `total` is 0.
pub fn format_percent(part: usize, total: usize) -> String {
    if total == 0 {
        return "0.0 %".to_string();
    }
    format!("{:.1} %", part as f64 * 100.0 / total as f64)
}
