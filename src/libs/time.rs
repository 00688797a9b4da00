//! Clock-value parsing into minutes since midnight.
//!
//! Order exports encode times in many ways: native spreadsheet date/time
//! cells, `HH:MM:SS`, `HH:MM`, timestamps with a date prefix
//! (`1900-01-01 14:00:00`) and decimal clock notation (`14.30`). Every one of
//! them is reduced to a single `f64` of minutes.
//!
//! ## Parsing Order
//!
//! 1. Empty or blank → [`TimeParseError::Missing`]
//! 2. Native date/time → `hour*60 + minute + second/60`
//! 3. Text → trim, keep the part after the last space, optionally map `.` to `:`
//! 4. Split on `:` → 3 parts `HH*60+MM+SS/60`, 2 parts `HH*60+MM`
//!
//! Clock components are not range checked unless `strict_clock` is set, so
//! `"99:99"` yields `6039` by default.

use crate::libs::error::TimeParseError;
use crate::libs::table::CellValue;
use serde::{Deserialize, Serialize};

/// Minutes in one day, added once when END is earlier than START.
pub const MINUTES_PER_DAY: f64 = 1440.0;

/// Tolerance switches for clock parsing.
#[derive(Serialize, Deserialize, Clone, Copy, Debug, PartialEq, Eq)]
pub struct ParseOptions {
    /// Read `.` as `:` so that `14.30` means 14:30.
    pub decimal_clock: bool,
    /// Reject hours >= 24 and minutes or seconds >= 60.
    pub strict_clock: bool,
}

impl Default for ParseOptions {
    fn default() -> Self {
        ParseOptions {
            decimal_clock: true,
            strict_clock: false,
        }
    }
}

/// Parses one cell into minutes since midnight.
///
/// # Examples
///
/// ```rust
/// use lpa::libs::table::CellValue;
/// use lpa::libs::time::{parse_clock, ParseOptions};
///
/// let value = CellValue::Text("1900-01-01 14:00:00".to_string());
/// assert_eq!(parse_clock(&value, &ParseOptions::default()), Ok(840.0));
/// ```
pub fn parse_clock(value: &CellValue, options: &ParseOptions) -> Result<f64, TimeParseError> {
    match value {
        CellValue::Empty => Err(TimeParseError::Missing),
        CellValue::DateTime(_) | CellValue::Time(_) => {
            let (hour, minute, second) = value.clock().ok_or(TimeParseError::Missing)?;
            Ok(f64::from(hour) * 60.0 + f64::from(minute) + f64::from(second) / 60.0)
        }
        CellValue::Text(text) => parse_clock_str(text, options),
        CellValue::Number(number) => parse_clock_str(&number.to_string(), options),
    }
}

/// Same as [`parse_clock`] but discards the failure reason.
pub fn parse_minutes(value: &CellValue, options: &ParseOptions) -> Option<f64> {
    parse_clock(value, options).ok()
}

/// Parses clock text such as `"14:30"`, `"08:15:30"` or `"2024-03-01 06:00:00"`.
pub fn parse_clock_str(raw: &str, options: &ParseOptions) -> Result<f64, TimeParseError> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Err(TimeParseError::Missing);
    }

    // Drop a date prefix: "1900-01-01 14:00:00" -> "14:00:00"
    let clock = trimmed.rsplit(' ').next().unwrap_or(trimmed);
    let clock = if options.decimal_clock {
        clock.replace('.', ":")
    } else {
        clock.to_string()
    };

    let parts = clock
        .split(':')
        .map(|part| part.trim().parse::<i64>())
        .collect::<Result<Vec<_>, _>>()
        .map_err(|_| TimeParseError::BadFormat(trimmed.to_string()))?;

    let (hours, minutes, seconds) = match parts.as_slice() {
        [h, m, s] => (*h, *m, *s),
        [h, m] => (*h, *m, 0),
        _ => return Err(TimeParseError::BadFormat(trimmed.to_string())),
    };

    if options.strict_clock {
        let in_range = (0..24).contains(&hours) && (0..60).contains(&minutes) && (0..60).contains(&seconds);
        if !in_range {
            return Err(TimeParseError::OutOfRange(trimmed.to_string()));
        }
    }

    Ok(hours as f64 * 60.0 + minutes as f64 + seconds as f64 / 60.0)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_number_cells_use_text_path() {
        let options = ParseOptions::default();
        assert_eq!(parse_clock(&CellValue::Number(14.3), &options), Ok(843.0));
        assert!(parse_clock(&CellValue::Number(5.0), &options).is_err());
    }

    #[test]
    fn test_decimal_clock_disabled() {
        let options = ParseOptions {
            decimal_clock: false,
            strict_clock: false,
        };
        assert!(parse_clock_str("14.30", &options).is_err());
    }
}
