//! Per-order duration derivation.
//!
//! Each order gets its duration from exactly one authoritative source:
//!
//! 1. **Primary column**: a cleaned or process time column, when the parsed
//!    value is present and positive.
//! 2. **START/END**: otherwise, `END - START` with a single midnight rollover.
//!
//! ## Rollover
//!
//! ```text
//! START 22:00 (1320) → END 02:00 (120)
//! diff = 120 - 1320 = -1200 → -1200 + 1440 = 240 minutes
//! ```
//!
//! Spans longer than a day cannot be represented and come out short.

use crate::libs::error::TimeParseError;
use crate::libs::schema::{ColumnMapping, DurationColumnKind};
use crate::libs::table::{CellValue, RawTable};
use crate::libs::time::{parse_clock, parse_minutes, ParseOptions, MINUTES_PER_DAY};
use serde::{Deserialize, Serialize};
use std::fmt;

/// How to treat an order whose START equals its END.
#[derive(Serialize, Deserialize, Clone, Copy, Debug, Default, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum ZeroDurationPolicy {
    /// Keep 0 minutes; the order is classified invalid.
    #[default]
    Keep,
    /// Count the order as 1 minute so it stays in the statistics.
    OneMinute,
}

impl fmt::Display for ZeroDurationPolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ZeroDurationPolicy::Keep => write!(f, "keep (exclude as invalid)"),
            ZeroDurationPolicy::OneMinute => write!(f, "count as 1 minute"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum DurationSource {
    Primary,
    StartEnd,
}

/// A derived duration and where it came from.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Resolved {
    pub minutes: f64,
    pub source: DurationSource,
}

/// Why an order has no usable duration.
#[derive(Debug, Clone, PartialEq)]
pub enum InvalidReason {
    NoDurationSource,
    Primary(TimeParseError),
    Start(TimeParseError),
    End(TimeParseError),
    ZeroLength,
    NonPositive(f64),
}

impl fmt::Display for InvalidReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            InvalidReason::NoDurationSource => write!(f, "no duration column"),
            InvalidReason::Primary(err) => write!(f, "time column: {}", err),
            InvalidReason::Start(err) => write!(f, "START: {}", err),
            InvalidReason::End(err) => write!(f, "END: {}", err),
            InvalidReason::ZeroLength => write!(f, "START equals END"),
            InvalidReason::NonPositive(minutes) => write!(f, "non-positive duration {}", minutes),
        }
    }
}

/// Duration outcome of one table row.
#[derive(Debug, Clone, PartialEq)]
pub struct DerivedDuration {
    pub row: usize,
    pub outcome: Result<Resolved, InvalidReason>,
    /// START parsed as minutes since midnight, used for hour-of-day buckets.
    pub start_minutes: Option<f64>,
}

/// Minutes from `start` to `end`, rolling over midnight once.
///
/// A zero span follows `policy`.
pub fn span_minutes(start: f64, end: f64, policy: ZeroDurationPolicy) -> f64 {
    let mut diff = end - start;
    if diff < 0.0 {
        diff += MINUTES_PER_DAY;
    }
    if diff == 0.0 && policy == ZeroDurationPolicy::OneMinute {
        diff = 1.0;
    }
    diff
}

/// Resolves one order against its START/END cells.
///
/// A positive `primary` always wins. Otherwise both clock values must parse.
pub fn resolve(
    primary: Option<f64>,
    start: &CellValue,
    end: &CellValue,
    options: &ParseOptions,
    policy: ZeroDurationPolicy,
) -> Result<Resolved, InvalidReason> {
    if let Some(minutes) = primary.filter(|m| *m > 0.0) {
        return Ok(Resolved {
            minutes,
            source: DurationSource::Primary,
        });
    }

    let start = parse_clock(start, options).map_err(InvalidReason::Start)?;
    let end = parse_clock(end, options).map_err(InvalidReason::End)?;

    Ok(Resolved {
        minutes: span_minutes(start, end, policy),
        source: DurationSource::StartEnd,
    })
}

/// Exported `Duration_Min` cells hold plain minutes; every other duration
/// column holds clock values.
fn primary_minutes(cell: &CellValue, kind: DurationColumnKind, options: &ParseOptions) -> Result<f64, TimeParseError> {
    match kind {
        DurationColumnKind::Exported if cell.is_empty() => Err(TimeParseError::Missing),
        DurationColumnKind::Exported => cell
            .as_number()
            .ok_or_else(|| TimeParseError::BadFormat(cell.to_string())),
        DurationColumnKind::Cleaned | DurationColumnKind::Process => parse_clock(cell, options),
    }
}

/// Derives a duration for every row of the table.
///
/// The START/END fallback only runs when both columns exist; otherwise the
/// primary column value is taken as-is.
pub fn derive_durations(
    table: &RawTable,
    mapping: &ColumnMapping,
    options: &ParseOptions,
    policy: ZeroDurationPolicy,
) -> Vec<DerivedDuration> {
    (0..table.len())
        .map(|row| {
            let primary = mapping
                .duration
                .as_ref()
                .map(|column| primary_minutes(table.cell(row, column.index), column.kind, options));
            let start_minutes = mapping.start.and_then(|index| parse_minutes(table.cell(row, index), options));

            let outcome = match (mapping.start, mapping.end) {
                (Some(start), Some(end)) => resolve(
                    primary.as_ref().and_then(|p| p.as_ref().ok().copied()),
                    table.cell(row, start),
                    table.cell(row, end),
                    options,
                    policy,
                ),
                _ => match primary {
                    Some(Ok(minutes)) => Ok(Resolved {
                        minutes,
                        source: DurationSource::Primary,
                    }),
                    Some(Err(err)) => Err(InvalidReason::Primary(err)),
                    None => Err(InvalidReason::NoDurationSource),
                },
            };

            DerivedDuration {
                row,
                outcome,
                start_minutes,
            }
        })
        .collect()
}
