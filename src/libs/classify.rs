//! Valid/invalid partitioning of orders.
//!
//! An order is **valid** when its duration is present and greater than zero.
//! Invalid orders still count towards the number of orders in the file but
//! are excluded from every average and total.

use crate::libs::duration::{DerivedDuration, DurationSource, InvalidReason};
use serde::Serialize;

/// One order with its derived duration and validity.
#[derive(Debug, Clone, PartialEq)]
pub struct ClassifiedRecord {
    pub row: usize,
    pub duration_min: Option<f64>,
    pub source: Option<DurationSource>,
    pub start_minutes: Option<f64>,
    pub invalid_reason: Option<InvalidReason>,
}

impl ClassifiedRecord {
    pub fn is_valid(&self) -> bool {
        self.duration_min.is_some_and(|minutes| minutes > 0.0)
    }
}

/// Every order of the table, plus the valid and invalid index sets.
#[derive(Debug, Clone, PartialEq)]
pub struct Classification {
    records: Vec<ClassifiedRecord>,
    valid: Vec<usize>,
    invalid: Vec<usize>,
}

/// Order counts surfaced in the headline.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct OrderCounts {
    pub total: usize,
    pub valid: usize,
    pub invalid: usize,
}

impl Classification {
    pub fn records(&self) -> &[ClassifiedRecord] {
        &self.records
    }

    pub fn valid(&self) -> impl Iterator<Item = &ClassifiedRecord> {
        self.valid.iter().map(move |&i| &self.records[i])
    }

    pub fn invalid(&self) -> impl Iterator<Item = &ClassifiedRecord> {
        self.invalid.iter().map(move |&i| &self.records[i])
    }

    pub fn counts(&self) -> OrderCounts {
        OrderCounts {
            total: self.records.len(),
            valid: self.valid.len(),
            invalid: self.invalid.len(),
        }
    }

    /// Valid orders whose duration came from START/END.
    pub fn from_start_end(&self) -> usize {
        self.valid().filter(|r| r.source == Some(DurationSource::StartEnd)).count()
    }
}

/// Splits derived durations into valid and invalid orders.
pub fn classify(derived: Vec<DerivedDuration>) -> Classification {
    let records: Vec<ClassifiedRecord> = derived
        .into_iter()
        .map(|d| match d.outcome {
            Ok(resolved) => {
                let invalid_reason = if resolved.minutes > 0.0 {
                    None
                } else if resolved.minutes == 0.0 && resolved.source == DurationSource::StartEnd {
                    Some(InvalidReason::ZeroLength)
                } else {
                    Some(InvalidReason::NonPositive(resolved.minutes))
                };
                ClassifiedRecord {
                    row: d.row,
                    duration_min: Some(resolved.minutes),
                    source: Some(resolved.source),
                    start_minutes: d.start_minutes,
                    invalid_reason,
                }
            }
            Err(reason) => ClassifiedRecord {
                row: d.row,
                duration_min: None,
                source: None,
                start_minutes: d.start_minutes,
                invalid_reason: Some(reason),
            },
        })
        .collect();

    let (valid, invalid): (Vec<usize>, Vec<usize>) = (0..records.len()).partition(|&i| records[i].is_valid());

    tracing::debug!(total = records.len(), valid = valid.len(), invalid = invalid.len(), "classified orders");

    Classification { records, valid, invalid }
}
