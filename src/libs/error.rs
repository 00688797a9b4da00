//! Error types for loading and analysing order exports.
//!
//! Per-value time failures ([`TimeParseError`]) are recovered row by row and
//! never abort a run. Structural failures ([`AnalysisError`]) abort the whole
//! pass and are reported to the user by the command layer.

use crate::libs::schema::Notice;
use thiserror::Error;

/// Why a single time-like value could not be turned into minutes.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TimeParseError {
    /// The cell is empty or blank after trimming.
    #[error("value is empty")]
    Missing,

    /// The text does not split into two or three integer clock parts.
    #[error("unrecognized time format '{0}'")]
    BadFormat(String),

    /// Clock parts parsed but exceed 23 hours or 59 minutes/seconds.
    /// Only reported when strict clock validation is enabled.
    #[error("time component out of range in '{0}'")]
    OutOfRange(String),
}

/// Failures that abort an analysis run.
#[derive(Debug, Error)]
pub enum AnalysisError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("spreadsheet error: {0}")]
    Spreadsheet(#[from] calamine::Error),

    #[error("unsupported file format '{0}'")]
    UnsupportedFormat(String),

    #[error("file has no header row")]
    MissingHeader,

    #[error("no worksheet found")]
    NoWorksheet,

    /// Carries the detected headers, the configured duration synonyms and
    /// the mapping notices so the user sees why nothing could be used.
    #[error("no rows with a usable duration (detected columns: {})", columns.join(", "))]
    NoUsableRows {
        columns: Vec<String>,
        expected: Vec<String>,
        notices: Vec<Notice>,
    },
}
