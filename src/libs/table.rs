//! In-memory representation of an uploaded order table.
//!
//! A [`RawTable`] is the open-ended, column-name → value view of a CSV or
//! spreadsheet export. Nothing here interprets the values; the loader only
//! decides which cells are empty, textual, numeric or native date/time.
//!
//! ## Supported Inputs
//!
//! - **CSV**: UTF-8 (with or without BOM), falling back to Windows-1250 for
//!   Central-European Excel exports. The delimiter is `;` when the header line
//!   contains more semicolons than commas, otherwise `,`.
//! - **Spreadsheets**: `.xlsx`, `.xlsm`, `.xls`; only the first worksheet is read.

use crate::libs::error::AnalysisError;
use crate::libs::messages::Message;
use crate::msg_debug;
use calamine::{open_workbook_auto, Data, DataType, Reader};
use chrono::{NaiveDate, NaiveDateTime, NaiveTime, Timelike};
use std::fmt;
use std::fs;
use std::path::Path;

/// One raw cell value.
#[derive(Debug, Clone, PartialEq)]
pub enum CellValue {
    Empty,
    Text(String),
    Number(f64),
    DateTime(NaiveDateTime),
    Time(NaiveTime),
}

impl CellValue {
    /// Builds a cell from CSV text; blank text becomes [`CellValue::Empty`].
    pub fn from_text(text: &str) -> Self {
        if text.trim().is_empty() {
            CellValue::Empty
        } else {
            CellValue::Text(text.to_string())
        }
    }

    pub fn is_empty(&self) -> bool {
        match self {
            CellValue::Empty => true,
            CellValue::Text(text) => text.trim().is_empty(),
            _ => false,
        }
    }

    /// Numeric view of the cell, used for piece and packaging counts.
    ///
    /// Text is accepted after removing inner spaces and reading a decimal
    /// comma as a point (`"1 200"`, `"3,5"`). Anything else is `None`.
    pub fn as_number(&self) -> Option<f64> {
        match self {
            CellValue::Number(value) if value.is_finite() => Some(*value),
            CellValue::Text(text) => {
                let cleaned: String = text.trim().chars().filter(|c| !c.is_whitespace()).collect();
                cleaned.replace(',', ".").parse::<f64>().ok().filter(|v| v.is_finite())
            }
            _ => None,
        }
    }

    /// Hour, minute and second of native date/time cells.
    pub fn clock(&self) -> Option<(u32, u32, u32)> {
        match self {
            CellValue::DateTime(dt) => Some((dt.hour(), dt.minute(), dt.second())),
            CellValue::Time(t) => Some((t.hour(), t.minute(), t.second())),
            _ => None,
        }
    }
}

impl fmt::Display for CellValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CellValue::Empty => Ok(()),
            CellValue::Text(text) => write!(f, "{}", text),
            CellValue::Number(value) => write!(f, "{}", value),
            CellValue::DateTime(dt) => write!(f, "{}", dt.format("%Y-%m-%d %H:%M:%S")),
            CellValue::Time(t) => write!(f, "{}", t.format("%H:%M:%S")),
        }
    }
}

/// Column names plus rows of cells, every row padded to the header width.
#[derive(Debug, Clone, PartialEq)]
pub struct RawTable {
    columns: Vec<String>,
    rows: Vec<Vec<CellValue>>,
}

impl RawTable {
    /// Creates a table, trimming column names and padding or truncating rows.
    pub fn new(columns: Vec<String>, rows: Vec<Vec<CellValue>>) -> Self {
        let columns: Vec<String> = columns.into_iter().map(|c| c.trim().to_string()).collect();
        let width = columns.len();
        let rows = rows
            .into_iter()
            .map(|mut row| {
                row.resize(width, CellValue::Empty);
                row
            })
            .collect();
        Self { columns, rows }
    }

    /// Loads a CSV or spreadsheet file, dispatching on the file extension.
    pub fn load(path: &Path) -> Result<Self, AnalysisError> {
        let extension = path
            .extension()
            .map(|ext| ext.to_string_lossy().to_lowercase())
            .unwrap_or_default();

        match extension.as_str() {
            "csv" | "txt" => Self::from_csv_bytes(&fs::read(path)?),
            "xlsx" | "xlsm" | "xls" => Self::from_spreadsheet(path),
            other => Err(AnalysisError::UnsupportedFormat(other.to_string())),
        }
    }

    /// Parses CSV content, detecting encoding and delimiter.
    pub fn from_csv_bytes(bytes: &[u8]) -> Result<Self, AnalysisError> {
        let text = decode_csv(bytes);
        let text = text.strip_prefix('\u{feff}').unwrap_or(&text);

        let header_line = text.lines().next().unwrap_or_default();
        let delimiter = sniff_delimiter(header_line);

        let mut reader = csv::ReaderBuilder::new()
            .delimiter(delimiter)
            .flexible(true)
            .has_headers(true)
            .from_reader(text.as_bytes());

        let columns: Vec<String> = reader.headers()?.iter().map(|h| h.to_string()).collect();
        if columns.iter().all(|c| c.trim().is_empty()) {
            return Err(AnalysisError::MissingHeader);
        }

        let mut rows = Vec::new();
        for record in reader.records() {
            let record = record?;
            rows.push(record.iter().map(CellValue::from_text).collect());
        }

        Ok(Self::new(columns, rows))
    }

    fn from_spreadsheet(path: &Path) -> Result<Self, AnalysisError> {
        let mut workbook = open_workbook_auto(path)?;
        let range = workbook.worksheet_range_at(0).ok_or(AnalysisError::NoWorksheet)??;

        let mut rows = range.rows();
        let columns: Vec<String> = match rows.next() {
            Some(header) => header.iter().map(|cell| spreadsheet_cell(cell).to_string()).collect(),
            None => return Err(AnalysisError::MissingHeader),
        };

        let rows = rows
            .map(|row| row.iter().map(spreadsheet_cell).collect::<Vec<_>>())
            .filter(|row: &Vec<CellValue>| !row.iter().all(CellValue::is_empty))
            .collect();

        Ok(Self::new(columns, rows))
    }

    pub fn columns(&self) -> &[String] {
        &self.columns
    }

    pub fn rows(&self) -> &[Vec<CellValue>] {
        &self.rows
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn column_name(&self, index: usize) -> Option<&str> {
        self.columns.get(index).map(String::as_str)
    }

    /// Cell at `row`/`column`, or `Empty` when out of range.
    pub fn cell(&self, row: usize, column: usize) -> &CellValue {
        const EMPTY: &CellValue = &CellValue::Empty;
        self.rows.get(row).and_then(|r| r.get(column)).unwrap_or(EMPTY)
    }

    /// Number of non-empty cells in a column.
    pub fn filled_count(&self, column: usize) -> usize {
        self.rows.iter().filter(|row| row.get(column).is_some_and(|c| !c.is_empty())).count()
    }
}

fn decode_csv(bytes: &[u8]) -> String {
    if let Ok(utf8) = std::str::from_utf8(bytes) {
        return utf8.to_string();
    }

    msg_debug!(Message::DecodedAsWindows1250);
    encoding_rs::WINDOWS_1250.decode(bytes).0.into_owned()
}

fn sniff_delimiter(header_line: &str) -> u8 {
    let semicolons = header_line.matches(';').count();
    let commas = header_line.matches(',').count();
    if semicolons > commas {
        b';'
    } else {
        b','
    }
}

fn spreadsheet_cell(cell: &Data) -> CellValue {
    match cell {
        Data::Empty | Data::Error(_) => CellValue::Empty,
        Data::String(text) => CellValue::from_text(text),
        Data::Int(value) => CellValue::Number(*value as f64),
        Data::Float(value) => CellValue::Number(*value),
        Data::Bool(value) => CellValue::Text(value.to_string()),
        Data::DateTimeIso(text) | Data::DurationIso(text) => CellValue::from_text(text),
        other => match other.as_datetime() {
            // Time-only cells are stored as serials below one day
            Some(dt) if dt.date() <= excel_epoch() => CellValue::Time(dt.time()),
            Some(dt) => CellValue::DateTime(dt),
            None => CellValue::Empty,
        },
    }
}

fn excel_epoch() -> NaiveDate {
    NaiveDate::from_ymd_opt(1899, 12, 31).unwrap_or_default()
}
