//! Display implementation for lpa application messages.
//!
//! All user-facing text lives here, in one `match` over [`Message`]. Commands
//! and library code only construct message variants; the wording is decided in
//! this single place.
//!
//! ## Usage Integration
//!
//! ```rust
//! use lpa::{msg_info, msg_warning};
//! use lpa::libs::messages::Message;
//!
//! msg_info!(Message::UsingProcessTimeColumn("Process Time".to_string()));
//! msg_warning!(Message::PiecesColumnMissing);
//! ```

use super::types::Message;
use std::fmt::{Display, Formatter, Result};

impl Display for Message {
    fn fmt(&self, f: &mut Formatter<'_>) -> Result {
        let text = match self {
            // === LOAD MESSAGES ===
            Message::LoadingFile(path) => format!("Loading {}", path),
            Message::FileLoaded(rows, columns) => format!("Loaded {} rows with {} columns", rows, columns),
            Message::DecodedAsWindows1250 => "File is not UTF-8, decoded as Windows-1250".to_string(),

            // === COLUMN MAPPING MESSAGES ===
            Message::ColumnsHeader(path) => format!("Detected columns in {}", path),
            Message::UsingExportedDurationColumn(column) => {
                format!("Using exported durations from column: {}", column)
            }
            Message::UsingCleanedTimeColumn(column) => format!("Using cleaned time column: {}", column),
            Message::UsingProcessTimeColumn(column) => format!("Using time column: {}", column),
            Message::CleanedColumnTooSparse(column, filled, required) => format!(
                "Cleaned time column '{}' has only {} filled rows (more than {} required), ignoring it",
                column, filled, required
            ),
            Message::NoDurationSource(expected) => format!(
                "No duration column found and no START/END pair. Expected one of: {}",
                expected.join(", ")
            ),
            Message::DurationComputedFromStartEnd(count) => {
                format!("'Process Time' column not found. Computed {} rows from START/END.", count)
            }
            Message::PiecesColumnMissing => {
                "Column 'Number of pieces' not found, counting 1 piece per order.".to_string()
            }
            Message::MaterialColumnMissing => "Column 'Material' is missing.".to_string(),
            Message::CustomerColumnFallback(column) => {
                format!("Column 'CUSTOMER' is missing, grouping customers by '{}'", column)
            }
            Message::DetectedColumns(columns) => format!("Detected columns: {}", columns.join(", ")),

            // === ANALYSIS MESSAGES ===
            Message::NoUsableRows => "No rows with a valid duration could be loaded.".to_string(),
            Message::CheckDurationColumns(expected) => format!(
                "Check that the duration columns ({}) hold values in a time format.",
                expected.join(", ")
            ),
            Message::InvalidRowsExcluded(invalid, total) => format!(
                "{} of {} orders have no usable duration and are excluded from averages",
                invalid, total
            ),
            Message::DashboardHeader(name) => format!("Logistics performance for {}", name),
            Message::HeadlineHeader => "Performance overview".to_string(),
            Message::SlowestMaterialsHeader(min) => {
                format!("Slowest materials (average minutes per piece, at least {} orders)", min)
            }
            Message::NoMaterialsRanked(min) => format!("No material has {} or more valid orders.", min),
            Message::TopCustomersHeader => "Top customers by total time".to_string(),
            Message::PackagingHeader => "Packaging units".to_string(),
            Message::NoPackagingColumns => "No packaging columns found.".to_string(),
            Message::HourlyLoadHeader => "Orders by start hour".to_string(),
            Message::UnknownHourRows(count) => format!("{} valid orders have no readable START time", count),
            Message::AnomaliesHeader(factor) => {
                format!("Orders slower than {:.1}x the weighted average per piece", factor)
            }
            Message::NoAnomalies => "No anomalies found.".to_string(),
            Message::InvalidPreviewHeader(shown, total) => {
                format!("Orders without usable duration (showing {} of {})", shown, total)
            }

            // === EXPORT MESSAGES ===
            Message::ExportingData(format) => format!("Exporting analysis as {}...", format),
            Message::ExportCompleted(path) => format!("Export completed: {}", path),
            Message::ExportFailed(path) => format!("Failed to write {}", path),

            // === CONFIGURATION MESSAGES ===
            Message::ConfigSaved => "Configuration saved successfully".to_string(),
            Message::ConfigParseError => "Failed to parse configuration".to_string(),
            Message::ConfigModuleAnalysis => "Analysis settings".to_string(),
            Message::ConfigModuleSchema => "Column synonyms".to_string(),
            Message::DataStoragePathError => "Failed to resolve data storage path".to_string(),

            // === PROMPTS ===
            Message::PromptSelectModules => "Select settings to configure".to_string(),
            Message::PromptZeroDurationPolicy => "How should orders with START equal to END be counted?".to_string(),
            Message::PromptDecimalClock => "Accept '14.30' as 14:30?".to_string(),
            Message::PromptStrictClock => "Reject hours >= 24 and minutes/seconds >= 60?".to_string(),
            Message::PromptMinCleanedRows => {
                "Minimum filled rows before a cleaned time column is trusted".to_string()
            }
            Message::PromptTopN => "Number of rows in rankings".to_string(),
            Message::PromptAnomalyFactor => "Anomaly factor (x weighted average per piece)".to_string(),
            Message::PromptInvalidPreviewRows => "Number of invalid orders to preview".to_string(),
            Message::PromptSynonyms(field) => format!("Synonyms for {} (comma separated)", field),

            // === GENERAL MESSAGES ===
            Message::CriticalError(error) => format!("Critical error: {}", error),
            Message::ReportIssueHint => "If the problem persists, please send a screenshot of this error.".to_string(),
        };
        write!(f, "{}", text)
    }
}
