//! The end-to-end analysis pass.
//!
//! ```text
//! RawTable ──▶ ColumnMapping ──▶ derive_durations ──▶ classify ──▶ aggregate
//!                  │                                                   │
//!                  └──────────────── notices ─────────────┐            │
//!                                                          ▼            ▼
//!                                                     ┌──────────────────┐
//!                                                     │     Analysis     │
//!                                                     └──────────────────┘
//! ```
//!
//! An [`Analysis`] owns its table and is never modified after
//! [`analyze`] returns; the dashboard and every export format read the same
//! value.

use crate::libs::aggregate::{self, GroupStats, Headline, HourlyLoad, OrderMetrics, PackagingTotal};
use crate::libs::classify::{classify, Classification};
use crate::libs::config::{AnalysisConfig, Config};
use crate::libs::duration::derive_durations;
use crate::libs::error::AnalysisError;
use crate::libs::messages::Message;
use crate::libs::schema::{ColumnMapping, Notice, SchemaConfig};
use crate::libs::table::RawTable;
use crate::msg_debug;
use std::path::Path;

/// Diagnostic view of one invalid order.
#[derive(Debug, Clone, PartialEq)]
pub struct InvalidPreview {
    /// 1-based data row number, as seen in a spreadsheet without the header.
    pub line: usize,
    pub order_id: String,
    pub start: String,
    pub end: String,
    pub primary: String,
    pub reason: String,
}

/// Everything the dashboard and the exports need.
#[derive(Debug, Clone)]
pub struct Analysis {
    pub source_name: String,
    pub table: RawTable,
    pub mapping: ColumnMapping,
    pub classification: Classification,
    pub metrics: Vec<OrderMetrics>,
    pub headline: Headline,
    pub materials: Vec<GroupStats>,
    pub slowest_materials: Vec<GroupStats>,
    pub customers: Vec<GroupStats>,
    pub top_customers: Vec<GroupStats>,
    pub packaging: Vec<PackagingTotal>,
    pub hourly: HourlyLoad,
    pub anomalies: Vec<OrderMetrics>,
    pub invalid_preview: Vec<InvalidPreview>,
    pub anomaly_factor: f64,
}

impl Analysis {
    /// Mapping notices plus those discovered while deriving durations.
    pub fn notices(&self) -> &[Notice] {
        &self.mapping.notices
    }
}

/// Loads `path` and analyses it with the settings from `config`.
pub fn analyze_file(path: &Path, config: &Config) -> Result<Analysis, AnalysisError> {
    let table = RawTable::load(path)?;
    msg_debug!(Message::FileLoaded(table.len(), table.columns().len()));

    let source_name = path
        .file_name()
        .map(|name| name.to_string_lossy().to_string())
        .unwrap_or_else(|| path.display().to_string());

    analyze(table, source_name, &config.analysis(), &config.schema())
}

/// Runs mapping, duration derivation, classification and aggregation.
///
/// # Errors
///
/// [`AnalysisError::NoUsableRows`] when not a single order has a positive
/// duration.
pub fn analyze(
    table: RawTable,
    source_name: String,
    settings: &AnalysisConfig,
    schema: &SchemaConfig,
) -> Result<Analysis, AnalysisError> {
    let mut mapping = ColumnMapping::resolve(&table, schema, settings.min_cleaned_rows);
    let options = settings.parse_options();

    let derived = derive_durations(&table, &mapping, &options, settings.zero_duration_policy);
    let classification = classify(derived);

    if classification.counts().valid == 0 {
        return Err(AnalysisError::NoUsableRows {
            columns: table.columns().to_vec(),
            expected: schema.expected_duration_columns(),
            notices: mapping.notices,
        });
    }

    if mapping.duration.is_none() && mapping.has_start_end() {
        mapping
            .notices
            .push(Notice::ComputedFromStartEnd(classification.from_start_end()));
    }

    let metrics = aggregate::order_metrics(&table, &mapping, &classification);
    let headline = aggregate::headline(&metrics, classification.counts(), mapping.pieces.is_none());

    let materials = match mapping.material {
        Some(column) => aggregate::group_by(&table, &metrics, column),
        None => Vec::new(),
    };
    let slowest_materials = aggregate::slowest_materials(&materials, settings.top_n);

    let customers = match &mapping.customer {
        Some(column) => aggregate::group_by(&table, &metrics, column.index),
        None => Vec::new(),
    };
    let top_customers = aggregate::top_customers(&customers, settings.top_n);

    let packaging = aggregate::packaging_mix(&table, &mapping, &metrics);
    let hourly = aggregate::hourly_load(&metrics);
    let anomalies = aggregate::anomalies(
        &metrics,
        headline.weighted_min_per_piece,
        settings.anomaly_factor,
        settings.top_n,
    );
    let invalid_preview = invalid_preview(&table, &mapping, &classification, settings.invalid_preview_rows);

    tracing::debug!(
        orders = headline.orders.total,
        valid = headline.orders.valid,
        materials = materials.len(),
        customers = customers.len(),
        "analysis finished"
    );

    Ok(Analysis {
        source_name,
        table,
        mapping,
        classification,
        metrics,
        headline,
        materials,
        slowest_materials,
        customers,
        top_customers,
        packaging,
        hourly,
        anomalies,
        invalid_preview,
        anomaly_factor: settings.anomaly_factor,
    })
}

fn invalid_preview(
    table: &RawTable,
    mapping: &ColumnMapping,
    classification: &Classification,
    limit: usize,
) -> Vec<InvalidPreview> {
    let text = |row: usize, column: Option<usize>| {
        column.map(|index| table.cell(row, index).to_string()).unwrap_or_default()
    };

    classification
        .invalid()
        .take(limit)
        .map(|record| InvalidPreview {
            line: record.row + 1,
            order_id: text(record.row, mapping.order_id),
            start: text(record.row, mapping.start),
            end: text(record.row, mapping.end),
            primary: text(record.row, mapping.duration.as_ref().map(|d| d.index)),
            reason: record
                .invalid_reason
                .as_ref()
                .map(|reason| reason.to_string())
                .unwrap_or_default(),
        })
        .collect()
}
