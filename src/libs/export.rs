//! Report export to Excel, CSV and JSON.
//!
//! ## Formats
//!
//! - **Excel**: sheets `Clean_Data`, `Top_Materials` (only when a material
//!   column exists), `Customers` and `Summary`.
//! - **CSV**: the `Clean_Data` table only. Loading the file again yields the
//!   same valid orders with the same durations, read from `Duration_Min`.
//! - **JSON**: headline, rankings, packaging, hourly load and the
//!   `(pieces, duration)` scatter points.
//!
//! `Clean_Data` holds every original column of the valid orders plus
//! `Duration_Min`, `Pieces` and `Min_per_Piece`.
//!
//! ## Usage
//!
//! ```rust,no_run
//! use lpa::libs::config::Config;
//! use lpa::libs::export::{ExportFormat, Exporter};
//! use lpa::libs::pipeline::analyze_file;
//! use std::path::Path;
//!
//! let analysis = analyze_file(Path::new("orders.xlsx"), &Config::default())?;
//! Exporter::new(ExportFormat::Excel, None).export(&analysis)?;
//! # Ok::<(), anyhow::Error>(())
//! ```

use crate::libs::aggregate::{GroupStats, Headline, HourlyLoad, OrderMetrics, PackagingTotal};
use crate::libs::messages::Message;
use crate::libs::pipeline::Analysis;
use crate::libs::table::CellValue;
use crate::{msg_info, msg_success};
use anyhow::{Context, Result};
use rust_xlsxwriter::{Format, Workbook, Worksheet};
use serde::Serialize;
use std::fs::File;
use std::io::Write;
use std::path::{Path, PathBuf};

include!(concat!(env!("OUT_DIR"), "/app_metadata.rs"));

pub use crate::libs::schema::DERIVED_COLUMNS;

#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
pub enum ExportFormat {
    /// Multi-sheet Excel workbook.
    Excel,
    /// Cleaned order rows only.
    Csv,
    /// Aggregated results.
    Json,
}

impl ExportFormat {
    pub fn extension(&self) -> &'static str {
        match self {
            ExportFormat::Excel => "xlsx",
            ExportFormat::Csv => "csv",
            ExportFormat::Json => "json",
        }
    }
}

/// JSON report document.
#[derive(Debug, Serialize)]
pub struct ExportReport<'a> {
    pub source: &'a str,
    pub version: &'a str,
    pub headline: &'a Headline,
    pub slowest_materials: &'a [GroupStats],
    pub top_customers: &'a [GroupStats],
    pub packaging: &'a [PackagingTotal],
    pub hourly_load: &'a HourlyLoad,
    pub anomalies: &'a [OrderMetrics],
    pub scatter: Vec<ScatterPoint>,
}

#[derive(Debug, Serialize, PartialEq)]
pub struct ScatterPoint {
    pub pieces: f64,
    pub duration_min: f64,
}

pub struct Exporter {
    format: ExportFormat,
    output_path: PathBuf,
}

impl Exporter {
    /// Creates an exporter; without a path the file is named
    /// `Logistics_Analysis_v<version>.<ext>` in the working directory.
    pub fn new(format: ExportFormat, output_path: Option<PathBuf>) -> Self {
        let output_path = output_path.unwrap_or_else(|| PathBuf::from(default_file_name(format)));
        Self { format, output_path }
    }

    pub fn output_path(&self) -> &Path {
        &self.output_path
    }

    pub fn export(&self, analysis: &Analysis) -> Result<()> {
        msg_info!(Message::ExportingData(self.format.extension().to_uppercase()));

        match self.format {
            ExportFormat::Excel => self.export_excel(analysis),
            ExportFormat::Csv => self.export_csv(analysis),
            ExportFormat::Json => self.export_json(analysis),
        }
        .with_context(|| Message::ExportFailed(self.output_path.display().to_string()).to_string())?;

        msg_success!(Message::ExportCompleted(self.output_path.display().to_string()));
        Ok(())
    }

    fn export_csv(&self, analysis: &Analysis) -> Result<()> {
        let mut wtr = csv::Writer::from_path(&self.output_path)?;

        wtr.write_record(clean_data_header(analysis))?;
        for order in &analysis.metrics {
            let mut record: Vec<String> = analysis.table.rows()[order.row].iter().map(|c| c.to_string()).collect();
            record.push(order.duration_min.to_string());
            record.push(order.pieces.to_string());
            record.push(order.min_per_piece.to_string());
            wtr.write_record(&record)?;
        }

        wtr.flush()?;
        Ok(())
    }

    fn export_json(&self, analysis: &Analysis) -> Result<()> {
        let report = ExportReport {
            source: &analysis.source_name,
            version: APP_METADATA_VERSION,
            headline: &analysis.headline,
            slowest_materials: &analysis.slowest_materials,
            top_customers: &analysis.top_customers,
            packaging: &analysis.packaging,
            hourly_load: &analysis.hourly,
            anomalies: &analysis.anomalies,
            scatter: scatter_points(&analysis.metrics),
        };

        let json = serde_json::to_string_pretty(&report)?;
        File::create(&self.output_path)?.write_all(json.as_bytes())?;
        Ok(())
    }

    fn export_excel(&self, analysis: &Analysis) -> Result<()> {
        let mut workbook = Workbook::new();
        let header_format = Format::new().set_bold().set_background_color(rust_xlsxwriter::Color::Gray);

        // Clean_Data
        let worksheet = workbook.add_worksheet().set_name("Clean_Data")?;
        for (col, name) in clean_data_header(analysis).iter().enumerate() {
            worksheet.write_string_with_format(0, col as u16, name, &header_format)?;
        }
        let derived_col = analysis.table.columns().len() as u16;
        for (i, order) in analysis.metrics.iter().enumerate() {
            let row = i as u32 + 1;
            for (col, cell) in analysis.table.rows()[order.row].iter().enumerate() {
                write_cell(worksheet, row, col as u16, cell)?;
            }
            worksheet.write_number(row, derived_col, order.duration_min)?;
            worksheet.write_number(row, derived_col + 1, order.pieces)?;
            worksheet.write_number(row, derived_col + 2, order.min_per_piece)?;
        }
        worksheet.autofit();

        if analysis.mapping.material.is_some() {
            let worksheet = workbook.add_worksheet().set_name("Top_Materials")?;
            write_groups(worksheet, "Material", &analysis.slowest_materials, &header_format)?;
        }

        let worksheet = workbook.add_worksheet().set_name("Customers")?;
        write_groups(worksheet, "Customer", &analysis.top_customers, &header_format)?;

        let worksheet = workbook.add_worksheet().set_name("Summary")?;
        let headline = &analysis.headline;
        worksheet.write_string_with_format(0, 0, "Metric", &header_format)?;
        worksheet.write_string_with_format(0, 1, "Value", &header_format)?;
        let summary = [
            ("Orders", headline.orders.total as f64),
            ("Valid orders", headline.orders.valid as f64),
            ("Invalid orders", headline.orders.invalid as f64),
            ("Average duration [min]", headline.mean_duration),
            ("Weighted min per piece", headline.weighted_min_per_piece),
            ("Total pieces", headline.total_pieces),
            ("Total duration [min]", headline.total_duration),
        ];
        for (i, (label, value)) in summary.iter().enumerate() {
            let row = i as u32 + 1;
            worksheet.write_string(row, 0, *label)?;
            worksheet.write_number(row, 1, *value)?;
        }
        let row = summary.len() as u32 + 1;
        worksheet.write_string(row, 0, "Source")?;
        worksheet.write_string(row, 1, &analysis.source_name)?;
        worksheet.write_string(row + 1, 0, "Version")?;
        worksheet.write_string(row + 1, 1, APP_METADATA_VERSION)?;
        worksheet.autofit();

        workbook.save(&self.output_path)?;
        Ok(())
    }
}

/// `Logistics_Analysis_v<version>.<ext>`
pub fn default_file_name(format: ExportFormat) -> String {
    format!(
        "{}_v{}.{}",
        APP_METADATA_REPORT_PREFIX,
        APP_METADATA_VERSION,
        format.extension()
    )
}

/// `(pieces, duration)` for every valid order.
pub fn scatter_points(metrics: &[OrderMetrics]) -> Vec<ScatterPoint> {
    metrics
        .iter()
        .map(|m| ScatterPoint {
            pieces: m.pieces,
            duration_min: m.duration_min,
        })
        .collect()
}

fn clean_data_header(analysis: &Analysis) -> Vec<String> {
    analysis
        .table
        .columns()
        .iter()
        .cloned()
        .chain(DERIVED_COLUMNS.iter().map(|c| c.to_string()))
        .collect()
}

fn write_cell(worksheet: &mut Worksheet, row: u32, col: u16, cell: &CellValue) -> Result<()> {
    match cell {
        CellValue::Empty => {}
        CellValue::Number(value) => {
            worksheet.write_number(row, col, *value)?;
        }
        other => {
            worksheet.write_string(row, col, other.to_string())?;
        }
    }
    Ok(())
}

fn write_groups(worksheet: &mut Worksheet, key: &str, groups: &[GroupStats], header_format: &Format) -> Result<()> {
    let headers = [
        key,
        "Orders",
        "Avg duration [min]",
        "Avg min per piece",
        "Weighted min per piece",
        "Total pieces",
        "Total duration [min]",
    ];
    for (col, name) in headers.iter().enumerate() {
        worksheet.write_string_with_format(0, col as u16, *name, header_format)?;
    }

    for (i, group) in groups.iter().enumerate() {
        let row = i as u32 + 1;
        worksheet.write_string(row, 0, &group.key)?;
        worksheet.write_number(row, 1, group.count as f64)?;
        worksheet.write_number(row, 2, group.mean_duration)?;
        worksheet.write_number(row, 3, group.mean_min_per_piece)?;
        worksheet.write_number(row, 4, group.weighted_min_per_piece)?;
        worksheet.write_number(row, 5, group.total_pieces)?;
        worksheet.write_number(row, 6, group.total_duration)?;
    }

    worksheet.autofit();
    Ok(())
}
