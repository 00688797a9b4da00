use super::aggregate::{GroupStats, MIN_MATERIAL_OCCURRENCES};
use super::formatter::{format_count, format_decimal, format_minutes, format_percent};
use super::messages::Message;
use super::pipeline::Analysis;
use super::schema::ColumnMapping;
use super::table::RawTable;
use crate::{msg_info, msg_print, msg_warning};
use anyhow::Result;
use prettytable::{row, Table};

/// Widest bar of the hourly histogram, in characters.
const HISTOGRAM_WIDTH: usize = 40;

pub struct View {}

impl View {
    /// Prints the whole terminal dashboard.
    pub fn dashboard(analysis: &Analysis) -> Result<()> {
        msg_print!(Message::DashboardHeader(analysis.source_name.clone()), true);

        for notice in analysis.notices() {
            notice.emit();
        }
        let counts = analysis.headline.orders;
        if counts.invalid > 0 {
            msg_warning!(Message::InvalidRowsExcluded(counts.invalid, counts.total));
        }

        Self::headline(analysis)?;
        if analysis.mapping.material.is_some() {
            Self::slowest_materials(analysis)?;
        }
        if analysis.mapping.customer.is_some() {
            msg_print!(Message::TopCustomersHeader, true);
            Self::groups(&analysis.top_customers)?;
        }
        Self::packaging(analysis)?;
        Self::hourly(analysis)?;
        Self::anomalies(analysis)?;
        Self::invalid_preview(analysis)?;

        Ok(())
    }

    pub fn headline(analysis: &Analysis) -> Result<()> {
        let headline = &analysis.headline;
        msg_print!(Message::HeadlineHeader, true);

        let mut table = Table::new();
        table.add_row(row!["ORDERS", "VALID", "INVALID", "AVG DURATION", "MIN / PIECE", "PIECES", "TOTAL TIME"]);
        table.add_row(row![
            format_count(headline.orders.total),
            format!("{} ({})", format_count(headline.orders.valid), format_percent(headline.orders.valid, headline.orders.total)),
            format_count(headline.orders.invalid),
            format!("{} min", format_decimal(headline.mean_duration, 1)),
            format_decimal(headline.weighted_min_per_piece, 2),
            format_decimal(headline.total_pieces, 0),
            format_minutes(headline.total_duration),
        ]);
        table.printstd();

        Ok(())
    }

    fn slowest_materials(analysis: &Analysis) -> Result<()> {
        msg_print!(Message::SlowestMaterialsHeader(MIN_MATERIAL_OCCURRENCES), true);
        if analysis.slowest_materials.is_empty() {
            msg_info!(Message::NoMaterialsRanked(MIN_MATERIAL_OCCURRENCES));
            return Ok(());
        }
        Self::groups(&analysis.slowest_materials)
    }

    /// Ranked material or customer rollups.
    pub fn groups(groups: &[GroupStats]) -> Result<()> {
        let mut table = Table::new();

        table.add_row(row!["#", "KEY", "ORDERS", "AVG MIN", "AVG MIN / PIECE", "WEIGHTED MIN / PIECE", "PIECES", "TOTAL TIME"]);
        for (i, group) in groups.iter().enumerate() {
            table.add_row(row![
                i + 1,
                group.key,
                group.count,
                format_decimal(group.mean_duration, 1),
                format_decimal(group.mean_min_per_piece, 2),
                format_decimal(group.weighted_min_per_piece, 2),
                format_decimal(group.total_pieces, 0),
                format_minutes(group.total_duration),
            ]);
        }
        table.printstd();

        Ok(())
    }

    fn packaging(analysis: &Analysis) -> Result<()> {
        msg_print!(Message::PackagingHeader, true);
        if analysis.packaging.is_empty() {
            msg_info!(Message::NoPackagingColumns);
            return Ok(());
        }

        let mut table = Table::new();
        table.add_row(row!["UNIT", "COLUMN", "TOTAL"]);
        for total in &analysis.packaging {
            table.add_row(row![total.unit.label(), total.column, format_decimal(total.total, 0)]);
        }
        table.printstd();

        Ok(())
    }

    fn hourly(analysis: &Analysis) -> Result<()> {
        let load = &analysis.hourly;
        msg_print!(Message::HourlyLoadHeader, true);

        let peak = load.buckets.iter().copied().max().unwrap_or(0);
        let mut table = Table::new();
        table.add_row(row!["HOUR", "ORDERS", ""]);
        for (hour, &count) in load.buckets.iter().enumerate() {
            if count == 0 {
                continue;
            }
            let width = if peak == 0 { 0 } else { count * HISTOGRAM_WIDTH / peak };
            table.add_row(row![format!("{:02}:00", hour), count, "█".repeat(width.max(1))]);
        }
        table.printstd();

        if load.unknown > 0 {
            msg_info!(Message::UnknownHourRows(load.unknown));
        }

        Ok(())
    }

    fn anomalies(analysis: &Analysis) -> Result<()> {
        msg_print!(Message::AnomaliesHeader(analysis.anomaly_factor), true);
        if analysis.anomalies.is_empty() {
            msg_info!(Message::NoAnomalies);
            return Ok(());
        }

        let order_column = analysis.mapping.order_id;
        let mut table = Table::new();
        table.add_row(row!["ROW", "ORDER", "DURATION", "PIECES", "MIN / PIECE"]);
        for order in &analysis.anomalies {
            let order_id = order_column
                .map(|column| analysis.table.cell(order.row, column).to_string())
                .unwrap_or_default();
            table.add_row(row![
                order.row + 1,
                order_id,
                format_decimal(order.duration_min, 1),
                format_decimal(order.pieces, 0),
                format_decimal(order.min_per_piece, 2),
            ]);
        }
        table.printstd();

        Ok(())
    }

    fn invalid_preview(analysis: &Analysis) -> Result<()> {
        if analysis.invalid_preview.is_empty() {
            return Ok(());
        }
        msg_print!(
            Message::InvalidPreviewHeader(analysis.invalid_preview.len(), analysis.headline.orders.invalid),
            true
        );

        let mut table = Table::new();
        table.add_row(row!["ROW", "ORDER", "START", "END", "TIME", "REASON"]);
        for preview in &analysis.invalid_preview {
            table.add_row(row![
                preview.line,
                preview.order_id,
                preview.start,
                preview.end,
                preview.primary,
                preview.reason
            ]);
        }
        table.printstd();

        Ok(())
    }

    /// Field → column mapping as printed by the `columns` command.
    pub fn mapping(table: &RawTable, mapping: &ColumnMapping) -> Result<()> {
        let mut view = Table::new();

        view.add_row(row!["FIELD", "COLUMN", "FILLED"]);
        for (field, column) in mapping.describe(table) {
            let filled = column
                .as_deref()
                .and_then(|name| table.columns().iter().position(|c| c == name))
                .map(|index| format_count(table.filled_count(index)))
                .unwrap_or_default();
            view.add_row(row![field, column.unwrap_or_else(|| "-".to_string()), filled]);
        }
        view.printstd();

        Ok(())
    }
}
