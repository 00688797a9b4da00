//! Productivity statistics over valid orders.
//!
//! ## Key Formulas
//!
//! ```text
//! Min per piece (row)      = Duration_Min / Pieces      (0 when Pieces = 0)
//! Weighted min per piece   = Σ Duration_Min / Σ Pieces  (0 when Σ Pieces = 0)
//! ```
//!
//! The headline per-piece figure is always the weighted one. Per-group
//! rankings report both.
//!
//! ## Rankings
//!
//! - **Slowest materials**: materials with at least
//!   [`MIN_MATERIAL_OCCURRENCES`] valid orders, by mean minutes per piece.
//! - **Top customers**: by total minutes spent.

use crate::libs::classify::{Classification, OrderCounts};
use crate::libs::schema::{ColumnMapping, PackagingUnit};
use crate::libs::table::{CellValue, RawTable};
use serde::Serialize;
use std::collections::BTreeMap;

/// Materials with fewer valid orders are left out of the slowest ranking.
pub const MIN_MATERIAL_OCCURRENCES: usize = 3;

/// Per-order figures for one valid order.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct OrderMetrics {
    pub row: usize,
    pub duration_min: f64,
    pub pieces: f64,
    pub min_per_piece: f64,
    pub start_hour: Option<u32>,
}

/// Headline metric cards.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Headline {
    pub orders: OrderCounts,
    pub mean_duration: f64,
    pub weighted_min_per_piece: f64,
    pub total_duration: f64,
    pub total_pieces: f64,
    /// No pieces column was found and every order counts as one piece.
    pub pieces_defaulted: bool,
}

/// Rollup for one material or customer.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GroupStats {
    pub key: String,
    pub count: usize,
    pub mean_duration: f64,
    pub mean_min_per_piece: f64,
    pub weighted_min_per_piece: f64,
    pub total_duration: f64,
    pub total_pieces: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PackagingTotal {
    pub unit: PackagingUnit,
    pub column: String,
    pub total: f64,
}

/// Orders per start hour (0-23); orders without a readable START are counted
/// in `unknown`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct HourlyLoad {
    pub buckets: [usize; 24],
    pub unknown: usize,
}

/// Piece count of one cell; missing or non-numeric values count as 0.
pub fn coerce_pieces(value: &CellValue) -> f64 {
    value.as_number().unwrap_or(0.0)
}

/// `duration / pieces`, or 0 when there are no pieces.
pub fn min_per_piece(duration: f64, pieces: f64) -> f64 {
    if pieces == 0.0 {
        0.0
    } else {
        duration / pieces
    }
}

/// `Σ duration / Σ pieces`, or 0 when there are no pieces.
pub fn weighted_min_per_piece<'a>(metrics: impl IntoIterator<Item = &'a OrderMetrics>) -> f64 {
    let (duration, pieces) = metrics
        .into_iter()
        .fold((0.0, 0.0), |(d, p), m| (d + m.duration_min, p + m.pieces));
    if pieces > 0.0 {
        duration / pieces
    } else {
        0.0
    }
}

/// Builds per-order metrics for every valid order.
pub fn order_metrics(table: &RawTable, mapping: &ColumnMapping, classification: &Classification) -> Vec<OrderMetrics> {
    classification
        .valid()
        .filter_map(|record| {
            let duration_min = record.duration_min?;
            let pieces = match mapping.pieces {
                Some(index) => coerce_pieces(table.cell(record.row, index)),
                None => 1.0,
            };
            Some(OrderMetrics {
                row: record.row,
                duration_min,
                pieces,
                min_per_piece: min_per_piece(duration_min, pieces),
                start_hour: record.start_minutes.map(hour_of_day),
            })
        })
        .collect()
}

/// Hour bucket of a minute-of-day value, wrapped into 0-23.
pub fn hour_of_day(minutes: f64) -> u32 {
    (minutes / 60.0).floor().rem_euclid(24.0) as u32
}

pub fn headline(metrics: &[OrderMetrics], orders: OrderCounts, pieces_defaulted: bool) -> Headline {
    let total_duration: f64 = metrics.iter().map(|m| m.duration_min).sum();
    let total_pieces: f64 = metrics.iter().map(|m| m.pieces).sum();
    let mean_duration = if metrics.is_empty() {
        0.0
    } else {
        total_duration / metrics.len() as f64
    };

    Headline {
        orders,
        mean_duration,
        weighted_min_per_piece: weighted_min_per_piece(metrics),
        total_duration,
        total_pieces,
        pieces_defaulted,
    }
}

/// Groups valid orders by the value of `column`, sorted by key.
///
/// Orders with an empty key are left out.
pub fn group_by(table: &RawTable, metrics: &[OrderMetrics], column: usize) -> Vec<GroupStats> {
    let mut groups: BTreeMap<String, Vec<&OrderMetrics>> = BTreeMap::new();
    for m in metrics {
        let key = table.cell(m.row, column);
        if key.is_empty() {
            continue;
        }
        groups.entry(key.to_string().trim().to_string()).or_default().push(m);
    }

    groups
        .into_iter()
        .map(|(key, members)| {
            let count = members.len();
            let total_duration: f64 = members.iter().map(|m| m.duration_min).sum();
            let total_pieces: f64 = members.iter().map(|m| m.pieces).sum();
            let mean_min_per_piece = members.iter().map(|m| m.min_per_piece).sum::<f64>() / count as f64;
            GroupStats {
                key,
                count,
                mean_duration: total_duration / count as f64,
                mean_min_per_piece,
                weighted_min_per_piece: weighted_min_per_piece(members.iter().copied()),
                total_duration,
                total_pieces,
            }
        })
        .collect()
}

/// Materials with enough orders, slowest (mean minutes per piece) first.
pub fn slowest_materials(groups: &[GroupStats], top_n: usize) -> Vec<GroupStats> {
    let mut ranked: Vec<GroupStats> = groups
        .iter()
        .filter(|g| g.count >= MIN_MATERIAL_OCCURRENCES)
        .cloned()
        .collect();
    ranked.sort_by(|a, b| b.mean_min_per_piece.total_cmp(&a.mean_min_per_piece));
    ranked.truncate(top_n);
    ranked
}

/// Customers with the most total minutes first.
pub fn top_customers(groups: &[GroupStats], top_n: usize) -> Vec<GroupStats> {
    let mut ranked = groups.to_vec();
    ranked.sort_by(|a, b| b.total_duration.total_cmp(&a.total_duration));
    ranked.truncate(top_n);
    ranked
}

/// Sum of every detected packaging column over valid orders.
pub fn packaging_mix(table: &RawTable, mapping: &ColumnMapping, metrics: &[OrderMetrics]) -> Vec<PackagingTotal> {
    mapping
        .packaging
        .iter()
        .map(|column| PackagingTotal {
            unit: column.unit,
            column: column.name.clone(),
            total: metrics.iter().map(|m| coerce_pieces(table.cell(m.row, column.index))).sum(),
        })
        .collect()
}

pub fn hourly_load(metrics: &[OrderMetrics]) -> HourlyLoad {
    let mut load = HourlyLoad {
        buckets: [0; 24],
        unknown: 0,
    };
    for m in metrics {
        match m.start_hour {
            Some(hour) => load.buckets[hour as usize % 24] += 1,
            None => load.unknown += 1,
        }
    }
    load
}

/// Orders slower per piece than `factor` times the weighted average,
/// slowest first.
pub fn anomalies(metrics: &[OrderMetrics], weighted: f64, factor: f64, top_n: usize) -> Vec<OrderMetrics> {
    if weighted <= 0.0 {
        return Vec::new();
    }
    let threshold = weighted * factor;
    let mut slow: Vec<OrderMetrics> = metrics
        .iter()
        .filter(|m| m.pieces > 0.0 && m.min_per_piece > threshold)
        .cloned()
        .collect();
    slow.sort_by(|a, b| b.min_per_piece.total_cmp(&a.min_per_piece));
    slow.truncate(top_n);
    slow
}
