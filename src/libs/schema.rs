//! Column discovery for order exports with unstable headers.
//!
//! Input files do not share a fixed schema: the duration column may be called
//! `Process Time`, `Cleaned process time [min]` or similar, and the piece count
//! may be `Number of pieces` or the Czech `Počet kusů`. [`SchemaConfig`] lists
//! the recognised synonyms per logical field and [`ColumnMapping::resolve`]
//! turns them into concrete column indices once per load.
//!
//! ## Synonym Syntax
//!
//! - **Exact fields** (`start`, `end`, `pallets`, `klts`, `material`,
//!   `customer`): the trimmed header must equal the synonym, ignoring case.
//! - **Substring fields** (`cleaned_time`, `process_time`, `pieces`,
//!   `cartons`, `order_id`): the lowercase header must contain every
//!   `+`-separated term of the synonym, e.g. `cleaned+time`.
//!
//! ## Field Policy
//!
//! | Field      | Required | Fallback                                   |
//! |------------|----------|--------------------------------------------|
//! | duration   | no       | START/END pair                             |
//! | start/end  | no       | primary duration column                    |
//! | pieces     | no       | 1 piece per order, with a warning          |
//! | customer   | no       | second column of the table                 |
//! | others     | no       | section omitted                            |

use crate::libs::messages::Message;
use crate::libs::table::RawTable;
use crate::{msg_info, msg_warning};
use serde::{Deserialize, Serialize};

/// Recognised header synonyms per logical field.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
#[serde(default)]
pub struct SchemaConfig {
    pub cleaned_time: Vec<String>,
    pub process_time: Vec<String>,
    pub start: Vec<String>,
    pub end: Vec<String>,
    pub pieces: Vec<String>,
    pub pallets: Vec<String>,
    pub klts: Vec<String>,
    pub cartons: Vec<String>,
    pub material: Vec<String>,
    pub customer: Vec<String>,
    pub order_id: Vec<String>,
}

impl Default for SchemaConfig {
    fn default() -> Self {
        fn list(items: &[&str]) -> Vec<String> {
            items.iter().map(|s| s.to_string()).collect()
        }

        SchemaConfig {
            cleaned_time: list(&["cleaned+time"]),
            process_time: list(&["process+time"]),
            start: list(&["START"]),
            end: list(&["END"]),
            pieces: list(&["piece", "kus"]),
            pallets: list(&["Number of pallets"]),
            klts: list(&["Number of KLTs"]),
            cartons: list(&["carton"]),
            material: list(&["Material"]),
            customer: list(&["CUSTOMER"]),
            order_id: list(&["order", "delivery"]),
        }
    }
}

/// Columns appended to the original ones when the cleaned data is exported.
pub const DERIVED_COLUMNS: [&str; 3] = ["Duration_Min", "Pieces", "Min_per_Piece"];

impl SchemaConfig {
    /// Human-readable duration synonyms, for hints about missing columns.
    pub fn expected_duration_columns(&self) -> Vec<String> {
        self.process_time
            .iter()
            .chain(self.cleaned_time.iter())
            .map(|s| s.replace('+', " "))
            .chain(self.start.iter().cloned())
            .chain(self.end.iter().cloned())
            .collect()
    }
}

/// Where the primary duration value comes from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum DurationColumnKind {
    Cleaned,
    Process,
    /// `Duration_Min` of a previously exported table, in plain minutes.
    Exported,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DurationColumn {
    pub index: usize,
    pub name: String,
    pub kind: DurationColumnKind,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum PackagingUnit {
    Pallets,
    Klts,
    Cartons,
}

impl PackagingUnit {
    pub fn label(&self) -> &'static str {
        match self {
            PackagingUnit::Pallets => "Pallets",
            PackagingUnit::Klts => "KLTs",
            PackagingUnit::Cartons => "Cartons",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PackagingColumn {
    pub unit: PackagingUnit,
    pub index: usize,
    pub name: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CustomerColumn {
    pub index: usize,
    pub name: String,
    /// `true` when no customer synonym matched and the second column is used.
    pub fallback: bool,
}

/// Something the user should know about the detected layout.
#[derive(Debug, Clone, PartialEq)]
pub enum Notice {
    UsingExportedDurations(String),
    UsingCleanedTime(String),
    UsingProcessTime(String),
    CleanedTimeTooSparse { column: String, filled: usize, required: usize },
    NoDurationSource { expected: Vec<String> },
    ComputedFromStartEnd(usize),
    PiecesDefaulted,
    MaterialMissing,
    CustomerFallback(String),
}

impl Notice {
    pub fn message(&self) -> Message {
        match self {
            Notice::UsingExportedDurations(column) => Message::UsingExportedDurationColumn(column.clone()),
            Notice::UsingCleanedTime(column) => Message::UsingCleanedTimeColumn(column.clone()),
            Notice::UsingProcessTime(column) => Message::UsingProcessTimeColumn(column.clone()),
            Notice::CleanedTimeTooSparse { column, filled, required } => {
                Message::CleanedColumnTooSparse(column.clone(), *filled, *required)
            }
            Notice::NoDurationSource { expected } => Message::NoDurationSource(expected.clone()),
            Notice::ComputedFromStartEnd(count) => Message::DurationComputedFromStartEnd(*count),
            Notice::PiecesDefaulted => Message::PiecesColumnMissing,
            Notice::MaterialMissing => Message::MaterialColumnMissing,
            Notice::CustomerFallback(column) => Message::CustomerColumnFallback(column.clone()),
        }
    }

    pub fn is_warning(&self) -> bool {
        !matches!(
            self,
            Notice::UsingExportedDurations(_) | Notice::UsingCleanedTime(_) | Notice::UsingProcessTime(_)
        )
    }

    /// Prints the notice through the message macros.
    pub fn emit(&self) {
        if self.is_warning() {
            msg_warning!(self.message());
        } else {
            msg_info!(self.message());
        }
    }
}

/// Concrete column positions for one loaded table.
#[derive(Debug, Clone, PartialEq)]
pub struct ColumnMapping {
    pub duration: Option<DurationColumn>,
    pub start: Option<usize>,
    pub end: Option<usize>,
    pub pieces: Option<usize>,
    pub packaging: Vec<PackagingColumn>,
    pub material: Option<usize>,
    pub customer: Option<CustomerColumn>,
    pub order_id: Option<usize>,
    pub notices: Vec<Notice>,
}

impl ColumnMapping {
    /// Resolves the synonyms of `schema` against the headers of `table`.
    ///
    /// A table that carries every column of [`DERIVED_COLUMNS`] was exported
    /// by this tool; its `Duration_Min` and `Pieces` columns are taken as-is.
    /// Otherwise a cleaned time column is only trusted when it has more than
    /// `min_cleaned_rows` filled cells, and the process time column is used
    /// in its place.
    pub fn resolve(table: &RawTable, schema: &SchemaConfig, min_cleaned_rows: usize) -> Self {
        let columns = table.columns();
        let mut notices = Vec::new();

        let derived = exported_columns(columns);
        let mut duration = None;
        let mut rejected = None;
        if let Some([minutes, _, _]) = derived {
            notices.push(Notice::UsingExportedDurations(columns[minutes].clone()));
            duration = Some(DurationColumn {
                index: minutes,
                name: columns[minutes].clone(),
                kind: DurationColumnKind::Exported,
            });
        } else if let Some(index) = find_containing(columns, &schema.cleaned_time) {
            let filled = table.filled_count(index);
            if filled > min_cleaned_rows {
                notices.push(Notice::UsingCleanedTime(columns[index].clone()));
                duration = Some(DurationColumn {
                    index,
                    name: columns[index].clone(),
                    kind: DurationColumnKind::Cleaned,
                });
            } else {
                rejected = Some(index);
                notices.push(Notice::CleanedTimeTooSparse {
                    column: columns[index].clone(),
                    filled,
                    required: min_cleaned_rows,
                });
            }
        }
        if duration.is_none() {
            // A sparse cleaned column usually matches the process synonyms too
            let process = columns
                .iter()
                .enumerate()
                .filter(|(i, _)| Some(*i) != rejected)
                .find(|(_, column)| matches_containing(column, &schema.process_time))
                .map(|(i, _)| i);
            if let Some(index) = process {
                notices.push(Notice::UsingProcessTime(columns[index].clone()));
                duration = Some(DurationColumn {
                    index,
                    name: columns[index].clone(),
                    kind: DurationColumnKind::Process,
                });
            }
        }

        let start = find_exact(columns, &schema.start);
        let end = find_exact(columns, &schema.end);

        if duration.is_none() && (start.is_none() || end.is_none()) {
            notices.push(Notice::NoDurationSource {
                expected: schema.expected_duration_columns(),
            });
        }

        let pieces = match derived {
            Some([_, pieces, _]) => Some(pieces),
            None => find_containing(columns, &schema.pieces),
        };
        if pieces.is_none() {
            notices.push(Notice::PiecesDefaulted);
        }

        let mut packaging = Vec::new();
        for (unit, index) in [
            (PackagingUnit::Pallets, find_exact(columns, &schema.pallets)),
            (PackagingUnit::Klts, find_exact(columns, &schema.klts)),
            (PackagingUnit::Cartons, find_containing(columns, &schema.cartons)),
        ] {
            if let Some(index) = index {
                packaging.push(PackagingColumn {
                    unit,
                    index,
                    name: columns[index].clone(),
                });
            }
        }

        let material = find_exact(columns, &schema.material);
        if material.is_none() {
            notices.push(Notice::MaterialMissing);
        }

        let customer = match find_exact(columns, &schema.customer) {
            Some(index) => Some(CustomerColumn {
                index,
                name: columns[index].clone(),
                fallback: false,
            }),
            None if columns.len() > 1 => {
                notices.push(Notice::CustomerFallback(columns[1].clone()));
                Some(CustomerColumn {
                    index: 1,
                    name: columns[1].clone(),
                    fallback: true,
                })
            }
            None => None,
        };

        let order_id = find_containing(columns, &schema.order_id);

        tracing::debug!(
            duration = ?duration.as_ref().map(|d| &d.name),
            start = ?start,
            end = ?end,
            pieces = ?pieces,
            "resolved column mapping"
        );

        ColumnMapping {
            duration,
            start,
            end,
            pieces,
            packaging,
            material,
            customer,
            order_id,
            notices,
        }
    }

    /// Both START and END were found.
    pub fn has_start_end(&self) -> bool {
        self.start.is_some() && self.end.is_some()
    }

    /// Field → detected column name, for the `columns` command and exports.
    pub fn describe(&self, table: &RawTable) -> Vec<(&'static str, Option<String>)> {
        let name = |index: Option<usize>| index.and_then(|i| table.column_name(i)).map(str::to_string);

        let mut fields = vec![
            ("Duration", self.duration.as_ref().map(|d| d.name.clone())),
            ("START", name(self.start)),
            ("END", name(self.end)),
            ("Pieces", name(self.pieces)),
            ("Material", name(self.material)),
            ("Customer", self.customer.as_ref().map(|c| c.name.clone())),
            ("Order", name(self.order_id)),
        ];
        for unit in [PackagingUnit::Pallets, PackagingUnit::Klts, PackagingUnit::Cartons] {
            let column = self.packaging.iter().find(|p| p.unit == unit).map(|p| p.name.clone());
            fields.push((unit.label(), column));
        }
        fields
    }
}

fn exported_columns(columns: &[String]) -> Option<[usize; 3]> {
    let mut found = [0; 3];
    for (slot, name) in found.iter_mut().zip(DERIVED_COLUMNS) {
        *slot = columns.iter().position(|c| c == name)?;
    }
    Some(found)
}

fn find_exact(columns: &[String], synonyms: &[String]) -> Option<usize> {
    synonyms
        .iter()
        .find_map(|synonym| columns.iter().position(|c| c.trim().eq_ignore_ascii_case(synonym.trim())))
}

fn find_containing(columns: &[String], synonyms: &[String]) -> Option<usize> {
    columns.iter().position(|column| matches_containing(column, synonyms))
}

fn matches_containing(column: &str, synonyms: &[String]) -> bool {
    let column = column.to_lowercase();
    synonyms.iter().any(|synonym| {
        let mut terms = synonym.split('+').map(|t| t.trim().to_lowercase()).filter(|t| !t.is_empty()).peekable();
        terms.peek().is_some() && terms.all(|term| column.contains(&term))
    })
}
