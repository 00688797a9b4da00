//! # lpa - Logistics Performance Analyzer
//!
//! Reads a CSV or Excel export of logistics orders, normalizes the many ways
//! order times are written into minutes, and reports how long orders take per
//! order, per piece, per material and per customer.
//!
//! ## Usage
//!
//! ```rust,no_run
//! use lpa::commands::Cli;
//!
//! fn main() -> anyhow::Result<()> {
//!     Cli::menu()
//! }
//! ```

pub mod commands;
pub mod libs;
