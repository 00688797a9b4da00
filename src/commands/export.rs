//! Report export command.
//!
//! Runs the same analysis as `analyze` and writes it to a file instead of the
//! terminal. Without `--output` the file lands in the working directory as
//! `Logistics_Analysis_v<version>.<ext>`.

use crate::libs::{
    config::Config,
    export::{ExportFormat, Exporter},
    pipeline::analyze_file,
};
use anyhow::Result;
use clap::Args;
use std::path::PathBuf;

#[derive(Debug, Args)]
pub struct ExportArgs {
    /// CSV or Excel file with order records
    file: PathBuf,

    #[arg(short, long, value_enum, default_value = "excel")]
    format: ExportFormat,

    #[arg(short, long)]
    output: Option<PathBuf>,
}

pub fn cmd(args: ExportArgs) -> Result<()> {
    let config = Config::read()?;
    let analysis = analyze_file(&args.file, &config)?;

    let exporter = Exporter::new(args.format, args.output);
    exporter.export(&analysis)?;

    Ok(())
}
