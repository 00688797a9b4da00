use crate::{
    libs::{config::Config, messages::Message, schema::ColumnMapping, table::RawTable, view::View},
    msg_print,
};
use anyhow::Result;
use clap::Args;
use std::path::PathBuf;

#[derive(Debug, Args)]
pub struct ColumnsArgs {
    /// CSV or Excel file with order records
    file: PathBuf,
}

pub fn cmd(args: ColumnsArgs) -> Result<()> {
    let config = Config::read()?;
    let table = RawTable::load(&args.file)?;
    let mapping = ColumnMapping::resolve(&table, &config.schema(), config.analysis().min_cleaned_rows);

    msg_print!(Message::ColumnsHeader(args.file.display().to_string()), true);
    msg_print!(Message::FileLoaded(table.len(), table.columns().len()));
    View::mapping(&table, &mapping)?;

    for notice in &mapping.notices {
        notice.emit();
    }
    msg_print!(Message::DetectedColumns(table.columns().to_vec()));

    Ok(())
}
