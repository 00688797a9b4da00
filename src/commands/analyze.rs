//! Prints the terminal dashboard for one order export.

use crate::{
    libs::{config::Config, messages::Message, pipeline::analyze_file, view::View},
    msg_print,
};
use anyhow::Result;
use clap::Args;
use std::path::PathBuf;

#[derive(Debug, Args)]
pub struct AnalyzeArgs {
    /// CSV or Excel file with order records
    file: PathBuf,

    /// Length of the material, customer and anomaly rankings
    #[arg(short, long)]
    top: Option<usize>,
}

pub fn cmd(args: AnalyzeArgs) -> Result<()> {
    let mut config = Config::read()?;
    if let Some(top) = args.top {
        let mut settings = config.analysis();
        settings.top_n = top;
        config.analysis = Some(settings);
    }

    msg_print!(Message::LoadingFile(args.file.display().to_string()));
    let analysis = analyze_file(&args.file, &config)?;
    View::dashboard(&analysis)?;

    Ok(())
}
