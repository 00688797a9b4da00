//! Command-line interface.
//!
//! | Command   | Purpose                                             |
//! |-----------|-----------------------------------------------------|
//! | `analyze` | Print the performance dashboard for an order export |
//! | `export`  | Write the report as Excel, CSV or JSON              |
//! | `columns` | Show which column was detected for each field       |
//! | `init`    | Edit the analysis settings interactively            |

pub mod analyze;
pub mod columns;
pub mod export;
pub mod init;

use anyhow::Result;
use clap::{Parser, Subcommand};

#[derive(Debug, Subcommand)]
enum Commands {
    #[command(about = "Analyze an order export and print the dashboard")]
    Analyze(analyze::AnalyzeArgs),
    #[command(about = "Export the analysis report")]
    Export(export::ExportArgs),
    #[command(about = "Show the detected column mapping")]
    Columns(columns::ColumnsArgs),
    #[command(about = "Configuration initialization")]
    Init(init::InitArgs),
}

#[derive(Debug, Parser)]
#[command(author, version, about, long_about = None)]
#[command(arg_required_else_help(true))]
pub struct Cli {
    #[command(subcommand)]
    command: Commands,
}

impl Cli {
    pub fn menu() -> Result<()> {
        let cli = Self::parse();
        match cli.command {
            Commands::Analyze(args) => analyze::cmd(args),
            Commands::Export(args) => export::cmd(args),
            Commands::Columns(args) => columns::cmd(args),
            Commands::Init(args) => init::cmd(args),
        }
    }
}
