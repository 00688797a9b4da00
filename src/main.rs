use lpa::commands::Cli;
use lpa::libs::error::AnalysisError;
use lpa::libs::messages::{macros::is_debug_mode, Message};
use lpa::libs::schema::Notice;
use lpa::{msg_error, msg_info, msg_print};
use std::process::ExitCode;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

fn main() -> ExitCode {
    if is_debug_mode() {
        let filter = tracing_subscriber::EnvFilter::try_from_default_env()
            .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("lpa=debug"));

        tracing_subscriber::registry()
            .with(filter)
            .with(tracing_subscriber::fmt::layer())
            .init();
    }

    match Cli::menu() {
        Ok(()) => ExitCode::SUCCESS,
        Err(error) => {
            match error.downcast_ref::<AnalysisError>() {
                Some(AnalysisError::NoUsableRows {
                    columns,
                    expected,
                    notices,
                }) => {
                    msg_error!(Message::NoUsableRows);
                    for notice in notices.iter().filter(|n| n.is_warning()) {
                        notice.emit();
                    }
                    if !notices.iter().any(|n| matches!(n, Notice::NoDurationSource { .. })) {
                        msg_info!(Message::CheckDurationColumns(expected.clone()));
                    }
                    msg_print!(Message::DetectedColumns(columns.clone()));
                }
                _ => {
                    msg_error!(Message::CriticalError(format!("{:#}", error)));
                    msg_print!(Message::ReportIssueHint);
                }
            }
            ExitCode::FAILURE
        }
    }
}
