//! Command implementations for the production reporter CLI
//!
//! Each command lives in its own module:
//! - `dashboard`: KPI cards, insights and filter options
//! - `report`: document, JSON and assistant summary output
//! - `export`: filtered rows as CSV
//! - `edit`: audited cell edits
//! - `audit`: audit log listing

pub mod audit;
pub mod dashboard;
pub mod edit;
pub mod export;
pub mod report;
pub mod shared;

use crate::Result;
use crate::cli::args::{Args, Commands};
use tracing::debug;

/// Main command runner
///
/// Loads configuration, sets up logging and dispatches to the subcommand
/// handler. Returns without doing anything when no subcommand was given.
pub async fn run(args: Args) -> Result<()> {
    let config = shared::load_configuration(&args)?;
    shared::setup_logging(&args, &config)?;
    debug!("Arguments: {:?}", args);

    let Some(command) = &args.command else {
        return Ok(());
    };

    match command {
        Commands::Dashboard(dashboard_args) => {
            dashboard::run_dashboard(&args, dashboard_args, &config).await
        }
        Commands::Report(report_args) => report::run_report(&args, report_args, &config).await,
        Commands::Export(export_args) => export::run_export(&args, export_args, &config).await,
        Commands::Edit(edit_args) => edit::run_edit(&args, edit_args, &config).await,
        Commands::Audit(audit_args) => audit::run_audit(audit_args, &config).await,
    }
}
