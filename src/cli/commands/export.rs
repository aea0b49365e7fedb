//! Export command implementation

use super::shared::{apply_filters, open_session, write_output};
use crate::cli::args::{Args, ExportArgs};
use crate::config::Config;
use crate::Result;
use colored::*;

/// Write the filtered rows of the input file as CSV
pub async fn run_export(args: &Args, export_args: &ExportArgs, config: &Config) -> Result<()> {
    let mut session = open_session(args, config, &export_args.input).await?;
    apply_filters(&mut session, &export_args.filters)?;

    let mut buffer = Vec::new();
    let rows = session.export(&mut buffer)?;
    write_output(Some(&export_args.output), &buffer).await?;

    println!(
        "{} {} rows to {}",
        "Exported".bright_green().bold(),
        rows.to_string().bright_white().bold(),
        export_args.output.display()
    );
    Ok(())
}
