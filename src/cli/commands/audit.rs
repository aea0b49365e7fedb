//! Audit command implementation

use crate::app::services::audit_log::AuditLog;
use crate::app::services::render::table::Table;
use crate::cli::args::AuditArgs;
use crate::config::Config;
use crate::constants::AUDIT_TIMESTAMP_FORMAT;
use crate::Result;
use colored::*;

/// Print the audit log, newest first
pub async fn run_audit(audit_args: &AuditArgs, config: &Config) -> Result<()> {
    let audit_log = AuditLog::from_config(&config.audit);
    let records = audit_log.load().await?;

    if records.is_empty() {
        println!("{}", "No audit records.".dimmed());
        return Ok(());
    }

    let shown = audit_args.limit.unwrap_or(records.len()).min(records.len());
    let mut table = Table::new(["Timestamp", "User", "Row", "Column", "Old", "New"]);
    for record in records.iter().take(shown) {
        table.push_row(vec![
            record.timestamp.format(AUDIT_TIMESTAMP_FORMAT).to_string(),
            record.user.clone(),
            record.row_id.to_string(),
            record.column_name.clone(),
            record.old_value.clone(),
            record.new_value.clone(),
        ]);
    }

    println!(
        "{} ({} of {} records)",
        "Audit Log".bright_green().bold(),
        shown,
        records.len()
    );
    print!("{}", table.to_text());
    Ok(())
}
