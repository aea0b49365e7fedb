//! Command-line argument definitions for the production reporter
//!
//! This module defines the complete CLI interface using the clap derive API.
//! Global options (configuration, verbosity, user and role) apply to every
//! subcommand; the data commands share a common set of filter arguments.

use crate::app::models::{Column, DateRange, Role};
use crate::app::services::filter_engine::FilterParams;
use crate::{Error, Result};
use chrono::NaiveDate;
use clap::{Parser, Subcommand, ValueEnum};
use std::collections::BTreeSet;
use std::path::PathBuf;

/// CLI arguments for the production reporter
///
/// Turns factory production CSV files into dashboards, paginated reports,
/// filtered exports and audited edits.
#[derive(Debug, Clone, Parser)]
#[command(
    name = "production-reporter",
    version,
    about = "Production KPIs, reports and audited edits from factory CSV data",
    long_about = "Loads a production CSV (one row per production run), applies date and \
                  category filters, and computes KPIs, aggregations, insights and \
                  recommendations. Results are shown as dashboard cards, written as a \
                  paginated report document, JSON or an assistant summary, or exported \
                  as CSV. Cell edits are recorded in an append-only audit log."
)]
pub struct Args {
    #[command(subcommand)]
    pub command: Option<Commands>,

    /// Path to configuration file
    ///
    /// TOML configuration file for thresholds and limits. If not specified,
    /// looks for <config_dir>/production-reporter/config.toml
    #[arg(
        short = 'c',
        long = "config",
        value_name = "FILE",
        global = true,
        help = "Path to configuration file (TOML format)"
    )]
    pub config_file: Option<PathBuf>,

    /// Logging verbosity level
    #[arg(
        short = 'v',
        long = "verbose",
        action = clap::ArgAction::Count,
        global = true,
        help = "Increase logging verbosity (-v: info, -vv: debug, -vvv: trace)"
    )]
    pub verbose: u8,

    /// Suppress output (quiet mode)
    ///
    /// Only show errors. Overrides verbose settings.
    #[arg(
        short = 'q',
        long = "quiet",
        global = true,
        help = "Only show errors"
    )]
    pub quiet: bool,

    /// Name recorded in audit records and on generated reports
    #[arg(
        short = 'u',
        long = "user",
        value_name = "NAME",
        global = true,
        default_value = "local",
        help = "User name for audit records and report headers"
    )]
    pub user: String,

    /// Role that gates the available operations
    #[arg(
        short = 'r',
        long = "role",
        value_name = "ROLE",
        global = true,
        default_value = "viewer",
        help = "Role: viewer, analyst or admin"
    )]
    pub role: Role,

    /// Audit log location, overriding configuration and environment
    #[arg(
        long = "audit-log",
        value_name = "FILE",
        global = true,
        help = "Path of the audit log CSV"
    )]
    pub audit_log: Option<PathBuf>,
}

/// Available subcommands
#[derive(Debug, Clone, Subcommand)]
pub enum Commands {
    /// Show KPI cards, insights and filter options
    Dashboard(DashboardArgs),
    /// Generate the report as a document, JSON or assistant summary
    Report(ReportArgs),
    /// Export the filtered rows as CSV
    Export(ExportArgs),
    /// Edit one cell and record it in the audit log
    Edit(EditArgs),
    /// Show the audit log, newest first
    Audit(AuditArgs),
}

/// Filters shared by the data commands
#[derive(Debug, Clone, Default, clap::Args)]
pub struct FilterArgs {
    /// First date to include (YYYY-MM-DD)
    #[arg(long = "from", value_name = "DATE")]
    pub from: Option<NaiveDate>,

    /// Last date to include (YYYY-MM-DD)
    #[arg(long = "to", value_name = "DATE")]
    pub to: Option<NaiveDate>,

    /// Use the whole date range instead of the default window
    #[arg(long = "all-dates", conflicts_with_all = ["from", "to"])]
    pub all_dates: bool,

    /// Shift codes to include
    #[arg(long = "shift", value_name = "SHIFT", value_delimiter = ',')]
    pub shifts: Vec<String>,

    /// Product names to include
    #[arg(long = "product", value_name = "NAME", value_delimiter = ',')]
    pub products: Vec<String>,

    /// Machine operator ids to include
    #[arg(long = "operator", value_name = "ID", value_delimiter = ',')]
    pub operators: Vec<String>,

    /// Downtime reasons to include ("nan" selects rows without a reason)
    #[arg(long = "reason", value_name = "REASON", value_delimiter = ',')]
    pub reasons: Vec<String>,
}

#[derive(Debug, Clone, Parser)]
pub struct DashboardArgs {
    /// Production CSV file
    #[arg(value_name = "CSV")]
    pub input: PathBuf,

    #[command(flatten)]
    pub filters: FilterArgs,
}

/// Report output formats
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum ReportFormat {
    /// Paginated report document
    Document,
    /// Report payload as JSON
    Json,
    /// Condensed summary of the whole dataset for the assistant
    Summary,
}

#[derive(Debug, Clone, Parser)]
pub struct ReportArgs {
    /// Production CSV file
    #[arg(value_name = "CSV")]
    pub input: PathBuf,

    #[command(flatten)]
    pub filters: FilterArgs,

    #[arg(
        short = 'f',
        long = "format",
        value_enum,
        default_value = "document",
        help = "Output format"
    )]
    pub format: ReportFormat,

    /// Encode the document as Latin-1; unsupported characters fail the report
    #[arg(long = "latin1")]
    pub latin1: bool,

    /// Output file (stdout when omitted)
    #[arg(short = 'o', long = "output", value_name = "FILE")]
    pub output: Option<PathBuf>,
}

#[derive(Debug, Clone, Parser)]
pub struct ExportArgs {
    /// Production CSV file
    #[arg(value_name = "CSV")]
    pub input: PathBuf,

    #[command(flatten)]
    pub filters: FilterArgs,

    /// Output CSV file
    #[arg(short = 'o', long = "output", value_name = "FILE")]
    pub output: PathBuf,
}

#[derive(Debug, Clone, Parser)]
pub struct EditArgs {
    /// Production CSV file
    #[arg(value_name = "CSV")]
    pub input: PathBuf,

    /// Row_ID of the record to change
    #[arg(long = "row", value_name = "ID")]
    pub row: usize,

    /// Column to change
    #[arg(long = "column", value_name = "NAME")]
    pub column: Column,

    /// New value
    #[arg(long = "value", value_name = "VALUE", allow_hyphen_values = true)]
    pub value: String,

    /// Where to write the updated dataset (defaults to the input file)
    #[arg(short = 'o', long = "output", value_name = "FILE")]
    pub output: Option<PathBuf>,
}

#[derive(Debug, Clone, Parser)]
pub struct AuditArgs {
    /// Show only the most recent records
    #[arg(short = 'n', long = "limit", value_name = "COUNT")]
    pub limit: Option<usize>,
}

impl Args {
    /// Log level from the verbosity flags
    pub fn get_log_level(&self) -> &'static str {
        if self.quiet {
            "error"
        } else {
            match self.verbose {
                0 => "warn",
                1 => "info",
                2 => "debug",
                _ => "trace",
            }
        }
    }
}

impl FilterArgs {
    /// Build filter parameters
    ///
    /// Without `--from`/`--to` the `window` applies. A single bound is paired
    /// with the matching end of `bounds`, the dataset's full date range.
    pub fn to_params(
        &self,
        window: Option<DateRange>,
        bounds: Option<DateRange>,
    ) -> Result<FilterParams> {
        let date_range = if self.all_dates {
            None
        } else {
            match (self.from, self.to) {
                (None, None) => window,
                (Some(start), Some(end)) => Some(DateRange::new(start, end)?),
                (Some(start), None) => {
                    let end = bounds.map_or(start, |b| b.end.max(start));
                    Some(DateRange::new(start, end)?)
                }
                (None, Some(end)) => {
                    let start = bounds.map_or(end, |b| b.start.min(end));
                    Some(DateRange::new(start, end)?)
                }
            }
        };

        Ok(FilterParams {
            date_range,
            shifts: selection(&self.shifts)?,
            products: selection(&self.products)?,
            operators: selection(&self.operators)?,
            downtime_reasons: selection(&self.reasons)?,
        })
    }
}

/// An empty list means no restriction
fn selection(values: &[String]) -> Result<Option<BTreeSet<String>>> {
    if values.is_empty() {
        return Ok(None);
    }
    let set: BTreeSet<String> = values
        .iter()
        .map(|v| v.trim())
        .filter(|v| !v.is_empty())
        .map(str::to_string)
        .collect();
    if set.is_empty() {
        return Err(Error::invalid_filter("empty selection"));
    }
    Ok(Some(set))
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn date(day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 3, day).unwrap()
    }

    fn bounds() -> Option<DateRange> {
        Some(DateRange::new(date(1), date(20)).unwrap())
    }

    #[test]
    fn test_global_options() {
        let args = Args::try_parse_from([
            "production-reporter",
            "report",
            "data.csv",
            "--role",
            "Analyst",
            "-vv",
            "--user",
            "dana",
        ])
        .unwrap();

        assert_eq!(args.role, Role::Analyst);
        assert_eq!(args.user, "dana");
        assert_eq!(args.get_log_level(), "debug");
        match args.command {
            Some(Commands::Report(report)) => {
                assert_eq!(report.format, ReportFormat::Document);
                assert!(!report.latin1);
                assert_eq!(report.input, PathBuf::from("data.csv"));
            }
            other => panic!("unexpected command: {:?}", other),
        }
    }

    #[test]
    fn test_defaults_and_quiet() {
        let args = Args::try_parse_from(["production-reporter", "audit", "-q", "-vvv"]).unwrap();
        assert_eq!(args.role, Role::Viewer);
        assert_eq!(args.user, "local");
        assert_eq!(args.get_log_level(), "error");
    }

    #[test]
    fn test_unknown_role_rejected() {
        let result = Args::try_parse_from(["production-reporter", "--role", "owner", "audit"]);
        assert!(result.is_err());
    }

    #[test]
    fn test_edit_args() {
        let args = Args::try_parse_from([
            "production-reporter",
            "edit",
            "data.csv",
            "--row",
            "3",
            "--column",
            "Waste_Weight_kg",
            "--value",
            "4.5",
        ])
        .unwrap();

        match args.command {
            Some(Commands::Edit(edit)) => {
                assert_eq!(edit.row, 3);
                assert_eq!(edit.column, Column::WasteWeightKg);
                assert_eq!(edit.value, "4.5");
                assert_eq!(edit.output, None);
            }
            other => panic!("unexpected command: {:?}", other),
        }

        let bad_column = Args::try_parse_from([
            "production-reporter",
            "edit",
            "data.csv",
            "--row",
            "3",
            "--column",
            "waste",
            "--value",
            "4.5",
        ]);
        assert!(bad_column.is_err());
    }

    #[test]
    fn test_filter_lists_repeatable_and_comma_separated() {
        let args = Args::try_parse_from([
            "production-reporter",
            "dashboard",
            "data.csv",
            "--shift",
            "A,B",
            "--shift",
            "C",
            "--reason",
            "nan",
        ])
        .unwrap();

        let Some(Commands::Dashboard(dashboard)) = args.command else {
            panic!("expected dashboard");
        };
        let params = dashboard.filters.to_params(None, bounds()).unwrap();
        assert_eq!(
            params.shifts,
            Some(["A", "B", "C"].into_iter().map(String::from).collect())
        );
        assert_eq!(
            params.downtime_reasons,
            Some(["nan"].into_iter().map(String::from).collect())
        );
        assert_eq!(params.products, None);
    }

    #[test]
    fn test_date_bounds() {
        let window = Some(DateRange::new(date(14), date(20)).unwrap());

        let none = FilterArgs::default();
        assert_eq!(none.to_params(window, bounds()).unwrap().date_range, window);

        let all = FilterArgs {
            all_dates: true,
            ..FilterArgs::default()
        };
        assert_eq!(all.to_params(window, bounds()).unwrap().date_range, None);

        let from = FilterArgs {
            from: Some(date(5)),
            ..FilterArgs::default()
        };
        assert_eq!(
            from.to_params(window, bounds()).unwrap().date_range,
            Some(DateRange::new(date(5), date(20)).unwrap())
        );

        let to = FilterArgs {
            to: Some(date(10)),
            ..FilterArgs::default()
        };
        assert_eq!(
            to.to_params(window, bounds()).unwrap().date_range,
            Some(DateRange::new(date(1), date(10)).unwrap())
        );
    }

    #[test]
    fn test_inverted_dates_rejected() {
        let args = FilterArgs {
            from: Some(date(10)),
            to: Some(date(2)),
            ..FilterArgs::default()
        };
        assert!(matches!(
            args.to_params(None, bounds()).unwrap_err(),
            Error::InvalidFilter { .. }
        ));
    }
}
