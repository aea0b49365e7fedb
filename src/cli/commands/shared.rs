//! Shared components for CLI commands
//!
//! Logging setup, layered configuration, session creation and output
//! helpers used by every command implementation.

use crate::app::models::DateRange;
use crate::app::services::dataset_loader::DatasetLoader;
use crate::app::session::Session;
use crate::cli::args::{Args, FilterArgs};
use crate::config::Config;
use crate::{Error, Result};
use std::io::Write;
use std::path::Path;
use tracing::{debug, info};

/// Set up structured logging on stderr
///
/// `RUST_LOG` wins; otherwise the verbosity flags pick the level, falling
/// back to the configured level when no flag is given.
pub fn setup_logging(args: &Args, config: &Config) -> Result<()> {
    use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

    let log_level = if args.verbose == 0 && !args.quiet {
        config.logging.level.as_str()
    } else {
        args.get_log_level()
    };

    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(format!("production_reporter={}", log_level)));

    let result = if args.quiet {
        tracing_subscriber::registry()
            .with(filter)
            .with(
                fmt::layer()
                    .with_target(false)
                    .with_level(true)
                    .with_writer(std::io::stderr)
                    .compact(),
            )
            .try_init()
    } else {
        tracing_subscriber::registry()
            .with(filter)
            .with(
                fmt::layer()
                    .with_target(false)
                    .with_level(true)
                    .with_timer(fmt::time::uptime())
                    .with_writer(std::io::stderr),
            )
            .try_init()
    };
    result.map_err(|e| Error::configuration(format!("Failed to initialise logging: {}", e)))?;

    debug!("Logging initialized at level: {}", log_level);
    Ok(())
}

/// Load configuration using the layered approach (defaults -> file -> env -> args)
pub fn load_configuration(args: &Args) -> Result<Config> {
    let mut config = Config::load_layered(args.config_file.as_deref())?;
    apply_cli_overrides(&mut config, args);
    config.validate()?;
    Ok(config)
}

/// Apply CLI argument overrides to configuration
pub fn apply_cli_overrides(config: &mut Config, args: &Args) {
    if let Some(path) = &args.audit_log {
        config.audit.log_path = path.clone();
    }
}

/// Create a session for the CLI user and load the dataset into it
pub async fn open_session(args: &Args, config: &Config, input: &Path) -> Result<Session> {
    let mut session = Session::new(args.user.clone(), args.role, config.report.clone());
    let loader = DatasetLoader::from_config(&config.loading);

    let stats = session.load_dataset(loader.load_file(input).await)?;
    info!(
        "Loaded {} rows from {} in {:.2?}",
        stats.rows,
        input.display(),
        stats.elapsed
    );
    Ok(session)
}

/// Apply the command-line filters to the session
pub fn apply_filters(session: &mut Session, filters: &FilterArgs) -> Result<()> {
    let bounds = session.dataset().and_then(|dataset| {
        let start = dataset.min_date()?;
        let end = dataset.max_date()?;
        Some(DateRange { start, end })
    });
    let params = filters.to_params(session.default_date_range(), bounds)?;
    session.set_filters(params)
}

/// Write bytes to a file, or to stdout when no path is given
pub async fn write_output(path: Option<&Path>, bytes: &[u8]) -> Result<()> {
    match path {
        Some(path) => {
            tokio::fs::write(path, bytes)
                .await
                .map_err(|e| Error::io(format!("Failed to write {}", path.display()), e))?;
            info!("Wrote {} bytes to {}", bytes.len(), path.display());
        }
        None => {
            let mut stdout = std::io::stdout().lock();
            stdout
                .write_all(bytes)
                .and_then(|_| stdout.flush())
                .map_err(|e| Error::io("Failed to write to stdout", e))?;
        }
    }
    Ok(())
}

/// Human-readable summary of the active date range
pub fn describe_range(range: Option<DateRange>) -> String {
    match range {
        Some(range) => format!("{} ({} days)", range, range.days()),
        None => "all dates".to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    #[test]
    fn test_describe_range() {
        let range = DateRange::new(
            NaiveDate::from_ymd_opt(2024, 3, 1).unwrap(),
            NaiveDate::from_ymd_opt(2024, 3, 7).unwrap(),
        )
        .unwrap();
        assert_eq!(describe_range(Some(range)), "2024-03-01 to 2024-03-07 (7 days)");
        assert_eq!(describe_range(None), "all dates");
    }

    #[test]
    fn test_cli_audit_log_override() {
        use clap::Parser;

        let args = Args::try_parse_from([
            "production-reporter",
            "--audit-log",
            "/tmp/edits.csv",
            "audit",
        ])
        .unwrap();
        let mut config = Config::default();
        apply_cli_overrides(&mut config, &args);
        assert_eq!(config.audit.log_path, std::path::PathBuf::from("/tmp/edits.csv"));
    }
}
