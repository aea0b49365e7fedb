//! Configuration management and validation.
//!
//! Provides configuration structures for report thresholds and limits,
//! dataset loading rules, audit log location and logging, with a layered
//! loader (defaults, TOML file, environment, CLI overrides).

use crate::constants::{
    CONFIG_DIR_NAME, DEFAULT_AUDIT_LOG_FILE, DEFAULT_WINDOW_DAYS, EFFICIENCY_THRESHOLD,
    ENV_AUDIT_LOG, ENV_LOG_LEVEL, PRODUCTION_PEAKS, RECENT_DAYS, SHIFT_VARIABILITY_FACTOR,
    TEXT_BAR_WIDTH, TOP_DOWNTIME_REASONS, TOP_OPERATORS, TOP_PRODUCTS, TOP_WASTE_PRODUCTS,
    YIELD_THRESHOLD,
};
use crate::{Error, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tracing::debug;

/// Global configuration for the production reporter
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Report thresholds and section limits
    pub report: ReportConfig,

    /// Dataset loading rules
    pub loading: LoadingConfig,

    /// Audit log settings
    pub audit: AuditConfig,

    /// Logging settings
    pub logging: LoggingConfig,
}

/// Thresholds for recommendations and row limits for report sections
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ReportConfig {
    /// Efficiency below this recommends reviewing planning
    pub efficiency_threshold: f64,

    /// Material yield below this recommends investigating material loss
    pub yield_threshold: f64,

    /// Shift variability factor applied to the mean downtime per unit
    pub shift_variability_factor: f64,

    /// Default date window in calendar days
    pub default_window_days: u32,

    /// Rows in the top downtime reasons table
    pub top_downtime_reasons: usize,

    /// Most recent days in the daily trend table
    pub recent_days: usize,

    /// Days shown as production peaks
    pub production_peaks: usize,

    /// Rows in the product mix table
    pub top_products: usize,

    /// Rows in the operator performance table
    pub top_operators: usize,

    /// Rows in the quality and waste table
    pub top_waste_products: usize,

    /// Width of production peak text bars
    pub text_bar_width: usize,
}

impl Default for ReportConfig {
    fn default() -> Self {
        Self {
            efficiency_threshold: EFFICIENCY_THRESHOLD,
            yield_threshold: YIELD_THRESHOLD,
            shift_variability_factor: SHIFT_VARIABILITY_FACTOR,
            default_window_days: DEFAULT_WINDOW_DAYS,
            top_downtime_reasons: TOP_DOWNTIME_REASONS,
            recent_days: RECENT_DAYS,
            production_peaks: PRODUCTION_PEAKS,
            top_products: TOP_PRODUCTS,
            top_operators: TOP_OPERATORS,
            top_waste_products: TOP_WASTE_PRODUCTS,
            text_bar_width: TEXT_BAR_WIDTH,
        }
    }
}

/// Dataset loading rules
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LoadingConfig {
    /// Reject columns outside the production schema
    pub strict_columns: bool,
}

/// Audit log settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AuditConfig {
    /// Path of the append-only audit log CSV
    pub log_path: PathBuf,
}

impl Default for AuditConfig {
    fn default() -> Self {
        Self {
            log_path: PathBuf::from(DEFAULT_AUDIT_LOG_FILE),
        }
    }
}

/// Logging settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// Default level when `RUST_LOG` is not set
    pub level: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "warn".to_string(),
        }
    }
}

impl Config {
    /// Default configuration file location (`<config_dir>/production-reporter/config.toml`)
    pub fn default_config_path() -> Result<PathBuf> {
        let config_dir = dirs::config_dir()
            .ok_or_else(|| Error::configuration("Could not determine user config directory"))?;
        Ok(config_dir.join(CONFIG_DIR_NAME).join("config.toml"))
    }

    /// Parse configuration from TOML text; missing keys keep their defaults
    pub fn from_toml_str(content: &str) -> Result<Self> {
        toml::from_str(content)
            .map_err(|e| Error::configuration(format!("Invalid configuration file: {}", e)))
    }

    /// Load configuration from a TOML file
    pub fn from_file(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path).map_err(|e| {
            Error::io(
                format!("Failed to read configuration file '{}'", path.display()),
                e,
            )
        })?;
        Self::from_toml_str(&content)
    }

    /// Load configuration using the layered approach (defaults -> file -> env)
    ///
    /// An explicitly named file must exist; the default location is only used
    /// when present.
    pub fn load_layered(config_file: Option<&Path>) -> Result<Self> {
        let mut config = match config_file {
            Some(path) => {
                debug!("Loading configuration from {}", path.display());
                Self::from_file(path)?
            }
            None => match Self::default_config_path() {
                Ok(path) if path.exists() => {
                    debug!("Loading configuration from {}", path.display());
                    Self::from_file(&path)?
                }
                _ => {
                    debug!("No configuration file found, using defaults");
                    Self::default()
                }
            },
        };

        config.apply_env_overrides(|key| std::env::var(key).ok());
        config.validate()?;
        Ok(config)
    }

    /// Apply environment overrides using the given variable lookup
    pub fn apply_env_overrides<F>(&mut self, lookup: F)
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(path) = lookup(ENV_AUDIT_LOG).filter(|v| !v.trim().is_empty()) {
            debug!("Audit log path overridden by {}", ENV_AUDIT_LOG);
            self.audit.log_path = PathBuf::from(path);
        }
        if let Some(level) = lookup(ENV_LOG_LEVEL).filter(|v| !v.trim().is_empty()) {
            debug!("Log level overridden by {}", ENV_LOG_LEVEL);
            self.logging.level = level.trim().to_lowercase();
        }
    }

    /// Validate configuration values
    pub fn validate(&self) -> Result<()> {
        let report = &self.report;

        for (name, value) in [
            ("efficiency_threshold", report.efficiency_threshold),
            ("yield_threshold", report.yield_threshold),
        ] {
            if !value.is_finite() || !(0.0..=1.0).contains(&value) {
                return Err(Error::configuration(format!(
                    "{} must be between 0 and 1, got {}",
                    name, value
                )));
            }
        }

        if !report.shift_variability_factor.is_finite() || report.shift_variability_factor < 1.0 {
            return Err(Error::configuration(format!(
                "shift_variability_factor must be at least 1.0, got {}",
                report.shift_variability_factor
            )));
        }

        if report.default_window_days == 0 {
            return Err(Error::configuration(
                "default_window_days must be greater than 0",
            ));
        }

        let limits = [
            ("top_downtime_reasons", report.top_downtime_reasons),
            ("recent_days", report.recent_days),
            ("production_peaks", report.production_peaks),
            ("top_products", report.top_products),
            ("top_operators", report.top_operators),
            ("top_waste_products", report.top_waste_products),
            ("text_bar_width", report.text_bar_width),
        ];
        if let Some((name, _)) = limits.iter().find(|(_, value)| *value == 0) {
            return Err(Error::configuration(format!(
                "{} must be greater than 0",
                name
            )));
        }

        const LEVELS: &[&str] = &["error", "warn", "info", "debug", "trace"];
        if !LEVELS.contains(&self.logging.level.as_str()) {
            return Err(Error::configuration(format!(
                "Unknown log level '{}'. Expected one of: {}",
                self.logging.level,
                LEVELS.join(", ")
            )));
        }

        if self.audit.log_path.as_os_str().is_empty() {
            return Err(Error::configuration("Audit log path cannot be empty"));
        }

        Ok(())
    }
}
