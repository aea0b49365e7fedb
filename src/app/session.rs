//! Per-user session context
//!
//! A [`Session`] owns everything one user works with: the loaded dataset,
//! the current filters and the memoised report payloads. Engines never hold
//! state of their own; the session passes them an immutable snapshot.
//!
//! Every operation checks the user's role before doing any work. Failed
//! operations leave the session as it was.

use crate::app::models::{AuditRecord, Capability, CellEdit, Dataset, DateRange, Role};
use crate::app::services::dataset_loader::{LoadResult, LoadStats};
use crate::app::services::editor;
use crate::app::services::filter_engine::{
    self, FilterOptions, FilterParams, FilteredView, default_date_range, filter_options,
};
use crate::app::services::render::{
    AssistantSummary, RenderContext, ReportRenderer, export_csv,
};
use crate::app::services::report_engine::{ReportCache, ReportPayload, assemble};
use crate::config::ReportConfig;
use crate::{Error, Result};
use chrono::NaiveDateTime;
use std::io::Write;
use std::sync::Arc;
use tracing::{debug, info, warn};

/// What the dashboard shows for the current filters
#[derive(Debug, Clone)]
pub struct Dashboard {
    pub payload: Arc<ReportPayload>,
    pub options: FilterOptions,
    pub filters: FilterParams,
}

#[derive(Debug)]
pub struct Session {
    user: String,
    role: Role,
    config: ReportConfig,
    dataset: Option<Arc<Dataset>>,
    filters: FilterParams,
    version: u64,
    cache: ReportCache,
}

impl Session {
    pub fn new(user: impl Into<String>, role: Role, config: ReportConfig) -> Self {
        Self {
            user: user.into(),
            role,
            config,
            dataset: None,
            filters: FilterParams::all(),
            version: 0,
            cache: ReportCache::new(),
        }
    }

    pub fn user(&self) -> &str {
        &self.user
    }

    pub fn role(&self) -> Role {
        self.role
    }

    pub fn dataset(&self) -> Option<&Arc<Dataset>> {
        self.dataset.as_ref()
    }

    pub fn filters(&self) -> &FilterParams {
        &self.filters
    }

    /// Incremented on every load and every applied edit
    pub fn version(&self) -> u64 {
        self.version
    }

    pub fn cache(&self) -> &ReportCache {
        &self.cache
    }

    /// Fail with [`Error::AccessDenied`] unless the role grants `capability`
    pub fn require(&self, capability: Capability) -> Result<()> {
        if self.role.allows(capability) {
            Ok(())
        } else {
            warn!(
                "{} ({}) was denied: {}",
                self.user, self.role, capability
            );
            Err(Error::access_denied(self.role.to_string(), capability.to_string()))
        }
    }

    // =========================================================================
    // Dataset
    // =========================================================================

    /// Install a freshly loaded dataset
    ///
    /// On a load error the previous dataset and filters stay in place and the
    /// error is returned. On success the filters reset to the default window
    /// ending at the latest date.
    pub fn load_dataset(&mut self, result: Result<LoadResult>) -> Result<LoadStats> {
        self.require(Capability::ViewDashboard)?;
        let loaded = result.inspect_err(|e| {
            warn!("Dataset load failed, keeping the previous dataset: {}", e);
        })?;

        let dataset = Arc::new(loaded.dataset);
        self.filters = match default_date_range(&dataset, self.config.default_window_days) {
            Some(range) => FilterParams::all().with_date_range(range),
            None => FilterParams::all(),
        };
        self.install(dataset);

        info!(
            "Session for {} now holds dataset version {}",
            self.user, self.version
        );
        Ok(loaded.stats)
    }

    /// Default dashboard window of the loaded dataset
    pub fn default_date_range(&self) -> Option<DateRange> {
        self.dataset
            .as_deref()
            .and_then(|dataset| default_date_range(dataset, self.config.default_window_days))
    }

    fn install(&mut self, dataset: Arc<Dataset>) {
        self.dataset = Some(dataset);
        self.version += 1;
        self.cache.clear();
    }

    fn loaded(&self) -> Result<&Arc<Dataset>> {
        self.dataset.as_ref().ok_or(Error::NoDatasetLoaded)
    }

    // =========================================================================
    // Filtering
    // =========================================================================

    /// Replace the current filters; invalid parameters keep the old ones
    ///
    /// A change of filters drops every memoised payload.
    pub fn set_filters(&mut self, params: FilterParams) -> Result<()> {
        self.require(Capability::ViewDashboard)?;
        if let Some(range) = params.date_range {
            DateRange::new(range.start, range.end)?;
        }
        if params == self.filters {
            return Ok(());
        }
        debug!("Filters updated: {:?}", params);
        self.filters = params;
        self.cache.clear();
        Ok(())
    }

    /// Rows of the loaded dataset passing the current filters
    pub fn filtered_view(&self) -> Result<FilteredView> {
        self.require(Capability::ViewDashboard)?;
        filter_engine::filter(self.loaded()?, &self.filters)
    }

    // =========================================================================
    // Reports
    // =========================================================================

    fn payload_for(&mut self, params: FilterParams) -> Result<Arc<ReportPayload>> {
        let dataset = Arc::clone(self.loaded()?);
        let config = &self.config;
        self.cache.get_or_try_insert(self.version, &params, || {
            let view = filter_engine::filter(&dataset, &params)?;
            assemble(&view, config)
        })
    }

    /// KPI cards, insights and filter options for the current filters
    pub fn dashboard(&mut self) -> Result<Dashboard> {
        self.require(Capability::ViewDashboard)?;
        let filters = self.filters.clone();
        let payload = self.payload_for(filters.clone())?;
        let options = filter_options(self.loaded()?, filters.date_range);
        Ok(Dashboard {
            payload,
            options,
            filters,
        })
    }

    /// Report payload for the current filters, memoised until the dataset or
    /// the filters change
    pub fn report(&mut self) -> Result<Arc<ReportPayload>> {
        self.require(Capability::GenerateReport)?;
        self.payload_for(self.filters.clone())
    }

    /// Condensed summary of the whole dataset for the assistant
    pub fn assistant_summary(&mut self) -> Result<String> {
        self.require(Capability::UseAssistant)?;
        let payload = self.payload_for(FilterParams::all())?;
        AssistantSummary.render(&payload, &RenderContext::now(self.user.clone()))
    }

    /// Write the filtered rows as CSV; returns the number of rows written
    pub fn export<W: Write>(&self, writer: &mut W) -> Result<usize> {
        self.require(Capability::ExportData)?;
        let view = filter_engine::filter(self.loaded()?, &self.filters)?;
        export_csv(&view, writer)
    }

    // =========================================================================
    // Editing
    // =========================================================================

    /// Apply an edit batch and return the audit records for changed cells
    ///
    /// The dataset is replaced only when at least one cell changed. Writing
    /// the records to the audit log is up to the caller.
    pub fn apply_edits(
        &mut self,
        edits: &[CellEdit],
        timestamp: NaiveDateTime,
    ) -> Result<Vec<AuditRecord>> {
        self.require(Capability::EditData)?;
        let outcome = editor::apply_edits(self.loaded()?, edits, &self.user, timestamp)?;

        if outcome.has_changes() {
            self.install(Arc::new(outcome.dataset));
        }
        Ok(outcome.audit_records)
    }
}
