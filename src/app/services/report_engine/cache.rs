//! Memoised report payloads
//!
//! Payloads are keyed by dataset version and filter parameters. The session
//! clears the cache whenever a load or an edit bumps the version and whenever
//! the filters change, so it only ever holds payloads for the current state.

use super::assembler::ReportPayload;
use crate::app::services::filter_engine::FilterParams;
use std::collections::HashMap;
use std::sync::Arc;
use tracing::debug;

#[derive(Debug, Default)]
pub struct ReportCache {
    entries: HashMap<(u64, FilterParams), Arc<ReportPayload>>,
    hits: u64,
    misses: u64,
}

impl ReportCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// Return the cached payload or build and store it
    pub fn get_or_try_insert<F>(
        &mut self,
        version: u64,
        params: &FilterParams,
        build: F,
    ) -> crate::Result<Arc<ReportPayload>>
    where
        F: FnOnce() -> crate::Result<ReportPayload>,
    {
        let key = (version, params.clone());
        if let Some(payload) = self.entries.get(&key) {
            self.hits += 1;
            debug!("Report cache hit for dataset version {}", version);
            return Ok(Arc::clone(payload));
        }

        self.misses += 1;
        let payload = Arc::new(build()?);
        self.entries.insert(key, Arc::clone(&payload));
        Ok(payload)
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Hit rate as a percentage
    pub fn hit_rate(&self) -> f64 {
        let total = self.hits + self.misses;
        if total == 0 {
            0.0
        } else {
            (self.hits as f64 / total as f64) * 100.0
        }
    }
}
