//! Delivery of canonical records to the storage collaborator.

use std::sync::Arc;

use serde::{Deserialize, Serialize};
use tracing::{info, warn};

use crate::app::ports::StoragePort;
use crate::domain::CanonicalRecord;
use crate::error::Result;

/// Cumulative load statistics across all calls on one loader.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct LoaderStats {
    pub loaded: u64,
    pub duplicates: u64,
    pub errors: u64,
}

/// A single record's failure in the validated load path.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoadError {
    pub post_id: String,
    pub error: String,
}

/// Per-record accounting from [`Loader::load_with_validation`].
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct LoadReport {
    pub success: Vec<String>,
    pub duplicates: Vec<String>,
    pub errors: Vec<LoadError>,
}

/// Hands canonical records to the storage port's upsert, keyed on
/// (`post_id`, `platform`).
pub struct Loader {
    store: Arc<dyn StoragePort>,
    stats: LoaderStats,
}

impl Loader {
    pub fn new(store: Arc<dyn StoragePort>) -> Self {
        Self {
            store,
            stats: LoaderStats::default(),
        }
    }

    /// Bulk path: one upsert call for the whole slice.
    ///
    /// A storage failure aborts this call only; the caller decides whether
    /// the run continues. Duplicates are absorbed by the upsert, so this path
    /// cannot distinguish them from inserts.
    pub async fn load(&mut self, records: &[CanonicalRecord]) -> Result<usize> {
        if records.is_empty() {
            return Ok(0);
        }

        let loaded = self.store.upsert_batch(records).await?;
        self.stats.loaded += loaded as u64;
        info!(loaded, "loaded records into storage");
        Ok(loaded)
    }

    /// Strict path with per-record accounting: validates identity, separates
    /// records already present, and captures individual insert failures
    /// instead of failing the whole call.
    ///
    /// Costs one extra storage round trip per record.
    pub async fn load_with_validation(&mut self, records: &[CanonicalRecord]) -> LoadReport {
        let mut report = LoadReport::default();

        for record in records {
            if record.post_id.is_empty() || record.platform.is_empty() {
                self.stats.errors += 1;
                report.errors.push(LoadError {
                    post_id: record.post_id.clone(),
                    error: "missing required fields (post_id, platform)".to_string(),
                });
                continue;
            }

            match self.store.exists(&record.post_id, &record.platform).await {
                Ok(true) => {
                    self.stats.duplicates += 1;
                    report.duplicates.push(record.post_id.clone());
                    continue;
                }
                Ok(false) => {}
                Err(e) => {
                    warn!(post_id = %record.post_id, error = %e, "existence check failed");
                    self.stats.errors += 1;
                    report.errors.push(LoadError {
                        post_id: record.post_id.clone(),
                        error: e.to_string(),
                    });
                    continue;
                }
            }

            match self.store.upsert_batch(std::slice::from_ref(record)).await {
                Ok(_) => {
                    self.stats.loaded += 1;
                    report.success.push(record.post_id.clone());
                }
                Err(e) => {
                    warn!(post_id = %record.post_id, error = %e, "insert failed");
                    self.stats.errors += 1;
                    report.errors.push(LoadError {
                        post_id: record.post_id.clone(),
                        error: e.to_string(),
                    });
                }
            }
        }

        report
    }

    /// Record a load call that failed wholesale, for callers that absorb
    /// the failure instead of propagating it.
    pub(crate) fn note_load_failure(&mut self) {
        self.stats.errors += 1;
    }

    /// Snapshot of the cumulative statistics.
    pub fn stats(&self) -> LoaderStats {
        self.stats
    }
}
