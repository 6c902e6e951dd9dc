//! Boundary traits for the collaborators the ETL core talks to.
//!
//! Source connectors, the analytical store, and any delivery target live
//! behind these ports; the core itself performs no I/O.

use crate::domain::{CanonicalRecord, RawRecord};
use crate::error::Result;
use async_trait::async_trait;

/// Storage collaborator accepting canonical records.
///
/// `upsert_batch` is keyed on (`post_id`, `platform`): insert when absent,
/// otherwise refresh only the mutable engagement counters (`likes`,
/// `comments`) and `scraped_at`. Everything else is immutable once inserted.
#[async_trait]
pub trait StoragePort: Send + Sync {
    async fn upsert_batch(&self, records: &[CanonicalRecord]) -> Result<usize>;

    /// Existence check used by the validated load path.
    async fn exists(&self, post_id: &str, platform: &str) -> Result<bool>;
}

/// Blocking source variant: a connector whose fetch completes without
/// suspension (in-memory buffers, files, channels drained synchronously).
pub trait RecordSource {
    fn next_record(&mut self) -> Option<RawRecord>;
}

/// Any iterator of raw records is a blocking source.
impl<I> RecordSource for I
where
    I: Iterator<Item = RawRecord>,
{
    fn next_record(&mut self) -> Option<RawRecord> {
        self.next()
    }
}

/// Suspension-based source variant: a connector that awaits between records
/// (paginated APIs, browser automation). Chosen at composition time; the
/// pipeline never introspects a source to guess which variant it is.
#[async_trait]
pub trait AsyncRecordSource: Send {
    async fn next_record(&mut self) -> Option<RawRecord>;
}

/// Receiver for canonical records as a streaming run emits them.
#[async_trait]
pub trait RecordSink: Send + Sync {
    async fn deliver(&self, record: &CanonicalRecord) -> Result<()>;
}
