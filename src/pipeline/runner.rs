//! Pipeline orchestration: transform then load, timed, with a summary.
//!
//! Two modes: `run` over a fully materialized batch, and a bounded-memory
//! streaming mode that buffers fixed-size batches from a source.

use std::sync::Arc;
use std::time::Instant;

use serde::Serialize;
use tracing::{info, warn};
use uuid::Uuid;

use crate::app::ports::{AsyncRecordSource, RecordSink, RecordSource, StoragePort};
use crate::config::EtlConfig;
use crate::domain::{CanonicalRecord, RawRecord};
use crate::error::Result;
use crate::pipeline::load::{Loader, LoaderStats};
use crate::pipeline::processing::transform::{TransformStats, Transformer};

/// Flat, JSON-serializable summary of one pipeline run.
#[derive(Debug, Clone, Serialize)]
pub struct PipelineSummary {
    pub run_id: Uuid,
    pub input_count: usize,
    pub transformed_count: usize,
    pub loaded_count: usize,
    pub duration_seconds: f64,
    pub records_per_second: f64,
    pub transform_stats: TransformStats,
    pub loader_stats: LoaderStats,
}

fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

/// Sequences transform and load over a storage collaborator.
pub struct EtlPipeline {
    transformer: Transformer,
    loader: Loader,
    batch_size: usize,
}

impl EtlPipeline {
    /// Build a pipeline with the default lexicons and threshold tables.
    pub fn new(store: Arc<dyn StoragePort>, config: &EtlConfig) -> Self {
        Self::with_transformer(Transformer::default(), store, config)
    }

    /// Build a pipeline around a pre-configured transformer (substitute
    /// lexicons, custom thresholds).
    pub fn with_transformer(
        transformer: Transformer,
        store: Arc<dyn StoragePort>,
        config: &EtlConfig,
    ) -> Self {
        Self {
            transformer,
            loader: Loader::new(store),
            batch_size: config.pipeline.batch_size.max(1),
        }
    }

    /// Run the pipeline over a materialized batch of raw records.
    ///
    /// Malformed input never fails the run; data problems surface as error
    /// counts in the summary. Only a storage failure returns `Err`.
    pub async fn run(&mut self, records: &[RawRecord]) -> Result<PipelineSummary> {
        let run_id = Uuid::new_v4();
        let started = Instant::now();
        info!(%run_id, input = records.len(), "starting pipeline run");

        let transformed = self.transformer.transform(records);
        let loaded_count = self.loader.load(&transformed).await?;

        let duration = started.elapsed().as_secs_f64();
        let summary = PipelineSummary {
            run_id,
            input_count: records.len(),
            transformed_count: transformed.len(),
            loaded_count,
            duration_seconds: round2(duration),
            records_per_second: round2(records.len() as f64 / duration.max(0.001)),
            transform_stats: self.transformer.stats(),
            loader_stats: self.loader.stats(),
        };

        info!(%run_id, duration_seconds = summary.duration_seconds, "pipeline run completed");
        Ok(summary)
    }

    /// Begin a streaming run fed one record at a time.
    pub fn streaming(&mut self) -> StreamingRun<'_> {
        StreamingRun {
            pipeline: self,
            buffer: Vec::new(),
        }
    }

    /// Drive a blocking source through the pipeline in `batch_size` batches,
    /// delivering each canonical record to the sink as its batch completes.
    ///
    /// Single forward pass; bounded memory regardless of source length.
    pub async fn run_streaming<S>(
        &mut self,
        mut source: S,
        sink: &dyn RecordSink,
    ) -> Result<PipelineSummary>
    where
        S: RecordSource,
    {
        let run_id = Uuid::new_v4();
        let started = Instant::now();
        let loaded_before = self.loader.stats().loaded;
        let mut input_count = 0usize;
        let mut delivered = 0usize;

        let mut run = self.streaming();
        while let Some(record) = source.next_record() {
            input_count += 1;
            for canonical in run.feed(record).await? {
                sink.deliver(&canonical).await?;
                delivered += 1;
            }
        }
        for canonical in run.finish().await? {
            sink.deliver(&canonical).await?;
            delivered += 1;
        }

        Ok(self.streaming_summary(run_id, started, input_count, delivered, loaded_before))
    }

    /// Suspension-based twin of [`run_streaming`] for sources that await
    /// between records.
    pub async fn run_streaming_async<S>(
        &mut self,
        mut source: S,
        sink: &dyn RecordSink,
    ) -> Result<PipelineSummary>
    where
        S: AsyncRecordSource,
    {
        let run_id = Uuid::new_v4();
        let started = Instant::now();
        let loaded_before = self.loader.stats().loaded;
        let mut input_count = 0usize;
        let mut delivered = 0usize;

        let mut run = self.streaming();
        while let Some(record) = source.next_record().await {
            input_count += 1;
            for canonical in run.feed(record).await? {
                sink.deliver(&canonical).await?;
                delivered += 1;
            }
        }
        for canonical in run.finish().await? {
            sink.deliver(&canonical).await?;
            delivered += 1;
        }

        Ok(self.streaming_summary(run_id, started, input_count, delivered, loaded_before))
    }

    fn streaming_summary(
        &self,
        run_id: Uuid,
        started: Instant,
        input_count: usize,
        transformed_count: usize,
        loaded_before: u64,
    ) -> PipelineSummary {
        let duration = started.elapsed().as_secs_f64();
        let summary = PipelineSummary {
            run_id,
            input_count,
            transformed_count,
            // This run's contribution only; the loader's stats stay
            // cumulative across runs.
            loaded_count: (self.loader.stats().loaded - loaded_before) as usize,
            duration_seconds: round2(duration),
            records_per_second: round2(input_count as f64 / duration.max(0.001)),
            transform_stats: self.transformer.stats(),
            loader_stats: self.loader.stats(),
        };
        info!(%run_id, input = input_count, "streaming run completed");
        summary
    }
}

/// Single-writer buffer for a streaming run.
///
/// `feed` returns the transformed output of a batch whenever the buffer
/// fills; `finish` flushes the partial tail. Dropping a `StreamingRun`
/// without calling `finish` discards whatever is still buffered, so callers
/// that cancel mid-stream and want the tail must flush first.
pub struct StreamingRun<'a> {
    pipeline: &'a mut EtlPipeline,
    buffer: Vec<RawRecord>,
}

impl StreamingRun<'_> {
    /// Number of raw records currently buffered.
    pub fn buffered(&self) -> usize {
        self.buffer.len()
    }

    /// Add one raw record; transforms and loads the batch once full.
    pub async fn feed(&mut self, record: RawRecord) -> Result<Vec<CanonicalRecord>> {
        self.buffer.push(record);
        if self.buffer.len() >= self.pipeline.batch_size {
            self.flush().await
        } else {
            Ok(Vec::new())
        }
    }

    /// Flush the remaining partial batch and end the run.
    pub async fn finish(mut self) -> Result<Vec<CanonicalRecord>> {
        self.flush().await
    }

    async fn flush(&mut self) -> Result<Vec<CanonicalRecord>> {
        if self.buffer.is_empty() {
            return Ok(Vec::new());
        }

        let batch = std::mem::take(&mut self.buffer);
        let transformed = self.pipeline.transformer.transform(&batch);
        // A storage failure loses this batch's load but not the stream:
        // counted, logged, and the next batch proceeds.
        if let Err(e) = self.pipeline.loader.load(&transformed).await {
            warn!(error = %e, batch = transformed.len(), "batch load failed, continuing stream");
            self.pipeline.loader.note_load_failure();
        }
        Ok(transformed)
    }
}
