//! Batch application of the record normalizer with cumulative statistics.

use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::domain::{CanonicalRecord, RawRecord, SentimentLabel};
use crate::pipeline::processing::normalize::RecordNormalizer;

/// Running sentiment distribution across everything a transformer has seen.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct SentimentTally {
    pub positive: u64,
    pub negative: u64,
    pub neutral: u64,
}

impl SentimentTally {
    fn record(&mut self, label: SentimentLabel) {
        match label {
            SentimentLabel::Positive => self.positive += 1,
            SentimentLabel::Negative => self.negative += 1,
            SentimentLabel::Neutral => self.neutral += 1,
        }
    }
}

/// Cumulative transform statistics, carried across batches so a long-lived
/// transformer can feed one accumulator in streaming use.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct TransformStats {
    pub processed: u64,
    pub errors: u64,
    pub sentiment: SentimentTally,
}

/// Applies the record normalizer across batches.
///
/// A malformed record is dropped and counted; it never aborts the batch.
#[derive(Debug, Default)]
pub struct Transformer {
    normalizer: RecordNormalizer,
    stats: TransformStats,
}

impl Transformer {
    pub fn new(normalizer: RecordNormalizer) -> Self {
        Self {
            normalizer,
            stats: TransformStats::default(),
        }
    }

    /// Transform a batch of raw records into canonical records.
    pub fn transform(&mut self, records: &[RawRecord]) -> Vec<CanonicalRecord> {
        let mut transformed = Vec::with_capacity(records.len());

        for raw in records {
            match self.normalizer.normalize(raw) {
                Ok(record) => {
                    self.stats.processed += 1;
                    self.stats.sentiment.record(record.sentiment_label);
                    transformed.push(record);
                }
                Err(reason) => {
                    let post_id = raw.get("post_id").and_then(|v| v.as_str()).unwrap_or("?");
                    warn!(%post_id, %reason, "dropping record");
                    self.stats.errors += 1;
                }
            }
        }

        debug!(
            transformed = transformed.len(),
            errors = self.stats.errors,
            "transformed batch"
        );
        transformed
    }

    /// Snapshot of the cumulative statistics.
    pub fn stats(&self) -> TransformStats {
        self.stats
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn bad_record_dropped_batch_continues() {
        let mut transformer = Transformer::default();
        let batch = vec![
            json!({"post_id": "a", "platform": "reddit", "post_text": "great stuff"}),
            json!({"platform": "reddit", "post_text": "no id here"}),
            json!({"post_id": "b", "platform": "reddit", "post_text": "awful stuff"}),
        ];

        let out = transformer.transform(&batch);
        assert_eq!(out.len(), 2);
        let stats = transformer.stats();
        assert_eq!(stats.processed, 2);
        assert_eq!(stats.errors, 1);
        assert_eq!(stats.sentiment.positive, 1);
        assert_eq!(stats.sentiment.negative, 1);
        assert_eq!(stats.sentiment.neutral, 0);
    }

    #[test]
    fn stats_accumulate_across_batches() {
        let mut transformer = Transformer::default();
        let batch = vec![json!({"post_id": "a", "platform": "twitter"})];
        transformer.transform(&batch);
        transformer.transform(&batch);
        assert_eq!(transformer.stats().processed, 2);
    }

    #[test]
    fn empty_batch_is_fine() {
        let mut transformer = Transformer::default();
        assert!(transformer.transform(&[]).is_empty());
        assert_eq!(transformer.stats(), TransformStats::default());
    }
}
