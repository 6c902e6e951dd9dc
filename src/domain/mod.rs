use serde::{Deserialize, Serialize};

/// Raw post data as produced by an external source connector.
///
/// Untrusted and loosely shaped: only `post_id` and `platform` are
/// load-bearing, every other field may be absent, empty, or the wrong type.
pub type RawRecord = serde_json::Value;

/// Three-way sentiment label derived by the lexicon estimator.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SentimentLabel {
    Positive,
    Negative,
    Neutral,
}

impl SentimentLabel {
    pub fn as_str(&self) -> &'static str {
        match self {
            SentimentLabel::Positive => "positive",
            SentimentLabel::Negative => "negative",
            SentimentLabel::Neutral => "neutral",
        }
    }
}

impl std::fmt::Display for SentimentLabel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Ordinal engagement tier derived from likes/comments against platform norms.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EngagementLevel {
    Low,
    Medium,
    High,
    Viral,
}

impl EngagementLevel {
    pub fn as_str(&self) -> &'static str {
        match self {
            EngagementLevel::Low => "low",
            EngagementLevel::Medium => "medium",
            EngagementLevel::High => "high",
            EngagementLevel::Viral => "viral",
        }
    }
}

impl std::fmt::Display for EngagementLevel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A fully normalized, labeled post ready for storage.
///
/// Produced once by the record normalizer and consumed once by the loader.
/// After normalization every numeric field is non-negative and both labels
/// are always set; (`post_id`, `platform`) is the uniqueness key downstream.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CanonicalRecord {
    // Identity
    pub post_id: String,
    pub platform: String,

    // Content
    pub post_text: String,
    /// Comma-joined, lower-cased hashtag list. Order-preserving and
    /// intentionally not de-duplicated.
    pub hashtags: String,
    pub word_count: usize,
    pub mention_count: usize,
    pub url_count: usize,
    pub has_media: bool,

    // Engagement counters
    pub likes: i64,
    pub comments: i64,
    pub retweet_count: i64,
    pub view_count: i64,
    pub upvote_ratio: f64,

    // Source passthrough
    pub author: Option<String>,
    pub url: Option<String>,
    pub image_url: Option<String>,
    pub subreddit: Option<String>,
    pub duration: Option<String>,
    pub channel_id: Option<String>,

    // Temporal
    /// ISO-8601 when the source value parsed, the original string when it
    /// did not, `None` when absent. Consumers must tolerate the non-ISO case.
    pub timestamp: Option<String>,
    pub scraped_at: Option<String>,
    pub processed_at: String,

    // Derived labels
    pub sentiment_label: SentimentLabel,
    pub engagement_level: EngagementLevel,
}

impl CanonicalRecord {
    /// Uniqueness key used by the storage collaborator's upsert.
    pub fn key(&self) -> (String, String) {
        (self.post_id.clone(), self.platform.clone())
    }
}
