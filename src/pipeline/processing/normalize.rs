//! Per-record normalization: validate identity, clean text, coerce numerics
//! and timestamps, derive labels and counts.
//!
//! Every step after identity validation is individually defensive; a garbage
//! value in one field falls back to a documented default instead of failing
//! the record.

use chrono::{DateTime, NaiveDateTime, Utc};
use serde_json::{Map, Value};

use crate::domain::{CanonicalRecord, RawRecord};
use crate::pipeline::processing::engagement::EngagementClassifier;
use crate::pipeline::processing::sentiment::SentimentEstimator;
use crate::pipeline::processing::text;

/// Why a raw record was dropped instead of normalized.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RejectReason {
    /// `post_id` absent, empty, or not representable as a string.
    MissingPostId,
    /// The raw value was not a JSON object at all.
    NotAnObject,
}

impl std::fmt::Display for RejectReason {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            RejectReason::MissingPostId => f.write_str("missing post_id"),
            RejectReason::NotAnObject => f.write_str("record is not an object"),
        }
    }
}

/// Timestamp formats tried in order after RFC 3339 fails. `%.f` tolerates an
/// optional fractional-seconds part.
const NAIVE_TIMESTAMP_FORMATS: &[&str] = &["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%d %H:%M:%S%.f"];

/// Coerce a loosely-typed value to a non-negative float.
///
/// Strings are parsed after stripping thousands-separator commas; anything
/// unparseable (null, absent, wrong type, garbage) resolves to 0.0.
pub fn safe_float(value: Option<&Value>) -> f64 {
    let parsed = match value {
        Some(Value::Number(n)) => n.as_f64().unwrap_or(0.0),
        Some(Value::String(s)) => {
            let cleaned = s.trim().replace(',', "");
            if cleaned.is_empty() {
                0.0
            } else {
                cleaned.parse::<f64>().unwrap_or(0.0)
            }
        }
        _ => 0.0,
    };
    if parsed.is_finite() {
        parsed.max(0.0)
    } else {
        0.0
    }
}

/// Coerce a loosely-typed value to a non-negative integer.
///
/// Parses as float first so `"1,234"` and `"3.7"` both land on an integer;
/// any failure resolves to 0.
pub fn safe_int(value: Option<&Value>) -> i64 {
    safe_float(value).trunc() as i64
}

/// Normalize a timestamp value to ISO-8601 when possible.
///
/// Absent or empty values become `None`. Strings that match no known format
/// are returned unchanged rather than dropped; downstream consumers tolerate
/// the non-ISO case.
pub fn normalize_timestamp(value: Option<&Value>) -> Option<String> {
    match value? {
        Value::String(s) if !s.is_empty() => {
            if let Ok(dt) = DateTime::parse_from_rfc3339(s) {
                return Some(dt.to_rfc3339());
            }
            for format in NAIVE_TIMESTAMP_FORMATS {
                if let Ok(naive) = NaiveDateTime::parse_from_str(s, format) {
                    return Some(naive.format("%Y-%m-%dT%H:%M:%S%.f").to_string());
                }
            }
            Some(s.clone())
        }
        _ => None,
    }
}

/// Normalize a comma-separated hashtag field: trim, lowercase, drop entries
/// of length <= 1, rejoin. Order-preserving and intentionally not
/// de-duplicated.
pub fn normalize_hashtags(value: Option<&Value>) -> String {
    let raw = match value {
        Some(Value::String(s)) => s.clone(),
        // Some sources hand the tags over as a list already.
        Some(Value::Array(items)) => items
            .iter()
            .filter_map(Value::as_str)
            .collect::<Vec<_>>()
            .join(","),
        _ => return String::new(),
    };

    raw.split(',')
        .map(|tag| tag.trim().to_lowercase())
        .filter(|tag| tag.chars().count() > 1)
        .collect::<Vec<_>>()
        .join(",")
}

fn identity_string(value: Option<&Value>) -> Option<String> {
    match value? {
        Value::String(s) => {
            let trimmed = s.trim();
            (!trimmed.is_empty()).then(|| trimmed.to_string())
        }
        Value::Number(n) => Some(n.to_string()),
        _ => None,
    }
}

fn opt_string(obj: &Map<String, Value>, key: &str) -> Option<String> {
    obj.get(key)
        .and_then(Value::as_str)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
}

/// Turns one raw record into a canonical one, or rejects it.
#[derive(Debug, Clone, Default)]
pub struct RecordNormalizer {
    estimator: SentimentEstimator,
    classifier: EngagementClassifier,
}

impl RecordNormalizer {
    pub fn new(estimator: SentimentEstimator, classifier: EngagementClassifier) -> Self {
        Self {
            estimator,
            classifier,
        }
    }

    /// Normalize a single raw record.
    ///
    /// A missing `post_id` rejects the record. A missing `platform` is
    /// tolerated here (recorded as `"unknown"`); the loader's validated path
    /// checks it again before persistence.
    pub fn normalize(&self, raw: &RawRecord) -> Result<CanonicalRecord, RejectReason> {
        let obj = raw.as_object().ok_or(RejectReason::NotAnObject)?;

        let post_id =
            identity_string(obj.get("post_id")).ok_or(RejectReason::MissingPostId)?;
        let platform = identity_string(obj.get("platform"))
            .unwrap_or_else(|| crate::constants::PLATFORM_UNKNOWN.to_string());

        let raw_text = obj.get("post_text").and_then(Value::as_str).unwrap_or("");
        let post_text = text::clean(raw_text);

        let likes = safe_int(obj.get("likes"));
        let comments = safe_int(obj.get("comments"));

        let sentiment_label = self.estimator.estimate(&post_text);
        let engagement_level = self.classifier.classify(likes, comments, &platform);

        Ok(CanonicalRecord {
            word_count: post_text.split_whitespace().count(),
            // Mention/URL counts come from the original text; cleaning may
            // have rewritten what they matched on.
            mention_count: text::count_mentions(raw_text),
            url_count: text::count_urls(raw_text),
            has_media: obj
                .get("image_url")
                .and_then(Value::as_str)
                .is_some_and(|s| !s.is_empty()),
            hashtags: normalize_hashtags(obj.get("hashtags")),
            retweet_count: safe_int(obj.get("retweet_count")),
            view_count: safe_int(obj.get("view_count")),
            upvote_ratio: safe_float(obj.get("upvote_ratio")),
            author: opt_string(obj, "author"),
            url: opt_string(obj, "url"),
            image_url: opt_string(obj, "image_url"),
            subreddit: opt_string(obj, "subreddit"),
            duration: opt_string(obj, "duration"),
            channel_id: opt_string(obj, "channel_id"),
            timestamp: normalize_timestamp(obj.get("timestamp")),
            scraped_at: opt_string(obj, "scraped_at"),
            processed_at: Utc::now().to_rfc3339(),
            post_id,
            platform,
            post_text,
            likes,
            comments,
            sentiment_label,
            engagement_level,
        })
    }
}
