//! Default lexicons and threshold tables for the labeling stages.
//!
//! These are compiled-in baselines. Both the sentiment estimator and the
//! engagement classifier take their tables by value at construction, so tests
//! and callers can substitute their own without touching this module.

/// Platform tags the pipeline has curated thresholds for.
pub const PLATFORM_INSTAGRAM: &str = "instagram";
pub const PLATFORM_YOUTUBE: &str = "youtube";
pub const PLATFORM_TWITTER: &str = "twitter";
pub const PLATFORM_REDDIT: &str = "reddit";

/// Platform recorded when a raw record carries none.
pub const PLATFORM_UNKNOWN: &str = "unknown";

/// Threshold table used for platforms not present in the table.
/// Twitter's numbers are the generic baseline.
pub const FALLBACK_PLATFORM: &str = PLATFORM_TWITTER;

/// Weight of a comment relative to a like in the engagement score.
/// A comment is a stronger signal than a like.
pub const COMMENT_WEIGHT: i64 = 3;

/// Engagement score thresholds per platform, as (platform, medium, high, viral).
/// Boundary-inclusive: a score equal to a threshold lands in that tier.
pub const ENGAGEMENT_THRESHOLDS: &[(&str, u64, u64, u64)] = &[
    (PLATFORM_INSTAGRAM, 500, 5_000, 50_000),
    (PLATFORM_YOUTUBE, 1_000, 10_000, 100_000),
    (PLATFORM_TWITTER, 100, 1_000, 10_000),
    (PLATFORM_REDDIT, 100, 1_000, 10_000),
];

/// Curated positive sentiment lexicon.
pub const POSITIVE_WORDS: &[&str] = &[
    "love", "loved", "loving", "great", "amazing", "awesome", "excellent",
    "good", "best", "happy", "wonderful", "fantastic", "brilliant", "perfect",
    "beautiful", "incredible", "outstanding", "superb", "magnificent",
    "thank", "thanks", "grateful", "appreciate", "excited", "joy", "blessed",
    "recommend", "recommended", "favorite", "favourite", "impressive",
];

/// Curated negative sentiment lexicon.
pub const NEGATIVE_WORDS: &[&str] = &[
    "hate", "hated", "hating", "bad", "terrible", "awful", "worst", "horrible",
    "angry", "sad", "disappointed", "disappointing", "frustrating", "frustrated",
    "annoying", "annoyed", "useless", "waste", "poor", "pathetic", "disgusting",
    "ugly", "stupid", "boring", "fail", "failed", "failing", "sucks", "broken",
    "scam", "fake", "trash", "garbage", "nightmare", "disappoints",
];

/// Emoji glyphs treated as positive signals.
pub const POSITIVE_EMOJIS: &[&str] = &[
    "😊", "😍", "❤️", "👍", "🎉", "💯", "🙏", "😁", "🔥", "💪",
];

/// Emoji glyphs treated as negative signals.
pub const NEGATIVE_EMOJIS: &[&str] = &[
    "😢", "😡", "👎", "💔", "😤", "🤮", "😭", "😠", "🙄",
];
