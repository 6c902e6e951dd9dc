//! Engagement tier classification against per-platform norms.

use std::collections::HashMap;

use crate::constants;
use crate::domain::EngagementLevel;

/// Ascending score thresholds for one platform. Scores below `medium` are
/// low; comparisons are boundary-inclusive.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EngagementThresholds {
    pub medium: u64,
    pub high: u64,
    pub viral: u64,
}

/// Maps (likes, comments, platform) to an ordinal engagement tier.
///
/// Threshold tables are injected at construction; unknown platforms fall
/// back to the `twitter` table as the generic baseline.
#[derive(Debug, Clone)]
pub struct EngagementClassifier {
    tables: HashMap<String, EngagementThresholds>,
    comment_weight: i64,
}

impl Default for EngagementClassifier {
    fn default() -> Self {
        let tables = constants::ENGAGEMENT_THRESHOLDS
            .iter()
            .map(|&(platform, medium, high, viral)| {
                (
                    platform.to_string(),
                    EngagementThresholds { medium, high, viral },
                )
            })
            .collect();
        Self {
            tables,
            comment_weight: constants::COMMENT_WEIGHT,
        }
    }
}

impl EngagementClassifier {
    pub fn new(tables: HashMap<String, EngagementThresholds>, comment_weight: i64) -> Self {
        Self {
            tables,
            comment_weight,
        }
    }

    /// Weighted engagement score: a comment signals more than a like.
    pub fn score(&self, likes: i64, comments: i64) -> i64 {
        likes.saturating_add(comments.saturating_mul(self.comment_weight))
    }

    /// Classify a post's engagement against its platform's thresholds.
    pub fn classify(&self, likes: i64, comments: i64, platform: &str) -> EngagementLevel {
        let thresholds = self
            .tables
            .get(platform)
            .or_else(|| self.tables.get(constants::FALLBACK_PLATFORM))
            .copied()
            // A classifier built without even the fallback table treats
            // everything as low.
            .unwrap_or(EngagementThresholds {
                medium: u64::MAX,
                high: u64::MAX,
                viral: u64::MAX,
            });

        let score = self.score(likes, comments).max(0) as u64;

        if score >= thresholds.viral {
            EngagementLevel::Viral
        } else if score >= thresholds.high {
            EngagementLevel::High
        } else if score >= thresholds.medium {
            EngagementLevel::Medium
        } else {
            EngagementLevel::Low
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn zero_engagement_is_low() {
        let classifier = EngagementClassifier::default();
        assert_eq!(classifier.classify(0, 0, "reddit"), EngagementLevel::Low);
    }

    #[test]
    fn thresholds_are_boundary_inclusive() {
        let classifier = EngagementClassifier::default();
        // Reddit thresholds: medium 100, high 1000, viral 10000.
        assert_eq!(classifier.classify(99, 0, "reddit"), EngagementLevel::Low);
        assert_eq!(classifier.classify(100, 0, "reddit"), EngagementLevel::Medium);
        assert_eq!(classifier.classify(1_000, 0, "reddit"), EngagementLevel::High);
        assert_eq!(classifier.classify(10_000, 0, "reddit"), EngagementLevel::Viral);
    }

    #[test]
    fn comments_weigh_three_likes() {
        let classifier = EngagementClassifier::default();
        // 34 comments score 102 on reddit, crossing the medium line where
        // 34 likes would not.
        assert_eq!(classifier.classify(34, 0, "reddit"), EngagementLevel::Low);
        assert_eq!(classifier.classify(0, 34, "reddit"), EngagementLevel::Medium);
    }

    #[test]
    fn unknown_platform_uses_twitter_baseline() {
        let classifier = EngagementClassifier::default();
        // Twitter thresholds: medium 100, high 1000, viral 10000.
        assert_eq!(
            classifier.classify(100, 0, "myspace"),
            EngagementLevel::Medium
        );
        assert_eq!(
            classifier.classify(10_000, 0, "myspace"),
            EngagementLevel::Viral
        );
    }

    #[test]
    fn platform_tables_differ() {
        let classifier = EngagementClassifier::default();
        // 500 likes is medium on instagram but also medium on twitter;
        // 999 likes is medium on instagram, still medium on twitter;
        // 5000 separates the two.
        assert_eq!(
            classifier.classify(5_000, 0, "instagram"),
            EngagementLevel::High
        );
        assert_eq!(
            classifier.classify(5_000, 0, "twitter"),
            EngagementLevel::Viral
        );
    }

    #[test]
    fn substitute_tables_are_honored() {
        let mut tables = HashMap::new();
        tables.insert(
            "testnet".to_string(),
            EngagementThresholds {
                medium: 1,
                high: 2,
                viral: 3,
            },
        );
        let classifier = EngagementClassifier::new(tables, 1);
        assert_eq!(classifier.classify(0, 0, "testnet"), EngagementLevel::Low);
        assert_eq!(classifier.classify(1, 0, "testnet"), EngagementLevel::Medium);
        assert_eq!(classifier.classify(0, 3, "testnet"), EngagementLevel::Viral);
        // No fallback table registered: unknown platforms stay low.
        assert_eq!(classifier.classify(1_000, 1_000, "x"), EngagementLevel::Low);
    }
}
