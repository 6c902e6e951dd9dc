//! Lexicon + emoji sentiment estimation.
//!
//! Deliberately a heuristic, not a model: unique-token intersection with two
//! small curated word sets plus an emoji scan, strict-majority decision. The
//! lexicon is injected at construction so it can be swapped wholesale.

use std::collections::HashSet;

use crate::constants;
use crate::domain::SentimentLabel;
use crate::pipeline::processing::text::WORD_PATTERN;

/// Immutable word and emoji tables backing the estimator.
#[derive(Debug, Clone)]
pub struct SentimentLexicon {
    positive_words: HashSet<String>,
    negative_words: HashSet<String>,
    positive_emojis: Vec<String>,
    negative_emojis: Vec<String>,
}

impl SentimentLexicon {
    pub fn new(
        positive_words: impl IntoIterator<Item = String>,
        negative_words: impl IntoIterator<Item = String>,
        positive_emojis: impl IntoIterator<Item = String>,
        negative_emojis: impl IntoIterator<Item = String>,
    ) -> Self {
        Self {
            positive_words: positive_words.into_iter().collect(),
            negative_words: negative_words.into_iter().collect(),
            positive_emojis: positive_emojis.into_iter().collect(),
            negative_emojis: negative_emojis.into_iter().collect(),
        }
    }
}

impl Default for SentimentLexicon {
    fn default() -> Self {
        Self::new(
            constants::POSITIVE_WORDS.iter().map(|w| w.to_string()),
            constants::NEGATIVE_WORDS.iter().map(|w| w.to_string()),
            constants::POSITIVE_EMOJIS.iter().map(|e| e.to_string()),
            constants::NEGATIVE_EMOJIS.iter().map(|e| e.to_string()),
        )
    }
}

/// Three-way sentiment classifier over cleaned text.
#[derive(Debug, Clone, Default)]
pub struct SentimentEstimator {
    lexicon: SentimentLexicon,
}

impl SentimentEstimator {
    pub fn new(lexicon: SentimentLexicon) -> Self {
        Self { lexicon }
    }

    /// Estimate sentiment of a piece of text.
    ///
    /// Words are counted once regardless of repetition; emoji occurrences are
    /// scanned over the text as given, since cleaning leaves them in place.
    /// Ties, including no hits at all, are neutral; empty text is neutral.
    pub fn estimate(&self, text: &str) -> SentimentLabel {
        if text.is_empty() {
            return SentimentLabel::Neutral;
        }

        let lower = text.to_lowercase();
        let tokens: HashSet<&str> = WORD_PATTERN.find_iter(&lower).map(|m| m.as_str()).collect();

        let mut positive = tokens
            .iter()
            .filter(|t| self.lexicon.positive_words.contains(**t))
            .count();
        let mut negative = tokens
            .iter()
            .filter(|t| self.lexicon.negative_words.contains(**t))
            .count();

        for emoji in &self.lexicon.positive_emojis {
            positive += text.matches(emoji.as_str()).count();
        }
        for emoji in &self.lexicon.negative_emojis {
            negative += text.matches(emoji.as_str()).count();
        }

        if positive > negative {
            SentimentLabel::Positive
        } else if negative > positive {
            SentimentLabel::Negative
        } else {
            SentimentLabel::Neutral
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_text_is_neutral() {
        let estimator = SentimentEstimator::default();
        assert_eq!(estimator.estimate(""), SentimentLabel::Neutral);
    }

    #[test]
    fn lexicon_hits_decide_polarity() {
        let estimator = SentimentEstimator::default();
        assert_eq!(
            estimator.estimate("I love this, amazing!"),
            SentimentLabel::Positive
        );
        assert_eq!(
            estimator.estimate("this is terrible and awful"),
            SentimentLabel::Negative
        );
    }

    #[test]
    fn no_hits_tie_to_neutral() {
        let estimator = SentimentEstimator::default();
        assert_eq!(estimator.estimate("the sky is blue"), SentimentLabel::Neutral);
    }

    #[test]
    fn repeated_words_count_once() {
        let estimator = SentimentEstimator::default();
        // One unique positive token vs one unique negative token, tied.
        assert_eq!(
            estimator.estimate("love love love hate"),
            SentimentLabel::Neutral
        );
    }

    #[test]
    fn emojis_break_word_ties() {
        let estimator = SentimentEstimator::default();
        assert_eq!(estimator.estimate("love hate 🔥"), SentimentLabel::Positive);
        assert_eq!(estimator.estimate("love hate 👎"), SentimentLabel::Negative);
    }

    #[test]
    fn substitute_lexicon_is_honored() {
        let lexicon = SentimentLexicon::new(
            ["stellar".to_string()],
            ["meh".to_string()],
            Vec::new(),
            Vec::new(),
        );
        let estimator = SentimentEstimator::new(lexicon);
        assert_eq!(estimator.estimate("what a stellar day"), SentimentLabel::Positive);
        assert_eq!(estimator.estimate("meh result"), SentimentLabel::Negative);
        // Default lexicon words mean nothing to the substitute.
        assert_eq!(estimator.estimate("amazing"), SentimentLabel::Neutral);
    }

    #[test]
    fn case_insensitive_matching() {
        let estimator = SentimentEstimator::default();
        assert_eq!(estimator.estimate("AMAZING stuff"), SentimentLabel::Positive);
    }
}
