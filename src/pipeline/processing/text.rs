//! Text cleaning and structured sub-feature extraction.
//!
//! Pure functions over `&str`; every input normalizes to some output and
//! nothing here can fail. Extraction runs on the original text, cleaning on
//! a copy, so stripping markup never destroys what is being counted.

use once_cell::sync::Lazy;
use regex::Regex;

static URL_PATTERN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"https?://\S+|www\.\S+").unwrap());
static MENTION_PATTERN: Lazy<Regex> = Lazy::new(|| Regex::new(r"@\w+").unwrap());
static HASHTAG_PATTERN: Lazy<Regex> = Lazy::new(|| Regex::new(r"#(\w+)").unwrap());
static HASHTAG_STRIP_PATTERN: Lazy<Regex> = Lazy::new(|| Regex::new(r"#\w+\s*").unwrap());
static EMOJI_PATTERN: Lazy<Regex> = Lazy::new(|| {
    Regex::new(concat!(
        "[",
        "\u{1F600}-\u{1F64F}", // emoticons
        "\u{1F300}-\u{1F5FF}", // symbols & pictographs
        "\u{1F680}-\u{1F6FF}", // transport & map symbols
        "\u{1F1E0}-\u{1F1FF}", // flags
        "\u{2702}-\u{27B0}",
        "\u{24C2}-\u{1F251}",
        "]+",
    ))
    .unwrap()
});
pub(crate) static WORD_PATTERN: Lazy<Regex> = Lazy::new(|| Regex::new(r"\b\w+\b").unwrap());

/// HTML entities the sources are known to leave behind.
const ENTITY_TABLE: &[(&str, &str)] = &[
    ("&amp;", "&"),
    ("&lt;", "<"),
    ("&gt;", ">"),
    ("&quot;", "\""),
    ("&#39;", "'"),
    ("&#x200B;", ""),
];

/// Smart punctuation and invisible characters normalized for storage.
const CHAR_TABLE: &[(char, &str)] = &[
    ('\u{2018}', "'"),
    ('\u{2019}', "'"),
    ('\u{201c}', "\""),
    ('\u{201d}', "\""),
    ('\u{2013}', "-"),
    ('\u{2014}', "--"),
    ('\u{200b}', ""),
    ('\u{feff}', ""),
    ('\u{00a0}', " "),
];

/// Collapse every whitespace run to a single space and trim.
pub fn collapse_whitespace(text: &str) -> String {
    text.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// Clean and normalize text content: decode HTML entities, straighten smart
/// punctuation, drop zero-width characters, collapse whitespace.
///
/// Total and idempotent; empty input yields an empty string.
pub fn clean(text: &str) -> String {
    if text.is_empty() {
        return String::new();
    }

    let mut out = text.to_string();
    for (entity, replacement) in ENTITY_TABLE {
        out = out.replace(entity, replacement);
    }
    for (ch, replacement) in CHAR_TABLE {
        out = out.replace(*ch, replacement);
    }

    collapse_whitespace(&out)
}

/// Extract hashtag bodies (without the `#`) in order of appearance.
pub fn extract_hashtags(text: &str) -> Vec<String> {
    HASHTAG_PATTERN
        .captures_iter(text)
        .map(|cap| cap[1].to_string())
        .collect()
}

/// Extract `@mentions` (with the `@`) in order of appearance.
pub fn extract_mentions(text: &str) -> Vec<String> {
    MENTION_PATTERN
        .find_iter(text)
        .map(|m| m.as_str().to_string())
        .collect()
}

/// Drop hashtags from text and collapse the leftover whitespace.
pub fn remove_hashtags(text: &str) -> String {
    collapse_whitespace(&HASHTAG_STRIP_PATTERN.replace_all(text, ""))
}

/// Drop URLs from text and collapse the leftover whitespace.
pub fn remove_urls(text: &str) -> String {
    collapse_whitespace(&URL_PATTERN.replace_all(text, ""))
}

/// Drop emoji runs from text.
pub fn remove_emojis(text: &str) -> String {
    EMOJI_PATTERN.replace_all(text, "").into_owned()
}

pub fn contains_url(text: &str) -> bool {
    URL_PATTERN.is_match(text)
}

pub fn count_urls(text: &str) -> usize {
    URL_PATTERN.find_iter(text).count()
}

pub fn count_mentions(text: &str) -> usize {
    MENTION_PATTERN.find_iter(text).count()
}

/// Number of emoji runs in the text (consecutive emoji count once).
pub fn count_emojis(text: &str) -> usize {
    EMOJI_PATTERN.find_iter(text).count()
}

/// Text prepared for lexicon scoring, with the sub-features extracted from
/// the original text before any stripping.
#[derive(Debug, Clone, PartialEq)]
pub struct SentimentPrep {
    pub cleaned_text: String,
    pub hashtags: Vec<String>,
    pub mentions: Vec<String>,
    pub has_urls: bool,
    pub emoji_count: usize,
}

/// Prepare text for sentiment scoring.
///
/// Sub-features come from the original text first; the returned text is then
/// cleaned and stripped of URLs, hashtags, mentions, and (optionally) emoji,
/// leaving only prose for the lexicon.
pub fn prepare_for_sentiment(text: &str, include_emojis: bool) -> SentimentPrep {
    if text.is_empty() {
        return SentimentPrep {
            cleaned_text: String::new(),
            hashtags: Vec::new(),
            mentions: Vec::new(),
            has_urls: false,
            emoji_count: 0,
        };
    }

    let hashtags = extract_hashtags(text);
    let mentions = extract_mentions(text);
    let has_urls = contains_url(text);
    let emoji_count = count_emojis(text);

    let mut cleaned = clean(text);
    cleaned = remove_urls(&cleaned);
    cleaned = remove_hashtags(&cleaned);
    if !include_emojis {
        cleaned = remove_emojis(&cleaned);
    }
    cleaned = MENTION_PATTERN.replace_all(&cleaned, "").into_owned();
    cleaned = collapse_whitespace(&cleaned);

    SentimentPrep {
        cleaned_text: cleaned,
        hashtags,
        mentions,
        has_urls,
        emoji_count,
    }
}
