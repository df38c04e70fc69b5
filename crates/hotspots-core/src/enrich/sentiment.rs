//! Lexicon-based reference sentiment scorer

use crate::enrich::SentimentScorer;
use crate::error::Result;

const POSITIVE_WORDS: &[&str] = &[
    "amazing",
    "awesome",
    "beautiful",
    "best",
    "excellent",
    "excited",
    "fantastic",
    "fun",
    "glad",
    "good",
    "great",
    "happy",
    "incredible",
    "love",
    "loved",
    "nice",
    "perfect",
    "thrilled",
    "wonderful",
    "win",
];

const NEGATIVE_WORDS: &[&str] = &[
    "angry",
    "awful",
    "bad",
    "broken",
    "disappointed",
    "disaster",
    "fail",
    "hate",
    "hated",
    "horrible",
    "lose",
    "mess",
    "miserable",
    "nightmare",
    "poor",
    "sad",
    "scared",
    "terrible",
    "ugly",
    "worst",
];

/// Word-counting sentiment scorer over a small built-in lexicon
///
/// Text is cleaned of @-mentions, links, and non-alphanumeric characters
/// before scoring. The polarity is the signed fraction of opinionated words,
/// (positive - negative) / (positive + negative), which lands in [-1, 1] and
/// is 0.0 for text with no lexicon hits at all, empty text included.
#[derive(Debug, Clone, Default)]
pub struct LexiconSentimentScorer;

impl LexiconSentimentScorer {
    /// Create the scorer
    pub fn new() -> Self {
        Self
    }

    /// Strip @-mentions, links, and non-alphanumeric noise, collapse spaces
    fn clean_text(text: &str) -> String {
        let mut cleaned = String::with_capacity(text.len());
        for token in text.split_whitespace() {
            if token.starts_with('@') || token.contains("://") {
                continue;
            }
            for ch in token.chars() {
                if ch.is_alphanumeric() {
                    cleaned.push(ch.to_ascii_lowercase());
                }
            }
            cleaned.push(' ');
        }
        cleaned
    }
}

impl SentimentScorer for LexiconSentimentScorer {
    fn score(&self, text: &str) -> Result<f64> {
        let cleaned = Self::clean_text(text);

        let mut positive = 0usize;
        let mut negative = 0usize;
        for word in cleaned.split_whitespace() {
            if POSITIVE_WORDS.contains(&word) {
                positive += 1;
            } else if NEGATIVE_WORDS.contains(&word) {
                negative += 1;
            }
        }

        let total = positive + negative;
        if total == 0 {
            return Ok(0.0);
        }
        Ok((positive as f64 - negative as f64) / total as f64)
    }

    fn name(&self) -> &str {
        "lexicon"
    }
}
