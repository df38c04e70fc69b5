//! Enrichment collaborator contracts and reference implementations
//!
//! The aggregator consumes two collaborators through trait seams so that
//! deployments can plug in externally trained models and tests can substitute
//! fakes. Both contracts are pure, synchronous, and total over any UTF-8
//! input: empty or malformed text yields a defined default, never a panic.

pub mod classifier;
pub mod sentiment;

pub use classifier::KeywordCategoryClassifier;
pub use sentiment::LexiconSentimentScorer;

use crate::error::Result;
use crate::types::Category;

/// Resolves a topic category for a text corpus
///
/// Implementations back this with a trained model served elsewhere; the core
/// ships [`KeywordCategoryClassifier`] as a self-contained reference.
pub trait CategoryClassifier: Send + Sync {
    /// Classify `text`, returning the winning category only when its
    /// confidence reaches `confidence_floor`
    ///
    /// `None` means no category cleared the floor; it is not an error.
    /// Empty text must return `Ok(None)`.
    fn classify(&self, text: &str, confidence_floor: f64) -> Result<Option<Category>>;

    /// Classifier name for logging
    fn name(&self) -> &str;
}

/// Scores the sentiment polarity of a text corpus
pub trait SentimentScorer: Send + Sync {
    /// Raw polarity in [-1, 1]; the caller owns the neutral-band mapping
    ///
    /// Empty text must return `Ok(0.0)`.
    fn score(&self, text: &str) -> Result<f64>;

    /// Scorer name for logging
    fn name(&self) -> &str;
}
