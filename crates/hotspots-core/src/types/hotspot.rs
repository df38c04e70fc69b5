//! Hotspot output entity and its enrichment enums

use std::fmt;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::types::post::{Coordinate, LocatedPost};

/// Aggregate sentiment of a hotspot corpus
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Sentiment {
    Positive,
    Negative,
    Neutral,
}

impl Sentiment {
    /// Map a raw polarity value onto the sentiment bands
    ///
    /// Polarity above `neutral_band` is Positive, below its negation
    /// Negative, anything in between Neutral. With the reference band of 0.0
    /// only an exact zero is Neutral.
    pub fn from_polarity(polarity: f64, neutral_band: f64) -> Self {
        if polarity > neutral_band {
            Self::Positive
        } else if polarity < -neutral_band {
            Self::Negative
        } else {
            Self::Neutral
        }
    }
}

impl fmt::Display for Sentiment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Positive => "positive",
            Self::Negative => "negative",
            Self::Neutral => "neutral",
        };
        write!(f, "{}", name)
    }
}

/// Topic category of a hotspot corpus, a closed set
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Category {
    Business,
    Entertainment,
    Medicine,
    Technology,
}

impl Category {
    /// All categories, in reporting order
    pub const ALL: [Category; 4] = [
        Category::Business,
        Category::Entertainment,
        Category::Medicine,
        Category::Technology,
    ];

    /// Lowercase name, matching the serialized form
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Business => "business",
            Self::Entertainment => "entertainment",
            Self::Medicine => "medicine",
            Self::Technology => "technology",
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// One detected hotspot, the output unit of a batch run
///
/// Immutable after construction; a hotspot is never updated incrementally.
/// `cluster_id` is only unique within its run; `id` is the globally unique
/// handle for downstream storage.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Hotspot {
    /// Run-local cluster id, assigned in discovery order starting at 1
    pub cluster_id: u32,
    /// Globally unique id, generated fresh per hotspot
    pub id: Uuid,
    /// Member posts in discovery order, never empty
    pub posts: Vec<LocatedPost>,
    /// Arithmetic mean of member coordinates
    pub centroid: Coordinate,
    /// Member texts joined by newlines, same order as `posts`
    pub corpus: String,
    /// Aggregate sentiment of the corpus
    pub sentiment: Sentiment,
    /// Topic category, absent when none cleared the confidence floor
    pub category: Option<Category>,
}

impl Hotspot {
    /// Assemble a hotspot from a finished cluster
    ///
    /// `posts` must be non-empty and `corpus` must be their newline-join
    /// (see [`Hotspot::corpus_of`]); the aggregator builds the corpus once
    /// and reuses it for the enrichment calls.
    pub fn new(
        cluster_id: u32,
        posts: Vec<LocatedPost>,
        corpus: String,
        sentiment: Sentiment,
        category: Option<Category>,
    ) -> Self {
        let centroid = Self::centroid_of(&posts);
        Self {
            cluster_id,
            id: Uuid::new_v4(),
            posts,
            centroid,
            corpus,
            sentiment,
            category,
        }
    }

    /// Newline-join of post texts in slice order
    pub fn corpus_of(posts: &[LocatedPost]) -> String {
        posts
            .iter()
            .map(|p| p.raw_text.as_str())
            .collect::<Vec<_>>()
            .join("\n")
    }

    /// Arithmetic mean of post coordinates on the flat plane
    pub fn centroid_of(posts: &[LocatedPost]) -> Coordinate {
        let n = posts.len() as f64;
        let lat = posts.iter().map(|p| p.coordinate.latitude).sum::<f64>() / n;
        let long = posts.iter().map(|p| p.coordinate.longitude).sum::<f64>() / n;
        Coordinate::new(lat, long)
    }

    /// Number of member posts
    pub fn post_count(&self) -> usize {
        self.posts.len()
    }
}

impl fmt::Display for Hotspot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "hotspot {} [{} posts] @ {} sentiment={} category={}",
            self.cluster_id,
            self.posts.len(),
            self.centroid,
            self.sentiment,
            self.category
                .map(|c| c.to_string())
                .unwrap_or_else(|| "none".to_string()),
        )
    }
}
