//! Keyword-table reference category classifier

use crate::enrich::CategoryClassifier;
use crate::error::Result;
use crate::types::Category;

const BUSINESS_KEYWORDS: &[&str] = &[
    "bank",
    "business",
    "company",
    "deal",
    "earnings",
    "economy",
    "finance",
    "invest",
    "market",
    "merger",
    "money",
    "sales",
    "startup",
    "stock",
    "trade",
];

const ENTERTAINMENT_KEYWORDS: &[&str] = &[
    "actor",
    "album",
    "band",
    "celebrity",
    "concert",
    "dance",
    "festival",
    "film",
    "game",
    "movie",
    "music",
    "premiere",
    "show",
    "song",
    "theater",
];

const MEDICINE_KEYWORDS: &[&str] = &[
    "clinic",
    "disease",
    "doctor",
    "drug",
    "health",
    "hospital",
    "medical",
    "medicine",
    "nurse",
    "patient",
    "surgery",
    "symptom",
    "treatment",
    "vaccine",
    "virus",
];

const TECHNOLOGY_KEYWORDS: &[&str] = &[
    "ai",
    "app",
    "code",
    "computer",
    "data",
    "device",
    "internet",
    "laptop",
    "phone",
    "robot",
    "server",
    "software",
    "startup",
    "tech",
    "technology",
];

/// Keyword-counting classifier over the closed category set
///
/// Counts keyword hits per category across the lowercased corpus and reports
/// the winner with confidence `winner hits / total hits`. No hits at all, or
/// a winning confidence below the floor, means no category. A stand-in for
/// the externally trained model that production deployments plug in through
/// the [`CategoryClassifier`] trait.
#[derive(Debug, Clone, Default)]
pub struct KeywordCategoryClassifier;

impl KeywordCategoryClassifier {
    /// Create the classifier
    pub fn new() -> Self {
        Self
    }

    fn keywords_for(category: Category) -> &'static [&'static str] {
        match category {
            Category::Business => BUSINESS_KEYWORDS,
            Category::Entertainment => ENTERTAINMENT_KEYWORDS,
            Category::Medicine => MEDICINE_KEYWORDS,
            Category::Technology => TECHNOLOGY_KEYWORDS,
        }
    }
}

impl CategoryClassifier for KeywordCategoryClassifier {
    fn classify(&self, text: &str, confidence_floor: f64) -> Result<Option<Category>> {
        let words: Vec<String> = text
            .split(|c: char| !c.is_alphanumeric())
            .filter(|w| !w.is_empty())
            .map(|w| w.to_lowercase())
            .collect();

        let mut counts = [0usize; Category::ALL.len()];
        for (slot, category) in counts.iter_mut().zip(Category::ALL) {
            let keywords = Self::keywords_for(category);
            *slot = words.iter().filter(|w| keywords.contains(&w.as_str())).count();
        }

        let total: usize = counts.iter().sum();
        if total == 0 {
            return Ok(None);
        }

        // First category wins ties, matching the fixed reporting order.
        let (winner, &hits) = counts
            .iter()
            .enumerate()
            .max_by(|(ai, a), (bi, b)| a.cmp(b).then(bi.cmp(ai)))
            .unwrap_or((0, &0));

        let confidence = hits as f64 / total as f64;
        if confidence >= confidence_floor {
            Ok(Some(Category::ALL[winner]))
        } else {
            Ok(None)
        }
    }

    fn name(&self) -> &str {
        "keyword-table"
    }
}
