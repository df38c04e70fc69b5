//! Turns finished clusters into enriched hotspot entities

use std::sync::Arc;

use crate::cluster::ClusteringOutcome;
use crate::config::EnrichmentConfig;
use crate::enrich::{CategoryClassifier, SentimentScorer};
use crate::types::{Hotspot, LocatedPost, Sentiment};

/// Builds hotspots from a clustering outcome
///
/// Collaborator handles are passed in at construction so deployments can hand
/// over an already-loaded model and tests can substitute fakes. The
/// aggregator's only side effects are the two collaborator calls per cluster.
///
/// A failing collaborator degrades that one hotspot instead of aborting the
/// batch: sentiment falls back to `Neutral` and category to `None`, each with
/// a warning. This is the declared degraded-service contract, not data loss;
/// the hotspot still ships with its posts, centroid, and corpus intact.
pub struct HotspotAggregator {
    classifier: Arc<dyn CategoryClassifier>,
    scorer: Arc<dyn SentimentScorer>,
    config: EnrichmentConfig,
}

impl HotspotAggregator {
    /// Create an aggregator around the given collaborators
    pub fn new(
        classifier: Arc<dyn CategoryClassifier>,
        scorer: Arc<dyn SentimentScorer>,
        config: EnrichmentConfig,
    ) -> Self {
        Self {
            classifier,
            scorer,
            config,
        }
    }

    /// Build one hotspot per cluster, in cluster id order
    ///
    /// Noise-labeled posts are discarded; member posts keep their discovery
    /// order inside each hotspot. An empty outcome yields an empty vec.
    pub fn aggregate(&self, posts: &[LocatedPost], outcome: &ClusteringOutcome) -> Vec<Hotspot> {
        let mut hotspots = Vec::with_capacity(outcome.cluster_count());

        for (position, member_indices) in outcome.clusters().iter().enumerate() {
            let cluster_id = position as u32 + 1;
            let members: Vec<LocatedPost> =
                member_indices.iter().map(|&i| posts[i].clone()).collect();
            let corpus = Hotspot::corpus_of(&members);

            let sentiment = match self.scorer.score(&corpus) {
                Ok(polarity) => Sentiment::from_polarity(polarity, self.config.neutral_band),
                Err(e) => {
                    tracing::warn!(
                        cluster_id,
                        scorer = self.scorer.name(),
                        "sentiment scoring failed, falling back to neutral: {}",
                        e
                    );
                    Sentiment::Neutral
                }
            };

            let category = match self
                .classifier
                .classify(&corpus, self.config.confidence_floor)
            {
                Ok(category) => category,
                Err(e) => {
                    tracing::warn!(
                        cluster_id,
                        classifier = self.classifier.name(),
                        "category classification failed, reporting no category: {}",
                        e
                    );
                    None
                }
            };

            hotspots.push(Hotspot::new(cluster_id, members, corpus, sentiment, category));
        }

        hotspots
    }
}
