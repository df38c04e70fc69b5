//! Batch runner wiring the store, clusterer, and aggregator together

use std::sync::Arc;
use std::time::Instant;

use serde::{Deserialize, Serialize};

use crate::aggregate::HotspotAggregator;
use crate::batch::PostBatch;
use crate::cluster::DensityClusterer;
use crate::config::HotspotConfig;
use crate::enrich::{
    CategoryClassifier, KeywordCategoryClassifier, LexiconSentimentScorer, SentimentScorer,
};
use crate::error::Result;
use crate::types::Hotspot;

/// Counters for one finished batch run
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BatchStats {
    /// Posts in the batch after boundary validation
    pub total_posts: usize,
    /// Posts that joined a cluster
    pub clustered_posts: usize,
    /// Posts labeled noise
    pub noise_posts: usize,
    /// Clusters found, equal to the number of hotspots
    pub cluster_count: usize,
    /// Wall-clock time of the run in milliseconds
    pub elapsed_ms: u64,
}

/// One-batch hotspot detection: store in, enriched hotspots out
///
/// The pipeline owns the clusterer, the aggregator, and the collaborator
/// handles; one instance serves any number of batches, and separate batches
/// carry no shared mutable state, so independent pipelines may run
/// concurrently.
pub struct HotspotPipeline {
    clusterer: DensityClusterer,
    aggregator: HotspotAggregator,
}

impl HotspotPipeline {
    /// Build a pipeline around explicit collaborator handles
    pub fn new(
        config: &HotspotConfig,
        classifier: Arc<dyn CategoryClassifier>,
        scorer: Arc<dyn SentimentScorer>,
    ) -> Self {
        Self {
            clusterer: DensityClusterer::from_config(&config.clustering),
            aggregator: HotspotAggregator::new(classifier, scorer, config.enrichment.clone()),
        }
    }

    /// Build a pipeline with the built-in reference collaborators
    pub fn with_reference_collaborators(config: &HotspotConfig) -> Self {
        Self::new(
            config,
            Arc::new(KeywordCategoryClassifier::new()),
            Arc::new(LexiconSentimentScorer::new()),
        )
    }

    /// Run one batch: cluster, aggregate, enrich
    ///
    /// An empty batch or an all-noise result is a successful zero-hotspot
    /// run, not an error.
    pub fn run(&self, batch: &PostBatch) -> Result<(Vec<Hotspot>, BatchStats)> {
        let started = Instant::now();

        tracing::info!(posts = batch.len(), "starting hotspot batch run");
        let outcome = self.clusterer.cluster(batch.posts())?;
        let hotspots = self.aggregator.aggregate(batch.posts(), &outcome);

        let stats = BatchStats {
            total_posts: batch.len(),
            clustered_posts: outcome.clustered_count(),
            noise_posts: outcome.noise_count(),
            cluster_count: outcome.cluster_count(),
            elapsed_ms: started.elapsed().as_millis() as u64,
        };

        if hotspots.is_empty() {
            tracing::info!(
                posts = stats.total_posts,
                elapsed_ms = stats.elapsed_ms,
                "zero-hotspot run: no cluster met the density floor"
            );
        } else {
            tracing::info!(
                hotspots = hotspots.len(),
                clustered = stats.clustered_posts,
                noise = stats.noise_posts,
                elapsed_ms = stats.elapsed_ms,
                "batch run complete"
            );
        }

        Ok((hotspots, stats))
    }
}
