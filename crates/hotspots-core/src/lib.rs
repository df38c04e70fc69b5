//! hotspots-core: density-based detection of geographic social-media hotspots
//!
//! This crate turns one batch of geotagged short-text posts into a sequence of
//! enriched hotspot records. It clusters posts by spatial density (DBSCAN over
//! planar lat/long coordinates), aggregates each cluster into a centroid and
//! text corpus, and enriches the result with sentiment and a topic category
//! through pluggable collaborator traits. Ingestion from a streaming source
//! and warehouse persistence live outside this crate; the core is a pure batch
//! transformation invoked as a library call.

pub mod aggregate;
pub mod batch;
pub mod cluster;
pub mod config;
pub mod enrich;
pub mod error;
pub mod ingest;
pub mod pipeline;
pub mod report;
pub mod types;

pub use aggregate::HotspotAggregator;
pub use batch::PostBatch;
pub use cluster::{ClusteringOutcome, DensityClusterer};
pub use config::HotspotConfig;
pub use enrich::{CategoryClassifier, SentimentScorer};
pub use error::{Error, Result};
pub use pipeline::{BatchStats, HotspotPipeline};
pub use types::{Category, ClusterLabel, Coordinate, Hotspot, LocatedPost, Sentiment};
