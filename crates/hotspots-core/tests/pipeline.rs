//! End-to-end batch scenarios over the clustering and aggregation pipeline

use std::collections::BTreeSet;
use std::sync::Arc;

use chrono::Utc;
use proptest::prelude::*;

use hotspots_core::cluster::DensityClusterer;
use hotspots_core::enrich::{CategoryClassifier, SentimentScorer};
use hotspots_core::report::{HotspotRecord, ReportSink, VecSink};
use hotspots_core::{
    Category, Coordinate, HotspotConfig, HotspotPipeline, LocatedPost, PostBatch, Sentiment,
};

struct FakeScorer(f64);

impl SentimentScorer for FakeScorer {
    fn score(&self, _text: &str) -> hotspots_core::Result<f64> {
        Ok(self.0)
    }

    fn name(&self) -> &str {
        "fake"
    }
}

struct FakeClassifier(Option<Category>);

impl CategoryClassifier for FakeClassifier {
    fn classify(
        &self,
        _text: &str,
        _confidence_floor: f64,
    ) -> hotspots_core::Result<Option<Category>> {
        Ok(self.0)
    }

    fn name(&self) -> &str {
        "fake"
    }
}

fn post(id: &str, lat: f64, long: f64) -> LocatedPost {
    LocatedPost::new(id, Utc::now(), format!("text from {}", id), Coordinate::new(lat, long))
}

/// `count` posts within a 0.0005-degree diagonal around (lat, long)
fn packed_group(prefix: &str, lat: f64, long: f64, count: usize) -> Vec<LocatedPost> {
    (0..count)
        .map(|k| {
            let offset = k as f64 * 0.00005;
            post(&format!("{}{}", prefix, k), lat + offset, long + offset)
        })
        .collect()
}

fn pipeline() -> HotspotPipeline {
    HotspotPipeline::new(
        &HotspotConfig::default(),
        Arc::new(FakeClassifier(Some(Category::Entertainment))),
        Arc::new(FakeScorer(0.6)),
    )
}

#[test]
fn scenario_packed_six_forms_one_hotspot() {
    // 6 points tightly packed, min_points 5: one cluster of all 6, no noise.
    let batch = PostBatch::new(packed_group("p", 40.0, -74.0, 6)).unwrap();
    let (hotspots, stats) = pipeline().run(&batch).unwrap();

    assert_eq!(hotspots.len(), 1);
    assert_eq!(hotspots[0].post_count(), 6);
    assert_eq!(stats.noise_posts, 0);
}

#[test]
fn scenario_four_packed_below_floor_all_noise() {
    // 4 packed points cannot meet min_points 5: no hotspots.
    let batch = PostBatch::new(packed_group("p", 40.0, -74.0, 4)).unwrap();
    let (hotspots, stats) = pipeline().run(&batch).unwrap();

    assert!(hotspots.is_empty());
    assert_eq!(stats.noise_posts, 4);
}

#[test]
fn scenario_two_distant_groups_two_hotspots() {
    // Two tight groups 1.0 degree apart: two hotspots, no cross-contamination.
    let mut posts = packed_group("a", 40.0, -74.0, 6);
    posts.extend(packed_group("b", 41.0, -74.0, 6));
    let batch = PostBatch::new(posts).unwrap();

    let (hotspots, _) = pipeline().run(&batch).unwrap();
    assert_eq!(hotspots.len(), 2);

    for hotspot in &hotspots {
        let prefixes: BTreeSet<char> = hotspot
            .posts
            .iter()
            .map(|p| p.id.chars().next().unwrap())
            .collect();
        assert_eq!(prefixes.len(), 1, "groups must not mix");
        assert_eq!(hotspot.post_count(), 6);
    }
}

#[test]
fn scenario_bridge_point_merges_groups() {
    // A bridge within epsilon of a core point on each side joins the two
    // dense groups into one hotspot through density-reachability.
    let mut posts = packed_group("a", 40.0, -74.0, 6);
    posts.extend(packed_group("b", 40.003, -74.0, 6));
    posts.push(post("bridge", 40.0016, -74.0));
    let batch = PostBatch::new(posts).unwrap();

    let (hotspots, stats) = pipeline().run(&batch).unwrap();
    assert_eq!(hotspots.len(), 1);
    assert_eq!(hotspots[0].post_count(), 13);
    assert_eq!(stats.noise_posts, 0);
}

#[test]
fn scenario_empty_input_empty_output() {
    let batch = PostBatch::new(Vec::new()).unwrap();
    let (hotspots, _) = pipeline().run(&batch).unwrap();
    assert!(hotspots.is_empty());
}

#[test]
fn enrichment_values_flow_from_collaborators() {
    let batch = PostBatch::new(packed_group("p", 40.0, -74.0, 6)).unwrap();
    let (hotspots, _) = pipeline().run(&batch).unwrap();

    assert_eq!(hotspots[0].sentiment, Sentiment::Positive);
    assert_eq!(hotspots[0].category, Some(Category::Entertainment));
}

#[test]
fn hotspots_flow_into_report_sink() {
    let mut posts = packed_group("a", 40.0, -74.0, 6);
    posts.extend(packed_group("b", 41.0, -74.0, 6));
    let batch = PostBatch::new(posts).unwrap();

    let (hotspots, _) = pipeline().run(&batch).unwrap();

    let generated_at = Utc::now();
    let mut sink = VecSink::new();
    for hotspot in &hotspots {
        sink.emit(&HotspotRecord::from_hotspot(hotspot, generated_at))
            .unwrap();
    }

    assert_eq!(sink.records().len(), 2);
    for (record, hotspot) in sink.records().iter().zip(&hotspots) {
        assert_eq!(record.id, hotspot.id);
        assert_eq!(record.num_posts, 6);
        assert_eq!(record.generated_at, generated_at);
    }
}

#[test]
fn corpus_holds_each_member_text_exactly_once() {
    let batch = PostBatch::new(packed_group("p", 40.0, -74.0, 6)).unwrap();
    let (hotspots, _) = pipeline().run(&batch).unwrap();

    let hotspot = &hotspots[0];
    let lines: Vec<&str> = hotspot.corpus.lines().collect();
    assert_eq!(lines.len(), hotspot.post_count());
    for member in &hotspot.posts {
        assert_eq!(lines.iter().filter(|l| **l == member.raw_text).count(), 1);
    }
}

fn coordinate_strategy() -> impl Strategy<Value = (f64, f64)> {
    // A small urban-scale box, where the planar approximation holds.
    (40.0..40.01f64, -74.01..-74.0f64)
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(64))]

    /// Re-running clustering on the same input yields the same partition.
    #[test]
    fn prop_membership_is_deterministic(coords in prop::collection::vec(coordinate_strategy(), 0..60)) {
        let posts: Vec<LocatedPost> = coords
            .iter()
            .enumerate()
            .map(|(i, (lat, long))| post(&format!("p{}", i), *lat, *long))
            .collect();

        let clusterer = DensityClusterer::new(0.002, 5);
        let first = clusterer.cluster(&posts).unwrap();
        let second = clusterer.cluster(&posts).unwrap();

        prop_assert_eq!(first.labels(), second.labels());
        prop_assert_eq!(first.clusters(), second.clusters());
    }

    /// Every cluster meets the density floor and every noise point is sparse.
    #[test]
    fn prop_density_and_noise_invariants(coords in prop::collection::vec(coordinate_strategy(), 0..60)) {
        let posts: Vec<LocatedPost> = coords
            .iter()
            .enumerate()
            .map(|(i, (lat, long))| post(&format!("p{}", i), *lat, *long))
            .collect();

        let min_points = 5;
        let epsilon = 0.002;
        let outcome = DensityClusterer::new(epsilon, min_points).cluster(&posts).unwrap();

        for cluster in outcome.clusters() {
            prop_assert!(cluster.len() >= min_points);
        }

        // Noise points are never core points.
        for (i, label) in outcome.labels().iter().enumerate() {
            if label.is_noise() {
                let neighborhood = posts
                    .iter()
                    .filter(|q| posts[i].coordinate.distance_to(&q.coordinate) <= epsilon)
                    .count();
                prop_assert!(neighborhood < min_points);
            }
        }

        // Every post ends up either clustered or noise.
        let labeled = outcome.clustered_count() + outcome.noise_count();
        prop_assert_eq!(labeled, posts.len());
    }
}
