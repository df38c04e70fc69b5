//! DBSCAN-style cluster expansion over a post batch

use std::collections::VecDeque;

use crate::cluster::neighbors::NeighborIndex;
use crate::config::ClusteringConfig;
use crate::error::{Error, Result};
use crate::types::{ClusterLabel, LocatedPost};

/// Density-based clusterer for one batch of located posts
///
/// Labels every post `Noise` or `Member(cluster_id)` by density expansion:
/// a post whose epsilon-neighborhood holds at least `min_points` posts is a
/// core point and seeds a cluster; neighbors of core points join it, and
/// neighbors that are themselves core points keep the expansion going.
///
/// Two traversal rules are deliberate and must not be "fixed":
/// - A point first labeled `Noise` and later reached from a core point is
///   annexed as a border member but never re-expanded from, even if its own
///   neighborhood is dense. Some DBSCAN variants re-examine such points;
///   this engine does not.
/// - A point reachable from core points of two different clusters belongs to
///   whichever cluster reaches it first in traversal order. Clusters are
///   never merged after a border point is claimed.
///
/// Iteration follows input order, so cluster id numbering depends on the
/// input sequence. Membership as a set does not: the same posts end up in the
/// same groups regardless of which group is numbered first.
#[derive(Debug, Clone)]
pub struct DensityClusterer {
    epsilon: f64,
    min_points: usize,
}

impl DensityClusterer {
    /// Create a clusterer with the given radius and density floor
    pub fn new(epsilon: f64, min_points: usize) -> Self {
        Self {
            epsilon,
            min_points,
        }
    }

    /// Create a clusterer from clustering configuration
    pub fn from_config(config: &ClusteringConfig) -> Self {
        Self::new(config.epsilon, config.min_points)
    }

    /// Neighborhood radius in coordinate-distance units
    pub fn epsilon(&self) -> f64 {
        self.epsilon
    }

    /// Minimum neighborhood size for a core point
    pub fn min_points(&self) -> usize {
        self.min_points
    }

    /// Label every post in the slice
    ///
    /// Fails fast with [`Error::InvalidCoordinate`] if any post carries a
    /// non-finite coordinate; the batch boundary should already have rejected
    /// those, but the engine does not assume its caller.
    pub fn cluster(&self, posts: &[LocatedPost]) -> Result<ClusteringOutcome> {
        for post in posts {
            if !post.coordinate.is_finite() {
                return Err(Error::invalid_coordinate(
                    post.id.clone(),
                    post.coordinate.latitude,
                    post.coordinate.longitude,
                ));
            }
        }

        let n = posts.len();
        if n == 0 {
            return Ok(ClusteringOutcome::empty());
        }

        // The O(n^2) neighbor search, precomputed in parallel. The labeling
        // pass below is inherently sequential: a point's label can depend on
        // labels already assigned to its neighbors.
        let index = NeighborIndex::build(posts, self.epsilon);

        let mut labels = vec![ClusterLabel::Unvisited; n];
        let mut clusters: Vec<Vec<usize>> = Vec::new();

        for i in 0..n {
            if labels[i] != ClusterLabel::Unvisited {
                continue;
            }

            if index.neighbor_count(i) < self.min_points {
                // Provisional: may be annexed as a border member later.
                labels[i] = ClusterLabel::Noise;
                continue;
            }

            let cluster_id = clusters.len() as u32 + 1;
            labels[i] = ClusterLabel::Member(cluster_id);
            let mut members = vec![i];

            self.expand_cluster(i, cluster_id, &index, &mut labels, &mut members);
            clusters.push(members);
        }

        tracing::debug!(
            posts = n,
            clusters = clusters.len(),
            noise = labels.iter().filter(|l| l.is_noise()).count(),
            "clustering pass complete"
        );

        Ok(ClusteringOutcome { labels, clusters })
    }

    /// Grow cluster `cluster_id` outward from the core point at `seed`
    fn expand_cluster(
        &self,
        seed: usize,
        cluster_id: u32,
        index: &NeighborIndex,
        labels: &mut [ClusterLabel],
        members: &mut Vec<usize>,
    ) {
        // Explicit work-list over point indices; the bitset records every
        // index ever enqueued (seed included) so nothing enters twice.
        let mut work_list: VecDeque<usize> = VecDeque::new();
        let mut enqueued = vec![false; labels.len()];
        enqueued[seed] = true;

        for &q in index.neighbors_of(seed) {
            if !enqueued[q] {
                enqueued[q] = true;
                work_list.push_back(q);
            }
        }

        while let Some(q) = work_list.pop_front() {
            match labels[q] {
                ClusterLabel::Noise => {
                    // Border annexation: joins the cluster, never expands it.
                    labels[q] = ClusterLabel::Member(cluster_id);
                    members.push(q);
                }
                ClusterLabel::Unvisited => {
                    labels[q] = ClusterLabel::Member(cluster_id);
                    members.push(q);

                    if index.neighbor_count(q) >= self.min_points {
                        for &r in index.neighbors_of(q) {
                            if !enqueued[r] {
                                enqueued[r] = true;
                                work_list.push_back(r);
                            }
                        }
                    }
                }
                // First-writer-wins: already claimed by this or an earlier
                // cluster, leave it alone.
                ClusterLabel::Member(_) => {}
            }
        }
    }
}

/// Result of one clustering run
#[derive(Debug, Clone)]
pub struct ClusteringOutcome {
    /// Final label per post, parallel to the input slice
    labels: Vec<ClusterLabel>,
    /// Member indices per cluster in discovery order; cluster id `c` lives at
    /// position `c - 1`
    clusters: Vec<Vec<usize>>,
}

impl ClusteringOutcome {
    fn empty() -> Self {
        Self {
            labels: Vec::new(),
            clusters: Vec::new(),
        }
    }

    /// Final label per post, indexed by input position
    pub fn labels(&self) -> &[ClusterLabel] {
        &self.labels
    }

    /// Member indices of each cluster, in discovery order
    pub fn clusters(&self) -> &[Vec<usize>] {
        &self.clusters
    }

    /// Number of clusters found
    pub fn cluster_count(&self) -> usize {
        self.clusters.len()
    }

    /// Number of posts labeled noise
    pub fn noise_count(&self) -> usize {
        self.labels.iter().filter(|l| l.is_noise()).count()
    }

    /// Number of posts that joined a cluster
    pub fn clustered_count(&self) -> usize {
        self.labels.iter().filter(|l| l.is_member()).count()
    }
}
