//! Precomputed epsilon-neighborhoods for one clustering run

use rayon::prelude::*;

use crate::types::LocatedPost;

/// Epsilon-neighborhoods of every post in a batch, indexed by input position
///
/// The neighbor relation is symmetric and reflexive: each post is its own
/// neighbor, and a post exactly at distance `epsilon` counts (inclusive
/// boundary). Distances are planar Euclidean over raw (lat, long), valid only
/// for small bounding regions.
///
/// Building the index is the O(n²) part of a clustering run. Each row is
/// independent of the others, so rows are computed in parallel; the labeling
/// pass that consumes them stays sequential.
#[derive(Debug, Clone)]
pub struct NeighborIndex {
    neighborhoods: Vec<Vec<usize>>,
}

impl NeighborIndex {
    /// Compute all neighborhoods for `posts` with radius `epsilon`
    pub fn build(posts: &[LocatedPost], epsilon: f64) -> Self {
        let neighborhoods = posts
            .par_iter()
            .map(|p| {
                posts
                    .iter()
                    .enumerate()
                    .filter(|(_, q)| p.coordinate.distance_to(&q.coordinate) <= epsilon)
                    .map(|(j, _)| j)
                    .collect()
            })
            .collect();

        Self { neighborhoods }
    }

    /// Neighborhood of the post at `index`, as input positions
    pub fn neighbors_of(&self, index: usize) -> &[usize] {
        &self.neighborhoods[index]
    }

    /// Neighborhood cardinality of the post at `index` (includes the post)
    pub fn neighbor_count(&self, index: usize) -> usize {
        self.neighborhoods[index].len()
    }

    /// Number of indexed posts
    pub fn len(&self) -> usize {
        self.neighborhoods.len()
    }

    /// Whether the index is empty
    pub fn is_empty(&self) -> bool {
        self.neighborhoods.is_empty()
    }
}
