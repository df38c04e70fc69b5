//! In-memory post store for one batch run

use std::collections::HashSet;

use chrono::{DateTime, Utc};

use crate::error::{Error, Result};
use crate::types::LocatedPost;

/// Order-stable collection of located posts for one batch run
///
/// The batch is an immutable snapshot from the clustering engine's point of
/// view: posts keep their input order (cluster id numbering depends on it),
/// and the store is discarded after the run. Batches are independent, so
/// separate runs may execute concurrently without coordination.
#[derive(Debug, Clone, Default)]
pub struct PostBatch {
    posts: Vec<LocatedPost>,
}

impl PostBatch {
    /// Build a batch from posts, validating every coordinate
    ///
    /// A non-finite coordinate fails the whole batch with
    /// [`Error::InvalidCoordinate`] naming the offending post. Duplicate
    /// post ids keep the first occurrence.
    pub fn new(posts: Vec<LocatedPost>) -> Result<Self> {
        let mut seen = HashSet::with_capacity(posts.len());
        let mut accepted = Vec::with_capacity(posts.len());

        for post in posts {
            if !post.coordinate.is_finite() {
                return Err(Error::invalid_coordinate(
                    post.id,
                    post.coordinate.latitude,
                    post.coordinate.longitude,
                ));
            }
            if !seen.insert(post.id.clone()) {
                tracing::debug!("dropping duplicate post id {}", post.id);
                continue;
            }
            accepted.push(post);
        }

        Ok(Self { posts: accepted })
    }

    /// Number of posts in the batch
    pub fn len(&self) -> usize {
        self.posts.len()
    }

    /// Whether the batch holds no posts
    pub fn is_empty(&self) -> bool {
        self.posts.is_empty()
    }

    /// Posts in input order
    pub fn posts(&self) -> &[LocatedPost] {
        &self.posts
    }

    /// Iterate posts in input order
    pub fn iter(&self) -> impl Iterator<Item = &LocatedPost> {
        self.posts.iter()
    }

    /// Drop posts created before the cutoff instant, keeping order
    pub fn retain_created_since(&mut self, cutoff: DateTime<Utc>) {
        let before = self.posts.len();
        self.posts.retain(|p| p.created_at >= cutoff);
        let dropped = before - self.posts.len();
        if dropped > 0 {
            tracing::debug!("recency filter dropped {} of {} posts", dropped, before);
        }
    }

    /// Consume the batch, yielding the posts
    pub fn into_posts(self) -> Vec<LocatedPost> {
        self.posts
    }
}
