//! Per-point cluster labels

/// Classification assigned to one post during a clustering run
///
/// Labels live in a `Vec<ClusterLabel>` parallel to the post slice, indexed
/// by input position, and are never persisted. Cluster ids are positive,
/// unique within one run, and assigned in discovery order starting at 1.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ClusterLabel {
    /// Not yet examined
    Unvisited,
    /// Examined, neighborhood too sparse, not annexed by any cluster
    Noise,
    /// Member of the cluster with the given id
    Member(u32),
}

impl ClusterLabel {
    /// Whether the point ended up in a cluster
    pub fn is_member(&self) -> bool {
        matches!(self, Self::Member(_))
    }

    /// Whether the point ended up as noise
    pub fn is_noise(&self) -> bool {
        matches!(self, Self::Noise)
    }

    /// The cluster id, if the point is a member
    pub fn cluster_id(&self) -> Option<u32> {
        match self {
            Self::Member(id) => Some(*id),
            _ => None,
        }
    }
}
