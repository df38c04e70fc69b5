//! Density-based spatial clustering over located posts

pub mod engine;
pub mod neighbors;

pub use engine::{ClusteringOutcome, DensityClusterer};
pub use neighbors::NeighborIndex;
