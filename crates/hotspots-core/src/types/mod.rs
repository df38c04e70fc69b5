//! Core types for hotspot detection

pub mod hotspot;
pub mod label;
pub mod post;

pub use hotspot::{Category, Hotspot, Sentiment};
pub use label::ClusterLabel;
pub use post::{Coordinate, LocatedPost};
