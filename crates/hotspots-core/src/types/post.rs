//! Located post and coordinate types

use std::fmt;
use std::hash::{Hash, Hasher};

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A (latitude, longitude) pair in decimal degrees
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Coordinate {
    /// Latitude in decimal degrees
    pub latitude: f64,
    /// Longitude in decimal degrees
    pub longitude: f64,
}

impl Coordinate {
    /// Create a new coordinate
    pub fn new(latitude: f64, longitude: f64) -> Self {
        Self {
            latitude,
            longitude,
        }
    }

    /// Check that both components are finite
    pub fn is_finite(&self) -> bool {
        self.latitude.is_finite() && self.longitude.is_finite()
    }

    /// Euclidean distance to another coordinate on a flat plane
    ///
    /// Latitude and longitude are treated as plain x/y axes. This is not a
    /// geodesic distance; the approximation only holds for small bounding
    /// regions (a metro area, not a continent).
    pub fn distance_to(&self, other: &Coordinate) -> f64 {
        let dlat = self.latitude - other.latitude;
        let dlong = self.longitude - other.longitude;
        (dlat * dlat + dlong * dlong).sqrt()
    }
}

impl fmt::Display for Coordinate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({:.6}, {:.6})", self.latitude, self.longitude)
    }
}

/// A geotagged short-text post, the input unit of one batch run
///
/// Identity is the `id` token alone: two posts with equal ids are the same
/// post for set and map membership even when their other fields differ.
/// Posts are created by the ingestion collaborator, read-only inside the
/// core, and discarded after the batch.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LocatedPost {
    /// Opaque platform-assigned token
    pub id: String,
    /// Platform creation timestamp
    pub created_at: DateTime<Utc>,
    /// Post text as received
    pub raw_text: String,
    /// Resolved location
    pub coordinate: Coordinate,
}

impl LocatedPost {
    /// Create a new located post
    pub fn new(
        id: impl Into<String>,
        created_at: DateTime<Utc>,
        raw_text: impl Into<String>,
        coordinate: Coordinate,
    ) -> Self {
        Self {
            id: id.into(),
            created_at,
            raw_text: raw_text.into(),
            coordinate,
        }
    }
}

impl PartialEq for LocatedPost {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
    }
}

impl Eq for LocatedPost {}

impl Hash for LocatedPost {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.id.hash(state);
    }
}

impl fmt::Display for LocatedPost {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "post {} @ {}: {}", self.id, self.coordinate, self.raw_text)
    }
}
