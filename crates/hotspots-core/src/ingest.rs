//! Raw platform payload resolution into located posts
//!
//! Converts one raw platform JSON payload into a [`LocatedPost`] candidate,
//! without any transport. Transport, batching, and warehouse writes belong to
//! the ingestion collaborator; this module only owns the field-resolution
//! rules so that the CLI and tests can feed raw payloads straight into a
//! batch.

use chrono::{DateTime, Utc};
use serde::Deserialize;

use crate::error::{Error, Result};
use crate::types::{Coordinate, LocatedPost};

/// Largest bounding-box diagonal, in coordinate-distance units, still
/// acceptable as a point location
pub const BOUNDING_BOX_THRESHOLD: f64 = 0.005;

/// Platform timestamp format, e.g. `Wed Oct 10 20:19:24 +0000 2018`
const CREATED_AT_FORMAT: &str = "%a %b %d %H:%M:%S %z %Y";

#[derive(Debug, Deserialize)]
struct RawPost {
    id: serde_json::Value,
    created_at: String,
    text: String,
    #[serde(default)]
    extended_tweet: Option<RawExtendedText>,
    #[serde(default)]
    coordinates: Option<RawPoint>,
    #[serde(default)]
    geo: Option<RawPoint>,
    #[serde(default)]
    place: Option<RawPlace>,
}

#[derive(Debug, Deserialize)]
struct RawExtendedText {
    #[serde(default)]
    full_text: Option<String>,
}

#[derive(Debug, Deserialize)]
struct RawPoint {
    #[serde(rename = "type")]
    kind: String,
    coordinates: [f64; 2],
}

#[derive(Debug, Deserialize)]
struct RawPlace {
    #[serde(default)]
    bounding_box: Option<RawBoundingBox>,
}

#[derive(Debug, Deserialize)]
struct RawBoundingBox {
    #[serde(default)]
    coordinates: Vec<Vec<[f64; 2]>>,
}

/// Resolve a raw platform JSON payload into a located post
///
/// Returns `Ok(None)` when the payload carries no usable location; the caller
/// skips such posts. Malformed JSON, a missing field, or an unparseable
/// timestamp is an [`Error::Payload`].
///
/// The text prefers the extended full text (long-form posts) over the
/// truncated legacy `text` field. The coordinate is resolved from, in order:
/// an exact `coordinates` Point (GeoJSON, lon/lat order), a `geo` Point
/// (lat/lon order), or the midpoint of the `place` bounding box when the box
/// diagonal is at most [`BOUNDING_BOX_THRESHOLD`].
pub fn resolve_post(payload: &str) -> Result<Option<LocatedPost>> {
    let raw: RawPost = serde_json::from_str(payload)
        .map_err(|e| Error::payload(format!("unparseable post payload: {}", e)))?;

    let coordinate = match resolve_coordinate(&raw) {
        Some(coordinate) => coordinate,
        None => return Ok(None),
    };

    let id = match &raw.id {
        serde_json::Value::String(s) => s.clone(),
        serde_json::Value::Number(n) => n.to_string(),
        other => {
            return Err(Error::payload(format!("unusable post id: {}", other)));
        }
    };

    let created_at = parse_created_at(&raw.created_at)?;
    let text = resolve_text(&raw);

    Ok(Some(LocatedPost::new(id, created_at, text, coordinate)))
}

/// Parse the platform's `created_at` timestamp into UTC
pub fn parse_created_at(value: &str) -> Result<DateTime<Utc>> {
    DateTime::parse_from_str(value, CREATED_AT_FORMAT)
        .map(|dt| dt.with_timezone(&Utc))
        .map_err(|e| Error::payload(format!("unparseable created_at '{}': {}", value, e)))
}

fn resolve_text(raw: &RawPost) -> String {
    if let Some(extended) = &raw.extended_tweet {
        if let Some(full_text) = &extended.full_text {
            if !full_text.is_empty() {
                return full_text.clone();
            }
        }
    }
    raw.text.clone()
}

fn resolve_coordinate(raw: &RawPost) -> Option<Coordinate> {
    // Exact GeoJSON point: [longitude, latitude].
    if let Some(point) = &raw.coordinates {
        if point.kind == "Point" {
            return Some(Coordinate::new(point.coordinates[1], point.coordinates[0]));
        }
    }

    // Legacy geo point: [latitude, longitude].
    if let Some(point) = &raw.geo {
        if point.kind == "Point" {
            return Some(Coordinate::new(point.coordinates[0], point.coordinates[1]));
        }
    }

    // A small-enough place bounding box collapses to its midpoint.
    if let Some(bbox) = raw.place.as_ref().and_then(|p| p.bounding_box.as_ref()) {
        if let Some(corners) = bbox.coordinates.first() {
            if corners.len() == 4 {
                let long_diff = corners[1][0] - corners[2][0];
                let lat_diff = corners[0][1] - corners[1][1];
                let diagonal = (lat_diff * lat_diff + long_diff * long_diff).sqrt();
                if diagonal <= BOUNDING_BOX_THRESHOLD {
                    // True midpoint, averaging the corners that differ per
                    // axis. Works for either corner winding.
                    return Some(Coordinate::new(
                        (corners[0][1] + corners[1][1]) * 0.5,
                        (corners[1][0] + corners[2][0]) * 0.5,
                    ));
                }
            }
        }
    }

    None
}
