//! Reportable hotspot rows and sink contracts
//!
//! Warehouse persistence is external to this crate; the core only defines the
//! row shape a sink consumes and ships two trivial sinks, one for JSON-lines
//! output and one in-memory for tests.

use std::io::Write;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::Result;
use crate::types::{Hotspot, Sentiment};

/// Flat, serializable row for one hotspot
///
/// `id` is the hotspot's globally unique id, safe for downstream storage
/// deduplication across runs; member posts are carried as a comma-joined id
/// list next to the full corpus.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HotspotRecord {
    /// Globally unique hotspot id
    pub id: Uuid,
    /// Centroid latitude in decimal degrees
    pub coord_lat: f64,
    /// Centroid longitude in decimal degrees
    pub coord_long: f64,
    /// Number of member posts
    pub num_posts: usize,
    /// Comma-joined member post ids, discovery order
    pub post_ids: String,
    /// Newline-joined member texts, discovery order
    pub corpus: String,
    /// Aggregate sentiment
    pub sentiment: Sentiment,
    /// Topic category name, absent when none cleared the floor
    pub category: Option<String>,
    /// Instant the batch run produced this record
    pub generated_at: DateTime<Utc>,
}

impl HotspotRecord {
    /// Flatten a hotspot into a row stamped with `generated_at`
    ///
    /// One batch run stamps all of its records with the same instant.
    pub fn from_hotspot(hotspot: &Hotspot, generated_at: DateTime<Utc>) -> Self {
        Self {
            id: hotspot.id,
            coord_lat: hotspot.centroid.latitude,
            coord_long: hotspot.centroid.longitude,
            num_posts: hotspot.posts.len(),
            post_ids: hotspot
                .posts
                .iter()
                .map(|p| p.id.as_str())
                .collect::<Vec<_>>()
                .join(","),
            corpus: hotspot.corpus.clone(),
            sentiment: hotspot.sentiment,
            category: hotspot.category.map(|c| c.to_string()),
            generated_at,
        }
    }
}

/// Destination for finished hotspot records
///
/// The Reporting Sink collaborator contract. Implementations own their retry
/// and persistence policy; the core never retries.
pub trait ReportSink {
    /// Persist or display one record
    fn emit(&mut self, record: &HotspotRecord) -> Result<()>;

    /// Sink name for logging
    fn name(&self) -> &str;
}

/// Writes one JSON object per line to any [`Write`] target
pub struct JsonLinesSink<W: Write> {
    writer: W,
}

impl<W: Write> JsonLinesSink<W> {
    /// Wrap a writer
    pub fn new(writer: W) -> Self {
        Self { writer }
    }

    /// Unwrap the writer, e.g. to inspect a buffer in tests
    pub fn into_inner(self) -> W {
        self.writer
    }
}

impl<W: Write> ReportSink for JsonLinesSink<W> {
    fn emit(&mut self, record: &HotspotRecord) -> Result<()> {
        serde_json::to_writer(&mut self.writer, record)?;
        self.writer.write_all(b"\n")?;
        Ok(())
    }

    fn name(&self) -> &str {
        "json-lines"
    }
}

/// Collects records in memory, for tests
#[derive(Debug, Default)]
pub struct VecSink {
    records: Vec<HotspotRecord>,
}

impl VecSink {
    /// Create an empty sink
    pub fn new() -> Self {
        Self::default()
    }

    /// Records emitted so far
    pub fn records(&self) -> &[HotspotRecord] {
        &self.records
    }
}

impl ReportSink for VecSink {
    fn emit(&mut self, record: &HotspotRecord) -> Result<()> {
        self.records.push(record.clone());
        Ok(())
    }

    fn name(&self) -> &str {
        "vec"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{Category, Coordinate, LocatedPost};

    fn hotspot() -> Hotspot {
        let posts = vec![
            LocatedPost::new("1", Utc::now(), "first", Coordinate::new(40.0, -74.0)),
            LocatedPost::new("2", Utc::now(), "second", Coordinate::new(40.001, -74.001)),
        ];
        let corpus = Hotspot::corpus_of(&posts);
        Hotspot::new(1, posts, corpus, Sentiment::Positive, Some(Category::Business))
    }

    #[test]
    fn test_record_flattens_hotspot() {
        let hotspot = hotspot();
        let stamp = Utc::now();
        let record = HotspotRecord::from_hotspot(&hotspot, stamp);

        assert_eq!(record.id, hotspot.id);
        assert_eq!(record.num_posts, 2);
        assert_eq!(record.post_ids, "1,2");
        assert_eq!(record.corpus, "first\nsecond");
        assert_eq!(record.sentiment, Sentiment::Positive);
        assert_eq!(record.category.as_deref(), Some("business"));
        assert_eq!(record.generated_at, stamp);
    }

    #[test]
    fn test_absent_category_serializes_null() {
        let posts = vec![LocatedPost::new(
            "1",
            Utc::now(),
            "text",
            Coordinate::new(0.0, 0.0),
        )];
        let corpus = Hotspot::corpus_of(&posts);
        let hotspot = Hotspot::new(1, posts, corpus, Sentiment::Neutral, None);
        let record = HotspotRecord::from_hotspot(&hotspot, Utc::now());

        let json = serde_json::to_value(&record).unwrap();
        assert!(json["category"].is_null());
    }

    #[test]
    fn test_json_lines_sink_writes_one_line_per_record() {
        let mut sink = JsonLinesSink::new(Vec::new());
        let record = HotspotRecord::from_hotspot(&hotspot(), Utc::now());
        sink.emit(&record).unwrap();
        sink.emit(&record).unwrap();

        let out = String::from_utf8(sink.into_inner()).unwrap();
        let lines: Vec<&str> = out.lines().collect();
        assert_eq!(lines.len(), 2);
        for line in lines {
            let parsed: HotspotRecord = serde_json::from_str(line).unwrap();
            assert_eq!(parsed.id, record.id);
        }
    }

    #[test]
    fn test_vec_sink_collects() {
        let mut sink = VecSink::new();
        let record = HotspotRecord::from_hotspot(&hotspot(), Utc::now());
        sink.emit(&record).unwrap();
        assert_eq!(sink.records().len(), 1);
        assert_eq!(sink.records()[0].post_ids, "1,2");
    }
}
