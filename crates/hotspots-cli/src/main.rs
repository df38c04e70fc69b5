//! Batch hotspot detection binary
//!
//! Reads JSON-lines posts from a file or stdin, runs one clustering batch,
//! and writes one JSON hotspot record per line to a file or stdout. Input
//! lines are serialized located posts by default; `--raw` accepts raw
//! platform payloads and resolves their text and coordinates first.

use std::fs::File;
use std::io::{self, BufRead, BufReader, BufWriter, Read, Write};
use std::path::PathBuf;

use anyhow::Context;
use chrono::{Duration, Utc};
use clap::Parser;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use hotspots_core::ingest::resolve_post;
use hotspots_core::report::{HotspotRecord, JsonLinesSink, ReportSink};
use hotspots_core::{Hotspot, HotspotConfig, HotspotPipeline, LocatedPost, PostBatch};

/// Detect geographic hotspots in a batch of geotagged posts
#[derive(Parser)]
#[command(name = "hotspots")]
#[command(version)]
#[command(about = "Density-based hotspot detection over geotagged social-media posts")]
struct Cli {
    /// TOML configuration file; reference defaults apply when omitted
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Input file of JSON-lines posts; reads stdin when omitted
    #[arg(short, long)]
    input: Option<PathBuf>,

    /// Output file for JSON-lines hotspot records; writes stdout when omitted
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Treat input lines as raw platform payloads instead of located posts
    #[arg(long)]
    raw: bool,

    /// Keep only posts created at most this many minutes ago
    /// (overrides the configured recency filter)
    #[arg(long)]
    max_age_mins: Option<i64>,

    /// Print each hotspot with its member texts to stderr
    #[arg(short, long)]
    verbose: bool,
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "hotspots=info,hotspots_core=info".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(io::stderr))
        .init();

    let cli = Cli::parse();

    let config = match &cli.config {
        Some(path) => HotspotConfig::from_toml_file(path)
            .with_context(|| format!("loading config from {}", path.display()))?,
        None => HotspotConfig::default(),
    };

    let posts = read_posts(&cli)?;
    tracing::info!(posts = posts.len(), raw = cli.raw, "input read");

    let mut batch = PostBatch::new(posts).context("validating input batch")?;

    let max_age = cli.max_age_mins.or(config.batch.max_post_age_mins);
    if let Some(minutes) = max_age {
        let cutoff = Utc::now() - Duration::minutes(minutes);
        batch.retain_created_since(cutoff);
        tracing::info!(minutes, remaining = batch.len(), "recency filter applied");
    }

    let pipeline = HotspotPipeline::with_reference_collaborators(&config);
    let (hotspots, stats) = pipeline.run(&batch).context("running batch")?;

    if cli.verbose {
        print_hotspots_with_text(&hotspots);
    }

    let generated_at = Utc::now();
    let writer: Box<dyn Write> = match &cli.output {
        Some(path) => Box::new(BufWriter::new(
            File::create(path)
                .with_context(|| format!("creating output file {}", path.display()))?,
        )),
        None => Box::new(io::stdout().lock()),
    };
    let mut sink = JsonLinesSink::new(writer);
    for hotspot in &hotspots {
        sink.emit(&HotspotRecord::from_hotspot(hotspot, generated_at))
            .context("writing hotspot record")?;
    }

    tracing::info!(
        hotspots = hotspots.len(),
        clustered = stats.clustered_posts,
        noise = stats.noise_posts,
        elapsed_ms = stats.elapsed_ms,
        "done"
    );

    Ok(())
}

/// Read posts line by line from the input source
fn read_posts(cli: &Cli) -> anyhow::Result<Vec<LocatedPost>> {
    let reader: Box<dyn Read> = match &cli.input {
        Some(path) => Box::new(
            File::open(path).with_context(|| format!("opening input file {}", path.display()))?,
        ),
        None => Box::new(io::stdin().lock()),
    };

    let mut posts = Vec::new();
    let mut skipped = 0usize;
    for (number, line) in BufReader::new(reader).lines().enumerate() {
        let line = line.context("reading input")?;
        if line.trim().is_empty() {
            continue;
        }

        if cli.raw {
            match resolve_post(&line).with_context(|| format!("input line {}", number + 1))? {
                Some(post) => posts.push(post),
                None => skipped += 1,
            }
        } else {
            let post: LocatedPost = serde_json::from_str(&line)
                .with_context(|| format!("input line {} is not a located post", number + 1))?;
            posts.push(post);
        }
    }

    if skipped > 0 {
        tracing::info!(skipped, "raw payloads without a usable location skipped");
    }

    Ok(posts)
}

/// Human-readable dump of each hotspot and its member posts
fn print_hotspots_with_text(hotspots: &[Hotspot]) {
    for hotspot in hotspots {
        eprintln!("{}", hotspot);
        for post in &hotspot.posts {
            eprintln!("  {}", post);
        }
        eprintln!();
    }
}
