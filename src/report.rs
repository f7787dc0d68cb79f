//! Reporting sink: textual summary and chart-ready data export.
//!
//! The sink consumes a finished [`FrequencyTable`] and produces console
//! output plus one JSON file per chart, shaped for a plotting frontend:
//! a length-vs-frequency scatter with a most-frequent-word-per-length label
//! layer, and a rank-vs-log-frequency series for the Zipf's-law check.

use std::collections::BTreeMap;
use std::path::Path;

use serde::Serialize;
use serde_json::json;

use crate::error::{Error, Result};
use crate::freq::FrequencyTable;

/// Summary statistics for one analyzed corpus.
#[derive(Debug, Clone, Serialize)]
pub struct Summary {
    /// Artist display name.
    pub artist: String,
    /// Distinct songs after normalization and dedup.
    pub song_count: usize,
    /// Distinct lemma count (type count).
    pub distinct_lemmas: usize,
    /// Top-10 (lemma, frequency) pairs in rank order.
    pub top: Vec<TopEntry>,
    /// Mean lemma length over the table.
    pub mean_lemma_length: f64,
    /// RFC 3339 generation timestamp.
    pub generated_at: String,
}

/// One entry of the most-common-lemmas list.
#[derive(Debug, Clone, Serialize)]
pub struct TopEntry {
    /// The lemma.
    pub lemma: String,
    /// Its occurrence count.
    pub frequency: u64,
}

impl Summary {
    /// Assemble summary statistics from a pipeline run.
    pub fn from_table(artist: &str, song_count: usize, table: &FrequencyTable) -> Self {
        Self {
            artist: artist.to_string(),
            song_count,
            distinct_lemmas: table.len(),
            top: table
                .top(10)
                .into_iter()
                .map(|(lemma, frequency)| TopEntry { lemma: lemma.to_string(), frequency })
                .collect(),
            mean_lemma_length: table.mean_lemma_length(),
            generated_at: chrono::Utc::now().to_rfc3339(),
        }
    }

    /// Print the summary to stdout.
    pub fn print(&self) {
        println!("Number of {}'s songs: {}", self.artist, self.song_count);
        println!("Number of types in {}'s lyrics: {}", self.artist, self.distinct_lemmas);
        println!("Most common tokens:");
        for entry in &self.top {
            println!("  {:>6}  {}", entry.frequency, entry.lemma);
        }
        println!("Mean lemma length: {:.2}", self.mean_lemma_length);
    }
}

/// A (length, frequency) scatter point.
#[derive(Debug, Serialize)]
struct LengthPoint<'a> {
    lemma: &'a str,
    length: usize,
    frequency: u64,
}

/// Per-length label: the most frequent lemma of that length.
#[derive(Debug, PartialEq, Eq, Serialize)]
struct LengthLabel<'a> {
    length: usize,
    lemma: &'a str,
    frequency: u64,
}

/// A (rank, log-frequency) point for the Zipf check.
#[derive(Debug, Serialize)]
struct ZipfPoint<'a> {
    lemma: &'a str,
    rank: usize,
    log_frequency: f64,
}

/// Pick, per distinct lemma length, the most frequent lemma of that length.
///
/// Records arrive in rank order, so the first lemma seen for a length is the
/// winner and frequency ties resolve to the better-ranked lemma.
fn length_labels(table: &FrequencyTable) -> Vec<LengthLabel<'_>> {
    let mut best: BTreeMap<usize, LengthLabel<'_>> = BTreeMap::new();
    for record in table.records() {
        best.entry(record.length).or_insert(LengthLabel {
            length: record.length,
            lemma: &record.lemma,
            frequency: record.frequency,
        });
    }
    best.into_values().collect()
}

/// Serialize a value as pretty JSON into `path`.
fn write_json<T: Serialize>(path: &Path, value: &T) -> Result<()> {
    let bytes = serde_json::to_vec_pretty(value)
        .map_err(|e| Error::Msg(format!("JSON encode failed: {e}")))?;
    fs_err::write(path, bytes).map_err(|e| Error::io(e, path.to_path_buf()))?;
    tracing::debug!("Wrote {}", path.display());
    Ok(())
}

/// Write the chart-data JSON files for one artist into `out_dir`.
///
/// Produces `{slug}.length_scatter.json` and `{slug}.zipf.json`.
pub fn write_viz(out_dir: &Path, slug: &str, table: &FrequencyTable) -> Result<()> {
    fs_err::create_dir_all(out_dir).map_err(|e| Error::io(e, out_dir.to_path_buf()))?;

    let points: Vec<LengthPoint<'_>> = table
        .records()
        .map(|r| LengthPoint { lemma: &r.lemma, length: r.length, frequency: r.frequency })
        .collect();
    let labels = length_labels(table);
    write_json(
        &out_dir.join(format!("{slug}.length_scatter.json")),
        &json!({ "points": points, "labels": labels }),
    )?;

    let zipf: Vec<ZipfPoint<'_>> = table
        .records()
        .map(|r| ZipfPoint { lemma: &r.lemma, rank: r.rank, log_frequency: r.log_frequency })
        .collect();
    write_json(&out_dir.join(format!("{slug}.zipf.json")), &json!({ "points": zipf }))?;

    tracing::info!("Chart data for {slug} written to {}", out_dir.display());
    Ok(())
}
