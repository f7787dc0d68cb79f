//! Parameterized artist pipeline.
//!
//! One [`ArtistProfile`] carries everything that distinguishes one artist's
//! run from another's: archive location, cleanup rule chain, language. The
//! stages compose the same way for every artist:
//! scrape → archive → normalize → lemmatize → count → report.

use std::path::{Path, PathBuf};

use crate::archive::LyricsArchive;
use crate::error::Result;
use crate::freq::{FrequencyTable, Script};
use crate::lemma::{Language, Lemmatizer};
use crate::normalize::{NormalizedCorpus, RuleSet};
use crate::report::{self, Summary};
use crate::scrape::{LyricsSource, SourceKind};

/// Configuration of one artist's pipeline run.
#[derive(Debug, Clone)]
pub struct ArtistProfile {
    /// Display name for summaries and logs.
    pub name: String,
    /// Filesystem-safe identifier used in output file names.
    pub slug: String,
    /// Flat-file archive location.
    pub archive_path: PathBuf,
    /// Which scraper shape the source site needs.
    pub source: SourceKind,
    /// Source-specific cleanup chain.
    pub rules: RuleSet,
    /// Selects the lemmatizer model and the script filter.
    pub language: Language,
}

/// Result of analyzing one archive.
#[derive(Debug, Clone)]
pub struct AnalysisReport {
    /// Distinct songs after normalization and dedup.
    pub song_count: usize,
    /// Ranked lemma table.
    pub table: FrequencyTable,
}

/// Scrape an artist's site and persist the result as a flat-file archive.
pub async fn scrape_to_archive(
    source: &dyn LyricsSource,
    profile: &ArtistProfile,
) -> Result<LyricsArchive> {
    tracing::info!("Scraping {} via {} source", profile.name, source.name());
    let archive = source.scrape().await?;
    archive.write_to(&profile.archive_path)?;
    Ok(archive)
}

/// Read an artist's archive and compute its frequency statistics.
pub fn analyze_archive(
    profile: &ArtistProfile,
    lemmatizer: &dyn Lemmatizer,
) -> Result<AnalysisReport> {
    let archive = LyricsArchive::read_from(&profile.archive_path)?;
    let corpus = NormalizedCorpus::from_archive(&archive, &profile.rules);
    tracing::info!("{}: {} distinct songs", profile.name, corpus.len());

    tracing::debug!("Lemmatizing {} corpus ({})", profile.name, profile.language.code());
    let tokens = lemmatizer.lemmatize(&corpus.joined())?;
    let table = FrequencyTable::build(&tokens, Script::for_language(profile.language));

    Ok(AnalysisReport { song_count: corpus.len(), table })
}

/// Analyze one artist and emit the summary and chart data.
pub fn analyze_and_report(
    profile: &ArtistProfile,
    lemmatizer: &dyn Lemmatizer,
    viz_dir: &Path,
) -> Result<Summary> {
    let analysis = analyze_archive(profile, lemmatizer)?;
    let summary = Summary::from_table(&profile.name, analysis.song_count, &analysis.table);
    summary.print();
    report::write_viz(viz_dir, &profile.slug, &analysis.table)?;
    Ok(summary)
}

#[cfg(test)]
mod tests {
    #![allow(clippy::expect_used, clippy::unwrap_used, clippy::panic)]

    use super::*;
    use crate::lemma::SurfaceLemmatizer;

    fn english_profile(archive_path: PathBuf) -> ArtistProfile {
        ArtistProfile {
            name: "Test Artist".to_string(),
            slug: "test_artist".to_string(),
            archive_path,
            source: SourceKind::TxtIndex,
            rules: RuleSet::ohhla(),
            language: Language::English,
        }
    }

    #[test]
    fn analyze_archive_runs_full_chain() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("lyrics.txt");
        fs_err::write(
            &path,
            "--- SongA ---\nHello [verse 1]\nworld world\n\n--- SongB ---\nHello [verse 1]\nworld world\n\n",
        )
        .unwrap();

        let profile = english_profile(path);
        let lemmatizer = SurfaceLemmatizer::new(Language::English);
        let analysis = analyze_archive(&profile, &lemmatizer).unwrap();

        // Both records normalize to the same text, so one song survives
        assert_eq!(analysis.song_count, 1);
        assert_eq!(analysis.table.get("world").unwrap().frequency, 2);
        assert_eq!(analysis.table.get("world").unwrap().rank, 1);
        assert_eq!(analysis.table.get("hello").unwrap().frequency, 1);
        assert_eq!(analysis.table.get("hello").unwrap().rank, 2);
    }

    #[test]
    fn analyze_archive_of_empty_file_is_empty() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("lyrics.txt");
        fs_err::write(&path, "").unwrap();

        let profile = english_profile(path);
        let lemmatizer = SurfaceLemmatizer::new(Language::English);
        let analysis = analyze_archive(&profile, &lemmatizer).unwrap();

        assert_eq!(analysis.song_count, 0);
        assert!(analysis.table.is_empty());
    }
}
