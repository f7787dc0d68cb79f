//! Flat-file lyrics archive codec.
//!
//! An archive is a UTF-8 text file of `--- {title} ---\n{text}\n\n` records
//! concatenated with no other delimiter. There is no escaping: a title or
//! text containing the delimiter tokens corrupts the record boundaries on
//! read. The format is an interchange file between the scraping and analysis
//! stages, not a general-purpose container.

use std::io::Write;
use std::path::Path;

use indexmap::IndexMap;

use crate::error::{Error, Result};

/// Opening token of a record header.
const HEADER_OPEN: &str = "--- ";
/// Closing token of a record header.
const HEADER_CLOSE: &str = " ---\n";

/// Insertion-ordered mapping of song title to raw lyric text.
///
/// Iteration order is insertion order; re-inserting an existing title
/// replaces its text but keeps its original position.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LyricsArchive {
    songs: IndexMap<String, String>,
}

impl LyricsArchive {
    /// Create an empty archive.
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert or replace a song.
    pub fn insert(&mut self, title: impl Into<String>, text: impl Into<String>) {
        self.songs.insert(title.into(), text.into());
    }

    /// Look up a song's text by exact title.
    pub fn get(&self, title: &str) -> Option<&str> {
        self.songs.get(title).map(String::as_str)
    }

    /// Number of songs in the archive.
    pub fn len(&self) -> usize {
        self.songs.len()
    }

    /// Whether the archive holds no songs.
    pub fn is_empty(&self) -> bool {
        self.songs.is_empty()
    }

    /// Iterate over (title, text) pairs in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.songs.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    /// Write the archive to `path`, one record per song in iteration order.
    pub fn write_to(&self, path: &Path) -> Result<()> {
        let file = fs_err::File::create(path).map_err(|e| Error::io(e, path.to_path_buf()))?;
        let mut out = std::io::BufWriter::new(file);
        for (title, text) in &self.songs {
            write!(out, "{HEADER_OPEN}{title}{HEADER_CLOSE}{text}\n\n")
                .map_err(|e| Error::io(e, path.to_path_buf()))?;
        }
        out.flush().map_err(|e| Error::io(e, path.to_path_buf()))?;
        tracing::info!("Lyrics saved to {}", path.display());
        Ok(())
    }

    /// Read an archive from `path`, skipping malformed records.
    pub fn read_from(path: &Path) -> Result<Self> {
        let content =
            fs_err::read_to_string(path).map_err(|e| Error::io(e, path.to_path_buf()))?;
        Ok(Self::parse(&content))
    }

    /// Parse archive content.
    ///
    /// Splits on the header-opening token, then each chunk on the first
    /// header-closing token. A chunk missing its closing token is skipped;
    /// the skip count is logged but a partial read is still a success.
    fn parse(content: &str) -> Self {
        let mut songs = IndexMap::new();
        let mut skipped = 0usize;
        for section in content.split(HEADER_OPEN).skip(1) {
            if let Some((title, text)) = section.split_once(HEADER_CLOSE) {
                songs.insert(title.to_string(), text.trim().to_string());
            } else {
                skipped += 1;
            }
        }
        if skipped > 0 {
            tracing::warn!("Skipped {skipped} malformed archive record(s)");
        }
        Self { songs }
    }
}

#[cfg(test)]
mod tests {
    #![allow(clippy::expect_used, clippy::unwrap_used, clippy::panic)]

    use super::*;

    fn sample() -> LyricsArchive {
        let mut archive = LyricsArchive::new();
        archive.insert("m.A.A.d city", "Brace yourself, I'll take you on a trip");
        archive.insert("HUMBLE.", "Nobody pray for me\nIt been that way");
        archive
    }

    #[test]
    fn round_trip_preserves_entries() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("lyrics.txt");

        let original = sample();
        original.write_to(&path).unwrap();
        let restored = LyricsArchive::read_from(&path).unwrap();

        assert_eq!(restored, original);
        let titles: Vec<&str> = restored.iter().map(|(t, _)| t).collect();
        assert_eq!(titles, ["m.A.A.d city", "HUMBLE."]);
    }

    #[test]
    fn read_trims_text_whitespace() {
        let parsed = LyricsArchive::parse("--- Song ---\n  body line  \n\n");
        assert_eq!(parsed.get("Song"), Some("body line"));
    }

    #[test]
    fn malformed_record_is_skipped() {
        let content = "--- Good Song ---\nsome lyrics\n\n--- Broken Song without closer\nmore text\n";
        let parsed = LyricsArchive::parse(content);
        assert_eq!(parsed.len(), 1);
        assert_eq!(parsed.get("Good Song"), Some("some lyrics"));
    }

    #[test]
    fn reinsert_keeps_position_replaces_text() {
        let mut archive = sample();
        archive.insert("m.A.A.d city", "changed");
        let titles: Vec<&str> = archive.iter().map(|(t, _)| t).collect();
        assert_eq!(titles, ["m.A.A.d city", "HUMBLE."]);
        assert_eq!(archive.get("m.A.A.d city"), Some("changed"));
    }

    // Known format limitation: the delimiter tokens are not escaped, so a
    // text containing them splits into spurious records on read.
    #[test]
    fn delimiter_collision_is_lossy() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("lyrics.txt");

        let mut archive = LyricsArchive::new();
        archive.insert("Interlude", "spoken part\n--- Chorus ---\nsung part");
        archive.write_to(&path).unwrap();

        let restored = LyricsArchive::read_from(&path).unwrap();
        assert_ne!(restored, archive);
        assert_eq!(restored.len(), 2);
        assert_eq!(restored.get("Interlude"), Some("spoken part"));
        assert_eq!(restored.get("Chorus"), Some("sung part"));
    }

    #[test]
    fn empty_file_yields_empty_archive() {
        let parsed = LyricsArchive::parse("");
        assert!(parsed.is_empty());
    }
}
