//! Source-specific lyric text cleanup and corpus deduplication.
//!
//! Each lyrics site leaves its own noise in the scraped text: section tags,
//! leftover markup, attribution headers, page preambles. A [`RuleSet`] is an
//! ordered chain of pattern-replace steps for one site; order matters, later
//! steps assume the earlier cleanup has already happened.

use std::sync::LazyLock;

use regex::Regex;

use crate::archive::LyricsArchive;

/// Regex matching a bracketed annotation block that ends its line, e.g.
/// `[Verse 1]`, `(Chorus)`, `{Hook}` or `<Bridge>` followed by a newline.
#[allow(clippy::expect_used)]
static RE_TAG_LINE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"[\[<({].*?[\]>)}]\n").expect("valid regex: RE_TAG_LINE")
});

/// Regex matching leftover angle-bracket markup fragments.
#[allow(clippy::expect_used)]
static RE_ANGLE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"<.*?>").expect("valid regex: RE_ANGLE")
});

/// Regex matching literal `+` characters.
#[allow(clippy::expect_used)]
static RE_PLUS: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"\+").expect("valid regex: RE_PLUS")
});

/// Regex matching the `Typed by:` attribution header block on ohhla pages.
#[allow(clippy::expect_used)]
static RE_TYPED_BY: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"[:\w\n\s/\-&,#'?]+Typed\sby:\s\b.+\b").expect("valid regex: RE_TYPED_BY")
});

/// Regex matching runs of whitespace, newlines included.
#[allow(clippy::expect_used)]
static RE_SPACE_RUN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"\s+").expect("valid regex: RE_SPACE_RUN")
});

/// Regex matching `[...]` annotation blocks within a line.
#[allow(clippy::expect_used)]
static RE_SQUARE_TAG: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"\[.*?\]").expect("valid regex: RE_SQUARE_TAG")
});

/// Regex matching a line prefix up to the last `lyrics` on that line.
#[allow(clippy::expect_used)]
static RE_PREAMBLE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r".*lyrics").expect("valid regex: RE_PREAMBLE")
});

/// Regex matching newlines and the stray symbols lyrics.az pages leak.
#[allow(clippy::expect_used)]
static RE_STRAY: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"\n|°|ð").expect("valid regex: RE_STRAY")
});

/// One ordered pattern-replace step in a cleanup chain.
#[derive(Debug, Clone)]
struct CleanStep {
    pattern: &'static Regex,
    replacement: &'static str,
}

/// An ordered cleanup rule chain for one lyrics source.
#[derive(Debug, Clone)]
pub struct RuleSet {
    steps: Vec<CleanStep>,
    trim: bool,
}

impl RuleSet {
    /// Cleanup chain for ohhla.com-style English lyrics.
    ///
    /// Strips end-of-line annotation blocks, leftover angle markup, literal
    /// `+` characters and the `Typed by:` attribution header, then collapses
    /// all whitespace runs to single spaces and trims.
    pub fn ohhla() -> Self {
        Self {
            steps: vec![
                CleanStep { pattern: &RE_TAG_LINE, replacement: "" },
                CleanStep { pattern: &RE_ANGLE, replacement: "" },
                CleanStep { pattern: &RE_PLUS, replacement: "" },
                CleanStep { pattern: &RE_TYPED_BY, replacement: "" },
                CleanStep { pattern: &RE_SPACE_RUN, replacement: " " },
            ],
            trim: true,
        }
    }

    /// Cleanup chain for lyrics.az-style Russian lyrics.
    ///
    /// Strips `[...]` annotation blocks and the page preamble (everything up
    /// to the last `lyrics` on a line), then replaces newlines and stray
    /// symbols with single spaces. The preamble rule also fires on any lyric
    /// line that itself contains the word `lyrics`; that is the scraped
    /// source's documented behavior, kept as-is.
    pub fn lyrics_az() -> Self {
        Self {
            steps: vec![
                CleanStep { pattern: &RE_SQUARE_TAG, replacement: "" },
                CleanStep { pattern: &RE_PREAMBLE, replacement: "" },
                CleanStep { pattern: &RE_STRAY, replacement: " " },
            ],
            trim: false,
        }
    }

    /// Apply every step in order to one raw lyric text.
    pub fn clean(&self, text: &str) -> String {
        let mut cleaned = text.to_string();
        for step in &self.steps {
            cleaned = step.pattern.replace_all(&cleaned, step.replacement).into_owned();
        }
        if self.trim {
            cleaned.trim().to_string()
        } else {
            cleaned
        }
    }
}

/// A deduplicated, order-preserving sequence of cleaned lyric texts.
///
/// Order is the first-occurrence order from the archive's iteration order.
/// Cleaned texts that come out empty are kept; only exact duplicates drop.
#[derive(Debug, Clone, Default)]
pub struct NormalizedCorpus {
    texts: Vec<String>,
}

impl NormalizedCorpus {
    /// Clean every archive entry, keeping the first occurrence of each
    /// distinct result.
    pub fn from_archive(archive: &LyricsArchive, rules: &RuleSet) -> Self {
        let mut texts: Vec<String> = Vec::new();
        for (_title, text) in archive.iter() {
            let cleaned = rules.clean(text);
            // Exact-match dedup; linear scan is fine at corpus scale
            if !texts.contains(&cleaned) {
                texts.push(cleaned);
            }
        }
        tracing::debug!("Kept {} distinct songs of {} archive entries", texts.len(), archive.len());
        Self { texts }
    }

    /// Number of distinct cleaned texts.
    pub fn len(&self) -> usize {
        self.texts.len()
    }

    /// Whether the corpus is empty.
    pub fn is_empty(&self) -> bool {
        self.texts.is_empty()
    }

    /// Iterate over cleaned texts in corpus order.
    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.texts.iter().map(String::as_str)
    }

    /// All cleaned texts joined with a single space, in corpus order.
    pub fn joined(&self) -> String {
        self.texts.join(" ")
    }
}
