//! Lemmatization capability consumed by the frequency engine.
//!
//! The pipeline never tokenizes text itself; it hands the joined corpus to a
//! [`Lemmatizer`] and gets back tokens in document order, each carrying its
//! surface form and lemma. A real morphological model plugs in behind the
//! trait; the shipped [`SurfaceLemmatizer`] is the baseline the CLI uses.

use std::sync::LazyLock;

use regex::Regex;
use serde::{Deserialize, Serialize};

use crate::error::Result;

/// Token boundary pattern: letter runs (with internal apostrophes/hyphens),
/// digit runs, or runs of other non-space symbols.
#[allow(clippy::expect_used)]
static RE_TOKEN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"\p{L}+(?:['’\-]\p{L}+)*|\p{N}+|[^\s\p{L}\p{N}]+").expect("valid regex: RE_TOKEN")
});

/// Target language of a lemmatizer model.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Language {
    /// English lyrics (ohhla corpus).
    English,
    /// Russian lyrics (lyrics.az corpus).
    Russian,
}

impl Language {
    /// ISO 639-1 code, used in logs and model selection.
    pub const fn code(self) -> &'static str {
        match self {
            Self::English => "en",
            Self::Russian => "ru",
        }
    }
}

/// A single lemmatized token.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Token {
    /// The surface form exactly as it appeared in the text.
    pub surface: String,
    /// The canonical dictionary form.
    pub lemma: String,
}

impl Token {
    /// Create a token from surface and lemma forms.
    pub fn new(surface: impl Into<String>, lemma: impl Into<String>) -> Self {
        Self { surface: surface.into(), lemma: lemma.into() }
    }
}

/// Text-in, tokens-out lemmatization capability.
pub trait Lemmatizer {
    /// Tokenize and lemmatize `text`, returning tokens in document order.
    fn lemmatize(&self, text: &str) -> Result<Vec<Token>>;
}

/// Baseline lemmatizer: whitespace/punctuation segmentation with each surface
/// form standing in as its own lemma.
///
/// Frequency counts over this are surface-form counts ("running" and "ran"
/// stay distinct). Swap in a morphological model behind [`Lemmatizer`] for
/// true lemma counts; the language field mirrors the model selection a real
/// backend needs.
#[derive(Debug, Clone, Copy)]
pub struct SurfaceLemmatizer {
    language: Language,
}

impl SurfaceLemmatizer {
    /// Create a baseline lemmatizer for the given language.
    pub const fn new(language: Language) -> Self {
        Self { language }
    }

    /// The language this instance was created for.
    pub const fn language(&self) -> Language {
        self.language
    }
}

impl Lemmatizer for SurfaceLemmatizer {
    fn lemmatize(&self, text: &str) -> Result<Vec<Token>> {
        Ok(RE_TOKEN
            .find_iter(text)
            .map(|m| Token::new(m.as_str(), m.as_str()))
            .collect())
    }
}
