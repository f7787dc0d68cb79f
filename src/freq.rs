//! Lemma frequency counting and ranking.
//!
//! Consumes a lemmatized token stream, filters tokens by target script,
//! counts lowercased lemmas and builds a ranked table carrying the values
//! the reporting sink plots: length, frequency, log-frequency and rank.

use std::sync::LazyLock;

use indexmap::IndexMap;
use regex::Regex;
use serde::Serialize;

use crate::lemma::{Language, Token};

/// Regex matching at least one Latin letter.
#[allow(clippy::expect_used)]
static RE_LATIN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"[a-zA-Z]").expect("valid regex: RE_LATIN")
});

/// Regex matching at least one Cyrillic letter, ё included.
#[allow(clippy::expect_used)]
static RE_CYRILLIC: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"[а-яА-ЯёЁ]").expect("valid regex: RE_CYRILLIC")
});

/// Alphabet filter applied to token surface forms before counting.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Script {
    /// Latin a-z/A-Z, with the English-source exclusions.
    Latin,
    /// Cyrillic а-я/А-Я/ё/Ё.
    Cyrillic,
}

impl Script {
    /// The script used for frequency filtering in the given language.
    pub const fn for_language(language: Language) -> Self {
        match language {
            Language::English => Self::Latin,
            Language::Russian => Self::Cyrillic,
        }
    }

    /// Whether a token with this surface form enters the frequency count.
    ///
    /// Latin additionally rejects surfaces containing `/` or `)`, the
    /// fraction and stage-direction fragments the English source leaves
    /// behind.
    pub fn keeps(self, surface: &str) -> bool {
        match self {
            Self::Latin => {
                RE_LATIN.is_match(surface)
                    && !surface.contains('/')
                    && !surface.contains(')')
            }
            Self::Cyrillic => RE_CYRILLIC.is_match(surface),
        }
    }
}

/// One ranked lemma and its statistics.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LemmaRecord {
    /// The lowercased lemma.
    pub lemma: String,
    /// Character count of the lemma.
    pub length: usize,
    /// Occurrence count, always at least 1.
    pub frequency: u64,
    /// `ln(frequency + 1)`.
    pub log_frequency: f64,
    /// 1-based rank in descending-frequency order; ties keep first-seen order.
    pub rank: usize,
}

/// Ranked lemma table for one artist corpus.
///
/// Iteration order is rank order. Tables for different artists are
/// independent and never merged.
#[derive(Debug, Clone, Default, Serialize)]
pub struct FrequencyTable {
    records: IndexMap<String, LemmaRecord>,
}

impl FrequencyTable {
    /// Count, rank and annotate lemmas from a lemmatized token stream.
    pub fn build(tokens: &[Token], script: Script) -> Self {
        let mut counts: IndexMap<String, u64> = IndexMap::new();
        for token in tokens {
            if script.keeps(&token.surface) {
                *counts.entry(token.lemma.to_lowercase()).or_insert(0) += 1;
            }
        }

        // sort_by is stable: equal frequencies keep first-seen order
        let mut entries: Vec<(String, u64)> = counts.into_iter().collect();
        entries.sort_by(|a, b| b.1.cmp(&a.1));

        let mut records = IndexMap::with_capacity(entries.len());
        for (index, (lemma, frequency)) in entries.into_iter().enumerate() {
            let record = LemmaRecord {
                length: lemma.chars().count(),
                frequency,
                log_frequency: (frequency as f64 + 1.0).ln(),
                rank: index + 1,
                lemma: lemma.clone(),
            };
            records.insert(lemma, record);
        }
        Self { records }
    }

    /// Number of distinct lemmas.
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// Whether the table holds no lemmas.
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Look up a lemma's record.
    pub fn get(&self, lemma: &str) -> Option<&LemmaRecord> {
        self.records.get(lemma)
    }

    /// Records in rank order.
    pub fn records(&self) -> impl Iterator<Item = &LemmaRecord> {
        self.records.values()
    }

    /// Top `n` (lemma, frequency) pairs in rank order.
    pub fn top(&self, n: usize) -> Vec<(&str, u64)> {
        self.records
            .values()
            .take(n)
            .map(|r| (r.lemma.as_str(), r.frequency))
            .collect()
    }

    /// Mean lemma length over the table, 0.0 when empty.
    pub fn mean_lemma_length(&self) -> f64 {
        if self.records.is_empty() {
            return 0.0;
        }
        let total: usize = self.records.values().map(|r| r.length).sum();
        total as f64 / self.records.len() as f64
    }
}

#[cfg(test)]
mod tests {
    #![allow(clippy::expect_used, clippy::unwrap_used, clippy::panic)]

    use super::*;
    use crate::lemma::Token;

    fn identity_tokens(surfaces: &[&str]) -> Vec<Token> {
        surfaces.iter().map(|s| Token::new(*s, *s)).collect()
    }

    #[test]
    fn latin_filter_keeps_only_clean_letter_tokens() {
        let kept: Vec<&str> = ["run", "3/4", "word)", "—", "go"]
            .into_iter()
            .filter(|s| Script::Latin.keeps(s))
            .collect();
        assert_eq!(kept, ["run", "go"]);
    }

    #[test]
    fn cyrillic_filter_keeps_only_cyrillic_tokens() {
        let kept: Vec<&str> = ["бег", "123", "the", "идти"]
            .into_iter()
            .filter(|s| Script::Cyrillic.keeps(s))
            .collect();
        assert_eq!(kept, ["бег", "идти"]);
    }

    #[test]
    fn cyrillic_filter_accepts_yo() {
        assert!(Script::Cyrillic.keeps("всё"));
        assert!(Script::Cyrillic.keeps("Ёлка"));
    }

    #[test]
    fn ranks_break_ties_by_first_seen_order() {
        // a and b both occur 5 times, a seen first; c occurs 3 times
        let mut surfaces = Vec::new();
        surfaces.extend(["a", "b"].repeat(5));
        surfaces.extend(["c"].repeat(3));
        let table = FrequencyTable::build(&identity_tokens(&surfaces), Script::Latin);

        assert_eq!(table.get("a").unwrap().rank, 1);
        assert_eq!(table.get("b").unwrap().rank, 2);
        assert_eq!(table.get("c").unwrap().rank, 3);
    }

    #[test]
    fn lemmas_are_lowercased_and_merged() {
        let table = FrequencyTable::build(
            &identity_tokens(&["Run", "run", "RUN"]),
            Script::Latin,
        );
        assert_eq!(table.len(), 1);
        assert_eq!(table.get("run").unwrap().frequency, 3);
    }

    #[test]
    fn log_frequency_of_single_occurrence_is_ln_two() {
        let table = FrequencyTable::build(&identity_tokens(&["once"]), Script::Latin);
        let record = table.get("once").unwrap();
        assert_eq!(record.frequency, 1);
        assert!((record.log_frequency - 2.0_f64.ln()).abs() < 1e-12);
    }

    #[test]
    fn length_counts_characters_not_bytes() {
        let table = FrequencyTable::build(&identity_tokens(&["бег"]), Script::Cyrillic);
        assert_eq!(table.get("бег").unwrap().length, 3);
    }

    #[test]
    fn empty_token_stream_yields_empty_table() {
        let table = FrequencyTable::build(&[], Script::Latin);
        assert!(table.is_empty());
        assert!((table.mean_lemma_length() - 0.0).abs() < f64::EPSILON);
    }

    #[test]
    fn top_returns_rank_ordered_pairs() {
        let table = FrequencyTable::build(
            &identity_tokens(&["x", "y", "y", "z", "z", "z"]),
            Script::Latin,
        );
        assert_eq!(table.top(2), [("z", 3), ("y", 2)]);
    }

    #[test]
    fn mean_lemma_length_averages_over_distinct_lemmas() {
        let table = FrequencyTable::build(
            &identity_tokens(&["ab", "ab", "abcd"]),
            Script::Latin,
        );
        assert!((table.mean_lemma_length() - 3.0).abs() < f64::EPSILON);
    }
}
