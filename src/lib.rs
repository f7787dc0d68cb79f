//! `lexiflow` - lyrics corpus scraping and word-frequency analysis.
//!
//! Scrapes song lyrics for two artists from two lyrics sites, archives them
//! as flat text files, normalizes the text per source, and computes ranked
//! lemma frequency statistics for vocabulary-distribution and Zipf's-law
//! visualization.

// Re-export public modules for use in integration tests and as a library
pub mod archive;
pub mod config;
pub mod error;
pub mod freq;
pub mod lemma;
pub mod normalize;
pub mod pipeline;
pub mod report;
pub mod scrape;
