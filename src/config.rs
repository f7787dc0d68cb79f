//! Application configuration.
//!
//! Handles loading configuration from environment variables and .env files.
//! Defaults point at the two artist sources the tool was built around; every
//! value can be overridden per environment.

use std::env;
use std::path::PathBuf;
use std::time::Duration;

use dotenv::dotenv;

use crate::error::Result;
use crate::lemma::Language;
use crate::normalize::RuleSet;
use crate::pipeline::ArtistProfile;
use crate::scrape::SourceKind;

/// Configuration for the application.
#[derive(Debug, Clone)]
pub struct Config {
    /// The application name
    app_name: String,
    /// The application version
    app_version: String,
    /// Directory holding the flat-file lyric archives.
    pub data_dir: PathBuf,
    /// Directory chart-data JSON is written into.
    pub viz_dir: PathBuf,
    /// ohhla.com artist index page for the English corpus.
    pub ohhla_index_url: String,
    /// ohhla.com site root for resolving relative song links.
    pub ohhla_site_root: String,
    /// lyrics.az all-songs page for the Russian corpus.
    pub lyrics_az_index_url: String,
    /// Link substring identifying the artist's songs on lyrics.az.
    pub lyrics_az_link_marker: String,
    /// Politeness delay between song-page requests.
    pub request_delay: Duration,
}

impl Config {
    /// Get the application name.
    #[must_use]
    pub fn app_name(&self) -> &str {
        &self.app_name
    }

    /// Get the application version.
    #[must_use]
    pub fn app_version(&self) -> &str {
        &self.app_version
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            app_name: env!("CARGO_PKG_NAME").to_string(),
            app_version: env!("CARGO_PKG_VERSION").to_string(),
            data_dir: PathBuf::from("."),
            viz_dir: PathBuf::from("viz"),
            ohhla_index_url: "https://www.ohhla.com/YFA_kendricklamar.html".to_string(),
            ohhla_site_root: "http://www.ohhla.com/".to_string(),
            lyrics_az_index_url: "https://lyrics.az/oxxxymiron/allsongs.html".to_string(),
            lyrics_az_link_marker: "/oxxxymiron/".to_string(),
            request_delay: Duration::from_secs(1),
        }
    }
}

impl Config {
    /// Load configuration from environment variables
    #[allow(clippy::unnecessary_wraps)] // Returns Result for forward-compatible API
    pub fn load() -> Result<Self> {
        // Try to load .env file if present
        dotenv().ok();

        let mut config = Self::default();

        if let Ok(dir) = env::var("LEXIFLOW_DATA_DIR") {
            config.data_dir = PathBuf::from(shellexpand::tilde(&dir).to_string());
        }

        if let Ok(dir) = env::var("LEXIFLOW_VIZ_DIR") {
            config.viz_dir = PathBuf::from(shellexpand::tilde(&dir).to_string());
        }

        if let Ok(url) = env::var("OHHLA_INDEX_URL") {
            config.ohhla_index_url = url;
        }

        if let Ok(root) = env::var("OHHLA_SITE_ROOT") {
            config.ohhla_site_root = root;
        }

        if let Ok(url) = env::var("LYRICS_AZ_INDEX_URL") {
            config.lyrics_az_index_url = url;
        }

        if let Ok(marker) = env::var("LYRICS_AZ_LINK_MARKER") {
            config.lyrics_az_link_marker = marker;
        }

        if let Ok(delay) = env::var("REQUEST_DELAY_MS") {
            if let Ok(millis) = delay.parse::<u64>() {
                config.request_delay = Duration::from_millis(millis);
            }
        }

        Ok(config)
    }

    /// The two artist pipelines this tool was built around, in run order.
    pub fn profiles(&self) -> Vec<ArtistProfile> {
        vec![
            ArtistProfile {
                name: "Kendrick Lamar".to_string(),
                slug: "kendrick_lamar".to_string(),
                archive_path: self.data_dir.join("kendrick_lamar_lyrics.txt"),
                source: SourceKind::TxtIndex,
                rules: RuleSet::ohhla(),
                language: Language::English,
            },
            ArtistProfile {
                name: "Oxxxymiron".to_string(),
                slug: "oxxxymiron".to_string(),
                archive_path: self.data_dir.join("oxxxymiron_lyrics.txt"),
                source: SourceKind::SongPage,
                rules: RuleSet::lyrics_az(),
                language: Language::Russian,
            },
        ]
    }
}
