//! `lexiflow` - lyrics corpus scraping and word-frequency analysis tool.
//!
//! Usage: `lexiflow [scrape|analyze|all]` (default: `analyze`).

use lexiflow::config::Config;
use lexiflow::error::{Error, Result};
use lexiflow::lemma::SurfaceLemmatizer;
use lexiflow::pipeline::{self, ArtistProfile};
use lexiflow::scrape::{LyricsSource, SongPageScraper, SourceKind, TxtIndexScraper};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<()> {
    // Log to stderr so stdout stays clean for the summary output
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with_writer(std::io::stderr)
        .init();

    let config = Config::load()?;
    tracing::info!("{} v{}", config.app_name(), config.app_version());

    let mode = std::env::args().nth(1).unwrap_or_else(|| "analyze".to_string());
    match mode.as_str() {
        "scrape" => run_scrape(&config).await,
        "analyze" => run_analyze(&config),
        "all" => {
            run_scrape(&config).await?;
            run_analyze(&config)
        }
        other => Err(Error::config(
            format!("Unknown mode {other:?}"),
            "Use one of: scrape, analyze, all",
        )),
    }
}

/// Scrape both artist sites into their flat-file archives.
async fn run_scrape(config: &Config) -> Result<()> {
    for profile in config.profiles() {
        let source = source_for(config, &profile);
        let archive = pipeline::scrape_to_archive(source.as_ref(), &profile).await?;
        if archive.is_empty() {
            tracing::warn!("{}: scrape produced no songs", profile.name);
        }
    }
    Ok(())
}

/// Analyze both archives and emit summaries and chart data.
fn run_analyze(config: &Config) -> Result<()> {
    for profile in config.profiles() {
        let lemmatizer = SurfaceLemmatizer::new(profile.language);
        pipeline::analyze_and_report(&profile, &lemmatizer, &config.viz_dir)?;
    }
    Ok(())
}

/// Wire the configured scraper for an artist's source site.
fn source_for(config: &Config, profile: &ArtistProfile) -> Box<dyn LyricsSource> {
    match profile.source {
        SourceKind::TxtIndex => Box::new(TxtIndexScraper::new(
            &config.ohhla_index_url,
            &config.ohhla_site_root,
        )),
        SourceKind::SongPage => Box::new(
            SongPageScraper::new(&config.lyrics_az_index_url, &config.lyrics_az_link_marker)
                .with_delay(config.request_delay),
        ),
    }
}
