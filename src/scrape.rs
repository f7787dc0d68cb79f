//! Lyrics site scrapers.
//!
//! Each scraper encodes where the lyrics live in one site's HTML and how to
//! extract them tolerantly: regex scanning within known blocks rather than a
//! full DOM parse, so harmless markup noise doesn't break extraction.
//! Per-song failures are logged and skipped; a scrape returns whatever it
//! could collect. Fetches are strictly sequential.

use std::sync::LazyLock;
use std::time::Duration;

use async_trait::async_trait;
use regex::Regex;
use reqwest::Client;

use crate::archive::LyricsArchive;
use crate::error::{Error, Result};

/// Regex matching an anchor whose href ends in `.txt`, capturing href and
/// link text.
#[allow(clippy::expect_used)]
static RE_TXT_LINK: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"(?is)<a\s[^>]*href="([^"]+\.txt)"[^>]*>(.*?)</a>"#)
        .expect("valid regex: RE_TXT_LINK")
});

/// Regex matching any anchor href.
#[allow(clippy::expect_used)]
static RE_HREF: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"(?is)<a\s[^>]*href="([^"]+)""#).expect("valid regex: RE_HREF")
});

/// Regex matching the first `<h1>` element, capturing its inner HTML.
#[allow(clippy::expect_used)]
static RE_H1: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?is)<h1[^>]*>(.*?)</h1>").expect("valid regex: RE_H1")
});

/// Regex matching tags that end a text line: `<br>`, `</p>`, `</div>`, `</li>`.
#[allow(clippy::expect_used)]
static RE_LINE_BREAK: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)<br\s*/?>|</p\s*>|</div\s*>|</li\s*>").expect("valid regex: RE_LINE_BREAK")
});

/// Regex matching any remaining tag.
#[allow(clippy::expect_used)]
static RE_TAG: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"<[^>]*>").expect("valid regex: RE_TAG")
});

/// Regex matching whitespace runs, for single-line label cleanup.
#[allow(clippy::expect_used)]
static RE_WS: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"\s+").expect("valid regex: RE_WS")
});

/// Title used when a song page has no `<h1>`.
const UNKNOWN_SONG: &str = "Unknown Song";
/// Body used when a song page has no recognizable lyrics container.
const LYRICS_NOT_FOUND: &str = "Lyrics not found";

/// Decode the handful of HTML entities that actually occur on lyrics pages.
fn decode_entities(text: &str) -> String {
    text.replace("&lt;", "<")
        .replace("&gt;", ">")
        .replace("&quot;", "\"")
        .replace("&#39;", "'")
        .replace("&apos;", "'")
        .replace("&nbsp;", " ")
        .replace("&amp;", "&")
}

/// Strip markup from an HTML fragment, one text line per block/line break,
/// blank lines dropped.
fn html_to_text(fragment: &str) -> String {
    let with_breaks = RE_LINE_BREAK.replace_all(fragment, "\n");
    let stripped = RE_TAG.replace_all(&with_breaks, "");
    let decoded = decode_entities(&stripped);
    decoded
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .collect::<Vec<_>>()
        .join("\n")
}

/// Strip markup from an HTML fragment into a single trimmed line.
fn inline_text(fragment: &str) -> String {
    let stripped = RE_TAG.replace_all(fragment, "");
    let decoded = decode_entities(&stripped);
    RE_WS.replace_all(&decoded, " ").trim().to_string()
}

/// Resolve an href against a site root. Absolute URLs pass through.
fn join_url(site_root: &str, href: &str) -> String {
    if href.starts_with("http://") || href.starts_with("https://") {
        return href.to_string();
    }
    format!(
        "{}/{}",
        site_root.trim_end_matches('/'),
        href.trim_start_matches('/')
    )
}

/// HTTP client with the timeout every scraper uses.
fn default_client() -> Client {
    Client::builder()
        .timeout(Duration::from_secs(30))
        .build()
        .unwrap_or_default()
}

/// Which scraper shape an artist's source site needs.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SourceKind {
    /// Index page linking plain `.txt` song files.
    TxtIndex,
    /// Index page linking one HTML page per song.
    SongPage,
}

/// A scrapeable lyrics site: one call yields title → raw text for an artist.
#[async_trait]
pub trait LyricsSource {
    /// Short source name for logs.
    fn name(&self) -> &'static str;

    /// Fetch the artist's songs. Partial success is success: per-song
    /// failures are logged and omitted, only an index-page failure is fatal.
    async fn scrape(&self) -> Result<LyricsArchive>;
}

/// Scraper for archive sites that link each song as a plain `.txt` file
/// (ohhla.com shape).
pub struct TxtIndexScraper {
    index_url: String,
    site_root: String,
    client: Client,
}

impl TxtIndexScraper {
    /// Create a scraper for an artist index page and the site root its
    /// relative song links resolve against.
    pub fn new(index_url: impl Into<String>, site_root: impl Into<String>) -> Self {
        Self {
            index_url: index_url.into(),
            site_root: site_root.into(),
            client: default_client(),
        }
    }

    async fn fetch_text(&self, url: &str) -> Result<String> {
        let resp = self
            .client
            .get(url)
            .send()
            .await
            .map_err(|e| Error::Network(format!("Request to {url} failed: {e}")))?;

        let status = resp.status();
        if !status.is_success() {
            return Err(Error::scrape_status(url, status.as_u16()));
        }

        // Song files on this archive are Latin-1 more often than they admit
        resp.text_with_charset("ISO-8859-1")
            .await
            .map_err(|e| Error::Network(format!("Reading body of {url} failed: {e}")))
    }
}

#[async_trait]
impl LyricsSource for TxtIndexScraper {
    fn name(&self) -> &'static str {
        "txt-index"
    }

    async fn scrape(&self) -> Result<LyricsArchive> {
        let index = self.fetch_text(&self.index_url).await?;

        let mut archive = LyricsArchive::new();
        for caps in RE_TXT_LINK.captures_iter(&index) {
            let url = join_url(&self.site_root, &caps[1]);
            let label = inline_text(&caps[2]);
            match self.fetch_text(&url).await {
                Ok(body) => {
                    archive.insert(label, body);
                }
                Err(e) => tracing::warn!("Error scraping {label}: {e}"),
            }
        }

        tracing::info!("Scraped {} songs from {}", archive.len(), self.index_url);
        Ok(archive)
    }
}

/// Scraper for sites with one HTML page per song (lyrics.az shape).
pub struct SongPageScraper {
    index_url: String,
    link_marker: String,
    container_class: String,
    delay: Duration,
    client: Client,
}

impl SongPageScraper {
    /// Create a scraper for an all-songs index page; `link_marker` is the
    /// substring a song link must contain, e.g. `/oxxxymiron/`.
    pub fn new(index_url: impl Into<String>, link_marker: impl Into<String>) -> Self {
        Self {
            index_url: index_url.into(),
            link_marker: link_marker.into(),
            container_class: "song-lyrics-wrapper".to_string(),
            delay: Duration::from_secs(1),
            client: default_client(),
        }
    }

    /// Override the politeness delay between song-page requests.
    #[must_use]
    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = delay;
        self
    }

    async fn fetch_html(&self, url: &str) -> Result<String> {
        let resp = self
            .client
            .get(url)
            .send()
            .await
            .map_err(|e| Error::Network(format!("Request to {url} failed: {e}")))?;

        let status = resp.status();
        if !status.is_success() {
            return Err(Error::scrape_status(url, status.as_u16()));
        }

        resp.text()
            .await
            .map_err(|e| Error::Network(format!("Reading body of {url} failed: {e}")))
    }

    fn extract_title(html: &str) -> String {
        RE_H1
            .captures(html)
            .map_or_else(|| UNKNOWN_SONG.to_string(), |caps| inline_text(&caps[1]))
    }

    /// Pull the lyrics container's text. Scans locally: from the container
    /// class attribute to the next closing `</div>`, which holds on pages
    /// that don't nest markup inside the lyrics block.
    fn extract_lyrics(&self, html: &str) -> String {
        let Some(class_pos) = html.find(self.container_class.as_str()) else {
            return LYRICS_NOT_FOUND.to_string();
        };
        let Some(open_end) = html[class_pos..].find('>') else {
            return LYRICS_NOT_FOUND.to_string();
        };
        let body_start = class_pos + open_end + 1;
        let body_end = html[body_start..]
            .find("</div>")
            .map_or(html.len(), |rel| body_start + rel);
        html_to_text(&html[body_start..body_end])
    }
}

#[async_trait]
impl LyricsSource for SongPageScraper {
    fn name(&self) -> &'static str {
        "song-page"
    }

    async fn scrape(&self) -> Result<LyricsArchive> {
        let index = self.fetch_html(&self.index_url).await?;

        let song_urls: Vec<String> = RE_HREF
            .captures_iter(&index)
            .map(|caps| caps[1].to_string())
            .filter(|href| href.contains(&self.link_marker) && href.ends_with(".html"))
            .collect();

        let mut archive = LyricsArchive::new();
        for url in song_urls {
            // Politeness delay; these pages sit on a small host
            tokio::time::sleep(self.delay).await;
            match self.fetch_html(&url).await {
                Ok(page) => {
                    let title = Self::extract_title(&page);
                    archive.insert(title, self.extract_lyrics(&page));
                }
                Err(e) => tracing::warn!("Error scraping {url}: {e}"),
            }
        }

        tracing::info!("Scraped {} songs from {}", archive.len(), self.index_url);
        Ok(archive)
    }
}

#[cfg(test)]
mod tests {
    #![allow(clippy::expect_used, clippy::unwrap_used, clippy::panic)]

    use super::*;

    #[test]
    fn txt_link_regex_captures_href_and_label() {
        let index = r#"<ul>
            <li><a href="anonymous/kendrick/sec80/adhd.txt">A.D.H.D</a></li>
            <li><a href="about.html">About</a></li>
            <li><a class="song" href="anonymous/kendrick/gkmc/city.txt"><b>m.A.A.d city</b></a></li>
        </ul>"#;

        let links: Vec<(String, String)> = RE_TXT_LINK
            .captures_iter(index)
            .map(|c| (c[1].to_string(), inline_text(&c[2])))
            .collect();

        assert_eq!(
            links,
            [
                ("anonymous/kendrick/sec80/adhd.txt".to_string(), "A.D.H.D".to_string()),
                ("anonymous/kendrick/gkmc/city.txt".to_string(), "m.A.A.d city".to_string()),
            ]
        );
    }

    #[test]
    fn href_regex_with_marker_filter_selects_song_pages() {
        let index = r#"
            <a href="https://lyrics.az/oxxxymiron/allsongs.html">all</a>
            <a href="https://lyrics.az/oxxxymiron/gorgorod/gde-nas-net.html">song</a>
            <a href="https://lyrics.az/other-artist/track.html">other</a>
            <a href="https://lyrics.az/oxxxymiron/photo.jpg">photo</a>
        "#;

        let urls: Vec<String> = RE_HREF
            .captures_iter(index)
            .map(|c| c[1].to_string())
            .filter(|h| h.contains("/oxxxymiron/") && h.ends_with(".html"))
            .collect();

        assert_eq!(
            urls,
            [
                "https://lyrics.az/oxxxymiron/allsongs.html".to_string(),
                "https://lyrics.az/oxxxymiron/gorgorod/gde-nas-net.html".to_string(),
            ]
        );
    }

    #[test]
    fn extract_title_falls_back_when_h1_missing() {
        assert_eq!(
            SongPageScraper::extract_title("<h1 class=\"t\">Где нас нет</h1>"),
            "Где нас нет"
        );
        assert_eq!(SongPageScraper::extract_title("<h2>nope</h2>"), "Unknown Song");
    }

    #[test]
    fn extract_lyrics_scans_container_div() {
        let scraper = SongPageScraper::new("https://example.com/index.html", "/artist/");
        let page = r#"<html><h1>Song</h1>
            <div class="position-relative song-lyrics-wrapper">
                Первая строка<br>Вторая строка<br/>
                Третья &amp; четвёртая
            </div>
            <div class="footer">junk</div></html>"#;

        assert_eq!(
            scraper.extract_lyrics(page),
            "Первая строка\nВторая строка\nТретья & четвёртая"
        );
    }

    #[test]
    fn extract_lyrics_falls_back_when_container_missing() {
        let scraper = SongPageScraper::new("https://example.com/index.html", "/artist/");
        assert_eq!(scraper.extract_lyrics("<div>no lyrics here</div>"), "Lyrics not found");
    }

    #[test]
    fn html_to_text_strips_tags_and_decodes_entities() {
        let fragment = "line one<br>line&nbsp;two<br><i>line three</i>";
        assert_eq!(html_to_text(fragment), "line one\nline two\nline three");
    }

    #[test]
    fn inline_text_collapses_to_single_line() {
        assert_eq!(inline_text("<b>A.D.H.D\n  (live)</b>"), "A.D.H.D (live)");
    }

    #[test]
    fn join_url_handles_absolute_and_relative() {
        assert_eq!(
            join_url("http://www.ohhla.com/", "anonymous/kendrick/adhd.txt"),
            "http://www.ohhla.com/anonymous/kendrick/adhd.txt"
        );
        assert_eq!(
            join_url("http://www.ohhla.com", "/anonymous/kendrick/adhd.txt"),
            "http://www.ohhla.com/anonymous/kendrick/adhd.txt"
        );
        assert_eq!(
            join_url("http://www.ohhla.com/", "https://elsewhere.com/a.txt"),
            "https://elsewhere.com/a.txt"
        );
    }
}
