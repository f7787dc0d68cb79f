//! Application error types.
//!
//! Provides unified error handling with actionable context for debugging.

use thiserror::Error;

/// Application result type alias
pub type Result<T> = std::result::Result<T, Error>;

/// Application error types with specific context for actionable debugging
#[derive(Debug, Error)]
pub enum Error {
    /// IO error with path context
    #[error("IO error at {path:?}: {source}")]
    Io {
        /// The underlying IO error.
        source: std::io::Error,
        /// File path where the error occurred, if known.
        path: Option<std::path::PathBuf>,
    },

    /// Network error (connection, timeout, DNS)
    #[error("Network error: {0}")]
    Network(String),

    /// Scrape error with page context
    #[error("Scrape error at {url}: {message}")]
    Scrape {
        /// URL of the page that failed.
        url: String,
        /// Human-readable error description.
        message: String,
        /// HTTP status code, if from an HTTP response.
        status: Option<u16>,
        /// Actionable suggestion for resolving the error.
        hint: Option<&'static str>,
    },

    /// Configuration error with guidance
    #[error("Configuration error: {message}. {hint}")]
    Config {
        /// Description of the configuration problem.
        message: String,
        /// Actionable guidance for fixing the issue.
        hint: &'static str,
    },

    /// File parsing error
    #[error("Parse error in {file:?}: {message}")]
    Parse {
        /// File that failed to parse, if known.
        file: Option<std::path::PathBuf>,
        /// Description of the parse failure.
        message: String,
    },

    /// Lemmatizer failure
    #[error("Lemmatizer error: {0}")]
    Lemma(String),

    /// Generic message error (escape hatch)
    #[error("{0}")]
    Msg(String),
}

impl Error {
    /// Create an IO error with path context
    pub fn io(source: std::io::Error, path: impl Into<Option<std::path::PathBuf>>) -> Self {
        Self::Io { source, path: path.into() }
    }

    /// Create a scrape error with URL context
    pub fn scrape(url: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Scrape {
            url: url.into(),
            message: message.into(),
            status: None,
            hint: None,
        }
    }

    /// Create a scrape error from an HTTP status
    pub fn scrape_status(url: impl Into<String>, status: u16) -> Self {
        let hint = match status {
            403 => Some("The site may be blocking automated clients"),
            404 => Some("The page may have been moved or removed"),
            429 => Some("Rate limited - increase REQUEST_DELAY_MS"),
            500..=599 => Some("Server error - try again later"),
            _ => None,
        };
        Self::Scrape {
            url: url.into(),
            message: format!("request returned status {status}"),
            status: Some(status),
            hint,
        }
    }

    /// Create a config error with actionable hint
    pub fn config(message: impl Into<String>, hint: &'static str) -> Self {
        Self::Config { message: message.into(), hint }
    }

    /// Create a parse error with file context
    pub fn parse(message: impl Into<String>, file: impl Into<Option<std::path::PathBuf>>) -> Self {
        Self::Parse { file: file.into(), message: message.into() }
    }
}

// Convenience conversions
impl From<std::io::Error> for Error {
    fn from(e: std::io::Error) -> Self {
        Self::Io { source: e, path: None }
    }
}

impl From<String> for Error {
    fn from(s: String) -> Self {
        Self::Msg(s)
    }
}

impl From<&str> for Error {
    fn from(s: &str) -> Self {
        Self::Msg(s.to_string())
    }
}

#[cfg(test)]
mod tests {
    #![allow(clippy::expect_used, clippy::unwrap_used, clippy::panic)]

    use super::*;

    #[test]
    fn scrape_status_provides_hints() {
        let err = Error::scrape_status("https://example.com/song.html", 429);
        match err {
            Error::Scrape { hint: Some(h), status: Some(429), .. } => {
                assert!(h.contains("REQUEST_DELAY_MS"));
            }
            _ => panic!("Expected Scrape error with hint"),
        }
    }

    #[test]
    fn scrape_error_displays_url() {
        let err = Error::scrape("https://example.com/index.html", "no links found");
        assert!(err.to_string().contains("https://example.com/index.html"));
    }
}
