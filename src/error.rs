// src/error.rs
// =============================================================================
// Typed errors for the parts of the crawler that can fail.
//
// - FetchError: one page could not be fetched. Never fatal; the crawl records
//   it and moves on to the next link.
// - ConfigError: the start URL cannot be crawled at all.
// - SaveError: the found URLs could not be written out.
//
// main.rs wraps these in anyhow::Error when they reach the top level.
// =============================================================================

use std::path::PathBuf;
use thiserror::Error;

/// Why a single page fetch did not produce a usable page.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FetchError {
    /// The server answered, but not with 200 OK
    #[error("HTTP {0}")]
    Status(u16),

    #[error("request timed out")]
    Timeout,

    #[error("invalid URL: {0}")]
    InvalidUrl(String),

    #[error("too many redirects")]
    TooManyRedirects,

    /// DNS, connection, TLS or body read failure
    #[error("{0}")]
    Transport(String),
}

impl FetchError {
    /// True for failures where the server never gave us a status code.
    ///
    /// Only these are printed as "Error crawling ..." lines; a plain non-200
    /// response is silently skipped.
    pub fn is_transport(&self) -> bool {
        !matches!(self, FetchError::Status(_))
    }
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("invalid start URL '{url}': {source}")]
    InvalidUrl {
        url: String,
        #[source]
        source: url::ParseError,
    },

    #[error("start URL must use http or https, got '{0}'")]
    UnsupportedScheme(String),

    #[error("start URL has no host: {0}")]
    MissingHost(String),
}

#[derive(Debug, Error)]
pub enum SaveError {
    #[error("could not write {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_is_not_transport() {
        assert!(!FetchError::Status(500).is_transport());
        assert!(FetchError::Timeout.is_transport());
        assert!(FetchError::Transport("connection refused".into()).is_transport());
    }

    #[test]
    fn test_display_messages() {
        assert_eq!(FetchError::Status(404).to_string(), "HTTP 404");
        assert_eq!(FetchError::Timeout.to_string(), "request timed out");
    }
}
