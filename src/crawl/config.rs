// src/crawl/config.rs
// =============================================================================
// Settings for one crawl run. Built once from the command line, then only
// read.
// =============================================================================

use crate::error::ConfigError;
use crate::page::Scope;
use url::Url;

#[derive(Debug, Clone)]
pub struct CrawlConfig {
    start_url: Url,
    scope: Scope,
    max_depth: usize,
}

impl CrawlConfig {
    // Validates the start URL and derives the crawl domain from its host
    //
    // max_depth counts link hops from the start page:
    //   0 = fetch only the start page (its links are still recorded)
    //   1 = also fetch the pages it links to
    pub fn new(start_url: &str, max_depth: usize) -> Result<Self, ConfigError> {
        let url = Url::parse(start_url).map_err(|source| ConfigError::InvalidUrl {
            url: start_url.to_string(),
            source,
        })?;

        if url.scheme() != "http" && url.scheme() != "https" {
            return Err(ConfigError::UnsupportedScheme(url.scheme().to_string()));
        }

        let domain = url
            .host_str()
            .ok_or_else(|| ConfigError::MissingHost(start_url.to_string()))?
            .to_string();

        Ok(CrawlConfig {
            scope: Scope::new(domain).with_port(url.port()),
            start_url: url,
            max_depth,
        })
    }

    /// Apply the domain check to relative links as well
    pub fn with_strict_scope(mut self, strict: bool) -> Self {
        self.scope = self.scope.strict(strict);
        self
    }

    pub fn start_url(&self) -> &Url {
        &self.start_url
    }

    pub fn domain(&self) -> &str {
        self.scope.domain()
    }

    pub fn scope(&self) -> &Scope {
        &self.scope
    }

    pub fn max_depth(&self) -> usize {
        self.max_depth
    }
}
