// src/page/links.rs
// =============================================================================
// This module turns the raw hrefs of a page into absolute URLs to crawl.
//
// Rules, applied to each href in page order:
// 1. Absolute href (has a scheme, e.g. "https://..."):
//    kept only if its host and port are exactly those of the start URL,
//    dropped otherwise.
// 2. Anything else (relative path, "#fragment", "//host/path", "?q=1"):
//    joined against the page URL like a browser would, and kept.
//    No host check happens here unless strict scoping is turned on.
// 3. hrefs that can't be parsed or joined are skipped silently.
//
// Rule 2 means a protocol-relative link ("//other.com/x") leaks off-domain
// URLs into the results. That's the long-standing behaviour of this tool;
// Scope::strict closes the gap for users who want it.
// =============================================================================

use url::Url;

/// Which URLs count as "on the site"
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Scope {
    domain: String,
    port: Option<u16>,
    strict: bool,
}

impl Scope {
    pub fn new(domain: impl Into<String>) -> Self {
        Scope {
            domain: domain.into(),
            port: None,
            strict: false,
        }
    }

    /// Explicit port of the start URL. A link on another port is another site.
    pub fn with_port(mut self, port: Option<u16>) -> Self {
        self.port = port;
        self
    }

    /// Also apply the host check to links that were resolved from relative hrefs
    pub fn strict(mut self, strict: bool) -> Self {
        self.strict = strict;
        self
    }

    pub fn domain(&self) -> &str {
        &self.domain
    }

    // Host and port must both match; `port()` is None for the scheme default
    fn contains(&self, url: &Url) -> bool {
        url.host_str() == Some(self.domain.as_str()) && url.port() == self.port
    }
}

// Resolves the hrefs found on one page
//
// Parameters:
//   base: URL of the page the hrefs came from
//   hrefs: raw href values in document order
//   scope: the crawl's domain rules
//
// Returns: in-scope absolute URLs, same order as the input
//
// Example (domain = "example.com", base = "https://example.com/"):
//   "/about"              -> "https://example.com/about"
//   "https://other.com/x" -> dropped
pub fn resolve_links<'a, I>(base: &Url, hrefs: I, scope: &Scope) -> Vec<String>
where
    I: IntoIterator<Item = &'a str>,
{
    hrefs
        .into_iter()
        .filter_map(|href| resolve_link(base, href, scope))
        .collect()
}

fn resolve_link(base: &Url, href: &str, scope: &Scope) -> Option<String> {
    match Url::parse(href) {
        // Already absolute: the host decides
        Ok(url) => scope.contains(&url).then(|| url.to_string()),
        // Relative reference: join against the page
        Err(url::ParseError::RelativeUrlWithoutBase) => {
            let url = base.join(href).ok()?;
            if scope.strict && !scope.contains(&url) {
                return None;
            }
            Some(url.to_string())
        }
        // Has a scheme but is otherwise malformed
        Err(_) => None,
    }
}
