// src/page/mod.rs
// =============================================================================
// Everything the crawler does with a single page.
//
// Submodules:
// - fetch: downloads a page (Fetcher trait + reqwest implementation)
// - html: pulls anchor hrefs and script bodies out of the HTML
// - links: turns raw hrefs into absolute, in-scope URLs
// =============================================================================

mod fetch;
mod html;
mod links;

pub use fetch::{Fetcher, HttpFetcher, DEFAULT_USER_AGENT};
#[cfg(test)]
pub use fetch::FetchedPage;
pub use html::parse_page;
pub use links::{resolve_links, Scope};
