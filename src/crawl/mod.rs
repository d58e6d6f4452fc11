// src/crawl/mod.rs
// =============================================================================
// This module handles website crawling.
//
// Features:
// - Depth-first crawling starting from a URL
// - Same-domain restriction (doesn't crawl external sites)
// - Configurable depth limit
// - Can be stopped at any point, keeping what was found so far
//
// Rust concepts:
// - Async programming: the fetch is the only place the crawl waits
// - Collections: BTreeSet for found/visited URLs, Vec as an explicit stack
// - Channels: events flow to the terminal without blocking the crawl
// =============================================================================

mod config;
mod engine;
mod progress;

pub use config::CrawlConfig;
pub use engine::{CrawlEvent, CrawlReport, Crawler};
