// src/cli.rs
// =============================================================================
// This file defines our command-line interface using the `clap` crate.
//
// There is a single command: crawl a site starting at a URL. Everything else
// is an optional flag with a sensible default, so the simplest run is just
//
//   script-sentry https://example.com/
// =============================================================================

use crate::page::DEFAULT_USER_AGENT;
use crate::store::DEFAULT_OUTPUT;
use clap::Parser;
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(
    name = "script-sentry",
    version = "0.1.0",
    about = "Crawl a website and flag pages with suspicious inline JavaScript",
    long_about = "script-sentry crawls a website (same domain only, up to a maximum link depth), \
                  records every URL it finds and reports pages whose <script> blocks use eval(), \
                  timers or document.cookie. Found URLs are written to a file, one per line."
)]
pub struct Cli {
    /// URL to start crawling from (e.g., https://example.com/)
    pub start_url: String,

    /// Maximum crawl depth (default: 1)
    ///
    /// Depth 0 = only the starting page (its links are still recorded)
    /// Depth 1 = starting page + the pages it links to
    /// etc.
    #[arg(long, default_value_t = 1)]
    pub max_depth: usize,

    /// File to write the found URLs to (overwritten)
    #[arg(short, long, default_value = DEFAULT_OUTPUT)]
    pub output: PathBuf,

    /// User-Agent header sent with every request
    #[arg(long, default_value = DEFAULT_USER_AGENT)]
    pub user_agent: String,

    /// Per-request timeout in seconds
    #[arg(long, default_value_t = 10)]
    pub timeout: u64,

    /// Maximum number of redirects to follow per request
    #[arg(long, default_value_t = 10)]
    pub max_redirects: usize,

    /// Also check the host of relative links (e.g. "//other.com/x")
    ///
    /// By default only absolute links are checked against the start domain.
    #[arg(long)]
    pub strict_scope: bool,

    /// Print the end-of-run summary as JSON
    #[arg(long)]
    pub json: bool,

    /// Don't draw a progress bar
    #[arg(long)]
    pub no_progress: bool,

    /// Exit with code 1 if any suspicious code was found
    #[arg(long)]
    pub fail_on_findings: bool,

    /// Log debug details to stderr (RUST_LOG overrides this)
    #[arg(short, long)]
    pub verbose: bool,
}
