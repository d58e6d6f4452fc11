// src/crawl/engine.rs
// =============================================================================
// The crawl itself: a depth-first walk over same-site links.
//
// How it works:
// 1. Enter the start URL at depth 0.
// 2. Entering a URL: skip it if it is deeper than max_depth or already
//    visited. Otherwise fetch it. Only a 200 response counts; anything else
//    is reported and the URL stays unvisited, so finding it again on another
//    page means trying again.
// 3. A visited page becomes a frame on the stack holding its resolved links.
//    Links are taken one at a time: each is recorded as "found", then entered
//    right away, so a whole subtree finishes before the next sibling link.
// 4. When a frame runs out of links it is popped: progress advances and the
//    page's scripts are checked for suspicious code.
//
// The stack holds at most max_depth + 1 frames, the same as a recursive
// version would, but deep sites can't overflow the native call stack.
//
// Findings, fetch failures and progress are sent as CrawlEvents over a
// channel as they happen. The engine itself prints nothing.
//
// Stopping: the CancellationToken is checked before every step and raced
// against the fetch in flight. A stopped crawl returns what it had so far.
// =============================================================================

use crate::crawl::config::CrawlConfig;
use crate::crawl::progress::Progress;
use crate::detect::{detect, SuspicionFinding};
use crate::error::FetchError;
use crate::page::{parse_page, resolve_links, Fetcher};
use serde::Serialize;
use std::collections::BTreeSet;
use tokio::sync::mpsc::UnboundedSender;
use tokio_util::sync::CancellationToken;
use url::Url;

/// Something worth telling the user about, sent while the crawl runs
#[derive(Debug, Clone, PartialEq)]
pub enum CrawlEvent {
    /// A fetch failed or returned something other than 200
    FetchFailed { url: String, error: FetchError },
    /// A script on a visited page matched a suspicious pattern
    Finding(SuspicionFinding),
    /// The progress estimate moved. `percent` is clamped to 0..=100,
    /// `total` is the raw accumulated value.
    Progress { percent: f64, total: f64 },
}

/// Everything a run collected
#[derive(Debug, Clone, Default, Serialize)]
pub struct CrawlReport {
    /// URLs discovered through links, whether or not they were fetched
    pub found: BTreeSet<String>,
    /// URLs fetched with a 200 response
    pub visited: BTreeSet<String>,
    pub fetch_attempts: usize,
    pub fetch_failures: usize,
    pub findings: usize,
    /// Raw progress total (can be above 100)
    pub progress: f64,
    /// True when the crawl was stopped before it finished
    pub interrupted: bool,
}

// A visited page whose links are still being walked
struct PageFrame {
    url: String,
    depth: usize,
    links: std::vec::IntoIter<String>,
    scripts: Vec<String>,
}

// Mutable state of one run. Lives on the stack of `run`, never shared.
struct RunState<'a> {
    config: &'a CrawlConfig,
    report: CrawlReport,
    progress: Progress,
}

pub struct Crawler<F> {
    fetcher: F,
    events: UnboundedSender<CrawlEvent>,
}

impl<F: Fetcher> Crawler<F> {
    pub fn new(fetcher: F, events: UnboundedSender<CrawlEvent>) -> Self {
        Crawler { fetcher, events }
    }

    #[cfg(test)]
    pub fn fetcher(&self) -> &F {
        &self.fetcher
    }

    // Crawls the site described by `config`
    //
    // Several runs can share one Crawler; each run starts with empty
    // visited/found sets.
    pub async fn run(&self, config: &CrawlConfig, cancel: &CancellationToken) -> CrawlReport {
        let mut state = RunState {
            config,
            report: CrawlReport::default(),
            progress: Progress::new(),
        };

        tracing::info!(
            start = %config.start_url(),
            domain = config.domain(),
            max_depth = config.max_depth(),
            "crawl started"
        );

        let mut stack = Vec::new();
        let start = config.start_url().to_string();
        if let Some(frame) = self.enter(&mut state, start, 0, cancel).await {
            stack.push(frame);
        }

        while let Some(top) = stack.last_mut() {
            if cancel.is_cancelled() {
                break;
            }

            match top.links.next() {
                Some(link) => {
                    let depth = top.depth + 1;
                    state.report.found.insert(link.clone());
                    if let Some(child) = self.enter(&mut state, link, depth, cancel).await {
                        stack.push(child);
                    }
                }
                None => {
                    if let Some(page) = stack.pop() {
                        self.finish(&mut state, page);
                    }
                }
            }
        }

        let mut report = state.report;
        report.progress = state.progress.total();
        report.interrupted = cancel.is_cancelled();

        if report.interrupted {
            tracing::warn!(pending_pages = stack.len(), "crawl interrupted");
        }
        tracing::info!(
            found = report.found.len(),
            visited = report.visited.len(),
            failures = report.fetch_failures,
            "crawl finished"
        );

        report
    }

    // Fetches `url` and turns it into a frame, or returns None when the URL
    // is out of depth, already visited, failed, or the crawl was stopped
    async fn enter(
        &self,
        state: &mut RunState<'_>,
        url: String,
        depth: usize,
        cancel: &CancellationToken,
    ) -> Option<PageFrame> {
        if depth > state.config.max_depth() || state.report.visited.contains(&url) {
            return None;
        }

        tracing::debug!(%url, depth, "fetching");
        state.report.fetch_attempts += 1;

        let fetched = tokio::select! {
            biased;
            _ = cancel.cancelled() => {
                tracing::debug!(%url, "fetch abandoned");
                return None;
            }
            result = self.fetcher.fetch(&url) => result,
        };

        let page = match fetched {
            Ok(page) if page.status == 200 => page,
            Ok(page) => return self.fail(state, url, FetchError::Status(page.status)),
            Err(error) => return self.fail(state, url, error),
        };

        state.report.visited.insert(url.clone());

        let parsed = parse_page(&page.body);
        let links = match Url::parse(&url) {
            Ok(base) => resolve_links(
                &base,
                parsed.hrefs.iter().map(String::as_str),
                state.config.scope(),
            ),
            Err(_) => Vec::new(),
        };
        tracing::debug!(%url, links = links.len(), scripts = parsed.scripts.len(), "page parsed");

        Some(PageFrame {
            url,
            depth,
            links: links.into_iter(),
            scripts: parsed.scripts,
        })
    }

    fn fail(&self, state: &mut RunState<'_>, url: String, error: FetchError) -> Option<PageFrame> {
        tracing::debug!(%url, %error, "fetch failed");
        state.report.fetch_failures += 1;
        self.emit(CrawlEvent::FetchFailed { url, error });
        None
    }

    // All links of `page` have been walked
    fn finish(&self, state: &mut RunState<'_>, page: PageFrame) {
        let found = state.report.found.len();
        if found > 0 {
            state.progress.advance(found);
            self.emit(CrawlEvent::Progress {
                percent: state.progress.percent(),
                total: state.progress.total(),
            });
        }

        for pattern in detect(page.scripts.iter().map(String::as_str)) {
            state.report.findings += 1;
            self.emit(CrawlEvent::Finding(SuspicionFinding {
                url: page.url.clone(),
                pattern,
            }));
        }
    }

    fn emit(&self, event: CrawlEvent) {
        // Nobody listening is fine; the report still has the counts
        let _ = self.events.send(event);
    }
}
