// src/report.rs
// =============================================================================
// Everything the user sees on the terminal while and after a crawl runs.
//
// The crawl engine sends CrawlEvents over a channel. `consume` runs as its
// own task, turning them into:
// - "Suspicious code found in <url>: <what>" lines
// - "Error crawling <url>: <why>" lines (network failures only)
// - a progress bar
//
// Because printing happens on another task, a slow terminal never holds up
// the crawl.
// =============================================================================

use crate::crawl::{CrawlEvent, CrawlReport};
use anyhow::Result;
use indicatif::{ProgressBar, ProgressStyle};
use tokio::sync::mpsc::UnboundedReceiver;

pub struct Reporter {
    bar: Option<ProgressBar>,
}

impl Reporter {
    pub fn new(show_progress: bool) -> Self {
        let bar = show_progress.then(|| {
            let bar = ProgressBar::new(100);
            let style = ProgressStyle::with_template("{bar:40.cyan/blue} {pos:>3}% [{elapsed}]")
                .unwrap_or_else(|_| ProgressStyle::default_bar());
            bar.set_style(style);
            bar
        });
        Reporter { bar }
    }

    fn handle(&self, event: &CrawlEvent) {
        if let CrawlEvent::Progress { percent, .. } = event {
            if let Some(bar) = &self.bar {
                bar.set_position(percent.round() as u64);
            }
            return;
        }
        if let Some(line) = format_event(event) {
            self.line(&line);
        }
    }

    // Prints above the bar so the two don't overwrite each other
    fn line(&self, text: &str) {
        match &self.bar {
            Some(bar) => bar.suspend(|| println!("{}", text)),
            None => println!("{}", text),
        }
    }

    fn finish(&self) {
        if let Some(bar) = &self.bar {
            bar.finish();
        }
    }
}

// Drains the event channel until the crawler drops its sender
pub async fn consume(mut events: UnboundedReceiver<CrawlEvent>, reporter: Reporter) {
    while let Some(event) = events.recv().await {
        reporter.handle(&event);
    }
    reporter.finish();
}

// The text line for an event, if it gets one
//
// Non-200 responses are left out on purpose: only failures where the server
// never answered are worth a line.
pub fn format_event(event: &CrawlEvent) -> Option<String> {
    match event {
        CrawlEvent::Finding(finding) => Some(format!(
            "Suspicious code found in {}: {}",
            finding.url,
            finding.pattern.description()
        )),
        CrawlEvent::FetchFailed { url, error } if error.is_transport() => {
            Some(format!("Error crawling {}: {}", url, error))
        }
        CrawlEvent::FetchFailed { .. } | CrawlEvent::Progress { .. } => None,
    }
}

// Prints the end-of-run summary either as text or JSON
pub fn print_summary(report: &CrawlReport, json: bool) -> Result<()> {
    if json {
        let json_output = serde_json::to_string_pretty(report)?;
        println!("{}", json_output);
    } else {
        println!();
        println!("📊 Summary:");
        println!("   🔗 Found: {}", report.found.len());
        println!("   📄 Visited: {}", report.visited.len());
        println!("   ❌ Failed fetches: {}", report.fetch_failures);
        println!("   ⚠️  Suspicious findings: {}", report.findings);
    }
    Ok(())
}
