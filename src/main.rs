// src/main.rs
// =============================================================================
// This is the entry point of our CLI application.
//
// What happens here:
// 1. Parse command-line arguments using clap
// 2. Crawl the site, printing findings and errors as they come in
// 3. Save every URL found to a file, even if the crawl was interrupted
// 4. Exit with proper code (0 = done, 1 = findings with --fail-on-findings,
//    2 = error)
// =============================================================================

mod cli;
mod crawl;
mod detect;
mod error;
mod page;
mod report;
mod store;

use anyhow::{Context, Result};
use clap::Parser;
use cli::Cli;
use crawl::{CrawlConfig, Crawler};
use page::HttpFetcher;
use report::Reporter;
use std::time::Duration;
use store::{FileSink, UrlSink};
use tokio::sync::mpsc;
use tokio_util::sync::CancellationToken;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() {
    let exit_code = match run().await {
        Ok(code) => code,
        Err(e) => {
            eprintln!("Error: {:#}", e);
            2
        }
    };

    std::process::exit(exit_code);
}

async fn run() -> Result<i32> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let config = CrawlConfig::new(&cli.start_url, cli.max_depth)?
        .with_strict_scope(cli.strict_scope);
    let fetcher = HttpFetcher::new(
        &cli.user_agent,
        Duration::from_secs(cli.timeout),
        cli.max_redirects,
    )
    .context("failed to build HTTP client")?;

    let cancel = CancellationToken::new();
    watch_for_interrupt(cancel.clone());

    // Events are printed on their own task so output never slows the crawl
    let (tx, rx) = mpsc::unbounded_channel();
    let printer = tokio::spawn(report::consume(rx, Reporter::new(!cli.no_progress)));

    println!("Starting crawling process...");
    let crawler = Crawler::new(fetcher, tx);
    let report = crawler.run(&config, &cancel).await;

    // Dropping the crawler closes the channel, which lets the printer finish
    drop(crawler);
    printer.await.context("event printer stopped unexpectedly")?;

    if report.interrupted {
        println!("\nCrawling process interrupted by user.");
    }
    println!("Crawling process completed.");

    let sink = FileSink::new(&cli.output);
    println!("Saving found URLs to {}...", sink.path().display());
    sink.save(&report.found)?;
    println!("Found URLs saved to {}.", sink.path().display());

    report::print_summary(&report, cli.json)?;

    if cli.fail_on_findings && report.findings > 0 {
        Ok(1)
    } else {
        Ok(0)
    }
}

// First Ctrl-C stops the crawl and lets the found URLs be saved.
// A second one gives up immediately.
fn watch_for_interrupt(cancel: CancellationToken) {
    tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_err() {
            tracing::warn!("could not listen for Ctrl-C");
            return;
        }
        tracing::info!("interrupt received, stopping crawl");
        cancel.cancel();

        if tokio::signal::ctrl_c().await.is_ok() {
            std::process::exit(130);
        }
    });
}

// Logs go to stderr; stdout is reserved for the crawl output itself
fn init_tracing(verbose: bool) {
    let default_filter = if verbose {
        "script_sentry=debug,warn"
    } else {
        "warn"
    };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_filter));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}
