// src/page/html.rs
// =============================================================================
// This module extracts what the crawler needs from an HTML page:
// - the href of every <a> tag, in document order
// - the text content of every <script> tag, in document order
//
// hrefs are returned raw. Resolving them is links.rs' job.
//
// We use the `scraper` crate, which parses HTML the way a browser does
// (html5ever), so broken markup still yields a usable tree.
// =============================================================================

use once_cell::sync::Lazy;
use scraper::{Html, Selector};

// The selectors are constants, so parsing them can only fail on a typo here
static ANCHORS: Lazy<Selector> =
    Lazy::new(|| Selector::parse("a[href]").expect("anchor selector is valid"));
static SCRIPTS: Lazy<Selector> =
    Lazy::new(|| Selector::parse("script").expect("script selector is valid"));

/// The parts of a page the crawl cares about
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ParsedPage {
    pub hrefs: Vec<String>,
    pub scripts: Vec<String>,
}

// Parses a page body
//
// Example:
//   html = "<a href='/docs'>Docs</a><script>eval(x)</script>"
//   result.hrefs   = ["/docs"]
//   result.scripts = ["eval(x)"]
pub fn parse_page(html: &str) -> ParsedPage {
    let document = Html::parse_document(html);

    let hrefs = document
        .select(&ANCHORS)
        .filter_map(|element| element.value().attr("href"))
        .map(str::to_string)
        .collect();

    let scripts = document
        .select(&SCRIPTS)
        .map(|element| element.text().collect::<String>())
        .collect();

    ParsedPage { hrefs, scripts }
}
