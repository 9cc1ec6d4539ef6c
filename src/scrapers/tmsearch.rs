//! tmsearch result page scraper.
//!
//! Walks result pages `1..=N` of a saved search, replaying a captured session
//! cookie, and pulls two columns out of the result table.
//!
//! # Page layout
//!
//! The upstream markup carries no ids or classes on the result table, so the
//! extraction is purely positional: the 4th `<table>` among its siblings,
//! every body row, then
//!
//! | Rule | Selects |
//! |------|---------|
//! | serial numbers | bold text in the first cell |
//! | marks | the whole second cell |
//!
//! Each rule becomes its own CSV record, so a page yields two lines.
//!
//! # Failure model
//!
//! Pages are fetched one at a time. A non-200 status skips the page. Anything
//! else that goes wrong (cookie file, transport, output) ends the run.

use crate::config::ScrapeConfig;
use crate::cookies::load_cookies;
use crate::error::ScrapeError;
use crate::models::{ExtractedRow, PageRows, ScrapeSummary};
use crate::outputs::csv::CsvSink;
use once_cell::sync::Lazy;
use reqwest::header::COOKIE;
use reqwest::{Client, Request, StatusCode};
use scraper::{Html, Selector};
use std::io::Write;
use tokio::time::sleep;
use tracing::{debug, info, instrument};

/// First cell's bold text in each row of the 4th table.
static FIRST_COLUMN: Lazy<Selector> = Lazy::new(|| {
    Selector::parse("table:nth-of-type(4) > tbody > tr > td:nth-of-type(1) > b").unwrap()
});

/// Second cell of each row of the 4th table.
static SECOND_COLUMN: Lazy<Selector> = Lazy::new(|| {
    Selector::parse("table:nth-of-type(4) > tbody > tr > td:nth-of-type(2)").unwrap()
});

/// Outcome of fetching a single page.
#[derive(Debug)]
pub enum PageFetch {
    /// 200 OK with the decoded body.
    Body(String),
    /// Any other final status; the page contributes nothing.
    Skipped(StatusCode),
}

/// Build the URL for `page` by appending its decimal form to `base`.
///
/// No separator is inserted and the result is not validated.
pub fn page_url(base: &str, page: u32) -> String {
    format!("{base}{page}")
}

/// Build a GET for `url` carrying the cookies currently in the store.
///
/// The cookie file is re-read on every call.
pub fn build_request(client: &Client, url: &str, config: &ScrapeConfig) -> Result<Request, ScrapeError> {
    let cookies = load_cookies(&config.cookie_file)?;
    let header = cookies.header_value(&config.cookie_file)?;
    client
        .get(url)
        .header(COOKIE, header)
        .build()
        .map_err(|source| ScrapeError::Transport {
            url: url.to_string(),
            source,
        })
}

/// Send `request` and read the body if the final status is 200.
#[instrument(level = "info", skip_all, fields(%url))]
pub async fn fetch_page(client: &Client, request: Request, url: &str) -> Result<PageFetch, ScrapeError> {
    let transport = |source| ScrapeError::Transport {
        url: url.to_string(),
        source,
    };

    let resp = client.execute(request).await.map_err(transport)?;
    let status = resp.status();
    if status != StatusCode::OK {
        return Ok(PageFetch::Skipped(status));
    }

    let body = resp.text().await.map_err(transport)?;
    debug!(bytes = body.len(), "Read page body");
    Ok(PageFetch::Body(body))
}

/// Inner text of every node `selector` matches, in document order.
fn extract_row(document: &Html, selector: &Selector) -> ExtractedRow {
    document
        .select(selector)
        .map(|node| node.text().collect::<String>())
        .collect()
}

/// Run both extraction rules against a page body.
///
/// html5ever recovers from any malformed markup, so this cannot fail; a page
/// with an unexpected layout simply yields empty rows.
pub fn extract_page(page: u32, body: &str) -> PageRows {
    let document = Html::parse_document(body);
    let rows = vec![
        extract_row(&document, &FIRST_COLUMN),
        extract_row(&document, &SECOND_COLUMN),
    ];
    debug!(page, first = rows[0].len(), second = rows[1].len(), "Extracted rows");
    PageRows { page, rows }
}

/// Fetch pages `1..=config.num_results` in order and stream their rows to `sink`.
///
/// Sleeps `config.delay` after every page, the last one included. Stops at
/// the first error; rows already written stay written, and the sink is
/// flushed before the error is returned.
#[instrument(level = "info", skip_all, fields(base_url = %config.base_url, pages = config.num_results))]
pub async fn scrape<W: Write>(
    client: &Client,
    config: &ScrapeConfig,
    sink: &mut CsvSink<W>,
) -> Result<ScrapeSummary, ScrapeError> {
    let mut summary = ScrapeSummary::default();
    let result = scrape_pages(client, config, sink, &mut summary).await;
    let flushed = sink.flush();
    result?;
    flushed?;
    Ok(summary)
}

async fn scrape_pages<W: Write>(
    client: &Client,
    config: &ScrapeConfig,
    sink: &mut CsvSink<W>,
    summary: &mut ScrapeSummary,
) -> Result<(), ScrapeError> {
    for page in 1..=config.num_results {
        let url = page_url(&config.base_url, page);
        let request = build_request(client, &url, config)?;
        info!(%url, "Scraping results from url");
        summary.pages_requested += 1;

        match fetch_page(client, request, &url).await? {
            PageFetch::Body(body) => {
                let rows = extract_page(page, &body);
                summary.records_written += sink.write_page(&rows)?;
                summary.pages_scraped += 1;
            }
            PageFetch::Skipped(status) => {
                debug!(page, %status, "Non-200 response; skipping page");
                summary.pages_skipped += 1;
            }
        }

        sleep(config.delay).await;
    }
    Ok(())
}
