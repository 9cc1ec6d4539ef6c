//! # tmsearch
//!
//! Scrapes a fixed number of sequential result pages from the tmsearch
//! trademark search interface and writes two columns of its result table to
//! stdout as CSV.
//!
//! ## Usage
//!
//! ```sh
//! tmsearch --tmsearchURL 'http://tmsearch.uspto.gov/bin/jumpto?f=doc&state=4803:jd1m1v.2.' --numResults 3
//! ```
//!
//! A session cookie string captured from a browser must be saved to
//! `cookie.txt` (or the path given with `--cookieFile`).
//!
//! ## Pipeline
//!
//! For each page `1..=N`:
//! 1. **Request**: append the page number to the base URL and attach cookies
//! 2. **Fetch**: one GET at a time; non-200 pages are skipped
//! 3. **Extract**: two positional rules over the 4th table
//! 4. **Output**: one CSV record per rule, flushed immediately
//! 5. **Pause**: fixed delay before the next page
//!
//! Logs go to stderr so stdout carries only CSV.

use clap::Parser;
use std::error::Error;
use std::io;
use tracing::{debug, error, info};
use tracing_subscriber::{EnvFilter, fmt as tfmt};

mod cli;
mod config;
mod cookies;
mod error;
mod models;
mod outputs;
mod scrapers;

use cli::Cli;
use error::ScrapeError;
use outputs::csv::CsvSink;

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<(), Box<dyn Error>> {
    // --- Tracing init ---
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tfmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .with_target(true)
        .with_file(false)
        .with_line_number(false)
        .with_timer(tracing_subscriber::fmt::time::UtcTime::rfc_3339())
        .init();

    let start_time = std::time::Instant::now();

    let args = Cli::parse();
    debug!(?args, "Parsed CLI arguments");
    let config = args.into_config();

    let client = reqwest::Client::builder()
        .build()
        .map_err(ScrapeError::Client)?;
    let mut sink = CsvSink::new(io::stdout().lock());

    let summary = match scrapers::tmsearch::scrape(&client, &config, &mut sink).await {
        Ok(summary) => summary,
        Err(e) => {
            error!(error = %e, "Scrape aborted");
            return Err(e.into());
        }
    };

    sink.into_inner()?;

    let elapsed = start_time.elapsed();
    info!(
        ?elapsed,
        pages_requested = summary.pages_requested,
        pages_scraped = summary.pages_scraped,
        pages_skipped = summary.pages_skipped,
        records = summary.records_written,
        "Execution complete"
    );

    Ok(())
}
