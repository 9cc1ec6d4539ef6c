//! Command-line interface definitions for tmsearch.
//!
//! The two original flags keep their camelCase spelling so existing scripts
//! continue to work. Cookie file location and the inter-page delay are
//! optional and default to the historical behavior.

use crate::config::{DEFAULT_COOKIE_FILE, DEFAULT_DELAY_SECS, ScrapeConfig};
use clap::Parser;
use std::path::PathBuf;
use std::time::Duration;

/// Scrape records from the tmsearch database for particular search terms.
///
/// # Examples
///
/// ```sh
/// # Fetch the first five result pages of a saved search
/// tmsearch --tmsearchURL 'http://tmsearch.uspto.gov/bin/showfield?f=toc&state=4803%3Ajd1m1v.1.' --numResults 5 > marks.csv
/// ```
#[derive(Parser, Debug)]
#[command(name = "tmsearch", author, version, about)]
pub struct Cli {
    /// The root url for scraping results; the page number is appended to it
    #[arg(long = "tmsearchURL", env = "TMSEARCH_URL", default_value = "<unset>")]
    pub tmsearch_url: String,

    /// Number of result pages to fetch, starting at 1
    #[arg(long = "numResults", default_value_t = 1)]
    pub num_results: u32,

    /// File holding the session cookie string (`name=value; ...`)
    #[arg(long = "cookieFile", default_value = DEFAULT_COOKIE_FILE)]
    pub cookie_file: PathBuf,

    /// Seconds to wait after each page
    #[arg(long, default_value_t = DEFAULT_DELAY_SECS)]
    pub delay: u64,
}

impl Cli {
    pub fn into_config(self) -> ScrapeConfig {
        ScrapeConfig::new(self.tmsearch_url, self.num_results)
            .with_cookie_file(self.cookie_file)
            .with_delay(Duration::from_secs(self.delay))
    }
}
