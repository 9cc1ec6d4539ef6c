//! Run configuration handed to the page loop.

use std::path::PathBuf;
use std::time::Duration;

/// Default cookie store, relative to the working directory.
pub const DEFAULT_COOKIE_FILE: &str = "cookie.txt";

/// Default pause between pages, in seconds.
pub const DEFAULT_DELAY_SECS: u64 = 2;

/// Everything a scrape run needs, resolved from the command line.
#[derive(Debug, Clone)]
pub struct ScrapeConfig {
    /// Prefix to which the 1-based page number is appended verbatim.
    pub base_url: String,
    /// Number of pages to fetch. Zero performs no requests.
    pub num_results: u32,
    /// Cookie store read before every request.
    pub cookie_file: PathBuf,
    /// Pause after every page, including the last.
    pub delay: Duration,
}

impl ScrapeConfig {
    pub fn new(base_url: impl Into<String>, num_results: u32) -> Self {
        Self {
            base_url: base_url.into(),
            num_results,
            cookie_file: PathBuf::from(DEFAULT_COOKIE_FILE),
            delay: Duration::from_secs(DEFAULT_DELAY_SECS),
        }
    }

    pub fn with_cookie_file(mut self, path: impl Into<PathBuf>) -> Self {
        self.cookie_file = path.into();
        self
    }

    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = delay;
        self
    }
}
