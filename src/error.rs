//! Error types for a scrape run.
//!
//! Every variant is fatal: the page loop stops at the first error and `main`
//! logs it before exiting with a non-zero status. Non-200 responses are not
//! errors and never show up here.

use std::io;
use std::path::PathBuf;
use thiserror::Error;

/// Failures that abort a scrape run.
#[derive(Error, Debug)]
pub enum ScrapeError {
    /// The cookie file could not be read.
    #[error("Error reading cookie file {}: {source}", path.display())]
    CookieFile {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// A `;`-separated cookie segment does not have exactly one `=`.
    #[error("Malformed cookie segment {segment:?} in {}: expected name=value", path.display())]
    MalformedCookie { path: PathBuf, segment: String },

    /// The cookie set contains bytes that cannot go into a `Cookie` header.
    #[error("Cookie file {} cannot be sent as a header: {source}", path.display())]
    CookieHeader {
        path: PathBuf,
        #[source]
        source: reqwest::header::InvalidHeaderValue,
    },

    /// The HTTP client could not be constructed.
    #[error("HTTP client initialization error: {0}")]
    Client(#[source] reqwest::Error),

    /// Sending the request or reading the response body failed.
    #[error("Error reading response from {url}: {source}")]
    Transport {
        url: String,
        #[source]
        source: reqwest::Error,
    },

    /// Writing or flushing the CSV stream failed.
    #[error("Error writing CSV output: {0}")]
    Output(#[from] csv::Error),
}

impl From<io::Error> for ScrapeError {
    fn from(e: io::Error) -> Self {
        ScrapeError::Output(csv::Error::from(e))
    }
}
