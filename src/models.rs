//! Data produced by one scrape run.
//!
//! - [`ExtractedRow`]: the inner text of every node one extraction rule matched
//! - [`PageRows`]: the rows extracted from a single page, one per rule
//! - [`ScrapeSummary`]: counters reported when the run finishes

/// Inner text of each matched node, in document order.
///
/// Written out as a single CSV record. The two columns of the result table
/// come out as two separate records rather than paired fields.
pub type ExtractedRow = Vec<String>;

/// Rows extracted from one result page.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PageRows {
    /// 1-based page index.
    pub page: u32,
    /// One row per extraction rule, in rule order.
    pub rows: Vec<ExtractedRow>,
}

/// Totals for a completed run.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ScrapeSummary {
    /// Pages a request was issued for.
    pub pages_requested: u32,
    /// Pages that answered 200 and were extracted.
    pub pages_scraped: u32,
    /// Pages skipped because of a non-200 status.
    pub pages_skipped: u32,
    /// CSV records written to the output.
    pub records_written: usize,
}
