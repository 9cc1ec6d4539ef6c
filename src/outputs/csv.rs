//! CSV output sink.
//!
//! Records go to any [`Write`] implementation; the binary hands it locked
//! stdout. Record lengths vary from page to page, so the writer is flexible.
//! There is no header row. A rule that matched nothing, or a single node with
//! no text, still produces a record, written as a blank line.

use crate::error::ScrapeError;
use crate::models::PageRows;
use ::csv::{QuoteStyle, Terminator, Writer, WriterBuilder};
use std::io::{self, Write};
use tracing::{debug, instrument};

/// Append-only CSV stream spanning the whole run.
pub struct CsvSink<W: Write> {
    // Only `None` while a blank line is written straight to the inner writer.
    writer: Option<Writer<W>>,
}

fn csv_writer<W: Write>(inner: W) -> Writer<W> {
    WriterBuilder::new()
        .flexible(true)
        .has_headers(false)
        .terminator(Terminator::Any(b'\n'))
        .quote_style(QuoteStyle::Necessary)
        .from_writer(inner)
}

/// csv_core renders a zero-field record, and a record holding one empty
/// field, as `""`; these go out as an empty line instead.
fn is_blank(row: &[String]) -> bool {
    match row {
        [] => true,
        [only] => only.is_empty(),
        _ => false,
    }
}

impl<W: Write> CsvSink<W> {
    pub fn new(inner: W) -> Self {
        Self {
            writer: Some(csv_writer(inner)),
        }
    }

    fn writer(&mut self) -> &mut Writer<W> {
        self.writer.as_mut().expect("csv writer is always restored")
    }

    fn take_inner(&mut self) -> Result<W, ScrapeError> {
        let writer = self.writer.take().expect("csv writer is always restored");
        match writer.into_inner() {
            Ok(inner) => Ok(inner),
            Err(e) => {
                let err = io::Error::new(e.error().kind(), e.error().to_string());
                self.writer = Some(e.into_inner());
                Err(err.into())
            }
        }
    }

    fn write_blank_line(&mut self) -> Result<(), ScrapeError> {
        let mut inner = self.take_inner()?;
        let written = inner.write_all(b"\n");
        self.writer = Some(csv_writer(inner));
        written?;
        Ok(())
    }

    /// Write every row of a page and flush, returning the number of records.
    #[instrument(level = "debug", skip_all, fields(page = page.page))]
    pub fn write_page(&mut self, page: &PageRows) -> Result<usize, ScrapeError> {
        for row in &page.rows {
            if is_blank(row) {
                self.write_blank_line()?;
            } else {
                self.writer().write_record(row)?;
            }
        }
        self.flush()?;
        debug!(records = page.rows.len(), "Flushed page records");
        Ok(page.rows.len())
    }

    pub fn flush(&mut self) -> Result<(), ScrapeError> {
        self.writer().flush()?;
        Ok(())
    }

    /// Flush and hand back the underlying writer.
    pub fn into_inner(mut self) -> Result<W, ScrapeError> {
        self.take_inner()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn page(rows: Vec<Vec<&str>>) -> PageRows {
        PageRows {
            page: 1,
            rows: rows
                .into_iter()
                .map(|r| r.into_iter().map(String::from).collect())
                .collect(),
        }
    }

    fn render(pages: &[PageRows]) -> String {
        let mut sink = CsvSink::new(Vec::new());
        for p in pages {
            sink.write_page(p).unwrap();
        }
        String::from_utf8(sink.into_inner().unwrap()).unwrap()
    }

    #[test]
    fn test_two_rules_become_two_lines() {
        let out = render(&[page(vec![vec!["A1", "A2", "A3"], vec!["B1", "B2", "B3"]])]);
        assert_eq!(out, "A1,A2,A3\nB1,B2,B3\n");
    }

    #[test]
    fn test_record_lengths_may_differ() {
        let out = render(&[
            page(vec![vec!["A1", "A2"], vec!["B1"]]),
            page(vec![vec!["C1", "C2", "C3"], vec!["D1", "D2", "D3"]]),
        ]);
        assert_eq!(out, "A1,A2\nB1\nC1,C2,C3\nD1,D2,D3\n");
    }

    #[test]
    fn test_fields_with_delimiters_are_quoted() {
        let out = render(&[page(vec![vec!["NEON, LIVE", "say \"hi\""]])]);
        assert_eq!(out, "\"NEON, LIVE\",\"say \"\"hi\"\"\"\n");
    }

    #[test]
    fn test_empty_row_is_blank_line() {
        let out = render(&[page(vec![vec![], vec!["B1"]])]);
        assert_eq!(out, "\nB1\n");
    }

    #[test]
    fn test_single_empty_field_is_blank_line() {
        let out = render(&[page(vec![vec![""], vec!["B1"]]), page(vec![vec!["A2"], vec![]])]);
        assert_eq!(out, "\nB1\nA2\n\n");
    }

    #[test]
    fn test_empty_fields_among_others_stay_in_record() {
        let out = render(&[page(vec![vec!["", "A2"], vec!["B1", ""]])]);
        assert_eq!(out, ",A2\nB1,\n");
    }

    #[test]
    fn test_leading_space_is_not_quoted() {
        let out = render(&[page(vec![vec![" lead", "x"]])]);
        assert_eq!(out, " lead,x\n");
    }

    #[test]
    fn test_write_page_reports_record_count() {
        let mut sink = CsvSink::new(Vec::new());
        let n = sink.write_page(&page(vec![vec!["x"], vec!["y"]])).unwrap();
        assert_eq!(n, 2);
    }
}
