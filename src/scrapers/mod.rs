//! Site scrapers.
//!
//! | Site | Module | Method |
//! |------|--------|--------|
//! | tmsearch | [`tmsearch`] | Positional HTML table extraction over numbered result pages |

pub mod tmsearch;
