//! Output sinks for extracted rows.
//!
//! - [`csv`]: headerless CSV stream, flushed after every page

pub mod csv;
