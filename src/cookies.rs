//! Cookie store replayed on every request.
//!
//! The file holds a single browser-style cookie string,
//! `name1=value1; name2=value2; ...`, captured from a logged-in session. It is
//! read again each time a request is built so that edits between pages take
//! effect.

use crate::error::ScrapeError;
use reqwest::header::HeaderValue;
use std::fs;
use std::path::Path;
use tracing::{debug, instrument};

/// One `name=value` pair, whitespace-trimmed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Cookie {
    pub name: String,
    pub value: String,
}

/// Cookies in the order they appear in the file.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CookieSet {
    cookies: Vec<Cookie>,
}

impl CookieSet {
    /// Parse a `;`-delimited cookie string.
    ///
    /// Every segment must contain exactly one `=`. A segment without one
    /// (including an empty trailing segment) or with more than one is
    /// rejected rather than skipped.
    pub fn parse(raw: &str, path: &Path) -> Result<Self, ScrapeError> {
        let mut cookies = Vec::new();
        for segment in raw.split(';') {
            let Some((name, value)) = segment
                .split_once('=')
                .filter(|(_, value)| !value.contains('='))
            else {
                return Err(ScrapeError::MalformedCookie {
                    path: path.to_path_buf(),
                    segment: segment.trim().to_string(),
                });
            };
            cookies.push(Cookie {
                name: name.trim().to_string(),
                value: value.trim().to_string(),
            });
        }
        Ok(Self { cookies })
    }

    pub fn len(&self) -> usize {
        self.cookies.len()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Cookie> {
        self.cookies.iter()
    }

    /// Render as a `Cookie` request header value: `a=1; b=2`.
    pub fn header_value(&self, path: &Path) -> Result<HeaderValue, ScrapeError> {
        let joined = self
            .iter()
            .map(|c| format!("{}={}", c.name, c.value))
            .collect::<Vec<_>>()
            .join("; ");
        HeaderValue::from_str(&joined).map_err(|source| ScrapeError::CookieHeader {
            path: path.to_path_buf(),
            source,
        })
    }
}

/// Read and parse the cookie file at `path`.
#[instrument(level = "debug", skip_all, fields(path = %path.display()))]
pub fn load_cookies(path: &Path) -> Result<CookieSet, ScrapeError> {
    let raw = fs::read_to_string(path).map_err(|source| ScrapeError::CookieFile {
        path: path.to_path_buf(),
        source,
    })?;
    let set = CookieSet::parse(&raw, path)?;
    debug!(count = set.len(), "Loaded cookies");
    Ok(set)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    fn p() -> &'static Path {
        Path::new("cookie.txt")
    }

    #[test]
    fn test_parse_trims_and_keeps_order() {
        let set = CookieSet::parse(" JSESSIONID = abc123 ;  tmsearch=xyz\n", p()).unwrap();
        let names: Vec<_> = set.iter().map(|c| c.name.as_str()).collect();
        assert_eq!(names, vec!["JSESSIONID", "tmsearch"]);
        assert_eq!(set.iter().next().unwrap().value, "abc123");
        assert_eq!(set.iter().nth(1).unwrap().value, "xyz");
    }

    #[test]
    fn test_parse_rejects_segment_with_two_equals() {
        let err = CookieSet::parse("sid=1; token=YWJj==", p()).unwrap_err();
        match err {
            ScrapeError::MalformedCookie { segment, .. } => assert_eq!(segment, "token=YWJj=="),
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_parse_rejects_segment_without_equals() {
        let err = CookieSet::parse("a=1; broken; c=3", p()).unwrap_err();
        match err {
            ScrapeError::MalformedCookie { segment, .. } => assert_eq!(segment, "broken"),
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_parse_rejects_trailing_separator() {
        let err = CookieSet::parse("a=1;", p()).unwrap_err();
        assert!(matches!(err, ScrapeError::MalformedCookie { .. }));
    }

    #[test]
    fn test_parse_rejects_empty_file() {
        assert!(CookieSet::parse("", p()).is_err());
    }

    #[test]
    fn test_header_value_joins_pairs() {
        let set = CookieSet::parse("a=1;b=2 ; c=3", p()).unwrap();
        let header = set.header_value(p()).unwrap();
        assert_eq!(header.to_str().unwrap(), "a=1; b=2; c=3");
    }

    #[test]
    fn test_header_value_rejects_control_bytes() {
        let set = CookieSet::parse("a=x\u{7f}y", p()).unwrap();
        assert!(matches!(
            set.header_value(p()),
            Err(ScrapeError::CookieHeader { .. })
        ));
    }

    #[test]
    fn test_load_cookies_from_file() {
        let mut file = NamedTempFile::new().unwrap();
        write!(file, "sid=42; lang=en").unwrap();
        let set = load_cookies(file.path()).unwrap();
        assert_eq!(set.len(), 2);
    }

    #[test]
    fn test_load_cookies_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let err = load_cookies(&dir.path().join("cookie.txt")).unwrap_err();
        assert!(matches!(err, ScrapeError::CookieFile { .. }));
    }
}
