//! `Link` header handling (RFC 8288).
//!
//! GitHub advertises further pages as
//! `Link: <https://api.github.com/...&page=2>; rel="next", <...&page=5>; rel="last"`.

use std::sync::OnceLock;

use regex::Regex;
use reqwest::header::{HeaderMap, LINK};

use crate::error::{IssueDigestError, Result};

static LINK_RE: OnceLock<Regex> = OnceLock::new();
static REL_RE: OnceLock<Regex> = OnceLock::new();

fn compiled(cell: &'static OnceLock<Regex>, pattern: &str) -> Result<&'static Regex> {
    if let Some(re) = cell.get() {
        return Ok(re);
    }
    let re = Regex::new(pattern)
        .map_err(|e| IssueDigestError::ConfigError(format!("Invalid regex: {}", e)))?;
    Ok(cell.get_or_init(|| re))
}

/// Returns the target URL of the first link whose relation list contains `rel`.
pub fn parse_link_header(header: &str, rel: &str) -> Result<Option<String>> {
    let link_re = compiled(&LINK_RE, r#"<([^>]*)>((?:\s*;\s*[^;,]+)*)"#)?;
    let rel_re = compiled(&REL_RE, r#"(?i)^\s*rel\s*=\s*"?([^"]*)"?\s*$"#)?;

    for link in link_re.captures_iter(header) {
        let url = link.get(1).map_or("", |m| m.as_str());
        let params = link.get(2).map_or("", |m| m.as_str());

        let matches = params
            .split(';')
            .filter_map(|param| rel_re.captures(param))
            .filter_map(|caps| caps.get(1))
            .any(|relations| {
                relations
                    .as_str()
                    .split_whitespace()
                    .any(|r| r.eq_ignore_ascii_case(rel))
            });

        if matches {
            return Ok(Some(url.to_string()));
        }
    }

    Ok(None)
}

/// True when any `Link` field of the response advertises a `next` page.
pub fn has_next_page(headers: &HeaderMap) -> Result<bool> {
    for value in headers.get_all(LINK) {
        let Ok(value) = value.to_str() else {
            continue;
        };
        if parse_link_header(value, "next")?.is_some() {
            return Ok(true);
        }
    }
    Ok(false)
}

#[cfg(test)]
mod tests {
    use super::*;
    use reqwest::header::HeaderValue;

    const GITHUB_LINK: &str = "<https://api.github.com/repositories/1/issues?state=closed&per_page=100&page=2>; rel=\"next\", \
         <https://api.github.com/repositories/1/issues?state=closed&per_page=100&page=9>; rel=\"last\"";

    #[test]
    fn test_parse_next_and_last() {
        assert_eq!(
            parse_link_header(GITHUB_LINK, "next").unwrap().as_deref(),
            Some("https://api.github.com/repositories/1/issues?state=closed&per_page=100&page=2")
        );
        assert_eq!(
            parse_link_header(GITHUB_LINK, "last").unwrap().as_deref(),
            Some("https://api.github.com/repositories/1/issues?state=closed&per_page=100&page=9")
        );
        assert!(parse_link_header(GITHUB_LINK, "prev").unwrap().is_none());
    }

    #[test]
    fn test_parse_last_page_has_no_next() {
        let header = "<https://api.github.com/x?page=1>; rel=\"first\", <https://api.github.com/x?page=8>; rel=\"prev\"";
        assert!(parse_link_header(header, "next").unwrap().is_none());
    }

    #[test]
    fn test_parse_multiple_relations_and_unquoted() {
        let header = "<https://example.com/2>; rel=\"next last\"";
        assert_eq!(
            parse_link_header(header, "next").unwrap().as_deref(),
            Some("https://example.com/2")
        );

        let header = "<https://example.com/3>; type=\"text/html\"; rel=next";
        assert_eq!(
            parse_link_header(header, "next").unwrap().as_deref(),
            Some("https://example.com/3")
        );
    }

    #[test]
    fn test_next_inside_url_is_not_a_relation() {
        let header = "<https://example.com/next?page=1>; rel=\"prev\"";
        assert!(parse_link_header(header, "next").unwrap().is_none());
    }

    #[test]
    fn test_has_next_page() {
        let mut headers = HeaderMap::new();
        assert!(!has_next_page(&headers).unwrap());

        headers.insert(LINK, HeaderValue::from_static(GITHUB_LINK));
        assert!(has_next_page(&headers).unwrap());

        headers.insert(
            LINK,
            HeaderValue::from_static("<https://api.github.com/x?page=1>; rel=\"first\""),
        );
        assert!(!has_next_page(&headers).unwrap());
    }

    #[test]
    fn test_has_next_page_across_multiple_link_fields() {
        let mut headers = HeaderMap::new();
        headers.append(
            LINK,
            HeaderValue::from_static("<https://api.github.com/x?page=1>; rel=\"first\""),
        );
        headers.append(
            LINK,
            HeaderValue::from_static("<https://api.github.com/x?page=3>; rel=\"next\""),
        );
        assert!(has_next_page(&headers).unwrap());

        let mut headers = HeaderMap::new();
        headers.append(
            LINK,
            HeaderValue::from_static("<https://api.github.com/x?page=1>; rel=\"first\""),
        );
        headers.append(
            LINK,
            HeaderValue::from_static("<https://api.github.com/x?page=2>; rel=\"prev\""),
        );
        assert!(!has_next_page(&headers).unwrap());
    }
}
