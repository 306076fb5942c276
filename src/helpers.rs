//! Helper functions for building catalog requests and fixing up scraped links
//!
//! # Examples
//!
//! ```
//! use libgen_scraper::helpers::{pages_to_load, rewrite_mirror_link};
//!
//! assert_eq!(pages_to_load(30, 100), 2);
//! assert_eq!(
//!     rewrite_mirror_link("../book/123", "https://m1.example"),
//!     "https://m1.example/book/123"
//! );
//! ```

use crate::models::SearchColumn;
use url::Url;

/// Number of results the catalog renders per page
pub const RESULTS_PER_PAGE: usize = 25;

/// Pages needed to collect `desired` results when the catalog reports `total`
pub fn pages_to_load(desired: usize, total: usize) -> usize {
    desired
        .div_ceil(RESULTS_PER_PAGE)
        .min(total.div_ceil(RESULTS_PER_PAGE))
}

/// Build `<mirror>/search.php?req=..&column=..[&page=..]`
pub fn build_search_url(
    mirror: &str,
    term: &str,
    column: SearchColumn,
    page: Option<usize>,
) -> Result<Url, url::ParseError> {
    let base = format!("{}/search.php", mirror.trim_end_matches('/'));
    let mut params = vec![("req", term.to_string()), ("column", column.to_string())];
    if let Some(page) = page {
        params.push(("page", page.to_string()));
    }
    Url::parse_with_params(&base, &params)
}

/// Make a mirror link absolute against the selected mirror.
///
/// Only a leading `../` is rewritten; absolute links pass through untouched.
pub fn rewrite_mirror_link(href: &str, mirror: &str) -> String {
    match href.strip_prefix("../") {
        Some(rest) => format!("{}/{}", mirror.trim_end_matches('/'), rest),
        None => href.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pages_to_load() {
        assert_eq!(pages_to_load(5, 3), 1);
        assert_eq!(pages_to_load(30, 100), 2);
        assert_eq!(pages_to_load(25, 100), 1);
        assert_eq!(pages_to_load(26, 100), 2);
        assert_eq!(pages_to_load(100, 30), 2);
        assert_eq!(pages_to_load(10, 0), 0);
        assert_eq!(pages_to_load(0, 50), 0);
    }

    #[test]
    fn test_build_search_url() {
        let url = build_search_url("https://libgen.is/", "design patterns", SearchColumn::Title, None)
            .unwrap();
        assert_eq!(
            url.as_str(),
            "https://libgen.is/search.php?req=design+patterns&column=title"
        );

        let url = build_search_url("https://libgen.is", "a&b", SearchColumn::Author, Some(3)).unwrap();
        assert_eq!(
            url.as_str(),
            "https://libgen.is/search.php?req=a%26b&column=author&page=3"
        );
    }

    #[test]
    fn test_build_search_url_rejects_garbage_mirror() {
        assert!(build_search_url("not a url", "x", SearchColumn::Title, None).is_err());
    }

    #[test]
    fn test_rewrite_mirror_link() {
        assert_eq!(
            rewrite_mirror_link("../book/123", "https://m1.example"),
            "https://m1.example/book/123"
        );
        assert_eq!(
            rewrite_mirror_link("../ads.php?md5=ABC", "https://m1.example/"),
            "https://m1.example/ads.php?md5=ABC"
        );
        assert_eq!(
            rewrite_mirror_link("http://library.lol/main/ABC", "https://m1.example"),
            "http://library.lol/main/ABC"
        );
    }
}
