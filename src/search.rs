use crate::helpers::{build_search_url, pages_to_load};
use crate::mirrors::{MirrorError, MirrorSelector};
use crate::models::{BookRecord, SearchColumn};
use crate::parser::{extract_records, parse_total_results};
use crate::source_utils::{FetchError, PageFetcher, Pacer, RandomDelay};
use scraper::Html;

/// Errors that can occur while searching the catalog
#[derive(Debug, thiserror::Error)]
pub enum SearchError {
    #[error(transparent)]
    Mirror(#[from] MirrorError),

    #[error("Failed to fetch results page: {0}")]
    Fetch(#[from] FetchError),

    #[error("Invalid search URL: {0}")]
    InvalidUrl(#[from] url::ParseError),
}

/// A catalog session: one fetcher, one mirror list, and the mirror chosen for the
/// lifetime of this value.
pub struct LibgenClient<F: PageFetcher> {
    fetcher: F,
    mirrors: MirrorSelector,
    pacer: Box<dyn Pacer>,
}

impl<F: PageFetcher> LibgenClient<F> {
    pub fn new<I, S>(fetcher: F, mirrors: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            fetcher,
            mirrors: MirrorSelector::new(mirrors),
            pacer: Box::new(RandomDelay::default()),
        }
    }

    /// Replace the pause taken between result pages
    pub fn with_pacer(mut self, pacer: impl Pacer + 'static) -> Self {
        self.pacer = Box::new(pacer);
        self
    }

    /// Replace the mirror candidates. Has no effect on an already selected mirror.
    pub fn set_mirrors<I, S>(&mut self, mirrors: I)
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.mirrors.set_candidates(mirrors);
    }

    pub fn mirrors(&self) -> &[String] {
        self.mirrors.candidates()
    }

    pub fn selected_mirror(&self) -> Option<&str> {
        self.mirrors.selected()
    }

    pub fn fetcher(&self) -> &F {
        &self.fetcher
    }

    /// Probe mirrors (first call only) and return the session mirror
    pub async fn select_mirror(&mut self) -> Result<String, MirrorError> {
        self.mirrors.select(&self.fetcher).await.map(str::to_string)
    }

    /// Search `column` for `term` and return at most `desired` records.
    ///
    /// The first request (without a page number) provides the total result count
    /// and doubles as page 1. Further pages are fetched in order until enough
    /// records are collected.
    pub async fn search(
        &mut self,
        term: &str,
        column: SearchColumn,
        desired: usize,
    ) -> Result<Vec<BookRecord>, SearchError> {
        let mirror = self.select_mirror().await?;
        if desired == 0 {
            return Ok(Vec::new());
        }

        let url = build_search_url(&mirror, term, column, None)?;
        log::info!("Searching {} for '{}' ({})", mirror, term, column);
        let html = self.fetcher.fetch(url.as_str()).await?;
        let (total, first_page) = parse_first_page(&html, &mirror);

        let pages = pages_to_load(desired, total);
        log::info!(
            "{} results reported, loading {} page(s) for {} wanted",
            total,
            pages,
            desired
        );

        let mut first_page = Some(first_page);
        let mut results: Vec<BookRecord> = Vec::new();
        for page in 1..=pages {
            if results.len() >= desired {
                log::debug!("Collected {} results, stopping before page {}", results.len(), page);
                break;
            }

            let records = match first_page.take() {
                Some(records) => records,
                None => {
                    let url = build_search_url(&mirror, term, column, Some(page))?;
                    let html = self.fetcher.fetch(url.as_str()).await?;
                    parse_page(&html, &mirror)
                }
            };
            log::debug!("Page {}: {} records", page, records.len());
            results.extend(records);

            if page != pages && results.len() < desired {
                self.pacer.pause().await;
            }
        }

        results.truncate(desired);
        Ok(results)
    }
}

fn parse_first_page(html: &str, mirror: &str) -> (usize, Vec<BookRecord>) {
    let doc = Html::parse_document(html);
    (parse_total_results(&doc), extract_records(&doc, mirror))
}

fn parse_page(html: &str, mirror: &str) -> Vec<BookRecord> {
    let doc = Html::parse_document(html);
    extract_records(&doc, mirror)
}
