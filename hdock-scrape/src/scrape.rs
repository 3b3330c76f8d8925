//! Candidate walk for one job's result directory.

use hdock_http::Fetch;
use thiserror::Error;
use url::Url;

use crate::html::parse_html_table;
use crate::normalize::to_wide;
use crate::table::WideTable;
use crate::text::parse_ranked_text;

/// Ranked-poses text files, tried first and in this order.
pub const TEXT_CANDIDATES: [&str; 2] = ["ranked_poses.txt", "ranked.txt"];

/// Result pages, tried after the text files; `""` is the job URL itself.
pub const HTML_CANDIDATES: [&str; 4] = ["", "result.html", "index.html", "results.html"];

#[derive(Debug, Error)]
pub enum ScrapeError {
    #[error("no parsable top-10 data under {url}")]
    NoData { url: Url },
}

/// Finds the top-10 table of a job by trying each candidate file in turn.
///
/// Fetch failures and unparseable payloads both just move on to the next
/// candidate; only running out of candidates is an error.
pub struct Scraper<F> {
    fetcher: F,
}

impl<F: Fetch> Scraper<F> {
    pub fn new(fetcher: F) -> Self {
        Self { fetcher }
    }

    pub fn fetcher(&self) -> &F {
        &self.fetcher
    }

    /// `base_url` must end in `/` so candidates resolve inside the job
    /// directory.
    pub async fn scrape(&self, base_url: &Url) -> Result<WideTable, ScrapeError> {
        for name in TEXT_CANDIDATES {
            let Some(body) = self.fetch_candidate(base_url, name).await else {
                continue;
            };
            match parse_ranked_text(&body) {
                Some(tidy) => {
                    tracing::debug!(candidate = name, rows = tidy.len(), "scrape.candidate.hit");
                    return Ok(to_wide(tidy.into()));
                }
                None => tracing::debug!(candidate = name, "scrape.candidate.miss"),
            }
        }

        for name in HTML_CANDIDATES {
            let Some(body) = self.fetch_candidate(base_url, name).await else {
                continue;
            };
            match parse_html_table(&body) {
                Some(found) => {
                    tracing::debug!(candidate = name, "scrape.candidate.hit");
                    return Ok(to_wide(found));
                }
                None => tracing::debug!(candidate = name, "scrape.candidate.miss"),
            }
        }

        Err(ScrapeError::NoData {
            url: base_url.clone(),
        })
    }

    async fn fetch_candidate(&self, base_url: &Url, name: &str) -> Option<String> {
        let url = match base_url.join(name) {
            Ok(url) => url,
            Err(e) => {
                tracing::debug!(candidate = name, error = %e, "scrape.candidate.bad_url");
                return None;
            }
        };
        match self.fetcher.fetch(&url).await {
            Ok(body) => Some(body),
            Err(e) => {
                tracing::debug!(candidate = name, error = %e, "scrape.candidate.fetch_failed");
                None
            }
        }
    }
}
