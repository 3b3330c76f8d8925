//! Locating and normalising the "top 10 poses" table of one docking job.
//!
//! A job publishes its ranking either as a whitespace-delimited text file
//! ([`text`]) or inside an HTML results page ([`html`]). Both are reduced to
//! a [`TidyTable`] or, for pages already laid out one metric per row, a
//! [`WideTable`]; [`normalize::to_wide`] brings everything to the wide shape
//! written to the workbook. [`Scraper`] walks the candidate files for a job.

pub mod html;
pub mod normalize;
pub mod scrape;
pub mod table;
pub mod text;

pub use html::parse_html_table;
pub use normalize::to_wide;
pub use scrape::{HTML_CANDIDATES, ScrapeError, Scraper, TEXT_CANDIDATES};
pub use table::{Extracted, MAX_POSES, Metric, PoseRow, TidyTable, WideTable};
pub use text::parse_ranked_text;
