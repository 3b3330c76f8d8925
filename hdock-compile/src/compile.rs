use std::path::{Path, PathBuf};
use std::time::Duration;

use hdock_http::Fetch;
use hdock_scrape::{Scraper, WideTable};
use rust_xlsxwriter::XlsxError;
use thiserror::Error;
use url::Url;

use crate::jobs::{Job, SkippedLine, parse_job_list};
use crate::workbook::write_workbook;

#[derive(Debug, Error)]
pub enum CompileError {
    #[error("failed to read job list {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("no data parsed; workbook not created")]
    NoOutput,
    #[error("failed to write workbook: {0}")]
    Workbook(#[from] XlsxError),
}

/// Run-level knobs, fixed at construction.
#[derive(Debug, Clone)]
pub struct CompileOptions {
    /// Delay after every job, successful or not.
    pub pause: Duration,
    pub sheet_name: String,
}

impl Default for CompileOptions {
    fn default() -> Self {
        Self {
            pause: Duration::from_secs(1),
            sheet_name: "Summary".to_string(),
        }
    }
}

/// A successfully scraped job, kept until the workbook is written.
#[derive(Debug, Clone, PartialEq)]
pub struct ResultBlock {
    pub complex_id: String,
    pub base_url: Url,
    pub table: WideTable,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CompileSummary {
    pub attempted: usize,
    pub succeeded: usize,
    pub failed: usize,
    /// Input lines that were not jobs, each already logged as a warning.
    pub skipped: Vec<SkippedLine>,
}

/// Scrapes every job of a list, one after another, into one workbook.
pub struct Compiler<F> {
    scraper: Scraper<F>,
    options: CompileOptions,
}

impl<F: Fetch> Compiler<F> {
    pub fn new(fetcher: F, options: CompileOptions) -> Self {
        Self {
            scraper: Scraper::new(fetcher),
            options,
        }
    }

    /// Read `input`, scrape each job, and write `output`.
    ///
    /// Nothing is written unless at least one job produced a table.
    pub async fn compile(&self, input: &Path, output: &Path) -> Result<CompileSummary, CompileError> {
        let text = tokio::fs::read_to_string(input)
            .await
            .map_err(|source| CompileError::Io {
                path: input.to_path_buf(),
                source,
            })?;
        let list = parse_job_list(&text);
        tracing::info!(
            input = %input.display(),
            jobs = list.jobs.len(),
            skipped = list.skipped.len(),
            "compile.input.loaded"
        );

        let blocks = self.collect(&list.jobs).await;
        let summary = CompileSummary {
            attempted: list.jobs.len(),
            succeeded: blocks.len(),
            failed: list.jobs.len() - blocks.len(),
            skipped: list.skipped,
        };
        if blocks.is_empty() {
            return Err(CompileError::NoOutput);
        }

        write_workbook(output, &self.options.sheet_name, &blocks)?;
        tracing::info!(
            output = %output.display(),
            blocks = blocks.len(),
            "compile.workbook.written"
        );
        Ok(summary)
    }

    /// Scrape `jobs` in order; failures are logged and left out.
    pub async fn collect(&self, jobs: &[Job]) -> Vec<ResultBlock> {
        let mut blocks = Vec::with_capacity(jobs.len());
        for job in jobs {
            tracing::info!(complex_id = %job.complex_id, url = %job.base_url, "compile.job.start");
            match self.scraper.scrape(&job.base_url).await {
                Ok(table) => {
                    tracing::info!(complex_id = %job.complex_id, "compile.job.done");
                    blocks.push(ResultBlock {
                        complex_id: job.complex_id.clone(),
                        base_url: job.base_url.clone(),
                        table,
                    });
                }
                Err(e) => {
                    tracing::error!(complex_id = %job.complex_id, error = %e, "compile.job.failed");
                }
            }
            if !self.options.pause.is_zero() {
                tokio::time::sleep(self.options.pause).await;
            }
        }
        blocks
    }
}
