//! Analysis job lifecycle: submit, poll, paginate.

use super::{AnalysisService, DocumentLocation, PollOptions, Sleeper};
use crate::error::{Error, Result};
use crate::model::{AnalysisPage, Block, BlockGraph, JobStatus};
use crate::render::{render_tables, TableCsv};
use std::time::Duration;

/// Drives one analysis job at a time against an [`AnalysisService`].
///
/// Polling blocks the calling thread through the injected [`Sleeper`]. With
/// the default [`PollOptions`] there is no upper bound on how long a job may
/// run; set [`PollOptions::max_wait`] to get [`Error::PollTimeout`] instead.
pub struct JobDriver<'a> {
    service: &'a dyn AnalysisService,
    sleeper: &'a dyn Sleeper,
    options: PollOptions,
}

impl<'a> JobDriver<'a> {
    /// Create a driver with default poll options.
    pub fn new(service: &'a dyn AnalysisService, sleeper: &'a dyn Sleeper) -> Self {
        Self {
            service,
            sleeper,
            options: PollOptions::default(),
        }
    }

    /// Set poll options.
    pub fn with_options(mut self, options: PollOptions) -> Self {
        self.options = options;
        self
    }

    /// Submit a document for table analysis.
    pub fn submit(&self, location: &DocumentLocation) -> Result<String> {
        log::info!("Starting analysis job for {}", location);
        let job_id = self.service.start_analysis(location)?;
        log::info!("Job started with ID: {}", job_id);
        Ok(job_id)
    }

    /// Poll until the job leaves IN_PROGRESS/PARTIAL_SUCCESS.
    ///
    /// Returns the last status page on SUCCEEDED. Any other terminal status
    /// becomes [`Error::JobFailed`]; failed jobs are never retried.
    pub fn wait(&self, job_id: &str) -> Result<AnalysisPage> {
        let mut waited = Duration::ZERO;
        let mut pages_processed = 0;

        let page = loop {
            self.sleeper.sleep(self.options.interval);
            waited += self.options.interval;

            let page = self.service.get_analysis(job_id, None)?;
            match page.status_message {
                Some(ref message) => log::info!("Job status: {} - {}", page.job_status, message),
                None => log::info!("Job status: {}", page.job_status),
            }
            if let Some(pages) = page.page_count() {
                if pages != pages_processed {
                    pages_processed = pages;
                    log::info!("Pages processed: {}", pages_processed);
                }
            }

            if !page.job_status.is_running() {
                break page;
            }
            if let Some(max_wait) = self.options.max_wait {
                if waited >= max_wait {
                    log::error!("Job {} still {} after {:?}", job_id, page.job_status, waited);
                    return Err(Error::PollTimeout {
                        job_id: job_id.to_string(),
                        waited,
                    });
                }
            }
        };

        if page.job_status != JobStatus::Succeeded {
            let err = Error::JobFailed {
                status: page.job_status,
                message: page.status_message,
                warnings: page.warnings,
            };
            log::error!("{}", err);
            return Err(err);
        }
        Ok(page)
    }

    /// Fetch every result page of a finished job and concatenate the blocks.
    pub fn collect_blocks(&self, job_id: &str) -> Result<Vec<Block>> {
        let mut blocks = Vec::new();
        let mut next_token: Option<String> = None;

        loop {
            let page = self.service.get_analysis(job_id, next_token.as_deref())?;
            blocks.extend(page.blocks);
            next_token = page.next_token.filter(|token| !token.is_empty());
            if next_token.is_none() {
                break;
            }
        }

        log::info!("Total blocks received: {}", blocks.len());
        Ok(blocks)
    }

    /// Submit, wait and collect all blocks for one document.
    pub fn run(&self, location: &DocumentLocation) -> Result<Vec<Block>> {
        let job_id = self.submit(location)?;
        self.wait(&job_id)?;
        self.collect_blocks(&job_id)
    }

    /// Run a job and reconstruct its tables.
    ///
    /// An empty result means the job succeeded but found no tables.
    pub fn extract_tables(&self, location: &DocumentLocation) -> Result<Vec<TableCsv>> {
        let blocks = self.run(location)?;
        let graph = BlockGraph::from_blocks(blocks)?;
        if graph.table_count() == 0 {
            log::warn!("No tables found in the document.");
            return Ok(Vec::new());
        }
        render_tables(&graph)
    }
}
