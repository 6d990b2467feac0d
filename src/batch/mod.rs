//! Batch extraction over many documents.
//!
//! Each document is staged into the storage container, analyzed, rendered to
//! one values/scores CSV pair per table and then removed from the container,
//! whatever happened in between. A failing document never stops the batch;
//! its error ends up in the [`BatchSummary`].
//!
//! # Example
//!
//! ```no_run
//! use std::sync::Arc;
//! use untable::analysis::ReplayService;
//! use untable::batch::{BatchExtractor, BatchOptions};
//! use untable::storage::LocalStore;
//!
//! fn main() -> untable::Result<()> {
//!     let extractor = BatchExtractor::new(
//!         Arc::new(ReplayService::new("recordings")),
//!         Arc::new(LocalStore::new("staging")),
//!         BatchOptions::new("construction-cost-survey").with_output_dir("data/interim"),
//!     );
//!     let summary = extractor.run(&["data/raw/cost-2024.pdf"])?;
//!     println!("{}", summary);
//!     Ok(())
//! }
//! ```

mod options;
mod report;

pub use options::{BatchOptions, DEFAULT_REGION};
pub use report::{BatchSummary, DocumentOutcome, DocumentReport};

use crate::analysis::{AnalysisService, DocumentLocation, JobDriver, Sleeper, ThreadSleeper};
use crate::detect::content_type_for;
use crate::error::Result;
use crate::render::TableCsv;
use crate::storage::ObjectStore;
use std::fs;
use std::path::Path;
use std::sync::Arc;

/// Runs table extraction for a list of documents, one at a time.
pub struct BatchExtractor {
    service: Arc<dyn AnalysisService>,
    store: Arc<dyn ObjectStore>,
    sleeper: Arc<dyn Sleeper>,
    options: BatchOptions,
}

impl BatchExtractor {
    /// Create an extractor that waits between polls with [`ThreadSleeper`].
    pub fn new(
        service: Arc<dyn AnalysisService>,
        store: Arc<dyn ObjectStore>,
        options: BatchOptions,
    ) -> Self {
        Self {
            service,
            store,
            sleeper: Arc::new(ThreadSleeper),
            options,
        }
    }

    /// Replace the poll sleeper.
    pub fn with_sleeper(mut self, sleeper: Arc<dyn Sleeper>) -> Self {
        self.sleeper = sleeper;
        self
    }

    /// Options in use.
    pub fn options(&self) -> &BatchOptions {
        &self.options
    }

    /// Process every document in order and summarize.
    ///
    /// Per-document failures are folded into the summary. Only container
    /// creation (other than "already exists"), output directory creation and
    /// the final container deletion return an error.
    pub fn run<P: AsRef<Path>>(&self, documents: &[P]) -> Result<BatchSummary> {
        fs::create_dir_all(&self.options.output_dir)?;
        self.ensure_container()?;

        let mut summary = BatchSummary::default();
        for path in documents {
            summary.documents.push(self.process_document(path.as_ref()));
        }

        if self.options.delete_container {
            log::info!("Deleting container {}", self.options.container);
            self.store.delete_container(&self.options.container)?;
        }
        Ok(summary)
    }

    fn ensure_container(&self) -> Result<()> {
        let name = &self.options.container;
        match self.store.create_container(name, &self.options.region) {
            Ok(()) => {
                log::info!("Created container {}", name);
                Ok(())
            }
            Err(e) if e.is_existing_container() => {
                log::info!("{}", e);
                Ok(())
            }
            Err(e) => Err(e),
        }
    }

    /// Stage, analyze, write and unstage one document.
    pub fn process_document(&self, path: &Path) -> DocumentReport {
        let name = path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| path.display().to_string());
        log::info!("Processing {}:", name);

        let outcome = match self.extract(path, &name) {
            Ok(tables) if tables.is_empty() => {
                log::info!(" - No tables found in {}", name);
                DocumentOutcome::NoTables
            }
            Ok(tables) => DocumentOutcome::Tables { tables },
            Err(e) => {
                log::error!("  - Error processing {}: {}", name, e);
                DocumentOutcome::Failed {
                    error: e.to_string(),
                }
            }
        };

        let mut report = DocumentReport::new(name.clone(), outcome);
        let container = &self.options.container;
        log::info!("  Deleting {}/{} from storage.", container, name);
        match self.store.delete_object(container, &name) {
            Ok(()) => log::info!("  Deletion of {} from storage complete.", name),
            Err(e) => {
                log::error!("  - Error deleting {} from storage: {}", name, e);
                report.cleanup_error = Some(e.to_string());
            }
        }
        report
    }

    fn extract(&self, path: &Path, name: &str) -> Result<Vec<TableCsv>> {
        let container = &self.options.container;
        log::info!("  Uploading {} to {}/{}", path.display(), container, name);
        self.store
            .put_object(container, name, path, content_type_for(path))?;
        log::info!("  Upload of {} complete.", name);

        let driver = JobDriver::new(self.service.as_ref(), self.sleeper.as_ref())
            .with_options(self.options.poll.clone());
        let tables = driver.extract_tables(&DocumentLocation::new(container.as_str(), name))?;

        let stem = path
            .file_stem()
            .map(|s| s.to_string_lossy().into_owned())
            .unwrap_or_else(|| name.to_string());
        self.write_tables(&stem, &tables)?;
        Ok(tables)
    }

    fn write_tables(&self, stem: &str, tables: &[TableCsv]) -> Result<()> {
        for table in tables {
            let values_path = self.options.output_dir.join(table.values_file_name(stem));
            let scores_path = self.options.output_dir.join(table.scores_file_name(stem));
            fs::write(&values_path, &table.values)?;
            fs::write(&scores_path, &table.scores)?;
            log::debug!("Wrote {} and {}", values_path.display(), scores_path.display());
        }
        Ok(())
    }
}
