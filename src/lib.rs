//! # untable
//!
//! Turn the block graph of an OCR table-extraction service into CSV.
//!
//! The service answers a document-analysis job with a flat list of blocks
//! (words, selection elements, cells, tables) linked by CHILD relationships.
//! This crate drives such jobs, rebuilds every detected table as a quoted
//! values CSV plus a parallel CSV of per-cell confidence scores, and manages
//! staging documents in object storage for batch runs.
//!
//! ## Quick Start
//!
//! ```no_run
//! use untable::tables_from_response_file;
//!
//! fn main() -> untable::Result<()> {
//!     // A recorded get-analysis-status response (one page or an array of pages)
//!     for table in tables_from_response_file("cost-2024.json")? {
//!         std::fs::write(table.values_file_name("cost-2024"), &table.values)?;
//!         std::fs::write(table.scores_file_name("cost-2024"), &table.scores)?;
//!     }
//!     Ok(())
//! }
//! ```
//!
//! ## Features
//!
//! - **Faithful reconstruction**: first-seen row/column order, quoted thousands
//!   separators, selection marks
//! - **Job driving**: submit, fixed-interval polling, result pagination
//! - **Batch staging**: upload, analyze and always clean up, per document
//! - **Offline replay**: recorded responses and a directory-backed store

pub mod analysis;
pub mod batch;
pub mod detect;
pub mod error;
pub mod model;
pub mod render;
pub mod storage;

// Re-export commonly used types
pub use analysis::{
    AnalysisService, DocumentLocation, JobDriver, PollOptions, ReplayService, Sleeper,
    ThreadSleeper,
};
pub use batch::{BatchExtractor, BatchOptions, BatchSummary, DocumentOutcome, DocumentReport};
pub use detect::{detect_kind_from_bytes, detect_kind_from_path, DocumentKind};
pub use error::{Error, Result};
pub use model::{
    AnalysisPage, Block, BlockGraph, BlockType, JobStatus, Relationship, SelectionStatus, Warning,
};
pub use render::{cell_text, render_tables, TableCsv, TableGrid};
pub use storage::{LocalStore, ObjectStore};

use std::path::Path;

/// Reconstruct the tables of a finished job from its result pages.
///
/// Blocks of all pages are concatenated in page order before the graph is
/// built. An empty result means no table was detected.
///
/// # Example
///
/// ```
/// use untable::{tables_from_pages, AnalysisPage, Block, JobStatus};
///
/// let page = AnalysisPage::new(JobStatus::Succeeded).with_blocks(vec![
///     Block::word("w1", "1,234"),
///     Block::cell("c1", 1, 1, 99.0).with_children(["w1"]),
///     Block::table("t1").with_children(["c1"]),
/// ]);
/// let tables = tables_from_pages(vec![page]).unwrap();
/// assert_eq!(tables[0].values, "\"\"\"1,234\"\" \"\n");
/// assert_eq!(tables[0].scores, "99.0\n");
/// ```
pub fn tables_from_pages(pages: Vec<AnalysisPage>) -> Result<Vec<TableCsv>> {
    let blocks = pages.into_iter().flat_map(|page| page.blocks).collect();
    let graph = BlockGraph::from_blocks(blocks)?;
    render_tables(&graph)
}

/// Reconstruct the tables of a recorded response file.
pub fn tables_from_response_file<P: AsRef<Path>>(path: P) -> Result<Vec<TableCsv>> {
    let data = std::fs::read_to_string(path)?;
    let pages = analysis::load_pages(&data)?;
    tables_from_pages(pages)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn survey_pages() -> Vec<AnalysisPage> {
        vec![
            AnalysisPage::new(JobStatus::Succeeded)
                .with_blocks(vec![
                    Block::word("w1", "Framing"),
                    Block::word("w2", "68,585"),
                    Block::cell("c1", 1, 1, 93.0).with_children(["w1"]),
                ])
                .with_next_token("1"),
            AnalysisPage::new(JobStatus::Succeeded).with_blocks(vec![
                Block::cell("c2", 1, 2, 91.5).with_children(["w2"]),
                Block::table("t1").with_children(["c1", "c2"]),
            ]),
        ]
    }

    #[test]
    fn test_tables_from_pages_spans_pages() {
        let tables = tables_from_pages(survey_pages()).unwrap();
        assert_eq!(tables.len(), 1);
        assert_eq!(tables[0].values, "\"Framing \",\"\"\"68,585\"\" \"\n");
        assert_eq!(tables[0].scores, "93.0,91.5\n");
    }

    #[test]
    fn test_tables_from_pages_without_tables() {
        let page = AnalysisPage::new(JobStatus::Succeeded).with_blocks(vec![Block::word("w", "x")]);
        assert!(tables_from_pages(vec![page]).unwrap().is_empty());
    }

    #[test]
    fn test_tables_from_response_file() {
        let dir = tempfile::TempDir::new().unwrap();
        let path = dir.path().join("survey.json");
        std::fs::write(&path, serde_json::to_string(&survey_pages()).unwrap()).unwrap();

        let tables = tables_from_response_file(&path).unwrap();
        assert_eq!(tables[0].index, 1);
    }

    #[test]
    fn test_malformed_response_fails() {
        let page = AnalysisPage::new(JobStatus::Succeeded)
            .with_blocks(vec![Block::table("t1").with_children(["gone"])]);
        let result = tables_from_pages(vec![page]);
        assert!(matches!(result, Err(Error::MissingBlock(_))));
    }
}
