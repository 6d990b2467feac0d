//! Per-document outcomes and the batch summary.

use crate::render::TableCsv;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Primary result of processing one document.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum DocumentOutcome {
    /// Tables were found and written
    Tables {
        /// Rendered tables, numbered from 1
        tables: Vec<TableCsv>,
    },
    /// The job succeeded without detecting a table
    NoTables,
    /// Staging, analysis or writing failed
    Failed {
        /// Error description
        error: String,
    },
}

/// What happened to one document of a batch.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DocumentReport {
    /// Document file name, also the staged object name
    pub name: String,

    /// Primary outcome
    pub outcome: DocumentOutcome,

    /// Failure to remove the staged object, if any
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cleanup_error: Option<String>,
}

impl DocumentReport {
    /// Create a report with no cleanup error.
    pub fn new(name: impl Into<String>, outcome: DocumentOutcome) -> Self {
        Self {
            name: name.into(),
            outcome,
            cleanup_error: None,
        }
    }

    /// Whether the primary outcome is not a failure.
    pub fn is_success(&self) -> bool {
        !matches!(self.outcome, DocumentOutcome::Failed { .. })
    }

    /// Tables produced for this document.
    pub fn tables(&self) -> &[TableCsv] {
        match &self.outcome {
            DocumentOutcome::Tables { tables } => tables.as_slice(),
            _ => &[],
        }
    }
}

impl fmt::Display for DocumentReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Processing {}:", self.name)?;
        match &self.outcome {
            DocumentOutcome::Tables { tables } => write!(
                f,
                "  - Extracted {} table(s) from {}",
                tables.len(),
                self.name
            )?,
            DocumentOutcome::NoTables => write!(f, "  - No tables found in {}", self.name)?,
            DocumentOutcome::Failed { error } => {
                write!(f, "  - Error processing {}: {}", self.name, error)?
            }
        }
        if let Some(ref error) = self.cleanup_error {
            write!(
                f,
                "\n  - Error deleting {} from storage: {}",
                self.name, error
            )?;
        }
        Ok(())
    }
}

/// Aggregated result of a batch run, one report per input document in order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct BatchSummary {
    /// Reports in input order
    pub documents: Vec<DocumentReport>,
}

impl BatchSummary {
    /// Number of documents whose primary outcome is not a failure.
    pub fn succeeded(&self) -> usize {
        self.documents.iter().filter(|d| d.is_success()).count()
    }

    /// Number of documents that failed.
    pub fn failed(&self) -> usize {
        self.documents.len() - self.succeeded()
    }

    /// Total tables across all documents.
    pub fn table_count(&self) -> usize {
        self.documents.iter().map(|d| d.tables().len()).sum()
    }

    /// Report for a document name.
    pub fn get(&self, name: &str) -> Option<&DocumentReport> {
        self.documents.iter().find(|d| d.name == name)
    }
}

impl fmt::Display for BatchSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, report) in self.documents.iter().enumerate() {
            if i > 0 {
                f.write_str("\n---\n")?;
            }
            write!(f, "{}", report)?;
        }
        Ok(())
    }
}
