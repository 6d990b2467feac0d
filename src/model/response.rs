//! Job status responses.

use super::Block;
use serde::{Deserialize, Serialize};

/// One page of a get-analysis-status response.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct AnalysisPage {
    /// Current job status
    pub job_status: JobStatus,

    /// Diagnostic message
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status_message: Option<String>,

    /// Warnings raised while analyzing
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub warnings: Vec<Warning>,

    /// Progress metadata
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub document_metadata: Option<DocumentMetadata>,

    /// Blocks carried by this page
    #[serde(default)]
    pub blocks: Vec<Block>,

    /// Continuation token for the next page
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub next_token: Option<String>,
}

impl AnalysisPage {
    /// Create an empty page with the given status.
    pub fn new(job_status: JobStatus) -> Self {
        Self {
            job_status,
            ..Self::default()
        }
    }

    /// Set blocks and return self.
    pub fn with_blocks(mut self, blocks: Vec<Block>) -> Self {
        self.blocks = blocks;
        self
    }

    /// Set continuation token and return self.
    pub fn with_next_token(mut self, token: impl Into<String>) -> Self {
        self.next_token = Some(token.into());
        self
    }

    /// Set status message and return self.
    pub fn with_message(mut self, message: impl Into<String>) -> Self {
        self.status_message = Some(message.into());
        self
    }

    /// Set processed page count and return self.
    pub fn with_pages(mut self, pages: u32) -> Self {
        self.document_metadata = Some(DocumentMetadata { pages: Some(pages) });
        self
    }

    /// Processed page count, if the service reported one.
    pub fn page_count(&self) -> Option<u32> {
        self.document_metadata.as_ref().and_then(|m| m.pages)
    }
}

/// Document progress metadata.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct DocumentMetadata {
    /// Number of pages processed so far
    #[serde(default)]
    pub pages: Option<u32>,
}

/// A warning attached to a response.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct Warning {
    /// Service error code
    pub error_code: String,

    /// Affected pages
    #[serde(default)]
    pub pages: Vec<u32>,
}

impl std::fmt::Display for Warning {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        if self.pages.is_empty() {
            return f.write_str(&self.error_code);
        }
        let pages = self
            .pages
            .iter()
            .map(|p| p.to_string())
            .collect::<Vec<_>>()
            .join(", ");
        write!(f, "{} (pages {})", self.error_code, pages)
    }
}

/// Status of an analysis job.
///
/// Statuses this crate does not know are kept verbatim in
/// [`JobStatus::Other`] and count as terminal failures.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum JobStatus {
    /// Still running
    #[default]
    InProgress,
    /// Some pages done, still running
    PartialSuccess,
    /// Finished successfully
    Succeeded,
    /// Finished with an error
    Failed,
    /// Any other reported status
    Other(String),
}

impl JobStatus {
    /// Whether the job should be polled again.
    pub fn is_running(&self) -> bool {
        matches!(self, JobStatus::InProgress | JobStatus::PartialSuccess)
    }

    /// Wire name of the status.
    pub fn as_str(&self) -> &str {
        match self {
            JobStatus::InProgress => "IN_PROGRESS",
            JobStatus::PartialSuccess => "PARTIAL_SUCCESS",
            JobStatus::Succeeded => "SUCCEEDED",
            JobStatus::Failed => "FAILED",
            JobStatus::Other(s) => s,
        }
    }
}

impl From<String> for JobStatus {
    fn from(value: String) -> Self {
        match value.as_str() {
            "IN_PROGRESS" => JobStatus::InProgress,
            "PARTIAL_SUCCESS" => JobStatus::PartialSuccess,
            "SUCCEEDED" => JobStatus::Succeeded,
            "FAILED" => JobStatus::Failed,
            _ => JobStatus::Other(value),
        }
    }
}

impl From<JobStatus> for String {
    fn from(status: JobStatus) -> Self {
        status.as_str().to_string()
    }
}

impl std::fmt::Display for JobStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_decode_page() {
        let json = r#"{
            "JobStatus": "SUCCEEDED",
            "DocumentMetadata": {"Pages": 4},
            "Blocks": [{"Id": "t1", "BlockType": "TABLE"}],
            "NextToken": "abc"
        }"#;
        let page: AnalysisPage = serde_json::from_str(json).unwrap();
        assert_eq!(page.job_status, JobStatus::Succeeded);
        assert_eq!(page.page_count(), Some(4));
        assert_eq!(page.blocks.len(), 1);
        assert_eq!(page.next_token.as_deref(), Some("abc"));
    }

    #[test]
    fn test_unknown_status_is_kept() {
        let page: AnalysisPage = serde_json::from_str(r#"{"JobStatus": "EXPIRED"}"#).unwrap();
        assert_eq!(page.job_status, JobStatus::Other("EXPIRED".to_string()));
        assert!(!page.job_status.is_running());
        assert_eq!(page.job_status.to_string(), "EXPIRED");
    }

    #[test]
    fn test_running_statuses() {
        assert!(JobStatus::InProgress.is_running());
        assert!(JobStatus::PartialSuccess.is_running());
        assert!(!JobStatus::Succeeded.is_running());
        assert!(!JobStatus::Failed.is_running());
    }

    #[test]
    fn test_warning_display() {
        let warning = Warning {
            error_code: "PAGE_SKIPPED".to_string(),
            pages: vec![3],
        };
        assert_eq!(warning.to_string(), "PAGE_SKIPPED (pages 3)");
    }
}
