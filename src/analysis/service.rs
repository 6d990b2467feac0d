//! Seams to the extraction service and to wall-clock waiting.

use crate::error::Result;
use crate::model::AnalysisPage;
use std::time::Duration;

/// Where the service reads a staged document from.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct DocumentLocation {
    /// Storage container name
    pub container: String,
    /// Object name inside the container
    pub name: String,
}

impl DocumentLocation {
    /// Create a new location.
    pub fn new(container: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            container: container.into(),
            name: name.into(),
        }
    }
}

impl std::fmt::Display for DocumentLocation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}/{}", self.container, self.name)
    }
}

/// Asynchronous table-analysis service.
///
/// Implement this trait to drive a real OCR backend; tests and offline runs
/// use [`ReplayService`](super::ReplayService) or an in-memory fake.
pub trait AnalysisService: Send + Sync {
    /// Start table analysis of a staged document and return the job identifier.
    fn start_analysis(&self, location: &DocumentLocation) -> Result<String>;

    /// Fetch job status and, when given a token, a later page of blocks.
    fn get_analysis(&self, job_id: &str, next_token: Option<&str>) -> Result<AnalysisPage>;
}

/// Blocking wait between status polls.
pub trait Sleeper: Send + Sync {
    /// Block the current thread for `duration`.
    fn sleep(&self, duration: Duration);
}

/// [`Sleeper`] backed by [`std::thread::sleep`].
#[derive(Debug, Clone, Copy, Default)]
pub struct ThreadSleeper;

impl Sleeper for ThreadSleeper {
    fn sleep(&self, duration: Duration) {
        std::thread::sleep(duration);
    }
}
