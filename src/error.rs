//! Error types for untable library.

use crate::model::{JobStatus, Warning};
use std::io;
use std::time::Duration;
use thiserror::Error;

/// Result type alias for untable operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Error types that can occur while extracting tables.
#[derive(Error, Debug)]
pub enum Error {
    /// I/O error when reading or writing files.
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    /// A service response could not be decoded.
    #[error("JSON decoding error: {0}")]
    Json(#[from] serde_json::Error),

    /// A block is missing a field its kind requires.
    #[error("Malformed block {id}: {reason}")]
    MalformedBlock {
        /// Identifier of the offending block
        id: String,
        /// What is missing
        reason: String,
    },

    /// A relationship references a block that was never received.
    #[error("Missing block: {0}")]
    MissingBlock(String),

    /// The analysis job ended in a non-success status.
    #[error("{}", job_failure_message(.status, .message, .warnings))]
    JobFailed {
        /// Terminal status reported by the service
        status: JobStatus,
        /// Diagnostic message, if the service supplied one
        message: Option<String>,
        /// Warnings attached to the response
        warnings: Vec<Warning>,
    },

    /// The job was still running when the configured wait limit ran out.
    #[error("Analysis job {job_id} still running after {waited:?}")]
    PollTimeout {
        /// Job identifier issued by the service
        job_id: String,
        /// Total time spent waiting between polls
        waited: Duration,
    },

    /// The extraction service rejected a request.
    #[error("Analysis service error: {0}")]
    Service(String),

    /// The storage container exists and belongs to someone else.
    #[error("Container {0} already exists")]
    ContainerAlreadyExists(String),

    /// The storage container exists and belongs to the caller.
    #[error("Container {0} already owned by you")]
    ContainerAlreadyOwned(String),

    /// Object storage failure.
    #[error("Storage error: {0}")]
    Storage(String),

    /// The document is not in a format the service accepts.
    #[error("Unknown document format")]
    UnknownFormat,
}

impl Error {
    /// Build a `MalformedBlock` error.
    pub fn malformed(id: impl Into<String>, reason: impl Into<String>) -> Self {
        Error::MalformedBlock {
            id: id.into(),
            reason: reason.into(),
        }
    }

    /// Whether this error only says the container is already there.
    pub fn is_existing_container(&self) -> bool {
        matches!(
            self,
            Error::ContainerAlreadyExists(_) | Error::ContainerAlreadyOwned(_)
        )
    }
}

fn job_failure_message(status: &JobStatus, message: &Option<String>, warnings: &[Warning]) -> String {
    let mut out = format!("Analysis job failed with status: {}.", status);
    if let Some(message) = message {
        out.push_str(&format!(" Message: {}", message));
    }
    if !warnings.is_empty() {
        let listed = warnings
            .iter()
            .map(|w| w.to_string())
            .collect::<Vec<_>>()
            .join(", ");
        out.push_str(&format!(" Warnings: [{}]", listed));
    }
    out
}
