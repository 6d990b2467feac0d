//! Batch configuration.

use crate::analysis::PollOptions;
use std::path::PathBuf;

/// Default storage region, used as the container's location constraint.
pub const DEFAULT_REGION: &str = "us-west-2";

/// Options for a batch extraction run.
#[derive(Debug, Clone)]
pub struct BatchOptions {
    /// Staging container name
    pub container: String,

    /// Location constraint for the container
    pub region: String,

    /// Directory receiving the CSV files
    pub output_dir: PathBuf,

    /// Job polling options
    pub poll: PollOptions,

    /// Remove the staging container once every document is done
    pub delete_container: bool,
}

impl BatchOptions {
    /// Create options for a staging container, other fields default.
    pub fn new(container: impl Into<String>) -> Self {
        Self {
            container: container.into(),
            ..Self::default()
        }
    }

    /// Set the region.
    pub fn with_region(mut self, region: impl Into<String>) -> Self {
        self.region = region.into();
        self
    }

    /// Set the output directory.
    pub fn with_output_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.output_dir = dir.into();
        self
    }

    /// Set poll options.
    pub fn with_poll(mut self, poll: PollOptions) -> Self {
        self.poll = poll;
        self
    }

    /// Leave the staging container in place after the run.
    pub fn keep_container(mut self) -> Self {
        self.delete_container = false;
        self
    }
}

impl Default for BatchOptions {
    fn default() -> Self {
        Self {
            container: "untable-staging".to_string(),
            region: DEFAULT_REGION.to_string(),
            output_dir: PathBuf::from("data/interim"),
            poll: PollOptions::default(),
            delete_container: true,
        }
    }
}
