//! Polling options.

use std::time::Duration;

/// Default wait between status polls.
pub const DEFAULT_POLL_INTERVAL: Duration = Duration::from_secs(5);

/// Options for polling an analysis job.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PollOptions {
    /// Wait before each status query
    pub interval: Duration,

    /// Give up once this much time has been spent waiting (None = never)
    pub max_wait: Option<Duration>,
}

impl PollOptions {
    /// Create new poll options with defaults.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the poll interval.
    pub fn with_interval(mut self, interval: Duration) -> Self {
        self.interval = interval;
        self
    }

    /// Set the maximum total wait.
    pub fn with_max_wait(mut self, max_wait: Duration) -> Self {
        self.max_wait = Some(max_wait);
        self
    }

    /// Poll until a terminal status, however long it takes.
    pub fn unbounded(mut self) -> Self {
        self.max_wait = None;
        self
    }
}

impl Default for PollOptions {
    fn default() -> Self {
        Self {
            interval: DEFAULT_POLL_INTERVAL,
            max_wait: None,
        }
    }
}
