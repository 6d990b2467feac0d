//! Analysis job driving.
//!
//! [`JobDriver`] submits a staged document to an [`AnalysisService`], polls
//! the job until it reaches a terminal status and pages through the result
//! blocks. The service and the wait between polls are injected, so tests
//! substitute fakes and offline runs use [`ReplayService`].

mod driver;
mod options;
mod replay;
mod service;

pub use driver::JobDriver;
pub use options::{PollOptions, DEFAULT_POLL_INTERVAL};
pub use replay::{load_pages, ReplayService};
pub use service::{AnalysisService, DocumentLocation, Sleeper, ThreadSleeper};
