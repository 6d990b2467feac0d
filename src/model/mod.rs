//! Model types for the extraction service's block graph.
//!
//! Blocks arrive as a flat list per job. [`BlockGraph`] indexes them by
//! identifier and remembers the detected tables; [`AnalysisPage`] is one
//! page of a job status response.

mod block;
mod graph;
mod response;

pub use block::{Block, BlockType, Relationship, RelationshipType, SelectionStatus};
pub use graph::BlockGraph;
pub use response::{AnalysisPage, DocumentMetadata, JobStatus, Warning};
