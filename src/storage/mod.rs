//! Object storage used to stage documents for analysis.
//!
//! The extraction service reads documents from a storage container, so each
//! document is uploaded before its job starts and removed afterwards.

mod local;

pub use local::LocalStore;

use crate::error::Result;
use std::path::Path;

/// Container-based object store.
pub trait ObjectStore: Send + Sync {
    /// Create a container in `region`.
    ///
    /// Fails with [`ContainerAlreadyExists`](crate::Error::ContainerAlreadyExists)
    /// or [`ContainerAlreadyOwned`](crate::Error::ContainerAlreadyOwned) when
    /// the container is already there.
    fn create_container(&self, name: &str, region: &str) -> Result<()>;

    /// Upload a local file as `key`.
    fn put_object(&self, container: &str, key: &str, source: &Path, content_type: &str)
        -> Result<()>;

    /// Delete one object.
    fn delete_object(&self, container: &str, key: &str) -> Result<()>;

    /// Delete an empty container.
    fn delete_container(&self, name: &str) -> Result<()>;
}
