//! Directory-backed object store.

use super::ObjectStore;
use crate::error::{Error, Result};
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

/// [`ObjectStore`] that keeps each container as a sub-directory of `root`.
///
/// Regions and content types are accepted and ignored.
#[derive(Debug, Clone)]
pub struct LocalStore {
    root: PathBuf,
}

impl LocalStore {
    /// Store containers under `root`.
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    /// Directory of a container.
    pub fn container_path(&self, name: &str) -> PathBuf {
        self.root.join(name)
    }

    fn object_path(&self, container: &str, key: &str) -> Result<PathBuf> {
        let dir = self.container_path(container);
        if !dir.is_dir() {
            return Err(Error::Storage(format!("no such container: {}", container)));
        }
        Ok(dir.join(key))
    }
}

impl ObjectStore for LocalStore {
    fn create_container(&self, name: &str, _region: &str) -> Result<()> {
        let dir = self.container_path(name);
        if dir.is_dir() {
            return Err(Error::ContainerAlreadyOwned(name.to_string()));
        }
        fs::create_dir_all(&dir)?;
        Ok(())
    }

    fn put_object(
        &self,
        container: &str,
        key: &str,
        source: &Path,
        _content_type: &str,
    ) -> Result<()> {
        let target = self.object_path(container, key)?;
        fs::copy(source, &target)?;
        Ok(())
    }

    fn delete_object(&self, container: &str, key: &str) -> Result<()> {
        let target = self.object_path(container, key)?;
        match fs::remove_file(&target) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(e.into()),
        }
    }

    fn delete_container(&self, name: &str) -> Result<()> {
        let dir = self.container_path(name);
        fs::remove_dir(&dir)
            .map_err(|e| Error::Storage(format!("cannot delete container {}: {}", name, e)))
    }
}
