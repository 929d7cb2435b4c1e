//! Named-blob storage backends
//!
//! The ticket store keeps its whole collection in a single named blob.
//! [`BlobStorage`] is the seam between the store and where the blob lives.

use crate::error::{DeskError, Result};
use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Mutex;

/// Get/set/remove access to named text blobs
#[cfg_attr(test, mockall::automock)]
pub trait BlobStorage: Send + Sync {
    /// Read a blob, `None` if it was never written or has been removed
    fn get(&self, key: &str) -> Result<Option<String>>;

    /// Replace a blob's contents
    fn set(&self, key: &str, value: &str) -> Result<()>;

    /// Remove a blob; removing a missing blob is not an error
    fn remove(&self, key: &str) -> Result<()>;
}

/// Blobs stored as `<dir>/<key>.json` files
#[derive(Debug, Clone)]
pub struct FileBlobStorage {
    root: PathBuf,
}

impl FileBlobStorage {
    pub fn new(root: impl AsRef<Path>) -> Self {
        Self {
            root: root.as_ref().to_path_buf(),
        }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    fn path_for(&self, key: &str) -> Result<PathBuf> {
        if key.is_empty() || key.contains(['/', '\\']) || key.starts_with('.') {
            return Err(DeskError::InvalidInput(format!(
                "Storage key '{key}' must be a plain file name"
            )));
        }
        Ok(self.root.join(format!("{key}.json")))
    }
}

impl BlobStorage for FileBlobStorage {
    fn get(&self, key: &str) -> Result<Option<String>> {
        let path = self.path_for(key)?;
        if !path.exists() {
            return Ok(None);
        }
        tracing::debug!("Reading blob {}", path.display());
        Ok(Some(fs::read_to_string(&path)?))
    }

    fn set(&self, key: &str, value: &str) -> Result<()> {
        let path = self.path_for(key)?;
        fs::create_dir_all(&self.root)?;

        // Replace via a sibling temp file so readers never see a partial blob
        let tmp_path = path.with_extension("json.tmp");
        if let Err(e) = fs::write(&tmp_path, value).and_then(|()| fs::rename(&tmp_path, &path)) {
            let _ = fs::remove_file(&tmp_path);
            return Err(e.into());
        }
        tracing::debug!("Wrote {} bytes to {}", value.len(), path.display());
        Ok(())
    }

    fn remove(&self, key: &str) -> Result<()> {
        let path = self.path_for(key)?;
        if path.exists() {
            fs::remove_file(&path)?;
            tracing::debug!("Removed blob {}", path.display());
        }
        Ok(())
    }
}

/// Process-local blobs, for tests and embedding
#[derive(Debug, Default)]
pub struct MemoryBlobStorage {
    blobs: Mutex<HashMap<String, String>>,
}

impl MemoryBlobStorage {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    fn lock(&self) -> Result<std::sync::MutexGuard<'_, HashMap<String, String>>> {
        self.blobs
            .lock()
            .map_err(|_| DeskError::custom("In-memory blob storage lock poisoned"))
    }
}

impl BlobStorage for MemoryBlobStorage {
    fn get(&self, key: &str) -> Result<Option<String>> {
        Ok(self.lock()?.get(key).cloned())
    }

    fn set(&self, key: &str, value: &str) -> Result<()> {
        self.lock()?.insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn remove(&self, key: &str) -> Result<()> {
        self.lock()?.remove(key);
        Ok(())
    }
}
