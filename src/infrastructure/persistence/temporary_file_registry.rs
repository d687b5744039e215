//! Temporary file registry
//!
//! The process-wide ledger of decoded artifacts. One instance is created at
//! startup and shared (via `Arc`) with every service that creates temporary
//! files; it is drained once at shutdown.

use crate::domain::repositories::{FileStore, TemporaryFileLedger};
use crate::infrastructure::persistence::LocalFileStore;
use parking_lot::Mutex;
use std::collections::BTreeSet;
use std::path::{Path, PathBuf};
use std::sync::Arc;

/// Mutex-guarded set of temporary file paths
pub struct TemporaryFileRegistry {
    store: Arc<dyn FileStore>,
    entries: Mutex<BTreeSet<PathBuf>>,
}

impl TemporaryFileRegistry {
    /// Creates an empty registry that deletes through `store`
    pub fn new(store: Arc<dyn FileStore>) -> Self {
        Self {
            store,
            entries: Mutex::new(BTreeSet::new()),
        }
    }

    /// Creates an empty registry over the local filesystem
    pub fn local() -> Self {
        Self::new(Arc::new(LocalFileStore::new()))
    }

    /// Returns a snapshot of the tracked paths
    pub fn tracked(&self) -> Vec<PathBuf> {
        self.entries.lock().iter().cloned().collect()
    }

    /// Deletes `path` if it still exists; failures are logged and swallowed
    fn delete_quietly(&self, path: &Path) -> bool {
        if !self.store.exists(path) {
            return false;
        }
        match self.store.remove(path) {
            Ok(()) => {
                tracing::debug!("Deleted temporary file {}", path.display());
                true
            }
            Err(e) => {
                tracing::warn!("Failed to delete temporary file {}: {}", path.display(), e);
                false
            }
        }
    }
}

impl TemporaryFileLedger for TemporaryFileRegistry {
    fn track(&self, path: &Path) {
        if path.as_os_str().is_empty() {
            return;
        }
        if self.entries.lock().insert(path.to_path_buf()) {
            tracing::debug!("Tracking temporary file {}", path.display());
        }
    }

    fn release(&self, path: &Path) {
        let mut entries = self.entries.lock();
        self.delete_quietly(path);
        entries.remove(path);
    }

    fn drain_all(&self) -> usize {
        let mut entries = self.entries.lock();
        let removed = entries
            .iter()
            .filter(|path| self.delete_quietly(path))
            .count();
        entries.clear();
        removed
    }

    fn contains(&self, path: &Path) -> bool {
        self.entries.lock().contains(path)
    }

    fn len(&self) -> usize {
        self.entries.lock().len()
    }
}

impl std::fmt::Debug for TemporaryFileRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TemporaryFileRegistry")
            .field("entries", &*self.entries.lock())
            .finish_non_exhaustive()
    }
}
