//! Temporary file ledger trait
//!
//! Defines the contract for tracking decoded artifacts so none outlive the process.

use std::path::Path;
use std::sync::Arc;

/// Ledger of temporary files created by decode operations
///
/// Implementations must be safe to call from any thread. Deletion failures
/// are never reported to the caller, only logged.
pub trait TemporaryFileLedger: Send + Sync {
    /// Adds `path` to the ledger; tracking the same path twice keeps one entry
    fn track(&self, path: &Path);

    /// Deletes the file if it exists and forgets it
    fn release(&self, path: &Path);

    /// Deletes every tracked file that still exists and empties the ledger
    ///
    /// Returns the number of files actually deleted.
    fn drain_all(&self) -> usize;

    /// Returns true if `path` is currently tracked
    fn contains(&self, path: &Path) -> bool;

    /// Returns the number of tracked paths
    fn len(&self) -> usize;

    fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Drains a ledger when dropped
///
/// Hold one for the lifetime of the process (e.g. in `main`) so temporary
/// artifacts are removed on every exit path that unwinds the stack.
pub struct DrainGuard {
    ledger: Arc<dyn TemporaryFileLedger>,
}

impl DrainGuard {
    pub fn new(ledger: Arc<dyn TemporaryFileLedger>) -> Self {
        Self { ledger }
    }
}

impl Drop for DrainGuard {
    fn drop(&mut self) {
        let removed = self.ledger.drain_all();
        tracing::debug!("Shutdown cleanup removed {} temporary files", removed);
    }
}
