//! File type detection
//!
//! Maps the leading bytes of a file to a (label, extension) pair using the
//! signature table, byte order marks and a text heuristic.

use super::signature_registry::SignatureRegistry;
use super::text_sniffer;
use crate::domain::entities::DetectedType;
use crate::domain::repositories::FileStore;
use std::io::Read;
use std::path::Path;

/// Number of leading bytes a detector looks at
pub const DETECTION_WINDOW: usize = 512;

/// Trait for content-based file type detection
///
/// Detection never fails: anything unrecognised is [`DetectedType::UNKNOWN`].
pub trait FileTypeDetector: Send + Sync {
    /// Detects the type from a content prefix; bytes past the window are ignored
    fn detect(&self, prefix: &[u8]) -> DetectedType;

    /// Reads at most [`DETECTION_WINDOW`] bytes of `path` and detects its type
    ///
    /// A file that cannot be read is reported as unknown.
    fn detect_file(&self, store: &dyn FileStore, path: &Path) -> DetectedType {
        let mut prefix = Vec::with_capacity(DETECTION_WINDOW);
        let read = store
            .open_read(path)
            .and_then(|reader| reader.take(DETECTION_WINDOW as u64).read_to_end(&mut prefix));

        match read {
            Ok(_) => self.detect(&prefix),
            Err(e) => {
                tracing::debug!("Could not read {} for detection: {}", path.display(), e);
                DetectedType::UNKNOWN
            }
        }
    }
}

/// Signature-table detector
///
/// # Example
///
/// ```
/// use b64forge::domain::services::{FileTypeDetector, SignatureDetector};
///
/// let detector = SignatureDetector::new();
/// let detected = detector.detect(b"%PDF-1.7\n");
/// assert_eq!(detected.label(), "PDF Document");
/// ```
#[derive(Debug, Clone, Copy)]
pub struct SignatureDetector {
    registry: &'static SignatureRegistry,
}

impl SignatureDetector {
    /// Creates a detector over the shared standard table
    pub fn new() -> Self {
        Self::with_registry(SignatureRegistry::shared())
    }

    pub fn with_registry(registry: &'static SignatureRegistry) -> Self {
        Self { registry }
    }
}

impl Default for SignatureDetector {
    fn default() -> Self {
        Self::new()
    }
}

impl FileTypeDetector for SignatureDetector {
    fn detect(&self, prefix: &[u8]) -> DetectedType {
        let window = &prefix[..prefix.len().min(DETECTION_WINDOW)];

        if window.is_empty() {
            return DetectedType::EMPTY;
        }

        if let Some(detected) = self.registry.first_match(window) {
            return detected;
        }

        if let Some(detected) = text_sniffer::byte_order_mark(window) {
            return detected;
        }

        if text_sniffer::is_likely_text(window) {
            return text_sniffer::refine_text(window);
        }

        DetectedType::UNKNOWN
    }
}
