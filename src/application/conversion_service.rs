//! Conversion service
//!
//! Composes the codec, the detector and the temporary file ledger into the
//! file-level encode and decode operations. Operations that return a
//! `ConversionResult` never fail; every fault becomes a failure result.

use crate::application::dto::{ConversionResult, ServiceOptions};
use crate::domain::entities::DetectedType;
use crate::domain::repositories::{FileStore, TemporaryFileLedger};
use crate::domain::services::{Base64Codec, EncodePreview, FileTypeDetector, SignatureDetector};
use crate::error::{ConversionError, ErrorKind, Result};
use crate::infrastructure::codec::StreamingCodec;
use crate::infrastructure::persistence::{LocalFileStore, TemporaryFileRegistry};
use std::io;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use uuid::Uuid;

pub const MISSING_FILE_MESSAGE: &str = "File does not exist. Please check the path and try again.";
const ENCODE_FAILED_PREFIX: &str =
    "Error converting file, please check the file content and access permissions and try again: ";
const DECODE_FAILED_PREFIX: &str =
    "Error decoding from Base64, please check the inputs and try again: ";

/// Appended to a preview when the full text is longer
pub const TRUNCATED_SUFFIX: &str = "... [Truncated]";

/// File-level base64 conversion service
pub struct ConversionService<C: Base64Codec = StreamingCodec, D: FileTypeDetector = SignatureDetector>
{
    codec: C,
    detector: D,
    store: Arc<dyn FileStore>,
    ledger: Arc<dyn TemporaryFileLedger>,
    options: ServiceOptions,
}

impl ConversionService {
    /// Creates a service with the standard codec and detector over `store`
    ///
    /// The service owns a fresh registry that deletes through the same store.
    pub fn with_store(store: Arc<dyn FileStore>, options: ServiceOptions) -> Self {
        let codec = StreamingCodec::new(Arc::clone(&store)).with_chunk_size(options.chunk_size);
        let ledger = Arc::new(TemporaryFileRegistry::new(Arc::clone(&store)));
        Self::new(codec, SignatureDetector::new(), store, ledger, options)
    }

    /// Creates a service over the local filesystem
    pub fn local(options: ServiceOptions) -> Self {
        Self::with_store(Arc::new(LocalFileStore::new()), options)
    }
}

impl<C: Base64Codec, D: FileTypeDetector> ConversionService<C, D> {
    pub fn new(
        codec: C,
        detector: D,
        store: Arc<dyn FileStore>,
        ledger: Arc<dyn TemporaryFileLedger>,
        options: ServiceOptions,
    ) -> Self {
        Self {
            codec,
            detector,
            store,
            ledger,
            options,
        }
    }

    pub fn options(&self) -> &ServiceOptions {
        &self.options
    }

    /// Returns the ledger that tracks this service's temporary files
    pub fn ledger(&self) -> Arc<dyn TemporaryFileLedger> {
        Arc::clone(&self.ledger)
    }

    /// Encodes a file and returns a bounded preview with exact sizes
    pub fn encode_file(&self, path: &Path) -> ConversionResult {
        match self.try_encode(path) {
            Ok(result) => {
                tracing::info!(
                    "Encoded {} ({} bytes -> {} characters)",
                    path.display(),
                    result.original_size(),
                    result.converted_size()
                );
                result
            }
            Err(e) => Self::failure(ENCODE_FAILED_PREFIX, &e),
        }
    }

    /// Decodes a base64 text file into a typed temporary artifact
    ///
    /// The artifact is named `decoded_<uuid>.<ext>` in the temp directory
    /// and tracked by the ledger. Nothing is left behind on failure.
    pub fn decode_base64_file(&self, path: &Path) -> ConversionResult {
        match self.try_decode(path) {
            Ok(result) => {
                tracing::info!(
                    "Decoded {} into {} ({})",
                    path.display(),
                    result
                        .temporary_file_path()
                        .map(|p| p.display().to_string())
                        .unwrap_or_default(),
                    result.file_type().unwrap_or_default()
                );
                result
            }
            Err(e) => Self::failure(DECODE_FAILED_PREFIX, &e),
        }
    }

    /// Encodes the whole file and returns the complete text
    pub fn get_full_base64(&self, path: &Path) -> Result<String> {
        self.ensure_exists(path)?;
        self.codec.encode_full(path)
    }

    /// Detects the type of an existing file
    pub fn detect(&self, path: &Path) -> Result<DetectedType> {
        self.ensure_exists(path)?;
        Ok(self.detector.detect_file(self.store.as_ref(), path))
    }

    /// Writes pasted base64 text to `pasted_base64_<uuid>.txt` and tracks it
    pub fn stage_pasted_base64(&self, text: &str) -> Result<PathBuf> {
        if !self.codec.is_valid_base64(text) {
            return Err(ConversionError::Base64Format(
                "pasted text is not valid base64".to_string(),
            ));
        }

        let path = self
            .options
            .temp_dir
            .join(format!("pasted_base64_{}.txt", Uuid::new_v4()));
        self.store.write_all(&path, text.as_bytes())?;
        self.ledger.track(&path);

        tracing::info!("Staged pasted base64 at {}", path.display());
        Ok(path)
    }

    /// Copies a decoded artifact to `destination` (overwriting) and releases it
    pub fn save_decoded(&self, temp_path: &Path, destination: &Path) -> Result<u64> {
        self.ensure_exists(temp_path)?;
        let copied = self.store.copy(temp_path, destination)?;
        self.ledger.release(temp_path);

        tracing::info!("Saved {} bytes to {}", copied, destination.display());
        Ok(copied)
    }

    /// Writes base64 text to `destination`
    pub fn save_text(&self, destination: &Path, text: &str) -> Result<()> {
        self.store.write_all(destination, text.as_bytes())?;
        tracing::info!("Saved {} characters to {}", text.len(), destination.display());
        Ok(())
    }

    pub fn is_valid_base64(&self, text: &str) -> bool {
        self.codec.is_valid_base64(text)
    }

    pub fn format_file_size(&self, bytes: u64) -> String {
        crate::utils::format_file_size(bytes)
    }

    pub fn track_temporary_file(&self, path: &Path) {
        self.ledger.track(path);
    }

    pub fn release_temporary_file(&self, path: &Path) {
        self.ledger.release(path);
    }

    /// Deletes every tracked artifact; returns how many files were removed
    pub fn drain_all_temporary_files(&self) -> usize {
        let removed = self.ledger.drain_all();
        tracing::info!("Removed {} temporary files", removed);
        removed
    }

    fn ensure_exists(&self, path: &Path) -> Result<()> {
        if self.store.exists(path) {
            Ok(())
        } else {
            Err(ConversionError::FileNotFound(path.to_path_buf()))
        }
    }

    fn failure(prefix: &str, err: &ConversionError) -> ConversionResult {
        tracing::debug!("Conversion failed: {}", err);
        match err {
            ConversionError::FileNotFound(_) => {
                ConversionResult::failure(ErrorKind::FileNotFound, MISSING_FILE_MESSAGE)
            }
            _ => ConversionResult::from_error(prefix, err),
        }
    }

    fn try_encode(&self, path: &Path) -> Result<ConversionResult> {
        self.ensure_exists(path)?;
        let original_size = self.store.file_size(path)?;

        let EncodePreview {
            mut text,
            total_length,
        } = self.codec.encode_preview(path, self.options.preview_length)?;

        if total_length > self.options.preview_length as u64 {
            text.push_str(TRUNCATED_SUFFIX);
        }

        Ok(ConversionResult::encoded(original_size, total_length, text))
    }

    fn try_decode(&self, path: &Path) -> Result<ConversionResult> {
        self.ensure_exists(path)?;
        let original_size = self.store.file_size(path)?;
        let text = self.store.read_to_string(path).map_err(|e| {
            if e.kind() == io::ErrorKind::InvalidData {
                ConversionError::Base64Format("source is not UTF-8 text".to_string())
            } else {
                ConversionError::Io(e)
            }
        })?;

        // The codec removes its own partial output on failure
        let staging = self
            .options
            .temp_dir
            .join(format!("decoded_{}", Uuid::new_v4()));
        let written = self.codec.decode_to_file(&text, &staging)?;

        let detected = self.detector.detect_file(self.store.as_ref(), &staging);
        tracing::debug!("Detected {} for {}", detected, staging.display());

        let artifact = staging.with_extension(detected.extension());
        if let Err(e) = self.store.rename(&staging, &artifact) {
            if let Err(cleanup) = self.store.remove(&staging) {
                tracing::warn!("Failed to remove {}: {}", staging.display(), cleanup);
            }
            return Err(e.into());
        }

        self.ledger.track(&artifact);
        Ok(ConversionResult::decoded(
            original_size,
            written,
            artifact,
            detected,
        ))
    }
}

impl<C: Base64Codec, D: FileTypeDetector> std::fmt::Debug for ConversionService<C, D> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ConversionService")
            .field("options", &self.options)
            .field("tracked", &self.ledger.len())
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::infrastructure::persistence::InMemoryFileStore;

    const TEMP: &str = "/mem/tmp";

    fn service() -> (Arc<InMemoryFileStore>, ConversionService) {
        let store = Arc::new(InMemoryFileStore::new());
        let options = ServiceOptions::default().with_temp_dir(TEMP);
        let service = ConversionService::with_store(store.clone(), options);
        (store, service)
    }

    #[test]
    fn test_encode_missing_file() {
        let (_store, service) = service();
        let result = service.encode_file(Path::new("/mem/missing.bin"));
        assert!(!result.is_success());
        assert_eq!(result.error_message(), Some(MISSING_FILE_MESSAGE));
        assert_eq!(result.error_kind(), Some(ErrorKind::FileNotFound));
    }

    #[test]
    fn test_encode_short_file_has_no_suffix() {
        let (store, service) = service();
        store.insert("/mem/hello.txt", b"Hello".to_vec());

        let result = service.encode_file(Path::new("/mem/hello.txt"));

        assert!(result.is_success());
        assert_eq!(result.preview(), Some("SGVsbG8="));
        assert_eq!(result.original_size(), 5);
        assert_eq!(result.converted_size(), 8);
    }

    #[test]
    fn test_encode_long_file_is_truncated() {
        let (store, service) = service();
        store.insert("/mem/big.bin", vec![7u8; 300]);

        let result = service.encode_file(Path::new("/mem/big.bin"));
        let preview = result.preview().unwrap();

        assert!(preview.ends_with(TRUNCATED_SUFFIX));
        assert_eq!(preview.len(), 100 + TRUNCATED_SUFFIX.len());
        assert_eq!(result.converted_size(), 400);
    }

    #[test]
    fn test_decode_names_artifact_by_type() {
        let (store, service) = service();
        store.insert("/mem/in.b64", "JVBERi0xLjQK".as_bytes().to_vec());

        let result = service.decode_base64_file(Path::new("/mem/in.b64"));

        assert!(result.is_success(), "{:?}", result.error_message());
        assert_eq!(result.file_type(), Some("PDF Document"));
        let artifact = result.temporary_file_path().unwrap();
        assert!(artifact.starts_with(TEMP));
        assert_eq!(artifact.extension().unwrap(), "pdf");
        assert!(store.exists(artifact));
        assert!(service.ledger().contains(artifact));
    }

    #[test]
    fn test_decode_garbage_leaves_nothing() {
        let (store, service) = service();
        store.insert("/mem/in.b64", b"@@@not-base64@@@".to_vec());

        let result = service.decode_base64_file(Path::new("/mem/in.b64"));

        assert!(!result.is_success());
        assert!(result.error_message().unwrap().starts_with(DECODE_FAILED_PREFIX));
        assert_eq!(result.error_kind(), Some(ErrorKind::Base64Format));
        assert!(service.ledger().is_empty());
        assert_eq!(store.paths().len(), 1);
    }

    #[test]
    fn test_decode_write_failure_is_reported() {
        let (store, service) = service();
        store.insert("/mem/in.b64", b"SGVsbG8=".to_vec());
        store.set_writes_fail(true);

        let result = service.decode_base64_file(Path::new("/mem/in.b64"));

        assert!(!result.is_success());
        assert_eq!(result.error_kind(), Some(ErrorKind::Io));
        assert!(service.ledger().is_empty());
    }

    #[test]
    fn test_stage_rejects_invalid_text() {
        let (_store, service) = service();
        let err = service.stage_pasted_base64("not base64!").unwrap_err();
        assert!(matches!(err, ConversionError::Base64Format(_)));
        assert!(service.ledger().is_empty());
    }

    #[test]
    fn test_save_decoded_releases_artifact() {
        let (store, service) = service();
        store.insert("/mem/in.b64", b"SGVsbG8=".to_vec());
        let result = service.decode_base64_file(Path::new("/mem/in.b64"));
        let artifact = result.temporary_file_path().unwrap().to_path_buf();

        let copied = service
            .save_decoded(&artifact, Path::new("/mem/out/hello.txt"))
            .unwrap();

        assert_eq!(copied, 5);
        assert!(!store.exists(&artifact));
        assert!(service.ledger().is_empty());
        assert_eq!(store.contents(Path::new("/mem/out/hello.txt")).unwrap(), b"Hello");
    }
}
